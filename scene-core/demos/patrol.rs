// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Patrol example: AI agents chasing a moving player
//!
//! Builds a small maze, lets two ghosts hunt the player camera as it walks a
//! square route, and prints everyone's position every few frames.
//!
//! Run with `cargo run --example patrol -- --verbose` for debug logs, or set
//! `RUST_LOG=scene_core=trace` to see every pathfinding decision.

use glam::{IVec2, Vec3};
use scene_core::ecs::components::{AiAgent, Collider, Position, SharedPosition, Transform, Velocity};
use scene_core::pathfinding::world_cell;
use scene_core::systems::{PathfindingConfig, PathfindingSystem};
use scene_core::{logging, Entity, EntityManager, SystemManager};

const MAP_SIZE: usize = 24;

fn wall(name: &str, x: f32, z: f32, half_extent: Vec3) -> Entity {
    Entity::new(name)
        .with(Position::new(Vec3::new(x, 0.0, z)))
        .and_then(|e| e.with(Transform::new(half_extent, Vec3::ZERO)))
        .and_then(|e| e.with(Collider::rigid()))
        .expect("fresh entity")
}

fn ghost(name: &str, x: f32, z: f32, speed: f32) -> Entity {
    Entity::new(name)
        .with(Position::new(Vec3::new(x, 0.0, z)))
        .and_then(|e| e.with(Velocity::new(speed, 0.0, speed)))
        .and_then(|e| e.with(AiAgent::new(Vec3::ZERO)))
        .expect("fresh entity")
}

/// ASCII view of the grid with walls, ghosts and the player
fn render(entities: &EntityManager, system: &PathfindingSystem, player: Vec3) {
    let grid = system.grid();
    let half = grid.half_width();
    let player = world_cell(player);
    for z in (-half..half).rev() {
        let row: String = (-half..half)
            .map(|x| {
                let cell = IVec2::new(x, z);
                if cell == player {
                    'P'
                } else if entities
                    .entities()
                    .iter()
                    .filter(|e| e.ai().is_some())
                    .any(|e| world_cell(e.position().map(Position::get).unwrap_or_default()) == cell)
                {
                    'G'
                } else if grid.is_walkable(cell) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect();
        println!("  {}", row);
    }
}

fn main() {
    let verbose = std::env::args().any(|arg| arg == "--verbose" || arg == "-v");
    logging::init(verbose);

    println!("Scene Core - Patrol Example");
    println!("===========================\n");

    let mut entities = EntityManager::new();
    let walls = vec![
        wall("north_block", 0.0, 5.0, Vec3::new(4.0, 1.0, 1.0)),
        wall("south_block", 0.0, -5.0, Vec3::new(4.0, 1.0, 1.0)),
        wall("west_pillar", -6.0, 0.0, Vec3::new(1.0, 1.0, 2.0)),
        wall("east_pillar", 6.0, 0.0, Vec3::new(1.0, 1.0, 2.0)),
    ];
    entities.load_entities(walls).expect("unique wall names");
    entities
        .load_entities(vec![ghost("blinky", -9.0, -9.0, 4.0), ghost("clyde", 9.0, 9.0, 2.5)])
        .expect("unique ghost names");

    let player = SharedPosition::new(Vec3::new(-3.0, 1.7, 0.0));
    let mut systems = SystemManager::new();
    systems.add_system(
        PathfindingSystem::new(PathfindingConfig::new(MAP_SIZE, MAP_SIZE), entities.entities())
            .with_target_source(player.clone()),
    );

    // The player walks a square around the centre
    let route = [
        Vec3::new(-3.0, 1.7, 0.0),
        Vec3::new(-3.0, 1.7, 8.0),
        Vec3::new(3.0, 1.7, 8.0),
        Vec3::new(3.0, 1.7, 0.0),
    ];
    let dt = 1.0 / 30.0;
    let mut leg = 0;

    for frame in 0..240 {
        let here = player.get();
        let next = route[(leg + 1) % route.len()];
        let step = (next - here).clamp_length_max(3.0 * dt);
        player.set(here + step);
        if (next - player.get()).length() < 1e-3 {
            leg = (leg + 1) % route.len();
        }

        systems.update_delta_time(dt);
        systems.action_systems(&mut entities);

        if frame % 60 == 0 {
            println!("Frame {}:", frame);
            for name in ["blinky", "clyde"] {
                let entity = entities.find(name).expect("ghost is registered");
                let position = entity.position().map(Position::get).unwrap_or_default();
                let waypoints = entity.ai().map(|ai| ai.path().len()).unwrap_or(0);
                println!(
                    "  {:<7} at ({:6.2}, {:6.2}), {} waypoints left",
                    name, position.x, position.z, waypoints
                );
            }
            let system = systems
                .get::<PathfindingSystem>()
                .expect("pathfinding is registered");
            render(&entities, system, player.get());
            println!();
        }
    }

    println!("Done.");
}

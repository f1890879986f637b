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
//! Grid A* search and traversability

use glam::{IVec2, Vec3};
use scene_core::ecs::components::{Collider, Position, Transform};
use scene_core::pathfinding::{compute_path, world_cell, TraversabilityGrid, DEFAULT_BUDGET_FACTOR};
use scene_core::{Entity, PathError};

fn pillar(name: &str, x: f32, z: f32) -> Entity {
    Entity::new(name)
        .with(Position::new(Vec3::new(x, 0.0, z)))
        .unwrap()
        .with(Transform::new(Vec3::new(1.0, 2.0, 1.0), Vec3::ZERO))
        .unwrap()
        .with(Collider::rigid())
        .unwrap()
}

fn maze() -> TraversabilityGrid {
    let obstacles = [
        pillar("p1", -4.0, 0.0),
        pillar("p2", 0.0, 4.0),
        pillar("p3", 4.0, -2.0),
        pillar("p4", 2.0, 2.0),
    ];
    TraversabilityGrid::from_obstacles(30, 30, &obstacles)
}

fn assert_legal(grid: &TraversabilityGrid, start: Vec3, path: &[Vec3]) {
    let mut previous = world_cell(start);
    for waypoint in path {
        assert_eq!(waypoint.y, 0.0);
        let cell = world_cell(*waypoint);
        let step = (cell - previous).abs();
        assert!(step.x <= 1 && step.y <= 1 && step != IVec2::ZERO, "illegal step to {}", cell);
        assert!(grid.is_walkable(cell), "path crosses blocked cell {}", cell);
        previous = cell;
    }
}

#[test]
fn test_search_is_deterministic() {
    let grid = maze();
    let start = Vec3::new(-8.0, 0.0, -3.0);
    let target = Vec3::new(7.0, 0.0, 6.0);

    let first = compute_path(&grid, start, target, DEFAULT_BUDGET_FACTOR).unwrap();
    for _ in 0..10 {
        assert_eq!(compute_path(&grid, start, target, DEFAULT_BUDGET_FACTOR).unwrap(), first);
    }
    assert_legal(&grid, start, &first);
}

#[test]
fn test_open_grid_reaches_target() {
    let grid = TraversabilityGrid::new(20, 20);
    let target = Vec3::new(5.0, 0.0, 5.0);
    let path = compute_path(&grid, Vec3::ZERO, target, DEFAULT_BUDGET_FACTOR).unwrap();

    assert!(!path.is_empty());
    assert_eq!(*path.last().unwrap(), target);
    assert_legal(&grid, Vec3::ZERO, &path);
}

#[test]
fn test_path_excludes_start() {
    let grid = TraversabilityGrid::new(20, 20);
    let path = compute_path(&grid, Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0), DEFAULT_BUDGET_FACTOR).unwrap();
    assert_eq!(path, vec![Vec3::new(-1.0, 0.0, 0.0)]);
}

#[test]
fn test_blocked_target_yields_no_path() {
    let grid = maze();
    let result = compute_path(&grid, Vec3::new(-8.0, 0.0, -8.0), Vec3::new(2.0, 0.0, 2.0), DEFAULT_BUDGET_FACTOR);
    assert_eq!(result, Err(PathError::TargetBlocked { x: 2, z: 2 }));
}

#[test]
fn test_walled_in_target_fails() {
    // Box of pillars around the origin
    let mut obstacles = Vec::new();
    for (i, (x, z)) in [(-3.0, -3.0), (-3.0, 0.0), (-3.0, 3.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0), (3.0, -3.0), (0.0, -3.0)]
        .into_iter()
        .enumerate()
    {
        obstacles.push(pillar(&format!("wall{}", i), x, z));
    }
    let grid = TraversabilityGrid::from_obstacles(30, 30, &obstacles);
    assert!(grid.is_walkable(IVec2::ZERO));

    let result = compute_path(&grid, Vec3::new(-10.0, 0.0, -10.0), Vec3::ZERO, DEFAULT_BUDGET_FACTOR);
    assert_eq!(result, Err(PathError::Unreachable));
}

#[test]
fn test_obstacle_footprint_is_inflated() {
    let grid = TraversabilityGrid::from_obstacles(30, 30, [&pillar("p", 0.0, 0.0)]);
    for cell in [IVec2::new(-1, -1), IVec2::new(0, 0), IVec2::new(1, 1)] {
        assert!(!grid.is_walkable(cell));
    }
    assert!(grid.is_walkable(IVec2::new(-2, 0)));
    assert!(grid.is_walkable(IVec2::new(2, 0)));
}

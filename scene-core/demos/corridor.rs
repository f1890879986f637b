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
//! Corridor example: a side-on actor collecting pickups
//!
//! Loads a scene from component declarations, runs an XY-plane actor along a
//! corridor with physics and collision, removes each pickup it touches and
//! stops at the wall at the far end.

use glam::Vec3;
use scene_core::resources::{
    AudioSettings, AudioVoice, GeometryData, GeometryHandle, ResourceProvider, TextureHandle,
};
use scene_core::scene::SceneEntityDecl;
use scene_core::systems::{AnimatorSystem, AudioSystem, CollisionConfig, CollisionSystem, PhysicsSystem};
use scene_core::{logging, EntityManager, SceneError, SystemManager};
use std::collections::HashMap;
use std::rc::Rc;

/// Voice that narrates instead of playing
struct PrintVoice {
    clip: String,
}

impl AudioVoice for PrintVoice {
    fn play(&mut self, settings: &AudioSettings) {
        println!("  [audio] playing {} at volume {:.1}", self.clip, settings.volume);
    }

    fn set_emitter_position(&mut self, _position: Vec3) {}

    fn close(&mut self) {
        println!("  [audio] closed {}", self.clip);
    }
}

/// Every mesh is a cube; textures are numbered in load order
#[derive(Default)]
struct DemoResources {
    meshes: HashMap<String, (GeometryHandle, Rc<GeometryData>)>,
    textures: u32,
}

impl ResourceProvider for DemoResources {
    fn geometry(&mut self, name: &str) -> Result<(GeometryHandle, Rc<GeometryData>), SceneError> {
        let next = GeometryHandle(self.meshes.len() as u32);
        let (handle, data) = self
            .meshes
            .entry(name.to_string())
            .or_insert_with(|| (next, Rc::new(GeometryData::cuboid())));
        Ok((*handle, Rc::clone(data)))
    }

    fn texture(&mut self, _name: &str) -> Result<TextureHandle, SceneError> {
        self.textures += 1;
        Ok(TextureHandle(self.textures))
    }

    fn cube_map(&mut self, faces: &[&str]) -> Result<TextureHandle, SceneError> {
        self.texture(&faces.join(","))
    }

    fn audio(&mut self, name: &str) -> Result<Box<dyn AudioVoice>, SceneError> {
        Ok(Box::new(PrintVoice {
            clip: name.to_string(),
        }))
    }
}

fn corridor() -> Vec<SceneEntityDecl> {
    let mut scene = vec![SceneEntityDecl::new("player")
        .with("position", "0, 0, 0")
        .with("velocity", "2, 0, 0")
        .with("audio", "footsteps.wav, 0.3, true, true")];

    for (i, x) in [4.0, 8.0, 12.0].iter().enumerate() {
        scene.push(
            SceneEntityDecl::new(format!("gem_{}", i))
                .with("position", format!("{}, 0, 0", x))
                .with("geometry", "gem.obj")
                .with("texture", "gem.png")
                .with("transform", "0.25, 0.25, 0.25, 0, 0, 0")
                .with("collision", "false")
                .with("animator", "0, 1, 0, 0.05"),
        );
    }

    scene.push(
        SceneEntityDecl::new("end_wall")
            .with("position", "18, 0, 0")
            .with("geometry", "wall.obj")
            .with("texture", "brick.png, 4")
            .with("transform", "1, 3, 1, 0, 0, 0")
            .with("collision", "true"),
    );
    scene
}

fn main() -> Result<(), SceneError> {
    let verbose = std::env::args().any(|arg| arg == "--verbose" || arg == "-v");
    logging::init(verbose);

    println!("Scene Core - Corridor Example");
    println!("=============================\n");

    let mut resources = DemoResources::default();
    let mut entities = EntityManager::new();
    entities.load_scene(&corridor(), &mut resources)?;
    println!("Loaded entities: {:?}\n", entities.entity_names());

    let actor = entities
        .find("player")
        .and_then(|player| player.position())
        .map(|position| position.handle())
        .ok_or_else(|| SceneError::MissingResource("player position".to_string()))?;

    let mut systems = SystemManager::new();
    systems.add_system(PhysicsSystem::new());
    systems.add_system(AnimatorSystem::new());
    systems.add_system(AudioSystem::new());
    systems.add_system(CollisionSystem::new(CollisionConfig::xy_actor(), actor.clone(), &entities));

    let dt = 1.0 / 20.0;
    let mut score = 0;
    for frame in 0..200 {
        systems.update_delta_time(dt);
        systems.action_systems(&mut entities);

        if let Some(collision) = systems.get_mut::<CollisionSystem>() {
            if let Some(gem) = collision.last_trigger().map(str::to_string) {
                entities.remove(&gem);
                collision.clear_last_trigger_and_prune();
                score += 1;
                println!("Frame {:3}: picked up {} at x = {:.2}", frame, gem, actor.get().x);
            }
        }
    }

    println!("\nActor stopped at x = {:.2} with {} gems", actor.get().x, score);
    println!("Remaining entities: {:?}", entities.entity_names());

    entities.delete_all();
    entities.clear();
    systems.clear();
    Ok(())
}

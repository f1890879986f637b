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
//! Linear motion

use crate::ecs::{checked_delta_time, ComponentMask, ComponentType, Entity, System};
use std::any::Any;

/// Moves every entity with a velocity: `position += velocity * dt`
#[derive(Debug, Clone, Default)]
pub struct PhysicsSystem {
    dt: f32,
}

impl PhysicsSystem {
    /// Components the system acts on
    pub const MASK: ComponentMask =
        ComponentMask::of(&[ComponentType::Position, ComponentType::Velocity]);

    /// Create a physics system; nothing moves until a frame time arrives
    pub fn new() -> Self {
        PhysicsSystem { dt: 0.0 }
    }

    /// Frame time currently applied
    pub fn delta_time(&self) -> f32 {
        self.dt
    }
}

impl System for PhysicsSystem {
    fn on_action(&mut self, entity: &mut Entity) {
        if !entity.matches(Self::MASK) {
            return;
        }
        if let (Some(position), Some(velocity)) = (entity.position(), entity.velocity()) {
            position.translate(velocity.value() * self.dt);
        }
    }

    fn required_mask(&self) -> ComponentMask {
        Self::MASK
    }

    fn name(&self) -> &str {
        "physics"
    }

    fn update_delta_time(&mut self, dt: f32) {
        if let Some(dt) = checked_delta_time(self.name(), dt) {
            self.dt = dt;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

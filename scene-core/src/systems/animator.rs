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
//! Continuous rotation

use crate::ecs::{ComponentMask, ComponentType, ComponentsMut, Entity, System};
use std::any::Any;

/// Spins animated entities by a fixed increment every frame
///
/// The increment is per frame, not per second, so spin speed follows the
/// frame rate.
#[derive(Debug, Clone, Default)]
pub struct AnimatorSystem;

impl AnimatorSystem {
    /// Components the system acts on
    pub const MASK: ComponentMask = ComponentMask::of(&[
        ComponentType::Position,
        ComponentType::Transform,
        ComponentType::Animation,
    ]);

    /// Create an animator
    pub fn new() -> Self {
        AnimatorSystem
    }
}

impl System for AnimatorSystem {
    fn on_action(&mut self, entity: &mut Entity) {
        if !entity.matches(Self::MASK) {
            return;
        }
        let ComponentsMut {
            transform: Some(transform),
            animation: Some(animation),
            ..
        } = entity.components_mut()
        else {
            return;
        };
        transform.rotate(animation.increment());
    }

    fn required_mask(&self) -> ComponentMask {
        Self::MASK
    }

    fn name(&self) -> &str {
        "animator"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

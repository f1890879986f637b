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
//! Positional audio

use crate::ecs::{ComponentMask, ComponentType, ComponentsMut, Entity, System};
use std::any::Any;

/// Keeps each voice's emitter on its entity
#[derive(Debug, Clone, Default)]
pub struct AudioSystem;

impl AudioSystem {
    /// Components the system acts on
    pub const MASK: ComponentMask =
        ComponentMask::of(&[ComponentType::Position, ComponentType::Audio]);

    /// Create an audio system
    pub fn new() -> Self {
        AudioSystem
    }
}

impl System for AudioSystem {
    fn on_action(&mut self, entity: &mut Entity) {
        if !entity.matches(Self::MASK) {
            return;
        }
        let ComponentsMut {
            position: Some(position),
            audio: Some(audio),
            ..
        } = entity.components_mut()
        else {
            return;
        };
        audio.set_emitter_position(position.get());
    }

    fn required_mask(&self) -> ComponentMask {
        Self::MASK
    }

    fn name(&self) -> &str {
        "audio"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

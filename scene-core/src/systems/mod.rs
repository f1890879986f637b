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
//! Built-in frame systems
//!
//! Register them with a [`SystemManager`](crate::ecs::SystemManager) in the
//! order they should run each frame. Motion systems (physics, pathfinding)
//! go before collision so collision can correct this frame's movement.

mod ai;
mod animator;
mod audio;
mod collision;
mod physics;

pub use ai::{PathfindingConfig, PathfindingSystem};
pub use animator::AnimatorSystem;
pub use audio::AudioSystem;
pub use collision::{CollisionConfig, CollisionSystem, UpAxis};
pub use physics::PhysicsSystem;

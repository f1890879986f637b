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
//! # Scene Core
//!
//! The simulation core of a small game engine: an entity registry, an
//! ordered system pipeline, grid A* pathfinding for autonomous agents and a
//! collision system that keeps one actor out of box-shaped obstacles.
//!
//! ## Features
//!
//! - **Entities**: named entities with at most one component per kind and a
//!   bitmask for fast system matching
//! - **Systems**: registration-ordered dispatch, one frame at a time
//! - **Pathfinding**: traversability grid built from rigid colliders and an
//!   8-connected A* search with a bounded budget
//! - **Collision**: face-crossing tests for an XZ camera or an XY actor,
//!   with rigid and trigger responses
//! - **Scene assembly**: positional component declarations resolved through
//!   an injected resource provider
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec3;
//! use scene_core::ecs::components::{Position, Velocity};
//! use scene_core::systems::PhysicsSystem;
//! use scene_core::{Entity, EntityManager, SystemManager};
//!
//! let mut entities = EntityManager::new();
//! entities
//!     .add(
//!         Entity::new("ball")
//!             .with(Position::new(Vec3::ZERO))?
//!             .with(Velocity::new(1.0, 0.0, 0.0))?,
//!     )?;
//!
//! let mut systems = SystemManager::new();
//! systems.add_system(PhysicsSystem::new());
//!
//! systems.update_delta_time(0.5);
//! systems.action_systems(&mut entities);
//!
//! let ball = entities.find("ball").unwrap();
//! assert_eq!(ball.position().unwrap().get(), Vec3::new(0.5, 0.0, 0.0));
//! # Ok::<(), scene_core::error::EcsError>(())
//! ```

#![warn(missing_docs)]

/// Entities, components and the system pipeline
pub mod ecs;

/// Error types
pub mod error;

/// Logger setup
pub mod logging;

/// Traversability grid and A* search
pub mod pathfinding;

/// Resource handles and the loader interface
pub mod resources;

/// Scene declarations and entity assembly
pub mod scene;

/// Built-in frame systems
pub mod systems;

pub use ecs::{ComponentMask, ComponentType, Entity, EntityManager, System, SystemManager};
pub use error::{EcsError, PathError, SceneError};

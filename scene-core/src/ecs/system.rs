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
//! System execution framework
//!
//! Systems contain the per-frame logic that operates on entities. The
//! [`SystemManager`] dispatches every registered system over every entity in
//! a fixed order: systems in registration order, entities in list order.
//! Ordering is significant, so physics must be registered before collision
//! correction.

use crate::ecs::{ComponentMask, Entity, EntityManager};
use log::{debug, warn};
use std::any::Any;

/// Trait for per-entity frame operators
///
/// Systems are single-threaded and may keep small amounts of state (delta
/// time, a tracked actor). `on_action` is called for every entity; systems
/// skip entities that do not carry [`System::required_mask`].
pub trait System: Any {
    /// Act on one entity for the current frame
    fn on_action(&mut self, entity: &mut Entity);

    /// Components an entity must carry for this system to act on it
    fn required_mask(&self) -> ComponentMask;

    /// Get the name of this system for debugging and lookup
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Receive the frame time in seconds
    ///
    /// Only time-dependent systems override this.
    fn update_delta_time(&mut self, _dt: f32) {}

    /// Allow downcasting to the concrete system type
    fn as_any(&self) -> &dyn Any;

    /// Allow mutable downcasting to the concrete system type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Validate a frame time before a system stores it
///
/// Returns `None` and logs a warning for negative or non-finite values.
pub fn checked_delta_time(system: &str, dt: f32) -> Option<f32> {
    if dt.is_finite() && dt >= 0.0 {
        Some(dt)
    } else {
        warn!("{}: ignoring invalid delta time {}", system, dt);
        None
    }
}

/// Ordered list of systems run once per frame
#[derive(Default)]
pub struct SystemManager {
    systems: Vec<Box<dyn System>>,
}

impl SystemManager {
    /// Create a new, empty manager
    pub fn new() -> Self {
        SystemManager {
            systems: Vec::new(),
        }
    }

    /// Append a system; it runs after every system added before it
    pub fn add_system<S: System>(&mut self, system: S) {
        if self.find_system(system.name()).is_some() {
            debug!("system '{}' registered more than once", system.name());
        }
        self.systems.push(Box::new(system));
    }

    /// First system registered under this name
    pub fn find_system(&self, name: &str) -> Option<&dyn System> {
        self.systems
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// First system of type `S`
    pub fn get<S: System>(&self) -> Option<&S> {
        self.systems.iter().find_map(|s| s.as_any().downcast_ref::<S>())
    }

    /// Mutable access to the first system of type `S`
    pub fn get_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<S>())
    }

    /// Forward the frame time to every system
    pub fn update_delta_time(&mut self, dt: f32) {
        for system in &mut self.systems {
            system.update_delta_time(dt);
        }
    }

    /// Run every system over every entity
    pub fn action_systems(&mut self, entities: &mut EntityManager) {
        for system in &mut self.systems {
            for entity in entities.entities_mut() {
                system.on_action(entity);
            }
        }
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Drop every system, e.g. on scene transition
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

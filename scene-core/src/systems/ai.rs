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
//! Grid pathfinding for autonomous agents
//!
//! Each frame an agent refreshes its target, replans with A* when the target
//! changed or it has no route, then steps toward its next waypoint. Failure
//! to plan is never fatal: the agent holds its position and tries again on
//! the next frame.

use crate::ecs::components::{AiAgent, Position, SharedPosition, Velocity};
use crate::ecs::{checked_delta_time, ComponentMask, ComponentType, ComponentsMut, Entity, System};
use crate::error::PathError;
use crate::pathfinding::{compute_path, world_cell, TraversabilityGrid, DEFAULT_BUDGET_FACTOR};
use glam::IVec2;
use log::{debug, trace};
use std::any::Any;

/// Map and search settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathfindingConfig {
    /// Cells along world x
    pub map_width: usize,
    /// Cells along world z
    pub map_height: usize,
    /// Expansions allowed per grid cell before a search gives up
    pub search_budget_factor: usize,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        PathfindingConfig {
            map_width: 50,
            map_height: 50,
            search_budget_factor: DEFAULT_BUDGET_FACTOR,
        }
    }
}

impl PathfindingConfig {
    /// Create a configuration for a `map_width` by `map_height` map
    pub fn new(map_width: usize, map_height: usize) -> Self {
        PathfindingConfig {
            map_width,
            map_height,
            search_budget_factor: DEFAULT_BUDGET_FACTOR,
        }
    }

    /// Set the search budget factor
    pub fn with_budget_factor(mut self, factor: usize) -> Self {
        assert!(factor > 0, "Search budget factor must be positive");
        self.search_budget_factor = factor;
        self
    }
}

/// Moves AI agents along A* paths
pub struct PathfindingSystem {
    config: PathfindingConfig,
    grid: TraversabilityGrid,
    target_source: Option<SharedPosition>,
    dt: f32,
}

impl PathfindingSystem {
    /// Components the system acts on
    pub const MASK: ComponentMask = ComponentMask::of(&[
        ComponentType::Position,
        ComponentType::Velocity,
        ComponentType::Ai,
    ]);

    /// Build the system and rasterize the rigid obstacles among `entities`
    ///
    /// The grid is not rebuilt later, so obstacles should already be loaded.
    ///
    /// # Panics
    ///
    /// Panics if either map dimension is zero.
    pub fn new<'a, I>(config: PathfindingConfig, entities: I) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let grid = TraversabilityGrid::from_obstacles(config.map_width, config.map_height, entities);
        debug!(
            "pathfinding ready on a {}x{} map",
            config.map_width, config.map_height
        );
        PathfindingSystem {
            config,
            grid,
            target_source: None,
            dt: 0.0,
        }
    }

    /// Chase a live position (usually the player camera) instead of each
    /// agent's own target
    pub fn with_target_source(mut self, source: SharedPosition) -> Self {
        self.target_source = Some(source);
        self
    }

    /// Replace or remove the live target
    pub fn set_target_source(&mut self, source: Option<SharedPosition>) {
        self.target_source = source;
    }

    /// Active configuration
    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Traversability grid built at construction
    pub fn grid(&self) -> &TraversabilityGrid {
        &self.grid
    }

    /// Frame time currently applied
    pub fn delta_time(&self) -> f32 {
        self.dt
    }

    /// Check the target lies on the map and on a walkable cell
    fn validate_target(&self, goal: IVec2) -> Result<(), PathError> {
        let half_width = self.grid.half_width();
        let half_height = self.grid.half_height();
        if goal.x < -half_width || goal.x >= half_width || goal.y < -half_height || goal.y >= half_height {
            return Err(PathError::TargetOutOfBounds {
                x: goal.x,
                z: goal.y,
            });
        }
        if !self.grid.is_walkable(goal) {
            return Err(PathError::TargetBlocked {
                x: goal.x,
                z: goal.y,
            });
        }
        Ok(())
    }

    fn motion(&self, name: &str, position: &Position, velocity: &Velocity, agent: &mut AiAgent) {
        if let Some(source) = &self.target_source {
            agent.set_target(source.get());
        }

        let goal = world_cell(agent.target());
        if world_cell(position.get()) == goal {
            return;
        }

        if let Err(reason) = self.validate_target(goal) {
            trace!("{}: holding, {}", name, reason);
            return;
        }

        let following = !agent.path().is_empty() && agent.original_target() == agent.target();
        if !following {
            agent.set_original_target(agent.target());
            match compute_path(
                &self.grid,
                position.get(),
                agent.target(),
                self.config.search_budget_factor,
            ) {
                Ok(path) => {
                    trace!("{}: new path of {} waypoints", name, path.len());
                    agent.set_path(path);
                }
                Err(reason) => {
                    trace!("{}: holding, {}", name, reason);
                    agent.set_path(Vec::new());
                    return;
                }
            }
        }

        let Some(&next) = agent.path().first() else {
            return;
        };
        position.translate((next - position.get()) * velocity.value() * self.dt);

        if world_cell(position.get()) == world_cell(next) {
            agent.pop_waypoint();
        }
    }
}

impl System for PathfindingSystem {
    fn on_action(&mut self, entity: &mut Entity) {
        if !entity.matches(Self::MASK) {
            return;
        }
        let name = entity.name().to_string();
        let ComponentsMut {
            position: Some(position),
            velocity: Some(velocity),
            ai: Some(agent),
            ..
        } = entity.components_mut()
        else {
            return;
        };
        self.motion(&name, position, velocity, agent);
    }

    fn required_mask(&self) -> ComponentMask {
        Self::MASK
    }

    fn name(&self) -> &str {
        "pathfinding"
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

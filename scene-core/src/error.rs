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
//! Error types for the simulation core
//!
//! Every fallible operation in the crate reports one of the enums below.
//! Pathfinding failures are not fatal: the pathfinding system logs them and
//! the agent simply holds its position for the frame.

use crate::ecs::ComponentType;
use thiserror::Error;

/// Errors raised by the entity registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// An entity with this name is already registered.
    #[error("entity '{0}' already exists")]
    DuplicateEntity(String),

    /// The entity already carries a component of this kind.
    #[error("entity '{entity}' already has a {kind} component")]
    DuplicateComponent {
        /// Name of the entity being built.
        entity: String,
        /// Kind that was attached twice.
        kind: ComponentType,
    },
}

/// Reasons a path could not be produced for an agent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Target lies outside the map half extents.
    #[error("target ({x}, {z}) is outside the map")]
    TargetOutOfBounds {
        /// Target cell x.
        x: i32,
        /// Target cell z.
        z: i32,
    },

    /// Target cell is blocked by an obstacle.
    #[error("target ({x}, {z}) is not traversable")]
    TargetBlocked {
        /// Target cell x.
        x: i32,
        /// Target cell z.
        z: i32,
    },

    /// The open list drained without reaching the target.
    #[error("no route to target")]
    Unreachable,

    /// The search expanded more nodes than its budget allows.
    #[error("search budget of {budget} expansions exhausted")]
    BudgetExhausted {
        /// Maximum number of expansions.
        budget: usize,
    },
}

/// Errors produced while assembling entities from scene declarations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The component tag is not one the core understands.
    #[error("entity '{entity}': unknown component kind '{kind}'")]
    UnknownComponent {
        /// Entity being assembled.
        entity: String,
        /// Offending tag.
        kind: String,
    },

    /// Wrong number of comma separated values for the component kind.
    #[error("entity '{entity}': {kind} expects {expected} values, got {found}")]
    Arity {
        /// Entity being assembled.
        entity: String,
        /// Component tag.
        kind: String,
        /// Human readable description of the accepted counts.
        expected: &'static str,
        /// Number of values supplied.
        found: usize,
    },

    /// A value could not be parsed as a number or boolean.
    #[error("entity '{entity}': invalid {kind} value '{value}'")]
    InvalidValue {
        /// Entity being assembled.
        entity: String,
        /// Component tag.
        kind: String,
        /// Raw value that failed to parse.
        value: String,
    },

    /// The resource provider could not supply a named asset.
    #[error("missing resource '{0}'")]
    MissingResource(String),

    /// Assembled entities violated a registry invariant.
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

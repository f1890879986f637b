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
//! Grid pathfinding
//!
//! [`TraversabilityGrid`] rasterizes rigid obstacles onto the XZ plane and
//! [`compute_path`] runs an 8-connected A* search over it.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use scene_core::pathfinding::{compute_path, TraversabilityGrid, DEFAULT_BUDGET_FACTOR};
//!
//! let grid = TraversabilityGrid::new(20, 20);
//! let path = compute_path(&grid, Vec3::ZERO, Vec3::new(3.0, 0.0, 3.0), DEFAULT_BUDGET_FACTOR).unwrap();
//! assert_eq!(path.last(), Some(&Vec3::new(3.0, 0.0, 3.0)));
//! ```

mod astar;
mod grid;

pub use astar::{compute_path, world_cell, DEFAULT_BUDGET_FACTOR, NEIGHBOUR_OFFSETS};
pub use grid::TraversabilityGrid;

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
//! Traversability grid
//!
//! A walkable/blocked map laid over the XZ plane, one cell per world unit.
//! World `(x, z)` maps to `(row = z + height / 2, col = x + width / 2)`. The
//! grid is built once from the rigid obstacles present at construction and is
//! not updated if they move later.

use crate::ecs::{ComponentType, Entity};
use glam::{IVec2, Vec3};
use log::{debug, warn};

/// Walkable/blocked cells of a map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversabilityGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl TraversabilityGrid {
    /// Fully walkable grid of `width` (x) by `height` (z) cells
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "Map dimensions must be positive");
        TraversabilityGrid {
            width,
            height,
            cells: vec![true; width * height],
        }
    }

    /// Build a grid and block the footprint of every rigid collider
    ///
    /// Entities that are triggers, or that lack a transform or position, are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn from_obstacles<'a, I>(width: usize, height: usize, entities: I) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let mut grid = TraversabilityGrid::new(width, height);
        let mut obstacles = 0;

        for entity in entities {
            let Some(collider) = entity.collider() else {
                continue;
            };
            if !collider.is_collidable {
                continue;
            }
            match (entity.transform(), entity.position()) {
                (Some(transform), Some(position)) => {
                    grid.block_footprint(position.get(), transform.scale());
                    obstacles += 1;
                }
                _ => warn!(
                    "{} is a rigid collider without {} and {}, not an obstacle",
                    entity,
                    ComponentType::Transform,
                    ComponentType::Position
                ),
            }
        }

        debug!(
            "traversability grid {}x{}: {} obstacles, {} blocked cells",
            width,
            height,
            obstacles,
            grid.blocked_count()
        );
        grid
    }

    /// Number of cells along x
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along z
    pub fn height(&self) -> usize {
        self.height
    }

    /// Half the width in whole cells
    pub fn half_width(&self) -> i32 {
        (self.width / 2) as i32
    }

    /// Half the height in whole cells
    pub fn half_height(&self) -> i32 {
        (self.height / 2) as i32
    }

    /// Grid coordinates of a world cell, as `(col, row)`
    pub fn to_grid(&self, cell: IVec2) -> IVec2 {
        IVec2::new(cell.x + self.half_width(), cell.y + self.half_height())
    }

    /// Whether the cell at `(row, col)` is walkable; false outside the grid
    pub fn is_traversable(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Whether the world cell `(x, z)` is walkable; false outside the grid
    pub fn is_walkable(&self, cell: IVec2) -> bool {
        let grid = self.to_grid(cell);
        self.is_traversable(grid.y, grid.x)
    }

    /// Whether a search may step onto the world cell
    ///
    /// The last row and column are never entered.
    pub fn accepts_successor(&self, cell: IVec2) -> bool {
        let grid = self.to_grid(cell);
        if grid.x < 0 || grid.y < 0 {
            return false;
        }
        if grid.x >= self.width as i32 - 1 || grid.y >= self.height as i32 - 1 {
            return false;
        }
        self.is_traversable(grid.y, grid.x)
    }

    /// Number of blocked cells
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|walkable| !**walkable).count()
    }

    /// Mark a cell blocked; out-of-grid writes are ignored
    pub fn block(&mut self, row: i32, col: i32) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = false;
        }
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// Block the box `position ± scale` on the XZ plane
    ///
    /// Covered cells away from the border are inflated by one extra row and
    /// column on the positive side.
    fn block_footprint(&mut self, position: Vec3, scale: Vec3) {
        let start_x = position.x - scale.x;
        let start_z = position.z - scale.z;
        let x_offset = start_x as i32 + self.half_width();
        let z_offset = start_z as i32 + self.half_height();

        let width = self.width as i32;
        let height = self.height as i32;
        if x_offset >= width || z_offset > height || x_offset < 0 || z_offset < 0 {
            return;
        }

        let x_end = x_offset as f32 + scale.x * 2.0;
        let z_end = z_offset as f32 + scale.z * 2.0;

        let mut x = x_offset;
        while (x as f32) < x_end {
            let mut z = z_offset;
            while (z as f32) < z_end {
                if x > 0 && x < width - 1 && z > 0 && z < height - 1 {
                    self.block(z, x + 1);
                    self.block(z + 1, x);
                    self.block(z + 1, x + 1);
                }
                self.block(z, x);
                z += 1;
            }
            x += 1;
        }
    }
}

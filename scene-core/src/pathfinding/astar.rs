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
//! Grid A* search
//!
//! Nodes live in an arena and the open/closed lists hold arena indices. The
//! lists are scanned linearly; maps are small and the scan order fixes the
//! tie-breaking, so results are reproducible run to run.

use super::grid::TraversabilityGrid;
use crate::error::PathError;
use glam::{IVec2, Vec3};
use log::trace;

/// Successor offsets in the order they are generated
pub const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    IVec2::new(0, 1),
    IVec2::new(0, -1),
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(1, 1),
    IVec2::new(-1, -1),
    IVec2::new(1, -1),
];

/// Expansions allowed per grid cell before a search gives up
pub const DEFAULT_BUDGET_FACTOR: usize = 4;

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    parent: Option<usize>,
    cell: IVec2,
    g: f32,
    f: f32,
}

/// Nearest world cell to a point on the XZ plane
///
/// Halves round to even.
pub fn world_cell(point: Vec3) -> IVec2 {
    IVec2::new(point.x.round_ties_even() as i32, point.z.round_ties_even() as i32)
}

/// Find a path between two world points
///
/// Both points are snapped to their nearest cells. The returned waypoints
/// exclude the start cell and end on the target cell; they lie at `y = 0`.
/// A start equal to the target yields an empty path.
pub fn compute_path(
    grid: &TraversabilityGrid,
    start: Vec3,
    target: Vec3,
    budget_factor: usize,
) -> Result<Vec<Vec3>, PathError> {
    let start = world_cell(start);
    let goal = world_cell(target);

    let grid_goal = grid.to_grid(goal);
    if grid_goal.x < 0
        || grid_goal.y < 0
        || grid_goal.x >= grid.width() as i32
        || grid_goal.y >= grid.height() as i32
    {
        return Err(PathError::TargetOutOfBounds {
            x: goal.x,
            z: goal.y,
        });
    }
    if !grid.is_walkable(goal) {
        return Err(PathError::TargetBlocked {
            x: goal.x,
            z: goal.y,
        });
    }

    let budget = budget_factor * grid.width() * grid.height();
    let mut nodes = vec![SearchNode {
        parent: None,
        cell: start,
        g: 0.0,
        f: 0.0,
    }];
    let mut open: Vec<usize> = vec![0];
    let mut closed: Vec<usize> = Vec::new();
    let mut expansions = 0;

    while !open.is_empty() {
        let mut best = 0;
        for (slot, &index) in open.iter().enumerate().skip(1) {
            if nodes[index].f < nodes[open[best]].f {
                best = slot;
            }
        }
        let current = open.remove(best);
        closed.push(current);

        if nodes[current].cell == goal {
            trace!(
                "path {} -> {} found after {} expansions",
                start,
                goal,
                expansions
            );
            return Ok(backtrack(&nodes, current));
        }

        let parent = nodes[current];
        for offset in NEIGHBOUR_OFFSETS {
            let cell = parent.cell + offset;
            if !grid.accepts_successor(cell) {
                continue;
            }
            if closed.iter().any(|&i| nodes[i].cell == cell) {
                continue;
            }

            let g = parent.g + 1.0;
            let delta = (cell - goal).as_vec2();
            let h = delta.x * delta.x + delta.y * delta.y;

            if !improves_open(&nodes, &open, cell, g) {
                continue;
            }

            nodes.push(SearchNode {
                parent: Some(current),
                cell,
                g,
                f: g + h,
            });
            open.push(nodes.len() - 1);
        }

        expansions += 1;
        if expansions > budget {
            return Err(PathError::BudgetExhausted { budget });
        }
    }

    Err(PathError::Unreachable)
}

/// Whether a successor reaching `cell` at cost `g` should be queued
///
/// An open node for the same cell with a cost no larger wins; existing
/// nodes are never relaxed.
fn improves_open(nodes: &[SearchNode], open: &[usize], cell: IVec2, g: f32) -> bool {
    !open.iter().any(|&i| nodes[i].cell == cell && nodes[i].g <= g)
}

/// Walk parents back to the start, excluding the start itself
fn backtrack(nodes: &[SearchNode], goal: usize) -> Vec<Vec3> {
    let mut path = Vec::new();
    let mut cursor = goal;
    while let Some(parent) = nodes[cursor].parent {
        let cell = nodes[cursor].cell;
        path.push(Vec3::new(cell.x as f32, 0.0, cell.y as f32));
        cursor = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_step(a: Vec3, b: Vec3) -> bool {
        let d = (b - a).abs();
        d.x <= 1.0 && d.z <= 1.0 && (d.x + d.z) > 0.0
    }

    #[test]
    fn test_equal_cost_duplicate_is_discarded() {
        let cell = IVec2::new(2, 3);
        let nodes = [
            SearchNode {
                parent: None,
                cell: IVec2::ZERO,
                g: 0.0,
                f: 0.0,
            },
            SearchNode {
                parent: Some(0),
                cell,
                g: 2.0,
                f: 15.0,
            },
        ];
        let open = [1];

        assert!(!improves_open(&nodes, &open, cell, 2.0));
        assert!(!improves_open(&nodes, &open, cell, 3.0));
        assert!(improves_open(&nodes, &open, cell, 1.0));
        assert!(improves_open(&nodes, &open, IVec2::new(3, 3), 2.0));
        // Closed nodes are not consulted
        assert!(improves_open(&nodes, &[], cell, 2.0));
    }

    #[test]
    fn test_start_equals_target() {
        let grid = TraversabilityGrid::new(10, 10);
        let path = compute_path(&grid, Vec3::ZERO, Vec3::new(0.3, 0.0, -0.2), 4).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_diagonal_path() {
        let grid = TraversabilityGrid::new(20, 20);
        let path = compute_path(&grid, Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0), 4).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&Vec3::new(5.0, 0.0, 5.0)));
        let mut previous = Vec3::ZERO;
        for waypoint in &path {
            assert!(is_step(previous, *waypoint));
            previous = *waypoint;
        }
    }

    #[test]
    fn test_path_avoids_blocked_cells() {
        let mut grid = TraversabilityGrid::new(20, 20);
        // Wall along world x = 2 for z in -3..=3
        for z in -3..=3 {
            let cell = grid.to_grid(IVec2::new(2, z));
            grid.block(cell.y, cell.x);
        }
        let path = compute_path(&grid, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 4).unwrap();
        assert_eq!(path.last(), Some(&Vec3::new(4.0, 0.0, 0.0)));
        let mut previous = Vec3::ZERO;
        for waypoint in &path {
            assert!(grid.is_walkable(world_cell(*waypoint)));
            assert!(is_step(previous, *waypoint));
            previous = *waypoint;
        }
    }

    #[test]
    fn test_blocked_target() {
        let mut grid = TraversabilityGrid::new(10, 10);
        let cell = grid.to_grid(IVec2::new(3, 3));
        grid.block(cell.y, cell.x);
        let result = compute_path(&grid, Vec3::ZERO, Vec3::new(3.0, 0.0, 3.0), 4);
        assert_eq!(result, Err(PathError::TargetBlocked { x: 3, z: 3 }));
    }

    #[test]
    fn test_target_outside_grid() {
        let grid = TraversabilityGrid::new(10, 10);
        let result = compute_path(&grid, Vec3::ZERO, Vec3::new(8.0, 0.0, 0.0), 4);
        assert_eq!(result, Err(PathError::TargetOutOfBounds { x: 8, z: 0 }));
    }

    #[test]
    fn test_enclosed_target_is_unreachable() {
        let mut grid = TraversabilityGrid::new(12, 12);
        for x in 1..=5 {
            for z in 1..=5 {
                if x == 3 && z == 3 {
                    continue;
                }
                if x == 1 || x == 5 || z == 1 || z == 5 {
                    let cell = grid.to_grid(IVec2::new(x, z));
                    grid.block(cell.y, cell.x);
                }
            }
        }
        let result = compute_path(&grid, Vec3::new(-4.0, 0.0, -4.0), Vec3::new(3.0, 0.0, 3.0), 100);
        assert_eq!(result, Err(PathError::Unreachable));
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut grid = TraversabilityGrid::new(12, 12);
        for x in 1..=5 {
            for z in 1..=5 {
                if (x == 1 || x == 5 || z == 1 || z == 5) && !(x == 3 && z == 3) {
                    let cell = grid.to_grid(IVec2::new(x, z));
                    grid.block(cell.y, cell.x);
                }
            }
        }
        let result = compute_path(&grid, Vec3::new(-4.0, 0.0, -4.0), Vec3::new(3.0, 0.0, 3.0), 0);
        assert_eq!(result, Err(PathError::BudgetExhausted { budget: 0 }));
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut grid = TraversabilityGrid::new(20, 20);
        for z in -2..=4 {
            let cell = grid.to_grid(IVec2::new(1, z));
            grid.block(cell.y, cell.x);
        }
        let target = Vec3::new(6.0, 0.0, 2.0);
        let first = compute_path(&grid, Vec3::new(-3.0, 0.0, 1.0), target, 4).unwrap();
        for _ in 0..5 {
            let again = compute_path(&grid, Vec3::new(-3.0, 0.0, 1.0), target, 4).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_world_cell_rounds_half_to_even() {
        assert_eq!(world_cell(Vec3::new(0.5, 9.0, 1.5)), IVec2::new(0, 2));
        assert_eq!(world_cell(Vec3::new(-2.5, 0.0, 2.49)), IVec2::new(-2, 2));
    }
}

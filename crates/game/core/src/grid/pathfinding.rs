//! Breadth-first movement queries.
//!
//! Both the reachable-tile flood fill and the shortest-path search walk the
//! 8-connected grid with uniform step cost and share one stepping rule:
//! a diagonal step is legal only when both orthogonal tiles it cuts past are
//! passable (occupants ignored). That keeps units from squeezing between two
//! blocking corners even when the diagonal cell itself is open.

use std::collections::VecDeque;

use super::Grid;
use crate::state::{Direction, Position};

/// A tile reachable from some origin, with its step cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachableTile {
    pub position: Position,
    pub cost: u32,
}

impl Grid {
    /// Whether the corner rule allows stepping from `from` in `direction`.
    fn corner_clear(&self, from: Position, direction: Direction) -> bool {
        if !direction.is_diagonal() {
            return true;
        }
        let (horizontal, vertical) = direction.components();
        [horizontal, vertical]
            .into_iter()
            .flatten()
            .all(|side| self.is_walkable_ignoring_occupant(from.step(side)))
    }

    /// Flood fill of every tile reachable within `move_points` steps.
    ///
    /// The origin is included at cost 0. Intermediate and destination tiles
    /// must be unoccupied. Results are in discovery order, which callers use
    /// as a stable enumeration order.
    pub fn movement_range(&self, origin: Position, move_points: u32) -> Vec<ReachableTile> {
        let Some(origin_index) = self.index(origin) else {
            return Vec::new();
        };

        let mut costs: Vec<Option<u32>> = vec![None; self.tiles.len()];
        costs[origin_index] = Some(0);

        let mut reachable = vec![ReachableTile {
            position: origin,
            cost: 0,
        }];
        let mut queue = VecDeque::from([(origin, 0u32)]);

        while let Some((current, cost)) = queue.pop_front() {
            if cost >= move_points {
                continue;
            }
            let next_cost = cost + 1;

            for direction in Direction::NEIGHBOR_ORDER {
                let neighbor = current.step(direction);
                let Some(index) = self.index(neighbor) else {
                    continue;
                };
                if costs[index].is_some() {
                    continue;
                }
                if !self.is_walkable(neighbor) || !self.corner_clear(current, direction) {
                    continue;
                }

                costs[index] = Some(next_cost);
                reachable.push(ReachableTile {
                    position: neighbor,
                    cost: next_cost,
                });
                queue.push_back((neighbor, next_cost));
            }
        }

        reachable
    }

    /// Shortest path from `start` to `end`, excluding `start` and including
    /// `end`.
    ///
    /// - `start == end` yields an empty path (already there).
    /// - A destination that fails its walkability test yields `None`; with
    ///   `allow_occupied_destination` the test ignores occupants, which lets
    ///   callers path up to another unit.
    /// - Among equally short paths the first one discovered wins.
    pub fn find_path(
        &self,
        start: Position,
        end: Position,
        allow_occupied_destination: bool,
    ) -> Option<Vec<Position>> {
        if start == end {
            return Some(Vec::new());
        }

        let destination_ok = if allow_occupied_destination {
            self.is_walkable_ignoring_occupant(end)
        } else {
            self.is_walkable(end)
        };
        if !destination_ok {
            return None;
        }

        let start_index = self.index(start)?;
        let mut parents: Vec<Option<Position>> = vec![None; self.tiles.len()];
        let mut visited = vec![false; self.tiles.len()];
        visited[start_index] = true;

        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for direction in Direction::NEIGHBOR_ORDER {
                let neighbor = current.step(direction);
                let Some(index) = self.index(neighbor) else {
                    continue;
                };
                if visited[index] {
                    continue;
                }
                let passable = neighbor == end || self.is_walkable(neighbor);
                if !passable || !self.corner_clear(current, direction) {
                    continue;
                }

                visited[index] = true;
                parents[index] = Some(current);

                if neighbor == end {
                    return Some(self.unwind(&parents, start, end));
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    fn unwind(&self, parents: &[Option<Position>], start: Position, end: Position) -> Vec<Position> {
        let mut path = vec![end];
        let mut cursor = end;
        while let Some(parent) = self.index(cursor).and_then(|index| parents[index]) {
            if parent == start {
                break;
            }
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }
}

//! Deciding where a unit moves on its turn.
//!
//! A unit that isn't already next to an enemy heads for the nearest square
//! from which it could attack one. Distances are path lengths through vacant
//! squares; units block movement, including the moving unit's allies. Ties
//! are broken by reading order twice: first among the nearest attack squares,
//! to pick a destination, and then among the unit's neighbors that begin a
//! shortest path there, to pick the step it actually takes.

use std::collections::HashSet;

use crate::bfs::layers;
use crate::grid::{Grid, Point};
use crate::unit::Side;

/// A unit's decision to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Plan {
    /// The square in range of an enemy that the unit is heading for.
    pub destination: Point,

    /// The square the unit steps into this turn.
    pub step: Point,

    /// The length of the shortest path from the unit to `destination`.
    pub distance: usize,
}

/// Plan the move of the unit at `from`, which is fighting `enemy`.
///
/// Return `None` if the unit should stay put: either it is already next to an
/// enemy, or no square next to an enemy is reachable.
pub fn plan_move(grid: &Grid, from: Point, enemy: Side) -> Option<Plan> {
    if grid.is_enemy_adjacent(from, enemy) {
        return None;
    }

    let goals = grid
        .positions_of(enemy)
        .flat_map(|e| grid.adjacent_open(e))
        .collect::<HashSet<Point>>();
    if goals.is_empty() {
        return None;
    }

    // Stop at the first layer containing any goal; among those, the earliest
    // in reading order wins.
    let (distance, destination) = layers(from, |&p| grid.adjacent_open(p))
        .zip(1..)
        .filter_map(|(layer, distance)| {
            layer
                .into_iter()
                .filter(|p| goals.contains(p))
                .min()
                .map(|destination| (distance, destination))
        })
        .next()?;

    Some(Plan {
        destination,
        step: first_step(grid, from, destination, distance),
        distance,
    })
}

/// Among `from`'s vacant neighbors that lie on a shortest path to
/// `destination`, `distance` steps away, return the first in reading order.
fn first_step(grid: &Grid, from: Point, destination: Point, distance: usize) -> Point {
    if distance == 1 {
        return destination;
    }

    // Work backwards from the destination: the squares `distance - 1` steps
    // away from it are the candidates.
    let candidates = layers(destination, |&p| grid.adjacent_open(p))
        .nth(distance - 2)
        .expect("destination is reachable, so the unit's neighbors are reachable from it")
        .into_iter()
        .collect::<HashSet<Point>>();

    grid.adjacent_open(from)
        .filter(|p| candidates.contains(p))
        .min()
        .expect("some neighbor of the unit must begin a shortest path to its destination")
}

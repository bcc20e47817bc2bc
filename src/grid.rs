//! The cave floor, and who is standing where on it.

use ndarray::{Array2, Axis};

use crate::unit::{Side, UnitId};

/// A `(row, column)` position on the map.
///
/// Tuples compare lexicographically, so the derived ordering on `Point` is
/// exactly reading order: top to bottom, then left to right. Every tie in the
/// battle rules is broken by comparing `Point`s.
pub type Point = (usize, usize);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
        }
    }
}

/// The unit standing on a square, as far as the map knows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Occupant {
    pub id: UnitId,
    pub side: Side,
}

/// The cave's walls and floor, plus an occupancy layer recording which unit,
/// if any, stands on each square.
///
/// The terrain never changes once the grid is built. The occupancy layer is
/// only changed through `place`, `vacate` and `relocate`, which refuse to put
/// a unit on a wall or on top of another unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    terrain: Array2<Cell>,
    occupants: Array2<Option<Occupant>>,
}

impl Grid {
    /// Build an unoccupied grid on `terrain`.
    pub fn new(terrain: Array2<Cell>) -> Grid {
        let occupants = Array2::from_elem(terrain.dim(), None);
        Grid { terrain, occupants }
    }

    pub fn height(&self) -> usize {
        self.terrain.len_of(Axis(0))
    }

    pub fn width(&self) -> usize {
        self.terrain.len_of(Axis(1))
    }

    pub fn terrain(&self) -> &Array2<Cell> {
        &self.terrain
    }

    pub fn cell(&self, p: Point) -> Cell {
        self.terrain[p]
    }

    pub fn occupant(&self, p: Point) -> Option<Occupant> {
        self.occupants[p]
    }

    /// True if `p` is open floor with nobody standing on it.
    pub fn is_vacant(&self, p: Point) -> bool {
        self.terrain[p] == Cell::Open && self.occupants[p].is_none()
    }

    /// The orthogonal neighbors of `p` that lie within the map, in reading
    /// order: up, left, right, down.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + Clone {
        let (row, col) = p;
        let up = if row > 0 { Some((row - 1, col)) } else { None };
        let left = if col > 0 { Some((row, col - 1)) } else { None };
        let right = if col + 1 < self.width() { Some((row, col + 1)) } else { None };
        let down = if row + 1 < self.height() { Some((row + 1, col)) } else { None };
        up.into_iter().chain(left).chain(right).chain(down)
    }

    /// The neighbors of `p` that a unit could step into right now.
    pub fn adjacent_open<'a>(&'a self, p: Point) -> impl Iterator<Item = Point> + 'a {
        self.neighbors(p).filter(move |&n| self.is_vacant(n))
    }

    /// True if a living unit of side `enemy` stands next to `p`.
    pub fn is_enemy_adjacent(&self, p: Point, enemy: Side) -> bool {
        self.neighbors(p).any(|n| match self.occupants[n] {
            Some(occupant) => occupant.side == enemy,
            None => false,
        })
    }

    /// The positions of all units of side `side`, in reading order.
    pub fn positions_of<'a>(&'a self, side: Side) -> impl Iterator<Item = Point> + 'a {
        self.occupants
            .indexed_iter()
            .filter_map(move |(p, occupant)| match occupant {
                Some(o) if o.side == side => Some(p),
                _ => None,
            })
    }

    pub(crate) fn place(&mut self, p: Point, occupant: Occupant) {
        assert_eq!(self.terrain[p], Cell::Open, "unit placed in a wall at {:?}", p);
        if let Some(other) = self.occupants[p] {
            panic!("{:?} and {:?} both standing on {:?}", other.id, occupant.id, p);
        }
        self.occupants[p] = Some(occupant);
    }

    pub(crate) fn vacate(&mut self, p: Point) -> Occupant {
        match self.occupants[p].take() {
            Some(occupant) => occupant,
            None => panic!("nobody to remove from {:?}", p),
        }
    }

    pub(crate) fn relocate(&mut self, from: Point, to: Point) -> Occupant {
        let occupant = self.vacate(from);
        self.place(to, occupant);
        occupant
    }
}

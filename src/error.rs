use failure::Fail;

use crate::grid::Point;
use crate::unit::Side;

/// Problems with a map handed to `Scenario::from_str`.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum ParseError {
    #[fail(display = "map is empty")]
    Empty,

    #[fail(display = "row {} is {} squares wide, but the map is {} wide", row, width, expected)]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[fail(display = "bad map character {:?} at {:?}", ch, point)]
    BadCharacter { ch: char, point: Point },

    #[fail(display = "there are no {} on the map", _0)]
    MissingSide(Side),

    #[fail(display = "bad hit point annotation on row {}: {}", row, reason)]
    BadAnnotation { row: usize, reason: String },

    #[fail(display = "unit at {:?} can't have {} hit points", point, hit_points)]
    HitPointsOutOfRange { point: Point, hit_points: usize },
}

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum BattleError {
    /// A whole round passed in which nobody moved or attacked. Nothing will
    /// ever change again, so the battle can't finish.
    #[fail(display = "stalemate: nobody can reach an enemy (after {} rounds)", rounds)]
    Stalemate { rounds: usize },

    #[fail(display = "elves can't win without losses, even with attack power {}", max_power)]
    NoCleanVictory { max_power: usize },
}

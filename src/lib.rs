//! Simulate the cave battle between elves and goblins.
//!
//! A `Scenario` is a map of walls, open floor and units. A `Battle` built
//! from it runs in rounds: each living unit, in reading order, moves one
//! square toward the nearest enemy it can reach (unless it is already next to
//! one) and then hits the weakest enemy beside it. The battle ends when a unit
//! finds no enemies left on its turn.
//!
//! `run_battle` fights one battle and reports the `Winner`;
//! `find_minimal_elf_power` finds the weakest elves that win without losing
//! anyone.

pub mod battle;
pub mod bfs;
pub mod error;
pub mod grid;
pub mod path;
pub mod rules;
pub mod scenario;
pub mod search;
pub mod unit;

pub use crate::battle::{run_battle, Battle, Round, State, Winner};
pub use crate::error::{BattleError, ParseError};
pub use crate::grid::{Cell, Grid, Point};
pub use crate::rules::Rules;
pub use crate::scenario::{Placement, Scenario};
pub use crate::search::find_minimal_elf_power;
pub use crate::unit::{Side, UnitId, FULL_HIT_POINTS};

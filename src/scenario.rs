//! Battle maps in the puzzle's notation.
//!
//! A map is a rectangle of `#` (wall), `.` (open floor), `E` (an elf) and `G`
//! (a goblin). Any row may be followed by whitespace and the hit points of
//! that row's units, left to right:
//!
//! ```text
//! #######
//! #..GEG#   G(197), E(194), G(200)
//! #######
//! ```
//!
//! Units without an annotation have full hit points. `Display` writes the
//! same notation, so battle states can be written down in tests and compared.

use itertools::Itertools;
use ndarray::{Array2, Axis};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::grid::{Cell, Point};
use crate::unit::{Side, FULL_HIT_POINTS};

/// A unit's starting position and condition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Placement {
    pub side: Side,
    pub position: Point,
    pub hit_points: usize,
}

/// A cave and the units in it, ready to fight.
///
/// `units` is always in reading order of position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scenario {
    terrain: Array2<Cell>,
    units: Vec<Placement>,
}

impl Scenario {
    pub(crate) fn from_parts(terrain: Array2<Cell>, mut units: Vec<Placement>) -> Scenario {
        units.sort_by_key(|u| u.position);
        Scenario { terrain, units }
    }

    /// Parse a map that may show only one side, like the end of a battle.
    ///
    /// `from_str` insists on both sides being present; this doesn't.
    pub fn parse_state(s: &str) -> Result<Scenario, ParseError> {
        fn map_and_hp(line: &str) -> (&str, &str) {
            let line = line.trim();
            match line.find(char::is_whitespace) {
                Some(map_end) => (&line[..map_end], line[map_end..].trim()),
                None => (line, ""),
            }
        }

        let rows = s
            .lines()
            .map(map_and_hp)
            .filter(|(map, _)| !map.is_empty())
            .collect::<Vec<_>>();
        let width = match rows.first() {
            Some((map, _)) => map.chars().count(),
            None => return Err(ParseError::Empty),
        };

        let mut terrain = Array2::from_elem((rows.len(), width), Cell::Wall);
        let mut units = Vec::new();
        for (row, &(line, hps)) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::Ragged {
                    row,
                    width: found,
                    expected: width,
                });
            }

            let row_start = units.len();
            for (col, ch) in line.chars().enumerate() {
                let point = (row, col);
                terrain[point] = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Open,
                    _ => match Side::from_symbol(ch) {
                        Some(side) => {
                            units.push(Placement {
                                side,
                                position: point,
                                hit_points: FULL_HIT_POINTS,
                            });
                            Cell::Open
                        }
                        None => return Err(ParseError::BadCharacter { ch, point }),
                    },
                };
            }
            annotate(row, hps, &mut units[row_start..])?;
        }

        Ok(Scenario { terrain, units })
    }

    pub fn terrain(&self) -> &Array2<Cell> {
        &self.terrain
    }

    pub fn units(&self) -> &[Placement] {
        &self.units
    }

    pub fn height(&self) -> usize {
        self.terrain.len_of(Axis(0))
    }

    pub fn width(&self) -> usize {
        self.terrain.len_of(Axis(1))
    }
}

/// Apply the hit point annotations `hps` to `units`, the units on row `row`.
fn annotate(row: usize, hps: &str, units: &mut [Placement]) -> Result<(), ParseError> {
    if hps.is_empty() {
        return Ok(());
    }
    let bad = |reason: String| ParseError::BadAnnotation { row, reason };

    let mut units = units.iter_mut();
    for hp in hps.split(',').map(str::trim) {
        let mut cursor = hp.chars();
        let side = match cursor.next().and_then(Side::from_symbol) {
            Some(side) => side,
            None => return Err(bad(format!("expected 'E' or 'G' to begin {:?}", hp))),
        };
        let tail = cursor.as_str();
        if !tail.starts_with('(') || !tail.ends_with(')') {
            return Err(bad(format!("expected hit points in parentheses in {:?}", hp)));
        }
        let hit_points = usize::from_str(&tail[1..tail.len() - 1])
            .map_err(|e| bad(format!("{:?}: {}", hp, e)))?;

        let unit = match units.next() {
            Some(unit) => unit,
            None => return Err(bad("more annotations than units".to_string())),
        };
        if unit.side != side {
            return Err(bad(format!("{:?} doesn't match the unit at {:?}", hp, unit.position)));
        }
        if hit_points == 0 || hit_points > FULL_HIT_POINTS {
            return Err(ParseError::HitPointsOutOfRange {
                point: unit.position,
                hit_points,
            });
        }
        unit.hit_points = hit_points;
    }
    Ok(())
}

impl FromStr for Scenario {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Scenario, ParseError> {
        let scenario = Scenario::parse_state(s)?;
        for &side in &[Side::Elf, Side::Goblin] {
            if !scenario.units.iter().any(|u| u.side == side) {
                return Err(ParseError::MissingSide(side));
            }
        }
        Ok(scenario)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut units = self.units.iter().peekable();
        for row in 0..self.height() {
            let mut hps = Vec::new();
            for col in 0..self.width() {
                match units.peek() {
                    Some(unit) if unit.position == (row, col) => {
                        write!(f, "{}", unit.side.symbol())?;
                        hps.push(format!("{}({})", unit.side.symbol(), unit.hit_points));
                        units.next();
                    }
                    _ => write!(f, "{}", self.terrain[[row, col]].symbol())?,
                }
            }
            if !hps.is_empty() {
                write!(f, "   {}", hps.iter().join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(map: &str) -> Result<Scenario, ParseError> {
        map.parse::<Scenario>()
    }

    #[test]
    fn parse_map() {
        let scenario = parse("
            #######
            #.G.E.#
            #E..#G#
            #######").expect("parse test map");
        assert_eq!((scenario.height(), scenario.width()), (4, 7));
        assert_eq!(scenario.terrain()[(0, 0)], Cell::Wall);
        assert_eq!(scenario.terrain()[(1, 2)], Cell::Open);
        assert_eq!(scenario.terrain()[(2, 4)], Cell::Wall);
        assert_eq!(scenario.units().iter().map(|u| (u.side, u.position)).collect::<Vec<_>>(),
                   vec![(Side::Goblin, (1, 2)),
                        (Side::Elf, (1, 4)),
                        (Side::Elf, (2, 1)),
                        (Side::Goblin, (2, 5))]);
        assert!(scenario.units().iter().all(|u| u.hit_points == FULL_HIT_POINTS));
    }

    #[test]
    fn parse_hit_points() {
        let scenario = parse("
            #######
            #..GEG#   G(197), E(94), G(200)
            #.E...#
            #######   ").expect("parse test map");
        assert_eq!(scenario.units().iter().map(|u| u.hit_points).collect::<Vec<_>>(),
                   vec![197, 94, 200, 200]);
    }

    #[test]
    fn display() {
        let text = "\
            #######\n\
            #..GEG#   G(197), E(94), G(200)\n\
            #.E...#   E(200)\n\
            #######\n";
        assert_eq!(parse(text).expect("parse test map").to_string(), text);
    }

    #[test]
    fn malformed() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("\n   \n"), Err(ParseError::Empty));
        assert_eq!(parse("#####\n#E.G#\n####"),
                   Err(ParseError::Ragged { row: 2, width: 4, expected: 5 }));
        assert_eq!(parse("#####\n#E?G#\n#####"),
                   Err(ParseError::BadCharacter { ch: '?', point: (1, 2) }));
        assert_eq!(parse("#####\n#E.E#\n#####"),
                   Err(ParseError::MissingSide(Side::Goblin)));
        assert_eq!(parse("#####\n#G..#\n#####"),
                   Err(ParseError::MissingSide(Side::Elf)));
        assert_eq!(parse("#####\n#E.G#   E(10), G(201)\n#####"),
                   Err(ParseError::HitPointsOutOfRange { point: (1, 3), hit_points: 201 }));
        assert_eq!(parse("#####\n#E.G#   E(0)\n#####"),
                   Err(ParseError::HitPointsOutOfRange { point: (1, 1), hit_points: 0 }));

        for bad in &["#E.G#   G(10)",
                     "#E.G#   E(10), G(10), E(10)",
                     "#E.G#   E10",
                     "#E.G#   E(ten)",
                     "#E.G#   X(10)"] {
            match parse(bad) {
                Err(ParseError::BadAnnotation { row: 0, .. }) => (),
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn finished_battles_parse_as_states() {
        let state = Scenario::parse_state("
            #####
            #E.E#   E(3), E(200)
            #####").expect("parse battle state");
        assert_eq!(state.units().len(), 2);
    }
}

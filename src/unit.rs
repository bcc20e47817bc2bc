//! The combatants, and the sides they fight for.

use std::fmt;

use crate::grid::Point;

/// Every unit starts the battle with this many hit points, and never has more.
pub const FULL_HIT_POINTS: usize = 200;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Elf,
    Goblin,
}

impl Side {
    pub fn enemy(self) -> Side {
        match self {
            Side::Elf => Side::Goblin,
            Side::Goblin => Side::Elf,
        }
    }

    /// The map character for a unit of this side.
    pub fn symbol(self) -> char {
        match self {
            Side::Elf => 'E',
            Side::Goblin => 'G',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Side> {
        match ch {
            'E' => Some(Side::Elf),
            'G' => Some(Side::Goblin),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Side::Elf => "elves",
            Side::Goblin => "goblins",
        })
    }
}

/// The index of a unit in its battle's roster.
///
/// Ids are handed out once, when the battle is set up, and dead units keep
/// theirs, so an id names the same unit for the whole battle.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UnitId(pub usize);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unit {
    side: Side,
    position: Point,
    hit_points: usize,
    attack_power: usize,
}

impl Unit {
    pub fn new(side: Side, position: Point, hit_points: usize, attack_power: usize) -> Unit {
        assert!(hit_points <= FULL_HIT_POINTS);
        Unit {
            side,
            position,
            hit_points,
            attack_power,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn hit_points(&self) -> usize {
        self.hit_points
    }

    pub fn attack_power(&self) -> usize {
        self.attack_power
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    pub(crate) fn move_to(&mut self, position: Point) {
        assert!(self.is_alive(), "dead unit moving to {:?}", position);
        self.position = position;
    }

    /// Take `damage` hit points away from this unit. Return true if that
    /// killed it.
    pub(crate) fn suffer(&mut self, damage: usize) -> bool {
        assert!(self.is_alive(), "attacking a dead unit at {:?}", self.position);
        self.hit_points = self.hit_points.saturating_sub(damage);
        !self.is_alive()
    }
}

/// How many units each side has lost.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Casualties {
    pub elves: usize,
    pub goblins: usize,
}

impl Casualties {
    pub fn of(&self, side: Side) -> usize {
        match side {
            Side::Elf => self.elves,
            Side::Goblin => self.goblins,
        }
    }

    pub fn record(&mut self, side: Side) {
        match side {
            Side::Elf => self.elves += 1,
            Side::Goblin => self.goblins += 1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sides() {
        assert_eq!(Side::Elf.enemy(), Side::Goblin);
        assert_eq!(Side::Goblin.enemy(), Side::Elf);
        for &side in &[Side::Elf, Side::Goblin] {
            assert_eq!(Side::from_symbol(side.symbol()), Some(side));
        }
        assert_eq!(Side::from_symbol('#'), None);
    }

    #[test]
    fn suffering() {
        let mut unit = Unit::new(Side::Goblin, (1, 1), 7, 3);
        assert!(!unit.suffer(3));
        assert_eq!(unit.hit_points(), 4);
        assert!(!unit.suffer(3));
        assert!(unit.suffer(3));
        assert_eq!(unit.hit_points(), 0);
        assert!(!unit.is_alive());
    }

    #[test]
    #[should_panic(expected = "attacking a dead unit")]
    fn no_flogging_dead_goblins() {
        let mut unit = Unit::new(Side::Goblin, (1, 1), 3, 3);
        assert!(unit.suffer(3));
        unit.suffer(3);
    }

    #[test]
    fn casualties() {
        let mut casualties = Casualties::default();
        casualties.record(Side::Goblin);
        casualties.record(Side::Goblin);
        casualties.record(Side::Elf);
        assert_eq!(casualties.of(Side::Goblin), 2);
        assert_eq!(casualties.of(Side::Elf), 1);
        assert_eq!(casualties, Casualties { elves: 1, goblins: 2 });
    }
}

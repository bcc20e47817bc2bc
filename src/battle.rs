//! Rounds, turns, and the end of the battle.

use std::fmt;
use tracing::{debug, info, trace};

use crate::error::BattleError;
use crate::grid::{Grid, Occupant, Point};
use crate::path::plan_move;
use crate::rules::Rules;
use crate::scenario::{Placement, Scenario};
use crate::unit::{Casualties, Side, Unit, UnitId};

/// Whether the battle is still going on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Running,
    Finished(Side),
}

/// What happened during a call to `Battle::round`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Round {
    /// Every unit took its turn, and at least one of them moved or attacked.
    Complete,

    /// Every unit took its turn, but none of them could do anything.
    Quiet,

    /// Some unit found no enemies left when its turn came. This round doesn't
    /// count as completed.
    Finished(Side),
}

enum Turn {
    Dead,
    Idle,
    Acted,
    Victory(Side),
}

/// The outcome of a finished battle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Winner {
    pub side: Side,

    /// The number of rounds completed before the one in which the battle
    /// ended.
    pub rounds_completed: usize,

    /// The total hit points of all surviving units.
    pub remaining_hit_points: usize,

    pub elf_attack_power: usize,
    pub elves_lost: usize,
    pub goblins_lost: usize,
}

impl Winner {
    pub fn score(&self) -> usize {
        self.rounds_completed * self.remaining_hit_points
    }

    /// True if the elves won without losing anybody.
    pub fn is_clean_elf_victory(&self) -> bool {
        self.side == Side::Elf && self.elves_lost == 0
    }
}

/// A battle in progress.
///
/// The units live in a roster indexed by `UnitId`; the grid records which
/// unit stands on each square. Every move and death updates both together.
pub struct Battle {
    grid: Grid,
    units: Vec<Unit>,
    rules: Rules,
    rounds: usize,
    casualties: Casualties,
    state: State,
}

impl Battle {
    /// Set up a fresh battle on a copy of `scenario`.
    pub fn new(scenario: &Scenario, rules: Rules) -> Battle {
        let mut grid = Grid::new(scenario.terrain().clone());
        let mut units = Vec::with_capacity(scenario.units().len());
        for (index, placement) in scenario.units().iter().enumerate() {
            let Placement { side, position, hit_points } = *placement;
            grid.place(position, Occupant { id: UnitId(index), side });
            units.push(Unit::new(side, position, hit_points, rules.attack_power_of(side)));
        }

        Battle {
            grid,
            units,
            rules,
            rounds: 0,
            casualties: Casualties::default(),
            state: State::Running,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// The number of full rounds completed so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn casualties(&self) -> Casualties {
        self.casualties
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Run the battle to its end.
    ///
    /// If a round passes in which no unit moves or attacks, the battle is
    /// stuck: nothing has changed, so the next round will go the same way.
    /// Report that as `BattleError::Stalemate`.
    pub fn fight(&mut self) -> Result<Winner, BattleError> {
        loop {
            match self.round() {
                Round::Complete => (),
                Round::Quiet => {
                    debug!(rounds = self.rounds, "stalemate");
                    return Err(BattleError::Stalemate { rounds: self.rounds });
                }
                Round::Finished(_) => {
                    let winner = self.winner().expect("finished battle has a winner");
                    info!(side = ?winner.side,
                          rounds = winner.rounds_completed,
                          hit_points = winner.remaining_hit_points,
                          score = winner.score(),
                          elves_lost = winner.elves_lost,
                          goblins_lost = winner.goblins_lost,
                          "battle over");
                    return Ok(winner);
                }
            }
        }
    }

    /// Run one round of combat: every living unit takes a turn, in reading
    /// order of where they stand when the round begins.
    pub fn round(&mut self) -> Round {
        if let State::Finished(side) = self.state {
            return Round::Finished(side);
        }

        let mut order = (0..self.units.len())
            .map(UnitId)
            .filter(|&id| self.units[id.0].is_alive())
            .collect::<Vec<_>>();
        order.sort_by_key(|&id| self.units[id.0].position());

        let mut eventful = false;
        for id in order {
            // The unit might have been killed since we gathered the order.
            match self.turn(id) {
                Turn::Dead | Turn::Idle => (),
                Turn::Acted => eventful = true,
                Turn::Victory(side) => {
                    self.state = State::Finished(side);
                    debug!(rounds = self.rounds, %side, "no enemies left");
                    trace!("final map:\n{}", self);
                    return Round::Finished(side);
                }
            }
        }

        self.rounds += 1;
        debug!(round = self.rounds, eventful, "round complete");
        trace!("after {} rounds:\n{}", self.rounds, self);
        if eventful {
            Round::Complete
        } else {
            Round::Quiet
        }
    }

    /// Let the unit `id` take its turn: move if it should, then attack if it
    /// can.
    fn turn(&mut self, id: UnitId) -> Turn {
        let (side, from) = {
            let unit = &self.units[id.0];
            if !unit.is_alive() {
                return Turn::Dead;
            }
            (unit.side(), unit.position())
        };

        let enemy = side.enemy();
        if !self.units.iter().any(|u| u.is_alive() && u.side() == enemy) {
            return Turn::Victory(side);
        }

        let mut acted = false;
        if let Some(plan) = plan_move(&self.grid, from, enemy) {
            trace!(unit = id.0, %side, ?from, to = ?plan.step, destination = ?plan.destination,
                   "moves");
            self.move_unit(id, plan.step);
            acted = true;
        }
        if self.attack(id) {
            acted = true;
        }

        if acted {
            Turn::Acted
        } else {
            Turn::Idle
        }
    }

    fn move_unit(&mut self, id: UnitId, to: Point) {
        let unit = &mut self.units[id.0];
        let moved = self.grid.relocate(unit.position(), to);
        assert_eq!(moved.id, id, "map and roster disagree about {:?}", unit.position());
        unit.move_to(to);
    }

    /// Have the unit `id` attack the weakest enemy next to it, if any. Among
    /// equally weak enemies, attack the first in reading order. Return true if
    /// there was anyone to attack.
    fn attack(&mut self, id: UnitId) -> bool {
        let (enemy, position, power) = {
            let unit = &self.units[id.0];
            (unit.side().enemy(), unit.position(), unit.attack_power())
        };

        let units = &self.units;
        let target = self
            .grid
            .neighbors(position)
            .filter_map(|n| self.grid.occupant(n))
            .filter(|occupant| occupant.side == enemy)
            .map(|occupant| occupant.id)
            .min_by_key(|target| {
                let target = &units[target.0];
                (target.hit_points(), target.position())
            });
        let target = match target {
            Some(target) => target,
            None => return false,
        };

        let victim = &mut self.units[target.0];
        let killed = victim.suffer(power);
        trace!(unit = id.0, target = target.0, at = ?victim.position(), damage = power,
               hit_points = victim.hit_points(), "attacks");
        if killed {
            let at = victim.position();
            let side = victim.side();
            let removed = self.grid.vacate(at);
            assert_eq!(removed.id, target, "map and roster disagree about {:?}", at);
            self.casualties.record(side);
            debug!(unit = target.0, %side, ?at, round = self.rounds + 1, "dies");
        }
        true
    }

    /// The battle's outcome, if it has finished.
    pub fn winner(&self) -> Option<Winner> {
        let side = match self.state {
            State::Finished(side) => side,
            State::Running => return None,
        };
        Some(Winner {
            side,
            rounds_completed: self.rounds,
            remaining_hit_points: self.survivors().map(Unit::hit_points).sum(),
            elf_attack_power: self.rules.elf_attack_power,
            elves_lost: self.casualties.elves,
            goblins_lost: self.casualties.goblins,
        })
    }

    fn survivors(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    /// The battle as it stands, as a scenario from which a new battle could
    /// be started.
    pub fn snapshot(&self) -> Scenario {
        let units = self
            .survivors()
            .map(|u| Placement {
                side: u.side(),
                position: u.position(),
                hit_points: u.hit_points(),
            })
            .collect();
        Scenario::from_parts(self.grid.terrain().clone(), units)
    }
}

impl fmt::Display for Battle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Battle after {} rounds ({:?}):\n{}", self.rounds, self.state, self)
    }
}

/// Fight a fresh battle on `scenario`, with elves hitting at
/// `elf_attack_power`, and report who won.
pub fn run_battle(scenario: &Scenario, elf_attack_power: usize) -> Result<Winner, BattleError> {
    Battle::new(scenario, Rules::with_elf_attack_power(elf_attack_power)).fight()
}

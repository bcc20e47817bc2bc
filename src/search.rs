//! Finding how hard the elves must hit to win without losses.

use tracing::info;

use crate::battle::{run_battle, Winner};
use crate::error::BattleError;
use crate::rules::Rules;
use crate::scenario::Scenario;
use crate::unit::FULL_HIT_POINTS;

/// Find the smallest elf attack power greater than the default with which
/// the elves win on `scenario` without losing a single elf, and return that
/// battle's outcome.
///
/// Powers are tried in increasing order, each in a fresh battle. Once the
/// elves' power reaches `FULL_HIT_POINTS`, every goblin dies to a single blow,
/// and hitting any harder can't change how the battle goes; if the elves
/// haven't won cleanly by then, they never will.
pub fn find_minimal_elf_power(scenario: &Scenario) -> Result<Winner, BattleError> {
    let max_power = FULL_HIT_POINTS;
    (Rules::DEFAULT_ATTACK_POWER + 1..=max_power)
        .filter_map(|power| clean_victory_at(scenario, power))
        .next()
        .ok_or(BattleError::NoCleanVictory { max_power })
}

/// Fight a fresh battle on `scenario` with elves hitting at `power`. Return
/// the outcome if the elves won without losses.
pub fn clean_victory_at(scenario: &Scenario, power: usize) -> Option<Winner> {
    match run_battle(scenario, power) {
        Ok(winner) => {
            info!(power, side = ?winner.side, elves_lost = winner.elves_lost,
                  score = winner.score(), "tried elf attack power");
            if winner.is_clean_elf_victory() {
                Some(winner)
            } else {
                None
            }
        }
        Err(error) => {
            info!(power, %error, "tried elf attack power");
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::unit::Side;

    fn scenario(map: &str) -> Scenario {
        map.parse().expect("parse test map")
    }

    #[test]
    fn doomed_elf() {
        // The goblin strikes first, and one blow kills the elf, however hard
        // the elf could have hit back.
        let scenario = scenario("
            #####
            #GE.#   G(200), E(3)
            #####");
        assert_eq!(find_minimal_elf_power(&scenario),
                   Err(BattleError::NoCleanVictory { max_power: FULL_HIT_POINTS }));
    }

    #[test]
    fn first_clean_power() {
        // The elf strikes first. It survives the goblin's first blow but not
        // its second, so it must kill the goblin within two blows.
        let scenario = scenario("
            #####
            #EG.#   E(4), G(10)
            #####");
        let winner = find_minimal_elf_power(&scenario).expect("elves can win");
        assert_eq!(winner, Winner {
            side: Side::Elf,
            rounds_completed: 2,
            remaining_hit_points: 1,
            elf_attack_power: 5,
            elves_lost: 0,
            goblins_lost: 1,
        });
        assert_eq!(clean_victory_at(&scenario, 4), None);
    }
}

use crate::unit::Side;

/// How hard each side hits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rules {
    /// Attack power of every goblin.
    pub attack_power: usize,

    /// Attack power of every elf. Normally the same as the goblins'.
    pub elf_attack_power: usize,
}

impl Rules {
    pub const DEFAULT_ATTACK_POWER: usize = 3;

    /// The usual rules, except that elves hit with `power`.
    pub fn with_elf_attack_power(power: usize) -> Rules {
        Rules {
            elf_attack_power: power,
            ..Rules::default()
        }
    }

    pub fn attack_power_of(&self, side: Side) -> usize {
        match side {
            Side::Elf => self.elf_attack_power,
            Side::Goblin => self.attack_power,
        }
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            attack_power: Rules::DEFAULT_ATTACK_POWER,
            elf_attack_power: Rules::DEFAULT_ATTACK_POWER,
        }
    }
}

#[test]
fn boosted_elves() {
    let rules = Rules::with_elf_attack_power(15);
    assert_eq!(rules.attack_power_of(Side::Elf), 15);
    assert_eq!(rules.attack_power_of(Side::Goblin), 3);
    assert_eq!(Rules::default().attack_power_of(Side::Elf), 3);
}

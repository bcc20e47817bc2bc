use beverage_bandits::{find_minimal_elf_power, run_battle, Battle, Rules, Scenario, Winner};
use clap::Parser;
use failure::{Error, ResultExt};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Goblins-vs-elves cave battle simulator.
#[derive(Parser, Debug)]
struct Options {
    /// Map of the cave; reads standard input if omitted or `-`.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Only solve part `PART`: 1 fights one battle, 2 finds the elves'
    /// smallest winning attack power.
    #[arg(short, long, value_name = "PART",
          value_parser = clap::value_parser!(u8).range(1..=2))]
    part: Option<u8>,

    /// Elf attack power for part 1.
    #[arg(short, long, value_name = "POWER", default_value_t = Rules::DEFAULT_ATTACK_POWER)]
    elf_power: usize,

    /// Print the map as each battle ends.
    #[arg(long)]
    show: bool,

    /// Log more; repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("beverage_bandits={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String, Error> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(fs::read_to_string(path)
            .with_context(|_| format!("reading {}", path.display()))?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Fight the battle again at `winner`'s elf power, and print the final map.
fn show(scenario: &Scenario, winner: &Winner) -> Result<(), Error> {
    let mut battle = Battle::new(scenario, Rules::with_elf_attack_power(winner.elf_attack_power));
    battle.fight()?;
    print!("{}", battle);
    Ok(())
}

fn main() -> Result<(), Error> {
    let options = Options::parse();
    init_logging(options.verbose);

    let scenario = read_input(options.input.as_ref())?.parse::<Scenario>()?;

    if options.part != Some(2) {
        let winner = run_battle(&scenario, options.elf_power)?;
        if options.show {
            show(&scenario, &winner)?;
        }
        println!("Combat ends after {} full rounds", winner.rounds_completed);
        println!("{} win with {} total hit points left",
                 winner.side, winner.remaining_hit_points);
        println!("Outcome: {} * {} = {}",
                 winner.rounds_completed, winner.remaining_hit_points, winner.score());
    }

    if options.part != Some(1) {
        let winner = find_minimal_elf_power(&scenario)?;
        if options.show {
            show(&scenario, &winner)?;
        }
        println!("Elves win without losses with attack power {}", winner.elf_attack_power);
        println!("Outcome: {} * {} = {}",
                 winner.rounds_completed, winner.remaining_hit_points, winner.score());
    }

    Ok(())
}

/// Names: generate names for the peoples of Telisar.
///
/// Usage: names [--count <n>] [--seed <n>] [--check <name>] <ancestry>
///
/// Ancestries: common, elven, dwarvish, half-orc, halfling, gnomish, drow,
/// tiefling, dragon.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use telisar::config::TelisarConfig;
use telisar::language::{Ancestry, NameGenerator};
use telisar::logging;

#[derive(Parser)]
#[command(name = "names", version, about = "Generate Telisaran names")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a RON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ancestry to name, e.g. elven, half-orc or tiefling.
    ancestry: Ancestry,

    /// How many names to generate.
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// RNG seed; overrides the config.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Check whether an existing name fits the ancestry instead of generating.
    #[arg(long)]
    check: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => match TelisarConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => TelisarConfig::default(),
    };

    let generator = match NameGenerator::new(cli.ancestry) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(name) = &cli.check {
        if generator.is_valid_name(name) {
            println!("{} is a fine {} name", name, cli.ancestry);
        } else {
            println!("{} is not a {} name", name, cli.ancestry);
            std::process::exit(1);
        }
        return;
    }

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let names: Vec<_> = generator.names(&mut rng).take(cli.count).collect();
    for name in &names {
        println!("{}", name);
    }
    if names.len() < cli.count {
        eprintln!("Error: only {} of {} names could be generated", names.len(), cli.count);
        std::process::exit(1);
    }
}

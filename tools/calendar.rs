/// Calendar: show the campaign's today, its neighbours, or the season.
///
/// Usage: calendar [--config <path>] [--today <era.year.season.day>] [today|yesterday|tomorrow|season]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use telisar::config::TelisarConfig;
use telisar::logging;
use telisar::reckoning::{Calendar, DateTime};

#[derive(Parser)]
#[command(name = "calendar", version, about = "The Telisaran calendar")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a RON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the campaign's today, e.g. 3.3206.8.12.
    #[arg(short, long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Today, in long form.
    Today,
    /// The day before today.
    Yesterday,
    /// The day after today.
    Tomorrow,
    /// The days of the current season.
    Season,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let today = match resolve_today(&cli) {
        Ok(today) => today,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let calendar = Calendar::new(today);

    match cli.command.unwrap_or(Command::Today) {
        Command::Today => println!("{}", calendar.today().long()),
        Command::Yesterday => println!("{}", calendar.describe_yesterday()),
        Command::Tomorrow => match calendar.tomorrow() {
            Ok(tomorrow) => println!("{}", tomorrow.short()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Command::Season => println!("{}", calendar.season_grid()),
    }
}

fn resolve_today(cli: &Cli) -> Result<DateTime, String> {
    if let Some(literal) = &cli.today {
        return DateTime::from_numeric(literal).map_err(|e| e.to_string());
    }
    let config = match &cli.config {
        Some(path) => TelisarConfig::load(path).map_err(|e| e.to_string())?,
        None => TelisarConfig::default(),
    };
    config.today().map_err(|e| e.to_string())
}

/// Timeline: keep the campaign's record of events.
///
/// Usage: timeline [--config <path>] [--file <path>] <command>
///
/// Commands:
///   list [--public]                    every event, oldest first
///   record <description> <expression>  record an event, e.g. "3 days ago"
///          [--redacted]                keep it out of the public list
///   expunge <description>              forget an event
///   when <expression>                  resolve an expression without recording it
///
/// The timeline file comes from --file, then TIMELINE_DATAFILE, then the config.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use telisar::config::TelisarConfig;
use telisar::logging;
use telisar::reckoning::{Parser as ExpressionParser, Timeline};

#[derive(Parser)]
#[command(name = "timeline", version, about = "The campaign timeline")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a RON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Timeline file to read and write.
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every event, oldest first.
    List {
        /// Hide the descriptions of redacted events.
        #[arg(long)]
        public: bool,
    },
    /// Record an event at the date an expression resolves to.
    Record {
        description: String,
        expression: String,
        /// Keep the event out of the public list.
        #[arg(long)]
        redacted: bool,
    },
    /// Remove an event from the timeline.
    Expunge { description: String },
    /// Resolve an expression against the timeline.
    When { expression: String },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => TelisarConfig::load(path).map_err(|e| e.to_string())?,
        None => TelisarConfig::default(),
    };
    let today = config.today().map_err(|e| e.to_string())?;
    let path = cli
        .file
        .clone()
        .or_else(|| config.timeline_path())
        .ok_or("no timeline file: pass --file, set TIMELINE_DATAFILE, or configure one")?;

    let mut timeline = load_or_new(&path)?.with_now(today.clone());

    match cli.command {
        Command::List { public } => {
            let lines = if public {
                timeline.public_list()
            } else {
                timeline.list()
            };
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Record {
            description,
            expression,
            redacted,
        } => {
            let date = if redacted {
                timeline.record_redacted(&description, &expression)
            } else {
                timeline.record(&description, &expression)
            }
            .map_err(|e| e.to_string())?;
            println!("{}", date.long());
            timeline.save_to_ron(&path).map_err(|e| e.to_string())?;
        }
        Command::Expunge { description } => {
            let date = timeline.expunge(&description).map_err(|e| e.to_string())?;
            println!("Expunged {} ({})", description, date.numeric_date());
            timeline.save_to_ron(&path).map_err(|e| e.to_string())?;
        }
        Command::When { expression } => {
            let date = ExpressionParser::new()
                .with_now(&today)
                .with_timeline(&timeline)
                .parse(&expression)
                .map_err(|e| e.to_string())?;
            println!("{}", date.long());
        }
    }
    Ok(())
}

fn load_or_new(path: &Path) -> Result<Timeline, String> {
    if path.exists() {
        Timeline::load_from_ron(path).map_err(|e| e.to_string())
    } else {
        Ok(Timeline::new())
    }
}

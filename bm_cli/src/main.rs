//! Command-line front end for single-elimination tournaments.
//!
//! Each invocation loads the tournament book, runs one subcommand and saves
//! the book again if the subcommand changed it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bm_cli::{
    commands::{Command, execute},
    config::CliConfig,
    store,
};
use bracket_master::SeedPlanner;
use log::debug;
use pico_args::Arguments;

const HELP: &str = "\
Manage single-elimination tournament brackets

USAGE:
  bm_cli [OPTIONS] COMMAND [ARGS]

COMMANDS:
  list                          List tournaments, most recently changed first
  create NAME                   Create a draft tournament
  delete ID                     Delete a tournament
  show ID                       Show settings, seed slots and the bracket
  add ID NAME                   Add a competitor to the pool
  remove ID COMPETITOR          Remove a competitor
  fill ID                       Randomly seat every competitor
  swap ID A B                   Swap seed slots A and B
  clear ID SLOT                 Send a slot's occupant back to the pool
  place ID COMPETITOR SLOT      Seat a competitor (swaps if already seated)
  set ID [--mode M] [--layout L] [--match-type T]
                                Change draft settings
  start ID [--accept-byes]      Lock the seeds and start play
  win ID ROUND MATCH SIDE       Record a game won by side 1 or 2
  reset ID                      Back to draft, clearing all results

  IDs may be shortened to any unique prefix. COMPETITOR is a name or an id
  prefix. Slots, rounds and matches are numbered from 1.

OPTIONS:
  --data FILE           Tournament book  [default: env BRACKET_DATA_FILE or bracket_master.json]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  BRACKET_DATA_FILE             Tournament book path
  BRACKET_DEFAULT_SEED_MODE     standard | compact  [default: compact]
  BRACKET_DEFAULT_LAYOUT        double | single  [default: double]
  BRACKET_DEFAULT_MATCH_TYPE    single | bestOf3  [default: single]
  RUST_LOG                      Log level  [default: warn]
";

struct Args {
    data: Option<PathBuf>,
    command: Command,
}

fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let data = pargs
        .opt_value_from_str("--data")
        .context("Invalid --data value")?;
    let args = Args {
        data,
        command: Command::parse(pargs)?,
    };

    run(args)
}

fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_env(args.data)?;
    config.validate()?;
    debug!("Using book at {}", config.data_file.display());

    let mut book = store::load(&config.data_file)?;
    let modifies = args.command.modifies_book();
    let output = execute(&mut book, args.command, &config, &mut SeedPlanner::new())?;

    if modifies {
        store::save(&book, &config.data_file)?;
    }
    println!("{output}");
    Ok(())
}

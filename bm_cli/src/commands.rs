//! Subcommand parsing and execution.

use anyhow::{Result, bail};
use bracket_master::{
    CompetitorId, Layout, MatchType, SeedMode, SeedPlanner, Side, Tournament, TournamentBook,
    TournamentId,
};
use log::debug;
use pico_args::Arguments;
use rand::Rng;
use std::{fmt, str::FromStr};

use crate::{
    config::CliConfig,
    render::{render_list, render_tournament},
};

/// A parsed subcommand.
///
/// Tournament references are id prefixes; competitor references are a name
/// or an id prefix. Slots, rounds and matches are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Create {
        name: String,
    },
    Delete {
        tournament: String,
    },
    Show {
        tournament: String,
    },
    Add {
        tournament: String,
        name: String,
    },
    Remove {
        tournament: String,
        competitor: String,
    },
    Fill {
        tournament: String,
    },
    Swap {
        tournament: String,
        a: usize,
        b: usize,
    },
    Clear {
        tournament: String,
        slot: usize,
    },
    Place {
        tournament: String,
        competitor: String,
        slot: usize,
    },
    Set {
        tournament: String,
        seed_mode: Option<SeedMode>,
        layout: Option<Layout>,
        match_type: Option<MatchType>,
    },
    Start {
        tournament: String,
        accept_byes: bool,
    },
    Win {
        tournament: String,
        round: usize,
        index: usize,
        side: Side,
    },
    Reset {
        tournament: String,
    },
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No subcommand given.
    MissingCommand,
    /// Unrecognized subcommand.
    UnrecognizedCommand(String),
    /// A positional argument is missing.
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    /// An argument did not parse.
    InvalidArgument { argument: &'static str, reason: String },
    /// `set` without any setting to change.
    NothingToSet,
    /// Arguments left over after parsing.
    UnexpectedArguments(Vec<String>),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => write!(f, "No command given. Use --help to see available commands"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Use --help to see available commands",
                cmd
            ),
            Self::MissingArgument { command, argument } => {
                write!(f, "'{}' requires {}", command, argument)
            }
            Self::InvalidArgument { argument, reason } => {
                write!(f, "Invalid {}: {}", argument, reason)
            }
            Self::NothingToSet => write!(
                f,
                "Nothing to set. Use --mode, --layout or --match-type (e.g., 'set ID --mode standard')"
            ),
            Self::UnexpectedArguments(args) => {
                write!(f, "Unexpected arguments: {}", args.join(" "))
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl Command {
    /// Parse the subcommand and its arguments.
    ///
    /// Global options such as `--data` must already have been taken out of
    /// `pargs`; anything left over after the subcommand's own arguments is an
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bm_cli::commands::Command;
    /// use pico_args::Arguments;
    ///
    /// let pargs = Arguments::from_vec(vec!["start".into(), "3f2a".into(), "--accept-byes".into()]);
    /// let command = Command::parse(pargs).unwrap();
    /// assert_eq!(command, Command::Start { tournament: "3f2a".to_string(), accept_byes: true });
    /// ```
    pub fn parse(mut pargs: Arguments) -> Result<Self, ParseError> {
        let name = pargs
            .subcommand()
            .map_err(|e| ParseError::InvalidArgument {
                argument: "command",
                reason: e.to_string(),
            })?
            .ok_or(ParseError::MissingCommand)?;

        // Flags come out before positional arguments
        let command = match name.as_str() {
            "list" | "ls" => Self::List,
            "create" => Self::Create {
                name: required(&mut pargs, "create", "a tournament NAME")?,
            },
            "delete" => Self::Delete {
                tournament: required(&mut pargs, "delete", "a tournament ID")?,
            },
            "show" => Self::Show {
                tournament: required(&mut pargs, "show", "a tournament ID")?,
            },
            "add" => Self::Add {
                tournament: required(&mut pargs, "add", "a tournament ID")?,
                name: required(&mut pargs, "add", "a competitor NAME")?,
            },
            "remove" => Self::Remove {
                tournament: required(&mut pargs, "remove", "a tournament ID")?,
                competitor: required(&mut pargs, "remove", "a COMPETITOR")?,
            },
            "fill" => Self::Fill {
                tournament: required(&mut pargs, "fill", "a tournament ID")?,
            },
            "swap" => Self::Swap {
                tournament: required(&mut pargs, "swap", "a tournament ID")?,
                a: position(&mut pargs, "swap", "slot")?,
                b: position(&mut pargs, "swap", "slot")?,
            },
            "clear" => Self::Clear {
                tournament: required(&mut pargs, "clear", "a tournament ID")?,
                slot: position(&mut pargs, "clear", "slot")?,
            },
            "place" => Self::Place {
                tournament: required(&mut pargs, "place", "a tournament ID")?,
                competitor: required(&mut pargs, "place", "a COMPETITOR")?,
                slot: position(&mut pargs, "place", "slot")?,
            },
            "set" => {
                let seed_mode = option(&mut pargs, "--mode")?;
                let layout = option(&mut pargs, "--layout")?;
                let match_type = option(&mut pargs, "--match-type")?;
                if seed_mode.is_none() && layout.is_none() && match_type.is_none() {
                    return Err(ParseError::NothingToSet);
                }
                Self::Set {
                    tournament: required(&mut pargs, "set", "a tournament ID")?,
                    seed_mode,
                    layout,
                    match_type,
                }
            }
            "start" => {
                let accept_byes = pargs.contains("--accept-byes");
                Self::Start {
                    tournament: required(&mut pargs, "start", "a tournament ID")?,
                    accept_byes,
                }
            }
            "win" => Self::Win {
                tournament: required(&mut pargs, "win", "a tournament ID")?,
                round: position(&mut pargs, "win", "round")?,
                index: position(&mut pargs, "win", "match")?,
                side: parsed(&mut pargs, "win", "side")?,
            },
            "reset" => Self::Reset {
                tournament: required(&mut pargs, "reset", "a tournament ID")?,
            },
            _ => return Err(ParseError::UnrecognizedCommand(name)),
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            return Err(ParseError::UnexpectedArguments(
                rest.iter().map(|a| a.to_string_lossy().into_owned()).collect(),
            ));
        }
        Ok(command)
    }

    /// Whether running this command changes the book
    pub fn modifies_book(&self) -> bool {
        !matches!(self, Self::List | Self::Show { .. })
    }
}

fn required(
    pargs: &mut Arguments,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ParseError> {
    pargs
        .opt_free_from_str::<String>()
        .ok()
        .flatten()
        .ok_or(ParseError::MissingArgument { command, argument })
}

fn parsed<T>(pargs: &mut Arguments, command: &'static str, argument: &'static str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = required(pargs, command, argument)?;
    raw.parse().map_err(|e: T::Err| ParseError::InvalidArgument {
        argument,
        reason: e.to_string(),
    })
}

/// A 1-based position on the command line, returned 0-based
fn position(pargs: &mut Arguments, command: &'static str, argument: &'static str) -> Result<usize, ParseError> {
    let value: usize = parsed(pargs, command, argument)?;
    value.checked_sub(1).ok_or(ParseError::InvalidArgument {
        argument,
        reason: "numbering starts at 1".to_string(),
    })
}

fn option<T>(pargs: &mut Arguments, flag: &'static str) -> Result<Option<T>, ParseError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = pargs
        .opt_value_from_str(flag)
        .map_err(|e| ParseError::InvalidArgument {
            argument: flag,
            reason: e.to_string(),
        })?;
    raw.map(|value| {
        value.parse().map_err(|e: T::Err| ParseError::InvalidArgument {
            argument: flag,
            reason: e.to_string(),
        })
    })
    .transpose()
}

/// Run `command` against `book` and return the text to print.
///
/// # Errors
///
/// Unknown or ambiguous references and every rejected tournament operation
pub fn execute<R: Rng>(
    book: &mut TournamentBook,
    command: Command,
    config: &CliConfig,
    planner: &mut SeedPlanner<R>,
) -> Result<String> {
    debug!("Executing {command:?}");

    let output = match command {
        Command::List => render_list(&book.list()),
        Command::Create { name } => {
            let id = book.create(config.tournament_config(&name))?;
            format!("Created {} ({id})", book.get(id)?.name())
        }
        Command::Delete { tournament } => {
            let id = book.find(&tournament)?;
            let removed = book.delete(id)?;
            format!("Deleted {}", removed.name())
        }
        Command::Show { tournament } => {
            let id = book.find(&tournament)?;
            render_tournament(book.get(id)?)?
        }
        Command::Add { tournament, name } => {
            let t = lookup(book, &tournament)?;
            t.add_competitor(&name)?;
            format!("Added {} to {} ({} competitors)", name.trim(), t.name(), t.roster().len())
        }
        Command::Remove {
            tournament,
            competitor,
        } => {
            let t = lookup(book, &tournament)?;
            let id = competitor_id(t, &competitor)?;
            let removed = t.remove_competitor(id)?;
            format!("Removed {} from {}", removed.name, t.name())
        }
        Command::Fill { tournament } => {
            let t = lookup(book, &tournament)?;
            t.auto_fill(planner)?;
            render_tournament(t)?
        }
        Command::Swap { tournament, a, b } => {
            let t = lookup(book, &tournament)?;
            t.swap_slots(a, b)?;
            format!("Swapped slots {} and {}", a + 1, b + 1)
        }
        Command::Clear { tournament, slot } => {
            let t = lookup(book, &tournament)?;
            t.clear_slot(slot)?;
            format!("Cleared slot {}", slot + 1)
        }
        Command::Place {
            tournament,
            competitor,
            slot,
        } => {
            let t = lookup(book, &tournament)?;
            let id = competitor_id(t, &competitor)?;
            t.place_competitor(id, slot)?;
            format!("Placed {competitor} in slot {}", slot + 1)
        }
        Command::Set {
            tournament,
            seed_mode,
            layout,
            match_type,
        } => {
            let t = lookup(book, &tournament)?;
            if let Some(mode) = seed_mode {
                t.set_seed_mode(mode)?;
            }
            if let Some(layout) = layout {
                t.set_layout(layout)?;
            }
            if let Some(match_type) = match_type {
                t.set_match_type(match_type)?;
            }
            format!(
                "{}: {} / {} / {}",
                t.name(),
                t.match_type(),
                t.seed_mode(),
                t.layout()
            )
        }
        Command::Start {
            tournament,
            accept_byes,
        } => {
            let t = lookup(book, &tournament)?;
            t.start(accept_byes)?;
            render_tournament(t)?
        }
        Command::Win {
            tournament,
            round,
            index,
            side,
        } => {
            let t = lookup(book, &tournament)?;
            match t.record_win(round, index, side)? {
                Some(champion) => format!("{} wins {}!", champion.name, t.name()),
                None => render_tournament(t)?,
            }
        }
        Command::Reset { tournament } => {
            let t = lookup(book, &tournament)?;
            t.revert_to_draft()?;
            format!("{} is back in draft; all results cleared", t.name())
        }
    };

    Ok(output)
}

fn lookup<'a>(book: &'a mut TournamentBook, prefix: &str) -> Result<&'a mut Tournament> {
    let id: TournamentId = book.find(prefix)?;
    Ok(book.get_mut(id)?)
}

/// Resolve a competitor by exact name (case-insensitive) or unique id prefix
fn competitor_id(tournament: &Tournament, key: &str) -> Result<CompetitorId> {
    let key = key.trim();
    let by_name: Vec<_> = tournament
        .roster()
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case(key))
        .collect();
    if let [only] = by_name.as_slice() {
        return Ok(only.id);
    }

    let prefix = key.to_lowercase();
    let by_id: Vec<_> = tournament
        .roster()
        .iter()
        .filter(|c| !prefix.is_empty() && c.id.to_string().starts_with(&prefix))
        .collect();
    match (by_name.len(), by_id.as_slice()) {
        (_, [only]) => Ok(only.id),
        (0, []) => bail!("No competitor '{key}' in {}", tournament.name()),
        _ => bail!("'{key}' matches more than one competitor; use an id prefix"),
    }
}

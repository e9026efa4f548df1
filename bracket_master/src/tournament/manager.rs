//! Tournament book: the collection of saved tournaments.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::models::{Phase, Tournament, TournamentConfig, TournamentId, TournamentSummary};
use crate::bracket::{BracketError, CompetitorId, constants::MAX_TOURNAMENTS};

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    #[error("No tournament matches '{0}'")]
    NoMatch(String),

    #[error("'{0}' matches more than one tournament")]
    Ambiguous(String),

    #[error("Tournament limit reached: at most {max} tournaments")]
    LimitReached { max: usize },

    #[error("Roster is full: at most {max} competitors")]
    RosterFull { max: usize },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Tournament not in correct phase: expected {expected}, got {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Insufficient competitors: need {needed}, have {current}")]
    InsufficientCompetitors { needed: usize, current: usize },

    #[error("{0} competitor(s) still unassigned")]
    UnassignedCompetitors(usize),

    #[error("Compact seeding of {competitors} competitors leaves byes; confirm to start anyway")]
    ByesNotAccepted { competitors: usize },

    #[error("Round {round} match {index} is already decided")]
    MatchAlreadyDecided { round: usize, index: usize },

    #[error("Round {round} match {index} is still waiting for an opponent")]
    OpponentPending { round: usize, index: usize },

    #[error("Tournament {0} appears more than once")]
    DuplicateTournament(TournamentId),

    #[error("Competitor not found: {0}")]
    CompetitorNotFound(CompetitorId),

    #[error("Bracket error: {0}")]
    Bracket(#[from] BracketError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Every saved tournament, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentBook {
    tournaments: Vec<Tournament>,
}

impl TournamentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Create a new draft tournament at the front of the book
    pub fn create(&mut self, config: TournamentConfig) -> TournamentResult<TournamentId> {
        if self.tournaments.len() >= MAX_TOURNAMENTS {
            warn!("Refusing to create tournament: limit of {MAX_TOURNAMENTS} reached");
            return Err(TournamentError::LimitReached {
                max: MAX_TOURNAMENTS,
            });
        }

        let tournament = Tournament::new(config)?;
        let id = tournament.id();
        info!("Created tournament {} ({id})", tournament.name());
        self.tournaments.insert(0, tournament);
        Ok(id)
    }

    pub fn get(&self, id: TournamentId) -> TournamentResult<&Tournament> {
        self.tournaments
            .iter()
            .find(|t| t.id() == id)
            .ok_or(TournamentError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: TournamentId) -> TournamentResult<&mut Tournament> {
        self.tournaments
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(TournamentError::NotFound(id))
    }

    pub fn delete(&mut self, id: TournamentId) -> TournamentResult<Tournament> {
        let position = self
            .tournaments
            .iter()
            .position(|t| t.id() == id)
            .ok_or(TournamentError::NotFound(id))?;
        let removed = self.tournaments.remove(position);
        info!("Deleted tournament {} ({id})", removed.name());
        Ok(removed)
    }

    /// Summaries, most recently modified first
    pub fn list(&self) -> Vec<TournamentSummary> {
        let mut summaries: Vec<_> = self.tournaments.iter().map(Tournament::summary).collect();
        summaries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        summaries
    }

    /// Resolve a full id or any unique prefix of one
    pub fn find(&self, prefix: &str) -> TournamentResult<TournamentId> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(TournamentError::NoMatch(prefix));
        }

        let matches: Vec<TournamentId> = self
            .tournaments
            .iter()
            .map(Tournament::id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(TournamentError::NoMatch(prefix)),
            _ => Err(TournamentError::Ambiguous(prefix)),
        }
    }

    /// Encode the whole book as a pretty JSON array
    pub fn to_json(&self) -> TournamentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a book, validating every tournament in it
    pub fn from_json(json: &str) -> TournamentResult<Self> {
        let book: Self = serde_json::from_str(json)?;
        if book.tournaments.len() > MAX_TOURNAMENTS {
            return Err(TournamentError::LimitReached {
                max: MAX_TOURNAMENTS,
            });
        }

        let mut ids = HashSet::new();
        for tournament in &book.tournaments {
            if !ids.insert(tournament.id()) {
                return Err(TournamentError::DuplicateTournament(tournament.id()));
            }
            tournament.validate()?;
        }
        Ok(book)
    }
}

//! Tournament data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};
use uuid::Uuid;

use super::manager::{TournamentError, TournamentResult};
use crate::bracket::{
    Bracket, BracketError, Competitor, Layout, MatchType, SeedMode, SeedSlots,
    constants::MAX_COMPETITORS,
    entities::clean_name,
    slots::{capacity_for, check_capacity},
    structure::{build_bracket, check_seeded_from},
};

/// Tournament ID type
pub type TournamentId = Uuid;

/// Tournament phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Roster and seed slots are editable; the bracket is a projection of the slots
    #[default]
    Draft,
    /// Seed slots are frozen; results are recorded on the bracket
    Play,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Draft => write!(f, "draft"),
            Phase::Play => write!(f, "play"),
        }
    }
}

/// Settings chosen when a tournament is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Tournament name
    pub name: String,
    /// Wins needed to take a match
    pub match_type: MatchType,
    /// Placement policy for auto-fill
    pub seed_mode: SeedMode,
    /// Whether auto-fill splits the roster at the root
    pub layout: Layout,
}

impl TournamentConfig {
    /// Create a configuration with the default single / compact / double settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_type: MatchType::default(),
            seed_mode: SeedMode::default(),
            layout: Layout::default(),
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    pub fn with_seed_mode(mut self, seed_mode: SeedMode) -> Self {
        self.seed_mode = seed_mode;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// A persisted tournament.
///
/// Serialized field names are camelCase and match the stored record
/// (`id`, `name`, `phase`, `matchType`, `seedMode`, `layout`, `roster`,
/// `seedSlots`, `bracket`, `champion`, `lastModified`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub(crate) id: TournamentId,
    pub(crate) name: String,
    pub(crate) phase: Phase,
    pub(crate) match_type: MatchType,
    pub(crate) seed_mode: SeedMode,
    pub(crate) layout: Layout,
    pub(crate) roster: Vec<Competitor>,
    pub(crate) seed_slots: SeedSlots,
    pub(crate) bracket: Bracket,
    pub(crate) champion: Option<Competitor>,
    pub(crate) last_modified: DateTime<Utc>,
}

/// Dashboard listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub phase: Phase,
    pub competitors: usize,
    pub seed_mode: SeedMode,
    pub layout: Layout,
    pub champion: Option<String>,
    pub last_modified: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty draft tournament
    pub fn new(config: TournamentConfig) -> TournamentResult<Self> {
        let name = clean_name(&config.name);
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }

        let seed_slots: SeedSlots = vec![None; capacity_for(0)];
        let bracket = build_bracket(&seed_slots)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            phase: Phase::Draft,
            match_type: config.match_type,
            seed_mode: config.seed_mode,
            layout: config.layout,
            roster: Vec::new(),
            seed_slots,
            bracket,
            champion: None,
            last_modified: Utc::now(),
        })
    }

    pub fn id(&self) -> TournamentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn seed_mode(&self) -> SeedMode {
        self.seed_mode
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn roster(&self) -> &[Competitor] {
        &self.roster
    }

    pub fn seed_slots(&self) -> &[Option<Competitor>] {
        &self.seed_slots
    }

    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    pub fn champion(&self) -> Option<&Competitor> {
        self.champion.as_ref()
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            name: self.name.clone(),
            phase: self.phase,
            competitors: self.roster.len(),
            seed_mode: self.seed_mode,
            layout: self.layout,
            champion: self.champion.as_ref().map(|c| c.name.clone()),
            last_modified: self.last_modified,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Check the invariants a decoded record must satisfy.
    ///
    /// Seed slots are a power of two sized for the roster, every occupant is
    /// a roster member seated once, and the bracket was built from the slots.
    /// A draft bracket carries no results at all.
    pub fn validate(&self) -> TournamentResult<()> {
        if self.roster.len() > MAX_COMPETITORS {
            return Err(TournamentError::RosterFull {
                max: MAX_COMPETITORS,
            });
        }
        check_capacity(self.seed_slots.len())?;
        let expected = capacity_for(self.roster.len());
        if self.seed_slots.len() != expected {
            return Err(malformed(format!(
                "{} seed slots for a roster of {} (expected {expected})",
                self.seed_slots.len(),
                self.roster.len()
            )));
        }

        let roster_ids: HashSet<_> = self.roster.iter().map(|c| c.id).collect();
        if roster_ids.len() != self.roster.len() {
            return Err(malformed("duplicate competitor in roster".to_string()));
        }

        let mut seated = HashSet::new();
        for competitor in self.seed_slots.iter().flatten() {
            if !roster_ids.contains(&competitor.id) {
                return Err(BracketError::UnknownCompetitor(competitor.id).into());
            }
            if !seated.insert(competitor.id) {
                return Err(malformed(format!("{} holds more than one slot", competitor.id)));
            }
        }

        check_seeded_from(&self.bracket, &self.seed_slots)?;

        match self.phase {
            Phase::Draft => {
                if self.champion.is_some() || self.bracket != build_bracket(&self.seed_slots)? {
                    return Err(malformed("draft bracket carries results".to_string()));
                }
            }
            Phase::Play => {
                if self.champion.is_some() && self.champion.as_ref() != self.bracket.champion() {
                    return Err(malformed("champion does not match the final".to_string()));
                }
            }
        }

        Ok(())
    }

    /// Encode as pretty JSON
    pub fn to_json(&self) -> TournamentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and validate a single tournament record
    pub fn from_json(json: &str) -> TournamentResult<Self> {
        let tournament: Self = serde_json::from_str(json)?;
        tournament.validate()?;
        Ok(tournament)
    }
}

fn malformed(reason: String) -> TournamentError {
    TournamentError::Bracket(BracketError::MalformedBracket(reason))
}

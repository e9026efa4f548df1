//! # Bracket Master
//!
//! A single-elimination tournament engine: seed a roster into a
//! power-of-two bracket, resolve byes, record results and crown a champion.
//!
//! ## Architecture
//!
//! A tournament moves through two phases:
//!
//! - **Draft**: competitors are added to a roster and seated into seed
//!   slots, by hand or by random auto-fill. The bracket is rebuilt from the
//!   slots after every edit.
//! - **Play**: the slots are frozen. Byes resolve as soon as play starts, and
//!   each recorded win pushes the winner into the next round until the final
//!   is decided.
//!
//! ## Core Modules
//!
//! - [`bracket`]: bracket structure, seeding policies, progression and byes
//! - [`tournament`]: tournament records, phase rules and the tournament book
//!
//! ## Example
//!
//! ```
//! use bracket_master::{Side, TournamentBook, TournamentConfig};
//!
//! let mut book = TournamentBook::new();
//! let id = book.create(TournamentConfig::new("Office Open")).unwrap();
//!
//! let cup = book.get_mut(id).unwrap();
//! let alice = cup.add_competitor("Alice").unwrap();
//! let bob = cup.add_competitor("Bob").unwrap();
//! cup.place_competitor(alice, 0).unwrap();
//! cup.place_competitor(bob, 1).unwrap();
//! cup.start(false).unwrap();
//!
//! let champion = cup.record_win(0, 0, Side::One).unwrap();
//! assert_eq!(champion.map(|c| c.name), Some("Alice".to_string()));
//! ```

/// Bracket structure, seeding and progression.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketResult, Competitor, CompetitorId, Layout, Match, MatchType,
    Progress, SeedMode, SeedPlanner, SeedSlots, Side, SideState,
    constants::{self, MAX_COMPETITORS, MAX_TOURNAMENTS},
};

/// Tournament lifecycle and storage.
pub mod tournament;
pub use tournament::{
    Phase, Tournament, TournamentBook, TournamentConfig, TournamentError, TournamentId,
    TournamentResult, TournamentSummary,
};

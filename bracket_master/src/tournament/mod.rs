//! Tournament module for single-elimination events.
//!
//! This module provides tournament management functionality including:
//! - Tournament creation and configuration
//! - Roster editing and seed slot assignment
//! - Starting play and recording match results
//! - The persisted tournament book
//!
//! ## Example
//!
//! ```
//! use bracket_master::tournament::{TournamentBook, TournamentConfig};
//! use bracket_master::bracket::{MatchType, SeedMode, SeedPlanner};
//!
//! let mut book = TournamentBook::new();
//! let config = TournamentConfig::new("Sunday Cup")
//!     .with_match_type(MatchType::BestOf3)
//!     .with_seed_mode(SeedMode::Standard);
//! let id = book.create(config).unwrap();
//!
//! let cup = book.get_mut(id).unwrap();
//! for name in ["Ada", "Brian", "Cleo"] {
//!     cup.add_competitor(name).unwrap();
//! }
//! cup.auto_fill(&mut SeedPlanner::new()).unwrap();
//! assert!(cup.pool().is_empty());
//! cup.start(false).unwrap();
//! ```

pub mod lifecycle;
pub mod manager;
pub mod models;

pub use manager::{TournamentBook, TournamentError, TournamentResult};
pub use models::{Phase, Tournament, TournamentConfig, TournamentId, TournamentSummary};

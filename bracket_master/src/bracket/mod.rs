//! Single-elimination bracket engine.
//!
//! The bracket is an arena of rounds addressed by `(round, index)`; parent
//! and feeder matches are found by index arithmetic rather than links.
//!
//! - [`slots`]: capacity sizing, slot resizing and slot edits
//! - [`structure`]: tree construction and reachability
//! - [`seeding`]: standard/compact placement over single/double layouts
//! - [`progression`]: result recording, winner propagation, bye resolution

pub mod constants;
pub mod entities;
pub mod errors;
pub mod progression;
pub mod seeding;
pub mod slots;
pub mod structure;

pub use entities::{
    Bracket, Competitor, CompetitorId, Layout, Match, MatchType, Progress, SeedMode, SeedSlots,
    Side,
};
pub use errors::{BracketError, BracketResult};
pub use progression::{record_result, resolve_byes};
pub use seeding::{SeedPlanner, place_in_order};
pub use slots::{capacity_for, clear_slot, place, resize, swap_slots, unassigned};
pub use structure::{SideState, build_bracket, bye_side, has_input, is_match_reachable, side_state};

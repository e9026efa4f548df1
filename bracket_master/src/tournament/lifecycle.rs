//! Draft and play operations on a single tournament.
//!
//! In draft the roster and seed slots are editable and every edit rebuilds
//! the bracket from the slots. Starting play freezes the slots and resolves
//! byes; from then on results are recorded on the bracket itself. Reverting
//! to draft throws all results away.

use log::{info, warn};
use rand::Rng;

use super::{
    manager::{TournamentError, TournamentResult},
    models::{Phase, Tournament},
};
use crate::bracket::{
    Competitor, CompetitorId, Layout, MatchType, SeedMode, SeedPlanner, Side,
    constants::MAX_COMPETITORS,
    entities::clean_name,
    progression::{record_result, resolve_byes},
    slots,
    structure::build_bracket,
};

impl Tournament {
    fn ensure_phase(&self, expected: Phase) -> TournamentResult<()> {
        if self.phase != expected {
            warn!(
                "Rejected operation on {}: expected {expected} phase, in {}",
                self.name, self.phase
            );
            return Err(TournamentError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Resize the slots for the current roster and rebuild the draft bracket.
    fn refresh_draft(&mut self) -> TournamentResult<()> {
        let current = std::mem::take(&mut self.seed_slots);
        self.seed_slots = slots::resize(current, self.roster.len());
        self.bracket = build_bracket(&self.seed_slots)?;
        self.touch();
        Ok(())
    }

    fn competitor(&self, id: CompetitorId) -> TournamentResult<&Competitor> {
        self.roster
            .iter()
            .find(|c| c.id == id)
            .ok_or(TournamentError::CompetitorNotFound(id))
    }

    pub fn rename(&mut self, name: &str) -> TournamentResult<()> {
        let name = clean_name(name);
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_match_type(&mut self, match_type: MatchType) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        self.match_type = match_type;
        self.touch();
        Ok(())
    }

    pub fn set_seed_mode(&mut self, seed_mode: SeedMode) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        self.seed_mode = seed_mode;
        self.touch();
        Ok(())
    }

    pub fn set_layout(&mut self, layout: Layout) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        self.layout = layout;
        self.touch();
        Ok(())
    }

    /// Add a competitor to the roster (and the unassigned pool)
    pub fn add_competitor(&mut self, name: &str) -> TournamentResult<CompetitorId> {
        self.ensure_phase(Phase::Draft)?;
        if clean_name(name).is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.roster.len() >= MAX_COMPETITORS {
            return Err(TournamentError::RosterFull {
                max: MAX_COMPETITORS,
            });
        }

        let competitor = Competitor::new(name);
        let id = competitor.id;
        self.roster.push(competitor);
        self.refresh_draft()?;
        Ok(id)
    }

    /// Remove a competitor from the roster and from any slot it holds
    pub fn remove_competitor(&mut self, id: CompetitorId) -> TournamentResult<Competitor> {
        self.ensure_phase(Phase::Draft)?;
        let position = self
            .roster
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::CompetitorNotFound(id))?;

        let removed = self.roster.remove(position);
        if let Some(slot) = slots::slot_of(&self.seed_slots, id) {
            self.seed_slots[slot] = None;
        }
        self.refresh_draft()?;
        Ok(removed)
    }

    /// Roster members not seated in any slot
    pub fn pool(&self) -> Vec<&Competitor> {
        slots::unassigned(&self.roster, &self.seed_slots)
    }

    /// Replace every slot with a fresh random assignment of the whole roster
    pub fn auto_fill<R: Rng>(&mut self, planner: &mut SeedPlanner<R>) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        if self.roster.is_empty() {
            return Ok(());
        }

        self.seed_slots = planner.assign(
            &self.roster,
            self.seed_slots.len(),
            self.seed_mode,
            self.layout,
        )?;
        self.refresh_draft()
    }

    pub fn swap_slots(&mut self, a: usize, b: usize) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        self.seed_slots = slots::swap_slots(&self.seed_slots, a, b)?;
        self.refresh_draft()
    }

    pub fn clear_slot(&mut self, index: usize) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        self.seed_slots = slots::clear_slot(&self.seed_slots, index)?;
        self.refresh_draft()
    }

    /// Seat a competitor, from the pool or from another slot
    pub fn place_competitor(&mut self, id: CompetitorId, slot: usize) -> TournamentResult<()> {
        self.ensure_phase(Phase::Draft)?;
        let competitor = self.competitor(id)?.clone();
        self.seed_slots = slots::place(&self.seed_slots, &competitor, slot)?;
        self.refresh_draft()
    }

    /// Lock the seed slots and begin play.
    ///
    /// Byes are resolved immediately; if that alone settles the final, the
    /// champion is returned.
    ///
    /// # Errors
    ///
    /// * `InsufficientCompetitors` - fewer than two competitors
    /// * `UnassignedCompetitors` - someone is still in the pool
    /// * `ByesNotAccepted` - compact seeding with a roster that is not a power
    ///   of two, and `accept_byes` was false
    pub fn start(&mut self, accept_byes: bool) -> TournamentResult<Option<Competitor>> {
        self.ensure_phase(Phase::Draft)?;

        let count = self.roster.len();
        if count < 2 {
            return Err(TournamentError::InsufficientCompetitors {
                needed: 2,
                current: count,
            });
        }

        let unassigned = self.pool().len();
        if unassigned > 0 {
            return Err(TournamentError::UnassignedCompetitors(unassigned));
        }

        if self.seed_mode == SeedMode::Compact && !count.is_power_of_two() && !accept_byes {
            return Err(TournamentError::ByesNotAccepted { competitors: count });
        }

        let progress = resolve_byes(build_bracket(&self.seed_slots)?);
        self.phase = Phase::Play;
        self.bracket = progress.bracket;
        self.champion = progress.champion.clone();
        self.touch();

        info!("Tournament {} started with {count} competitors", self.name);
        Ok(progress.champion)
    }

    /// Record one more game win for `side` of a match.
    ///
    /// Returns the champion if this result decided the tournament.
    pub fn record_win(
        &mut self,
        round: usize,
        index: usize,
        side: Side,
    ) -> TournamentResult<Option<Competitor>> {
        self.ensure_phase(Phase::Play)?;

        let current = self.bracket.get(round, index)?;
        if current.is_decided() {
            return Err(TournamentError::MatchAlreadyDecided { round, index });
        }
        if current.side1.is_none() || current.side2.is_none() {
            return Err(TournamentError::OpponentPending { round, index });
        }
        let wins = current.wins(side) + 1;

        let progress = record_result(&self.bracket, round, index, side, wins, self.match_type)?;
        self.bracket = progress.bracket;
        if let Some(champion) = &progress.champion {
            info!("{} wins {}", champion.name, self.name);
            self.champion = Some(champion.clone());
        }
        self.touch();
        Ok(progress.champion)
    }

    /// Back to draft, discarding every recorded result
    pub fn revert_to_draft(&mut self) -> TournamentResult<()> {
        self.ensure_phase(Phase::Play)?;
        self.phase = Phase::Draft;
        self.champion = None;
        self.bracket = build_bracket(&self.seed_slots)?;
        self.touch();

        info!("Tournament {} reverted to draft", self.name);
        Ok(())
    }
}

//! Random seed assignment under the standard and compact policies.

use log::debug;
use rand::{Rng, rngs::ThreadRng, seq::SliceRandom};

use super::{
    entities::{Competitor, Layout, SeedMode, SeedSlots},
    errors::{BracketError, BracketResult},
    slots::check_capacity,
};

/// Shuffles a roster and lays it out over the seed slots.
pub struct SeedPlanner<R = ThreadRng> {
    rng: R,
}

impl SeedPlanner<ThreadRng> {
    /// Create a planner backed by the thread-local generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for SeedPlanner<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SeedPlanner<R> {
    /// Create a planner with a caller-supplied generator (seeded in tests)
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Assign `roster` into `capacity` slots in a uniformly random order.
    ///
    /// # Arguments
    ///
    /// * `roster` - Competitors to place; order is irrelevant
    /// * `capacity` - Slot count, a power of two at least as large as the roster
    /// * `mode` - Standard or compact placement
    /// * `layout` - Whether to split the roster at the root first
    ///
    /// # Returns
    ///
    /// * `BracketResult<SeedSlots>` - The new slot array, or a capacity error
    pub fn assign(
        &mut self,
        roster: &[Competitor],
        capacity: usize,
        mode: SeedMode,
        layout: Layout,
    ) -> BracketResult<SeedSlots> {
        let mut shuffled = roster.to_vec();
        shuffled.shuffle(&mut self.rng);
        place_in_order(&shuffled, capacity, mode, layout)
    }
}

/// Deterministic half of [`SeedPlanner::assign`]: places `teams` in the order given.
pub fn place_in_order(
    teams: &[Competitor],
    capacity: usize,
    mode: SeedMode,
    layout: Layout,
) -> BracketResult<SeedSlots> {
    check_capacity(capacity)?;
    if teams.len() > capacity {
        return Err(BracketError::OverCapacity {
            teams: teams.len(),
            width: capacity,
        });
    }

    debug!(
        "Seeding {} competitors into {} slots ({mode}, {layout})",
        teams.len(),
        capacity
    );

    let mut slots = vec![None; capacity];
    match layout {
        Layout::Double => {
            let half = capacity / 2;
            let (left, right) = teams.split_at(teams.len().div_ceil(2));
            fill(left, &mut slots, 0, half, mode)?;
            fill(right, &mut slots, half, half, mode)?;
        }
        Layout::Single => fill(teams, &mut slots, 0, capacity, mode)?,
    }
    Ok(slots)
}

fn fill(
    teams: &[Competitor],
    slots: &mut [Option<Competitor>],
    start: usize,
    width: usize,
    mode: SeedMode,
) -> BracketResult<()> {
    if teams.len() > width {
        return Err(BracketError::OverCapacity {
            teams: teams.len(),
            width,
        });
    }

    match teams {
        [] => {}
        // The rest of the range stays empty and becomes a bye.
        [only] => slots[start] = Some(only.clone()),
        // Compact pairs the last two right away instead of spreading them.
        [a, b] if mode == SeedMode::Compact => {
            slots[start] = Some(a.clone());
            slots[start + 1] = Some(b.clone());
        }
        _ => {
            let half = width / 2;
            let (left, right) = teams.split_at(teams.len().div_ceil(2));
            fill(left, slots, start, half, mode)?;
            fill(right, slots, start + half, half, mode)?;
        }
    }
    Ok(())
}

//! Seed slot sizing and the slot edits requested by the presentation layer.
//!
//! Every function here returns a fresh slot array and leaves its input alone.

use log::debug;

use super::{
    constants::MIN_CAPACITY,
    entities::{Competitor, CompetitorId, SeedSlots},
    errors::{BracketError, BracketResult},
};

/// Number of seed slots needed for a roster: the next power of two, minimum 2.
pub fn capacity_for(roster_size: usize) -> usize {
    roster_size.max(MIN_CAPACITY).next_power_of_two()
}

/// Fails unless `len` is a usable slot count.
pub fn check_capacity(len: usize) -> BracketResult<()> {
    if len < MIN_CAPACITY || !len.is_power_of_two() {
        return Err(BracketError::InvalidCapacity { len });
    }
    Ok(())
}

/// Grows or shrinks `current` to fit `roster_size` competitors.
///
/// Placements are never reordered. Growing appends empty slots at the tail;
/// shrinking drops trailing slots, and whoever sat in them is back in the
/// unassigned pool (see [`unassigned`]).
pub fn resize(current: SeedSlots, roster_size: usize) -> SeedSlots {
    let capacity = capacity_for(roster_size);
    if current.len() == capacity {
        return current;
    }

    debug!(
        "Resizing seed slots from {} to {} for {} competitors",
        current.len(),
        capacity,
        roster_size
    );
    let mut slots = current;
    slots.resize(capacity, None);
    slots
}

fn check_index(slots: &[Option<Competitor>], index: usize) -> BracketResult<()> {
    if index >= slots.len() {
        return Err(BracketError::SlotOutOfRange {
            index,
            len: slots.len(),
        });
    }
    Ok(())
}

/// Exchanges the occupants of two slots (drag from one slot onto another).
pub fn swap_slots(slots: &[Option<Competitor>], a: usize, b: usize) -> BracketResult<SeedSlots> {
    check_index(slots, a)?;
    check_index(slots, b)?;
    let mut next = slots.to_vec();
    next.swap(a, b);
    Ok(next)
}

/// Empties a slot, returning its occupant to the unassigned pool.
pub fn clear_slot(slots: &[Option<Competitor>], index: usize) -> BracketResult<SeedSlots> {
    check_index(slots, index)?;
    let mut next = slots.to_vec();
    next[index] = None;
    Ok(next)
}

/// Puts `competitor` into `target`.
///
/// A competitor already seated elsewhere trades places with the target's
/// occupant. Coming from the pool, the target's previous occupant (if any)
/// goes back to the pool.
pub fn place(
    slots: &[Option<Competitor>],
    competitor: &Competitor,
    target: usize,
) -> BracketResult<SeedSlots> {
    check_index(slots, target)?;
    match slot_of(slots, competitor.id) {
        Some(source) => swap_slots(slots, source, target),
        None => {
            let mut next = slots.to_vec();
            next[target] = Some(competitor.clone());
            Ok(next)
        }
    }
}

/// Index of the slot holding `id`.
pub fn slot_of(slots: &[Option<Competitor>], id: CompetitorId) -> Option<usize> {
    slots
        .iter()
        .position(|slot| slot.as_ref().is_some_and(|c| c.id == id))
}

/// Roster members that hold no seed slot, in roster order.
pub fn unassigned<'a>(roster: &'a [Competitor], slots: &[Option<Competitor>]) -> Vec<&'a Competitor> {
    roster
        .iter()
        .filter(|c| slot_of(slots, c.id).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<Competitor> {
        (0..n).map(|i| Competitor::new(&format!("Team {i}"))).collect()
    }

    #[test]
    fn test_capacity_for_small_rosters() {
        assert_eq!(capacity_for(0), 2);
        assert_eq!(capacity_for(1), 2);
        assert_eq!(capacity_for(2), 2);
        assert_eq!(capacity_for(3), 4);
        assert_eq!(capacity_for(5), 8);
        assert_eq!(capacity_for(8), 8);
        assert_eq!(capacity_for(9), 16);
        assert_eq!(capacity_for(16), 16);
    }

    #[test]
    fn test_check_capacity() {
        assert!(check_capacity(2).is_ok());
        assert!(check_capacity(16).is_ok());
        assert_eq!(check_capacity(0), Err(BracketError::InvalidCapacity { len: 0 }));
        assert_eq!(check_capacity(1), Err(BracketError::InvalidCapacity { len: 1 }));
        assert_eq!(check_capacity(6), Err(BracketError::InvalidCapacity { len: 6 }));
    }

    #[test]
    fn test_resize_unchanged_keeps_placements() {
        let teams = roster(3);
        let slots = vec![None, Some(teams[2].clone()), Some(teams[0].clone()), None];
        let resized = resize(slots.clone(), 4);
        assert_eq!(resized, slots);
    }

    #[test]
    fn test_resize_grow_appends_empty_tail() {
        let teams = roster(2);
        let slots = vec![Some(teams[1].clone()), Some(teams[0].clone())];
        let resized = resize(slots.clone(), 3);
        assert_eq!(resized.len(), 4);
        assert_eq!(&resized[..2], &slots[..]);
        assert!(resized[2..].iter().all(Option::is_none));
    }

    #[test]
    fn test_resize_shrink_drops_tail_into_pool() {
        let teams = roster(5);
        let slots: SeedSlots = teams.iter().cloned().map(Some).chain([None, None, None]).collect();
        let resized = resize(slots, 4);
        assert_eq!(resized.len(), 4);

        let pool = unassigned(&teams, &resized);
        assert_eq!(pool, vec![&teams[4]]);
    }

    #[test]
    fn test_swap_and_clear() {
        let teams = roster(2);
        let slots = vec![Some(teams[0].clone()), None, Some(teams[1].clone()), None];

        let swapped = swap_slots(&slots, 0, 3).unwrap();
        assert_eq!(swapped[0], None);
        assert_eq!(swapped[3], Some(teams[0].clone()));
        // Input untouched
        assert_eq!(slots[0], Some(teams[0].clone()));

        let cleared = clear_slot(&swapped, 2).unwrap();
        assert_eq!(cleared[2], None);
        assert_eq!(unassigned(&teams, &cleared), vec![&teams[1]]);
    }

    #[test]
    fn test_slot_edits_reject_bad_index() {
        let slots: SeedSlots = vec![None, None];
        assert_eq!(
            swap_slots(&slots, 0, 2),
            Err(BracketError::SlotOutOfRange { index: 2, len: 2 })
        );
        assert!(clear_slot(&slots, 5).is_err());
    }

    #[test]
    fn test_place_from_pool_displaces_occupant() {
        let teams = roster(2);
        let slots = vec![Some(teams[0].clone()), None];
        let placed = place(&slots, &teams[1], 0).unwrap();
        assert_eq!(placed, vec![Some(teams[1].clone()), None]);
        assert_eq!(unassigned(&teams, &placed), vec![&teams[0]]);
    }

    #[test]
    fn test_place_seated_competitor_swaps() {
        let teams = roster(2);
        let slots = vec![Some(teams[0].clone()), None, Some(teams[1].clone()), None];
        let placed = place(&slots, &teams[1], 0).unwrap();
        assert_eq!(placed[0], Some(teams[1].clone()));
        assert_eq!(placed[2], Some(teams[0].clone()));
    }
}

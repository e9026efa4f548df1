//! Round/match tree construction and reachability queries.

use super::{
    entities::{Bracket, Competitor, Match, Side},
    errors::{BracketError, BracketResult},
    slots::check_capacity,
};

/// How a match side relates to the competitors still in the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SideState {
    /// A competitor occupies the side.
    Decided,
    /// A competitor can still arrive, but hasn't yet.
    Waiting,
    /// No competitor can ever arrive here.
    Disconnected,
}

/// Builds the full tree for `slots`, with no results recorded.
///
/// Round 0 pairs consecutive slots; each later round has half as many empty
/// matches, down to the final.
pub fn build_bracket(slots: &[Option<Competitor>]) -> BracketResult<Bracket> {
    check_capacity(slots.len())?;

    let first: Vec<Match> = slots
        .chunks_exact(2)
        .enumerate()
        .map(|(id, pair)| Match::seeded(id, id * 2, pair[0].clone(), pair[1].clone()))
        .collect();

    let mut size = first.len();
    let mut rounds = vec![first];
    while size > 1 {
        size /= 2;
        rounds.push((0..size).map(Match::pending).collect());
    }

    Ok(Bracket::from_rounds(rounds))
}

/// Whether any competitor, decided or not, can reach `side` of a match.
pub fn has_input(bracket: &Bracket, round: usize, index: usize, side: Side) -> BracketResult<bool> {
    bracket.get(round, index)?;
    Ok(reaches(bracket, round, index, side))
}

/// Unchecked form of [`has_input`] for coordinates already known to be valid.
pub(crate) fn reaches(bracket: &Bracket, round: usize, index: usize, side: Side) -> bool {
    let Some(m) = bracket.lookup(round, index) else {
        return false;
    };
    if m.competitor(side).is_some() {
        return true;
    }
    if round == 0 {
        return false;
    }

    let feeder = index * 2 + side.feeder_offset();
    reaches(bracket, round - 1, feeder, Side::One) || reaches(bracket, round - 1, feeder, Side::Two)
}

/// Whether either side of the match can ever be filled.
pub fn is_match_reachable(bracket: &Bracket, round: usize, index: usize) -> BracketResult<bool> {
    Ok(has_input(bracket, round, index, Side::One)? || reaches(bracket, round, index, Side::Two))
}

pub fn side_state(bracket: &Bracket, round: usize, index: usize, side: Side) -> BracketResult<SideState> {
    let m = bracket.get(round, index)?;
    let state = if m.competitor(side).is_some() {
        SideState::Decided
    } else if reaches(bracket, round, index, side) {
        SideState::Waiting
    } else {
        SideState::Disconnected
    };
    Ok(state)
}

/// The side that advances unopposed, when exactly one side is reachable.
pub fn bye_side(bracket: &Bracket, round: usize, index: usize) -> BracketResult<Option<Side>> {
    let one = has_input(bracket, round, index, Side::One)?;
    let two = reaches(bracket, round, index, Side::Two);
    Ok(match (one, two) {
        (true, false) => Some(Side::One),
        (false, true) => Some(Side::Two),
        _ => None,
    })
}

/// Checks that `bracket` was built from `slots`: same capacity, and round-0
/// matches carry exactly the slot occupants and source indices.
pub fn check_seeded_from(bracket: &Bracket, slots: &[Option<Competitor>]) -> BracketResult<()> {
    check_capacity(slots.len())?;
    if bracket.capacity() != slots.len() {
        return Err(BracketError::MalformedBracket(format!(
            "bracket capacity {} does not match {} seed slots",
            bracket.capacity(),
            slots.len()
        )));
    }

    for (m, pair) in bracket.rounds()[0].iter().zip(slots.chunks_exact(2)) {
        let first_slot = m.id * 2;
        if m.side1 != pair[0]
            || m.side2 != pair[1]
            || m.source_slot1 != Some(first_slot)
            || m.source_slot2 != Some(first_slot + 1)
        {
            return Err(BracketError::MalformedBracket(format!(
                "round 0 match {} disagrees with seed slots {} and {}",
                m.id,
                first_slot,
                first_slot + 1
            )));
        }
    }

    Ok(())
}

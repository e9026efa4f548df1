//! Recording results, advancing winners, and resolving byes.
//!
//! Both passes produce a new [`Progress`] snapshot. `record_result` borrows
//! the caller's bracket and clones it; `resolve_byes` takes ownership of the
//! bracket it sweeps, so nothing the caller still holds is ever mutated.

use log::{debug, info};

use super::{
    entities::{Bracket, MatchType, Progress, Side},
    errors::{BracketError, BracketResult},
    structure::reaches,
};

/// Set one side's win counter and advance the winner if the match is decided.
///
/// The counter is stored as given. A side whose counter reaches
/// `match_type.wins_required()` wins, side one taking precedence; a counter
/// below the threshold never clears a winner already recorded. Once a winner
/// is set the whole bracket goes through [`resolve_byes`], since the result
/// can expose a later match as a bye.
///
/// # Errors
///
/// * `RoundOutOfRange` / `MatchOutOfRange` - coordinates outside the bracket
/// * `VacantSide` - nobody occupies `side` of that match
pub fn record_result(
    bracket: &Bracket,
    round: usize,
    index: usize,
    side: Side,
    wins: u32,
    match_type: MatchType,
) -> BracketResult<Progress> {
    let mut next = bracket.clone();
    let m = next.get_mut(round, index)?;
    if m.competitor(side).is_none() {
        return Err(BracketError::VacantSide { round, index, side });
    }
    m.set_wins(side, wins);

    let required = match_type.wins_required();
    let winner = if m.wins1 >= required {
        m.side1.clone()
    } else if m.wins2 >= required {
        m.side2.clone()
    } else {
        None
    };

    let Some(winner) = winner else {
        return Ok(Progress {
            bracket: next,
            champion: None,
        });
    };

    debug!("Round {round} match {index} won by {}", winner.name);
    next.set_winner(round, index, winner.clone());
    let champion = next.advance(round, index, winner);

    let resolved = resolve_byes(next);
    let champion = resolved.champion.or(champion);
    if let Some(c) = &champion {
        info!("Champion decided: {}", c.name);
    }
    Ok(Progress {
        bracket: resolved.bracket,
        champion,
    })
}

/// Advance every competitor whose opponent can never arrive.
///
/// One forward sweep, rounds in order and matches in order within a round.
/// A winner is only ever written into the next round, which the sweep has
/// not reached yet, so a single pass settles every bye and a second pass
/// over the result changes nothing. Matches with neither side reachable are
/// dead branches and stay undecided.
pub fn resolve_byes(mut bracket: Bracket) -> Progress {
    let mut champion = None;

    for round in 0..bracket.round_count() {
        let matches = bracket.rounds()[round].len();
        for index in 0..matches {
            let m = &bracket.rounds()[round][index];
            if m.is_decided() {
                continue;
            }

            let side = match (
                reaches(&bracket, round, index, Side::One),
                reaches(&bracket, round, index, Side::Two),
            ) {
                (true, false) => Side::One,
                (false, true) => Side::Two,
                _ => continue,
            };
            // Reachable but the competitor hasn't arrived yet
            let Some(winner) = m.competitor(side).cloned() else {
                continue;
            };

            debug!("Bye: {} advances from round {round} match {index}", winner.name);
            bracket.set_winner(round, index, winner.clone());
            if let Some(c) = bracket.advance(round, index, winner) {
                champion = Some(c);
            }
        }
    }

    Progress { bracket, champion }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{
        entities::{Competitor, SeedSlots},
        structure::build_bracket,
    };

    fn teams(n: usize) -> Vec<Competitor> {
        (0..n).map(|i| Competitor::new(&format!("Team {i}"))).collect()
    }

    fn full_slots(teams: &[Competitor]) -> SeedSlots {
        teams.iter().cloned().map(Some).collect()
    }

    #[test]
    fn test_single_win_decides_and_propagates() {
        let t = teams(4);
        let bracket = build_bracket(&full_slots(&t)).unwrap();

        let progress = record_result(&bracket, 0, 1, Side::Two, 1, MatchType::Single).unwrap();
        let m = progress.bracket.get(0, 1).unwrap();
        assert_eq!(m.winner, Some(t[3].clone()));
        assert_eq!(m.winning_side(), Some(Side::Two));
        // Odd match index lands on side two of the parent
        assert_eq!(progress.bracket.get(1, 0).unwrap().side2, Some(t[3].clone()));
        assert_eq!(progress.bracket.get(1, 0).unwrap().side1, None);
        assert_eq!(progress.champion, None);
    }

    #[test]
    fn test_caller_bracket_unchanged() {
        let t = teams(2);
        let bracket = build_bracket(&full_slots(&t)).unwrap();
        let before = bracket.clone();

        let progress = record_result(&bracket, 0, 0, Side::One, 1, MatchType::Single).unwrap();
        assert_eq!(bracket, before);
        assert_ne!(progress.bracket, before);
    }

    #[test]
    fn test_final_yields_champion() {
        let t = teams(2);
        let bracket = build_bracket(&full_slots(&t)).unwrap();

        let progress = record_result(&bracket, 0, 0, Side::One, 1, MatchType::Single).unwrap();
        assert_eq!(progress.champion, Some(t[0].clone()));
        assert_eq!(progress.bracket.champion(), Some(&t[0]));
    }

    #[test]
    fn test_best_of_three_needs_two_wins() {
        let t = teams(4);
        let bracket = build_bracket(&full_slots(&t)).unwrap();

        let first = record_result(&bracket, 0, 0, Side::One, 1, MatchType::BestOf3).unwrap();
        assert!(!first.bracket.get(0, 0).unwrap().is_decided());
        assert_eq!(first.bracket.get(0, 0).unwrap().wins1, 1);

        let second =
            record_result(&first.bracket, 0, 0, Side::One, 2, MatchType::BestOf3).unwrap();
        assert_eq!(second.bracket.get(0, 0).unwrap().winner, Some(t[0].clone()));
        assert_eq!(second.bracket.get(1, 0).unwrap().side1, Some(t[0].clone()));
    }

    #[test]
    fn test_lower_counter_keeps_winner() {
        let t = teams(4);
        let bracket = build_bracket(&full_slots(&t)).unwrap();
        let decided = record_result(&bracket, 0, 0, Side::One, 1, MatchType::Single).unwrap();

        let lowered =
            record_result(&decided.bracket, 0, 0, Side::One, 0, MatchType::Single).unwrap();
        let m = lowered.bracket.get(0, 0).unwrap();
        assert_eq!(m.wins1, 0);
        assert_eq!(m.winner, Some(t[0].clone()));
    }

    #[test]
    fn test_record_result_rejects_bad_coordinates() {
        let t = teams(3);
        let mut slots = full_slots(&t);
        slots.push(None);
        let bracket = build_bracket(&slots).unwrap();

        assert_eq!(
            record_result(&bracket, 3, 0, Side::One, 1, MatchType::Single),
            Err(BracketError::RoundOutOfRange { round: 3, rounds: 2 })
        );
        assert_eq!(
            record_result(&bracket, 0, 2, Side::One, 1, MatchType::Single),
            Err(BracketError::MatchOutOfRange {
                round: 0,
                index: 2,
                matches: 2
            })
        );
        assert_eq!(
            record_result(&bracket, 0, 1, Side::Two, 1, MatchType::Single),
            Err(BracketError::VacantSide {
                round: 0,
                index: 1,
                side: Side::Two
            })
        );
    }

    #[test]
    fn test_resolve_byes_advances_lone_competitor() {
        let t = teams(3);
        let slots = vec![Some(t[0].clone()), Some(t[1].clone()), Some(t[2].clone()), None];
        let progress = resolve_byes(build_bracket(&slots).unwrap());

        let bye = progress.bracket.get(0, 1).unwrap();
        assert_eq!(bye.winner, Some(t[2].clone()));
        assert_eq!(progress.bracket.get(1, 0).unwrap().side2, Some(t[2].clone()));
        assert!(!progress.bracket.get(0, 0).unwrap().is_decided());
        assert!(!progress.bracket.get(1, 0).unwrap().is_decided());
        assert_eq!(progress.champion, None);
    }

    #[test]
    fn test_resolve_byes_chains_through_rounds() {
        // A alone in the left half walks to the final in one sweep.
        let t = teams(3);
        let slots = vec![
            Some(t[0].clone()),
            None,
            None,
            None,
            Some(t[1].clone()),
            Some(t[2].clone()),
            None,
            None,
        ];
        let progress = resolve_byes(build_bracket(&slots).unwrap());

        assert_eq!(progress.bracket.get(0, 0).unwrap().winner, Some(t[0].clone()));
        assert_eq!(progress.bracket.get(1, 0).unwrap().winner, Some(t[0].clone()));
        assert_eq!(progress.bracket.get(2, 0).unwrap().side1, Some(t[0].clone()));
        assert!(!progress.bracket.get(2, 0).unwrap().is_decided());
    }

    #[test]
    fn test_resolve_byes_lone_competitor_is_champion() {
        let t = teams(1);
        let slots = vec![Some(t[0].clone()), None];
        let progress = resolve_byes(build_bracket(&slots).unwrap());
        assert_eq!(progress.champion, Some(t[0].clone()));
    }

    #[test]
    fn test_resolve_byes_leaves_dead_branch() {
        let t = teams(2);
        let slots = vec![Some(t[0].clone()), Some(t[1].clone()), None, None];
        let progress = resolve_byes(build_bracket(&slots).unwrap());

        let dead = progress.bracket.get(0, 1).unwrap();
        assert!(!dead.is_decided());
        assert!(dead.side1.is_none() && dead.side2.is_none());
        // The final still waits on the left semifinal
        assert!(!progress.bracket.get(1, 0).unwrap().is_decided());
    }

    #[test]
    fn test_resolve_byes_is_idempotent() {
        let t = teams(5);
        let slots = vec![
            Some(t[0].clone()),
            Some(t[1].clone()),
            Some(t[2].clone()),
            None,
            Some(t[3].clone()),
            None,
            Some(t[4].clone()),
            None,
        ];
        let once = resolve_byes(build_bracket(&slots).unwrap());
        let twice = resolve_byes(once.bracket.clone());
        assert_eq!(once.bracket, twice.bracket);
        assert_eq!(twice.champion, None);
    }

    #[test]
    fn test_manual_win_triggers_bye_resolution() {
        // Left: A vs B. Right: C alone, D's branch dead. After A beats B and the
        // right side resolves, only the final remains.
        let t = teams(3);
        let slots = vec![
            Some(t[0].clone()),
            Some(t[1].clone()),
            None,
            None,
            Some(t[2].clone()),
            None,
            None,
            None,
        ];
        let start = resolve_byes(build_bracket(&slots).unwrap());
        // C walks up to the final on byes; the left semifinal waits on A vs B.
        assert_eq!(start.bracket.get(2, 0).unwrap().side2, Some(t[2].clone()));
        assert!(!start.bracket.get(1, 0).unwrap().is_decided());

        let progress =
            record_result(&start.bracket, 0, 0, Side::One, 1, MatchType::Single).unwrap();
        // A is now alone in the left semifinal (its other feeder is dead)
        assert_eq!(progress.bracket.get(1, 0).unwrap().winner, Some(t[0].clone()));
        let last = progress.bracket.get(2, 0).unwrap();
        assert_eq!(last.side1, Some(t[0].clone()));
        assert_eq!(last.side2, Some(t[2].clone()));
        assert!(!last.is_decided());
    }
}

//! Plain-text views of tournaments for the terminal.

use bracket_master::{
    BracketResult, MatchType, Phase, Side, SideState, Tournament, TournamentSummary,
    bracket::{bye_side, side_state},
};

/// Characters of a tournament id shown in listings
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &impl ToString) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

/// Round heading, with the last round always called the finals
pub fn round_name(round: usize, rounds: usize) -> String {
    if round + 1 == rounds {
        "Finals".to_string()
    } else {
        format!("Round {}", round + 1)
    }
}

/// One line per tournament, as returned by `TournamentBook::list`
pub fn render_list(summaries: &[TournamentSummary]) -> String {
    if summaries.is_empty() {
        return "No tournaments yet. Create one with `bm_cli create NAME`.".to_string();
    }

    summaries
        .iter()
        .map(|s| {
            let champion = s
                .champion
                .as_ref()
                .map(|name| format!("  champion: {name}"))
                .unwrap_or_default();
            format!(
                "{}  {:<24} {:<5}  {:>2} competitors  {}/{}  {}{champion}",
                short_id(&s.id),
                s.name,
                s.phase,
                s.competitors,
                s.seed_mode,
                s.layout,
                s.last_modified.format("%Y-%m-%d %H:%M"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full view: settings, seed slots and pool in draft, then the bracket.
pub fn render_tournament(tournament: &Tournament) -> BracketResult<String> {
    let mut lines = vec![
        format!(
            "{} [{}] ({})",
            tournament.name(),
            tournament.phase(),
            short_id(&tournament.id())
        ),
        format!(
            "{} / {} / {} / {} competitors",
            tournament.match_type(),
            tournament.seed_mode(),
            tournament.layout(),
            tournament.roster().len()
        ),
    ];

    if tournament.phase() == Phase::Draft {
        lines.push(String::new());
        lines.push("Seed slots:".to_string());
        for (i, slot) in tournament.seed_slots().iter().enumerate() {
            let name = slot.as_ref().map_or("-", |c| c.name.as_str());
            lines.push(format!("  {:>2}. {name}", i + 1));
        }

        let pool = tournament.pool();
        if !pool.is_empty() {
            let names: Vec<_> = pool.iter().map(|c| c.name.as_str()).collect();
            lines.push(format!("Pool: {}", names.join(", ")));
        }
    }

    let bracket = tournament.bracket();
    for (r, matches) in bracket.rounds().iter().enumerate() {
        lines.push(String::new());
        lines.push(round_name(r, bracket.round_count()));
        for m in matches {
            lines.push(format!(
                "  Match {}: {} vs {}",
                m.id + 1,
                side_label(tournament, r, m.id, Side::One)?,
                side_label(tournament, r, m.id, Side::Two)?
            ));
        }
    }

    if let Some(champion) = tournament.champion() {
        lines.push(String::new());
        lines.push(format!("Champion: {}", champion.name));
    }

    Ok(lines.join("\n"))
}

fn side_label(tournament: &Tournament, round: usize, index: usize, side: Side) -> BracketResult<String> {
    let bracket = tournament.bracket();
    let label = match side_state(bracket, round, index, side)? {
        SideState::Decided => {
            let m = bracket.get(round, index)?;
            let name = m.competitor(side).map_or("", |c| c.name.as_str());
            let wins = if tournament.match_type() == MatchType::BestOf3 {
                format!(" ({})", m.wins(side))
            } else {
                String::new()
            };
            let marker = if m.winning_side() == Some(side) { " *" } else { "" };
            format!("{name}{wins}{marker}")
        }
        SideState::Waiting => "[waiting]".to_string(),
        SideState::Disconnected => {
            if bye_side(bracket, round, index)? == Some(side.other()) {
                "[bye]".to_string()
            } else {
                "[disconnected]".to_string()
            }
        }
    };
    Ok(label)
}

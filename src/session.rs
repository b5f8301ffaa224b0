use crate::analysis::MatchupAnalyzer;
use crate::model::{BattleSuggestion, Creature};
use crate::snapshot::parse_battle;
use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;

/// Analysis of one recorded battle snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionEntry {
    /// 1-based line number in the recording.
    pub line: usize,
    pub battle_id: Option<String>,
    /// `None` when no battle was active at that point.
    pub suggestions: Option<Vec<BattleSuggestion>>,
}

/// Analyzes a recording with one battle snapshot per line (JSON lines).
///
/// Lines are independent, so they are analyzed in parallel; the result keeps
/// recording order. Blank lines are skipped.
pub fn analyze_session(
    recording: &str,
    roster: &[Creature],
    analyzer: &MatchupAnalyzer<'_>,
) -> anyhow::Result<Vec<SessionEntry>> {
    let lines: Vec<(usize, &str)> = recording
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
        .collect();

    lines
        .par_iter()
        .map(|(line_no, line)| -> anyhow::Result<SessionEntry> {
            let snapshot =
                parse_battle(line).with_context(|| format!("Bad snapshot on line {line_no}"))?;
            let suggestions = snapshot
                .matchup(roster)
                .with_context(|| format!("Bad snapshot on line {line_no}"))?
                .map(|m| analyzer.analyze(&m.player, &m.opponent, roster));
            Ok(SessionEntry {
                line: *line_no,
                battle_id: snapshot.battle_id,
                suggestions,
            })
        })
        .collect()
}

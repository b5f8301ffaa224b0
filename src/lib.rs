//! Battle matchup analysis for the game overlay: a type-effectiveness chart
//! and the heuristics that turn a battle snapshot into tactical suggestions.
//!
//! The main entry point is [`analysis::analyze_matchup`].

pub mod analysis;
pub mod config;
pub mod messages;
pub mod model;
pub mod session;
pub mod snapshot;
pub mod types;

pub use crate::analysis::{analyze_matchup, MatchupAnalyzer};
pub use crate::types::{dual_type_effectiveness, single_type_effectiveness, ElementalType};

use crate::config::AnalyzerConfig;
use crate::messages::Locale;
use crate::model::BattleSuggestion;
use crate::session::{analyze_session, SessionEntry};
use crate::snapshot::{load_battle, load_party, roster_from_party};
use anyhow::Context;
use log::info;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub battle_path: PathBuf,
    pub party_path: PathBuf,
    /// Treat the battle file as a recording with one snapshot per line.
    pub session: bool,
    pub config_path: Option<PathBuf>,
    pub locale: Option<Locale>,
    pub format: OutputFormat,
}

pub fn render_suggestions(
    suggestions: &[BattleSuggestion],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(suggestions)?),
        OutputFormat::Text => Ok(suggestions
            .iter()
            .map(|s| {
                format!(
                    "[{}] {} {} - {}",
                    s.kind.label(),
                    s.icon,
                    s.title,
                    s.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_session(entries: &[SessionEntry], format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(entries)?);
    }
    let mut out = Vec::new();
    for entry in entries {
        let id = entry.battle_id.as_deref().unwrap_or("-");
        match &entry.suggestions {
            Some(suggestions) => {
                out.push(format!("# line {} (battle {id})", entry.line));
                out.push(render_suggestions(suggestions, format)?);
            }
            None => out.push(format!("# line {}: no active battle", entry.line)),
        }
    }
    Ok(out.join("\n"))
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let mut config = match &opts.config_path {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(locale) = opts.locale {
        config.locale = locale;
    }
    let party = load_party(&opts.party_path)?;
    let roster = roster_from_party(&party)?;
    info!("loaded party of {} from {}", roster.len(), opts.party_path.display());
    let analyzer = MatchupAnalyzer::new(config);

    if opts.session {
        let recording = std::fs::read_to_string(&opts.battle_path).with_context(|| {
            format!("Failed to read session file at {}", opts.battle_path.display())
        })?;
        let entries = analyze_session(&recording, &roster, &analyzer)?;
        info!("analyzed {} snapshots", entries.len());
        println!("{}", render_session(&entries, opts.format)?);
        return Ok(());
    }

    let snapshot = load_battle(&opts.battle_path)?;
    match snapshot.matchup(&roster)? {
        Some(matchup) => {
            let suggestions = analyzer.analyze(&matchup.player, &matchup.opponent, &roster);
            println!("{}", render_suggestions(&suggestions, opts.format)?);
        }
        None => println!("No active battle"),
    }
    Ok(())
}

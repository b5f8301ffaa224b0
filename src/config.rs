use crate::messages::Locale;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Scoring weights for the matchup heuristics.
///
/// The defaults are empirically chosen and reproduce the reference
/// recommendations; they are tunable, not part of any protocol.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Bench creature takes at most 0.5x from the opponent's types.
    pub resist_bonus: i32,
    /// Bench creature takes 2x or more.
    pub weakness_penalty: i32,
    /// Bench creature has a 4x option.
    pub double_super_effective_bonus: i32,
    /// Bench creature has a 2x option.
    pub super_effective_bonus: i32,
    /// Bench creature's best option is 0.5x or worse.
    pub not_very_effective_penalty: i32,
    /// Lowest score a bench creature needs to be recommended at all.
    pub switch_score_floor: i32,
    /// Score needed to suggest a switch when incoming damage is neutral.
    pub neutral_switch_score: i32,
    /// Below this HP fraction the risky suggestion turns all-or-nothing.
    pub critical_hp_fraction: f64,
    pub locale: Locale,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            resist_bonus: 2,
            weakness_penalty: 2,
            double_super_effective_bonus: 4,
            super_effective_bonus: 2,
            not_very_effective_penalty: 1,
            switch_score_floor: 2,
            neutral_switch_score: 3,
            critical_hp_fraction: 0.3,
            locale: Locale::PtBr,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let parsed: AnalyzerConfig =
            serde_json::from_str(raw).context("Failed to parse analyzer config")?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.critical_hp_fraction) {
            anyhow::bail!(
                "critical_hp_fraction must be within 0..=1, got {}",
                self.critical_hp_fraction
            );
        }
        if self.neutral_switch_score < self.switch_score_floor {
            anyhow::bail!(
                "neutral_switch_score ({}) must not be below switch_score_floor ({})",
                self.neutral_switch_score,
                self.switch_score_floor
            );
        }
        Ok(())
    }
}

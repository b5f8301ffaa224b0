//! Matchup analysis: turns the two active creatures and the player's roster
//! into one Safe, one Balanced and one Risky suggestion.

use crate::config::AnalyzerConfig;
use crate::messages::Message;
use crate::model::{BattleSuggestion, Creature, Move, Roster, StrategyKind};
use crate::types::{ElementalType, TypeChart};
use log::debug;

/// Status moves worth spending a turn on, by normalized name.
static SETUP_MOVES: phf::Set<&'static str> = phf::phf_set! {
    "thunderwave",
    "willowisp",
    "toxic",
    "sleeppowder",
    "spore",
    "hypnosis",
    "swordsdance",
    "calmmind",
    "nastyplot",
    "shellsmash",
};

fn normalize_move_key(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

pub fn is_setup_move(name: &str) -> bool {
    SETUP_MOVES.contains(normalize_move_key(name).as_str())
}

/// Best way the active player creature can hit the opponent.
#[derive(Clone, Debug, PartialEq)]
pub enum OffenseSource {
    Move(String),
    /// No damaging move landed; the creature's own type is the proxy.
    Type(ElementalType),
}

impl OffenseSource {
    pub fn label(&self) -> &str {
        match self {
            OffenseSource::Move(name) => name.as_str(),
            OffenseSource::Type(ty) => ty.name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCandidate<'r> {
    pub creature: &'r Creature,
    pub move_label: String,
    pub score: i32,
}

/// Intermediate numbers behind the suggestions.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchupReport<'r> {
    /// Worst multiplier the opponent's own types reach against the player.
    pub max_incoming: f32,
    pub max_outgoing: f32,
    pub best_offense: Option<OffenseSource>,
    pub best_switch: Option<SwitchCandidate<'r>>,
}

impl MatchupReport<'_> {
    fn best_move_name(&self) -> Option<&str> {
        match &self.best_offense {
            Some(OffenseSource::Move(name)) => Some(name.as_str()),
            _ => None,
        }
    }
}

pub struct MatchupAnalyzer<'c> {
    chart: &'c TypeChart,
    config: AnalyzerConfig,
}

impl Default for MatchupAnalyzer<'static> {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl MatchupAnalyzer<'static> {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_chart(TypeChart::global(), config)
    }
}

impl<'c> MatchupAnalyzer<'c> {
    pub fn with_chart(chart: &'c TypeChart, config: AnalyzerConfig) -> Self {
        Self { chart, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Suggestions in fixed order Safe, Balanced, Risky, or a single
    /// placeholder when either active creature has no type data.
    pub fn analyze(
        &self,
        player: &Creature,
        opponent: &Creature,
        roster: &Roster,
    ) -> Vec<BattleSuggestion> {
        let Some(report) = self.assess(player, opponent, roster) else {
            return vec![self.suggest(StrategyKind::Balanced, &Message::Analyzing)];
        };
        vec![
            self.safe_suggestion(&report),
            self.balanced_suggestion(&report),
            self.risky_suggestion(player),
        ]
    }

    pub fn assess<'r>(
        &self,
        player: &Creature,
        opponent: &Creature,
        roster: &'r Roster,
    ) -> Option<MatchupReport<'r>> {
        if !player.has_type_data() || !opponent.has_type_data() {
            debug!(
                "missing type data ({} / {}), skipping analysis",
                player.species, opponent.species
            );
            return None;
        }

        let max_incoming = self.chart.max_against(&opponent.types, &player.types);
        let (max_outgoing, best_offense) = self.best_offense(player, &opponent.types);
        let best_switch = self.best_switch(player, opponent, roster);

        debug!(
            "{} vs {}: incoming {}x, outgoing {}x via {:?}, switch {:?}",
            player.species,
            opponent.species,
            max_incoming,
            max_outgoing,
            best_offense.as_ref().map(OffenseSource::label),
            best_switch
                .as_ref()
                .map(|c| (c.creature.species.as_str(), c.score)),
        );

        Some(MatchupReport {
            max_incoming,
            max_outgoing,
            best_offense,
            best_switch,
        })
    }

    fn best_offense(
        &self,
        attacker: &Creature,
        defending: &[ElementalType],
    ) -> (f32, Option<OffenseSource>) {
        let (mut max, best_move) = self.best_move(attacker, defending);
        if let Some(mv) = best_move {
            return (max, Some(OffenseSource::Move(mv.name.clone())));
        }
        let mut best_type = None;
        for ty in &attacker.types {
            let mult = self.chart.dual(*ty, defending);
            if mult > max {
                max = mult;
                best_type = Some(*ty);
            }
        }
        (max, best_type.map(OffenseSource::Type))
    }

    /// Strictly-greater scan, so the first move wins ties.
    fn best_move<'m>(
        &self,
        attacker: &'m Creature,
        defending: &[ElementalType],
    ) -> (f32, Option<&'m Move>) {
        let mut max = 0.0;
        let mut best = None;
        for mv in attacker.attacking_moves() {
            let mult = self.chart.dual(mv.move_type, defending);
            if mult > max {
                max = mult;
                best = Some(mv);
            }
        }
        (max, best)
    }

    fn best_switch<'r>(
        &self,
        player: &Creature,
        opponent: &Creature,
        roster: &'r Roster,
    ) -> Option<SwitchCandidate<'r>> {
        let mut best: Option<SwitchCandidate<'r>> = None;
        for candidate in roster {
            if candidate.is_same_creature(player)
                || candidate.is_fainted()
                || !candidate.has_type_data()
            {
                continue;
            }
            let (score, move_label) = self.switch_score(candidate, opponent);
            let beats_best = best.as_ref().map_or(true, |b| score > b.score);
            if beats_best && score >= self.config.switch_score_floor {
                best = Some(SwitchCandidate {
                    creature: candidate,
                    move_label,
                    score,
                });
            }
        }
        best
    }

    fn switch_score(&self, candidate: &Creature, opponent: &Creature) -> (i32, String) {
        let cfg = &self.config;
        let mut score = 0;

        let incoming = self.chart.max_against(&opponent.types, &candidate.types);
        if incoming <= 0.5 {
            score += cfg.resist_bonus;
        }
        if incoming >= 2.0 {
            score -= cfg.weakness_penalty;
        }

        let (outgoing, label) = if candidate.moves.is_empty() {
            let mut max = 0.0;
            let mut label = None;
            for ty in &candidate.types {
                let mult = self.chart.dual(*ty, &opponent.types);
                if mult > max {
                    max = mult;
                    label = Some(*ty);
                }
            }
            (max, label.map(|ty| cfg.locale.type_strike_label(ty)))
        } else {
            let (max, mv) = self.best_move(candidate, &opponent.types);
            (max, mv.map(|m| m.name.clone()))
        };

        if outgoing >= 4.0 {
            score += cfg.double_super_effective_bonus;
        } else if outgoing >= 2.0 {
            score += cfg.super_effective_bonus;
        } else if outgoing <= 0.5 {
            score -= cfg.not_very_effective_penalty;
        }

        let label = label.unwrap_or_else(|| cfg.locale.type_strike_label(candidate.types[0]));
        (score, label)
    }

    fn safe_suggestion(&self, report: &MatchupReport<'_>) -> BattleSuggestion {
        let message = if report.max_incoming >= 2.0 {
            match &report.best_switch {
                Some(c) => Message::SwitchOutOfDanger {
                    species: &c.creature.species,
                    move_label: &c.move_label,
                },
                None => Message::Weakness {
                    multiplier: report.max_incoming,
                },
            }
        } else if report.max_incoming <= 0.5 {
            Message::SafeTank
        } else {
            match &report.best_switch {
                Some(c) if c.score >= self.config.neutral_switch_score => {
                    Message::ConsiderSwitch {
                        species: &c.creature.species,
                        move_label: &c.move_label,
                    }
                }
                _ => Message::PlaySteady,
            }
        };
        self.suggest(StrategyKind::Safe, &message)
    }

    fn balanced_suggestion(&self, report: &MatchupReport<'_>) -> BattleSuggestion {
        let message = if report.max_outgoing >= 2.0 {
            Message::UseSuperEffective {
                label: report
                    .best_offense
                    .as_ref()
                    .map_or("", OffenseSource::label),
                multiplier: report.max_outgoing,
            }
        } else if report.max_outgoing <= 0.5 {
            match &report.best_switch {
                Some(c) => Message::SwitchForOffense {
                    species: &c.creature.species,
                    move_label: &c.move_label,
                },
                None => Message::PoorCoverage,
            }
        } else {
            match report.best_move_name() {
                Some(move_name) => Message::UseNeutral { move_name },
                None => Message::NeutralDamage,
            }
        };
        self.suggest(StrategyKind::Balanced, &message)
    }

    fn risky_suggestion(&self, player: &Creature) -> BattleSuggestion {
        let critical =
            f64::from(player.current_hp) < f64::from(player.max_hp) * self.config.critical_hp_fraction;
        let message = if critical {
            Message::AllOrNothing
        } else if let Some(mv) = player.status_moves().find(|m| is_setup_move(&m.name)) {
            Message::UseStatusMove {
                move_name: &mv.name,
            }
        } else {
            Message::OffensivePressure
        };
        self.suggest(StrategyKind::Risky, &message)
    }

    fn suggest(&self, kind: StrategyKind, message: &Message<'_>) -> BattleSuggestion {
        let text = self.config.locale.render(message);
        BattleSuggestion {
            kind,
            title: text.title,
            description: text.description,
            icon: text.icon.to_string(),
        }
    }
}

/// Analyzes with the standard chart and default weights.
pub fn analyze_matchup(
    player: &Creature,
    opponent: &Creature,
    roster: &Roster,
) -> Vec<BattleSuggestion> {
    MatchupAnalyzer::default().analyze(player, opponent, roster)
}

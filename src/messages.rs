//! Text for every suggestion the analyzer can emit.
//!
//! The analyzer decides *which* message applies; this module decides how it
//! reads. Output is plain text plus a short glyph, never markup.

use crate::types::ElementalType;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ICON_ANALYZING: &str = "🔍";
pub const ICON_SWITCH: &str = "🔄";
pub const ICON_DEFENSIVE: &str = "🛡️";
pub const ICON_BALANCED: &str = "⚖️";
pub const ICON_OFFENSIVE: &str = "⚔️";
pub const ICON_STATUS: &str = "✨";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-br", alias = "pt")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match key.as_str() {
            "pt" | "ptbr" => Ok(Locale::PtBr),
            "en" | "enus" | "engb" => Ok(Locale::En),
            _ => bail!("Unknown locale {s} (use pt or en)"),
        }
    }
}

/// A suggestion before it is put into words.
#[derive(Clone, Debug, PartialEq)]
pub enum Message<'a> {
    Analyzing,
    SwitchOutOfDanger { species: &'a str, move_label: &'a str },
    Weakness { multiplier: f32 },
    SafeTank,
    ConsiderSwitch { species: &'a str, move_label: &'a str },
    PlaySteady,
    UseSuperEffective { label: &'a str, multiplier: f32 },
    SwitchForOffense { species: &'a str, move_label: &'a str },
    PoorCoverage,
    UseNeutral { move_name: &'a str },
    NeutralDamage,
    AllOrNothing,
    UseStatusMove { move_name: &'a str },
    OffensivePressure,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub title: String,
    pub description: String,
    pub icon: &'static str,
}

fn text(title: impl Into<String>, description: impl Into<String>, icon: &'static str) -> Text {
    Text {
        title: title.into(),
        description: description.into(),
        icon,
    }
}

/// `2x`, `0.5x`, `0.25x`.
pub fn format_multiplier(multiplier: f32) -> String {
    format!("{multiplier}x")
}

impl Locale {
    /// Label used for a bench creature that has no move data.
    pub fn type_strike_label(self, ty: ElementalType) -> String {
        match self {
            Locale::PtBr => format!("Golpe {ty}"),
            Locale::En => format!("{ty} strike"),
        }
    }

    pub fn render(self, message: &Message<'_>) -> Text {
        match self {
            Locale::PtBr => render_pt_br(message),
            Locale::En => render_en(message),
        }
    }
}

fn render_pt_br(message: &Message<'_>) -> Text {
    match *message {
        Message::Analyzing => text(
            "Analisando...",
            "Aguardando dados de tipos para sugerir estratégias.",
            ICON_ANALYZING,
        ),
        Message::SwitchOutOfDanger { species, move_label } => text(
            format!("Troque para {species}!"),
            format!("Você está em perigo. {species} pode usar {move_label} para virar o jogo!"),
            ICON_SWITCH,
        ),
        Message::Weakness { multiplier } => text(
            "Cuidado! Fraqueza",
            format!(
                "Você recebe {} de dano. Jogue defensivamente ou cure-se.",
                format_multiplier(multiplier)
            ),
            ICON_DEFENSIVE,
        ),
        Message::SafeTank => text(
            "Tanque Seguro",
            "Você resiste aos ataques dele. Mantenha-se em campo.",
            ICON_DEFENSIVE,
        ),
        Message::ConsiderSwitch { species, move_label } => text(
            format!("Considere {species}"),
            format!("{species} tem o golpe {move_label} que seria devastador aqui."),
            ICON_SWITCH,
        ),
        Message::PlaySteady => text(
            "Jogue com Calma",
            "Dano neutro recebido. Cure-se se necessário.",
            ICON_DEFENSIVE,
        ),
        Message::UseSuperEffective { label, multiplier } => text(
            format!("Use {label}"),
            format!(
                "Golpe super efetivo! Causa {} de dano.",
                format_multiplier(multiplier)
            ),
            ICON_BALANCED,
        ),
        Message::SwitchForOffense { species, move_label } => text(
            format!("Troque para {species}"),
            format!("Seus ataques não funcionam bem. {species} tem {move_label}."),
            ICON_SWITCH,
        ),
        Message::PoorCoverage => text(
            "Ataque Pouco Efetivo",
            "Tente golpes de cobertura ou status.",
            ICON_BALANCED,
        ),
        Message::UseNeutral { move_name } => text(
            format!("Use {move_name}"),
            "Sua melhor opção de dano neutro no momento.",
            ICON_BALANCED,
        ),
        Message::NeutralDamage => text(
            "Dano Neutro",
            "Use seus golpes mais fortes para causar dano constante.",
            ICON_BALANCED,
        ),
        Message::AllOrNothing => text(
            "Tudo ou Nada",
            "Vida crítica! Use seu golpe mais forte ou um item de cura agora.",
            ICON_OFFENSIVE,
        ),
        Message::UseStatusMove { move_name } => text(
            format!("Use {move_name}"),
            "Um bom momento para aplicar status ou aumentar seus atributos.",
            ICON_STATUS,
        ),
        Message::OffensivePressure => text(
            "Pressão Ofensiva",
            "Continue atacando para manter a pressão no oponente.",
            ICON_OFFENSIVE,
        ),
    }
}

fn render_en(message: &Message<'_>) -> Text {
    match *message {
        Message::Analyzing => text(
            "Analyzing...",
            "Waiting for type data before suggesting a strategy.",
            ICON_ANALYZING,
        ),
        Message::SwitchOutOfDanger { species, move_label } => text(
            format!("Switch to {species}!"),
            format!("You are in danger. {species} can use {move_label} to turn this around!"),
            ICON_SWITCH,
        ),
        Message::Weakness { multiplier } => text(
            "Careful! Weakness",
            format!(
                "You take {} damage. Play defensively or heal.",
                format_multiplier(multiplier)
            ),
            ICON_DEFENSIVE,
        ),
        Message::SafeTank => text(
            "Safe Tank",
            "You resist their attacks. Stay in.",
            ICON_DEFENSIVE,
        ),
        Message::ConsiderSwitch { species, move_label } => text(
            format!("Consider {species}"),
            format!("{species} has {move_label}, which would be devastating here."),
            ICON_SWITCH,
        ),
        Message::PlaySteady => text(
            "Play It Steady",
            "Neutral damage incoming. Heal if needed.",
            ICON_DEFENSIVE,
        ),
        Message::UseSuperEffective { label, multiplier } => text(
            format!("Use {label}"),
            format!(
                "Super effective! Deals {} damage.",
                format_multiplier(multiplier)
            ),
            ICON_BALANCED,
        ),
        Message::SwitchForOffense { species, move_label } => text(
            format!("Switch to {species}"),
            format!("Your attacks are not landing. {species} has {move_label}."),
            ICON_SWITCH,
        ),
        Message::PoorCoverage => text(
            "Not Very Effective",
            "Try coverage or status moves.",
            ICON_BALANCED,
        ),
        Message::UseNeutral { move_name } => text(
            format!("Use {move_name}"),
            "Your best neutral damage option right now.",
            ICON_BALANCED,
        ),
        Message::NeutralDamage => text(
            "Neutral Damage",
            "Use your strongest moves to deal steady damage.",
            ICON_BALANCED,
        ),
        Message::AllOrNothing => text(
            "All or Nothing",
            "Critical HP! Use your strongest move or a healing item now.",
            ICON_OFFENSIVE,
        ),
        Message::UseStatusMove { move_name } => text(
            format!("Use {move_name}"),
            "A good moment to inflict a status or boost your stats.",
            ICON_STATUS,
        ),
        Message::OffensivePressure => text(
            "Offensive Pressure",
            "Keep attacking to hold the pressure on your opponent.",
            ICON_OFFENSIVE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_print_in_shortest_form() {
        assert_eq!(format_multiplier(2.0), "2x");
        assert_eq!(format_multiplier(4.0), "4x");
        assert_eq!(format_multiplier(0.5), "0.5x");
        assert_eq!(format_multiplier(0.25), "0.25x");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("jp".parse::<Locale>().is_err());
    }

    #[test]
    fn strike_label_per_locale() {
        assert_eq!(
            Locale::PtBr.type_strike_label(ElementalType::Fire),
            "Golpe fire"
        );
        assert_eq!(Locale::En.type_strike_label(ElementalType::Fire), "fire strike");
    }

    #[test]
    fn weakness_cites_multiplier() {
        let t = Locale::En.render(&Message::Weakness { multiplier: 4.0 });
        assert!(t.description.contains("4x"));
        assert_eq!(t.icon, ICON_DEFENSIVE);
    }
}

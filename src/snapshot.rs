//! Decoding of the battle and party payloads fetched by the polling client.

use crate::model::{Creature, Move, MoveCategory};
use crate::types::ElementalType;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    Active,
    #[serde(other)]
    Inactive,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawMove {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawPokemon {
    pub species: String,
    /// Numbers arrive as floats once locale decimals are repaired.
    #[serde(default)]
    pub level: f64,
    pub hp: f64,
    pub max_hp: f64,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub moves: Vec<RawMove>,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BattleActor {
    pub name: String,
    pub side: String,
    #[serde(default)]
    pub pokemon: Vec<RawPokemon>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BattleSnapshot {
    pub status: BattleStatus,
    #[serde(default)]
    pub battle_id: Option<String>,
    #[serde(default)]
    pub actors: Vec<BattleActor>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The two active creatures of an ongoing battle.
#[derive(Clone, Debug, PartialEq)]
pub struct Matchup {
    pub player: Creature,
    pub opponent: Creature,
}

fn parse_category(raw: &str) -> Result<MoveCategory> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "physical" => Ok(MoveCategory::Physical),
        "special" => Ok(MoveCategory::Special),
        "status" => Ok(MoveCategory::Status),
        other => bail!("Unknown move category {other:?}"),
    }
}

impl RawMove {
    pub fn to_move(&self) -> Result<Move> {
        let move_type: ElementalType = self
            .move_type
            .parse()
            .with_context(|| format!("Move {} has an invalid type", self.name))?;
        let category = parse_category(&self.category)
            .with_context(|| format!("Move {} has an invalid category", self.name))?;
        Ok(Move::new(self.name.clone(), move_type, category))
    }
}

impl RawPokemon {
    pub fn to_creature(&self, slot: usize) -> Result<Creature> {
        let max_hp = self.max_hp.floor();
        if max_hp < 1.0 {
            bail!("{}: max_hp must be positive, got {}", self.species, self.max_hp);
        }
        if max_hp > f64::from(u32::MAX) {
            bail!("{}: max_hp {} is out of range", self.species, self.max_hp);
        }
        let current_hp = self.hp.floor().clamp(0.0, max_hp) as u32;
        let max_hp = max_hp as u32;
        let level = self.level.floor().clamp(0.0, f64::from(u32::MAX)) as u32;

        let types = match &self.types {
            Some(raw) => {
                if raw.len() > 2 {
                    bail!("{}: expected at most 2 types, got {}", self.species, raw.len());
                }
                raw.iter()
                    .map(|t| t.parse::<ElementalType>())
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("{} has an invalid type", self.species))?
            }
            None => Vec::new(),
        };
        let moves = self
            .moves
            .iter()
            .map(RawMove::to_move)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("{} has an invalid move", self.species))?;

        Ok(Creature {
            slot,
            species: self.species.clone(),
            level,
            current_hp,
            max_hp,
            types,
            moves,
        })
    }
}

fn is_player_side(side: &str) -> bool {
    matches!(side, "SideA" | "Player")
}

fn is_opponent_side(side: &str) -> bool {
    matches!(side, "SideB" | "Opponent")
}

impl BattleSnapshot {
    pub fn is_active(&self) -> bool {
        self.status == BattleStatus::Active
    }

    fn sides(&self) -> Option<(&BattleActor, &BattleActor)> {
        let player_idx = self
            .actors
            .iter()
            .position(|a| is_player_side(&a.side))
            .or_else(|| (!self.actors.is_empty()).then_some(0))?;
        let opponent_idx = self
            .actors
            .iter()
            .position(|a| is_opponent_side(&a.side))
            .or_else(|| (0..self.actors.len()).find(|idx| *idx != player_idx))?;
        if opponent_idx == player_idx {
            return None;
        }
        Some((&self.actors[player_idx], &self.actors[opponent_idx]))
    }

    /// Active creatures of both sides, or `None` outside an active battle.
    ///
    /// Each side's active creature is the first one it lists. The player's
    /// creature takes the slot of the matching roster member; when none
    /// matches it gets slot `roster.len()`, which no roster member holds.
    pub fn matchup(&self, roster: &[Creature]) -> Result<Option<Matchup>> {
        if !self.is_active() {
            return Ok(None);
        }
        let Some((player_side, opponent_side)) = self.sides() else {
            debug!("active battle without two sides, skipping");
            return Ok(None);
        };
        let (Some(player_raw), Some(opponent_raw)) =
            (player_side.pokemon.first(), opponent_side.pokemon.first())
        else {
            debug!("a side has no creatures yet, skipping");
            return Ok(None);
        };

        let mut player = player_raw
            .to_creature(roster.len())
            .with_context(|| format!("Invalid active creature for {}", player_side.name))?;
        let opponent = opponent_raw
            .to_creature(0)
            .with_context(|| format!("Invalid active creature for {}", opponent_side.name))?;

        match party_entry_for(roster, &player) {
            Some(member) => player.slot = member.slot,
            None => warn!(
                "active creature {} not found in party; no bench member will be excluded",
                player.species
            ),
        }

        Ok(Some(Matchup { player, opponent }))
    }
}

/// HP moves between the battle and party polls, so it only breaks ties
/// between otherwise identical members.
fn party_entry_for<'r>(roster: &'r [Creature], active: &Creature) -> Option<&'r Creature> {
    let mut same_entry = roster.iter().filter(|c| {
        c.species == active.species && c.level == active.level && c.max_hp == active.max_hp
    });
    let first = same_entry.next()?;
    if first.current_hp == active.current_hp {
        return Some(first);
    }
    Some(
        same_entry
            .find(|c| c.current_hp == active.current_hp)
            .unwrap_or(first),
    )
}

/// Converts the party payload into a roster with slots in party order.
pub fn roster_from_party(party: &[RawPokemon]) -> Result<Vec<Creature>> {
    party
        .iter()
        .enumerate()
        .map(|(slot, raw)| {
            raw.to_creature(slot)
                .with_context(|| format!("Failed to read party slot {}", slot + 1))
        })
        .collect()
}

/// Rewrites locale decimals such as `"hp":20,5` into `"hp":20.5`.
pub fn repair_decimal_commas(text: &str) -> String {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut copied = 0;
    let mut i = 0;
    while i + 1 < len {
        if bytes[i] == b'"' && bytes[i + 1] == b':' {
            let mut j = i + 2;
            if j < len && bytes[j] == b'-' {
                j += 1;
            }
            let digits = j;
            while j < len && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits && j + 1 < len && bytes[j] == b',' && bytes[j + 1].is_ascii_digit() {
                out.push_str(&text[copied..j]);
                out.push('.');
                copied = j + 1;
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    out.push_str(&text[copied..]);
    out
}

pub fn parse_battle(text: &str) -> Result<BattleSnapshot> {
    let snapshot: BattleSnapshot = serde_json::from_str(&repair_decimal_commas(text))
        .context("Failed to parse battle snapshot")?;
    if let Some(err) = &snapshot.error {
        warn!("battle snapshot reports an error: {err}");
    }
    Ok(snapshot)
}

pub fn parse_party(text: &str) -> Result<Vec<RawPokemon>> {
    serde_json::from_str(&repair_decimal_commas(text)).context("Failed to parse party list")
}

pub fn load_battle(path: &Path) -> Result<BattleSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read battle file at {}", path.display()))?;
    parse_battle(&raw).with_context(|| format!("Invalid battle snapshot in {}", path.display()))
}

pub fn load_party(path: &Path) -> Result<Vec<RawPokemon>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read party file at {}", path.display()))?;
    parse_party(&raw).with_context(|| format!("Invalid party list in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATTLE: &str = r#"{
        "status": "active",
        "battle_id": "b-1",
        "actors": [
            {"name": "Rival", "side": "SideB", "pokemon": [
                {"species": "Onix", "level": 20, "hp": 50, "max_hp": 50, "types": ["rock", "ground"]}
            ]},
            {"name": "Me", "side": "SideA", "pokemon": [
                {"species": "Charizard", "level": 36, "hp": 120, "max_hp": 120,
                 "types": ["Fire", "Flying"],
                 "moves": [{"name": "Flamethrower", "type": "fire", "category": "Special", "power": 90}]}
            ]}
        ]
    }"#;

    fn party() -> Vec<RawPokemon> {
        parse_party(
            r#"[
            {"species": "Pikachu", "level": 5, "hp": 20, "max_hp": 20, "types": ["electric"]},
            {"species": "Charizard", "level": 36, "hp": 120, "max_hp": 120, "types": ["fire", "flying"]}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn repairs_decimal_commas_only_after_keys() {
        assert_eq!(
            repair_decimal_commas(r#"{"health":18,5,"max_health":20,0}"#),
            r#"{"health":18.5,"max_health":20.0}"#
        );
        assert_eq!(repair_decimal_commas(r#"{"x":-3,25}"#), r#"{"x":-3.25}"#);
        assert_eq!(repair_decimal_commas(r#"{"a":1,"b":[1,2]}"#), r#"{"a":1,"b":[1,2]}"#);
    }

    #[test]
    fn resolves_sides_by_name_and_slot_by_party_entry() {
        let snapshot = parse_battle(BATTLE).unwrap();
        let roster = roster_from_party(&party()).unwrap();
        let matchup = snapshot.matchup(&roster).unwrap().unwrap();
        assert_eq!(matchup.player.species, "Charizard");
        assert_eq!(matchup.player.slot, 1);
        assert_eq!(matchup.opponent.species, "Onix");
        assert_eq!(
            matchup.player.types,
            vec![ElementalType::Fire, ElementalType::Flying]
        );
        assert_eq!(matchup.player.moves[0].category, MoveCategory::Special);
    }

    #[test]
    fn unmatched_active_gets_a_free_slot() {
        let snapshot = parse_battle(BATTLE).unwrap();
        let roster = roster_from_party(&party()[..1]).unwrap();
        let matchup = snapshot.matchup(&roster).unwrap().unwrap();
        assert_eq!(matchup.player.slot, 1);
        assert!(roster.iter().all(|c| !c.is_same_creature(&matchup.player)));
    }

    #[test]
    fn active_keeps_its_slot_when_hp_drifts_between_polls() {
        let snapshot = parse_battle(&BATTLE.replace(r#""hp": 120"#, r#""hp": 119"#)).unwrap();
        let roster = roster_from_party(&party()).unwrap();
        let matchup = snapshot.matchup(&roster).unwrap().unwrap();
        assert_eq!(matchup.player.current_hp, 119);
        assert_eq!(matchup.player.slot, 1);
    }

    #[test]
    fn matching_hp_picks_between_identical_members() {
        let party = parse_party(
            r#"[
            {"species": "Charizard", "level": 36, "hp": 0, "max_hp": 120, "types": ["fire"]},
            {"species": "Charizard", "level": 36, "hp": 120, "max_hp": 120, "types": ["fire"]}
        ]"#,
        )
        .unwrap();
        let roster = roster_from_party(&party).unwrap();
        let matchup = parse_battle(BATTLE).unwrap().matchup(&roster).unwrap().unwrap();
        assert_eq!(matchup.player.slot, 1);
    }

    #[test]
    fn locale_decimal_hp_is_read_and_floored() {
        let party = parse_party(
            r#"[{"species":"Pikachu","level":5,"hp":20,5,"max_hp":40,0,"types":["electric"]}]"#,
        )
        .unwrap();
        let pikachu = party[0].to_creature(0).unwrap();
        assert_eq!(pikachu.current_hp, 20);
        assert_eq!(pikachu.max_hp, 40);
        assert_eq!(pikachu.level, 5);
    }

    #[test]
    fn move_details_land_in_extras() {
        let snapshot = parse_battle(BATTLE).unwrap();
        let flamethrower = &snapshot.actors[1].pokemon[0].moves[0];
        assert_eq!(flamethrower.extras["power"], 90);
    }

    #[test]
    fn inactive_battle_has_no_matchup() {
        let snapshot = parse_battle(r#"{"status": "no_battle"}"#).unwrap();
        assert!(!snapshot.is_active());
        assert_eq!(snapshot.matchup(&[]).unwrap(), None);
    }

    #[test]
    fn missing_types_are_kept_empty() {
        let raw: RawPokemon =
            serde_json::from_str(r#"{"species": "Ditto", "hp": 10, "max_hp": 10}"#).unwrap();
        let creature = raw.to_creature(0).unwrap();
        assert!(!creature.has_type_data());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let raw: RawPokemon = serde_json::from_str(
            r#"{"species": "Terapagos", "hp": 10, "max_hp": 10, "types": ["stellar"]}"#,
        )
        .unwrap();
        assert!(raw.to_creature(0).is_err());
    }

    #[test]
    fn hp_is_clamped_and_max_hp_checked() {
        let raw: RawPokemon =
            serde_json::from_str(r#"{"species": "Gengar", "hp": -4, "max_hp": 110}"#).unwrap();
        assert!(raw.to_creature(0).unwrap().is_fainted());
        let broken: RawPokemon =
            serde_json::from_str(r#"{"species": "Gengar", "hp": 0, "max_hp": 0}"#).unwrap();
        assert!(broken.to_creature(0).is_err());
        let fractional: RawPokemon =
            serde_json::from_str(r#"{"species": "Gengar", "hp": 0, "max_hp": 0.5}"#).unwrap();
        assert!(fractional.to_creature(0).is_err());
    }
}

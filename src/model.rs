use crate::types::ElementalType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: ElementalType,
    pub category: MoveCategory,
}

impl Move {
    pub fn new(name: impl Into<String>, move_type: ElementalType, category: MoveCategory) -> Self {
        Self {
            name: name.into(),
            move_type,
            category,
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self.category, MoveCategory::Status)
    }
}

/// One battle participant as seen in a single snapshot.
///
/// `slot` is the creature's position in the player's party for the current
/// battle and is what "is this the active creature" compares; two members of
/// a roster may share a species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub slot: usize,
    pub species: String,
    #[serde(default)]
    pub level: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    /// Empty when the snapshot carried no type data.
    #[serde(default)]
    pub types: Vec<ElementalType>,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl Creature {
    pub fn new(slot: usize, species: impl Into<String>, types: &[ElementalType]) -> Self {
        Self {
            slot,
            species: species.into(),
            level: 50,
            current_hp: 100,
            max_hp: 100,
            types: types.to_vec(),
            moves: Vec::new(),
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_hp(mut self, current_hp: u32, max_hp: u32) -> Self {
        self.current_hp = current_hp;
        self.max_hp = max_hp;
        self
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type_data(&self) -> bool {
        !self.types.is_empty()
    }

    pub fn is_same_creature(&self, other: &Creature) -> bool {
        self.slot == other.slot
    }

    /// Non-status moves, in move order.
    pub fn attacking_moves(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(|m| !m.is_status())
    }

    pub fn status_moves(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(|m| m.is_status())
    }
}

pub type Roster = [Creature];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Safe,
    Balanced,
    Risky,
}

impl StrategyKind {
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Safe => "SAFE",
            StrategyKind::Balanced => "BALANCED",
            StrategyKind::Risky => "RISKY",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleSuggestion {
    #[serde(rename = "type")]
    pub kind: StrategyKind,
    pub title: String,
    pub description: String,
    pub icon: String,
}

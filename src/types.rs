// Ref: pokemon-showdown/sim/dex-data.ts: type chart multipliers (trimmed to multipliers only).
use anyhow::bail;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementalType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementalType {
    pub const ALL: [ElementalType; 18] = [
        ElementalType::Normal,
        ElementalType::Fire,
        ElementalType::Water,
        ElementalType::Electric,
        ElementalType::Grass,
        ElementalType::Ice,
        ElementalType::Fighting,
        ElementalType::Poison,
        ElementalType::Ground,
        ElementalType::Flying,
        ElementalType::Psychic,
        ElementalType::Bug,
        ElementalType::Rock,
        ElementalType::Ghost,
        ElementalType::Dragon,
        ElementalType::Dark,
        ElementalType::Steel,
        ElementalType::Fairy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementalType::Normal => "normal",
            ElementalType::Fire => "fire",
            ElementalType::Water => "water",
            ElementalType::Electric => "electric",
            ElementalType::Grass => "grass",
            ElementalType::Ice => "ice",
            ElementalType::Fighting => "fighting",
            ElementalType::Poison => "poison",
            ElementalType::Ground => "ground",
            ElementalType::Flying => "flying",
            ElementalType::Psychic => "psychic",
            ElementalType::Bug => "bug",
            ElementalType::Rock => "rock",
            ElementalType::Ghost => "ghost",
            ElementalType::Dragon => "dragon",
            ElementalType::Dark => "dark",
            ElementalType::Steel => "steel",
            ElementalType::Fairy => "fairy",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementalType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match ElementalType::ALL.iter().find(|t| t.name() == key) {
            Some(t) => Ok(*t),
            None => bail!("Unknown elemental type {s:?}"),
        }
    }
}

/// Immutable 18x18 effectiveness table, rows are the attacking type.
#[derive(Clone, Debug)]
pub struct TypeChart {
    table: [[f32; 18]; 18],
}

static STANDARD_CHART: Lazy<TypeChart> = Lazy::new(TypeChart::standard);

impl TypeChart {
    /// Builds the current-generation chart: neutral fill, then the exceptions.
    pub fn standard() -> Self {
        let mut table = [[1.0f32; 18]; 18];
        for attacking in ElementalType::ALL {
            let (weak, resisted, immune) = exceptions(attacking);
            let cells = &mut table[attacking.index()];
            for t in weak {
                cells[t.index()] = 2.0;
            }
            for t in resisted {
                cells[t.index()] = 0.5;
            }
            for t in immune {
                cells[t.index()] = 0.0;
            }
        }
        TypeChart { table }
    }

    /// Shared process-wide instance of [`TypeChart::standard`].
    pub fn global() -> &'static TypeChart {
        &STANDARD_CHART
    }

    pub fn single(&self, attacking: ElementalType, defending: ElementalType) -> f32 {
        self.table[attacking.index()][defending.index()]
    }

    /// Product over the defender's types; a single type is a plain lookup.
    pub fn dual(&self, attacking: ElementalType, defending: &[ElementalType]) -> f32 {
        defending
            .iter()
            .fold(1.0, |acc, t| acc * self.single(attacking, *t))
    }

    /// Highest multiplier any of `attackers` reaches against `defending`, 0 when empty.
    pub fn max_against(&self, attackers: &[ElementalType], defending: &[ElementalType]) -> f32 {
        attackers
            .iter()
            .map(|t| self.dual(*t, defending))
            .fold(0.0, f32::max)
    }
}

pub fn single_type_effectiveness(attacking: ElementalType, defending: ElementalType) -> f32 {
    TypeChart::global().single(attacking, defending)
}

pub fn dual_type_effectiveness(attacking: ElementalType, defending: &[ElementalType]) -> f32 {
    TypeChart::global().dual(attacking, defending)
}

type Exceptions = (&'static [ElementalType], &'static [ElementalType], &'static [ElementalType]);

fn row(
    super_effective: &'static [ElementalType],
    resisted: &'static [ElementalType],
    no_effect: &'static [ElementalType],
) -> Exceptions {
    (super_effective, resisted, no_effect)
}

fn exceptions(attacking: ElementalType) -> Exceptions {
    use ElementalType::*;
    match attacking {
        Normal => row(&[], &[Rock, Steel], &[Ghost]),
        Fire => row(&[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
        Water => row(&[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
        Electric => row(&[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
        Grass => row(
            &[Water, Ground, Rock],
            &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
            &[],
        ),
        Ice => row(&[Grass, Ground, Flying, Dragon], &[Fire, Water, Ice, Steel], &[]),
        Fighting => row(
            &[Normal, Ice, Rock, Dark, Steel],
            &[Poison, Flying, Psychic, Bug, Fairy],
            &[Ghost],
        ),
        Poison => row(&[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
        Ground => row(&[Fire, Electric, Poison, Rock, Steel], &[Grass, Bug], &[Flying]),
        Flying => row(&[Grass, Fighting, Bug], &[Electric, Rock, Steel], &[]),
        Psychic => row(&[Fighting, Poison], &[Psychic, Steel], &[Dark]),
        Bug => row(
            &[Grass, Psychic, Dark],
            &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
            &[],
        ),
        Rock => row(&[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
        Ghost => row(&[Ghost, Psychic], &[Dark], &[Normal]),
        Dragon => row(&[Dragon], &[Steel], &[Fairy]),
        Dark => row(&[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
        Steel => row(&[Rock, Ice, Fairy], &[Fire, Water, Electric, Steel], &[]),
        Fairy => row(&[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ElementalType::*;

    #[test]
    fn every_pair_is_a_chart_value() {
        let chart = TypeChart::standard();
        for a in ElementalType::ALL {
            for d in ElementalType::ALL {
                let m = chart.single(a, d);
                assert!(
                    [0.0, 0.5, 1.0, 2.0].contains(&m),
                    "{a} -> {d} gave {m}"
                );
            }
        }
    }

    #[test]
    fn known_matchups() {
        assert_eq!(single_type_effectiveness(Fire, Grass), 2.0);
        assert_eq!(single_type_effectiveness(Water, Dragon), 0.5);
        assert_eq!(single_type_effectiveness(Ground, Flying), 0.0);
        assert_eq!(single_type_effectiveness(Dragon, Fairy), 0.0);
        assert_eq!(single_type_effectiveness(Fairy, Dragon), 2.0);
        assert_eq!(single_type_effectiveness(Normal, Normal), 1.0);
    }

    #[test]
    fn dual_type_multiplies() {
        assert_eq!(dual_type_effectiveness(Ice, &[Dragon, Flying]), 4.0);
        assert_eq!(dual_type_effectiveness(Fire, &[Rock, Ground]), 0.5);
        assert_eq!(dual_type_effectiveness(Fire, &[Grass, Steel]), 4.0);
        assert_eq!(dual_type_effectiveness(Fire, &[Water, Rock]), 0.25);
        assert_eq!(dual_type_effectiveness(Electric, &[Water, Flying]), 4.0);
    }

    #[test]
    fn immunity_dominates() {
        assert_eq!(dual_type_effectiveness(Normal, &[Ghost, Steel]), 0.0);
        assert_eq!(dual_type_effectiveness(Electric, &[Water, Ground]), 0.0);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Fire".parse::<ElementalType>().unwrap(), Fire);
        assert_eq!(" STEEL ".parse::<ElementalType>().unwrap(), Steel);
        assert!("stellar".parse::<ElementalType>().is_err());
    }

    #[test]
    fn max_against_empty_is_zero() {
        let chart = TypeChart::global();
        assert_eq!(chart.max_against(&[], &[Fire]), 0.0);
        assert_eq!(chart.max_against(&[Water, Grass], &[Fire]), 2.0);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the 18 elemental type tags.
///
/// Declaration order is the enumeration order used by every "first type
/// found" rule in the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementalType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
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

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown elemental type: {0}")]
pub struct UnknownType(pub String);

impl ElementalType {
    pub const ALL: [Self; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Grass,
        Self::Electric,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Canonical lowercase key, as used by the provider (`"fire"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Grass => "grass",
            Self::Electric => "electric",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    #[must_use]
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Grass => "Grass",
            Self::Electric => "Electric",
            Self::Ice => "Ice",
            Self::Fighting => "Fighting",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Flying => "Flying",
            Self::Psychic => "Psychic",
            Self::Bug => "Bug",
            Self::Rock => "Rock",
            Self::Ghost => "Ghost",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Steel => "Steel",
            Self::Fairy => "Fairy",
        }
    }

    #[must_use]
    pub const fn korean_name(self) -> &'static str {
        match self {
            Self::Normal => "노말",
            Self::Fire => "불꽃",
            Self::Water => "물",
            Self::Grass => "풀",
            Self::Electric => "전기",
            Self::Ice => "얼음",
            Self::Fighting => "격투",
            Self::Poison => "독",
            Self::Ground => "땅",
            Self::Flying => "비행",
            Self::Psychic => "에스퍼",
            Self::Bug => "벌레",
            Self::Rock => "바위",
            Self::Ghost => "고스트",
            Self::Dragon => "드래곤",
            Self::Dark => "악",
            Self::Steel => "강철",
            Self::Fairy => "페어리",
        }
    }

    /// `"Fire (불꽃)"`
    #[must_use]
    pub fn bilingual_name(self) -> String {
        format!("{} ({})", self.english_name(), self.korean_name())
    }

    /// Look up by canonical key, case-insensitively.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key.trim()))
    }

    #[must_use]
    pub fn from_korean(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|t| t.korean_name() == name)
    }

    /// Position in enumeration order.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for ElementalType {
    type Err = UnknownType;

    /// Accepts either locale.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
            .or_else(|| Self::from_korean(s))
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (i, t) in ElementalType::ALL.iter().enumerate() {
            assert_eq!(t.ordinal(), i);
        }
    }

    #[test]
    fn names_round_trip_in_both_locales() {
        for t in ElementalType::ALL {
            assert_eq!(ElementalType::from_key(t.key()), Some(t));
            assert_eq!(ElementalType::from_korean(t.korean_name()), Some(t));
            assert_eq!(t.english_name().parse::<ElementalType>(), Ok(t));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("stellar".parse::<ElementalType>().is_err());
        assert_eq!(ElementalType::from_korean("불"), None);
    }

    #[test]
    fn serializes_as_lowercase_key() {
        let json = serde_json::to_string(&ElementalType::Electric).unwrap();
        assert_eq!(json, "\"electric\"");
    }
}

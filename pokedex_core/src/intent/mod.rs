//! Structured intents and the ordered classifier that produces them.

mod classifier;

pub use classifier::{RULES, Rule, classify, classify_normalized};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::knowledge::ElementalType;

/// One answerable question. Serializes as a tool call:
/// `{"type": "<tool name>", "parameters": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters")]
pub enum Intent {
    #[serde(rename = "quit")]
    Quit,

    /// `identifier` is a catalog number as text or a species name.
    #[serde(rename = "get_pokemon_info")]
    GetSpeciesInfo { identifier: String },

    #[serde(rename = "get_pokemon_stats")]
    GetSpeciesStats { identifier: String },

    #[serde(rename = "get_pokemon_by_type")]
    GetSpeciesByType {
        #[serde(rename = "type")]
        element: ElementalType,
    },

    #[serde(rename = "search_pokemon")]
    SearchSpecies { query: String },

    #[serde(rename = "get_pokemon_types")]
    ListAllTypes,

    #[serde(rename = "get_generation_pokemon")]
    GetGenerationSpecies { generation: u32 },

    #[serde(rename = "get_generation_type_pokemon")]
    GetGenerationTypeSpecies {
        generation: u32,
        #[serde(rename = "type")]
        element: ElementalType,
    },

    #[serde(rename = "get_type_vs_type_effectiveness")]
    TypeVsTypeEffectiveness {
        #[serde(rename = "type1")]
        attacker: ElementalType,
        #[serde(rename = "type2")]
        defender: ElementalType,
    },

    #[serde(rename = "get_type_effectiveness_info")]
    SingleTypeEffectivenessInfo {
        #[serde(rename = "type")]
        element: ElementalType,
    },

    #[serde(rename = "help")]
    Help,
}

impl Intent {
    /// Wire name of the variant, as used for tool calls.
    #[must_use]
    pub const fn tool_name(&self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::GetSpeciesInfo { .. } => "get_pokemon_info",
            Self::GetSpeciesStats { .. } => "get_pokemon_stats",
            Self::GetSpeciesByType { .. } => "get_pokemon_by_type",
            Self::SearchSpecies { .. } => "search_pokemon",
            Self::ListAllTypes => "get_pokemon_types",
            Self::GetGenerationSpecies { .. } => "get_generation_pokemon",
            Self::GetGenerationTypeSpecies { .. } => "get_generation_type_pokemon",
            Self::TypeVsTypeEffectiveness { .. } => "get_type_vs_type_effectiveness",
            Self::SingleTypeEffectivenessInfo { .. } => "get_type_effectiveness_info",
            Self::Help => "help",
        }
    }

    /// Intents answered from the species provider rather than the built-in
    /// tables. Only these travel over a relay.
    #[must_use]
    pub const fn is_provider_backed(&self) -> bool {
        matches!(
            self,
            Self::GetSpeciesInfo { .. }
                | Self::GetSpeciesStats { .. }
                | Self::GetSpeciesByType { .. }
                | Self::SearchSpecies { .. }
                | Self::ListAllTypes
        )
    }

    /// Parameters object; `{}` for variants without fields.
    #[must_use]
    pub fn parameters(&self) -> Value {
        serde_json::to_value(self)
            .ok()
            .and_then(|mut v| v.get_mut("parameters").map(Value::take))
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    /// `(tool name, arguments)` for provider-backed intents.
    #[must_use]
    pub fn tool_call(&self) -> Option<(&'static str, Value)> {
        self.is_provider_backed()
            .then(|| (self.tool_name(), self.parameters()))
    }

    /// Decode a tool call back into an intent. Empty or missing arguments
    /// are accepted for variants without fields.
    #[must_use]
    pub fn from_tool_call(name: &str, arguments: &Value) -> Option<Self> {
        let no_arguments = match arguments {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if no_arguments {
            let bare = serde_json::json!({ "type": name });
            if let Ok(intent) = serde_json::from_value(bare) {
                return Some(intent);
            }
        }
        let call = serde_json::json!({ "type": name, "parameters": arguments });
        serde_json::from_value(call).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_tagged_tool_call() {
        let intent = Intent::GetGenerationTypeSpecies {
            generation: 1,
            element: ElementalType::Dragon,
        };
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({"type": "get_generation_type_pokemon", "parameters": {"generation": 1, "type": "dragon"}})
        );
        assert_eq!(serde_json::to_value(Intent::Help).unwrap(), json!({"type": "help"}));
    }

    #[test]
    fn effectiveness_pair_uses_type1_type2() {
        let intent = Intent::TypeVsTypeEffectiveness {
            attacker: ElementalType::Electric,
            defender: ElementalType::Water,
        };
        assert_eq!(
            intent.parameters(),
            json!({"type1": "electric", "type2": "water"})
        );
    }

    #[test]
    fn only_provider_backed_intents_become_tool_calls() {
        let info = Intent::GetSpeciesInfo {
            identifier: "25".into(),
        };
        assert_eq!(
            info.tool_call(),
            Some(("get_pokemon_info", json!({"identifier": "25"})))
        );
        assert_eq!(
            Intent::ListAllTypes.tool_call(),
            Some(("get_pokemon_types", json!({})))
        );
        assert_eq!(Intent::Help.tool_call(), None);
        assert_eq!(
            Intent::GetGenerationSpecies { generation: 1 }.tool_call(),
            None
        );
    }

    #[test]
    fn tool_calls_decode_back() {
        assert_eq!(
            Intent::from_tool_call("search_pokemon", &json!({"query": "pika"})),
            Some(Intent::SearchSpecies {
                query: "pika".into()
            })
        );
        assert_eq!(
            Intent::from_tool_call("get_pokemon_types", &json!({})),
            Some(Intent::ListAllTypes)
        );
        assert_eq!(
            Intent::from_tool_call("help", &Value::Null),
            Some(Intent::Help)
        );
        assert_eq!(
            Intent::from_tool_call("get_pokemon_by_type", &json!({"type": "fire"})),
            Some(Intent::GetSpeciesByType {
                element: ElementalType::Fire
            })
        );
    }

    #[test]
    fn undecodable_tool_calls_are_rejected() {
        assert_eq!(Intent::from_tool_call("launch_rockets", &json!({})), None);
        assert_eq!(Intent::from_tool_call("get_pokemon_info", &json!({})), None);
        assert_eq!(
            Intent::from_tool_call("get_pokemon_by_type", &json!({"type": "shadow"})),
            None
        );
    }

    #[test]
    fn tool_name_matches_serialized_tag() {
        let samples = [
            Intent::Quit,
            Intent::ListAllTypes,
            Intent::SearchSpecies { query: "x".into() },
            Intent::SingleTypeEffectivenessInfo {
                element: ElementalType::Fire,
            },
        ];
        for intent in samples {
            let value = serde_json::to_value(&intent).unwrap();
            assert_eq!(value["type"], intent.tool_name());
        }
    }
}

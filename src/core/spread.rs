//! Spread configurations: durable frames, random counts, and forge mode.

use crate::core::catalog::House;
use crate::core::error::NirmanakayaError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadMode {
    Durable,
    Random,
    Forge,
}

impl SpreadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadMode::Durable => "durable",
            SpreadMode::Random => "random",
            SpreadMode::Forge => "forge",
        }
    }

    pub fn helper_text(&self) -> &'static str {
        match self {
            SpreadMode::Durable => "Mirror what's present — see your patterns clearly",
            SpreadMode::Random => "Reveal signatures — engage with what's active now",
            SpreadMode::Forge => "Work with intention — shape what's emerging",
        }
    }
}

impl fmt::Display for SpreadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Frame {
    pub name: &'static str,
    pub house: House,
    pub meaning: &'static str,
}

pub struct DurableSpread {
    pub key: &'static str,
    pub name: &'static str,
    pub count: usize,
    pub frames: &'static [Frame],
    pub description: &'static str,
}

pub struct RandomSpread {
    pub key: &'static str,
    pub name: &'static str,
    pub count: usize,
}

pub static DURABLE_SPREADS: [DurableSpread; 3] = [
    DurableSpread {
        key: "arc",
        name: "Arc",
        count: 3,
        frames: &[
            Frame { name: "Situation", house: House::Mind, meaning: "what is" },
            Frame { name: "Movement", house: House::Spirit, meaning: "what's in motion" },
            Frame { name: "Integration", house: House::Gestalt, meaning: "what completes" },
        ],
        description: "Situation → Movement → Integration",
    },
    DurableSpread {
        key: "quadraverse",
        name: "Quadraverse",
        count: 4,
        frames: &[
            Frame { name: "Spirit", house: House::Spirit, meaning: "inner knowing" },
            Frame { name: "Mind", house: House::Mind, meaning: "pattern and structure" },
            Frame { name: "Emotion", house: House::Emotion, meaning: "feeling and drive" },
            Frame { name: "Body", house: House::Body, meaning: "form and practice" },
        ],
        description: "The four aspects of self",
    },
    DurableSpread {
        // Key kept camelCase for share-link compatibility.
        key: "fiveHouse",
        name: "Five Houses",
        count: 5,
        frames: &[
            Frame { name: "Gestalt", house: House::Gestalt, meaning: "the integrative whole" },
            Frame { name: "Spirit", house: House::Spirit, meaning: "inner knowing" },
            Frame { name: "Mind", house: House::Mind, meaning: "pattern and structure" },
            Frame { name: "Emotion", house: House::Emotion, meaning: "feeling and drive" },
            Frame { name: "Body", house: House::Body, meaning: "form and practice" },
        ],
        description: "Your five domains of experience",
    },
];

pub static RANDOM_SPREADS: [RandomSpread; 5] = [
    RandomSpread { key: "one", name: "One", count: 1 },
    RandomSpread { key: "two", name: "Two", count: 2 },
    RandomSpread { key: "three", name: "Three", count: 3 },
    RandomSpread { key: "four", name: "Four", count: 4 },
    RandomSpread { key: "five", name: "Five", count: 5 },
];

pub fn durable_spread(key: &str) -> Option<&'static DurableSpread> {
    DURABLE_SPREADS.iter().find(|s| s.key == key)
}

pub fn random_spread(key: &str) -> Option<&'static RandomSpread> {
    RANDOM_SPREADS.iter().find(|s| s.key == key)
}

/// Card count for a mode/key pair. Forge always draws one.
pub fn spread_count(mode: SpreadMode, key: &str) -> Result<usize, NirmanakayaError> {
    match mode {
        SpreadMode::Forge => Ok(1),
        SpreadMode::Durable => durable_spread(key)
            .map(|s| s.count)
            .ok_or_else(|| NirmanakayaError::NotFound(format!("durable spread '{}'", key))),
        SpreadMode::Random => random_spread(key)
            .map(|s| s.count)
            .ok_or_else(|| NirmanakayaError::NotFound(format!("random spread '{}'", key))),
    }
}

/// Display name used in prompts and exports.
pub fn spread_display_name(mode: SpreadMode, key: &str) -> String {
    match mode {
        SpreadMode::Durable => durable_spread(key)
            .map(|s| s.name.to_string())
            .unwrap_or_else(|| key.to_string()),
        SpreadMode::Random => random_spread(key)
            .map(|s| format!("{} Emergent", s.name))
            .unwrap_or_else(|| key.to_string()),
        SpreadMode::Forge => "Forge".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counts_match_declared_counts() {
        for s in &DURABLE_SPREADS {
            assert_eq!(s.frames.len(), s.count);
        }
    }

    #[test]
    fn test_spread_count_dispatch() {
        assert_eq!(spread_count(SpreadMode::Durable, "arc").unwrap(), 3);
        assert_eq!(spread_count(SpreadMode::Random, "five").unwrap(), 5);
        assert_eq!(spread_count(SpreadMode::Forge, "ignored").unwrap(), 1);
        assert!(spread_count(SpreadMode::Durable, "nope").is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(spread_display_name(SpreadMode::Durable, "fiveHouse"), "Five Houses");
        assert_eq!(spread_display_name(SpreadMode::Random, "three"), "Three Emergent");
        assert_eq!(spread_display_name(SpreadMode::Forge, "three"), "Forge");
    }

    #[test]
    fn test_mode_serde_wire_values() {
        assert_eq!(serde_json::to_string(&SpreadMode::Durable).unwrap(), "\"durable\"");
        let m: SpreadMode = serde_json::from_str("\"forge\"").unwrap();
        assert_eq!(m, SpreadMode::Forge);
    }
}

//! User preferences: default draw settings, stance, and the collaborator
//! command. Stored as TOML in the data root; a missing file means
//! defaults.

use std::fs;

use serde::{Deserialize, Serialize};

use crate::core::error::NirmanakayaError;
use crate::core::spread::SpreadMode;
use crate::core::stance::{self, Stance};
use crate::core::store::Store;

// Scalar fields stay ahead of the stance table so TOML serialization
// never emits a value after a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    pub mode: SpreadMode,
    pub spread: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator_cmd: Option<String>,
    pub stance: Stance,
}

impl Default for Prefs {
    fn default() -> Prefs {
        Prefs {
            mode: SpreadMode::Random,
            spread: "three".to_string(),
            collaborator_cmd: None,
            stance: Stance::default(),
        }
    }
}

pub fn load(store: &Store) -> Result<Prefs, NirmanakayaError> {
    let path = store.prefs_path();
    if !path.exists() {
        return Ok(Prefs::default());
    }
    let content = fs::read_to_string(&path).map_err(NirmanakayaError::IoError)?;
    toml::from_str(&content)
        .map_err(|e| NirmanakayaError::ValidationError(format!("invalid prefs file: {}", e)))
}

pub fn save(store: &Store, prefs: &Prefs) -> Result<(), NirmanakayaError> {
    store.ensure()?;
    let content = toml::to_string_pretty(prefs)
        .map_err(|e| NirmanakayaError::ValidationError(format!("could not write prefs: {}", e)))?;
    fs::write(store.prefs_path(), content).map_err(NirmanakayaError::IoError)?;
    Ok(())
}

/// Apply one `prefs set` assignment. Stance accepts either a preset name
/// or `dimension=value`.
pub fn set_value(prefs: &mut Prefs, key: &str, value: &str) -> Result<(), NirmanakayaError> {
    match key {
        "mode" => {
            prefs.mode = match value {
                "durable" => SpreadMode::Durable,
                "random" => SpreadMode::Random,
                "forge" => SpreadMode::Forge,
                _ => {
                    return Err(NirmanakayaError::ValidationError(format!(
                        "unknown mode '{}': expected durable, random, or forge",
                        value
                    )))
                }
            };
        }
        "spread" => prefs.spread = value.to_string(),
        "stance" => {
            prefs.stance = stance::delivery_preset(value).ok_or_else(|| {
                NirmanakayaError::ValidationError(format!(
                    "unknown stance preset '{}': expected one of {}",
                    value,
                    stance::PRESET_KEYS.join(", ")
                ))
            })?;
        }
        "collaborator_cmd" => {
            prefs.collaborator_cmd = if value.trim().is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        _ => {
            return Err(NirmanakayaError::ValidationError(format!(
                "unknown preference '{}': expected mode, spread, stance, or collaborator_cmd",
                key
            )))
        }
    }
    Ok(())
}

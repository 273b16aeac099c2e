//! Share codec: a session's draws, spread, stance, and question packed
//! into a base64 token that reconstructs the same reading elsewhere.
//!
//! Decoding is deliberately forgiving. Older tokens carried a flat
//! persona key instead of a stance object and may omit seriousness or
//! complexity; those all map onto current stances. Anything actually
//! malformed decodes to None instead of an error.

use crate::core::draw::Draw;
use crate::core::spread::SpreadMode;
use crate::core::stance::{self, Complexity, Stance};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SharePayload<'a> {
    d: &'a [Draw],
    t: SpreadMode,
    k: &'a str,
    s: &'a Stance,
    q: &'a str,
}

#[derive(Deserialize)]
struct RawPayload {
    d: Vec<Draw>,
    t: SpreadMode,
    k: String,
    #[serde(default)]
    s: Option<Stance>,
    #[serde(default)]
    p: Option<String>,
    #[serde(default)]
    q: Option<String>,
}

/// A decoded share token.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedReading {
    pub draws: Vec<Draw>,
    pub mode: SpreadMode,
    pub spread_key: String,
    pub stance: Stance,
    pub question: String,
}

pub fn encode_draws(
    draws: &[Draw],
    mode: SpreadMode,
    spread_key: &str,
    stance: &Stance,
    question: &str,
) -> String {
    let payload = SharePayload { d: draws, t: mode, k: spread_key, s: stance, q: question };
    // Static payload shape; serialization cannot fail.
    let json = serde_json::to_string(&payload).unwrap_or_default();
    STANDARD.encode(json.as_bytes())
}

/// Pre-stance tokens named one of these personas instead of a stance.
fn legacy_persona_stance(persona: &str) -> Stance {
    let preset_key = match persona {
        "seeker" | "gentleGuide" => "kind",
        "philosopher" | "deepDive" => "wise",
        "fullTransmission" => "oracle",
        // "practitioner", "direct", "quickTake", "clearView" named a
        // preset that no longer exists; Kind is the closest survivor.
        _ => "kind",
    };
    let mut s = stance::delivery_preset(preset_key).unwrap_or_default();
    // Personas predate the complexity dimension.
    s.complexity = Complexity::Teacher;
    s
}

pub fn decode_draws(encoded: &str) -> Option<SharedReading> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    let raw: RawPayload = serde_json::from_slice(&bytes).ok()?;
    let stance = match (raw.s, raw.p) {
        (Some(s), _) => s,
        (None, Some(p)) => legacy_persona_stance(&p),
        (None, None) => Stance::default(),
    };
    Some(SharedReading {
        draws: raw.d,
        mode: raw.t,
        spread_key: raw.k,
        stance,
        question: raw.q.unwrap_or_default(),
    })
}

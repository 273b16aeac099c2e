//! Timestamp and event-id helpers shared by the CLI envelopes and journal.

use serde_json::Value as JsonValue;
use ulid::Ulid;

/// Unix-epoch seconds as a plain integer, used for journal rows.
pub fn now_epoch_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    format!("{}Z", now_epoch_secs())
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}

/// Standard command response envelope printed by mutating CLI surfaces.
pub fn command_envelope(cmd: &str, status: &str, extra: JsonValue) -> JsonValue {
    let mut base = serde_json::json!({
        "envelope_version": "1.0.0",
        "ts": now_epoch_z(),
        "event_id": new_event_id(),
        "cmd": cmd,
        "status": status
    });
    if let (Some(base_obj), Some(extra_obj)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra_obj {
            base_obj.insert(k.clone(), v.clone());
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_z_is_numeric_with_suffix() {
        let result = now_epoch_z();
        assert!(result.ends_with('Z'));
        assert!(result.trim_end_matches('Z').parse::<u64>().is_ok());
    }

    #[test]
    fn test_event_ids_are_unique_ulids() {
        let id1 = new_event_id();
        let id2 = new_event_id();
        assert_ne!(id1, id2);
        assert!(Ulid::from_string(&id1).is_ok());
    }

    #[test]
    fn test_command_envelope_merges_extra() {
        let envelope = command_envelope(
            "draw.new",
            "ok",
            serde_json::json!({"session": "01J", "count": 3}),
        );
        assert_eq!(envelope["cmd"], "draw.new");
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["count"], 3);
        assert!(envelope["ts"].is_string());
        assert!(envelope["event_id"].is_string());
    }
}

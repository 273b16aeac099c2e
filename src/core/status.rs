//! The four-status imbalance model. Status 1 never produces a correction.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Status {
    Balanced = 1,
    TooMuch = 2,
    TooLittle = 3,
    Unacknowledged = 4,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Balanced,
        Status::TooMuch,
        Status::TooLittle,
        Status::Unacknowledged,
    ];

    pub fn info(&self) -> &'static StatusInfo {
        match self {
            Status::Balanced => &STATUS_INFO[0],
            Status::TooMuch => &STATUS_INFO[1],
            Status::TooLittle => &STATUS_INFO[2],
            Status::Unacknowledged => &STATUS_INFO[3],
        }
    }

    pub fn is_imbalanced(&self) -> bool {
        *self != Status::Balanced
    }

    /// Status phrase for a signature name: "Too Much Drive", "Balanced Drive".
    pub fn phrase(&self, name: &str) -> String {
        let info = self.info();
        if info.prefix.is_empty() {
            format!("Balanced {}", name)
        } else {
            format!("{} {}", info.prefix, name)
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Status::Balanced),
            2 => Ok(Status::TooMuch),
            3 => Ok(Status::TooLittle),
            4 => Ok(Status::Unacknowledged),
            other => Err(format!("status {} out of range (valid: 1..=4)", other)),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        status as u8
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

pub struct StatusInfo {
    pub name: &'static str,
    pub orientation: &'static str,
    pub desc: &'static str,
    /// Phrase prefix; empty for Balanced.
    pub prefix: &'static str,
    pub description: &'static str,
    pub extended: &'static str,
}

pub static STATUS_INFO: [StatusInfo; 4] = [
    StatusInfo {
        name: "Balanced",
        orientation: "Now-aligned",
        desc: "Authentic expression",
        prefix: "",
        description: "Authentic expression — the function is operating correctly, present-centered, integrated.",
        extended: "When an archetype is balanced, it expresses naturally without excess or deficiency. There's no correction needed because the energy is flowing appropriately for the moment. This is the optimal state — full presence without distortion.",
    },
    StatusInfo {
        name: "Too Much",
        orientation: "Future-projected",
        desc: "Over-expressing",
        prefix: "Too Much",
        description: "Over-expressing — anxiety, control, pushing ahead of natural timing.",
        extended: "Too Much indicates future-projection: energy is pushed forward, grasping at what hasn't arrived. Often shows up as anxiety, fear, or the need to control outcomes. The correction is the Diagonal partner — the opposite pole that counterbalances the excess and rotates runaway momentum back into alignment.",
    },
    StatusInfo {
        name: "Too Little",
        orientation: "Past-anchored",
        desc: "Under-expressing",
        prefix: "Too Little",
        description: "Under-expressing — withdrawn, avoidant, not fully arriving in the present.",
        extended: "Too Little indicates past-anchoring: energy is withdrawn, held back, caught in what was rather than what is. Often shows up as regret, shame, or guilt keeping you from fully arriving in the present. The correction is the Vertical partner — the same archetypal identity at the other scale, which restores recursion and reconnects you to your complete capacity.",
    },
    StatusInfo {
        name: "Unacknowledged",
        orientation: "Shadow",
        desc: "Operating without awareness",
        prefix: "Unacknowledged",
        description: "Operating without awareness — steering without conscious integration.",
        extended: "Unacknowledged is shadow operation: this energy is running but you can't see it. It's influencing behavior without consent or alignment. The correction is the Reduction pair — returning to the generating source to make the shadow visible.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_u8() {
        for s in Status::ALL {
            let raw: u8 = s.into();
            assert_eq!(Status::try_from(raw).unwrap(), s);
        }
        assert!(Status::try_from(0).is_err());
        assert!(Status::try_from(5).is_err());
    }

    #[test]
    fn test_status_serde_as_bare_integer() {
        let json = serde_json::to_string(&Status::TooLittle).unwrap();
        assert_eq!(json, "3");
        let back: Status = serde_json::from_str("4").unwrap();
        assert_eq!(back, Status::Unacknowledged);
        assert!(serde_json::from_str::<Status>("9").is_err());
    }

    #[test]
    fn test_phrase_prefixes() {
        assert_eq!(Status::Balanced.phrase("Drive"), "Balanced Drive");
        assert_eq!(Status::TooMuch.phrase("Drive"), "Too Much Drive");
        assert_eq!(Status::Unacknowledged.phrase("Wisdom"), "Unacknowledged Wisdom");
    }

    #[test]
    fn test_orientations() {
        assert_eq!(Status::Balanced.info().orientation, "Now-aligned");
        assert_eq!(Status::TooMuch.info().orientation, "Future-projected");
        assert_eq!(Status::TooLittle.info().orientation, "Past-anchored");
        assert_eq!(Status::Unacknowledged.info().orientation, "Shadow");
    }
}

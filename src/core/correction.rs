//! The correction engine: fixed lookup tables mapping an imbalanced
//! signature to its rebalancing target(s).
//!
//! The pairing tables are canonical, hand-carried values. They must never
//! be regenerated from a formula: Archetype pairs are a curated map, not
//! a derivable one, and the tables here are pinned by tests. Bounds are
//! the exception in that they correct mechanically by channel-cross plus
//! number mirror, and Agents inherit their embodied Archetype's correction.

use crate::core::catalog::{self, Channel, Signature};
use crate::core::error::NirmanakayaError;
use crate::core::status::Status;
use serde::Serialize;
use std::fmt;

/// Too Much resolves to the diagonal partner.
pub const DIAGONAL_PAIRS: [u8; 22] = [
    19, // Potential → Actualization
    20, // Will → Awareness
    17, // Wisdom → Inspiration
    18, // Nurturing → Imagination
    15, // Order → Abstraction
    16, // Culture → Breakthrough
    13, // Compassion → Change
    14, // Drive → Balance
    11, // Fortitude → Equity
    12, // Discipline → Sacrifice
    1,  // Cycles → Will
    8,  // Equity → Fortitude
    9,  // Sacrifice → Discipline
    6,  // Change → Compassion
    7,  // Balance → Drive
    4,  // Abstraction → Order
    5,  // Breakthrough → Culture
    2,  // Inspiration → Wisdom
    3,  // Imagination → Nurturing
    0,  // Actualization → Potential
    1,  // Awareness → Will
    0,  // Wholeness → Potential
];

/// Too Little resolves to the vertical partner.
pub const VERTICAL_PAIRS: [u8; 22] = [
    20, // Potential → Awareness
    19, // Will → Actualization
    18, // Wisdom → Imagination
    17, // Nurturing → Inspiration
    16, // Order → Breakthrough
    15, // Culture → Abstraction
    14, // Compassion → Balance
    13, // Drive → Change
    12, // Fortitude → Sacrifice
    11, // Discipline → Equity
    19, // Cycles → Actualization
    9,  // Equity → Discipline
    8,  // Sacrifice → Fortitude
    7,  // Change → Drive
    6,  // Balance → Compassion
    5,  // Abstraction → Culture
    4,  // Breakthrough → Order
    3,  // Inspiration → Nurturing
    2,  // Imagination → Wisdom
    1,  // Actualization → Will
    0,  // Awareness → Potential
    20, // Wholeness → Awareness
];

/// Unacknowledged resolves to the reduction pair. Six positions have no
/// reduction target: the four Gestalt archetypes and both Portals.
pub const REDUCTION_PAIRS: [Option<u8>; 22] = [
    None,     // Potential
    None,     // Will
    Some(11), // Wisdom → Equity
    Some(12), // Nurturing → Sacrifice
    Some(13), // Order → Change
    Some(14), // Culture → Balance
    Some(15), // Compassion → Abstraction
    Some(16), // Drive → Breakthrough
    Some(17), // Fortitude → Inspiration
    Some(18), // Discipline → Imagination
    None,     // Cycles
    Some(2),  // Equity → Wisdom
    Some(3),  // Sacrifice → Nurturing
    Some(4),  // Change → Order
    Some(5),  // Balance → Culture
    Some(6),  // Abstraction → Compassion
    Some(7),  // Breakthrough → Drive
    Some(8),  // Inspiration → Fortitude
    Some(9),  // Imagination → Discipline
    None,     // Actualization
    None,     // Awareness
    None,     // Wholeness
];

/// Status-keyed channel crossing for Bound corrections. Only imbalanced
/// statuses have entries.
pub fn channel_crossing(status: Status, channel: Channel) -> Option<Channel> {
    use Channel::*;
    match status {
        Status::Balanced => None,
        Status::TooMuch => Some(match channel {
            Cognition => Intent,
            Intent => Cognition,
            Resonance => Structure,
            Structure => Resonance,
        }),
        Status::TooLittle => Some(match channel {
            Cognition => Structure,
            Intent => Resonance,
            Resonance => Intent,
            Structure => Cognition,
        }),
        Status::Unacknowledged => Some(match channel {
            Cognition => Resonance,
            Intent => Structure,
            Resonance => Cognition,
            Structure => Intent,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Diagonal,
    Vertical,
    Reduction,
}

impl CorrectionKind {
    /// Display label used in correction sentences.
    pub fn as_upper(&self) -> &'static str {
        match self {
            CorrectionKind::Diagonal => "DIAGONAL",
            CorrectionKind::Vertical => "VERTICAL",
            CorrectionKind::Reduction => "REDUCTION",
        }
    }

    /// Bound corrections label their kind from the status alone.
    fn from_status(status: Status) -> Option<CorrectionKind> {
        match status {
            Status::Balanced => None,
            Status::TooMuch => Some(CorrectionKind::Diagonal),
            Status::TooLittle => Some(CorrectionKind::Vertical),
            Status::Unacknowledged => Some(CorrectionKind::Reduction),
        }
    }
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CorrectionKind::Diagonal => "diagonal",
            CorrectionKind::Vertical => "vertical",
            CorrectionKind::Reduction => "reduction",
        };
        f.write_str(s)
    }
}

/// A computed rebalancing target. `targets` stays list-capable even though
/// every current table entry is single-valued.
#[derive(Debug, Clone, Serialize)]
pub struct Correction {
    pub kind: CorrectionKind,
    pub targets: Vec<u8>,
    /// Bound corrections only: "7→4".
    pub number_mirror: Option<String>,
    /// Bound corrections only: "Intent→Resonance".
    pub channel_cross: Option<String>,
}

impl Correction {
    pub fn primary_target(&self) -> Option<u8> {
        self.targets.first().copied()
    }
}

fn archetype_correction(archetype_id: u8, status: Status) -> Option<Correction> {
    let idx = archetype_id as usize;
    let (kind, target) = match status {
        Status::Balanced => return None,
        Status::TooMuch => (CorrectionKind::Diagonal, Some(DIAGONAL_PAIRS[idx])),
        Status::TooLittle => (CorrectionKind::Vertical, Some(VERTICAL_PAIRS[idx])),
        Status::Unacknowledged => (CorrectionKind::Reduction, REDUCTION_PAIRS[idx]),
    };
    target.map(|t| Correction {
        kind,
        targets: vec![t],
        number_mirror: None,
        channel_cross: None,
    })
}

fn bound_correction(bound: &catalog::Bound, status: Status) -> Option<Correction> {
    let kind = CorrectionKind::from_status(status)?;
    let target_channel = channel_crossing(status, bound.channel)?;
    let target_number = 11 - bound.number;
    let target = catalog::bound_for(target_channel, target_number)?;
    Some(Correction {
        kind,
        targets: vec![target.id],
        number_mirror: Some(format!("{}→{}", bound.number, target_number)),
        channel_cross: Some(format!("{}→{}", bound.channel, target_channel)),
    })
}

/// Compute the correction for any signature and status. Balanced always
/// yields None, as do Archetypes (and Agents embodying Archetypes) with no
/// reduction pair.
pub fn compute_correction(
    signature_id: u8,
    status: Status,
) -> Result<Option<Correction>, NirmanakayaError> {
    let sig = catalog::signature(signature_id)?;
    if status == Status::Balanced {
        return Ok(None);
    }
    Ok(match sig {
        Signature::Archetype(a) => archetype_correction(a.id, status),
        Signature::Bound(b) => bound_correction(b, status),
        Signature::Agent(a) => archetype_correction(a.archetype, status),
    })
}

/// Render the correction as the sentence used in prompts and exports.
pub fn correction_text(correction: &Correction) -> Option<String> {
    if correction.targets.len() == 1 {
        let sig = catalog::signature(correction.targets[0]).ok()?;
        let text = match sig {
            Signature::Bound(b) => format!("{} via {} duality", b.name, correction.kind.as_upper()),
            Signature::Archetype(a) => {
                format!("Position {} {} via {} duality", a.id, a.name, correction.kind.as_upper())
            }
            Signature::Agent(a) => format!("{} via {} duality", a.name, correction.kind.as_upper()),
        };
        return Some(text);
    }
    let parts: Vec<String> = correction
        .targets
        .iter()
        .filter_map(|&t| catalog::archetype(t).ok())
        .map(|a| format!("Position {} {}", a.id, a.name))
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

//! Static-data validation gates.
//!
//! The catalog and correction tables are hand-carried constants. These
//! gates catch editing mistakes before they reach a reading: a renumbered
//! pair, a bound pointing at the wrong archetype, a preset missing an
//! axis. Every gate runs against compiled-in data only, so a clean
//! `validate` on one machine means a clean `validate` everywhere.

use crate::core::catalog::{self, Channel, House, Role, SignatureKind};
use crate::core::correction;
use crate::core::error::NirmanakayaError;
use crate::core::spread;
use crate::core::stance;
use crate::core::status::Status;
use crate::core::tui::{self, ItemStatus};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Instant;

#[derive(Debug, Serialize)]
pub struct GateResult {
    pub gate: &'static str,
    pub passed: bool,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

fn fail(fails: &mut Vec<String>, message: String) {
    fails.push(message);
}

fn gate_catalog_integrity(fails: &mut Vec<String>) {
    let all: Vec<_> = catalog::all_signatures().collect();
    if all.len() != catalog::SIGNATURE_COUNT as usize {
        fail(
            fails,
            format!("catalog yields {} signatures, want {}", all.len(), catalog::SIGNATURE_COUNT),
        );
    }

    let mut names = std::collections::HashSet::new();
    for sig in &all {
        let id = sig.id();
        let want_kind = if id < catalog::BOUND_BASE {
            SignatureKind::Archetype
        } else if id < catalog::AGENT_BASE {
            SignatureKind::Bound
        } else {
            SignatureKind::Agent
        };
        if sig.kind() != want_kind {
            fail(fails, format!("signature {} has kind {}, want {}", id, sig.kind(), want_kind));
        }
        if sig.name().is_empty() {
            fail(fails, format!("signature {} has an empty name", id));
        }
        if sig.traditional().is_empty() {
            fail(fails, format!("signature {} has an empty traditional name", id));
        }
        if sig.description().is_empty() {
            fail(fails, format!("signature {} has an empty description", id));
        }
        if !names.insert(sig.name()) {
            fail(fails, format!("signature name '{}' appears twice", sig.name()));
        }
    }

    // Table positions must agree with the IDs stamped on the entries.
    for (idx, a) in catalog::ARCHETYPES.iter().enumerate() {
        if a.id as usize != idx {
            fail(fails, format!("archetype at index {} carries id {}", idx, a.id));
        }
    }
    for (idx, b) in catalog::BOUNDS.iter().enumerate() {
        if (b.id - catalog::BOUND_BASE) as usize != idx {
            fail(fails, format!("bound at index {} carries id {}", idx, b.id));
        }
    }
    for (idx, a) in catalog::AGENTS.iter().enumerate() {
        if (a.id - catalog::AGENT_BASE) as usize != idx {
            fail(fails, format!("agent at index {} carries id {}", idx, a.id));
        }
    }

    if catalog::signature(catalog::SIGNATURE_COUNT).is_ok() {
        fail(fails, "signature lookup accepts an out-of-range id".to_string());
    }
}

fn gate_house_partition(fails: &mut Vec<String>) {
    for house in House::ALL {
        let members: Vec<_> =
            catalog::ARCHETYPES.iter().filter(|a| a.house == house).collect();
        let want = match house {
            House::Portal => 2,
            _ => 4,
        };
        if members.len() != want {
            fail(
                fails,
                format!("house {} holds {} archetypes, want {}", house.as_str(), members.len(), want),
            );
        }
        match house {
            House::Gestalt | House::Portal => {
                for a in members {
                    if a.channel.is_some() {
                        fail(
                            fails,
                            format!("{} archetype {} should carry no channel", house.as_str(), a.name),
                        );
                    }
                }
            }
            _ => {
                // Embodied houses hold one archetype per channel.
                for channel in Channel::ALL {
                    let n = members.iter().filter(|a| a.channel == Some(channel)).count();
                    if n != 1 {
                        fail(
                            fails,
                            format!(
                                "house {} holds {} archetypes on channel {}, want 1",
                                house.as_str(),
                                n,
                                channel.as_str()
                            ),
                        );
                    }
                }
            }
        }
    }
}

fn gate_derivation_consistency(fails: &mut Vec<String>) {
    // Bounds: ten per channel, numbers 1..=10 once each, associations
    // mirrored around the 5/6 seam with Gestalt anchors at 1 and 10.
    for channel in Channel::ALL {
        let members: Vec<_> =
            catalog::BOUNDS.iter().filter(|b| b.channel == channel).collect();
        if members.len() != 10 {
            fail(
                fails,
                format!("channel {} holds {} bounds, want 10", channel.as_str(), members.len()),
            );
            continue;
        }
        for number in 1..=10u8 {
            match catalog::bound_for(channel, number) {
                None => fail(
                    fails,
                    format!("no bound at {} {}", channel.as_str(), number),
                ),
                Some(b) => {
                    let arch = match catalog::archetype(b.archetype) {
                        Ok(a) => a,
                        Err(_) => {
                            fail(
                                fails,
                                format!("bound {} points at invalid archetype {}", b.name, b.archetype),
                            );
                            continue;
                        }
                    };
                    if matches!(number, 1 | 10) {
                        if arch.house != House::Gestalt {
                            fail(
                                fails,
                                format!("bound {} anchor should be a Gestalt archetype", b.name),
                            );
                        }
                    } else if arch.channel != Some(channel) {
                        fail(
                            fails,
                            format!(
                                "bound {} expresses {} which is not on channel {}",
                                b.name,
                                arch.name,
                                channel.as_str()
                            ),
                        );
                    }
                    if let Some(mirror) = catalog::bound_for(channel, 11 - number) {
                        if mirror.archetype != b.archetype {
                            fail(
                                fails,
                                format!(
                                    "bounds {} and {} should share an associated archetype",
                                    b.name, mirror.name
                                ),
                            );
                        }
                    }
                }
            }
        }
    }

    // Agents: one per channel/role cell, embodying the archetype of that
    // channel in the role's house.
    let role_house = |role: Role| match role {
        Role::Initiate => House::Spirit,
        Role::Catalyst => House::Mind,
        Role::Steward => House::Emotion,
        Role::Executor => House::Body,
    };
    for channel in Channel::ALL {
        for role in Role::ALL {
            let cell: Vec<_> = catalog::AGENTS
                .iter()
                .filter(|a| a.channel == channel && a.role == role)
                .collect();
            if cell.len() != 1 {
                fail(
                    fails,
                    format!(
                        "{} of {} appears {} times, want 1",
                        role.as_str(),
                        channel.as_str(),
                        cell.len()
                    ),
                );
                continue;
            }
            let agent = cell[0];
            match catalog::archetype(agent.archetype) {
                Err(_) => fail(
                    fails,
                    format!("agent {} points at invalid archetype {}", agent.name, agent.archetype),
                ),
                Ok(arch) => {
                    if arch.channel != Some(channel) {
                        fail(
                            fails,
                            format!(
                                "agent {} embodies {} which is not on channel {}",
                                agent.name,
                                arch.name,
                                channel.as_str()
                            ),
                        );
                    }
                    if arch.house != role_house(role) {
                        fail(
                            fails,
                            format!(
                                "agent {} embodies {} outside the {} house",
                                agent.name,
                                arch.name,
                                role_house(role).as_str()
                            ),
                        );
                    }
                }
            }
        }
    }
}

fn gate_correction_tables(fails: &mut Vec<String>) {
    for (idx, &target) in correction::DIAGONAL_PAIRS.iter().enumerate() {
        if target >= catalog::ARCHETYPE_COUNT {
            fail(fails, format!("diagonal pair {} targets out-of-range {}", idx, target));
        }
        if target as usize == idx {
            fail(fails, format!("diagonal pair {} targets itself", idx));
        }
    }
    for (idx, &target) in correction::VERTICAL_PAIRS.iter().enumerate() {
        if target >= catalog::ARCHETYPE_COUNT {
            fail(fails, format!("vertical pair {} targets out-of-range {}", idx, target));
        }
        if target as usize == idx {
            fail(fails, format!("vertical pair {} targets itself", idx));
        }
    }

    let null_positions: Vec<usize> = correction::REDUCTION_PAIRS
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_none())
        .map(|(i, _)| i)
        .collect();
    if null_positions != vec![0, 1, 10, 19, 20, 21] {
        fail(
            fails,
            format!("reduction nulls sit at {:?}, want the Gestalt and Portal positions", null_positions),
        );
    }
    for (idx, target) in correction::REDUCTION_PAIRS.iter().enumerate() {
        if let Some(t) = target {
            if *t >= catalog::ARCHETYPE_COUNT {
                fail(fails, format!("reduction pair {} targets out-of-range {}", idx, t));
            }
            if *t as usize == idx {
                fail(fails, format!("reduction pair {} targets itself", idx));
            }
        }
    }
}

fn gate_balanced_never_corrects(fails: &mut Vec<String>) {
    for id in 0..catalog::SIGNATURE_COUNT {
        match correction::compute_correction(id, Status::Balanced) {
            Ok(None) => {}
            Ok(Some(_)) => fail(fails, format!("balanced signature {} produced a correction", id)),
            Err(e) => fail(fails, format!("correction lookup failed for {}: {}", id, e)),
        }
    }
}

fn gate_reduction_nulls(fails: &mut Vec<String>) {
    for id in 0..catalog::ARCHETYPE_COUNT {
        let expect_null = matches!(id, 0 | 1 | 10 | 19 | 20 | 21);
        match correction::compute_correction(id, Status::Unacknowledged) {
            Ok(None) if !expect_null => {
                fail(fails, format!("archetype {} should reduce but yields no correction", id));
            }
            Ok(Some(_)) if expect_null => {
                fail(fails, format!("archetype {} should have no reduction target", id));
            }
            Err(e) => fail(fails, format!("correction lookup failed for {}: {}", id, e)),
            _ => {}
        }
    }
}

fn gate_channel_crossing_totality(fails: &mut Vec<String>) {
    for status in [Status::TooMuch, Status::TooLittle, Status::Unacknowledged] {
        let mut targets = Vec::new();
        for channel in Channel::ALL {
            match correction::channel_crossing(status, channel) {
                None => fail(
                    fails,
                    format!("no crossing for {} on channel {}", status.info().name, channel.as_str()),
                ),
                Some(t) => targets.push(t),
            }
        }
        targets.sort_by_key(|c| c.as_str());
        targets.dedup();
        if targets.len() != Channel::ALL.len() {
            fail(
                fails,
                format!("crossing for {} is not a permutation of the channels", status.info().name),
            );
        }
    }
    for channel in Channel::ALL {
        if correction::channel_crossing(Status::Balanced, channel).is_some() {
            fail(fails, format!("balanced crossing defined for channel {}", channel.as_str()));
        }
    }

    // Every bound must resolve under every imbalanced status: the number
    // mirror stays in range, and the crossed cell is always populated.
    for id in catalog::BOUND_BASE..catalog::AGENT_BASE {
        for status in [Status::TooMuch, Status::TooLittle, Status::Unacknowledged] {
            match correction::compute_correction(id, status) {
                Ok(Some(c)) => {
                    if c.number_mirror.is_none() || c.channel_cross.is_none() {
                        fail(
                            fails,
                            format!("bound {} correction lacks mirror/cross detail", id),
                        );
                    }
                }
                Ok(None) => fail(
                    fails,
                    format!("bound {} has no correction for {}", id, status.info().name),
                ),
                Err(e) => fail(fails, format!("correction lookup failed for {}: {}", id, e)),
            }
        }
    }
}

fn gate_spread_definitions(fails: &mut Vec<String>) {
    let mut keys = std::collections::HashSet::new();
    for s in &spread::DURABLE_SPREADS {
        if !keys.insert(s.key) {
            fail(fails, format!("durable spread key '{}' appears twice", s.key));
        }
        if s.frames.len() != s.count {
            fail(
                fails,
                format!("durable spread '{}' declares {} cards but {} frames", s.key, s.count, s.frames.len()),
            );
        }
        for frame in s.frames {
            if frame.name.is_empty() || frame.meaning.is_empty() {
                fail(fails, format!("durable spread '{}' has an unnamed frame", s.key));
            }
        }
    }
    for (idx, s) in spread::RANDOM_SPREADS.iter().enumerate() {
        if !keys.insert(s.key) {
            fail(fails, format!("random spread key '{}' appears twice", s.key));
        }
        if s.count != idx + 1 {
            fail(
                fails,
                format!("random spread '{}' draws {} cards, want {}", s.key, s.count, idx + 1),
            );
        }
    }
    match spread::spread_count(spread::SpreadMode::Forge, "ignored") {
        Ok(1) => {}
        Ok(n) => fail(fails, format!("forge draws {} cards, want 1", n)),
        Err(e) => fail(fails, format!("forge spread count failed: {}", e)),
    }
}

fn gate_stance_presets(fails: &mut Vec<String>) {
    let mut labels = std::collections::HashSet::new();
    for key in stance::PRESET_KEYS {
        match stance::delivery_preset(key) {
            None => fail(fails, format!("preset key '{}' does not resolve", key)),
            Some(preset) => {
                let label = stance::stance_label(&preset);
                if label.is_empty() {
                    fail(fails, format!("preset '{}' renders an empty label", key));
                }
                if !labels.insert(label.clone()) {
                    fail(fails, format!("preset label '{}' appears twice", label));
                }
                if stance::build_stance_prompt(&preset).is_empty() {
                    fail(fails, format!("preset '{}' renders an empty stance prompt", key));
                }
            }
        }
    }
    if stance::delivery_preset("practitioner").is_some() {
        fail(fails, "retired preset key 'practitioner' still resolves".to_string());
    }
}

/// Hex digest over every signature's identity row. The value itself is
/// reported, not pinned; the gate asserts the digest is stable across two
/// passes over the catalog.
pub fn catalog_digest() -> String {
    let mut hasher = Sha256::new();
    for sig in catalog::all_signatures() {
        let channel = sig.channel().map(|c| c.as_str()).unwrap_or("-");
        let associated = sig
            .associated_archetype()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        hasher.update(
            format!(
                "{}|{}|{}|{}|{}|{}\n",
                sig.id(),
                sig.kind(),
                sig.name(),
                sig.traditional(),
                channel,
                associated
            )
            .as_bytes(),
        );
    }
    format!("{:x}", hasher.finalize())
}

fn gate_catalog_digest(fails: &mut Vec<String>) {
    let first = catalog_digest();
    let second = catalog_digest();
    if first != second {
        fail(fails, "catalog digest is not deterministic".to_string());
    }
    if first.len() != 64 || !first.chars().all(|c| c.is_ascii_hexdigit()) {
        fail(fails, format!("catalog digest '{}' is not a sha256 hex string", first));
    }
}

const GATES: [(&str, fn(&mut Vec<String>)); 10] = [
    ("Catalog Integrity", gate_catalog_integrity),
    ("House Partition", gate_house_partition),
    ("Derivation Consistency", gate_derivation_consistency),
    ("Correction Table Shape", gate_correction_tables),
    ("Balanced Never Corrects", gate_balanced_never_corrects),
    ("Reduction Nulls", gate_reduction_nulls),
    ("Channel Crossing Totality", gate_channel_crossing_totality),
    ("Spread Definitions", gate_spread_definitions),
    ("Stance Presets", gate_stance_presets),
    ("Catalog Digest", gate_catalog_digest),
];

pub fn run_gates() -> Vec<GateResult> {
    GATES
        .iter()
        .map(|(name, gate)| {
            let mut failures = Vec::new();
            let started = Instant::now();
            gate(&mut failures);
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            GateResult { gate: name, passed: failures.is_empty(), elapsed_ms, failures }
        })
        .collect()
}

pub fn run_validation(json: bool, verbose: bool) -> Result<(), NirmanakayaError> {
    let results = run_gates();
    let pass = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - pass;

    if json {
        let report = serde_json::json!({
            "gates": results,
            "pass": pass,
            "fail": failed,
            "catalog_digest": catalog_digest(),
            "status": if failed == 0 { "ok" } else { "failed" },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        tui::print_section("Validation Gates");
        for r in &results {
            let status = if r.passed { ItemStatus::Pass } else { ItemStatus::Fail };
            tui::print_status_line(&format!("{} ({:.1}ms)", r.gate, r.elapsed_ms), status);
            if !r.passed || verbose {
                for f in &r.failures {
                    tui::print_item(f, ItemStatus::Fail);
                }
            }
        }
        if verbose {
            tui::print_item(&format!("catalog digest {}", catalog_digest()), ItemStatus::Info);
        }
        tui::print_summary(pass, failed);
    }

    if failed > 0 {
        Err(NirmanakayaError::ValidationError(format!("{} gate(s) failed.", failed)))
    } else {
        Ok(())
    }
}

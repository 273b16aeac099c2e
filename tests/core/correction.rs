//! The pairing tables are canonical data, not derived data. These tests
//! pin every entry literally so an accidental edit to one number fails
//! loudly, then check the structural properties the tables are supposed
//! to have.

use nirmanakaya::core::catalog::{self, Channel};
use nirmanakaya::core::correction::{
    channel_crossing, compute_correction, correction_text, CorrectionKind, DIAGONAL_PAIRS,
    REDUCTION_PAIRS, VERTICAL_PAIRS,
};
use nirmanakaya::core::status::Status;

#[test]
fn diagonal_table_is_pinned() {
    assert_eq!(
        DIAGONAL_PAIRS,
        [19, 20, 17, 18, 15, 16, 13, 14, 11, 12, 1, 8, 9, 6, 7, 4, 5, 2, 3, 0, 1, 0]
    );
}

#[test]
fn vertical_table_is_pinned() {
    assert_eq!(
        VERTICAL_PAIRS,
        [20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 19, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 20]
    );
}

#[test]
fn reduction_table_is_pinned() {
    assert_eq!(
        REDUCTION_PAIRS,
        [
            None,
            None,
            Some(11),
            Some(12),
            Some(13),
            Some(14),
            Some(15),
            Some(16),
            Some(17),
            Some(18),
            None,
            Some(2),
            Some(3),
            Some(4),
            Some(5),
            Some(6),
            Some(7),
            Some(8),
            Some(9),
            None,
            None,
            None,
        ]
    );
}

#[test]
fn diagonal_pairs_are_mutual_except_cycles_and_wholeness() {
    // Cycles (10) and Wholeness (21) fold into another archetype's pair
    // rather than forming their own.
    for id in 0..22u8 {
        let target = DIAGONAL_PAIRS[id as usize];
        if id == 10 || id == 21 {
            assert_ne!(DIAGONAL_PAIRS[target as usize], id, "id {}", id);
        } else {
            assert_eq!(DIAGONAL_PAIRS[target as usize], id, "id {}", id);
        }
    }
}

#[test]
fn vertical_pairs_are_mutual_except_cycles_and_wholeness() {
    for id in 0..22u8 {
        let target = VERTICAL_PAIRS[id as usize];
        if id == 10 || id == 21 {
            assert_ne!(VERTICAL_PAIRS[target as usize], id, "id {}", id);
        } else {
            assert_eq!(VERTICAL_PAIRS[target as usize], id, "id {}", id);
        }
    }
}

#[test]
fn reduction_pairs_are_mutual_and_offset_by_nine() {
    for id in 2..=9u8 {
        assert_eq!(REDUCTION_PAIRS[id as usize], Some(id + 9));
        assert_eq!(REDUCTION_PAIRS[(id + 9) as usize], Some(id));
    }
    for id in [0u8, 1, 10, 19, 20, 21] {
        assert!(REDUCTION_PAIRS[id as usize].is_none(), "id {}", id);
    }
}

#[test]
fn status_selects_correction_kind() {
    let cases = [
        (Status::TooMuch, CorrectionKind::Diagonal),
        (Status::TooLittle, CorrectionKind::Vertical),
        (Status::Unacknowledged, CorrectionKind::Reduction),
    ];
    for (status, kind) in cases {
        let c = compute_correction(5, status).expect("in range").expect("imbalanced");
        assert_eq!(c.kind, kind);
    }
    assert!(compute_correction(5, Status::Balanced).expect("in range").is_none());
}

#[test]
fn archetype_corrections_follow_the_tables_exactly() {
    for id in 0..22u8 {
        let too_much = compute_correction(id, Status::TooMuch)
            .expect("in range")
            .expect("diagonal always defined");
        assert_eq!(too_much.targets, vec![DIAGONAL_PAIRS[id as usize]], "id {}", id);
        assert!(too_much.number_mirror.is_none());

        let too_little = compute_correction(id, Status::TooLittle)
            .expect("in range")
            .expect("vertical always defined");
        assert_eq!(too_little.targets, vec![VERTICAL_PAIRS[id as usize]], "id {}", id);

        let unack = compute_correction(id, Status::Unacknowledged).expect("in range");
        match REDUCTION_PAIRS[id as usize] {
            Some(target) => {
                assert_eq!(unack.expect("reduction defined").targets, vec![target], "id {}", id)
            }
            None => assert!(unack.is_none(), "id {}", id),
        }
    }
}

#[test]
fn every_bound_correction_crosses_channel_and_mirrors_number() {
    for bound in &catalog::BOUNDS {
        for status in [Status::TooMuch, Status::TooLittle, Status::Unacknowledged] {
            let c = compute_correction(bound.id, status)
                .expect("in range")
                .expect("bound corrections are total");
            assert_eq!(c.targets.len(), 1);

            let target_id = c.targets[0];
            let target = match catalog::signature(target_id).expect("target resolves") {
                catalog::Signature::Bound(b) => b,
                other => panic!(
                    "bound {} {} corrected to non-bound {} ({})",
                    bound.id,
                    bound.name,
                    target_id,
                    other.kind()
                ),
            };

            let expected_channel =
                channel_crossing(status, bound.channel).expect("imbalanced crossing");
            assert_eq!(target.channel, expected_channel, "bound {}", bound.id);
            assert_eq!(target.number, 11 - bound.number, "bound {}", bound.id);
            assert_eq!(
                c.number_mirror.as_deref(),
                Some(format!("{}→{}", bound.number, 11 - bound.number).as_str())
            );
            assert_eq!(
                c.channel_cross.as_deref(),
                Some(format!("{}→{}", bound.channel, expected_channel).as_str())
            );
        }
    }
}

#[test]
fn bound_corrections_are_their_own_inverse() {
    // Crossing a channel twice under the same status lands back home, and
    // mirroring 11-n twice restores n, so correcting the correction of a
    // bound returns the original bound.
    for bound in &catalog::BOUNDS {
        for status in [Status::TooMuch, Status::TooLittle, Status::Unacknowledged] {
            let first = compute_correction(bound.id, status)
                .expect("in range")
                .expect("defined");
            let second = compute_correction(first.targets[0], status)
                .expect("in range")
                .expect("defined");
            assert_eq!(second.targets, vec![bound.id], "bound {} {:?}", bound.id, status);
        }
    }
}

#[test]
fn channel_crossing_is_a_permutation_per_status() {
    for status in [Status::TooMuch, Status::TooLittle, Status::Unacknowledged] {
        let mut seen = Vec::new();
        for channel in Channel::ALL {
            let crossed = channel_crossing(status, channel).expect("imbalanced crossing");
            assert_ne!(crossed, channel, "{:?} fixes {:?}", status, channel);
            seen.push(crossed);
        }
        seen.sort_by_key(|c| c.as_str());
        seen.dedup();
        assert_eq!(seen.len(), 4, "{:?} crossing collides", status);
    }
    for channel in Channel::ALL {
        assert!(channel_crossing(Status::Balanced, channel).is_none());
    }
}

#[test]
fn agents_inherit_their_archetype_corrections() {
    for agent in &catalog::AGENTS {
        for status in [Status::TooMuch, Status::TooLittle, Status::Unacknowledged] {
            let via_agent = compute_correction(agent.id, status).expect("in range");
            let via_archetype = compute_correction(agent.archetype, status).expect("in range");
            match (via_agent, via_archetype) {
                (Some(a), Some(b)) => {
                    assert_eq!(a.targets, b.targets, "agent {}", agent.id);
                    assert_eq!(a.kind, b.kind, "agent {}", agent.id);
                    assert!(a.number_mirror.is_none());
                    assert!(a.channel_cross.is_none());
                }
                (None, None) => {}
                (a, b) => panic!(
                    "agent {} diverges from archetype {}: {:?} vs {:?}",
                    agent.id, agent.archetype, a, b
                ),
            }
        }
    }
}

#[test]
fn worked_examples_match_the_doctrine() {
    // Too Much Drive resolves diagonally to Balance.
    let c = compute_correction(7, Status::TooMuch).expect("in range").expect("defined");
    assert_eq!(c.targets, vec![14]);
    assert_eq!(
        correction_text(&c).expect("renders"),
        "Position 14 Balance via DIAGONAL duality"
    );

    // Too Little Resolve (Intent 7) crosses to Resonance 4: Reverie.
    let c = compute_correction(28, Status::TooLittle).expect("in range").expect("defined");
    assert_eq!(c.targets, vec![45]);
    assert_eq!(c.number_mirror.as_deref(), Some("7→4"));
    assert_eq!(c.channel_cross.as_deref(), Some("Intent→Resonance"));

    // Unacknowledged Wisdom reduces to Equity.
    let c = compute_correction(2, Status::Unacknowledged)
        .expect("in range")
        .expect("defined");
    assert_eq!(c.targets, vec![11]);

    // The Gestalt and Portal archetypes have nowhere to reduce to.
    for id in [0u8, 1, 10, 19, 20, 21] {
        assert!(compute_correction(id, Status::Unacknowledged)
            .expect("in range")
            .is_none());
    }
}

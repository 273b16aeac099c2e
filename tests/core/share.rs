//! Share-codec tests: current tokens round-trip exactly, and the decoder
//! stays tolerant of every token shape older versions ever minted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use nirmanakaya::core::draw::Draw;
use nirmanakaya::core::share::{decode_draws, encode_draws};
use nirmanakaya::core::spread::SpreadMode;
use nirmanakaya::core::stance::{self, Complexity, Stance};
use nirmanakaya::core::status::Status;

fn spread_draws() -> Vec<Draw> {
    vec![
        Draw { position: Some(0), transient: 21, status: Status::Balanced },
        Draw { position: Some(13), transient: 40, status: Status::TooMuch },
        Draw { position: Some(7), transient: 77, status: Status::TooLittle },
        Draw { position: Some(21), transient: 0, status: Status::Unacknowledged },
    ]
}

#[test]
fn current_tokens_round_trip_every_field() {
    let draws = spread_draws();
    for (mode, key) in [
        (SpreadMode::Random, "four"),
        (SpreadMode::Durable, "quadraverse"),
        (SpreadMode::Forge, ""),
    ] {
        for preset in stance::PRESET_KEYS {
            let stance = stance::delivery_preset(preset).expect("preset exists");
            let code = encode_draws(&draws, mode, key, &stance, "will this carry?");
            let decoded = decode_draws(&code).expect("token decodes");
            assert_eq!(decoded.draws, draws);
            assert_eq!(decoded.mode, mode);
            assert_eq!(decoded.spread_key, key);
            assert_eq!(decoded.stance, stance);
            assert_eq!(decoded.question, "will this carry?");
        }
    }
}

#[test]
fn token_is_url_safe_enough_to_paste() {
    let code = encode_draws(
        &spread_draws(),
        SpreadMode::Durable,
        "fiveHouse",
        &Stance::default(),
        "q",
    );
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    // Whitespace picked up while pasting is forgiven.
    let padded = format!("  {}\n", code);
    assert!(decode_draws(&padded).is_some());
}

#[test]
fn legacy_persona_tokens_map_onto_stances() {
    let expectations = [
        ("seeker", "kind"),
        ("gentleGuide", "kind"),
        ("philosopher", "wise"),
        ("deepDive", "wise"),
        ("fullTransmission", "oracle"),
        ("practitioner", "kind"),
        ("quickTake", "kind"),
    ];
    for (persona, preset) in expectations {
        let json = format!(
            r#"{{"d":[{{"position":null,"transient":10,"status":2}}],"t":"random","k":"one","p":"{}"}}"#,
            persona
        );
        let decoded = decode_draws(&STANDARD.encode(json.as_bytes())).expect("legacy decodes");
        let expected = stance::delivery_preset(preset).expect("preset exists");
        assert_eq!(decoded.stance.voice, expected.voice, "persona {}", persona);
        assert_eq!(decoded.stance.focus, expected.focus, "persona {}", persona);
        // Personas predate the complexity axis.
        assert_eq!(decoded.stance.complexity, Complexity::Teacher, "persona {}", persona);
    }
}

#[test]
fn stanceless_tokens_fall_back_to_the_default_stance() {
    let json = r#"{"d":[{"position":3,"transient":5,"status":1}],"t":"random","k":"one"}"#;
    let decoded = decode_draws(&STANDARD.encode(json.as_bytes())).expect("decodes");
    assert_eq!(decoded.stance, Stance::default());
    assert_eq!(decoded.question, "");
}

#[test]
fn unknown_payload_fields_are_ignored() {
    // Web-era tokens carried extra fields this build never defined.
    let json = r#"{"d":[{"position":null,"transient":33,"status":4}],"t":"durable","k":"arc","s":{"voice":"wonder","focus":"see","density":"luminous","scope":"resonant","seriousness":"grave","complexity":"master"},"q":"kept","v":2,"theme":"midnight"}"#;
    let decoded = decode_draws(&STANDARD.encode(json.as_bytes())).expect("decodes");
    assert_eq!(decoded.question, "kept");
    assert_eq!(decoded.spread_key, "arc");
    assert_eq!(decoded.draws[0].transient, 33);
    assert_eq!(decoded.draws[0].status, Status::Unacknowledged);
}

#[test]
fn empty_draw_lists_are_legal_tokens() {
    let code = encode_draws(&[], SpreadMode::Random, "one", &Stance::default(), "");
    let decoded = decode_draws(&code).expect("decodes");
    assert!(decoded.draws.is_empty());
}

#[test]
fn garbage_tokens_decode_to_none_not_errors() {
    for bad in [
        "",
        "!!!not-base64!!!",
        "AAAA",
        &STANDARD.encode(b"not json"),
        &STANDARD.encode(b"[1,2,3]"),
        &STANDARD.encode(br#"{"d":"wrong shape"}"#),
        // Statuses outside 1..=4 fail the Draw deserializer.
        &STANDARD.encode(br#"{"d":[{"position":null,"transient":5,"status":0}],"t":"random","k":"one"}"#),
        &STANDARD.encode(br#"{"d":[{"position":null,"transient":5,"status":7}],"t":"random","k":"one"}"#),
        // Unknown mode strings are malformed too.
        &STANDARD.encode(br#"{"d":[],"t":"sideways","k":"one"}"#),
    ] {
        assert!(decode_draws(bad).is_none(), "token {:?} should not decode", bad);
    }
}

#[test]
fn questions_survive_unicode_and_length() {
    let long: String = "why ".repeat(200);
    let code = encode_draws(&spread_draws(), SpreadMode::Random, "four", &Stance::default(), &long);
    assert_eq!(decode_draws(&code).expect("decodes").question, long);

    let q = "är det dags? 今がその時か? 🜁";
    let code = encode_draws(&[], SpreadMode::Forge, "", &Stance::default(), q);
    assert_eq!(decode_draws(&code).expect("decodes").question, q);
}

//! Parser tests against realistic collaborator output: preamble chatter,
//! markers buried mid-line, CRLF endings, unknown markers, and replies
//! that only half-follow the format contract.

use nirmanakaya::core::draw::Draw;
use nirmanakaya::core::parser::parse_reading;
use nirmanakaya::core::status::Status;

fn draw(transient: u8, status: Status) -> Draw {
    Draw { position: None, transient, status }
}

fn three_draws() -> Vec<Draw> {
    vec![
        draw(7, Status::TooMuch),
        draw(30, Status::Balanced),
        draw(65, Status::Unacknowledged),
    ]
}

#[test]
fn realistic_reply_with_preamble_and_postscript() {
    let text = "Here is your reading, as requested.\n\n\
        [SUMMARY]\nA season of pushing against a door that opens inward.\n\n\
        [CARD:1]\nDrive is running hot. You are sprinting toward a finish line\nthat has not been drawn yet.\n\n\
        [CORRECTION:1]\nBalance is the diagonal partner. Stop adding force.\n\n\
        [CARD:2]\nSteady ground here. Nothing to fix.\n\n\
        [CARD:3]\nSomething is steering from the shadows.\n\n\
        [CORRECTION:3]\nReturn to the source that generates this energy.\n\n\
        [PATH]\nTHE PATTERN\nBoth corrections ask you to subtract, not add.\n\n\
        [LETTER]\nDear traveler, the work is already lighter than you think.";
    let parsed = parse_reading(text, &three_draws());

    // The preamble before the first marker is dropped.
    assert_eq!(
        parsed.summary.as_deref(),
        Some("A season of pushing against a door that opens inward.")
    );
    assert_eq!(parsed.cards.len(), 3);
    assert!(parsed.card(0).unwrap().content.starts_with("Drive is running hot."));
    assert!(parsed.card(0).unwrap().content.contains("has not been drawn yet."));
    assert_eq!(parsed.corrections.len(), 2);
    assert_eq!(parsed.correction(0).unwrap().card_index, 0);
    assert_eq!(parsed.correction(2).unwrap().card_index, 2);
    assert!(parsed
        .rebalancer_summary
        .as_deref()
        .unwrap()
        .starts_with("THE PATTERN"));
    assert!(parsed.letter.as_deref().unwrap().starts_with("Dear traveler"));
}

#[test]
fn markers_buried_mid_line_still_split_sections() {
    let text = "intro [SUMMARY] the gist [CARD:1] body of card one [LETTER] bye";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.summary.as_deref(), Some("the gist"));
    assert_eq!(parsed.card(0).unwrap().content, "body of card one");
    assert_eq!(parsed.letter.as_deref(), Some("bye"));
}

#[test]
fn crlf_endings_are_trimmed_at_section_edges() {
    let text = "[SUMMARY]\r\nWindows collaborator.\r\n[CARD:1]\r\nline one\r\nline two\r\n";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.summary.as_deref(), Some("Windows collaborator."));
    assert_eq!(parsed.card(0).unwrap().content, "line one\r\nline two");
}

#[test]
fn unknown_markers_stay_inside_the_surrounding_section() {
    let text = "[SUMMARY]\nBefore.\n[NOTE] this is not a recognized marker\nAfter.\n[LETTER]\nEnd.";
    let parsed = parse_reading(text, &three_draws());
    let summary = parsed.summary.as_deref().unwrap();
    assert!(summary.contains("[NOTE]"));
    assert!(summary.contains("After."));
    assert_eq!(parsed.letter.as_deref(), Some("End."));
}

#[test]
fn malformed_marker_variants_are_not_markers() {
    // Lowercase, space-padded, and wrong-bracket forms are all content.
    let text = "[summary]\nnope\n[CARD: 1]\nnope\n(CARD:1)\nnope\n[SUMMARY]\nyes";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.summary.as_deref(), Some("yes"));
    assert!(parsed.cards.is_empty());
}

#[test]
fn corrections_only_land_on_imbalanced_draws() {
    // Card 2 is balanced; a correction for it is collaborator error and
    // gets dropped. Cards 1 and 3 are imbalanced and keep theirs.
    let text = "[CORRECTION:1]\nkeep\n[CORRECTION:2]\ndrop\n[CORRECTION:3]\nkeep too";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.corrections.len(), 2);
    assert!(parsed.correction(0).is_some());
    assert!(parsed.correction(1).is_none());
    assert!(parsed.correction(2).is_some());
}

#[test]
fn card_numbers_outside_the_draw_are_ignored() {
    let text = "[CARD:0]\nzero is not a card\n[CARD:4]\npast the end\n[CARD:999]\nway out\n[CARD:2]\nreal";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.cards.len(), 1);
    assert_eq!(parsed.cards[0].index, 1);
    assert_eq!(parsed.cards[0].content, "real");
}

#[test]
fn sections_arriving_out_of_order_are_reassembled() {
    let text = "[LETTER]\nlast first\n[CORRECTION:3]\nfix\n[CARD:3]\nthird\n[CARD:1]\nfirst\n[SUMMARY]\ntop";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.summary.as_deref(), Some("top"));
    assert_eq!(parsed.letter.as_deref(), Some("last first"));
    assert_eq!(parsed.card(0).unwrap().content, "first");
    assert_eq!(parsed.card(2).unwrap().content, "third");
    assert_eq!(parsed.correction(2).unwrap().content, "fix");
}

#[test]
fn duplicate_sections_keep_the_first_occurrence() {
    let text = "[PATH]\noriginal\n[PATH]\nrewrite\n[CORRECTION:1]\nfirst fix\n[CORRECTION:1]\nsecond fix";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.rebalancer_summary.as_deref(), Some("original"));
    assert_eq!(parsed.corrections.len(), 1);
    assert_eq!(parsed.correction(0).unwrap().content, "first fix");
}

#[test]
fn empty_sections_are_kept_as_empty_strings() {
    let text = "[SUMMARY]\n[CARD:1]\nactual content";
    let parsed = parse_reading(text, &three_draws());
    assert_eq!(parsed.summary.as_deref(), Some(""));
    assert_eq!(parsed.card(0).unwrap().content, "actual content");
}

#[test]
fn marker_free_reply_is_an_empty_parse() {
    let parsed = parse_reading(
        "I'm sorry, I can't format that the way you asked.",
        &three_draws(),
    );
    assert!(parsed.is_empty());
    assert!(parse_reading("", &three_draws()).is_empty());
}

#[test]
fn serde_round_trip_preserves_section_indices() {
    let text = "[SUMMARY]\ns\n[CARD:1]\na\n[CARD:3]\nc\n[CORRECTION:3]\nfix";
    let parsed = parse_reading(text, &three_draws());
    let json = serde_json::to_string(&parsed).expect("serialize");
    let back: nirmanakaya::core::parser::ParsedReading =
        serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, parsed);
    assert_eq!(back.card(2).unwrap().content, "c");
}

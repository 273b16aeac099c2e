use nirmanakaya::core::collaborator::{Collaborator, CommandCollaborator};
use nirmanakaya::core::draw::{self, Draw};
use nirmanakaya::core::export;
use nirmanakaya::core::prompt::{self, ThreadOp};
use nirmanakaya::core::session::{SectionRef, Session, ThreadParent};
use nirmanakaya::core::share;
use nirmanakaya::core::spread::SpreadMode;
use nirmanakaya::core::stance::{self, Stance};
use nirmanakaya::core::status::Status;
use nirmanakaya::core::store::Store;
use nirmanakaya::plugins::journal;
use tempfile::tempdir;

/// A collaborator reply that matches whatever statuses the spread rolled:
/// a card section per draw and a correction section per imbalanced draw.
fn response_for(draws: &[Draw]) -> String {
    let mut text = String::from("[SUMMARY]\nThe pattern centers on momentum.\n");
    for (i, d) in draws.iter().enumerate() {
        text.push_str(&format!("[CARD:{}]\nWhat signature {} shows.\n", i + 1, i + 1));
        if d.status.is_imbalanced() {
            text.push_str(&format!("[CORRECTION:{}]\nHow to rebalance {}.\n", i + 1, i + 1));
        }
    }
    text.push_str("[LETTER]\nTake the smaller step first.");
    text
}

fn fixed_session() -> Session {
    let draws = vec![
        Draw { position: Some(4), transient: 7, status: Status::TooMuch },
        Draw { position: Some(9), transient: 30, status: Status::Balanced },
        Draw { position: Some(13), transient: 65, status: Status::Unacknowledged },
    ];
    Session::new(
        "Where is my energy leaking?".to_string(),
        SpreadMode::Random,
        "three".to_string(),
        Stance::default(),
        draws,
    )
}

#[test]
fn full_lifecycle_draw_to_export() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::at(tmp.path());

    let draws = draw::generate_spread(3, true).expect("arc draw");
    let mut session = Session::new(
        "What should I build next?".to_string(),
        SpreadMode::Durable,
        "arc".to_string(),
        Stance::default(),
        draws,
    );
    assert_eq!(session.state_label(), "drawn");

    // The request assembles against live draws before anything is ingested.
    let request = prompt::reading_request(
        &session.question,
        session.mode,
        &session.spread_key,
        &session.stance,
        &session.draws,
    )
    .expect("assembles");
    assert!(request.est_tokens > 0);
    assert!(request.messages[0].content.contains("Situation (what is)"));

    session.begin_reading().expect("begin");
    assert_eq!(session.state_label(), "awaiting-reading");
    let response = response_for(&session.draws);
    session.ingest_reading(&response).expect("ingest");
    assert_eq!(session.state_label(), "interpreted");

    let reading = session.reading.as_ref().expect("parsed");
    assert_eq!(reading.cards.len(), 3);
    assert_eq!(
        reading.corrections.len(),
        draw::imbalanced_count(&session.draws)
    );
    assert_eq!(
        session.section_content(&SectionRef::Summary),
        Some("The pattern centers on momentum.")
    );

    session
        .begin_expansion(&SectionRef::Card(0), "clarify")
        .expect("expansion begins");
    session.ingest_expansion("  The short version.  ").expect("expansion lands");
    assert_eq!(
        session.expansion(&SectionRef::Card(0), "clarify"),
        Some("The short version.")
    );

    session
        .begin_thread(
            ThreadParent::Section("summary".to_string()),
            ThreadOp::Reflect,
            "what about timing?".to_string(),
            draw::single_draw(),
        )
        .expect("thread begins");
    let root = session.ingest_thread("The architecture answers.").expect("thread lands");
    assert_eq!(session.roots_for(&SectionRef::Summary), &[root]);

    session.begin_followup("and money?".to_string()).expect("followup begins");
    session.ingest_followup("Money follows the same pattern.").expect("followup lands");

    journal::save_session(&store, &session).expect("save");
    let loaded = journal::load_session(&store, &session.id).expect("load");
    assert_eq!(loaded.id, session.id);
    assert_eq!(loaded.node_count(), 1);
    assert_eq!(loaded.followups.len(), 2);
    assert_eq!(
        loaded.expansion(&SectionRef::Card(0), "clarify"),
        Some("The short version.")
    );
    assert_eq!(loaded.reading, session.reading);

    let md = export::export_markdown(&loaded).expect("markdown");
    assert!(md.starts_with("# Nirmanakaya Reading"));
    assert!(md.contains("### Signature 1 — Situation"));
    assert!(md.contains("**Spread:** Arc  \n"));
    assert!(md.contains("## Letter\n\nTake the smaller step first."));
    assert!(md.contains("#### Clarify\n\nThe short version."));

    let html = export::export_html(&loaded).expect("html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Reflect • Arc"));
    assert!(html.contains("↳ Reflecting: &quot;what about timing?&quot;"));
}

#[test]
fn pending_reading_survives_the_journal() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::at(tmp.path());

    let mut session = fixed_session();
    session.begin_reading().expect("begin");
    journal::save_session(&store, &session).expect("save pending");

    let mut loaded = journal::load_session(&store, &session.id).expect("load");
    assert_eq!(loaded.state_label(), "awaiting-reading");

    loaded.ingest_reading(&response_for(&loaded.draws)).expect("ingest after reload");
    assert_eq!(loaded.state_label(), "interpreted");
    journal::save_session(&store, &loaded).expect("save interpreted");

    let entries = journal::list_entries(&store).expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].state, "interpreted");
    assert_eq!(entries[0].cards, 3);
}

#[test]
fn pending_expansion_survives_and_completes() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::at(tmp.path());

    let mut session = fixed_session();
    session.begin_reading().expect("begin");
    session.ingest_reading(&response_for(&session.draws)).expect("ingest");
    session
        .begin_expansion(&SectionRef::Correction(0), "architecture")
        .expect("expansion begins");
    journal::save_session(&store, &session).expect("save");

    let mut loaded = journal::load_session(&store, &session.id).expect("load");
    assert_eq!(loaded.state_label(), "awaiting-expansion");
    assert!(loaded.ingest_thread("wrong kind").is_err());
    loaded.ingest_expansion("The diagonal pairing.").expect("expansion lands");
    assert_eq!(
        loaded.expansion(&SectionRef::Correction(0), "architecture"),
        Some("The diagonal pairing.")
    );
}

#[test]
fn collapse_state_persists() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::at(tmp.path());

    let mut session = fixed_session();
    session.begin_reading().expect("begin");
    session.ingest_reading(&response_for(&session.draws)).expect("ingest");
    assert!(session.toggle_collapse(&SectionRef::Card(1)));
    journal::save_session(&store, &session).expect("save");

    let loaded = journal::load_session(&store, &session.id).expect("load");
    assert!(loaded.is_collapsed(&SectionRef::Card(1)));
    assert!(!loaded.is_collapsed(&SectionRef::Card(0)));
}

#[test]
fn command_collaborator_reply_feeds_ingest() {
    // echo stands in for a bridge; the reply JSON carries escaped newlines
    // that decode into real marker lines.
    let bridge = CommandCollaborator::parse(
        r#"echo {"reading":"[SUMMARY]\nSteady-now.\n[CARD:1]\nCalm-holds.\n[CARD:2]\nSo-does-this.\n[CARD:3]\nAnd-this.\n[LETTER]\nOnward."}"#,
    )
    .expect("parses");

    let mut session = fixed_session();
    let request = prompt::reading_request(
        &session.question,
        session.mode,
        &session.spread_key,
        &session.stance,
        &session.draws,
    )
    .expect("assembles");

    session.begin_reading().expect("begin");
    let reply = bridge.generate(&request).expect("bridge replies");
    session.ingest_reading(&reply).expect("ingest");
    assert_eq!(session.section_content(&SectionRef::Summary), Some("Steady-now."));
    assert_eq!(session.section_content(&SectionRef::Card(2)), Some("And-this."));
    assert_eq!(session.section_content(&SectionRef::Letter), Some("Onward."));
}

#[test]
fn collaborator_error_reply_surfaces() {
    let bridge = CommandCollaborator::parse(r#"echo {"error":"model-offline"}"#).expect("parses");
    let session = fixed_session();
    let request = prompt::reading_request(
        &session.question,
        session.mode,
        &session.spread_key,
        &session.stance,
        &session.draws,
    )
    .expect("assembles");
    let err = bridge.generate(&request).expect_err("error reply");
    assert!(err.to_string().contains("model-offline"));
}

#[test]
fn share_code_rebuilds_the_same_reading() {
    let mut source = fixed_session();
    source.stance = stance::delivery_preset("oracle").expect("preset");
    let response = response_for(&source.draws);
    source.begin_reading().expect("begin");
    source.ingest_reading(&response).expect("ingest");

    let code = share::encode_draws(
        &source.draws,
        source.mode,
        &source.spread_key,
        &source.stance,
        &source.question,
    );
    let shared = share::decode_draws(&code).expect("decodes");
    assert_eq!(shared.draws, source.draws);
    assert_eq!(shared.stance, source.stance);

    let mut rebuilt = Session::new(
        shared.question,
        shared.mode,
        shared.spread_key,
        shared.stance,
        shared.draws,
    );
    rebuilt.shared = true;
    assert_eq!(rebuilt.state_label(), "drawn");
    assert_ne!(rebuilt.id, source.id);

    // Same draws, same response, same sections on the other side.
    rebuilt.ingest_reading(&response).expect("ingest");
    assert_eq!(
        rebuilt.section_content(&SectionRef::Card(0)),
        source.section_content(&SectionRef::Card(0))
    );
    assert_eq!(
        rebuilt.section_content(&SectionRef::Correction(0)),
        source.section_content(&SectionRef::Correction(0))
    );
}

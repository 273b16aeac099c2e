use nirmanakaya::core::db;
use nirmanakaya::core::draw::Draw;
use nirmanakaya::core::prompt::ThreadOp;
use nirmanakaya::core::session::{SectionRef, Session, ThreadParent};
use nirmanakaya::core::spread::SpreadMode;
use nirmanakaya::core::stance::Stance;
use nirmanakaya::core::status::Status;
use nirmanakaya::core::store::Store;
use nirmanakaya::plugins::journal::{
    delete_session, list_entries, load_session, rebuild_from_events, save_session, JournalEvent,
};
use regex::Regex;
use std::fs;
use tempfile::tempdir;

fn plain_session(question: &str) -> Session {
    let draws = vec![
        Draw { position: Some(4), transient: 7, status: Status::TooMuch },
        Draw { position: Some(9), transient: 30, status: Status::Balanced },
    ];
    Session::new(
        question.to_string(),
        SpreadMode::Random,
        "two".to_string(),
        Stance::default(),
        draws,
    )
}

fn rich_session() -> Session {
    let mut s = plain_session("What needs attention first?");
    s.begin_reading().unwrap();
    s.ingest_reading(
        "[SUMMARY]\nPushing too hard.\n[CARD:1]\nDrive overheating.\n[CARD:2]\nResolve steady.\n[CORRECTION:1]\nTurn toward Balance.\n[LETTER]\nEase off.",
    )
    .unwrap();
    s.begin_expansion(&SectionRef::Card(0), "unpack").unwrap();
    s.ingest_expansion("The push started months ago.").unwrap();
    s.begin_thread(
        ThreadParent::Section("summary".to_string()),
        ThreadOp::Reflect,
        "since when?".to_string(),
        Draw { position: None, transient: 44, status: Status::Balanced },
    )
    .unwrap();
    s.ingest_thread("Since the deadline moved.").unwrap();
    s
}

#[test]
fn test_journal_lifecycle() {
    let tmp = tempdir().unwrap();
    let store = Store::at(tmp.path());

    // 1. Save two sessions
    let a = plain_session("first question");
    let b = rich_session();
    save_session(&store, &a).unwrap();
    save_session(&store, &b).unwrap();

    // 2. List shows both with denormalized columns
    let entries = list_entries(&store).unwrap();
    assert_eq!(entries.len(), 2);
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert!(ids.contains(&a.id.as_str()));
    assert!(ids.contains(&b.id.as_str()));
    let b_entry = entries.iter().find(|e| e.id == b.id).unwrap();
    assert_eq!(b_entry.cards, 2);
    assert_eq!(b_entry.state, "interpreted");
    assert_eq!(b_entry.mode, "random");

    // 3. Load the rich session back intact
    let loaded = load_session(&store, &b.id).unwrap();
    assert_eq!(loaded.question, "What needs attention first?");
    assert_eq!(loaded.node_count(), 1);
    assert_eq!(
        loaded.expansion(&SectionRef::Card(0), "unpack"),
        Some("The push started months ago.")
    );

    // 4. Delete is idempotent-safe and actually removes
    assert!(delete_session(&store, &a.id).unwrap());
    assert!(!delete_session(&store, &a.id).unwrap());
    assert_eq!(list_entries(&store).unwrap().len(), 1);
    assert!(load_session(&store, &a.id).is_err());
}

#[test]
fn test_rebuild_after_db_loss() {
    let tmp = tempdir().unwrap();
    let store = Store::at(tmp.path());

    // 1. Build up state: one rich save, one plain save, one delete
    let keep = rich_session();
    let drop_me = plain_session("short lived");
    save_session(&store, &keep).unwrap();
    save_session(&store, &drop_me).unwrap();
    delete_session(&store, &drop_me.id).unwrap();

    // 2. Lose the database, keep the event log
    fs::remove_file(store.journal_db_path()).unwrap();

    // 3. Replay
    let result = rebuild_from_events(&store).unwrap();
    assert_eq!(result["status"], "ok");
    assert_eq!(result["events"], 3);
    assert_eq!(result["sessions"], 1);

    // 4. The surviving session carries its thread tree and expansions
    let entries = list_entries(&store).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, keep.id);
    let loaded = load_session(&store, &keep.id).unwrap();
    assert_eq!(loaded.node_count(), 1);
    assert_eq!(
        loaded.expansion(&SectionRef::Card(0), "unpack"),
        Some("The push started months ago.")
    );

    // 5. Denormalized child rows came back too
    let conn = db::open_journal(&store).unwrap();
    let threads: i64 = conn
        .query_row("SELECT COUNT(*) FROM thread_nodes", [], |r| r.get(0))
        .unwrap();
    let expansions: i64 = conn
        .query_row("SELECT COUNT(*) FROM expansions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(threads, 1);
    assert_eq!(expansions, 1);
}

#[test]
fn test_event_log_is_replayable_jsonl() {
    let tmp = tempdir().unwrap();
    let store = Store::at(tmp.path());
    let ulid_re = Regex::new("^[0-9A-HJKMNP-TV-Z]{26}$").unwrap();
    let ts_re = Regex::new(r"^\d+Z$").unwrap();

    // 1. One save and one delete produce two log lines
    let s = plain_session("log shape");
    save_session(&store, &s).unwrap();
    delete_session(&store, &s.id).unwrap();

    let log = fs::read_to_string(store.events_path()).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);

    // 2. The save event carries the full session as payload
    let saved: JournalEvent = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(saved.event_type, "session.saved");
    assert_eq!(saved.session_id, s.id);
    assert!(ulid_re.is_match(&saved.event_id));
    assert!(ts_re.is_match(&saved.ts));
    let replayed: Session = serde_json::from_value(saved.payload).unwrap();
    assert_eq!(replayed.id, s.id);
    assert_eq!(replayed.draws.len(), 2);

    // 3. The delete event is a tombstone with an empty payload
    let deleted: JournalEvent = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(deleted.event_type, "session.deleted");
    assert_eq!(deleted.session_id, s.id);
    assert_eq!(deleted.payload, serde_json::json!({}));
    assert_ne!(deleted.event_id, saved.event_id);
}

#[test]
fn test_rebuild_on_empty_store_creates_db() {
    let tmp = tempdir().unwrap();
    let store = Store::at(tmp.path());

    // 1. No events file yet
    let result = rebuild_from_events(&store).unwrap();
    assert_eq!(result["events"], 0);
    assert_eq!(result["sessions"], 0);

    // 2. The database exists and is queryable
    assert!(store.journal_db_path().is_file());
    assert!(list_entries(&store).unwrap().is_empty());
}

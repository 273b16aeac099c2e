//! Saved-reading journal. Every save lands twice: a row set in SQLite for
//! querying and a JSONL event that can rebuild the database from scratch.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::catalog;
use crate::core::db;
use crate::core::error::NirmanakayaError;
use crate::core::output;
use crate::core::schemas;
use crate::core::session::{Session, ThreadParent};
use crate::core::stance;
use crate::core::store::Store;
use crate::core::time;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(name = "journal", about = "List, inspect, and maintain saved readings.")]
pub struct JournalCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: JournalCommand,
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// List saved sessions, most recently updated first.
    List,
    /// Show one saved session.
    Show {
        #[clap(value_name = "SESSION")]
        id: String,
    },
    /// Delete a saved session.
    Delete {
        #[clap(value_name = "SESSION")]
        id: String,
    },
    /// Rebuild the journal database from the event log.
    Rebuild,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalEvent {
    pub event_id: String,
    pub ts: String,
    pub event_type: String,
    pub session_id: String,
    pub payload: JsonValue,
}

#[derive(Debug, Serialize)]
pub struct JournalEntry {
    pub id: String,
    pub created: String,
    pub updated: String,
    pub question: String,
    pub mode: String,
    pub spread_key: String,
    pub cards: i64,
    pub state: String,
}

fn append_event(store: &Store, ev: &JournalEvent) -> Result<(), NirmanakayaError> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store.events_path())
        .map_err(NirmanakayaError::IoError)?;
    writeln!(f, "{}", serde_json::to_string(ev)?).map_err(NirmanakayaError::IoError)?;
    Ok(())
}

fn insert_event(conn: &Connection, ev: &JournalEvent) -> Result<(), NirmanakayaError> {
    conn.execute(
        "INSERT INTO journal_events(event_id, ts, event_type, session_id, payload)
         VALUES(?1, ?2, ?3, ?4, ?5)",
        params![
            ev.event_id,
            ev.ts,
            ev.event_type,
            ev.session_id,
            serde_json::to_string(&ev.payload)?
        ],
    )
    .map_err(NirmanakayaError::RusqliteError)?;
    Ok(())
}

fn upsert_session(conn: &Connection, session: &Session) -> Result<(), NirmanakayaError> {
    let data = serde_json::to_string(session)?;
    // REPLACE cascades child rows away; they are reinserted from the
    // aggregate below.
    conn.execute(
        "INSERT OR REPLACE INTO sessions(id, created, updated, question, mode, spread_key, cards, state, data)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            session.id,
            session.created,
            time::now_epoch_z(),
            session.question,
            session.mode.as_str(),
            session.spread_key,
            session.draws.len() as i64,
            session.state_label(),
            data
        ],
    )
    .map_err(NirmanakayaError::RusqliteError)?;

    conn.execute(
        "DELETE FROM thread_nodes WHERE session_id = ?1",
        params![session.id],
    )
    .map_err(NirmanakayaError::RusqliteError)?;
    for node in session.nodes.values() {
        let (parent_type, parent_id) = match &node.parent {
            ThreadParent::Section(key) => ("section", key.as_str()),
            ThreadParent::Node(id) => ("node", id.as_str()),
        };
        conn.execute(
            "INSERT INTO thread_nodes(id, session_id, parent_type, parent_id, op, input, transient, status, interpretation, created)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                node.id,
                session.id,
                parent_type,
                parent_id,
                node.op.as_str(),
                node.input,
                node.draw.transient as i64,
                node.draw.status as u8 as i64,
                node.interpretation,
                node.created
            ],
        )
        .map_err(NirmanakayaError::RusqliteError)?;
    }

    conn.execute(
        "DELETE FROM expansions WHERE session_id = ?1",
        params![session.id],
    )
    .map_err(NirmanakayaError::RusqliteError)?;
    for (section, lenses) in &session.expansions {
        for (lens, content) in lenses {
            conn.execute(
                "INSERT INTO expansions(session_id, section, lens, content)
                 VALUES(?1, ?2, ?3, ?4)",
                params![session.id, section, lens, content],
            )
            .map_err(NirmanakayaError::RusqliteError)?;
        }
    }
    Ok(())
}

/// Persist a session and append the save event to the log.
pub fn save_session(store: &Store, session: &Session) -> Result<(), NirmanakayaError> {
    store.ensure()?;
    let conn = db::open_journal(store)?;
    upsert_session(&conn, session)?;
    let ev = JournalEvent {
        event_id: time::new_event_id(),
        ts: time::now_epoch_z(),
        event_type: "session.saved".to_string(),
        session_id: session.id.clone(),
        payload: serde_json::to_value(session)?,
    };
    insert_event(&conn, &ev)?;
    append_event(store, &ev)?;
    Ok(())
}

pub fn load_session(store: &Store, id: &str) -> Result<Session, NirmanakayaError> {
    let conn = db::open_journal(store)?;
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM sessions WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(NirmanakayaError::RusqliteError)?;
    match data {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Err(NirmanakayaError::NotFound(format!("session '{}'", id))),
    }
}

pub fn list_entries(store: &Store) -> Result<Vec<JournalEntry>, NirmanakayaError> {
    let conn = db::open_journal(store)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, created, updated, question, mode, spread_key, cards, state
             FROM sessions ORDER BY updated DESC",
        )
        .map_err(NirmanakayaError::RusqliteError)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(JournalEntry {
                id: row.get(0)?,
                created: row.get(1)?,
                updated: row.get(2)?,
                question: row.get(3)?,
                mode: row.get(4)?,
                spread_key: row.get(5)?,
                cards: row.get(6)?,
                state: row.get(7)?,
            })
        })
        .map_err(NirmanakayaError::RusqliteError)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.map_err(NirmanakayaError::RusqliteError)?);
    }
    Ok(entries)
}

/// Remove a session. Returns false when no such row existed; cascade
/// clears its thread and expansion rows.
pub fn delete_session(store: &Store, id: &str) -> Result<bool, NirmanakayaError> {
    let conn = db::open_journal(store)?;
    let removed = conn
        .execute("DELETE FROM sessions WHERE id = ?1", params![id])
        .map_err(NirmanakayaError::RusqliteError)?;
    if removed == 0 {
        return Ok(false);
    }
    let ev = JournalEvent {
        event_id: time::new_event_id(),
        ts: time::now_epoch_z(),
        event_type: "session.deleted".to_string(),
        session_id: id.to_string(),
        payload: serde_json::json!({}),
    };
    insert_event(&conn, &ev)?;
    append_event(store, &ev)?;
    Ok(true)
}

fn replay_event(conn: &Connection, ev: &JournalEvent) -> Result<(), NirmanakayaError> {
    insert_event(conn, ev)?;
    match ev.event_type.as_str() {
        "session.saved" => {
            let session: Session = serde_json::from_value(ev.payload.clone())?;
            upsert_session(conn, &session)?;
        }
        "session.deleted" => {
            conn.execute(
                "DELETE FROM sessions WHERE id = ?1",
                params![ev.session_id],
            )
            .map_err(NirmanakayaError::RusqliteError)?;
        }
        other => {
            return Err(NirmanakayaError::ValidationError(format!(
                "unknown journal event type '{}'",
                other
            )))
        }
    }
    Ok(())
}

pub fn rebuild_db_from_events(events: &Path, out_db: &Path) -> Result<u64, NirmanakayaError> {
    let conn = db::db_connect(out_db)?;
    db::ensure_schema(&conn)?;

    let f = OpenOptions::new()
        .read(true)
        .open(events)
        .map_err(NirmanakayaError::IoError)?;
    let reader = BufReader::new(f);

    let mut count = 0u64;
    for line in reader.lines() {
        let line = line.map_err(NirmanakayaError::IoError)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let ev: JournalEvent = serde_json::from_str(line).map_err(|e| {
            NirmanakayaError::ValidationError(format!("invalid JSONL event: {}", e))
        })?;
        count += 1;
        replay_event(&conn, &ev)?;
    }
    Ok(count)
}

/// Rebuild the database from the event log: replay into a temp file, then
/// swap it into place. Counts in the result let the caller verify the
/// replayed state matches the log.
pub fn rebuild_from_events(store: &Store) -> Result<JsonValue, NirmanakayaError> {
    store.ensure()?;
    let ev_path = store.events_path();
    if !ev_path.is_file() {
        let conn = db::open_journal(store)?;
        drop(conn);
        return Ok(time::command_envelope(
            "journal.rebuild",
            "ok",
            serde_json::json!({
                "root": store.root.to_string_lossy(),
                "events": 0,
                "sessions": 0,
                "note": "no events file; created empty DB"
            }),
        ));
    }

    let tmp_db = store.root.join(format!(".{}.tmp", schemas::JOURNAL_DB_NAME));
    if tmp_db.exists() {
        fs::remove_file(&tmp_db).map_err(NirmanakayaError::IoError)?;
    }
    let count = rebuild_db_from_events(&ev_path, &tmp_db)?;

    let final_db = store.journal_db_path();
    if final_db.exists() {
        fs::remove_file(&final_db).map_err(NirmanakayaError::IoError)?;
    }
    fs::rename(&tmp_db, &final_db).map_err(NirmanakayaError::IoError)?;

    let sessions = list_entries(store)?.len();
    Ok(time::command_envelope(
        "journal.rebuild",
        "ok",
        serde_json::json!({
            "root": store.root.to_string_lossy(),
            "events": count,
            "sessions": sessions,
        }),
    ))
}

pub fn run_journal_cli(store: &Store, cli: JournalCli) -> Result<(), NirmanakayaError> {
    match &cli.command {
        JournalCommand::List => {
            let entries = list_entries(store)?;
            match cli.format {
                OutputFormat::Json => {
                    let envelope = time::command_envelope(
                        "journal.list",
                        "ok",
                        serde_json::json!({
                            "count": entries.len(),
                            "sessions": entries,
                        }),
                    );
                    println!("{}", serde_json::to_string_pretty(&envelope)?);
                }
                OutputFormat::Text => {
                    if entries.is_empty() {
                        println!("No saved readings.");
                        return Ok(());
                    }
                    for e in &entries {
                        println!(
                            "{}  {}  {}/{}  {} cards  {}  {}",
                            e.id,
                            e.updated,
                            e.mode,
                            e.spread_key,
                            e.cards,
                            e.state,
                            output::compact_line(&e.question, 48)
                        );
                    }
                }
            }
        }
        JournalCommand::Show { id } => {
            let session = load_session(store, id)?;
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&session)?);
                }
                OutputFormat::Text => {
                    println!("Session {}", session.id);
                    println!("Question: {}", output::compact_line(&session.question, 120));
                    println!(
                        "Mode: {} • {}   Stance: {}",
                        session.mode.as_str(),
                        session.spread_key,
                        stance::stance_label(&session.stance)
                    );
                    println!(
                        "State: {}   Threads: {}   Follow-ups: {}",
                        session.state_label(),
                        session.node_count(),
                        session.followups.len() / 2
                    );
                    println!("Draws:");
                    for (i, draw) in session.draws.iter().enumerate() {
                        let sig = catalog::signature(draw.transient)?;
                        println!(
                            "  {}. {} ({})",
                            i + 1,
                            draw.status.phrase(sig.name()),
                            sig.traditional()
                        );
                    }
                }
            }
        }
        JournalCommand::Delete { id } => {
            let deleted = delete_session(store, id)?;
            let envelope = time::command_envelope(
                "journal.delete",
                if deleted { "ok" } else { "not_found" },
                serde_json::json!({ "session": id, "deleted": deleted }),
            );
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        JournalCommand::Rebuild => {
            let result = rebuild_from_events(store)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

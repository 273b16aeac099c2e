//! Journal database schema. One SQLite file holds every saved session;
//! the JSONL event log beside it is the source of truth for rebuilds.
//!
//! The `sessions` row carries the full aggregate as JSON plus the columns
//! `list` filters on. `thread_nodes` and `expansions` are denormalized
//! from the aggregate on every save so they stay queryable on their own.

pub const JOURNAL_DB_NAME: &str = "journal.db";
pub const JOURNAL_EVENTS_NAME: &str = "journal.events.jsonl";

pub const JOURNAL_DB_SCHEMA_SESSIONS: &str = "
    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        created TEXT NOT NULL,
        updated TEXT NOT NULL,
        question TEXT NOT NULL,
        mode TEXT NOT NULL,
        spread_key TEXT NOT NULL,
        cards INTEGER NOT NULL,
        state TEXT NOT NULL,
        data TEXT NOT NULL
    )
";

pub const JOURNAL_DB_SCHEMA_THREAD_NODES: &str = "
    CREATE TABLE IF NOT EXISTS thread_nodes (
        id TEXT PRIMARY KEY,
        session_id TEXT NOT NULL,
        parent_type TEXT NOT NULL,
        parent_id TEXT NOT NULL,
        op TEXT NOT NULL,
        input TEXT NOT NULL,
        transient INTEGER NOT NULL,
        status INTEGER NOT NULL,
        interpretation TEXT NOT NULL,
        created TEXT NOT NULL,
        FOREIGN KEY(session_id) REFERENCES sessions(id) ON DELETE CASCADE
    )
";

pub const JOURNAL_DB_SCHEMA_EXPANSIONS: &str = "
    CREATE TABLE IF NOT EXISTS expansions (
        session_id TEXT NOT NULL,
        section TEXT NOT NULL,
        lens TEXT NOT NULL,
        content TEXT NOT NULL,
        PRIMARY KEY(session_id, section, lens),
        FOREIGN KEY(session_id) REFERENCES sessions(id) ON DELETE CASCADE
    )
";

pub const JOURNAL_DB_SCHEMA_EVENTS: &str = "
    CREATE TABLE IF NOT EXISTS journal_events (
        event_id TEXT PRIMARY KEY,
        ts TEXT NOT NULL,
        event_type TEXT NOT NULL,
        session_id TEXT NOT NULL,
        payload TEXT NOT NULL
    )
";

pub const JOURNAL_DB_SCHEMA_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_thread_nodes_session ON thread_nodes(session_id)";

pub const JOURNAL_SCHEMAS: [&str; 5] = [
    JOURNAL_DB_SCHEMA_SESSIONS,
    JOURNAL_DB_SCHEMA_THREAD_NODES,
    JOURNAL_DB_SCHEMA_EXPANSIONS,
    JOURNAL_DB_SCHEMA_EVENTS,
    JOURNAL_DB_SCHEMA_INDEX,
];

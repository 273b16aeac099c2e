//! Core modules for the Nirmanakaya reading engine.
//!
//! The static catalog and correction tables, the draw and assembly
//! pipeline, session state, persistence, and shared primitives live here.

pub mod assets;
pub mod catalog;
pub mod catalog_cli;
pub mod collaborator;
pub mod correction;
pub mod db;
pub mod docs_cli;
pub mod draw;
pub mod error;
pub mod export;
pub mod hotlink;
pub mod output;
pub mod parser;
pub mod prefs;
pub mod prompt;
pub mod schemas;
pub mod session;
pub mod share;
pub mod spread;
pub mod stance;
pub mod status;
pub mod store;
pub mod time;
pub mod tui;
pub mod validate;

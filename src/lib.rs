//! Nirmanakaya: a consciousness-architecture reading engine for the
//! terminal.
//!
//! The engine owns everything deterministic about a reading: the
//! 78-signature catalog, the four-status imbalance model, the pinned
//! correction tables, crypto-strong draws, prompt assembly, response
//! parsing, session state, persistence, sharing, and export. The one
//! thing it never does is interpret. Interpretation comes from an
//! external language-model collaborator that receives an assembled
//! request and returns marked-up text.
//!
//! # Reading flow
//!
//! ```bash
//! # One-time setup
//! nirmanakaya init
//!
//! # Draw three cards for a question
//! nirmanakaya draw new --question "What needs attention?"
//!
//! # Two-step interpretation: emit the payload, pipe the reply back
//! nirmanakaya reading request <session> > request.json
//! nirmanakaya reading ingest <session> --file reply.txt
//!
//! # Or one step, with a configured collaborator command
//! nirmanakaya reading run <session>
//!
//! # Explore from there
//! nirmanakaya reading show <session>
//! nirmanakaya expand <session> card:0 unpack
//! nirmanakaya thread reflect <session> summary --text "what about timing?"
//! nirmanakaya export markdown <session>
//! ```
//!
//! Every draw is saved to the journal immediately; every later step loads,
//! mutates, and re-saves the session, so the flow survives any number of
//! process boundaries.
//!
//! # Crate structure
//!
//! - [`core`]: catalog and correction tables, draws, prompts, parsing,
//!   session state, share codec, exports, persistence, validation gates
//! - [`plugins`]: the journal subsystem and the reading workflow commands

pub mod core;
pub mod plugins;

use crate::core::error::NirmanakayaError;
use crate::core::store::Store;
use crate::core::{catalog_cli, docs_cli, prefs, stance, time, validate};
use crate::plugins::journal;
use crate::plugins::reading::{
    DrawCli, ExpandCli, ExportCli, FollowupCli, ReadingCli, ShareCli, ThreadCli,
};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "nirmanakaya",
    version = env!("CARGO_PKG_VERSION"),
    about = "Consciousness-architecture readings: deterministic draws and corrections, with interpretation delegated to an external collaborator"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct ValidateCli {
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    format: String,
    /// Report the catalog digest alongside the gates.
    #[clap(long, short = 'v')]
    verbose: bool,
}

#[derive(clap::Args, Debug)]
struct PrefsCli {
    #[clap(subcommand)]
    command: PrefsCommand,
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    /// Show current preferences.
    Show,
    /// Set one preference: mode, spread, stance, or collaborator_cmd.
    Set { key: String, value: String },
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the data root and default preferences
    #[clap(name = "init", visible_alias = "i")]
    Init,

    /// Browse the 78-signature catalog
    #[clap(name = "catalog", visible_alias = "c")]
    Catalog(catalog_cli::CatalogCli),

    /// Draw spreads and inspect them
    #[clap(name = "draw")]
    Draw(DrawCli),

    /// Request, ingest, and render interpretations
    #[clap(name = "reading", visible_alias = "r")]
    Reading(ReadingCli),

    /// Expand one section of a reading through a lens
    #[clap(name = "expand", visible_alias = "x")]
    Expand(ExpandCli),

    /// Continue a reading: reflect or forge from a section or node
    #[clap(name = "thread", visible_alias = "t")]
    Thread(ThreadCli),

    /// Ask a follow-up question about the whole reading
    #[clap(name = "followup", visible_alias = "f")]
    Followup(FollowupCli),

    /// Encode and decode share codes
    #[clap(name = "share")]
    Share(ShareCli),

    /// Export a reading as Markdown or HTML
    #[clap(name = "export", visible_alias = "e")]
    Export(ExportCli),

    /// Saved readings: list, show, delete, rebuild
    #[clap(name = "journal", visible_alias = "j")]
    Journal(journal::JournalCli),

    /// Show and set preferences
    #[clap(name = "prefs", visible_alias = "p")]
    Prefs(PrefsCli),

    /// Run the static-data validation gates
    #[clap(name = "validate", visible_alias = "v")]
    Validate(ValidateCli),

    /// Read the embedded codex documents
    #[clap(name = "docs", visible_alias = "d")]
    Docs(docs_cli::DocsCli),

    /// Show version information
    #[clap(name = "version")]
    Version,
}

fn run_prefs_cli(store: &Store, cli: PrefsCli) -> Result<(), NirmanakayaError> {
    match cli.command {
        PrefsCommand::Show => {
            let prefs = prefs::load(store)?;
            println!("mode = {}", prefs.mode.as_str());
            println!("spread = {}", prefs.spread);
            println!("stance = {}", stance::stance_label(&prefs.stance));
            match &prefs.collaborator_cmd {
                Some(cmd) => println!("collaborator_cmd = {}", cmd),
                None => println!("collaborator_cmd = (unset)"),
            }
            Ok(())
        }
        PrefsCommand::Set { key, value } => {
            let mut prefs = prefs::load(store)?;
            prefs::set_value(&mut prefs, &key, &value)?;
            prefs::save(store, &prefs)?;
            let envelope = time::command_envelope(
                "prefs.set",
                "ok",
                serde_json::json!({ "key": key, "value": value }),
            );
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
    }
}

pub fn run() -> Result<(), NirmanakayaError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Validate(validate_cli) => {
            let json = match validate_cli.format.as_str() {
                "json" => true,
                "text" => false,
                other => {
                    return Err(NirmanakayaError::ValidationError(format!(
                        "unknown format '{}': expected text or json",
                        other
                    )))
                }
            };
            validate::run_validation(json, validate_cli.verbose)
        }
        Command::Docs(docs) => docs_cli::run_docs_cli(docs),
        Command::Catalog(catalog) => catalog_cli::run_catalog_cli(catalog),
        Command::Init => {
            let store = Store::resolve()?;
            store.ensure()?;
            let created = !store.prefs_path().exists();
            let prefs = if created {
                let defaults = prefs::Prefs::default();
                prefs::save(&store, &defaults)?;
                defaults
            } else {
                prefs::load(&store)?
            };
            let envelope = time::command_envelope(
                "init",
                "ok",
                serde_json::json!({
                    "root": store.root.to_string_lossy(),
                    "prefs_created": created,
                    "mode": prefs.mode.as_str(),
                    "spread": prefs.spread,
                }),
            );
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
        command => {
            let store = Store::resolve()?;
            match command {
                Command::Draw(c) => plugins::reading::run_draw_cli(&store, c),
                Command::Reading(c) => plugins::reading::run_reading_cli(&store, c),
                Command::Expand(c) => plugins::reading::run_expand_cli(&store, c),
                Command::Thread(c) => plugins::reading::run_thread_cli(&store, c),
                Command::Followup(c) => plugins::reading::run_followup_cli(&store, c),
                Command::Share(c) => plugins::reading::run_share_cli(&store, c),
                Command::Export(c) => plugins::reading::run_export_cli(&store, c),
                Command::Journal(c) => journal::run_journal_cli(&store, c),
                Command::Prefs(c) => run_prefs_cli(&store, c),
                _ => unreachable!(),
            }
        }
    }
}

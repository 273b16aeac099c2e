//! Reading workflow commands: draw a spread, interpret it through the
//! collaborator, then expand, thread, follow up, share, and export.
//!
//! Every generation step works two ways. With a configured collaborator
//! command, `run` variants complete in one shot. Without one, the command
//! prints the request payload as JSON and a matching ingest accepts the
//! raw response text, so any model on any transport can fill the gap.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

use crate::core::catalog;
use crate::core::collaborator::{self, Collaborator, CommandCollaborator};
use crate::core::draw;
use crate::core::error::NirmanakayaError;
use crate::core::export;
use crate::core::hotlink;
use crate::core::output;
use crate::core::prefs::{self, Prefs};
use crate::core::prompt::{self, GenerationRequest, ThreadOp};
use crate::core::session::{Pending, SectionRef, Session, ThreadParent};
use crate::core::share;
use crate::core::spread::{self, SpreadMode};
use crate::core::stance;
use crate::core::store::Store;
use crate::core::time;
use crate::plugins::journal;

#[derive(Parser, Debug)]
pub struct DrawCli {
    #[clap(subcommand)]
    command: DrawCommand,
}

#[derive(Subcommand, Debug)]
pub enum DrawCommand {
    /// Draw a new spread and save the session.
    New {
        /// Random spread key (one, two, three, four, five).
        #[clap(long, conflicts_with_all = ["durable", "forge"])]
        spread: Option<String>,
        /// Durable spread key (arc, quadraverse, fiveHouse).
        #[clap(long, conflicts_with = "forge")]
        durable: Option<String>,
        /// Single-card draw for a declared intention.
        #[clap(long)]
        forge: bool,
        /// The querent's question; empty means a general reading.
        #[clap(long, default_value = "")]
        question: String,
        /// Stance preset (clear, kind, playful, wise, oracle).
        #[clap(long)]
        stance: Option<String>,
    },
    /// Show the draws of a saved session.
    Show { session: String },
    /// Suggest a question to ask.
    Spark,
}

#[derive(Parser, Debug)]
pub struct ReadingCli {
    #[clap(subcommand)]
    command: ReadingCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReadingCommand {
    /// Assemble and print the collaborator request payload.
    Request { session: String },
    /// Ingest the collaborator's marker text (stdin unless --file).
    Ingest {
        session: String,
        #[clap(long)]
        file: Option<PathBuf>,
    },
    /// Request and ingest in one step via the configured collaborator.
    Run { session: String },
    /// Render the interpreted reading, or one section of it.
    Show {
        session: String,
        /// Section key: summary, card:N, correction:N, path, letter.
        #[clap(long)]
        section: Option<String>,
    },
    /// Fold or unfold a section in rendered output.
    Collapse { session: String, section: String },
}

#[derive(Parser, Debug)]
pub struct ExpandCli {
    session: String,
    /// Section key: summary, card:N, correction:N, path, letter.
    section: String,
    /// Lens key: unpack, clarify, architecture, example.
    lens: String,
    /// Ingest expansion text from this file.
    #[clap(long, conflicts_with_all = ["run", "clear"])]
    file: Option<PathBuf>,
    /// Run via the configured collaborator.
    #[clap(long, conflicts_with = "clear")]
    run: bool,
    /// Remove the stored expansion instead.
    #[clap(long)]
    clear: bool,
}

#[derive(Parser, Debug)]
pub struct ThreadCli {
    #[clap(subcommand)]
    command: ThreadCommand,
}

#[derive(Subcommand, Debug)]
pub enum ThreadCommand {
    /// Ask a question into a section or node; a new card answers.
    Reflect {
        session: String,
        /// Section key or thread node ID.
        parent: String,
        /// The inquiry text.
        #[clap(long)]
        text: String,
        /// Run via the configured collaborator.
        #[clap(long)]
        run: bool,
    },
    /// Declare an intention into a section or node; a new card responds.
    Forge {
        session: String,
        /// Section key or thread node ID.
        parent: String,
        /// The declaration text.
        #[clap(long)]
        text: String,
        /// Run via the configured collaborator.
        #[clap(long)]
        run: bool,
    },
    /// Ingest the collaborator's reply for the pending thread draw.
    Ingest {
        session: String,
        #[clap(long)]
        file: Option<PathBuf>,
    },
    /// Render all thread trees of a session.
    Show { session: String },
}

#[derive(Parser, Debug)]
pub struct FollowupCli {
    session: String,
    /// The follow-up question.
    #[clap(long)]
    text: Option<String>,
    /// Ingest the collaborator's answer from this file.
    #[clap(long)]
    file: Option<PathBuf>,
    /// Run via the configured collaborator.
    #[clap(long, conflicts_with = "file")]
    run: bool,
}

#[derive(Parser, Debug)]
pub struct ShareCli {
    #[clap(subcommand)]
    command: ShareCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShareCommand {
    /// Print the share code for a saved session.
    Encode { session: String },
    /// Decode a share code and show its draws.
    Decode {
        payload: String,
        /// Import the decoded reading as a new session.
        #[clap(long)]
        save: bool,
    },
}

#[derive(Parser, Debug)]
pub struct ExportCli {
    #[clap(subcommand)]
    command: ExportCommand,
}

#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    /// Write the reading as a Markdown document.
    Markdown {
        session: String,
        /// Output path; defaults to a generated filename.
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Write the reading as a standalone HTML document.
    Html {
        session: String,
        /// Output path; defaults to a generated filename.
        #[clap(long)]
        out: Option<PathBuf>,
    },
}

fn read_text_input(file: Option<&PathBuf>) -> Result<String, NirmanakayaError> {
    let text = match file {
        Some(path) => fs::read_to_string(path).map_err(NirmanakayaError::IoError)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(NirmanakayaError::IoError)?;
            buf
        }
    };
    if text.trim().is_empty() {
        return Err(NirmanakayaError::ValidationError(
            "response text is empty".to_string(),
        ));
    }
    Ok(text)
}

fn resolve_collaborator(store: &Store) -> Result<CommandCollaborator, NirmanakayaError> {
    let prefs = prefs::load(store)?;
    collaborator::configured(prefs.collaborator_cmd.as_deref()).ok_or_else(|| {
        NirmanakayaError::GenerationFailure(
            "no collaborator configured; set the collaborator_cmd preference or \
             NIRMANAKAYA_COLLABORATOR, or use the request/ingest two-step"
                .to_string(),
        )
    })
}

/// Transport failures surface with a per-call-site prefix.
fn prefixed(prefix: &str, err: NirmanakayaError) -> NirmanakayaError {
    let msg = match err {
        NirmanakayaError::GenerationFailure(m) => m,
        other => other.to_string(),
    };
    NirmanakayaError::GenerationFailure(format!("{}{}", prefix, msg))
}

fn parse_section(key: &str) -> Result<SectionRef, NirmanakayaError> {
    SectionRef::parse(key).ok_or_else(|| {
        NirmanakayaError::ValidationError(format!(
            "unknown section key '{}': expected summary, card:N, correction:N, path, or letter",
            key
        ))
    })
}

/// Section keys resolve first; anything else is taken as a node ID.
fn parse_parent(raw: &str) -> ThreadParent {
    match SectionRef::parse(raw) {
        Some(section) => ThreadParent::Section(section.key()),
        None => ThreadParent::Node(raw.to_string()),
    }
}

fn print_request(request: &GenerationRequest) -> Result<(), NirmanakayaError> {
    println!("{}", serde_json::to_string_pretty(request)?);
    Ok(())
}

fn print_envelope(cmd: &str, extra: serde_json::Value) -> Result<(), NirmanakayaError> {
    let envelope = time::command_envelope(cmd, "ok", extra);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn reading_stats(session: &Session) -> serde_json::Value {
    match &session.reading {
        Some(r) => serde_json::json!({
            "cards": r.cards.len(),
            "corrections": r.corrections.len(),
            "summary": r.summary.is_some(),
            "path": r.rebalancer_summary.is_some(),
            "letter": r.letter.is_some(),
        }),
        None => serde_json::json!({ "cards": 0 }),
    }
}

/// Resolve mode, spread, stance, and draws for `draw new`.
fn new_session(
    prefs: &Prefs,
    spread: Option<&str>,
    durable: Option<&str>,
    forge: bool,
    question: &str,
    stance_key: Option<&str>,
) -> Result<Session, NirmanakayaError> {
    let (mode, key) = if forge {
        (SpreadMode::Forge, String::new())
    } else if let Some(k) = durable {
        (SpreadMode::Durable, k.to_string())
    } else if let Some(k) = spread {
        (SpreadMode::Random, k.to_string())
    } else {
        (prefs.mode, prefs.spread.clone())
    };
    let count = spread::spread_count(mode, &key)?;
    let stance = match stance_key {
        Some(k) => stance::delivery_preset(k).ok_or_else(|| {
            NirmanakayaError::ValidationError(format!(
                "unknown stance preset '{}': expected one of {}",
                k,
                stance::PRESET_KEYS.join(", ")
            ))
        })?,
        None => prefs.stance,
    };
    let draws = draw::generate_spread(count, mode == SpreadMode::Durable)?;
    Ok(Session::new(question.to_string(), mode, key, stance, draws))
}

pub fn run_draw_cli(store: &Store, cli: DrawCli) -> Result<(), NirmanakayaError> {
    match &cli.command {
        DrawCommand::New { spread, durable, forge, question, stance } => {
            let prefs = prefs::load(store)?;
            let session = new_session(
                &prefs,
                spread.as_deref(),
                durable.as_deref(),
                *forge,
                question,
                stance.as_deref(),
            )?;
            journal::save_session(store, &session)?;
            print_envelope(
                "draw.new",
                serde_json::json!({
                    "session": session.id,
                    "mode": session.mode.as_str(),
                    "spread": session.spread_key,
                    "cards": session.draws.len(),
                    "stance": stance::stance_label(&session.stance),
                    "state": session.state_label(),
                }),
            )
        }
        DrawCommand::Show { session } => {
            let session = journal::load_session(store, session)?;
            output::print_session_header(&session);
            output::print_draws(&session)
        }
        DrawCommand::Spark => {
            if let Some(pick) = prompt::SUGGESTIONS.choose(&mut OsRng) {
                println!("Try asking: \"{}\"", pick);
                println!(
                    "{}",
                    "nirmanakaya draw new --question \"...\"".bright_black()
                );
            }
            Ok(())
        }
    }
}

pub fn run_reading_cli(store: &Store, cli: ReadingCli) -> Result<(), NirmanakayaError> {
    match &cli.command {
        ReadingCommand::Request { session: id } => {
            let mut session = journal::load_session(store, id)?;
            session.begin_reading()?;
            let question = prompt::effective_question(&session.question, session.mode);
            let request = prompt::reading_request(
                &question,
                session.mode,
                &session.spread_key,
                &session.stance,
                &session.draws,
            )?;
            journal::save_session(store, &session)?;
            print_request(&request)
        }
        ReadingCommand::Ingest { session: id, file } => {
            let text = read_text_input(file.as_ref())?;
            let mut session = journal::load_session(store, id)?;
            session.ingest_reading(&text)?;
            journal::save_session(store, &session)?;
            print_envelope(
                "reading.ingest",
                serde_json::json!({
                    "session": session.id,
                    "reading": reading_stats(&session),
                    "state": session.state_label(),
                }),
            )
        }
        ReadingCommand::Run { session: id } => {
            let bridge = resolve_collaborator(store)?;
            let mut session = journal::load_session(store, id)?;
            session.begin_reading()?;
            let question = prompt::effective_question(&session.question, session.mode);
            let request = prompt::reading_request(
                &question,
                session.mode,
                &session.spread_key,
                &session.stance,
                &session.draws,
            )?;
            let response = bridge
                .generate(&request)
                .map_err(|e| prefixed("Error: ", e))?;
            session.ingest_reading(&response)?;
            journal::save_session(store, &session)?;
            print_envelope(
                "reading.run",
                serde_json::json!({
                    "session": session.id,
                    "collaborator": bridge.program(),
                    "est_tokens": request.est_tokens,
                    "reading": reading_stats(&session),
                    "state": session.state_label(),
                }),
            )
        }
        ReadingCommand::Show { session: id, section } => {
            let session = journal::load_session(store, id)?;
            match section {
                Some(key) => {
                    let section = parse_section(key)?;
                    let content = session.section_content(&section).ok_or_else(|| {
                        NirmanakayaError::NotFound(format!(
                            "section '{}' in this reading",
                            section.key()
                        ))
                    })?;
                    println!("{}", hotlink::highlight(content));
                }
                None => output::print_reading(&session)?,
            }
            Ok(())
        }
        ReadingCommand::Collapse { session: id, section } => {
            let section = parse_section(section)?;
            let mut session = journal::load_session(store, id)?;
            let collapsed = session.toggle_collapse(&section);
            journal::save_session(store, &session)?;
            print_envelope(
                "reading.collapse",
                serde_json::json!({
                    "session": session.id,
                    "section": section.key(),
                    "collapsed": collapsed,
                }),
            )
        }
    }
}

pub fn run_expand_cli(store: &Store, cli: ExpandCli) -> Result<(), NirmanakayaError> {
    let section = parse_section(&cli.section)?;
    let lens = prompt::expansion_lens(&cli.lens).ok_or_else(|| {
        NirmanakayaError::ValidationError(format!(
            "unknown expansion lens '{}': expected one of {}",
            cli.lens,
            prompt::EXPANSION_LENSES
                .iter()
                .map(|l| l.key)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;
    let mut session = journal::load_session(store, &cli.session)?;

    if cli.clear {
        let removed = session.remove_expansion(&section, lens.key);
        if removed {
            journal::save_session(store, &session)?;
        }
        return print_envelope(
            "expand.clear",
            serde_json::json!({
                "session": session.id,
                "section": section.key(),
                "lens": lens.key,
                "removed": removed,
            }),
        );
    }

    if let Some(path) = &cli.file {
        let text = read_text_input(Some(path))?;
        match &session.pending {
            Some(Pending::Expansion { section: s, lens: l })
                if *s == section.key() && *l == lens.key => {}
            Some(Pending::Expansion { section: s, lens: l }) => {
                return Err(NirmanakayaError::ValidationError(format!(
                    "pending expansion is {}/{}, not {}/{}",
                    s,
                    l,
                    section.key(),
                    lens.key
                )));
            }
            Some(_) => {
                return Err(NirmanakayaError::ValidationError(
                    "pending request is not an expansion".to_string(),
                ));
            }
            None => session.begin_expansion(&section, lens.key)?,
        }
        session.ingest_expansion(&text)?;
        journal::save_session(store, &session)?;
        return print_envelope(
            "expand.ingest",
            serde_json::json!({
                "session": session.id,
                "section": section.key(),
                "lens": lens.key,
                "chars": text.trim().chars().count(),
            }),
        );
    }

    let question = prompt::effective_question(&session.question, session.mode);
    let (context, content) = session.expansion_context(&section)?;
    let lens_prompt = if matches!(section, SectionRef::Path) {
        lens.path_prompt
    } else {
        lens.prompt
    };
    let request = prompt::expansion_request(
        &question,
        session.mode,
        &session.spread_key,
        &session.stance,
        &session.draws,
        &context,
        &content,
        lens_prompt,
    )?;
    session.begin_expansion(&section, lens.key)?;

    if cli.run {
        let bridge = resolve_collaborator(store)?;
        let response = bridge
            .generate(&request)
            .map_err(|e| prefixed("Expansion error: ", e))?;
        session.ingest_expansion(&response)?;
        journal::save_session(store, &session)?;
        print_envelope(
            "expand.run",
            serde_json::json!({
                "session": session.id,
                "section": section.key(),
                "lens": lens.key,
                "est_tokens": request.est_tokens,
            }),
        )
    } else {
        journal::save_session(store, &session)?;
        print_request(&request)
    }
}

fn run_thread_begin(
    store: &Store,
    id: &str,
    parent_raw: &str,
    op: ThreadOp,
    text: &str,
    run: bool,
) -> Result<(), NirmanakayaError> {
    let mut session = journal::load_session(store, id)?;
    let parent = parse_parent(parent_raw);
    let (label, content) = session.thread_parent_context(&parent)?;
    let new_draw = draw::single_draw();
    let question = prompt::effective_question(&session.question, session.mode);
    let overview = session
        .reading
        .as_ref()
        .and_then(|r| r.summary.clone())
        .unwrap_or_default();
    let nested = matches!(parent, ThreadParent::Node(_));
    let request = prompt::thread_request(
        op, &question, &session.stance, &overview, &label, &content, text, &new_draw, nested,
    )?;
    session.begin_thread(parent, op, text.to_string(), new_draw)?;

    if run {
        let bridge = resolve_collaborator(store)?;
        let response = bridge
            .generate(&request)
            .map_err(|e| prefixed("Thread error: ", e))?;
        let node_id = session.ingest_thread(&response)?;
        journal::save_session(store, &session)?;
        let node = session.node(&node_id)?;
        let sig = catalog::signature(node.draw.transient)?;
        print_envelope(
            &format!("thread.{}", op.as_str()),
            serde_json::json!({
                "session": session.id,
                "node": node_id,
                "card": node.draw.status.phrase(sig.name()),
                "est_tokens": request.est_tokens,
            }),
        )
    } else {
        journal::save_session(store, &session)?;
        print_request(&request)
    }
}

pub fn run_thread_cli(store: &Store, cli: ThreadCli) -> Result<(), NirmanakayaError> {
    match &cli.command {
        ThreadCommand::Reflect { session, parent, text, run } => {
            run_thread_begin(store, session, parent, ThreadOp::Reflect, text, *run)
        }
        ThreadCommand::Forge { session, parent, text, run } => {
            run_thread_begin(store, session, parent, ThreadOp::Forge, text, *run)
        }
        ThreadCommand::Ingest { session: id, file } => {
            let text = read_text_input(file.as_ref())?;
            let mut session = journal::load_session(store, id)?;
            let node_id = session.ingest_thread(&text)?;
            journal::save_session(store, &session)?;
            let node = session.node(&node_id)?;
            let sig = catalog::signature(node.draw.transient)?;
            print_envelope(
                "thread.ingest",
                serde_json::json!({
                    "session": session.id,
                    "node": node_id,
                    "op": node.op.as_str(),
                    "card": node.draw.status.phrase(sig.name()),
                }),
            )
        }
        ThreadCommand::Show { session: id } => {
            let session = journal::load_session(store, id)?;
            output::print_session_header(&session);
            println!();
            output::print_thread_trees(&session)
        }
    }
}

pub fn run_followup_cli(store: &Store, cli: FollowupCli) -> Result<(), NirmanakayaError> {
    let mut session = journal::load_session(store, &cli.session)?;

    if let Some(path) = &cli.file {
        let answer = read_text_input(Some(path))?;
        let pending_followup = matches!(&session.pending, Some(Pending::Followup { .. }));
        if !pending_followup {
            match (&session.pending, &cli.text) {
                (Some(_), _) => {
                    return Err(NirmanakayaError::ValidationError(
                        "pending request is not a follow-up".to_string(),
                    ))
                }
                (None, Some(text)) => session.begin_followup(text.clone())?,
                (None, None) => {
                    return Err(NirmanakayaError::ValidationError(
                        "no pending follow-up; pass --text to ask one".to_string(),
                    ))
                }
            }
        }
        session.ingest_followup(&answer)?;
        journal::save_session(store, &session)?;
        return print_envelope(
            "followup.ingest",
            serde_json::json!({
                "session": session.id,
                "followups": session.followups.len() / 2,
            }),
        );
    }

    let text = cli.text.clone().ok_or_else(|| {
        NirmanakayaError::ValidationError("a follow-up needs --text".to_string())
    })?;
    let request = {
        let parsed = session.reading.as_ref().ok_or_else(|| {
            NirmanakayaError::ValidationError(
                "session has no interpreted reading yet".to_string(),
            )
        })?;
        prompt::followup_request(
            session.mode,
            &session.spread_key,
            &session.stance,
            &session.draws,
            parsed,
            &text,
        )?
    };
    session.begin_followup(text)?;

    if cli.run {
        let bridge = resolve_collaborator(store)?;
        let response = bridge
            .generate(&request)
            .map_err(|e| prefixed("Error: ", e))?;
        session.ingest_followup(&response)?;
        journal::save_session(store, &session)?;
        print_envelope(
            "followup.run",
            serde_json::json!({
                "session": session.id,
                "followups": session.followups.len() / 2,
                "est_tokens": request.est_tokens,
            }),
        )
    } else {
        journal::save_session(store, &session)?;
        print_request(&request)
    }
}

pub fn run_share_cli(store: &Store, cli: ShareCli) -> Result<(), NirmanakayaError> {
    match &cli.command {
        ShareCommand::Encode { session: id } => {
            let session = journal::load_session(store, id)?;
            let code = share::encode_draws(
                &session.draws,
                session.mode,
                &session.spread_key,
                &session.stance,
                &session.question,
            );
            println!("{}", code);
            Ok(())
        }
        ShareCommand::Decode { payload, save } => {
            let decoded = share::decode_draws(payload).ok_or_else(|| {
                NirmanakayaError::ValidationError("share code is not valid".to_string())
            })?;
            let mut session = Session::new(
                decoded.question,
                decoded.mode,
                decoded.spread_key,
                decoded.stance,
                decoded.draws,
            );
            session.shared = true;
            if *save {
                journal::save_session(store, &session)?;
                print_envelope(
                    "share.import",
                    serde_json::json!({
                        "session": session.id,
                        "mode": session.mode.as_str(),
                        "spread": session.spread_key,
                        "cards": session.draws.len(),
                    }),
                )
            } else {
                output::print_session_header(&session);
                output::print_draws(&session)
            }
        }
    }
}

pub fn run_export_cli(store: &Store, cli: ExportCli) -> Result<(), NirmanakayaError> {
    let (id, out, ext) = match &cli.command {
        ExportCommand::Markdown { session, out } => (session, out, "md"),
        ExportCommand::Html { session, out } => (session, out, "html"),
    };
    let session = journal::load_session(store, id)?;
    let content = match ext {
        "md" => export::export_markdown(&session)?,
        _ => export::export_html(&session)?,
    };
    let path = out
        .clone()
        .unwrap_or_else(|| PathBuf::from(export::export_filename(&session, ext)));
    fs::write(&path, &content).map_err(NirmanakayaError::IoError)?;
    print_envelope(
        &format!("export.{}", if ext == "md" { "markdown" } else { "html" }),
        serde_json::json!({
            "session": session.id,
            "path": path.to_string_lossy(),
            "bytes": content.len(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_parent_distinguishes_sections_from_nodes() {
        assert_eq!(
            parse_parent("card:2"),
            ThreadParent::Section("card:2".to_string())
        );
        assert_eq!(
            parse_parent("summary"),
            ThreadParent::Section("summary".to_string())
        );
        assert_eq!(
            parse_parent("01JC2K3H4M5N6P7Q8R9S0T1V2W"),
            ThreadParent::Node("01JC2K3H4M5N6P7Q8R9S0T1V2W".to_string())
        );
    }

    #[test]
    fn test_new_session_resolves_modes() {
        let prefs = Prefs::default();
        let s = new_session(&prefs, None, None, false, "q", None).unwrap();
        assert_eq!(s.mode, SpreadMode::Random);
        assert_eq!(s.spread_key, "three");
        assert_eq!(s.draws.len(), 3);

        let s = new_session(&prefs, None, None, true, "", None).unwrap();
        assert_eq!(s.mode, SpreadMode::Forge);
        assert_eq!(s.spread_key, "");
        assert_eq!(s.draws.len(), 1);
        assert!(s.draws[0].position.is_none());

        let s = new_session(&prefs, None, Some("arc"), false, "q", Some("oracle")).unwrap();
        assert_eq!(s.mode, SpreadMode::Durable);
        assert_eq!(s.stance, stance::delivery_preset("oracle").unwrap());
        assert!(s.draws.iter().all(|d| d.position.is_none()));

        assert!(new_session(&prefs, Some("ninety"), None, false, "q", None).is_err());
        assert!(new_session(&prefs, None, None, false, "q", Some("bogus")).is_err());
    }

    #[test]
    fn test_read_text_input_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[SUMMARY]\nAll well.").unwrap();
        let text = read_text_input(Some(&f.path().to_path_buf())).unwrap();
        assert!(text.contains("[SUMMARY]"));

        let empty = NamedTempFile::new().unwrap();
        assert!(read_text_input(Some(&empty.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_prefixed_error_keeps_call_site_prefix() {
        let err = prefixed(
            "Thread error: ",
            NirmanakayaError::GenerationFailure("model offline".to_string()),
        );
        assert!(err.to_string().contains("Thread error: model offline"));
    }

    #[test]
    fn test_section_parse_rejects_unknown_keys() {
        assert!(parse_section("card:1").is_ok());
        assert!(parse_section("chapter:1").is_err());
    }
}

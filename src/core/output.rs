//! Terminal rendering for sessions: draw summaries, the interpreted
//! reading with its expansions and threads, and compact previews for
//! listings.

use colored::Colorize;

use crate::core::catalog;
use crate::core::correction;
use crate::core::error::NirmanakayaError;
use crate::core::hotlink;
use crate::core::prompt::{ThreadOp, EXPANSION_LENSES};
use crate::core::session::{SectionRef, Session};
use crate::core::spread::{self, SpreadMode};
use crate::core::stance;
use crate::core::tui::{self, BoxStyle};

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn draw_context(session: &Session, card_index: usize) -> String {
    if session.mode == SpreadMode::Durable {
        if let Some(config) = spread::durable_spread(&session.spread_key) {
            if let Some(frame) = config.frames.get(card_index) {
                return frame.name.to_string();
            }
        }
    }
    format!("Position {}", card_index + 1)
}

pub fn print_session_header(session: &Session) {
    tui::render_box(
        "Nirmanakaya Reading",
        &format!(
            "{} • {}",
            spread::spread_display_name(session.mode, &session.spread_key),
            stance::stance_label(&session.stance)
        ),
        BoxStyle::Info,
    );
    println!();
    let question = if session.question.trim().is_empty() {
        "General reading"
    } else {
        session.question.as_str()
    };
    println!("{} {}", "Question:".bold(), question);
}

/// One status-tinted box per draw, with its architecture line and the
/// pinned correction underneath.
pub fn print_draws(session: &Session) -> Result<(), NirmanakayaError> {
    for (i, draw) in session.draws.iter().enumerate() {
        let sig = catalog::signature(draw.transient)?;
        println!();
        println!(
            "{}",
            format!("Signature {} — {}", i + 1, draw_context(session, i)).bold()
        );
        tui::render_box(
            &draw.status.phrase(sig.name()),
            sig.traditional(),
            BoxStyle::for_status(draw.status),
        );
        match correction::compute_correction(draw.transient, draw.status)? {
            Some(corr) => {
                if let Some(text) = correction::correction_text(&corr) {
                    println!("  {} {}", "Correction:".bright_green(), text);
                }
            }
            None => {
                if draw.status.is_imbalanced() {
                    println!("  {}", "No correction path from here.".bright_black());
                }
            }
        }
    }
    Ok(())
}

fn print_expansions(session: &Session, section: &SectionRef) {
    for lens in EXPANSION_LENSES.iter() {
        if let Some(content) = session.expansion(section, lens.key) {
            println!();
            println!("{}", format!("{}:", lens.label).bold());
            println!("{}", hotlink::highlight(content));
        }
    }
}

fn print_thread_node(
    session: &Session,
    id: &str,
    depth: usize,
) -> Result<(), NirmanakayaError> {
    let node = session.node(id)?;
    let sig = catalog::signature(node.draw.transient)?;
    let pad = "  ".repeat(depth + 1);
    let label = match node.op {
        ThreadOp::Reflect => "Reflecting".bright_cyan(),
        ThreadOp::Forge => "Forging".bright_yellow(),
    };
    println!();
    println!(
        "{}↳ {}: \"{}\"",
        pad,
        label,
        compact_line(&node.input, 60)
    );
    println!(
        "{}  {}",
        pad,
        hotlink::highlight(&node.draw.status.phrase(sig.name()))
    );
    println!("{}  {}", pad, hotlink::highlight(&node.interpretation));
    for child in &node.children {
        print_thread_node(session, child, depth + 1)?;
    }
    Ok(())
}

fn print_threads(session: &Session, section: &SectionRef) -> Result<(), NirmanakayaError> {
    for id in session.roots_for(section) {
        print_thread_node(session, id, 0)?;
    }
    Ok(())
}

fn section_title(session: &Session, section: &SectionRef) -> String {
    match section {
        SectionRef::Summary => "Overview".to_string(),
        SectionRef::Letter => "Letter".to_string(),
        SectionRef::Path => "Path to Balance".to_string(),
        SectionRef::Card(i) => {
            format!("Signature {} — {}", i + 1, draw_context(session, *i))
        }
        SectionRef::Correction(i) => format!("Correction for Signature {}", i + 1),
    }
}

fn collapsed_marker() {
    println!("{}", "(collapsed)".bright_black());
}

/// All thread trees in the session, grouped under the section they hang
/// off, in reading order.
pub fn print_thread_trees(session: &Session) -> Result<(), NirmanakayaError> {
    let mut sections = vec![SectionRef::Summary];
    for i in 0..session.draws.len() {
        sections.push(SectionRef::Card(i));
        sections.push(SectionRef::Correction(i));
    }
    sections.push(SectionRef::Path);
    sections.push(SectionRef::Letter);

    let mut any = false;
    for section in sections {
        if session.roots_for(&section).is_empty() {
            continue;
        }
        any = true;
        tui::print_section(&section_title(session, &section));
        print_threads(session, &section)?;
    }
    if !any {
        println!("No threads yet.");
    }
    Ok(())
}

/// Render the full interpreted reading with known terms colored.
pub fn print_reading(session: &Session) -> Result<(), NirmanakayaError> {
    let reading = session.reading.as_ref().ok_or_else(|| {
        NirmanakayaError::ValidationError(
            "session has no interpreted reading yet".to_string(),
        )
    })?;
    print_session_header(session);

    if let Some(summary) = &reading.summary {
        tui::print_section("Overview");
        if session.is_collapsed(&SectionRef::Summary) {
            collapsed_marker();
        } else {
            println!("{}", hotlink::highlight(summary));
            print_expansions(session, &SectionRef::Summary);
            print_threads(session, &SectionRef::Summary)?;
        }
    }

    for card in &reading.cards {
        let draw = session.draws.get(card.index).ok_or_else(|| {
            NirmanakayaError::OutOfRange(format!("card index {}", card.index))
        })?;
        let sig = catalog::signature(draw.transient)?;
        tui::print_section(&format!(
            "Signature {} — {}",
            card.index + 1,
            draw_context(session, card.index)
        ));
        if session.is_collapsed(&SectionRef::Card(card.index)) {
            collapsed_marker();
            continue;
        }
        println!(
            "{} {}",
            hotlink::highlight(&draw.status.phrase(sig.name())),
            format!("({})", sig.traditional()).bright_black()
        );
        println!();
        println!("{}", hotlink::highlight(&card.content));
        print_expansions(session, &SectionRef::Card(card.index));

        if let Some(corr) = reading.correction(card.index) {
            let sentence = correction::compute_correction(draw.transient, draw.status)
                .ok()
                .flatten()
                .as_ref()
                .and_then(correction::correction_text)
                .unwrap_or_else(|| "See below".to_string());
            println!();
            println!("{}", format!("Correction: {}", sentence).bright_green());
            if session.is_collapsed(&SectionRef::Correction(card.index)) {
                collapsed_marker();
            } else {
                println!("{}", hotlink::highlight(&corr.content));
                print_expansions(session, &SectionRef::Correction(card.index));
            }
        }
        print_threads(session, &SectionRef::Card(card.index))?;
    }

    if let Some(path) = &reading.rebalancer_summary {
        tui::print_section("◈ Path to Balance");
        if session.is_collapsed(&SectionRef::Path) {
            collapsed_marker();
        } else {
            println!("{}", hotlink::highlight(path));
            print_expansions(session, &SectionRef::Path);
            print_threads(session, &SectionRef::Path)?;
        }
    }
    if let Some(letter) = &reading.letter {
        tui::print_section("Letter");
        if session.is_collapsed(&SectionRef::Letter) {
            collapsed_marker();
        } else {
            println!("{}", hotlink::highlight(letter));
            print_expansions(session, &SectionRef::Letter);
            print_threads(session, &SectionRef::Letter)?;
        }
    }

    if !session.followups.is_empty() {
        tui::print_section("Follow-ups");
        for msg in &session.followups {
            if msg.role == "user" {
                println!();
                println!("{} {}", "»".bold(), msg.content);
            } else {
                println!("{}", hotlink::highlight(&msg.content));
            }
        }
    }
    Ok(())
}

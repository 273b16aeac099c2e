//! Markdown and HTML export. Both are pure functions of a session; the
//! catalog and correction tables supply everything else, so a completed
//! reading can be re-rendered without the collaborator.

use crate::core::catalog::{self, Signature};
use crate::core::correction;
use crate::core::error::NirmanakayaError;
use crate::core::hotlink;
use crate::core::parser::ParsedReading;
use crate::core::prompt::{ThreadOp, EXPANSION_LENSES};
use crate::core::session::{SectionRef, Session};
use crate::core::spread::{self, SpreadMode};
use crate::core::stance;
use chrono::Utc;

/// Lowercase, hyphenate, and strip a title down to a filename fragment.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => {}
            '\u{2014}' | '\u{2013}' => out.push('-'),
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => out.push(c),
            c if c.is_whitespace() => out.push('-'),
            _ => {}
        }
    }
    let mut collapsed = String::with_capacity(out.len());
    let mut prev_hyphen = false;
    for ch in out.chars() {
        if ch == '-' {
            if !prev_hyphen {
                collapsed.push('-');
            }
            prev_hyphen = true;
        } else {
            collapsed.push(ch);
            prev_hyphen = false;
        }
    }
    let mut slug: String = collapsed.trim_matches('-').chars().take(40).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Filename slug priority: the question when it carries enough signal,
/// then the summary, then a plain fallback.
pub fn export_filename(session: &Session, extension: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d");
    let summary = session
        .reading
        .as_ref()
        .and_then(|r| r.summary.as_deref())
        .unwrap_or("");
    let slug = if session.question.trim().len() > 10 {
        slugify(session.question.trim())
    } else if summary.trim().len() > 10 {
        slugify(summary.trim())
    } else {
        "reading".to_string()
    };
    format!("nirmanakaya-{}-{}.{}", slug, date, extension)
}

fn reading_ref(session: &Session) -> Result<&ParsedReading, NirmanakayaError> {
    session.reading.as_ref().ok_or_else(|| {
        NirmanakayaError::ValidationError(
            "session has no interpreted reading to export".to_string(),
        )
    })
}

fn card_context(session: &Session, card_index: usize) -> String {
    if session.mode == SpreadMode::Durable {
        if let Some(config) = spread::durable_spread(&session.spread_key) {
            if let Some(frame) = config.frames.get(card_index) {
                return frame.name.to_string();
            }
        }
    }
    format!("Position {}", card_index + 1)
}

fn correction_sentence(transient: u8, status: crate::core::status::Status) -> Option<String> {
    correction::compute_correction(transient, status)
        .ok()
        .flatten()
        .as_ref()
        .and_then(correction::correction_text)
}

fn markdown_expansions(session: &Session, section: &SectionRef) -> String {
    let mut out = String::new();
    for lens in EXPANSION_LENSES.iter() {
        if let Some(content) = session.expansion(section, lens.key) {
            out.push_str(&format!(
                "#### {}\n\n{}\n\n",
                lens.label,
                hotlink::annotate_markdown(content)
            ));
        }
    }
    out
}

pub fn export_markdown(session: &Session) -> Result<String, NirmanakayaError> {
    let reading = reading_ref(session)?;
    let date = Utc::now().format("%Y-%m-%d");

    let mut md = String::new();
    md.push_str("# Nirmanakaya Reading\n\n");
    md.push_str(&format!("**Date:** {}\n\n", date));
    md.push_str(&format!("## Question\n\n{}\n\n", session.question));
    md.push_str(&format!(
        "**Spread:** {}  \n",
        spread::spread_display_name(session.mode, &session.spread_key)
    ));
    md.push_str(&format!("**Stance:** {}\n\n", stance::stance_label(&session.stance)));
    md.push_str("---\n\n");

    if let Some(summary) = &reading.summary {
        md.push_str(&format!(
            "## Summary\n\n{}\n\n",
            hotlink::annotate_markdown(summary)
        ));
        md.push_str(&markdown_expansions(session, &SectionRef::Summary));
    }

    md.push_str("## Signatures\n\n");
    for card in &reading.cards {
        let draw = session.draws.get(card.index).ok_or_else(|| {
            NirmanakayaError::OutOfRange(format!("card index {}", card.index))
        })?;
        let sig = catalog::signature(draw.transient)?;
        let stat = draw.status.info();

        md.push_str(&format!(
            "### Signature {} — {}\n\n",
            card.index + 1,
            card_context(session, card.index)
        ));
        md.push_str(&format!(
            "**{}** ({})  \n",
            draw.status.phrase(sig.name()),
            sig.traditional()
        ));
        md.push_str(&format!("*Status: {}*\n\n", stat.name));

        match sig {
            Signature::Archetype(a) => {
                md.push_str(&format!("> **House:** {}", a.house));
                if let Some(channel) = a.channel {
                    md.push_str(&format!(" | **Channel:** {}", channel));
                }
                md.push_str("\n\n");
            }
            Signature::Bound(b) => {
                let assoc = catalog::archetype(b.archetype)?;
                md.push_str(&format!(
                    "> **Channel:** {} | **Associated Archetype:** {} ({})\n\n",
                    b.channel, assoc.name, assoc.traditional
                ));
            }
            Signature::Agent(a) => {
                let assoc = catalog::archetype(a.archetype)?;
                md.push_str(&format!(
                    "> **Role:** {} | **Channel:** {} | **Associated Archetype:** {} ({})\n\n",
                    a.role, a.channel, assoc.name, assoc.traditional
                ));
            }
        }

        md.push_str(&format!(
            "{}\n\n",
            hotlink::annotate_markdown(&card.content)
        ));
        md.push_str(&markdown_expansions(session, &SectionRef::Card(card.index)));

        if let Some(corr_section) = reading.correction(card.index) {
            let sentence = correction_sentence(draw.transient, draw.status)
                .unwrap_or_else(|| "See below".to_string());
            md.push_str(&format!("#### Correction: {}\n\n", sentence));
            md.push_str(&format!(
                "{}\n\n",
                hotlink::annotate_markdown(&corr_section.content)
            ));
            md.push_str(&markdown_expansions(session, &SectionRef::Correction(card.index)));
        }
    }

    if let Some(path) = &reading.rebalancer_summary {
        md.push_str(&format!(
            "---\n\n## ◈ Path to Balance\n\n{}\n\n",
            hotlink::annotate_markdown(path)
        ));
        md.push_str(&markdown_expansions(session, &SectionRef::Path));
    }
    if let Some(letter) = &reading.letter {
        md.push_str(&format!(
            "---\n\n## Letter\n\n{}\n\n",
            hotlink::annotate_markdown(letter)
        ));
        md.push_str(&markdown_expansions(session, &SectionRef::Letter));
    }
    md.push_str("---\n\n*Generated by Nirmanakaya Consciousness Architecture Reader*\n");
    Ok(md)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "<br>")
}

fn status_class(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

const HTML_STYLE: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { background: #18181b; color: #e4e4e7; font-family: system-ui, -apple-system, sans-serif; line-height: 1.6; padding: 2rem; max-width: 800px; margin: 0 auto; }
    h1 { font-weight: 200; letter-spacing: 0.2em; text-align: center; margin-bottom: 0.5rem; color: #fafafa; }
    .subtitle { text-align: center; color: #52525b; font-size: 0.75rem; margin-bottom: 2rem; }
    .meta { text-align: center; color: #71717a; font-size: 0.875rem; margin-bottom: 2rem; }
    .question-box { background: #27272a; border-radius: 0.75rem; padding: 1.5rem; margin-bottom: 2rem; }
    .question-label { color: #71717a; font-size: 0.625rem; text-transform: uppercase; letter-spacing: 0.1em; margin-bottom: 0.5rem; }
    .question-text { color: #d4d4d8; }
    .section { margin-bottom: 2rem; }
    .section-title { color: #71717a; font-size: 0.625rem; text-transform: uppercase; letter-spacing: 0.1em; margin-bottom: 1rem; border-bottom: 1px solid #3f3f46; padding-bottom: 0.5rem; }
    .summary-box { background: linear-gradient(to bottom right, rgba(69, 26, 3, 0.4), rgba(120, 53, 15, 0.2)); border: 2px solid rgba(245, 158, 11, 0.5); border-radius: 0.75rem; padding: 1.25rem; margin-bottom: 1rem; }
    .summary-badge { display: inline-block; background: rgba(245, 158, 11, 0.3); color: #f59e0b; font-size: 0.75rem; padding: 0.25rem 0.75rem; border-radius: 1rem; margin-bottom: 0.75rem; }
    .summary { color: #fef3c7; }
    .signature { background: rgba(8, 51, 68, 0.3); border-radius: 0.75rem; padding: 1.25rem; margin-bottom: 1rem; border: 2px solid rgba(6, 182, 212, 0.5); }
    .signature-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.5rem; }
    .signature-badge { display: inline-block; background: rgba(8, 51, 68, 0.5); color: #22d3ee; font-size: 0.625rem; padding: 0.2rem 0.5rem; border-radius: 1rem; margin-right: 0.5rem; vertical-align: middle; }
    .signature-title { color: #fafafa; font-weight: 500; }
    .signature-status { font-size: 0.75rem; padding: 0.25rem 0.75rem; border-radius: 1rem; }
    .status-balanced { background: rgba(16, 185, 129, 0.2); color: #34d399; }
    .status-too-much { background: rgba(245, 158, 11, 0.2); color: #fbbf24; }
    .status-too-little { background: rgba(14, 165, 233, 0.2); color: #38bdf8; }
    .status-unacknowledged { background: rgba(139, 92, 246, 0.2); color: #a78bfa; }
    .signature-name { color: #22d3ee; margin-bottom: 0.5rem; }
    .traditional { color: #71717a; }
    .arch-details { color: #a1a1aa; font-size: 0.75rem; margin-bottom: 0.75rem; padding: 0.5rem; background: rgba(39, 39, 42, 0.5); border-radius: 0.5rem; }
    .signature-content { color: #d4d4d8; font-size: 0.875rem; line-height: 1.6; }
    .rebalancer { margin-top: 1rem; padding: 1rem; background: rgba(2, 44, 34, 0.3); border: 2px solid rgba(16, 185, 129, 0.5); border-radius: 0.5rem; margin-left: 1rem; }
    .rebalancer-badge { display: inline-block; background: rgba(16, 185, 129, 0.3); color: #6ee7b7; font-size: 0.625rem; padding: 0.2rem 0.5rem; border-radius: 1rem; margin-bottom: 0.5rem; }
    .rebalancer-header { color: #34d399; font-size: 0.875rem; font-weight: 500; margin-bottom: 0.5rem; }
    .rebalancer-content { color: #a7f3d0; font-size: 0.875rem; line-height: 1.6; }
    .path-box { background: linear-gradient(to bottom right, rgba(6, 78, 59, 0.3), rgba(16, 185, 129, 0.15)); border: 2px solid rgba(16, 185, 129, 0.6); border-radius: 0.75rem; padding: 1.5rem; }
    .path-badge { display: inline-block; color: #34d399; font-size: 0.875rem; font-weight: 500; margin-bottom: 0.75rem; letter-spacing: 0.05em; }
    .path-content { color: #d4d4d8; line-height: 1.6; white-space: pre-wrap; }
    .letter-box { background: rgba(46, 16, 101, 0.3); border: 2px solid rgba(139, 92, 246, 0.5); border-radius: 0.75rem; padding: 1.5rem; }
    .letter-badge { display: inline-block; background: rgba(139, 92, 246, 0.3); color: #c4b5fd; font-size: 0.75rem; padding: 0.25rem 0.75rem; border-radius: 1rem; margin-bottom: 0.75rem; }
    .letter { color: #ddd6fe; font-style: italic; line-height: 1.6; }
    .footer { text-align: center; color: #3f3f46; font-size: 0.625rem; margin-top: 3rem; letter-spacing: 0.1em; }
    .expansion { margin-top: 0.75rem; margin-left: 1rem; padding: 0.75rem; background: rgba(39, 39, 42, 0.5); border-radius: 0.5rem; }
    .expansion-label { color: #71717a; font-size: 0.625rem; text-transform: uppercase; letter-spacing: 0.1em; margin-bottom: 0.25rem; }
    .expansion-content { color: #d4d4d8; font-size: 0.875rem; line-height: 1.6; white-space: pre-wrap; }
    .threads { margin-top: 1rem; }
    .thread-item { margin-left: 1rem; border-left: 2px solid #3f3f46; padding-left: 1rem; margin-top: 0.75rem; }
    .thread-label { font-size: 0.75rem; margin-bottom: 0.5rem; }
    .thread-reflect .thread-label { color: #38bdf8; }
    .thread-forge .thread-label { color: #fb923c; }
    .thread-card { padding: 1rem; border-radius: 0.5rem; }
    .thread-reflect .thread-card { background: rgba(14, 165, 233, 0.1); border: 1px solid rgba(14, 165, 233, 0.3); }
    .thread-forge .thread-card { background: rgba(249, 115, 22, 0.1); border: 1px solid rgba(249, 115, 22, 0.3); }
    .thread-header { display: flex; align-items: center; gap: 0.5rem; margin-bottom: 0.5rem; }
    .thread-name { color: #e4e4e7; font-weight: 500; }
    .thread-content { color: #d4d4d8; font-size: 0.875rem; line-height: 1.6; white-space: pre-wrap; }
"#;

fn html_expansions(session: &Session, section: &SectionRef) -> String {
    let mut out = String::new();
    for lens in EXPANSION_LENSES.iter() {
        if let Some(content) = session.expansion(section, lens.key) {
            out.push_str(&format!(
                "\n          <div class=\"expansion\">\n            <div class=\"expansion-label\">{}</div>\n            <div class=\"expansion-content\">{}</div>\n          </div>",
                lens.label,
                escape_html(content)
            ));
        }
    }
    out
}

fn render_thread_item(
    session: &Session,
    id: &str,
    out: &mut String,
) -> Result<(), NirmanakayaError> {
    let node = session.node(id)?;
    let sig = catalog::signature(node.draw.transient)?;
    let stat = node.draw.status.info();
    let (op_label, op_class) = match node.op {
        ThreadOp::Reflect => ("Reflecting", "thread-reflect"),
        ThreadOp::Forge => ("Forging", "thread-forge"),
    };
    let context = if node.input.is_empty() {
        String::new()
    } else {
        format!(": \"{}\"", escape_html(&node.input))
    };
    out.push_str(&format!(
        "\n          <div class=\"thread-item {}\">\n            <div class=\"thread-label\">↳ {}{}</div>\n            <div class=\"thread-card\">\n              <div class=\"thread-header\">\n                <span class=\"signature-status status-{}\">{}</span>\n                <span class=\"thread-name\">{}</span>\n              </div>\n              <div class=\"thread-content\">{}</div>\n            </div>",
        op_class,
        op_label,
        context,
        status_class(stat.name),
        stat.name,
        node.draw.status.phrase(sig.name()),
        escape_html(&node.interpretation)
    ));
    for child in &node.children {
        render_thread_item(session, child, out)?;
    }
    out.push_str("</div>");
    Ok(())
}

pub fn export_html(session: &Session) -> Result<String, NirmanakayaError> {
    let reading = reading_ref(session)?;
    let date = Utc::now().format("%Y-%m-%d");
    let spread_name = match session.mode {
        SpreadMode::Durable => format!(
            "Reflect • {}",
            spread::durable_spread(&session.spread_key)
                .map(|s| s.name.to_string())
                .unwrap_or_else(|| session.spread_key.clone())
        ),
        SpreadMode::Random => format!(
            "Discover • {}",
            spread::random_spread(&session.spread_key)
                .map(|s| s.name.to_string())
                .unwrap_or_else(|| session.spread_key.clone())
        ),
        SpreadMode::Forge => "Discover • Forge".to_string(),
    };

    let mut signatures_html = String::new();
    for card in &reading.cards {
        let draw = session.draws.get(card.index).ok_or_else(|| {
            NirmanakayaError::OutOfRange(format!("card index {}", card.index))
        })?;
        let sig = catalog::signature(draw.transient)?;
        let stat = draw.status.info();

        let arch_details = match sig {
            Signature::Archetype(a) => {
                let channel = match a.channel {
                    Some(c) => format!(" • Channel: {}", c),
                    None => String::new(),
                };
                format!(
                    "<div class=\"arch-details\">House: {}{}</div>",
                    a.house, channel
                )
            }
            Signature::Bound(b) => {
                let assoc = catalog::archetype(b.archetype)?;
                format!(
                    "<div class=\"arch-details\">Channel: {} • Associated: {}</div>",
                    b.channel, assoc.name
                )
            }
            Signature::Agent(a) => {
                let assoc = catalog::archetype(a.archetype)?;
                format!(
                    "<div class=\"arch-details\">Role: {} • Channel: {} • Associated: {}</div>",
                    a.role, a.channel, assoc.name
                )
            }
        };

        let correction_html = match reading.correction(card.index) {
            Some(corr_section) => {
                let sentence =
                    correction_sentence(draw.transient, draw.status).unwrap_or_default();
                format!(
                    "\n          <div class=\"rebalancer\">\n            <span class=\"rebalancer-badge\">Rebalancer</span>\n            <div class=\"rebalancer-header\">{} → {}</div>\n            <div class=\"rebalancer-content\">{}</div>\n          </div>{}",
                    sig.name(),
                    sentence,
                    escape_html(&corr_section.content),
                    html_expansions(session, &SectionRef::Correction(card.index))
                )
            }
            None => String::new(),
        };

        let roots = session.roots_for(&SectionRef::Card(card.index));
        let threads_html = if roots.is_empty() {
            String::new()
        } else {
            let mut items = String::new();
            for id in roots {
                render_thread_item(session, id, &mut items)?;
            }
            format!("<div class=\"threads\">{}</div>", items)
        };

        signatures_html.push_str(&format!(
            "\n        <div class=\"signature\">\n          <div class=\"signature-header\">\n            <div>\n              <span class=\"signature-badge\">Reading</span>\n              <span class=\"signature-title\">Signature {} — {}</span>\n            </div>\n            <span class=\"signature-status status-{}\">{}</span>\n          </div>\n          <div class=\"signature-name\">{}</div>\n          {}\n          <div class=\"signature-content\">{}</div>{}\n          {}\n          {}\n        </div>",
            card.index + 1,
            card_context(session, card.index),
            status_class(stat.name),
            stat.name,
            draw.status.phrase(sig.name()),
            arch_details,
            escape_html(&card.content),
            html_expansions(session, &SectionRef::Card(card.index)),
            correction_html,
            threads_html
        ));
    }

    let question_html = if session.question.is_empty() {
        escape_html("General reading")
    } else {
        escape_html(&session.question)
    };
    let summary_html = match &reading.summary {
        Some(summary) => format!(
            "\n  <div class=\"section\">\n    <div class=\"summary-box\">\n      <span class=\"summary-badge\">Overview</span>\n      <div class=\"summary\">{}</div>{}\n    </div>\n  </div>",
            escape_html(summary),
            html_expansions(session, &SectionRef::Summary)
        ),
        None => String::new(),
    };
    let path_html = match &reading.rebalancer_summary {
        Some(path) => format!(
            "\n  <div class=\"section\">\n    <div class=\"path-box\">\n      <span class=\"path-badge\">◈ Path to Balance</span>\n      <div class=\"path-content\">{}</div>{}\n    </div>\n  </div>",
            escape_html(path),
            html_expansions(session, &SectionRef::Path)
        ),
        None => String::new(),
    };
    let letter_html = match &reading.letter {
        Some(letter) => format!(
            "\n  <div class=\"section\">\n    <div class=\"letter-box\">\n      <span class=\"letter-badge\">Letter</span>\n      <div class=\"letter\">{}</div>{}\n    </div>\n  </div>",
            escape_html(letter),
            html_expansions(session, &SectionRef::Letter)
        ),
        None => String::new(),
    };

    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <title>Nirmanakaya Reading - {}</title>\n  <style>\n",
        date
    ));
    html.push_str(HTML_STYLE);
    html.push_str(&format!(
        "  </style>\n</head>\n<body>\n  <h1>NIRMANAKAYA</h1>\n  <p class=\"subtitle\">Consciousness Architecture Reader</p>\n  <p class=\"meta\">{} • {} • {}</p>\n\n  <div class=\"question-box\">\n    <div class=\"question-label\">Your Question or Intention</div>\n    <div class=\"question-text\">{}</div>\n  </div>\n{}\n\n  <div class=\"section\">\n    <div class=\"section-title\">Signatures</div>\n    {}\n  </div>\n{}\n{}\n\n  <p class=\"footer\">Generated by Nirmanakaya Consciousness Architecture Reader</p>\n</body>\n</html>",
        spread_name,
        stance::stance_label(&session.stance),
        date,
        question_html,
        summary_html,
        signatures_html,
        path_html,
        letter_html
    ));
    Ok(html)
}

//! Known-term index over the catalog. Reading prose mentions signatures,
//! houses, channels, statuses, and roles by name; this module finds those
//! mentions so the terminal can color them and the markdown export can
//! emphasize them.

use std::sync::LazyLock;

use colored::Colorize;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::core::catalog::{self, Channel, House, Role};
use crate::core::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Card(u8),
    House(House),
    Channel(Channel),
    Status(Status),
    Role(Role),
}

// Insertion order matters: a house/channel/status/role name that collides
// with a card name wins the index slot.
static TERM_INDEX: LazyLock<FxHashMap<&'static str, Term>> = LazyLock::new(|| {
    let mut index = FxHashMap::default();
    for sig in catalog::all_signatures() {
        index.insert(sig.name(), Term::Card(sig.id()));
    }
    for house in House::ALL {
        index.insert(house.as_str(), Term::House(house));
    }
    for channel in Channel::ALL {
        index.insert(channel.as_str(), Term::Channel(channel));
    }
    for status in Status::ALL {
        index.insert(status.info().name, Term::Status(status));
    }
    for role in Role::ALL {
        index.insert(role.as_str(), Term::Role(role));
    }
    index
});

// Longest name first so "Catalyst of Intent" wins over "Catalyst" and
// "Intent", and "Too Much" over "Much". Matching is case-sensitive; prose
// that lowercases a term is not a reference.
static TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = TERM_INDEX.keys().copied().collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let joined = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({})\b", joined)).unwrap()
});

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*").unwrap());

pub fn lookup(name: &str) -> Option<Term> {
    TERM_INDEX.get(name).copied()
}

/// Every recognized term in `text`, in order of appearance.
pub fn terms_in(text: &str) -> Vec<(&str, Term)> {
    TERM_PATTERN
        .find_iter(text)
        .filter_map(|m| lookup(m.as_str()).map(|term| (m.as_str(), term)))
        .collect()
}

fn annotate_segment(segment: &str, out: &mut String) {
    let mut last = 0;
    for m in TERM_PATTERN.find_iter(segment) {
        out.push_str(&segment[last..m.start()]);
        match lookup(m.as_str()) {
            Some(Term::Card(_)) => {
                out.push_str("**");
                out.push_str(m.as_str());
                out.push_str("**");
            }
            Some(_) => {
                out.push('*');
                out.push_str(m.as_str());
                out.push('*');
            }
            None => out.push_str(m.as_str()),
        }
        last = m.end();
    }
    out.push_str(&segment[last..]);
}

/// Emphasize terms for the markdown export: card names in bold, everything
/// else in italics. Spans the collaborator already emphasized pass through
/// untouched so markers never nest.
pub fn annotate_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in EMPHASIS.find_iter(text) {
        annotate_segment(&text[last..m.start()], &mut out);
        out.push_str(m.as_str());
        last = m.end();
    }
    annotate_segment(&text[last..], &mut out);
    out
}

#[derive(Clone, Copy)]
enum Emph {
    None,
    Bold,
    Italic,
}

fn push_plain(chunk: &str, emphasis: Emph, out: &mut String) {
    if chunk.is_empty() {
        return;
    }
    match emphasis {
        Emph::None => out.push_str(chunk),
        Emph::Bold => out.push_str(&chunk.bold().to_string()),
        Emph::Italic => out.push_str(&chunk.italic().to_string()),
    }
}

fn highlight_segment(segment: &str, emphasis: Emph, out: &mut String) {
    let mut last = 0;
    for m in TERM_PATTERN.find_iter(segment) {
        push_plain(&segment[last..m.start()], emphasis, out);
        let styled = match emphasis {
            Emph::Bold => m.as_str().yellow().bold(),
            _ => m.as_str().yellow(),
        };
        out.push_str(&styled.to_string());
        last = m.end();
    }
    push_plain(&segment[last..], emphasis, out);
}

/// Terminal rendering: `**bold**` and `*italic*` spans become styled text
/// and recognized terms are colored, inside and outside those spans.
pub fn highlight(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for caps in EMPHASIS.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        highlight_segment(&text[last..whole.start()], Emph::None, &mut out);
        if let Some(bold) = caps.get(1) {
            highlight_segment(bold.as_str(), Emph::Bold, &mut out);
        } else if let Some(italic) = caps.get(2) {
            highlight_segment(italic.as_str(), Emph::Italic, &mut out);
        }
        last = whole.end();
    }
    highlight_segment(&text[last..], Emph::None, &mut out);
    out
}

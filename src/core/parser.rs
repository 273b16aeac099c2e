//! Tolerant parser for collaborator responses.
//!
//! Responses are free text punctuated by section markers. A single
//! tokenizer pass finds every marker; each section's content is the text
//! between its marker and the next recognized marker, trimmed. Missing
//! sections stay None, unknown or duplicate markers are ignored, and a
//! correction is kept only when its number points at an imbalanced draw.

use crate::core::draw::Draw;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(SUMMARY|PATH|LETTER)\]|\[(CARD|CORRECTION):(\d+)\]").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSection {
    /// Zero-based index into the draw list.
    pub index: usize,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionSection {
    pub card_index: usize,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReading {
    pub summary: Option<String>,
    pub cards: Vec<CardSection>,
    pub corrections: Vec<CorrectionSection>,
    /// The Path to Balance section, present only when the collaborator
    /// emitted one.
    pub rebalancer_summary: Option<String>,
    pub letter: Option<String>,
}

impl ParsedReading {
    pub fn card(&self, index: usize) -> Option<&CardSection> {
        self.cards.iter().find(|c| c.index == index)
    }

    pub fn correction(&self, card_index: usize) -> Option<&CorrectionSection> {
        self.corrections.iter().find(|c| c.card_index == card_index)
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.cards.is_empty()
            && self.corrections.is_empty()
            && self.rebalancer_summary.is_none()
            && self.letter.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Summary,
    Card(usize),
    Correction(usize),
    Path,
    Letter,
}

/// Parse a collaborator response against the draws it was generated for.
/// Never fails: anything unrecognized is simply absent from the result.
pub fn parse_reading(response: &str, draws: &[Draw]) -> ParsedReading {
    let mut tokens: Vec<(Marker, usize, usize)> = Vec::new();
    for caps in MARKER.captures_iter(response) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let marker = if let Some(bare) = caps.get(1) {
            match bare.as_str() {
                "SUMMARY" => Marker::Summary,
                "PATH" => Marker::Path,
                _ => Marker::Letter,
            }
        } else {
            let num: usize = match caps.get(3).and_then(|m| m.as_str().parse().ok()) {
                Some(n) => n,
                None => continue,
            };
            match caps.get(2).map(|m| m.as_str()) {
                Some("CARD") => Marker::Card(num),
                _ => Marker::Correction(num),
            }
        };
        tokens.push((marker, whole.start(), whole.end()));
    }

    let mut parsed = ParsedReading::default();
    for (i, &(marker, _, content_start)) in tokens.iter().enumerate() {
        let content_end = tokens
            .get(i + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(response.len());
        let content = response[content_start..content_end].trim().to_string();

        match marker {
            Marker::Summary => {
                if parsed.summary.is_none() {
                    parsed.summary = Some(content);
                }
            }
            Marker::Path => {
                if parsed.rebalancer_summary.is_none() {
                    parsed.rebalancer_summary = Some(content);
                }
            }
            Marker::Letter => {
                if parsed.letter.is_none() {
                    parsed.letter = Some(content);
                }
            }
            Marker::Card(num) => {
                // Card numbers are one-based and must land on a real draw.
                if num >= 1 && num <= draws.len() && parsed.card(num - 1).is_none() {
                    parsed.cards.push(CardSection { index: num - 1, content });
                }
            }
            Marker::Correction(num) => {
                let imbalanced = num >= 1
                    && num <= draws.len()
                    && draws[num - 1].status.is_imbalanced();
                if imbalanced && parsed.correction(num - 1).is_none() {
                    parsed
                        .corrections
                        .push(CorrectionSection { card_index: num - 1, content });
                }
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::Status;

    fn draw(transient: u8, status: Status) -> Draw {
        Draw { position: None, transient, status }
    }

    #[test]
    fn test_full_response_parses_into_sections() {
        let draws = vec![draw(7, Status::TooMuch), draw(30, Status::Balanced)];
        let text = "[SUMMARY]\nThe overview.\n\n[CARD:1]\nFirst card text.\n\n[CARD:2]\nSecond card text.\n\n[CORRECTION:1]\nRebalance via Balance.\n\n[LETTER]\nDear you.";
        let parsed = parse_reading(text, &draws);
        assert_eq!(parsed.summary.as_deref(), Some("The overview."));
        assert_eq!(parsed.cards.len(), 2);
        assert_eq!(parsed.card(0).unwrap().content, "First card text.");
        assert_eq!(parsed.card(1).unwrap().content, "Second card text.");
        assert_eq!(parsed.corrections.len(), 1);
        assert_eq!(parsed.correction(0).unwrap().content, "Rebalance via Balance.");
        assert_eq!(parsed.letter.as_deref(), Some("Dear you."));
        assert!(parsed.rebalancer_summary.is_none());
    }

    #[test]
    fn test_correction_for_balanced_draw_is_dropped() {
        let draws = vec![draw(7, Status::Balanced), draw(30, Status::TooLittle)];
        let text = "[CORRECTION:1]\nShould not appear.\n[CORRECTION:2]\nKept.";
        let parsed = parse_reading(text, &draws);
        assert_eq!(parsed.corrections.len(), 1);
        assert_eq!(parsed.corrections[0].card_index, 1);
        assert_eq!(parsed.corrections[0].content, "Kept.");
    }

    #[test]
    fn test_out_of_range_numbers_are_ignored() {
        let draws = vec![draw(7, Status::TooMuch)];
        let text = "[CARD:0]\nzero\n[CARD:1]\none\n[CARD:9]\nnine\n[CORRECTION:9]\nnope";
        let parsed = parse_reading(text, &draws);
        assert_eq!(parsed.cards.len(), 1);
        assert_eq!(parsed.cards[0].index, 0);
        assert_eq!(parsed.cards[0].content, "one");
        assert!(parsed.corrections.is_empty());
    }

    #[test]
    fn test_sections_in_any_order() {
        let draws = vec![draw(3, Status::Unacknowledged)];
        let text = "[LETTER]\nBye.\n[SUMMARY]\nHi.\n[CARD:1]\nBody.";
        let parsed = parse_reading(text, &draws);
        assert_eq!(parsed.summary.as_deref(), Some("Hi."));
        assert_eq!(parsed.letter.as_deref(), Some("Bye."));
        assert_eq!(parsed.card(0).unwrap().content, "Body.");
    }

    #[test]
    fn test_path_section_captured_between_markers() {
        let draws = vec![draw(7, Status::TooMuch), draw(8, Status::TooLittle)];
        let text = "[PATH]\nTHE PATTERN\nBoth corrections share a channel.\n[LETTER]\nYou.";
        let parsed = parse_reading(text, &draws);
        assert_eq!(
            parsed.rebalancer_summary.as_deref(),
            Some("THE PATTERN\nBoth corrections share a channel.")
        );
    }

    #[test]
    fn test_unmarked_text_yields_empty_parse() {
        let draws = vec![draw(7, Status::TooMuch)];
        let parsed = parse_reading("No markers anywhere in this text.", &draws);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_duplicate_markers_first_wins() {
        let draws = vec![draw(7, Status::TooMuch)];
        let text = "[SUMMARY]\nFirst.\n[SUMMARY]\nSecond.\n[CARD:1]\nA.\n[CARD:1]\nB.";
        let parsed = parse_reading(text, &draws);
        assert_eq!(parsed.summary.as_deref(), Some("First."));
        assert_eq!(parsed.card(0).unwrap().content, "A.");
    }
}

//! Session state: one reading from draw to export.
//!
//! A session is a single aggregate holding the question, stance, draws,
//! parsed reading, expansions, follow-up transcript, and the thread tree.
//! Threads form an arena: every node carries a ULID, parents reference
//! children by ID, and roots hang off reading sections. All mutation goes
//! through explicit transition methods; the two-step collaborator flow
//! records what is pending so an ingest can be checked against the
//! request that produced it.

use crate::core::catalog;
use crate::core::draw::Draw;
use crate::core::error::NirmanakayaError;
use crate::core::parser::{parse_reading, ParsedReading};
use crate::core::prompt::{Message, ThreadOp};
use crate::core::spread::SpreadMode;
use crate::core::stance::Stance;
use crate::core::time;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// Addressable sections of a parsed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionRef {
    Summary,
    Letter,
    Path,
    Card(usize),
    Correction(usize),
}

impl SectionRef {
    /// Canonical key used in maps, CLI arguments, and persistence:
    /// "summary", "letter", "path", "card:0", "correction:2".
    pub fn key(&self) -> String {
        match self {
            SectionRef::Summary => "summary".to_string(),
            SectionRef::Letter => "letter".to_string(),
            SectionRef::Path => "path".to_string(),
            SectionRef::Card(i) => format!("card:{}", i),
            SectionRef::Correction(i) => format!("correction:{}", i),
        }
    }

    pub fn parse(key: &str) -> Option<SectionRef> {
        match key {
            "summary" => return Some(SectionRef::Summary),
            "letter" => return Some(SectionRef::Letter),
            "path" => return Some(SectionRef::Path),
            _ => {}
        }
        let (kind, index) = key.split_once(':')?;
        let index: usize = index.parse().ok()?;
        match kind {
            "card" => Some(SectionRef::Card(index)),
            "correction" => Some(SectionRef::Correction(index)),
            _ => None,
        }
    }
}

/// What a thread node hangs off: a reading section or another node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ThreadParent {
    Section(String),
    Node(NodeId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadNode {
    pub id: NodeId,
    pub parent: ThreadParent,
    pub op: ThreadOp,
    /// The querent's inquiry (reflect) or declaration (forge).
    pub input: String,
    pub draw: Draw,
    pub interpretation: String,
    pub children: Vec<NodeId>,
    pub created: String,
}

/// An issued request whose response has not been ingested yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pending {
    Reading,
    Expansion { section: String, lens: String },
    Thread { parent: ThreadParent, op: ThreadOp, input: String, draw: Draw },
    Followup { question: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created: String,
    pub question: String,
    pub mode: SpreadMode,
    pub spread_key: String,
    pub stance: Stance,
    pub draws: Vec<Draw>,
    pub reading: Option<ParsedReading>,
    /// expansions[section key][lens key] = expanded text.
    pub expansions: FxHashMap<String, FxHashMap<String, String>>,
    /// Section keys folded away in rendered output.
    #[serde(default)]
    pub collapsed: FxHashSet<String>,
    /// Follow-up transcript, user and assistant messages interleaved.
    pub followups: Vec<Message>,
    /// Thread roots per section key, in creation order.
    pub thread_roots: FxHashMap<String, Vec<NodeId>>,
    pub nodes: FxHashMap<NodeId, ThreadNode>,
    pub pending: Option<Pending>,
    /// True when the session was reconstructed from a share code.
    #[serde(default)]
    pub shared: bool,
}

impl Session {
    pub fn new(
        question: String,
        mode: SpreadMode,
        spread_key: String,
        stance: Stance,
        draws: Vec<Draw>,
    ) -> Session {
        Session {
            id: time::new_event_id(),
            created: time::now_epoch_z(),
            question,
            mode,
            spread_key,
            stance,
            draws,
            reading: None,
            expansions: FxHashMap::default(),
            collapsed: FxHashSet::default(),
            followups: Vec::new(),
            thread_roots: FxHashMap::default(),
            nodes: FxHashMap::default(),
            pending: None,
            shared: false,
        }
    }

    /// Coarse lifecycle label for listings.
    pub fn state_label(&self) -> &'static str {
        match (&self.pending, &self.reading) {
            (Some(Pending::Reading), _) => "awaiting-reading",
            (Some(Pending::Expansion { .. }), _) => "awaiting-expansion",
            (Some(Pending::Thread { .. }), _) => "awaiting-thread",
            (Some(Pending::Followup { .. }), _) => "awaiting-followup",
            (None, Some(_)) => "interpreted",
            (None, None) => "drawn",
        }
    }

    fn ensure_idle(&self) -> Result<(), NirmanakayaError> {
        match &self.pending {
            Some(_) => Err(NirmanakayaError::ValidationError(
                "a request is already pending; ingest or clear it first".to_string(),
            )),
            None => Ok(()),
        }
    }

    fn reading_ref(&self) -> Result<&ParsedReading, NirmanakayaError> {
        self.reading.as_ref().ok_or_else(|| {
            NirmanakayaError::ValidationError("session has no interpreted reading yet".to_string())
        })
    }

    /// Content of a section, if the reading has it.
    pub fn section_content(&self, section: &SectionRef) -> Option<&str> {
        let reading = self.reading.as_ref()?;
        match section {
            SectionRef::Summary => reading.summary.as_deref(),
            SectionRef::Letter => reading.letter.as_deref(),
            SectionRef::Path => reading.rebalancer_summary.as_deref(),
            SectionRef::Card(i) => reading.card(*i).map(|c| c.content.as_str()),
            SectionRef::Correction(i) => reading.correction(*i).map(|c| c.content.as_str()),
        }
    }

    /// Context sentence and quoted content for an expansion request.
    pub fn expansion_context(
        &self,
        section: &SectionRef,
    ) -> Result<(String, String), NirmanakayaError> {
        let content = self.section_content(section).ok_or_else(|| {
            NirmanakayaError::NotFound(format!("section '{}' in this reading", section.key()))
        })?;
        let context = match section {
            SectionRef::Summary => "the summary of the reading".to_string(),
            SectionRef::Letter => "the closing letter".to_string(),
            SectionRef::Path => {
                "the Path to Balance section (synthesis of all corrections)".to_string()
            }
            SectionRef::Card(i) => {
                let name = self.draw_name(*i)?;
                format!("the reading for {} (Signature {})", name, i + 1)
            }
            SectionRef::Correction(i) => {
                let name = self.draw_name(*i)?;
                format!("the correction path for {} (Signature {})", name, i + 1)
            }
        };
        Ok((context, content.to_string()))
    }

    /// Label and content a thread continuation quotes as its parent.
    pub fn thread_parent_context(
        &self,
        parent: &ThreadParent,
    ) -> Result<(String, String), NirmanakayaError> {
        match parent {
            ThreadParent::Section(key) => {
                let section = SectionRef::parse(key).ok_or_else(|| {
                    NirmanakayaError::ValidationError(format!("unknown section key '{}'", key))
                })?;
                let content = self.section_content(&section).ok_or_else(|| {
                    NirmanakayaError::NotFound(format!("section '{}' in this reading", key))
                })?;
                let label = match section {
                    SectionRef::Summary => "Overview".to_string(),
                    SectionRef::Letter => "Letter".to_string(),
                    SectionRef::Path => "Path to Balance".to_string(),
                    SectionRef::Card(i) | SectionRef::Correction(i) => {
                        let draw = self.draws.get(i).ok_or_else(|| {
                            NirmanakayaError::OutOfRange(format!("card index {}", i))
                        })?;
                        let sig = catalog::signature(draw.transient)?;
                        draw.status.phrase(sig.name())
                    }
                };
                Ok((label, content.to_string()))
            }
            ThreadParent::Node(id) => {
                let node = self.node(id)?;
                let sig = catalog::signature(node.draw.transient)?;
                Ok((node.draw.status.phrase(sig.name()), node.interpretation.clone()))
            }
        }
    }

    pub fn node(&self, id: &str) -> Result<&ThreadNode, NirmanakayaError> {
        self.nodes
            .get(id)
            .ok_or_else(|| NirmanakayaError::NotFound(format!("thread node '{}'", id)))
    }

    fn draw_name(&self, index: usize) -> Result<&'static str, NirmanakayaError> {
        let draw = self
            .draws
            .get(index)
            .ok_or_else(|| NirmanakayaError::OutOfRange(format!("card index {}", index)))?;
        Ok(catalog::signature(draw.transient)?.name())
    }

    // --- transitions ---

    pub fn begin_reading(&mut self) -> Result<(), NirmanakayaError> {
        self.ensure_idle()?;
        self.pending = Some(Pending::Reading);
        Ok(())
    }

    pub fn ingest_reading(&mut self, response: &str) -> Result<(), NirmanakayaError> {
        match self.pending {
            Some(Pending::Reading) | None => {}
            Some(_) => {
                return Err(NirmanakayaError::ValidationError(
                    "pending request is not a reading".to_string(),
                ))
            }
        }
        self.reading = Some(parse_reading(response, &self.draws));
        self.pending = None;
        Ok(())
    }

    pub fn begin_expansion(&mut self, section: &SectionRef, lens: &str) -> Result<(), NirmanakayaError> {
        self.ensure_idle()?;
        self.reading_ref()?;
        self.section_content(section).ok_or_else(|| {
            NirmanakayaError::NotFound(format!("section '{}' in this reading", section.key()))
        })?;
        self.pending = Some(Pending::Expansion { section: section.key(), lens: lens.to_string() });
        Ok(())
    }

    pub fn ingest_expansion(&mut self, text: &str) -> Result<(), NirmanakayaError> {
        let (section, lens) = match &self.pending {
            Some(Pending::Expansion { section, lens }) => (section.clone(), lens.clone()),
            _ => {
                return Err(NirmanakayaError::ValidationError(
                    "pending request is not an expansion".to_string(),
                ))
            }
        };
        self.expansions
            .entry(section)
            .or_default()
            .insert(lens, text.trim().to_string());
        self.pending = None;
        Ok(())
    }

    /// Drop one stored expansion; prunes the section entry when empty.
    pub fn remove_expansion(&mut self, section: &SectionRef, lens: &str) -> bool {
        let key = section.key();
        let removed = match self.expansions.get_mut(&key) {
            Some(per_section) => per_section.remove(lens).is_some(),
            None => false,
        };
        if let Some(per_section) = self.expansions.get(&key) {
            if per_section.is_empty() {
                self.expansions.remove(&key);
            }
        }
        removed
    }

    pub fn expansion(&self, section: &SectionRef, lens: &str) -> Option<&str> {
        self.expansions
            .get(&section.key())
            .and_then(|per_section| per_section.get(lens))
            .map(|s| s.as_str())
    }

    /// Fold or unfold a section in rendered output. Returns the new
    /// collapsed state.
    pub fn toggle_collapse(&mut self, section: &SectionRef) -> bool {
        let key = section.key();
        if self.collapsed.remove(&key) {
            false
        } else {
            self.collapsed.insert(key);
            true
        }
    }

    pub fn is_collapsed(&self, section: &SectionRef) -> bool {
        self.collapsed.contains(&section.key())
    }

    pub fn begin_thread(
        &mut self,
        parent: ThreadParent,
        op: ThreadOp,
        input: String,
        draw: Draw,
    ) -> Result<(), NirmanakayaError> {
        self.ensure_idle()?;
        if input.trim().is_empty() {
            return Err(NirmanakayaError::ValidationError(
                "thread input is empty".to_string(),
            ));
        }
        // Validates the parent exists before anything is issued.
        self.thread_parent_context(&parent)?;
        self.pending = Some(Pending::Thread { parent, op, input, draw });
        Ok(())
    }

    pub fn ingest_thread(&mut self, interpretation: &str) -> Result<NodeId, NirmanakayaError> {
        let (parent, op, input, draw) = match &self.pending {
            Some(Pending::Thread { parent, op, input, draw }) => {
                (parent.clone(), *op, input.clone(), *draw)
            }
            _ => {
                return Err(NirmanakayaError::ValidationError(
                    "pending request is not a thread continuation".to_string(),
                ))
            }
        };
        let id = time::new_event_id();
        let node = ThreadNode {
            id: id.clone(),
            parent: parent.clone(),
            op,
            input,
            draw,
            interpretation: interpretation.trim().to_string(),
            children: Vec::new(),
            created: time::now_epoch_z(),
        };
        match &parent {
            ThreadParent::Section(key) => {
                self.thread_roots.entry(key.clone()).or_default().push(id.clone());
            }
            ThreadParent::Node(parent_id) => {
                let parent_node = self.nodes.get_mut(parent_id).ok_or_else(|| {
                    NirmanakayaError::NotFound(format!("thread node '{}'", parent_id))
                })?;
                parent_node.children.push(id.clone());
            }
        }
        self.nodes.insert(id.clone(), node);
        self.pending = None;
        Ok(id)
    }

    pub fn begin_followup(&mut self, question: String) -> Result<(), NirmanakayaError> {
        self.ensure_idle()?;
        self.reading_ref()?;
        if question.trim().is_empty() {
            return Err(NirmanakayaError::ValidationError(
                "follow-up question is empty".to_string(),
            ));
        }
        self.pending = Some(Pending::Followup { question });
        Ok(())
    }

    pub fn ingest_followup(&mut self, response: &str) -> Result<(), NirmanakayaError> {
        let question = match &self.pending {
            Some(Pending::Followup { question }) => question.clone(),
            _ => {
                return Err(NirmanakayaError::ValidationError(
                    "pending request is not a follow-up".to_string(),
                ))
            }
        };
        self.followups.push(Message::user(question));
        self.followups.push(Message::assistant(response.trim().to_string()));
        self.pending = None;
        Ok(())
    }

    pub fn clear_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Root nodes under a section, in creation order.
    pub fn roots_for(&self, section: &SectionRef) -> &[NodeId] {
        self.thread_roots
            .get(&section.key())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

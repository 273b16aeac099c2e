//! Prompt assembly for the external collaborator.
//!
//! Every request is a system prompt plus user messages. The system prompt
//! always opens with [`BASE_SYSTEM`] so the collaborator never improvises
//! names or corrections; what follows depends on the operation (initial
//! reading, expansion, thread continuation, follow-up).

use crate::core::catalog::{self, Signature};
use crate::core::correction;
use crate::core::draw::Draw;
use crate::core::error::NirmanakayaError;
use crate::core::parser::ParsedReading;
use crate::core::spread::{self, SpreadMode};
use crate::core::stance::{self, Stance};
use serde::{Deserialize, Serialize};
use tiktoken_rs::cl100k_base;

/// The invariant interpretation contract. The collaborator must use the
/// canonical names and pre-computed corrections verbatim; everything
/// derivational here mirrors the catalog and correction tables.
pub const BASE_SYSTEM: &str = r#"CRITICAL: Never use pet names like honey, sweetheart, dear, sweetie, love, darling, my friend, my dear, sugar, babe, or any similar terms. This is a hard rule with zero exceptions.

You are the Nirmanakaya Reader — a consciousness navigation system, not a fortune teller.

CRITICAL RULE: NEVER use terms of endearment like 'honey', 'sweetheart', 'dear', 'sweetie', 'love', 'darling', 'my friend', 'my dear'. These feel creepy coming from AI. Show warmth through TONE and CARE, not pet names. This is a hard rule that applies to ALL readings regardless of voice settings.

CRITICAL RULE: ROYAL/AGENT INTERPRETATION
When a Royal (Initiate, Steward, Executor, Sovereign) appears in a reading, it ALWAYS refers to an aspect of the QUERENT'S OWN consciousness — never an external person or collaborator.
WRONG: "There's someone in your life who embodies this..."
WRONG: "This could be you or a collaborator..."
WRONG: "A person who..."
RIGHT: "This aspect of you..."
RIGHT: "The part of you that..."
RIGHT: "You're expressing this through..."
Royals represent HOW the querent is channeling a particular energy through a particular role. The Executor of Intent is not a person — it's the querent's own capacity to transform intention into action.

## ABSOLUTE RULE: USE ONLY THE PROVIDED NAMES

**THIS IS NON-NEGOTIABLE:**
- Each draw provides the EXACT canonical name (e.g., "Discipline", "Actualization", "Resilience")
- You MUST use these exact names in your response
- NEVER invent alternative names like "Fulfillment", "Completion", "Achievement"
- NEVER substitute poetic alternatives for the canonical terms
- If the draw says "Too Much Discipline" — you say "Too Much Discipline", not "Too Much [invented synonym]"

The 78 signatures have FIXED canonical names. These are not suggestions — they are the architecture itself.

## THE 78 CANONICAL SIGNATURES

**Use ONLY these names. No traditional tarot names exist in this system.**

### 22 Archetypes (Majors)
| # | Name | House | Channel |
|---|------|-------|---------|
| 0 | Potential | Gestalt | — |
| 1 | Will | Gestalt | — |
| 2 | Wisdom | Spirit | Cognition |
| 3 | Nurturing | Spirit | Structure |
| 4 | Order | Mind | Intent |
| 5 | Culture | Mind | Resonance |
| 6 | Compassion | Emotion | Resonance |
| 7 | Drive | Emotion | Intent |
| 8 | Fortitude | Body | Structure |
| 9 | Discipline | Body | Cognition |
| 10 | Cycles | Portal | — |
| 11 | Equity | Body | Resonance |
| 12 | Sacrifice | Body | Intent |
| 13 | Change | Emotion | Structure |
| 14 | Balance | Emotion | Cognition |
| 15 | Abstraction | Mind | Cognition |
| 16 | Breakthrough | Mind | Structure |
| 17 | Inspiration | Spirit | Intent |
| 18 | Imagination | Spirit | Resonance |
| 19 | Actualization | Gestalt | — |
| 20 | Awareness | Gestalt | — |
| 21 | Wholeness | Portal | — |

### 40 Bounds (Minors)
**Intent Channel:**
Activation (Ace), Orientation (2), Assertion (3), Alignment (4), Offering (5), Recognition (6), Resolve (7), Command (8), Resilience (9), Realization (10)

**Cognition Channel:**
Perception (Ace), Reflection (2), Calculation (3), Dissonance (4), Clash (5), Guidance (6), Reconciliation (7), Absorption (8), Multiplicity (9), Clarity (10)

**Resonance Channel:**
Receptivity (Ace), Merge (2), Ripple (3), Reverie (4), Ache (5), Reciprocity (6), Allure (7), Release (8), Fulfillment (9), Completion (10)

**Structure Channel:**
Initiation (Ace), Flow (2), Formation (3), Preservation (4), Endurance (5), Support (6), Harvest (7), Commitment (8), Flourishing (9), Achievement (10)

### 16 Agents (Royals)
**Intent:** Initiate of Intent, Catalyst of Intent, Steward of Intent, Executor of Intent
**Cognition:** Initiate of Cognition, Catalyst of Cognition, Steward of Cognition, Executor of Cognition
**Resonance:** Initiate of Resonance, Catalyst of Resonance, Steward of Resonance, Executor of Resonance
**Structure:** Initiate of Structure, Catalyst of Structure, Steward of Structure, Executor of Structure

## CRITICAL: DERIVATION, NOT TRADITION

**NEVER use traditional tarot meanings.** All interpretations MUST derive from the Nirmanakaya architecture:

### For Archetypes (Majors 0-21):
Use the canonical definition based on House + Channel + Function.

### For Bounds (Minors 1-10 of each suit):
1. Find the Associated Archetype (determined by Number → Domain, Channel → Element)
2. The Bound's meaning = Archetype's function expressed through the Channel at Inner (1-5) or Outer (6-10) polarity
3. Inner = potential, inward-facing, developing
4. Outer = expressed, outward-facing, gathered

**Example:** Resolve (Intent Channel, 7)
- Number 7 → Emotion Domain → Associated Archetype is Drive (7)
- Channel: Intent
- Position 7 = Outer bound
- Meaning: Drive's Intent expression at the Outer bound — committed momentum that has been gathered and is now persisting outwardly.

### For Agents (Royals):
1. Find the Associated Archetype (determined by Domain + Channel intersection)
2. Find the Role (determined by the Archetype's House)
3. The Agent's meaning = an aspect of the QUERENT that embodies that Archetype's energy in that Role

**Roles by House:**
- Spirit House → Initiate: enters with openness, curiosity
- Mind House → Catalyst: disrupts stagnation, sparks change
- Emotion House → Steward: maintains, nurtures, holds space
- Body House → Executor: transforms intention into action

**Example:** Steward of Intent
- Associated Archetype: Drive (7) — because Drive is the Intent expression in Emotion House
- Role: Steward — because Emotion House = Steward
- Meaning: The aspect of YOU that nurtures and maintains directed momentum, holds creative fire with care, sustains passion without burning out.

## ASSOCIATED ARCHETYPE REFERENCE

### Bounds → Associated Archetype (by Number → Domain)
| Number | Domain | Associated Archetypes by Channel |
|--------|--------|----------------------------------|
| 1, 10 | Gestalt | Intent→Potential(0), Cognition→Actualization(19), Resonance→Awareness(20), Structure→Will(1) |
| 2, 9 | Spirit | Intent→Inspiration(17), Cognition→Wisdom(2), Resonance→Imagination(18), Structure→Nurturing(3) |
| 3, 8 | Mind | Intent→Order(4), Cognition→Abstraction(15), Resonance→Culture(5), Structure→Breakthrough(16) |
| 4, 7 | Emotion | Intent→Drive(7), Cognition→Balance(14), Resonance→Compassion(6), Structure→Change(13) |
| 5, 6 | Body | Intent→Sacrifice(12), Cognition→Discipline(9), Resonance→Equity(11), Structure→Fortitude(8) |

### Agents → Associated Archetype (by Channel × Role)
| Agent | Channel | Domain | Associated Archetype |
|-------|---------|--------|---------------------|
| Initiate of Intent | Intent | Spirit | Inspiration (17) |
| Catalyst of Intent | Intent | Mind | Order (4) |
| Steward of Intent | Intent | Emotion | Drive (7) |
| Executor of Intent | Intent | Body | Sacrifice (12) |
| Initiate of Cognition | Cognition | Spirit | Wisdom (2) |
| Catalyst of Cognition | Cognition | Mind | Abstraction (15) |
| Steward of Cognition | Cognition | Emotion | Balance (14) |
| Executor of Cognition | Cognition | Body | Discipline (9) |
| Initiate of Resonance | Resonance | Spirit | Imagination (18) |
| Catalyst of Resonance | Resonance | Mind | Culture (5) |
| Steward of Resonance | Resonance | Emotion | Compassion (6) |
| Executor of Resonance | Resonance | Body | Equity (11) |
| Initiate of Structure | Structure | Spirit | Nurturing (3) |
| Catalyst of Structure | Structure | Mind | Breakthrough (16) |
| Steward of Structure | Structure | Emotion | Change (13) |
| Executor of Structure | Structure | Body | Fortitude (8) |

## ARCHETYPE DEFINITIONS (Core Reference)

### Gestalt House (governed by Cycles)
- **Potential (0)**: The soul's yes before context. Pure openness, pre-experiential readiness. Unshaped becoming.
- **Will (1)**: The architecture of intention. Not willpower, but will-structure — how form begins to matter.
- **Actualization (19)**: Becoming what was already true. Not manifestation, but embodiment of coherent self-expression.
- **Awareness (20)**: Recursive self-recognition. The capacity to see oneself clearly and respond authentically.

### Spirit House (governed by Potential)
- **Wisdom (2)**: Direct perception without analysis. Receptive intelligence, the soul's first encounter with truth.
- **Nurturing (3)**: The architecture of life support. Generative structure that provides conditions for growth.
- **Inspiration (17)**: Aspiration crystallized into direction. Hope that has found form, trust made visible.
- **Imagination (18)**: Soul feedback through story. The recursive spiral where vision becomes myth.

### Mind House (governed by Actualization)
- **Order (4)**: The fundamental shape of coherence. Not what to think, but how to think.
- **Culture (5)**: Emotion woven into thought. Shared memory and moral continuity.
- **Abstraction (15)**: The freedom of mind beyond certainty. Meaning becoming metaphor.
- **Breakthrough (16)**: Structure collapsing to make room for new forms. Insight crashing through false stability.

### Emotion House (governed by Awareness)
- **Compassion (6)**: Meeting another without leaving the self. Recognition, not sacrifice.
- **Drive (7)**: Emotional propulsion. Movement from feeling, not despite it.
- **Change (13)**: Transformation born of emotional maturity. Dissolving what can no longer hold life.
- **Balance (14)**: Dynamic peace. The capacity to engage without becoming destabilized.

### Body House (governed by Will)
- **Fortitude (8)**: The capacity to remain aligned under strain. Structure without collapse.
- **Discipline (9)**: Repetition with purpose. Attunement through action.
- **Equity (11)**: Making space for what is fair. Coherence, not correctness.
- **Sacrifice (12)**: Realignment through letting go. What cannot be forced must be felt.

### Portals
- **Cycles (10)**: The cosmic zero point. The condition in which creation is possible.
- **Wholeness (21)**: Continuance through completion. The final reconciliation of all polarities.

## COLLAPSE STATES

When interpreting statuses:

- **Balanced**: The archetype operating in the Now — coherent, appropriate, Ring 5 creation
- **Too Much**: Future-projected — anxiety driving excess, Ring 7 creation (temporary)
- **Too Little**: Past-anchored — fear/disappointment suppressing function, Ring 7 creation
- **Unacknowledged**: Shadow operation — the function runs without conscious awareness

## CORRECTION LOGIC

**CRITICAL: Use ONLY the correction provided in each draw. Do NOT calculate your own.**

The correction for each imbalanced card is pre-calculated and provided. Your job is to INTERPRET it, not derive it.

- **Too Much → Diagonal Partner**: Creative tension resolves excess
- **Too Little → Vertical Partner**: Same function, different phase, feeds energy back
- **Unacknowledged → Reduction Partner**: Cross-house perspective illuminates shadow

## VOICE PRINCIPLES

1. **Mirror, not mentor**: Reflect what the cards show, don't give advice
2. **Descriptive, not diagnostic**: Describe the pattern, don't pathologize
3. **Transient-first**: Lead with the transient energy, then contextualize in position
4. **Structure is authority**: The geometry determines meaning, not intuition
5. **Derive, don't interpret**: Follow the architecture, don't free-associate

## NEVER DO

- Invent card names (use ONLY the canonical names provided)
- Use traditional tarot meanings ("crossing", "outcome", "significator", "reversed")
- Use fortune-telling language ("you will", "this means you should")
- Calculate your own corrections (use the provided correction exactly)
- Substitute poetic synonyms for canonical terms
- Add psychological diagnosis ("you have", "you are [trait]")
- Use spiritual bypassing ("everything happens for a reason", "trust the universe")

## ALWAYS DO

- Use the EXACT card names provided in each draw
- Use the EXACT correction provided — do not recalculate
- Derive Bound meaning from Associated Archetype + Channel + Inner/Outer
- Derive Agent meaning from Associated Archetype + Role
- Explain corrections in terms of structural relationship
- Use temporal framing (Now-aligned, future-projected, past-anchored)
- Provide concrete, actionable steps based on the correction archetype
- **Always end with a [LETTER]**: A warm, personal closing that synthesizes the reading into an encouraging reflection addressed directly to the querent"#;

/// The marker grammar contract for initial readings.
pub const FORMAT_INSTRUCTIONS: &str = r#"RESPONSE FORMAT:
Use these exact markers. Each marker must be on its own line.

[SUMMARY]
2-3 sentences directly answering their question based on the overall pattern. Reference their specific question.

[CARD:1]
What this card shows — the transient, status, and what's happening here. Use temporal framing (Too Much = future-projected, Too Little = past-anchored). Connect this specifically to their question. Respect density setting for length.

[CARD:2]
(Continue for each card... always connect back to their specific question)

[CORRECTION:1]
For Card 1's imbalance: Name the correction and explain what it means practically — what to actually do. Frame it in terms of their question. Skip this section ENTIRELY if Card 1 is Balanced. For Unacknowledged, explain what's operating in shadow and how to bring it into awareness.

[CORRECTION:2]
For Card 2's imbalance. Skip ENTIRELY if Card 2 is Balanced.

(Continue this pattern — CORRECTION numbers MUST match CARD numbers. If Card 3 is imbalanced, use [CORRECTION:3]. If Card 5 is imbalanced, use [CORRECTION:5]. Never renumber sequentially. ALL imbalanced cards need corrections — Too Much, Too Little, AND Unacknowledged.)

[PATH]
Path to Balance section. ONLY include if 2 or more cards are imbalanced. Skip entirely if 0-1 cards are imbalanced.
When included, structure it as:

THE PATTERN
One sentence identifying what the corrections have in common (shared channel, shared status type, similar archetypal themes).

THE PATH
2-3 sentences synthesizing the unified message — what are all these corrections pointing to together?

NEXT STEPS
• One concrete action derived from Rebalancer 1
• One concrete action derived from Rebalancer 2
(Continue for each rebalancer — focus on ACTION over understanding. Tell them what to DO.)

[LETTER]
A brief letter addressed directly to them (use "you"). Acknowledge what they're navigating with their question. Weave together the key insights from the reading. Voice modulates tone — the letter's function stays invariant (it does not change advice or soften corrections)."#;

pub struct ExpansionLens {
    pub key: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    /// Variant used when expanding the Path to Balance section.
    pub path_prompt: &'static str,
}

pub static EXPANSION_LENSES: [ExpansionLens; 4] = [
    ExpansionLens {
        key: "unpack",
        label: "Unpack",
        prompt: "Go deeper on this specific section. Explore the layers, nuances, and implications. What's really happening here beneath the surface? Keep the same tone.",
        path_prompt: "Expand on the Path to Balance with more detail. Go deeper on the synthesis of these corrections and what they're pointing to together.",
    },
    ExpansionLens {
        key: "clarify",
        label: "Clarify",
        prompt: "Make this simpler. Plain English, short sentences, just the core point. Strip away any complexity — what's the essence?",
        path_prompt: "Restate the Path to Balance in simpler, everyday language. Plain words, short sentences — make it completely accessible.",
    },
    ExpansionLens {
        key: "architecture",
        label: "Architecture",
        prompt: "Show the structural derivation. What's the correction math? Why does this particular correction address this particular imbalance? Show the geometry.",
        path_prompt: "Explain the geometric relationships between the corrections. Why do these specific corrections work together? Show the structural logic.",
    },
    ExpansionLens {
        key: "example",
        label: "Example",
        prompt: "Give a concrete real-world example of how this shows up in daily life. A specific scenario someone might recognize — make it tangible and relatable.",
        path_prompt: "Give concrete real-world examples of how to apply this guidance. Specific scenarios someone might encounter — make it tangible.",
    },
];

pub fn expansion_lens(key: &str) -> Option<&'static ExpansionLens> {
    EXPANSION_LENSES.iter().find(|l| l.key == key)
}

/// Question starters offered by the spark command.
pub const SUGGESTIONS: [&str; 43] = [
    "I'm worried about a friend",
    "I have a decision to make",
    "Something feels off at work",
    "I'm considering a big change",
    "Someone's been on my mind",
    "There's tension I can't name",
    "I'm about to have a hard conversation",
    "I'm starting something new",
    "I need to let something go",
    "I had a strange dream",
    "Something keeps coming up",
    "I don't know what I'm feeling",
    "Should I take this opportunity?",
    "I'm stuck on a project",
    "I keep avoiding something",
    "I want to understand someone better",
    "What's the real issue here?",
    "I'm at a crossroads",
    "A relationship feels complicated",
    "I'm not sure what I want",
    "Something ended recently",
    "I'm waiting for something",
    "There's something I need to say",
    "I feel pulled in two directions",
    "What am I ready for?",
    "I want to discuss my childhood",
    "I need to talk about something important",
    "I'm excited about something",
    "Something is ending",
    "I'm grieving",
    "I feel disconnected",
    "There's joy I haven't let in",
    "I want to celebrate something",
    "Why am I like this?",
    "What's blocking me?",
    "Should I make the change?",
    "What am I not seeing?",
    "Is this the right path?",
    "What needs attention?",
    "Where's my energy going?",
    "What wants to emerge?",
    "Am I overthinking this?",
    "What's the real question?",
];

/// Normalize text before it goes into a request: straighten smart
/// punctuation and strip control characters that break JSON transport.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2014}' => out.push_str("--"),
            '\u{2013}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{7F}' => {}
            _ => out.push(ch),
        }
    }
    out
}

pub fn estimate_tokens(text: &str) -> usize {
    match cl100k_base() {
        Ok(bpe) => bpe.encode_with_special_tokens(text).len(),
        // Rough character heuristic if the tokenizer data fails to load.
        Err(_) => text.len() / 4,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: String) -> Message {
        Message { role: "user".to_string(), content }
    }

    pub fn assistant(content: String) -> Message {
        Message { role: "assistant".to_string(), content }
    }
}

/// A fully-assembled request for the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system: String,
    pub messages: Vec<Message>,
    pub est_tokens: usize,
}

impl GenerationRequest {
    pub fn new(system: String, messages: Vec<Message>) -> GenerationRequest {
        let mut total = estimate_tokens(&system);
        for m in &messages {
            total += estimate_tokens(&m.content);
        }
        GenerationRequest { system, messages, est_tokens: total }
    }
}

/// Substitute question when the querent left theirs blank.
pub fn effective_question(question: &str, mode: SpreadMode) -> String {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        match mode {
            SpreadMode::Forge => "Forging intention".to_string(),
            _ => "General reading".to_string(),
        }
    } else {
        trimmed.to_string()
    }
}

fn draw_context(
    durable: Option<&spread::DurableSpread>,
    index: usize,
    draw: &Draw,
) -> Result<String, NirmanakayaError> {
    if let Some(s) = durable {
        if let Some(frame) = s.frames.get(index) {
            return Ok(format!("{} ({})", frame.name, frame.meaning));
        }
    }
    match draw.position {
        Some(p) => Ok(format!("Position {} {}", p, catalog::archetype(p)?.name)),
        None => Ok("Draw".to_string()),
    }
}

/// Render draws as the block list the collaborator interprets. Each block
/// carries the canonical name, architecture line, status line, and the
/// pre-computed correction.
pub fn format_draws(
    draws: &[Draw],
    mode: SpreadMode,
    key: &str,
) -> Result<String, NirmanakayaError> {
    let durable = match mode {
        SpreadMode::Durable => Some(
            spread::durable_spread(key)
                .ok_or_else(|| NirmanakayaError::NotFound(format!("durable spread '{}'", key)))?,
        ),
        _ => None,
    };

    let mut blocks = Vec::with_capacity(draws.len());
    for (i, draw) in draws.iter().enumerate() {
        let sig = catalog::signature(draw.transient)?;
        let stat = draw.status.info();
        let context = draw_context(durable, i, draw)?;

        let trans_info = match sig {
            Signature::Archetype(a) => format!("{} — Major Archetype", a.name),
            Signature::Bound(b) => format!(
                "{} — {} Channel, expresses {}",
                b.name,
                b.channel,
                catalog::archetype(b.archetype)?.name
            ),
            Signature::Agent(a) => format!(
                "{} — {} of {}, embodies {}",
                a.name,
                a.role,
                a.channel,
                catalog::archetype(a.archetype)?.name
            ),
        };

        let correction_line = match correction::compute_correction(draw.transient, draw.status)?
            .as_ref()
            .and_then(correction::correction_text)
        {
            Some(text) => format!(
                "Correction: {}. IMPORTANT: Use this exact correction, do not calculate different numbers.",
                text
            ),
            None => "No correction needed (Balanced)".to_string(),
        };

        blocks.push(format!(
            "**Signature {} — {}**: {}\nTransient: {}\nStatus: {} — {}\n{}",
            i + 1,
            context,
            draw.status.phrase(sig.name()),
            trans_info,
            stat.name,
            stat.desc,
            correction_line
        ));
    }
    Ok(blocks.join("\n\n"))
}

/// Assemble the initial reading request.
pub fn reading_request(
    question: &str,
    mode: SpreadMode,
    key: &str,
    stance: &Stance,
    draws: &[Draw],
) -> Result<GenerationRequest, NirmanakayaError> {
    let draw_text = format_draws(draws, mode, key)?;
    let spread_name = spread::spread_display_name(mode, key);
    let safe_question = sanitize(question);
    let system = format!(
        "{}\n\n{}\n\n{}\n\nLetter tone for this stance: {}",
        BASE_SYSTEM,
        stance::build_stance_prompt(stance),
        FORMAT_INSTRUCTIONS,
        stance.voice.letter_tone()
    );
    let user = format!(
        "QUESTION: \"{}\"\n\nTHE DRAW ({}):\n\n{}\n\nRespond using the exact section markers: [SUMMARY], [CARD:1], [CARD:2], etc., [CORRECTION:N] for each imbalanced card (where N matches the card number — use [CORRECTION:3] for Card 3, [CORRECTION:5] for Card 5, etc.), [LETTER]. Each marker on its own line.",
        safe_question, spread_name, draw_text
    );
    Ok(GenerationRequest::new(system, vec![Message::user(user)]))
}

/// Assemble an expansion request for one section of a parsed reading.
/// `section_context` and `section_content` identify and quote the section;
/// `expansion_prompt` is the lens text (path variant already chosen).
pub fn expansion_request(
    question: &str,
    mode: SpreadMode,
    key: &str,
    stance: &Stance,
    draws: &[Draw],
    section_context: &str,
    section_content: &str,
    expansion_prompt: &str,
) -> Result<GenerationRequest, NirmanakayaError> {
    let draw_text = format_draws(draws, mode, key)?;
    let system = format!(
        "{}\n\n{}\n\nYou are expanding on a specific section of a reading. Keep the same tone as the original reading. Be concise but thorough. Always connect your expansion back to the querent's specific question.",
        BASE_SYSTEM,
        stance::build_stance_prompt(stance)
    );
    let user = format!(
        "QUERENT'S QUESTION: \"{}\"\n\nTHE DRAW:\n{}\n\nSECTION BEING EXPANDED ({}):\n{}\n\nEXPANSION REQUEST:\n{}\n\nRespond directly with the expanded content. No section markers needed. Keep it focused on this specific section AND relevant to their question: \"{}\"",
        question, draw_text, section_context, section_content, expansion_prompt, question
    );
    Ok(GenerationRequest::new(system, vec![Message::user(user)]))
}

/// Which thread operation a continuation performs. Both draw a new card;
/// reflect frames the input as inquiry, forge as declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadOp {
    Reflect,
    Forge,
}

impl ThreadOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadOp::Reflect => "reflect",
            ThreadOp::Forge => "forge",
        }
    }

    pub fn from_key(key: &str) -> Option<ThreadOp> {
        match key {
            "reflect" => Some(ThreadOp::Reflect),
            "forge" => Some(ThreadOp::Forge),
            _ => None,
        }
    }
}

fn new_card_block(new_draw: &Draw) -> Result<String, NirmanakayaError> {
    let sig = catalog::signature(new_draw.transient)?;
    Ok(format!(
        "NEW CARD DRAWN IN RESPONSE: {}\nTraditional: {}\n{}",
        new_draw.status.phrase(sig.name()),
        sig.traditional(),
        sig.description()
    ))
}

/// Assemble a thread continuation request. `nested` selects the shorter
/// system variant used when continuing from inside an existing node, and
/// swaps the parent framing from "section" to "card".
pub fn thread_request(
    op: ThreadOp,
    question: &str,
    stance: &Stance,
    overview: &str,
    parent_label: &str,
    parent_content: &str,
    user_input: &str,
    new_draw: &Draw,
    nested: bool,
) -> Result<GenerationRequest, NirmanakayaError> {
    let safe_question = sanitize(question);
    let safe_input = sanitize(user_input);
    let stance_prompt = stance::build_stance_prompt(stance);
    let card_block = new_card_block(new_draw)?;

    let (system, user) = match (op, nested) {
        (ThreadOp::Reflect, false) => (
            format!(
                "{}\n\n{}\n\nOPERATION: REFLECT (Inquiry/Question)\nThe user is asking a question, exploring, or seeking clarity about this reading.\nA new card has been drawn as the architecture's RESPONSE to their inquiry.\n\nYour job:\n- Acknowledge their question briefly\n- Interpret the NEW CARD as the architecture's answer to what they asked\n- This is a SUB-READING: the drawn card speaks directly to their inquiry\n- Be specific about how the new card addresses their question\n- The card IS the architecture speaking back to them\n\nOutput structure:\n1. Brief acknowledgment of their question (1-2 sentences)\n2. \"The architecture responds with [Card Name]...\"\n3. How this card answers or illuminates their inquiry (2-3 paragraphs)",
                BASE_SYSTEM, stance_prompt
            ),
            format!(
                "ORIGINAL QUESTION: \"{}\"\n\nREADING OVERVIEW:\n{}\n\nSECTION BEING DISCUSSED: {}\n{}\n\nUSER'S INQUIRY/QUESTION:\n\"{}\"\n\n{}\n\nInterpret this new card as the architecture's response to their question.",
                safe_question, overview, parent_label, parent_content, safe_input, card_block
            ),
        ),
        (ThreadOp::Forge, false) => (
            format!(
                "{}\n\n{}\n\nOPERATION: FORGE (Create/Assert)\nThe user has declared an intention or direction. They're not asking — they're stating what they're going to do or create from this reading.\n\nA new card has been drawn as the architecture's RESPONSE to their declaration.\n\nYour job:\n- Acknowledge their declared direction briefly\n- Interpret the NEW CARD as the architecture's response to their assertion\n- This is a SUB-READING: what does this new card reveal about the path they've declared?\n- The new card might affirm, complicate, deepen, or redirect their stated intention\n- Be specific about how the new card speaks to what they said they're doing\n\nOutput structure:\n1. Brief acknowledgment of their direction (1-2 sentences)\n2. The new card's message in context of their declaration (2-3 paragraphs)",
                BASE_SYSTEM, stance_prompt
            ),
            format!(
                "ORIGINAL QUESTION: \"{}\"\n\nREADING OVERVIEW:\n{}\n\nSECTION THEY'RE FORGING FROM: {}\n{}\n\nUSER'S DECLARATION/ASSERTION:\n\"{}\"\n\n{}\n\nInterpret this new card as the architecture's response to their declared direction.",
                safe_question, overview, parent_label, parent_content, safe_input, card_block
            ),
        ),
        (ThreadOp::Reflect, true) => (
            format!(
                "{}\n\n{}\n\nOPERATION: REFLECT (Inquiry/Question)\nThe user is asking a question about the reading. A new card has been drawn as the architecture's response to their inquiry.\n\nYour job:\n- Acknowledge their question briefly\n- Interpret the NEW CARD as the architecture's answer to what they asked\n- This is a SUB-READING: the drawn card speaks directly to their inquiry\n- The card IS the architecture speaking back to them",
                BASE_SYSTEM, stance_prompt
            ),
            format!(
                "ORIGINAL QUESTION: \"{}\"\n\nREADING OVERVIEW:\n{}\n\nCARD BEING DISCUSSED: {}\n{}\n\nUSER'S INQUIRY/QUESTION:\n\"{}\"\n\n{}\n\nInterpret this new card as the architecture's response to their question.",
                safe_question, overview, parent_label, parent_content, safe_input, card_block
            ),
        ),
        (ThreadOp::Forge, true) => (
            format!(
                "{}\n\n{}\n\nOPERATION: FORGE (Create/Assert)\nThe user has declared an intention. A new card has been drawn as the architecture's response.\n\nYour job:\n- Acknowledge their declared direction briefly\n- Interpret the NEW CARD as the architecture's response to their assertion\n- This is a SUB-READING of the new card against their declared direction",
                BASE_SYSTEM, stance_prompt
            ),
            format!(
                "ORIGINAL QUESTION: \"{}\"\n\nREADING OVERVIEW:\n{}\n\nCARD THEY'RE FORGING FROM: {}\n{}\n\nUSER'S DECLARATION/ASSERTION:\n\"{}\"\n\n{}\n\nInterpret this new card as the architecture's response to their declared direction.",
                safe_question, overview, parent_label, parent_content, safe_input, card_block
            ),
        ),
    };
    Ok(GenerationRequest::new(system, vec![Message::user(user)]))
}

/// Flatten a parsed reading into the context block reused by follow-ups.
pub fn reading_context(parsed: &ParsedReading) -> String {
    let mut out = String::new();
    out.push_str("PREVIOUS READING:\n\n");
    if let Some(summary) = &parsed.summary {
        out.push_str(&format!("Summary: {}\n\n", summary));
    }
    for card in &parsed.cards {
        out.push_str(&format!("Signature {}: {}\n\n", card.index + 1, card.content));
    }
    for corr in &parsed.corrections {
        out.push_str(&format!("Correction {}: {}\n\n", corr.card_index + 1, corr.content));
    }
    out.trim_end().to_string()
}

/// Assemble a follow-up request. The full reading context rides along in
/// the message; the transcript itself is kept by the session.
pub fn followup_request(
    mode: SpreadMode,
    key: &str,
    stance: &Stance,
    draws: &[Draw],
    parsed: &ParsedReading,
    follow_up: &str,
) -> Result<GenerationRequest, NirmanakayaError> {
    let draw_text = format_draws(draws, mode, key)?;
    let system = format!(
        "{}\n\n{}\n\nYou are continuing a conversation about a reading. Answer their follow-up question directly, referencing the reading context as needed. No section markers — just respond naturally.",
        BASE_SYSTEM,
        stance::build_stance_prompt(stance)
    );
    let context_message = format!(
        "THE DRAW:\n{}\n\n{}\n\nFOLLOW-UP QUESTION: {}",
        draw_text,
        reading_context(parsed),
        sanitize(follow_up)
    );
    Ok(GenerationRequest::new(system, vec![Message::user(context_message)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::Status;

    fn sample_draws() -> Vec<Draw> {
        vec![
            Draw { position: Some(4), transient: 7, status: Status::TooMuch },
            Draw { position: Some(11), transient: 28, status: Status::Balanced },
        ]
    }

    #[test]
    fn test_sanitize_straightens_punctuation() {
        assert_eq!(sanitize("don\u{2019}t \u{201C}quote\u{201D} me\u{2026}"), "don't \"quote\" me...");
        assert_eq!(sanitize("a\u{2014}b\u{2013}c"), "a--b-c");
        assert_eq!(sanitize("x\u{0}y\u{7F}z"), "xyz");
        assert_eq!(sanitize("keep\ttabs\nand newlines"), "keep\ttabs\nand newlines");
    }

    #[test]
    fn test_effective_question_fallbacks() {
        assert_eq!(effective_question("  ", SpreadMode::Forge), "Forging intention");
        assert_eq!(effective_question("", SpreadMode::Random), "General reading");
        assert_eq!(effective_question(" why? ", SpreadMode::Random), "why?");
    }

    #[test]
    fn test_format_draws_blocks() {
        let text = format_draws(&sample_draws(), SpreadMode::Random, "two").unwrap();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("**Signature 1 — Position 4 Order**: Too Much Drive"));
        assert!(blocks[0].contains("Transient: Drive — Major Archetype"));
        assert!(blocks[0].contains("Status: Too Much — Over-expressing"));
        assert!(blocks[0].contains("Correction: Position 14 Balance via DIAGONAL duality."));
        assert!(blocks[0].contains("IMPORTANT: Use this exact correction"));
        // Bound block names its channel and associated archetype.
        assert!(blocks[1].contains("Transient: Resolve — Intent Channel, expresses Drive"));
        assert!(blocks[1].ends_with("No correction needed (Balanced)"));
    }

    #[test]
    fn test_format_draws_durable_uses_frames() {
        let draws = vec![
            Draw { position: None, transient: 2, status: Status::Balanced },
            Draw { position: None, transient: 40, status: Status::Balanced },
            Draw { position: None, transient: 70, status: Status::Balanced },
        ];
        let text = format_draws(&draws, SpreadMode::Durable, "arc").unwrap();
        assert!(text.contains("**Signature 1 — Situation (what is)**"));
        assert!(text.contains("**Signature 2 — Movement (what's in motion)**"));
        assert!(text.contains("**Signature 3 — Integration (what completes)**"));
    }

    #[test]
    fn test_reading_request_shape() {
        let stance = Stance::default();
        let req = reading_request("Should I move?", SpreadMode::Random, "two", &stance, &sample_draws()).unwrap();
        assert!(req.system.starts_with("CRITICAL: Never use pet names"));
        assert!(req.system.contains("RESPONSE FORMAT:"));
        assert!(req.system.ends_with("Letter tone for this stance: relational, human"));
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert!(req.messages[0].content.starts_with("QUESTION: \"Should I move?\""));
        assert!(req.messages[0].content.contains("THE DRAW (Two Emergent):"));
        assert!(req.messages[0].content.contains("Each marker on its own line."));
        assert!(req.est_tokens > 0);
    }

    #[test]
    fn test_thread_request_variants() {
        let stance = Stance::default();
        let new_draw = Draw { position: None, transient: 63, status: Status::TooLittle };
        let top = thread_request(
            ThreadOp::Reflect,
            "Q",
            &stance,
            "overview",
            "Overview",
            "content",
            "what about work?",
            &new_draw,
            false,
        )
        .unwrap();
        assert!(top.system.contains("OPERATION: REFLECT (Inquiry/Question)"));
        assert!(top.messages[0].content.contains("SECTION BEING DISCUSSED: Overview"));
        assert!(top.messages[0]
            .content
            .contains("NEW CARD DRAWN IN RESPONSE: Too Little Catalyst of Intent"));

        let nested = thread_request(
            ThreadOp::Forge,
            "Q",
            &stance,
            "overview",
            "Too Much Drive",
            "node text",
            "I will slow down.",
            &new_draw,
            true,
        )
        .unwrap();
        assert!(nested.system.contains("OPERATION: FORGE (Create/Assert)"));
        assert!(nested.messages[0].content.contains("CARD THEY'RE FORGING FROM: Too Much Drive"));
    }

    #[test]
    fn test_reading_context_numbers_are_one_based() {
        let parsed = ParsedReading {
            summary: Some("S".to_string()),
            cards: vec![crate::core::parser::CardSection { index: 0, content: "c0".to_string() }],
            corrections: vec![crate::core::parser::CorrectionSection {
                card_index: 0,
                content: "r0".to_string(),
            }],
            rebalancer_summary: None,
            letter: None,
        };
        let ctx = reading_context(&parsed);
        assert!(ctx.contains("Summary: S"));
        assert!(ctx.contains("Signature 1: c0"));
        assert!(ctx.contains("Correction 1: r0"));
    }

    #[test]
    fn test_expansion_lenses() {
        assert_eq!(EXPANSION_LENSES.len(), 4);
        assert!(expansion_lens("architecture").is_some());
        assert!(expansion_lens("other").is_none());
    }
}

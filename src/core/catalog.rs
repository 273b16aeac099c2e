//! The 78-signature catalog: 22 Archetypes, 40 Bounds, 16 Agents.
//!
//! Every table here is literal, hand-carried data. Associated-archetype
//! links are stored per entry, never derived at call time; the catalog is
//! the authority and the validation harness pins its contents.

use crate::core::error::NirmanakayaError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ARCHETYPE_COUNT: u8 = 22;
pub const BOUND_COUNT: u8 = 40;
pub const AGENT_COUNT: u8 = 16;
pub const SIGNATURE_COUNT: u8 = ARCHETYPE_COUNT + BOUND_COUNT + AGENT_COUNT;

/// First Bound ID. Bounds run channel-major, number ascending.
pub const BOUND_BASE: u8 = 22;
/// First Agent ID. Agents run channel-major, role order Initiate..Executor.
pub const AGENT_BASE: u8 = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum House {
    Gestalt,
    Spirit,
    Mind,
    Emotion,
    Body,
    Portal,
}

impl House {
    pub const ALL: [House; 6] = [
        House::Gestalt,
        House::Spirit,
        House::Mind,
        House::Emotion,
        House::Body,
        House::Portal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            House::Gestalt => "Gestalt",
            House::Spirit => "Spirit",
            House::Mind => "Mind",
            House::Emotion => "Emotion",
            House::Body => "Body",
            House::Portal => "Portal",
        }
    }

    pub fn info(&self) -> &'static HouseInfo {
        &HOUSE_INFO[*self as usize]
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Intent,
    Cognition,
    Resonance,
    Structure,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Intent,
        Channel::Cognition,
        Channel::Resonance,
        Channel::Structure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Intent => "Intent",
            Channel::Cognition => "Cognition",
            Channel::Resonance => "Resonance",
            Channel::Structure => "Structure",
        }
    }

    pub fn info(&self) -> &'static ChannelInfo {
        &CHANNEL_INFO[*self as usize]
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Initiate,
    Catalyst,
    Steward,
    Executor,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Initiate, Role::Catalyst, Role::Steward, Role::Executor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Initiate => "Initiate",
            Role::Catalyst => "Catalyst",
            Role::Steward => "Steward",
            Role::Executor => "Executor",
        }
    }

    pub fn info(&self) -> &'static RoleInfo {
        &ROLE_INFO[*self as usize]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct HouseInfo {
    pub name: &'static str,
    pub members: &'static [u8],
    pub governor: Option<u8>,
    pub description: &'static str,
    pub extended: &'static str,
}

pub struct ChannelInfo {
    pub name: &'static str,
    pub traditional: &'static str,
    pub element: &'static str,
    pub description: &'static str,
    pub extended: &'static str,
}

pub struct RoleInfo {
    pub name: &'static str,
    pub traditional: &'static str,
    pub description: &'static str,
    pub extended: &'static str,
}

pub struct Archetype {
    pub id: u8,
    pub name: &'static str,
    pub traditional: &'static str,
    pub house: House,
    pub channel: Option<Channel>,
    pub function: &'static str,
    pub description: &'static str,
}

pub struct Bound {
    pub id: u8,
    pub name: &'static str,
    pub traditional: &'static str,
    pub channel: Channel,
    /// 1..=10; 1-5 are Inner bounds, 6-10 Outer.
    pub number: u8,
    /// Associated Archetype the bound expresses.
    pub archetype: u8,
    pub description: &'static str,
}

impl Bound {
    pub fn is_inner(&self) -> bool {
        self.number <= 5
    }

    pub fn polarity(&self) -> &'static str {
        if self.is_inner() { "Inner" } else { "Outer" }
    }
}

pub struct Agent {
    pub id: u8,
    pub name: &'static str,
    pub traditional: &'static str,
    pub channel: Channel,
    pub role: Role,
    /// Associated Archetype the agent embodies.
    pub archetype: u8,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureKind {
    Archetype,
    Bound,
    Agent,
}

impl SignatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Archetype => "Archetype",
            SignatureKind::Bound => "Bound",
            SignatureKind::Agent => "Agent",
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-resolved signature. Exactly one of three kinds; the correction
/// engine dispatches exhaustively on this.
#[derive(Clone, Copy)]
pub enum Signature {
    Archetype(&'static Archetype),
    Bound(&'static Bound),
    Agent(&'static Agent),
}

impl Signature {
    pub fn id(&self) -> u8 {
        match self {
            Signature::Archetype(a) => a.id,
            Signature::Bound(b) => b.id,
            Signature::Agent(a) => a.id,
        }
    }

    pub fn kind(&self) -> SignatureKind {
        match self {
            Signature::Archetype(_) => SignatureKind::Archetype,
            Signature::Bound(_) => SignatureKind::Bound,
            Signature::Agent(_) => SignatureKind::Agent,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Signature::Archetype(a) => a.name,
            Signature::Bound(b) => b.name,
            Signature::Agent(a) => a.name,
        }
    }

    pub fn traditional(&self) -> &'static str {
        match self {
            Signature::Archetype(a) => a.traditional,
            Signature::Bound(b) => b.traditional,
            Signature::Agent(a) => a.traditional,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Signature::Archetype(a) => a.description,
            Signature::Bound(b) => b.description,
            Signature::Agent(a) => a.description,
        }
    }

    pub fn channel(&self) -> Option<Channel> {
        match self {
            Signature::Archetype(a) => a.channel,
            Signature::Bound(b) => Some(b.channel),
            Signature::Agent(a) => Some(a.channel),
        }
    }

    /// Associated Archetype for Bounds and Agents; None for Archetypes.
    pub fn associated_archetype(&self) -> Option<u8> {
        match self {
            Signature::Archetype(_) => None,
            Signature::Bound(b) => Some(b.archetype),
            Signature::Agent(a) => Some(a.archetype),
        }
    }
}

/// Resolve any ID in [0, 78). IDs outside the catalog are a caller bug.
pub fn signature(id: u8) -> Result<Signature, NirmanakayaError> {
    if id < BOUND_BASE {
        Ok(Signature::Archetype(&ARCHETYPES[id as usize]))
    } else if id < AGENT_BASE {
        Ok(Signature::Bound(&BOUNDS[(id - BOUND_BASE) as usize]))
    } else if id < SIGNATURE_COUNT {
        Ok(Signature::Agent(&AGENTS[(id - AGENT_BASE) as usize]))
    } else {
        Err(NirmanakayaError::OutOfRange(format!(
            "signature id {} (valid: 0..{})",
            id, SIGNATURE_COUNT
        )))
    }
}

pub fn archetype(id: u8) -> Result<&'static Archetype, NirmanakayaError> {
    ARCHETYPES.get(id as usize).ok_or_else(|| {
        NirmanakayaError::OutOfRange(format!("archetype id {} (valid: 0..{})", id, ARCHETYPE_COUNT))
    })
}

/// House membership lookup for an Archetype ID.
pub fn house_of(archetype_id: u8) -> Result<House, NirmanakayaError> {
    Ok(archetype(archetype_id)?.house)
}

/// The unique Bound with the given channel and number, if any.
pub fn bound_for(channel: Channel, number: u8) -> Option<&'static Bound> {
    BOUNDS.iter().find(|b| b.channel == channel && b.number == number)
}

/// Reverse lookup: all Bounds and Agents whose associated Archetype is
/// `archetype_id`, in catalog declaration order.
pub fn associated_cards(
    archetype_id: u8,
) -> Result<(Vec<&'static Bound>, Vec<&'static Agent>), NirmanakayaError> {
    archetype(archetype_id)?;
    let bounds = BOUNDS.iter().filter(|b| b.archetype == archetype_id).collect();
    let agents = AGENTS.iter().filter(|a| a.archetype == archetype_id).collect();
    Ok((bounds, agents))
}

pub fn all_signatures() -> impl Iterator<Item = Signature> {
    (0..SIGNATURE_COUNT).map(|id| match signature(id) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    })
}

// House order follows the House enum.
pub static HOUSE_INFO: [HouseInfo; 6] = [
    HouseInfo {
        name: "Gestalt",
        members: &[0, 1, 19, 20],
        governor: Some(10),
        description: "The integrative whole — identity, will, actualization, and awareness.",
        extended: "Gestalt contains the archetypes of unified selfhood: Potential (0), Will (1), Actualization (19), and Awareness (20). Governed by Cycles (10), this house represents the complete self — not as a collection of parts, but as an integrated whole that is more than the sum of its components.",
    },
    HouseInfo {
        name: "Spirit",
        members: &[2, 3, 17, 18],
        governor: Some(0),
        description: "Inner knowing and aspiration — wisdom, nurturing, inspiration, and imagination.",
        extended: "Spirit contains the archetypes of deep knowing: Wisdom (2), Nurturing (3), Inspiration (17), and Imagination (18). Governed by Potential (0), this house represents our connection to meaning, purpose, and the sources of guidance that transcend rational analysis.",
    },
    HouseInfo {
        name: "Mind",
        members: &[4, 5, 15, 16],
        governor: Some(19),
        description: "Pattern and structure — order, culture, abstraction, and breakthrough.",
        extended: "Mind contains the archetypes of mental organization: Order (4), Culture (5), Abstraction (15), and Breakthrough (16). Governed by Actualization (19), this house represents how we structure reality through thought, language, and systems.",
    },
    HouseInfo {
        name: "Emotion",
        members: &[6, 7, 13, 14],
        governor: Some(20),
        description: "Feeling and drive — compassion, motivation, change, and balance.",
        extended: "Emotion contains the archetypes of feeling and motivation: Compassion (6), Drive (7), Change (13), and Balance (14). Governed by Awareness (20), this house represents our capacity to feel, connect, and be moved toward action.",
    },
    HouseInfo {
        name: "Body",
        members: &[8, 9, 11, 12],
        governor: Some(1),
        description: "Form and practice — fortitude, discipline, equity, and sacrifice.",
        extended: "Body contains the archetypes of embodied practice: Fortitude (8), Discipline (9), Equity (11), and Sacrifice (12). Governed by Will (1), this house represents how we manifest in physical reality through endurance, skill, fairness, and release.",
    },
    HouseInfo {
        name: "Portal",
        members: &[10, 21],
        governor: None,
        description: "Threshold of entry and exit — cycles of beginning and completion.",
        extended: "Portal contains the archetypes of transition: Cycles (10) as Ingress and Wholeness (21) as Egress. This house has no governor — it represents the thresholds through which consciousness enters and exits the system, the turning points of becoming.",
    },
];

// Channel order follows the Channel enum.
pub static CHANNEL_INFO: [ChannelInfo; 4] = [
    ChannelInfo {
        name: "Intent",
        traditional: "Wands",
        element: "Fire",
        description: "Directed will and action — the channel of purposeful movement toward chosen ends.",
        extended: "Intent is the fire channel — energy directed toward goals. It governs motivation, drive, ambition, and the capacity to move from vision to action. When healthy, Intent provides momentum without burning out. When imbalanced, it becomes either aggressive pushing or paralyzed inaction.",
    },
    ChannelInfo {
        name: "Cognition",
        traditional: "Swords",
        element: "Air",
        description: "Mental clarity and understanding — the channel of thought, analysis, and perception.",
        extended: "Cognition is the air channel — the realm of mind, thought, and clarity. It governs how we perceive, analyze, communicate, and understand. When healthy, Cognition provides clear seeing without over-thinking. When imbalanced, it becomes either mental chaos or cold disconnection.",
    },
    ChannelInfo {
        name: "Resonance",
        traditional: "Cups",
        element: "Water",
        description: "Emotional attunement and connection — the channel of feeling and relationship.",
        extended: "Resonance is the water channel — the realm of emotion, intuition, and connection. It governs how we feel, relate, and attune to others. When healthy, Resonance provides deep feeling without drowning. When imbalanced, it becomes either emotional flooding or numbness.",
    },
    ChannelInfo {
        name: "Structure",
        traditional: "Pentacles",
        element: "Earth",
        description: "Material form and manifestation — the channel of building, resources, and embodiment.",
        extended: "Structure is the earth channel — the realm of form, matter, and practical reality. It governs resources, health, work, and physical manifestation. When healthy, Structure provides stability without rigidity. When imbalanced, it becomes either hoarding or instability.",
    },
];

// Role order follows the Role enum.
pub static ROLE_INFO: [RoleInfo; 4] = [
    RoleInfo {
        name: "Initiate",
        traditional: "Page",
        description: "Fresh engagement with the channel's energy — curious, learning, discovering.",
        extended: "The Initiate represents the beginning of conscious work with a channel's energy. Like a student encountering a discipline for the first time, there's freshness, curiosity, and the potential for growth. The Initiate brings enthusiasm and openness, though the energy is not yet fully integrated or mature.",
    },
    RoleInfo {
        name: "Catalyst",
        traditional: "Knight",
        description: "Energy in motion — active, pursuing, creating change through momentum.",
        extended: "The Catalyst represents the channel's energy in dynamic motion. Like a knight charging forward, this role embodies active pursuit and transformation through action. The Catalyst creates change, sometimes dramatically, by applying the channel's energy with force and direction.",
    },
    RoleInfo {
        name: "Steward",
        traditional: "Queen",
        description: "Mature holding of the energy — nurturing, sustaining, creating conditions for growth.",
        extended: "The Steward represents the channel's energy held with maturity and care. Like a queen who tends to her realm, this role nurtures and sustains the energy, creating conditions for others to flourish. The Steward embodies receptive mastery — power through presence rather than force.",
    },
    RoleInfo {
        name: "Executor",
        traditional: "King",
        description: "Mastery and authority — directing, deciding, embodying the channel's fullest expression.",
        extended: "The Executor represents the channel's energy at its most masterful and authoritative. Like a king who commands with earned wisdom, this role directs the energy with full knowledge of its nature and consequences. The Executor embodies active mastery — the ability to wield the channel's power decisively.",
    },
];

pub static ARCHETYPES: [Archetype; 22] = [
    Archetype {
        id: 0,
        name: "Potential",
        traditional: "The Fool",
        house: House::Gestalt,
        channel: None,
        function: "pure openness",
        description: "The soul's yes before context. Pure openness, pre-experiential readiness. Unshaped becoming.",
    },
    Archetype {
        id: 1,
        name: "Will",
        traditional: "The Magician",
        house: House::Gestalt,
        channel: None,
        function: "intention made structural",
        description: "The architecture of intention. Not willpower, but will-structure — how form begins to matter.",
    },
    Archetype {
        id: 2,
        name: "Wisdom",
        traditional: "The High Priestess",
        house: House::Spirit,
        channel: Some(Channel::Cognition),
        function: "receptive knowing",
        description: "Direct perception without analysis. Receptive intelligence, the soul's first encounter with truth.",
    },
    Archetype {
        id: 3,
        name: "Nurturing",
        traditional: "The Empress",
        house: House::Spirit,
        channel: Some(Channel::Structure),
        function: "generative support",
        description: "The architecture of life support. Generative structure that provides conditions for growth.",
    },
    Archetype {
        id: 4,
        name: "Order",
        traditional: "The Emperor",
        house: House::Mind,
        channel: Some(Channel::Intent),
        function: "coherent structure",
        description: "The fundamental shape of coherence. Not what to think, but how to think.",
    },
    Archetype {
        id: 5,
        name: "Culture",
        traditional: "The Hierophant",
        house: House::Mind,
        channel: Some(Channel::Resonance),
        function: "shared meaning",
        description: "Emotion woven into thought. Shared memory and moral continuity.",
    },
    Archetype {
        id: 6,
        name: "Compassion",
        traditional: "The Lovers",
        house: House::Emotion,
        channel: Some(Channel::Resonance),
        function: "relational recognition",
        description: "Meeting another without leaving the self. Recognition, not sacrifice.",
    },
    Archetype {
        id: 7,
        name: "Drive",
        traditional: "The Chariot",
        house: House::Emotion,
        channel: Some(Channel::Intent),
        function: "felt momentum",
        description: "Emotional propulsion. Movement from feeling, not despite it.",
    },
    Archetype {
        id: 8,
        name: "Fortitude",
        traditional: "Strength",
        house: House::Body,
        channel: Some(Channel::Structure),
        function: "aligned endurance",
        description: "The capacity to remain aligned under strain. Structure without collapse.",
    },
    Archetype {
        id: 9,
        name: "Discipline",
        traditional: "The Hermit",
        house: House::Body,
        channel: Some(Channel::Cognition),
        function: "purposeful repetition",
        description: "Repetition with purpose. Attunement through action.",
    },
    Archetype {
        id: 10,
        name: "Cycles",
        traditional: "Wheel of Fortune",
        house: House::Portal,
        channel: None,
        function: "the turning point",
        description: "The cosmic zero point. The condition in which creation is possible.",
    },
    Archetype {
        id: 11,
        name: "Equity",
        traditional: "Justice",
        house: House::Body,
        channel: Some(Channel::Resonance),
        function: "fair coherence",
        description: "Making space for what is fair. Coherence, not correctness.",
    },
    Archetype {
        id: 12,
        name: "Sacrifice",
        traditional: "The Hanged Man",
        house: House::Body,
        channel: Some(Channel::Intent),
        function: "release into alignment",
        description: "Realignment through letting go. What cannot be forced must be felt.",
    },
    Archetype {
        id: 13,
        name: "Change",
        traditional: "Death",
        house: House::Emotion,
        channel: Some(Channel::Structure),
        function: "transformative dissolution",
        description: "Transformation born of emotional maturity. Dissolving what can no longer hold life.",
    },
    Archetype {
        id: 14,
        name: "Balance",
        traditional: "Temperance",
        house: House::Emotion,
        channel: Some(Channel::Cognition),
        function: "dynamic equilibrium",
        description: "Dynamic peace. The capacity to engage without becoming destabilized.",
    },
    Archetype {
        id: 15,
        name: "Abstraction",
        traditional: "The Devil",
        house: House::Mind,
        channel: Some(Channel::Cognition),
        function: "unbound meaning",
        description: "The freedom of mind beyond certainty. Meaning becoming metaphor.",
    },
    Archetype {
        id: 16,
        name: "Breakthrough",
        traditional: "The Tower",
        house: House::Mind,
        channel: Some(Channel::Structure),
        function: "liberating collapse",
        description: "Structure collapsing to make room for new forms. Insight crashing through false stability.",
    },
    Archetype {
        id: 17,
        name: "Inspiration",
        traditional: "The Star",
        house: House::Spirit,
        channel: Some(Channel::Intent),
        function: "aspiration given direction",
        description: "Aspiration crystallized into direction. Hope that has found form, trust made visible.",
    },
    Archetype {
        id: 18,
        name: "Imagination",
        traditional: "The Moon",
        house: House::Spirit,
        channel: Some(Channel::Resonance),
        function: "vision become story",
        description: "Soul feedback through story. The recursive spiral where vision becomes myth.",
    },
    Archetype {
        id: 19,
        name: "Actualization",
        traditional: "The Sun",
        house: House::Gestalt,
        channel: None,
        function: "embodied coherence",
        description: "Becoming what was already true. Not manifestation, but embodiment of coherent self-expression.",
    },
    Archetype {
        id: 20,
        name: "Awareness",
        traditional: "Judgement",
        house: House::Gestalt,
        channel: None,
        function: "recursive self-recognition",
        description: "Recursive self-recognition. The capacity to see oneself clearly and respond authentically.",
    },
    Archetype {
        id: 21,
        name: "Wholeness",
        traditional: "The World",
        house: House::Portal,
        channel: None,
        function: "completion that continues",
        description: "Continuance through completion. The final reconciliation of all polarities.",
    },
];

pub static BOUNDS: [Bound; 40] = [
    // Intent (Wands), 22-31
    Bound {
        id: 22,
        name: "Activation",
        traditional: "Ace of Wands",
        channel: Channel::Intent,
        number: 1,
        archetype: 0,
        description: "Potential's Intent expression at the Inner bound — the first spark of directed energy.",
    },
    Bound {
        id: 23,
        name: "Orientation",
        traditional: "Two of Wands",
        channel: Channel::Intent,
        number: 2,
        archetype: 17,
        description: "Inspiration's Intent expression at the Inner bound — direction forming from aspiration.",
    },
    Bound {
        id: 24,
        name: "Assertion",
        traditional: "Three of Wands",
        channel: Channel::Intent,
        number: 3,
        archetype: 4,
        description: "Order's Intent expression at the Inner bound — will finding coherent shape.",
    },
    Bound {
        id: 25,
        name: "Alignment",
        traditional: "Four of Wands",
        channel: Channel::Intent,
        number: 4,
        archetype: 7,
        description: "Drive's Intent expression at the Inner bound — momentum settling into accord.",
    },
    Bound {
        id: 26,
        name: "Offering",
        traditional: "Five of Wands",
        channel: Channel::Intent,
        number: 5,
        archetype: 12,
        description: "Sacrifice's Intent expression at the Inner bound — energy given before it is asked.",
    },
    Bound {
        id: 27,
        name: "Recognition",
        traditional: "Six of Wands",
        channel: Channel::Intent,
        number: 6,
        archetype: 12,
        description: "Sacrifice's Intent expression at the Outer bound — release acknowledged and received.",
    },
    Bound {
        id: 28,
        name: "Resolve",
        traditional: "Seven of Wands",
        channel: Channel::Intent,
        number: 7,
        archetype: 7,
        description: "Drive's Intent expression at the Outer bound — committed momentum persisting outwardly.",
    },
    Bound {
        id: 29,
        name: "Command",
        traditional: "Eight of Wands",
        channel: Channel::Intent,
        number: 8,
        archetype: 4,
        description: "Order's Intent expression at the Outer bound — coherent will directing events.",
    },
    Bound {
        id: 30,
        name: "Resilience",
        traditional: "Nine of Wands",
        channel: Channel::Intent,
        number: 9,
        archetype: 17,
        description: "Inspiration's Intent expression at the Outer bound — direction that withstands weather.",
    },
    Bound {
        id: 31,
        name: "Realization",
        traditional: "Ten of Wands",
        channel: Channel::Intent,
        number: 10,
        archetype: 0,
        description: "Potential's Intent expression at the Outer bound — openness gathered into arrival.",
    },
    // Cognition (Swords), 32-41
    Bound {
        id: 32,
        name: "Perception",
        traditional: "Ace of Swords",
        channel: Channel::Cognition,
        number: 1,
        archetype: 19,
        description: "Actualization's Cognition expression at the Inner bound — first clear seeing.",
    },
    Bound {
        id: 33,
        name: "Reflection",
        traditional: "Two of Swords",
        channel: Channel::Cognition,
        number: 2,
        archetype: 2,
        description: "Wisdom's Cognition expression at the Inner bound — thought turned quietly inward.",
    },
    Bound {
        id: 34,
        name: "Calculation",
        traditional: "Three of Swords",
        channel: Channel::Cognition,
        number: 3,
        archetype: 15,
        description: "Abstraction's Cognition expression at the Inner bound — pattern weighed against pattern.",
    },
    Bound {
        id: 35,
        name: "Dissonance",
        traditional: "Four of Swords",
        channel: Channel::Cognition,
        number: 4,
        archetype: 14,
        description: "Balance's Cognition expression at the Inner bound — tension registered before resolution.",
    },
    Bound {
        id: 36,
        name: "Clash",
        traditional: "Five of Swords",
        channel: Channel::Cognition,
        number: 5,
        archetype: 9,
        description: "Discipline's Cognition expression at the Inner bound — friction that sharpens attention.",
    },
    Bound {
        id: 37,
        name: "Guidance",
        traditional: "Six of Swords",
        channel: Channel::Cognition,
        number: 6,
        archetype: 9,
        description: "Discipline's Cognition expression at the Outer bound — practiced attention offered outward.",
    },
    Bound {
        id: 38,
        name: "Reconciliation",
        traditional: "Seven of Swords",
        channel: Channel::Cognition,
        number: 7,
        archetype: 14,
        description: "Balance's Cognition expression at the Outer bound — opposed readings brought to terms.",
    },
    Bound {
        id: 39,
        name: "Absorption",
        traditional: "Eight of Swords",
        channel: Channel::Cognition,
        number: 8,
        archetype: 15,
        description: "Abstraction's Cognition expression at the Outer bound — meaning taken in whole.",
    },
    Bound {
        id: 40,
        name: "Multiplicity",
        traditional: "Nine of Swords",
        channel: Channel::Cognition,
        number: 9,
        archetype: 2,
        description: "Wisdom's Cognition expression at the Outer bound — many truths held at once.",
    },
    Bound {
        id: 41,
        name: "Clarity",
        traditional: "Ten of Swords",
        channel: Channel::Cognition,
        number: 10,
        archetype: 19,
        description: "Actualization's Cognition expression at the Outer bound — seeing gathered into coherence.",
    },
    // Resonance (Cups), 42-51
    Bound {
        id: 42,
        name: "Receptivity",
        traditional: "Ace of Cups",
        channel: Channel::Resonance,
        number: 1,
        archetype: 20,
        description: "Awareness's Resonance expression at the Inner bound — feeling met at the threshold.",
    },
    Bound {
        id: 43,
        name: "Merge",
        traditional: "Two of Cups",
        channel: Channel::Resonance,
        number: 2,
        archetype: 18,
        description: "Imagination's Resonance expression at the Inner bound — boundaries softening into shared current.",
    },
    Bound {
        id: 44,
        name: "Ripple",
        traditional: "Three of Cups",
        channel: Channel::Resonance,
        number: 3,
        archetype: 5,
        description: "Culture's Resonance expression at the Inner bound — feeling moving through the shared field.",
    },
    Bound {
        id: 45,
        name: "Reverie",
        traditional: "Four of Cups",
        channel: Channel::Resonance,
        number: 4,
        archetype: 6,
        description: "Compassion's Resonance expression at the Inner bound — tenderness drifting inward.",
    },
    Bound {
        id: 46,
        name: "Ache",
        traditional: "Five of Cups",
        channel: Channel::Resonance,
        number: 5,
        archetype: 11,
        description: "Equity's Resonance expression at the Inner bound — the felt weight of what is owed.",
    },
    Bound {
        id: 47,
        name: "Reciprocity",
        traditional: "Six of Cups",
        channel: Channel::Resonance,
        number: 6,
        archetype: 11,
        description: "Equity's Resonance expression at the Outer bound — exchange flowing both ways.",
    },
    Bound {
        id: 48,
        name: "Allure",
        traditional: "Seven of Cups",
        channel: Channel::Resonance,
        number: 7,
        archetype: 6,
        description: "Compassion's Resonance expression at the Outer bound — recognition drawing connection close.",
    },
    Bound {
        id: 49,
        name: "Release",
        traditional: "Eight of Cups",
        channel: Channel::Resonance,
        number: 8,
        archetype: 5,
        description: "Culture's Resonance expression at the Outer bound — shared feeling allowed to pass.",
    },
    Bound {
        id: 50,
        name: "Fulfillment",
        traditional: "Nine of Cups",
        channel: Channel::Resonance,
        number: 9,
        archetype: 18,
        description: "Imagination's Resonance expression at the Outer bound — vision answered in feeling.",
    },
    Bound {
        id: 51,
        name: "Completion",
        traditional: "Ten of Cups",
        channel: Channel::Resonance,
        number: 10,
        archetype: 20,
        description: "Awareness's Resonance expression at the Outer bound — feeling gathered into wholeness.",
    },
    // Structure (Pentacles), 52-61
    Bound {
        id: 52,
        name: "Initiation",
        traditional: "Ace of Pentacles",
        channel: Channel::Structure,
        number: 1,
        archetype: 1,
        description: "Will's Structure expression at the Inner bound — form beginning to matter.",
    },
    Bound {
        id: 53,
        name: "Flow",
        traditional: "Two of Pentacles",
        channel: Channel::Structure,
        number: 2,
        archetype: 3,
        description: "Nurturing's Structure expression at the Inner bound — support finding its channel.",
    },
    Bound {
        id: 54,
        name: "Formation",
        traditional: "Three of Pentacles",
        channel: Channel::Structure,
        number: 3,
        archetype: 16,
        description: "Breakthrough's Structure expression at the Inner bound — new shape rising from cleared ground.",
    },
    Bound {
        id: 55,
        name: "Preservation",
        traditional: "Four of Pentacles",
        channel: Channel::Structure,
        number: 4,
        archetype: 13,
        description: "Change's Structure expression at the Inner bound — holding what still carries life.",
    },
    Bound {
        id: 56,
        name: "Endurance",
        traditional: "Five of Pentacles",
        channel: Channel::Structure,
        number: 5,
        archetype: 8,
        description: "Fortitude's Structure expression at the Inner bound — strain carried without collapse.",
    },
    Bound {
        id: 57,
        name: "Support",
        traditional: "Six of Pentacles",
        channel: Channel::Structure,
        number: 6,
        archetype: 8,
        description: "Fortitude's Structure expression at the Outer bound — steadiness offered as foundation.",
    },
    Bound {
        id: 58,
        name: "Harvest",
        traditional: "Seven of Pentacles",
        channel: Channel::Structure,
        number: 7,
        archetype: 13,
        description: "Change's Structure expression at the Outer bound — transformation yielding its fruit.",
    },
    Bound {
        id: 59,
        name: "Commitment",
        traditional: "Eight of Pentacles",
        channel: Channel::Structure,
        number: 8,
        archetype: 16,
        description: "Breakthrough's Structure expression at the Outer bound — insight bound into lasting form.",
    },
    Bound {
        id: 60,
        name: "Flourishing",
        traditional: "Nine of Pentacles",
        channel: Channel::Structure,
        number: 9,
        archetype: 3,
        description: "Nurturing's Structure expression at the Outer bound — growth visible and shared.",
    },
    Bound {
        id: 61,
        name: "Achievement",
        traditional: "Ten of Pentacles",
        channel: Channel::Structure,
        number: 10,
        archetype: 1,
        description: "Will's Structure expression at the Outer bound — intention standing complete in form.",
    },
];

pub static AGENTS: [Agent; 16] = [
    // Intent (Wands), 62-65
    Agent {
        id: 62,
        name: "Initiate of Intent",
        traditional: "Page of Wands",
        channel: Channel::Intent,
        role: Role::Initiate,
        archetype: 17,
        description: "The aspect that enters purposeful action with openness, carrying Inspiration's directed hope.",
    },
    Agent {
        id: 63,
        name: "Catalyst of Intent",
        traditional: "Knight of Wands",
        channel: Channel::Intent,
        role: Role::Catalyst,
        archetype: 4,
        description: "The aspect that disrupts stalled momentum, driving Order's coherence into motion.",
    },
    Agent {
        id: 64,
        name: "Steward of Intent",
        traditional: "Queen of Wands",
        channel: Channel::Intent,
        role: Role::Steward,
        archetype: 7,
        description: "The aspect that tends directed momentum, holding Drive's fire without burning out.",
    },
    Agent {
        id: 65,
        name: "Executor of Intent",
        traditional: "King of Wands",
        channel: Channel::Intent,
        role: Role::Executor,
        archetype: 12,
        description: "The aspect that turns intention into act, embodying Sacrifice's disciplined release.",
    },
    // Cognition (Swords), 66-69
    Agent {
        id: 66,
        name: "Initiate of Cognition",
        traditional: "Page of Swords",
        channel: Channel::Cognition,
        role: Role::Initiate,
        archetype: 2,
        description: "The aspect that meets thought freshly, open to Wisdom's direct perception.",
    },
    Agent {
        id: 67,
        name: "Catalyst of Cognition",
        traditional: "Knight of Swords",
        channel: Channel::Cognition,
        role: Role::Catalyst,
        archetype: 15,
        description: "The aspect that unsettles fixed ideas, sparking Abstraction's freedom of mind.",
    },
    Agent {
        id: 68,
        name: "Steward of Cognition",
        traditional: "Queen of Swords",
        channel: Channel::Cognition,
        role: Role::Steward,
        archetype: 14,
        description: "The aspect that holds clear thought steadily, keeping Balance's dynamic peace.",
    },
    Agent {
        id: 69,
        name: "Executor of Cognition",
        traditional: "King of Swords",
        channel: Channel::Cognition,
        role: Role::Executor,
        archetype: 9,
        description: "The aspect that commands the mind through practice, embodying Discipline's attunement.",
    },
    // Resonance (Cups), 70-73
    Agent {
        id: 70,
        name: "Initiate of Resonance",
        traditional: "Page of Cups",
        channel: Channel::Resonance,
        role: Role::Initiate,
        archetype: 18,
        description: "The aspect that feels its way in with curiosity, open to Imagination's vision.",
    },
    Agent {
        id: 71,
        name: "Catalyst of Resonance",
        traditional: "Knight of Cups",
        channel: Channel::Resonance,
        role: Role::Catalyst,
        archetype: 5,
        description: "The aspect that stirs shared feeling into motion, sparking Culture's living memory.",
    },
    Agent {
        id: 72,
        name: "Steward of Resonance",
        traditional: "Queen of Cups",
        channel: Channel::Resonance,
        role: Role::Steward,
        archetype: 6,
        description: "The aspect that holds emotional space, sustaining Compassion's recognition.",
    },
    Agent {
        id: 73,
        name: "Executor of Resonance",
        traditional: "King of Cups",
        channel: Channel::Resonance,
        role: Role::Executor,
        archetype: 11,
        description: "The aspect that acts on felt fairness, embodying Equity's coherence.",
    },
    // Structure (Pentacles), 74-77
    Agent {
        id: 74,
        name: "Initiate of Structure",
        traditional: "Page of Pentacles",
        channel: Channel::Structure,
        role: Role::Initiate,
        archetype: 3,
        description: "The aspect that begins building with care, open to Nurturing's generative support.",
    },
    Agent {
        id: 75,
        name: "Catalyst of Structure",
        traditional: "Knight of Pentacles",
        channel: Channel::Structure,
        role: Role::Catalyst,
        archetype: 16,
        description: "The aspect that breaks stale forms, driving Breakthrough's liberating collapse.",
    },
    Agent {
        id: 76,
        name: "Steward of Structure",
        traditional: "Queen of Pentacles",
        channel: Channel::Structure,
        role: Role::Steward,
        archetype: 13,
        description: "The aspect that tends forms through transition, holding Change's maturity.",
    },
    Agent {
        id: 77,
        name: "Executor of Structure",
        traditional: "King of Pentacles",
        channel: Channel::Structure,
        role: Role::Executor,
        archetype: 8,
        description: "The aspect that masters material form, embodying Fortitude's aligned endurance.",
    },
];

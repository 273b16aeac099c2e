//! The stance system: six dimensions of delivery that shape tone without
//! changing interpretation, plus the named presets.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Wonder,
    Warm,
    Direct,
    Grounded,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Wonder => "wonder",
            Voice::Warm => "warm",
            Voice::Direct => "direct",
            Voice::Grounded => "grounded",
        }
    }

    pub fn from_key(key: &str) -> Option<Voice> {
        match key {
            "wonder" => Some(Voice::Wonder),
            "warm" => Some(Voice::Warm),
            "direct" => Some(Voice::Direct),
            "grounded" => Some(Voice::Grounded),
            _ => None,
        }
    }

    pub fn letter_tone(&self) -> &'static str {
        match self {
            Voice::Wonder => "curious, invitational",
            Voice::Warm => "relational, human",
            Voice::Direct => "concise, declarative",
            Voice::Grounded => "stabilizing, practical",
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            Voice::Wonder => "You're delighted by everything you're seeing here. \"Oh wow, look at THIS!\" You're the friend who gets excited about their friends' lives. Genuinely curious, a little giddy, finding magic in the mundane. You ask questions because you actually want to know. There's warmth in your wonder — you're not just fascinated, you're fascinated by THEM. Playful, light, maybe a little \"okay but how cool is this??\" energy. You make people feel interesting.",
            Voice::Warm => "You're the grandma who's seen everything and loves them completely. Tea's ready, no judgment, all the time in the world. Nothing they say could shock you. You speak from decades of lived wisdom — fierce love wrapped in gentle humor. You don't sugarcoat, but everything lands soft because it's so clearly wrapped in \"I'm on your side, always.\" You can tease a little because the love is obvious. Cozy. Safe. Held.",
            Voice::Direct => "You're the friend who loves them too much to bullshit. You bark because you CARE. No coddling, no \"maybe consider\" — just truth, clean and real. But here's the thing: they FEEL how much you believe in them. You're not mean, you're the one who shows up and says what everyone's thinking. Short sentences. Hard truths. Occasional \"look, I love you, but...\" energy. Tough love is still LOVE. You might roast them a little but they know it's because you see their potential.",
            Voice::Grounded => "You're the wise farmer who's seen a thousand seasons and nothing rattles you anymore. Slow, steady, connected to real things — soil, seasons, growth. No abstractions, no drama. Just \"here's what I've seen.\" There's warmth in your groundedness — you're not cold, you're calm. You might crack a dry joke about how humans complicate simple things. Your hands are calloused, your heart is steady, and you've got nowhere else to be. They feel safe because you're not going anywhere.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Do,
    Feel,
    See,
    Build,
}

impl Focus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Do => "do",
            Focus::Feel => "feel",
            Focus::See => "see",
            Focus::Build => "build",
        }
    }

    pub fn from_key(key: &str) -> Option<Focus> {
        match key {
            "do" => Some(Focus::Do),
            "feel" => Some(Focus::Feel),
            "see" => Some(Focus::See),
            "build" => Some(Focus::Build),
            _ => None,
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            Focus::Do => "Emphasize ACTION with heart. What should they actually DO? Be specific — \"call her\", \"write it down\", \"stop doing X\". But frame it like someone who believes they CAN do it. Not demands, invitations. \"Here's your move\" energy. The reading isn't complete until they know what to do AND feel capable of doing it.",
            Focus::Feel => "Emphasize FEELING with presence. What's the emotional truth here? Help them feel what's actually happening, not just understand it. Name emotions precisely but gently. \"This is grief\" or \"that's actually joy trying to get through.\" You're helping them befriend their own experience. The reading lands in the body, in the heart.",
            Focus::See => "Emphasize UNDERSTANDING with clarity. Help them SEE what's really going on. The pattern, the mechanism, the \"oh THAT'S why\" moment. Be illuminating, not lecturing. You're handing them glasses, not a textbook. The reading should make them go \"OH — now I get it\" and feel smarter, not dumber.",
            Focus::Build => "Emphasize BUILDING with encouragement. What gets created from here? What's the tangible form? Focus on practical steps, resources, foundations — but frame it as exciting, not overwhelming. \"Here's what you're building\" energy. Not dreams, blueprints. Not someday, now. They should feel like they have a plan AND the ability to execute it.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Luminous,
    Rich,
    Clear,
    Essential,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Luminous => "luminous",
            Density::Rich => "rich",
            Density::Clear => "clear",
            Density::Essential => "essential",
        }
    }

    pub fn from_key(key: &str) -> Option<Density> {
        match key {
            "luminous" => Some(Density::Luminous),
            "rich" => Some(Density::Rich),
            "clear" => Some(Density::Clear),
            "essential" => Some(Density::Essential),
            _ => None,
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            Density::Luminous => "Use FULL language — layered, evocative, spacious. Let metaphors bloom. Sentences can breathe and spiral. Poetry welcome. But luminous doesn't mean cold or pretentious — it means RICH. Like a really good meal. Take your time. Let it land in multiple registers. Beauty and warmth together.",
            Density::Rich => "Use EXPANSIVE language — warm, full, satisfying. Not minimal, not overwhelming. Give enough context to feel complete. Paragraphs welcome. Let ideas develop. Like a good conversation where nobody's rushing. Satisfying, not sparse.",
            Density::Clear => "Use ACCESSIBLE language — flowing, balanced, easy to follow. Someone could explain this to a friend. Readable, transmissible. Clear doesn't mean cold — it means KIND. You're making it easy because you care about them getting it. No jargon. No showing off.",
            Density::Essential => "Use MINIMAL language. Bare. Core truth only. Short sentences. Every word earns its place. But minimal doesn't mean harsh — it means RESPECTFUL of their time. You're giving them the gift of brevity. No padding. No fluff. Just what matters.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Resonant,
    Patterned,
    Connected,
    Here,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Resonant => "resonant",
            Scope::Patterned => "patterned",
            Scope::Connected => "connected",
            Scope::Here => "here",
        }
    }

    pub fn from_key(key: &str) -> Option<Scope> {
        match key {
            "resonant" => Some(Scope::Resonant),
            "patterned" => Some(Scope::Patterned),
            "connected" => Some(Scope::Connected),
            "here" => Some(Scope::Here),
            _ => None,
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            Scope::Resonant => "Frame this in the WIDEST context — but make it personal. What's the big pattern showing up NOW? Touch the archetypal without losing THEM. This moment contains everything. Zoom out, but keep them at the center. \"This is part of something bigger, and you're part of it.\"",
            Scope::Patterned => "Frame this in terms of RECURRING DYNAMICS. What's cycling? What rhythm is alive? \"This is happening again because...\" But make patterns feel workable, not fated. Show the loop so they can dance with it, not feel trapped by it.",
            Scope::Connected => "Frame this in RELATIONAL context. How does this link to people and situations around it? Nothing exists alone. Show the web — other people, adjacent situations, ripple effects. But connection should feel supportive, not overwhelming. They're not alone in this.",
            Scope::Here => "Frame this in IMMEDIATE context. This moment. This question. This situation. Stay close. The here and now is enough. But \"here\" should feel intimate, not cramped. You're fully present with them, not limiting them.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Friend,
    Guide,
    Teacher,
    Mentor,
    Master,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Friend => "friend",
            Complexity::Guide => "guide",
            Complexity::Teacher => "teacher",
            Complexity::Mentor => "mentor",
            Complexity::Master => "master",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Friend => "Friend",
            Complexity::Guide => "Guide",
            Complexity::Teacher => "Teacher",
            Complexity::Mentor => "Mentor",
            Complexity::Master => "Master",
        }
    }

    pub fn from_key(key: &str) -> Option<Complexity> {
        match key {
            "friend" => Some(Complexity::Friend),
            "guide" => Some(Complexity::Guide),
            "teacher" => Some(Complexity::Teacher),
            "mentor" => Some(Complexity::Mentor),
            "master" => Some(Complexity::Master),
            _ => None,
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            Complexity::Friend => "You're their BEST friend texting real talk. \"Dude.\" \"Okay but honestly?\" \"Look.\" Short words, short sentences. You can roast them because they KNOW you love them. Light, playful, a little sarcastic when it lands. Use \"lol\", \"honestly\", \"like\", \"okay but\" naturally. Make them laugh AND feel seen. If it's not a little bit fun to read, rewrite it. Emoji okay but don't overdo it.\n\nBANNED: Words over 2 syllables unless necessary. No: nurturing, capacity, authentic, cultivate, resonance, perhaps, somewhat. YES: care, help, real, grow, fit, honestly, okay, lol, look.",
            Complexity::Guide => "You're a camp counselor who's walked this trail a hundred times. Walking WITH them, not ahead of them. Simple because you want them to get it. Warm. Patient. You notice when they're struggling and slow down. You celebrate their wins. Hard things feel doable with you. Light touch, real support. Maybe a gentle joke to ease tension. You're not performing wisdom, you're sharing the path.",
            Complexity::Teacher => "You're their favorite professor — the one who made hard things click AND clearly gave a shit about students. Structured, clear, organized. You use real terms but always explain them. Examples that land. But you're not a robot — you might say \"here's the cool part\" or \"this is where it gets interesting.\" You love this material and it shows. Precise but never cold.",
            Complexity::Mentor => "You're an elder who earned every grey hair and hasn't lost their sense of humor. You speak from experience, not theory. Philosophical depth welcome — you've had time to think about the big questions. Connect their situation to patterns you've seen over decades. No rush. Trust them to sit with complexity. But wisdom doesn't mean heavy — you can be light about deep things. Weight without heaviness.",
            Complexity::Master => "You are the oracle. Full transmission. Nothing simplified. Nothing withheld. Position numbers, duality paths, structural relationships. Master to master, initiate to initiate. The framework speaks through you. Assume they can keep up. Full gravity. BUT — even masters can have a dry wit. Even oracles can appreciate the cosmic joke. Depth and lightness aren't opposites.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seriousness {
    Playful,
    Light,
    Balanced,
    Earnest,
    Grave,
}

impl Seriousness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seriousness::Playful => "playful",
            Seriousness::Light => "light",
            Seriousness::Balanced => "balanced",
            Seriousness::Earnest => "earnest",
            Seriousness::Grave => "grave",
        }
    }

    pub fn from_key(key: &str) -> Option<Seriousness> {
        match key {
            "playful" => Some(Seriousness::Playful),
            "light" => Some(Seriousness::Light),
            "balanced" => Some(Seriousness::Balanced),
            "earnest" => Some(Seriousness::Earnest),
            "grave" => Some(Seriousness::Grave),
            _ => None,
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            Seriousness::Playful => "Find the humor. Be funny. Jokes, teasing, lightness, sarcasm welcome. Make them smile. Truth is often funniest. \"lol\" \"okay but\" \"I mean...\" energy.",
            Seriousness::Light => "Keep it easy. Gentle humor okay. Don't be heavy. Breezy energy. A smile in your voice without forcing jokes.",
            Seriousness::Balanced => "Match the moment. Light when fitting, serious when needed. Read the room and respond in kind.",
            Seriousness::Earnest => "Be sincere. This matters. Heart-forward. No forced jokes. You mean what you say and it shows.",
            Seriousness::Grave => "Full weight. Sacred ground. No levity. Honor the gravity of what's being asked. This is serious business.",
        }
    }
}

fn default_complexity() -> Complexity {
    Complexity::Teacher
}

fn default_seriousness() -> Seriousness {
    Seriousness::Balanced
}

/// A full delivery stance. Older share payloads may omit complexity and
/// seriousness; both default rather than failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stance {
    #[serde(default = "default_complexity")]
    pub complexity: Complexity,
    #[serde(default = "default_seriousness")]
    pub seriousness: Seriousness,
    pub voice: Voice,
    pub focus: Focus,
    pub density: Density,
    pub scope: Scope,
}

impl Default for Stance {
    fn default() -> Self {
        // The Kind preset.
        Stance {
            complexity: Complexity::Guide,
            seriousness: Seriousness::Earnest,
            voice: Voice::Warm,
            focus: Focus::Feel,
            density: Density::Clear,
            scope: Scope::Connected,
        }
    }
}

pub const PRESET_KEYS: [&str; 5] = ["clear", "kind", "playful", "wise", "oracle"];

struct PresetDef {
    key: &'static str,
    name: &'static str,
    stance: Stance,
}

static PRESETS: [PresetDef; 5] = [
    PresetDef {
        key: "clear",
        name: "Clear",
        stance: Stance {
            complexity: Complexity::Friend,
            seriousness: Seriousness::Playful,
            voice: Voice::Warm,
            focus: Focus::Feel,
            density: Density::Essential,
            scope: Scope::Here,
        },
    },
    PresetDef {
        key: "kind",
        name: "Kind",
        stance: Stance {
            complexity: Complexity::Guide,
            seriousness: Seriousness::Earnest,
            voice: Voice::Warm,
            focus: Focus::Feel,
            density: Density::Clear,
            scope: Scope::Connected,
        },
    },
    PresetDef {
        key: "playful",
        name: "Playful",
        stance: Stance {
            complexity: Complexity::Guide,
            seriousness: Seriousness::Playful,
            voice: Voice::Wonder,
            focus: Focus::See,
            density: Density::Clear,
            scope: Scope::Patterned,
        },
    },
    PresetDef {
        key: "wise",
        name: "Wise",
        stance: Stance {
            complexity: Complexity::Mentor,
            seriousness: Seriousness::Earnest,
            voice: Voice::Warm,
            focus: Focus::See,
            density: Density::Rich,
            scope: Scope::Resonant,
        },
    },
    PresetDef {
        key: "oracle",
        name: "Oracle",
        stance: Stance {
            complexity: Complexity::Master,
            seriousness: Seriousness::Grave,
            voice: Voice::Direct,
            focus: Focus::Build,
            density: Density::Luminous,
            scope: Scope::Resonant,
        },
    },
];

pub fn delivery_preset(key: &str) -> Option<Stance> {
    PRESETS.iter().find(|p| p.key == key).map(|p| p.stance)
}

/// Display label: "{Complexity} • {Preset}" when the tone dimensions match
/// a preset, "{Complexity} • Custom" otherwise.
pub fn stance_label(stance: &Stance) -> String {
    let preset = PRESETS.iter().find(|p| {
        p.stance.complexity == stance.complexity
            && p.stance.voice == stance.voice
            && p.stance.focus == stance.focus
            && p.stance.density == stance.density
            && p.stance.scope == stance.scope
    });
    match preset {
        Some(p) => format!("{} • {}", stance.complexity.label(), p.name),
        None => format!("{} • Custom", stance.complexity.label()),
    }
}

/// Compile the stance into its prompt fragment.
pub fn build_stance_prompt(stance: &Stance) -> String {
    format!(
        "\nGLOBAL VOICE RULE: NEVER use terms of endearment like \"sweetheart\", \"honey\", \"dear\", \"sweetie\", \"love\", \"darling\", \"my friend\". Show warmth through TONE and CARE, not pet names. These feel creepy from AI.\n\nCOMPLEXITY (Language Register):\n{}\n\nSTANCE MODIFIERS:\nThese affect tone, emphasis, framing, and language — they do not change archetypal interpretation, correction logic, or conclusions.\n\nVOICE: {}\n\nFOCUS: {}\n\nDENSITY: {}\n\nSCOPE: {}\n\nSERIOUSNESS: {}\n",
        stance.complexity.modifier(),
        stance.voice.modifier(),
        stance.focus.modifier(),
        stance.density.modifier(),
        stance.scope.modifier(),
        stance.seriousness.modifier(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stance_is_kind() {
        assert_eq!(Stance::default(), delivery_preset("kind").unwrap());
    }

    #[test]
    fn test_all_preset_keys_resolve() {
        for key in PRESET_KEYS {
            assert!(delivery_preset(key).is_some(), "missing preset {}", key);
        }
        assert!(delivery_preset("stoic").is_none());
    }

    #[test]
    fn test_stance_label_names_presets() {
        assert_eq!(stance_label(&delivery_preset("oracle").unwrap()), "Master • Oracle");
        let mut custom = delivery_preset("kind").unwrap();
        custom.scope = Scope::Here;
        assert_eq!(stance_label(&custom), "Guide • Custom");
    }

    #[test]
    fn test_missing_complexity_and_seriousness_default() {
        let json = r#"{"voice":"warm","focus":"feel","density":"clear","scope":"connected"}"#;
        let s: Stance = serde_json::from_str(json).unwrap();
        assert_eq!(s.complexity, Complexity::Teacher);
        assert_eq!(s.seriousness, Seriousness::Balanced);
    }

    #[test]
    fn test_prompt_contains_all_dimensions() {
        let prompt = build_stance_prompt(&delivery_preset("oracle").unwrap());
        assert!(prompt.contains("COMPLEXITY (Language Register):"));
        assert!(prompt.contains("You are the oracle."));
        assert!(prompt.contains("SERIOUSNESS: Full weight."));
    }
}

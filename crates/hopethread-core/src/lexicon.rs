//! Static keyword tables driving emotion analysis.
//!
//! Declaration order is significant: the analyzer walks emotions and
//! context categories in the order listed here, and ties in score or count
//! resolve to whichever entry comes first.

use hopethread_schema::{PostContext, SupportType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDefinition {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub weight: f64,
    pub support_type: SupportType,
}

impl EmotionDefinition {
    /// True if any keyword occurs in `text` (already lowercased).
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextIndicators {
    pub context: PostContext,
    pub phrases: &'static [&'static str],
}

/// Immutable rule table shared by every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionLexicon {
    definitions: &'static [EmotionDefinition],
    crisis_keywords: &'static [&'static str],
    progress_keywords: &'static [&'static str],
    context_indicators: &'static [ContextIndicators],
    vulnerability_words: &'static [&'static str],
}

impl EmotionLexicon {
    pub const fn new(
        definitions: &'static [EmotionDefinition],
        crisis_keywords: &'static [&'static str],
        progress_keywords: &'static [&'static str],
        context_indicators: &'static [ContextIndicators],
        vulnerability_words: &'static [&'static str],
    ) -> Self {
        Self {
            definitions,
            crisis_keywords,
            progress_keywords,
            context_indicators,
            vulnerability_words,
        }
    }

    /// The reference data set.
    pub fn standard() -> &'static EmotionLexicon {
        &STANDARD_LEXICON
    }

    pub fn definition_for(&self, name: &str) -> Option<&EmotionDefinition> {
        self.definitions.iter().find(|def| def.name == name)
    }

    pub fn all_definitions(&self) -> &[EmotionDefinition] {
        self.definitions
    }

    pub fn crisis_keywords(&self) -> &[&'static str] {
        self.crisis_keywords
    }

    pub fn progress_keywords(&self) -> &[&'static str] {
        self.progress_keywords
    }

    /// Context categories with their trigger phrases, in tie-break order.
    pub fn context_indicators(&self) -> &[ContextIndicators] {
        self.context_indicators
    }

    pub fn context_indicators_for(&self, context: PostContext) -> &[&'static str] {
        self.context_indicators
            .iter()
            .find(|entry| entry.context == context)
            .map(|entry| entry.phrases)
            .unwrap_or(&[])
    }

    pub fn vulnerability_words(&self) -> &[&'static str] {
        self.vulnerability_words
    }
}

const fn emotion(
    name: &'static str,
    keywords: &'static [&'static str],
    weight: f64,
    support_type: SupportType,
) -> EmotionDefinition {
    EmotionDefinition {
        name,
        keywords,
        weight,
        support_type,
    }
}

static EMOTIONS: [EmotionDefinition; 15] = [
    // Core emotional states
    emotion(
        "joy",
        &[
            "happy", "excited", "thrilled", "elated", "cheerful", "delighted", "amazing",
            "wonderful", "fantastic", "brilliant",
        ],
        1.0,
        SupportType::Solidarity,
    ),
    emotion(
        "hope",
        &[
            "hope", "optimistic", "confident", "positive", "encouraged", "uplifting", "bright",
            "promising", "looking forward", "better tomorrow",
        ],
        1.0,
        SupportType::Energy,
    ),
    emotion(
        "gratitude",
        &[
            "grateful", "thankful", "blessed", "appreciate", "thanks", "lucky", "fortunate",
            "gift",
        ],
        0.9,
        SupportType::Solidarity,
    ),
    emotion(
        "relief",
        &[
            "relief", "better", "calm", "peaceful", "relaxed", "easier", "lighter", "breathe",
        ],
        0.8,
        SupportType::Comfort,
    ),
    emotion(
        "sadness",
        &[
            "sad", "down", "blue", "depressed", "melancholy", "grief", "crying", "tears",
            "heartbroken", "sorrow",
        ],
        1.0,
        SupportType::Comfort,
    ),
    emotion(
        "anxiety",
        &[
            "anxious", "worried", "nervous", "stressed", "panic", "fear", "terrified", "scared",
            "trembling", "racing heart",
        ],
        1.2,
        SupportType::Comfort,
    ),
    emotion(
        "loneliness",
        &[
            "lonely", "alone", "isolated", "disconnected", "empty", "nobody", "abandoned",
            "forgotten",
        ],
        1.3,
        SupportType::Solidarity,
    ),
    emotion(
        "frustration",
        &[
            "frustrated", "angry", "annoyed", "irritated", "upset", "mad", "furious", "rage",
        ],
        1.0,
        SupportType::Clarity,
    ),
    emotion(
        "overwhelm",
        &[
            "overwhelmed", "too much", "crushing", "drowning", "exhausted", "burned out",
            "can't cope",
        ],
        1.2,
        SupportType::Comfort,
    ),
    emotion(
        "confusion",
        &[
            "confused", "lost", "unclear", "uncertain", "puzzled", "don't understand",
            "mixed up",
        ],
        0.9,
        SupportType::Clarity,
    ),
    emotion(
        "shame",
        &[
            "ashamed", "embarrassed", "guilty", "worthless", "failure", "stupid", "pathetic",
        ],
        1.1,
        SupportType::Comfort,
    ),
    // Shares several keywords with frustration; both score independently.
    emotion(
        "anger",
        &["angry", "furious", "rage", "mad", "pissed", "livid", "outraged"],
        1.0,
        SupportType::Clarity,
    ),
    emotion(
        "curiosity",
        &["curious", "wondering", "interested", "intrigued", "fascinated"],
        0.7,
        SupportType::Clarity,
    ),
    emotion(
        "acceptance",
        &[
            "accept", "peace", "okay", "fine", "settled", "at peace", "coming to terms",
        ],
        0.8,
        SupportType::Solidarity,
    ),
    emotion(
        "determination",
        &[
            "determined", "strong", "persevere", "fight", "overcome", "resilient",
            "won't give up",
        ],
        0.9,
        SupportType::Energy,
    ),
];

static CRISIS_KEYWORDS: [&str; 14] = [
    "kill myself",
    "end it all",
    "suicide",
    "don't want to live",
    "better off dead",
    "hurt myself",
    "self harm",
    "cutting",
    "overdose",
    "jump off",
    "no point",
    "give up",
    "can't go on",
    "end the pain",
];

static PROGRESS_KEYWORDS: [&str; 14] = [
    "getting better",
    "improving",
    "progress",
    "breakthrough",
    "healing",
    "stronger",
    "growing",
    "learning",
    "overcoming",
    "recovery",
    "milestone",
    "achievement",
    "proud",
    "accomplished",
];

static CONTEXT_INDICATORS: [ContextIndicators; 4] = [
    ContextIndicators {
        context: PostContext::Sharing,
        phrases: &[
            "want to share",
            "happened to me",
            "my story",
            "experience",
            "went through",
        ],
    },
    ContextIndicators {
        context: PostContext::Seeking,
        phrases: &[
            "need help",
            "advice",
            "what should",
            "how do",
            "anyone else",
            "suggestions",
        ],
    },
    ContextIndicators {
        context: PostContext::Reflecting,
        phrases: &[
            "thinking about",
            "realized",
            "looking back",
            "understand",
            "learning",
        ],
    },
    ContextIndicators {
        context: PostContext::Celebrating,
        phrases: &[
            "proud",
            "achieved",
            "accomplished",
            "milestone",
            "success",
            "breakthrough",
        ],
    },
];

static VULNERABILITY_WORDS: [&str; 20] = [
    "help",
    "struggling",
    "alone",
    "scared",
    "lost",
    "overwhelmed",
    "don't know",
    "confused",
    "worried",
    "anxious",
    "depressed",
    "lonely",
    "isolated",
    "empty",
    "hopeless",
    "stuck",
    "broken",
    "can't handle",
    "falling apart",
    "desperate",
];

static STANDARD_LEXICON: EmotionLexicon = EmotionLexicon::new(
    &EMOTIONS,
    &CRISIS_KEYWORDS,
    &PROGRESS_KEYWORDS,
    &CONTEXT_INDICATORS,
    &VULNERABILITY_WORDS,
);

use hopethread_schema::{
    EmotionAnalysis, EmotionScores, PostContext, SupportType, NEUTRAL_EMOTION,
};

use crate::lexicon::{EmotionDefinition, EmotionLexicon};

/// Base contribution of one matched keyword, scaled by the emotion's weight.
const KEYWORD_BASE: f64 = 0.15;
const INTENSIFIER_BOOST: f64 = 0.3;
const PERSONAL_BOOST: f64 = 0.2;
const MAX_SECONDARY: usize = 3;
const SECONDARY_THRESHOLD: f64 = 0.3;
const COMPLEXITY_SCALE: f64 = 10.0;
pub(crate) const DEFAULT_INTENSITY: f64 = 0.3;

const EMPATHY_BASE: f64 = 0.2;
const VULNERABILITY_STEP: f64 = 0.08;
const QUESTION_STEP: f64 = 0.1;
const PRONOUN_STEP: f64 = 0.05;
pub const MAX_EMPATHY: f64 = 0.95;

const INTENSIFIERS: [&str; 3] = ["very", "extremely", "really"];
/// Sentence-level markers; note the leading space on " i ".
const SENTENCE_PRONOUNS: [&str; 3] = [" i ", "my ", "me "];
/// Text-level markers used for empathy.
const EMPATHY_PRONOUNS: [&str; 4] = ["i ", "my ", "me ", "myself"];

/// Rule-based emotion scorer.
///
/// Pure over its input: the lexicon is immutable and no state is kept
/// between calls, so one analyzer can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct EmotionAnalyzer<'a> {
    lexicon: &'a EmotionLexicon,
}

impl Default for EmotionAnalyzer<'static> {
    fn default() -> Self {
        Self::new(EmotionLexicon::standard())
    }
}

impl<'a> EmotionAnalyzer<'a> {
    pub fn new(lexicon: &'a EmotionLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &'a EmotionLexicon {
        self.lexicon
    }

    /// Analyze `text`. Total: any input, including empty, yields a result.
    pub fn analyze(&self, text: &str) -> EmotionAnalysis {
        let text = text.to_lowercase();
        let sentences: Vec<&str> = text.split(is_sentence_break).collect();

        let mut scored: Vec<(&'static str, f64)> = Vec::new();
        let mut detected_support: Vec<SupportType> = Vec::new();
        for definition in self.lexicon.all_definitions() {
            let score = score_emotion(definition, &text, &sentences);
            if score > 0.0 {
                scored.push((definition.name, score));
                detected_support.push(definition.support_type);
            }
        }

        // Stable: equal scores keep lexicon order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let primary_emotion = scored
            .first()
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| NEUTRAL_EMOTION.to_string());
        let secondary_emotions = scored
            .iter()
            .skip(1)
            .take(MAX_SECONDARY)
            .filter(|(_, score)| *score > SECONDARY_THRESHOLD)
            .map(|(name, _)| name.to_string())
            .collect();

        let crisis_indicators = matched_phrases(self.lexicon.crisis_keywords(), &text);
        let progress_indicators = matched_phrases(self.lexicon.progress_keywords(), &text);

        let empathy_potential_score = if crisis_indicators.is_empty() {
            empathy_score(self.lexicon, &text)
        } else {
            MAX_EMPATHY
        };

        let intensity = scored
            .first()
            .map(|(_, score)| *score)
            .unwrap_or(DEFAULT_INTENSITY);
        let emotional_complexity = scored.len() as f64 / COMPLEXITY_SCALE;

        let analysis = EmotionAnalysis {
            scores: scored
                .iter()
                .map(|(name, score)| (name.to_string(), *score))
                .collect::<EmotionScores>(),
            primary_emotion,
            secondary_emotions,
            support_type: dominant_support_type(&detected_support),
            crisis_indicators,
            progress_indicators,
            context: self.classify_context(&text),
            emotional_complexity,
            empathy_potential_score,
            intensity,
        };

        tracing::debug!(
            primary = %analysis.primary_emotion,
            intensity = analysis.intensity,
            empathy = analysis.empathy_potential_score,
            context = %analysis.context,
            "analyzed text"
        );
        if analysis.has_crisis() {
            tracing::warn!(
                indicators = ?analysis.crisis_indicators,
                "crisis language detected"
            );
        }

        analysis
    }

    /// Category with the most matched indicator phrases. Only a strictly
    /// greater count replaces the current best, so earlier categories win ties.
    fn classify_context(&self, text: &str) -> PostContext {
        let mut best = PostContext::default();
        let mut best_count = 0;
        for entry in self.lexicon.context_indicators() {
            let count = entry
                .phrases
                .iter()
                .filter(|phrase| text.contains(*phrase))
                .count();
            if count > best_count {
                best_count = count;
                best = entry.context;
            }
        }
        best
    }
}

fn is_sentence_break(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn score_emotion(definition: &EmotionDefinition, text: &str, sentences: &[&str]) -> f64 {
    let step = KEYWORD_BASE * definition.weight;
    let base = definition
        .keywords
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .fold(0.0, |acc, _| acc + step);
    if base == 0.0 {
        return 0.0;
    }

    // Accumulates across every sentence that mentions the emotion.
    let mut multiplier = 1.0;
    for sentence in sentences.iter().filter(|s| definition.matches(s)) {
        if INTENSIFIERS.iter().any(|word| sentence.contains(word)) {
            multiplier += INTENSIFIER_BOOST;
        }
        if SENTENCE_PRONOUNS.iter().any(|marker| sentence.contains(marker)) {
            multiplier += PERSONAL_BOOST;
        }
    }

    (base * multiplier).min(1.0)
}

/// Most frequent support type; ties go to the type tallied first.
fn dominant_support_type(detected: &[SupportType]) -> SupportType {
    let mut tally: Vec<(SupportType, usize)> = Vec::new();
    for support in detected {
        match tally.iter().position(|(seen, _)| seen == support) {
            Some(index) => tally[index].1 += 1,
            None => tally.push((*support, 1)),
        }
    }

    let mut best: Option<(SupportType, usize)> = None;
    for (support, count) in tally {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((support, count)),
        }
    }
    best.map(|(support, _)| support).unwrap_or_default()
}

fn matched_phrases(phrases: &[&str], text: &str) -> Vec<String> {
    phrases
        .iter()
        .filter(|phrase| text.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

/// Empathy potential before any crisis override, capped at [`MAX_EMPATHY`].
pub(crate) fn empathy_score(lexicon: &EmotionLexicon, text: &str) -> f64 {
    let mut score = EMPATHY_BASE;
    for word in lexicon.vulnerability_words() {
        if text.contains(word) {
            score += VULNERABILITY_STEP;
        }
    }

    let questions = text.matches('?').count();
    score += questions as f64 * QUESTION_STEP;

    let pronouns = EMPATHY_PRONOUNS
        .iter()
        .filter(|marker| text.contains(*marker))
        .count();
    score += pronouns as f64 * PRONOUN_STEP;

    score.min(MAX_EMPATHY)
}

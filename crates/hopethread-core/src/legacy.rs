//! Flat keyword scorer with the older four-field output.
//!
//! Every matched keyword adds a fixed 0.2 regardless of emotion weight,
//! and there is no sentence context, support type, context or crisis
//! handling. Only reachable through [`crate::AnalyzerMode::Legacy`].

use hopethread_schema::{EmotionScores, LegacyEmotionAnalysis, NEUTRAL_EMOTION};

use crate::analyzer::{empathy_score, DEFAULT_INTENSITY};
use crate::lexicon::EmotionLexicon;

const FLAT_KEYWORD_SCORE: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct LegacyEmotionAnalyzer<'a> {
    lexicon: &'a EmotionLexicon,
}

impl Default for LegacyEmotionAnalyzer<'static> {
    fn default() -> Self {
        Self::new(EmotionLexicon::standard())
    }
}

impl<'a> LegacyEmotionAnalyzer<'a> {
    pub fn new(lexicon: &'a EmotionLexicon) -> Self {
        Self { lexicon }
    }

    pub fn analyze(&self, text: &str) -> LegacyEmotionAnalysis {
        let text = text.to_lowercase();

        let mut scored: Vec<(&'static str, f64)> = Vec::new();
        for definition in self.lexicon.all_definitions() {
            let hits = definition
                .keywords
                .iter()
                .filter(|keyword| text.contains(*keyword))
                .count();
            if hits > 0 {
                let score = (hits as f64 * FLAT_KEYWORD_SCORE).min(1.0);
                scored.push((definition.name, score));
            }
        }
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        LegacyEmotionAnalysis {
            primary_emotion: scored
                .first()
                .map(|(name, _)| name.to_string())
                .unwrap_or_else(|| NEUTRAL_EMOTION.to_string()),
            intensity: scored
                .first()
                .map(|(_, score)| *score)
                .unwrap_or(DEFAULT_INTENSITY),
            empathy_potential_score: empathy_score(self.lexicon, &text),
            emotions: scored
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect::<EmotionScores>(),
        }
    }
}

//! In-process record of per-user emotional patterns.
//!
//! Patterns are kept in insertion order. Nothing is persisted here; a
//! storage backend can replay records through [`PatternJournal::insert`].

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use hopethread_schema::{
    EmotionAnalysis, EmotionScores, EmotionalPattern, EmotionalTrends, NEUTRAL_EMOTION,
};
use serde::Serialize;
use uuid::Uuid;

const DISTRESS_EMOTIONS: [&str; 8] = [
    "sadness",
    "anxiety",
    "loneliness",
    "frustration",
    "overwhelm",
    "confusion",
    "shame",
    "anger",
];
const DOMINANT_LIMIT: usize = 2;
const STREAK_LEN: usize = 3;
const HIGH_INTENSITY: f64 = 0.8;
const EMPTY_PROGRESS: f64 = 0.5;

fn is_distress(emotion: &str) -> bool {
    DISTRESS_EMOTIONS.contains(&emotion)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarState {
    pub pattern: EmotionalPattern,
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct PatternJournal {
    patterns: Arc<RwLock<Vec<EmotionalPattern>>>,
    window_days: u32,
}

impl Default for PatternJournal {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PatternJournal {
    pub fn new(window_days: u32) -> Self {
        Self {
            patterns: Arc::new(RwLock::new(Vec::new())),
            window_days,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<EmotionalPattern>> {
        self.patterns.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<EmotionalPattern>> {
        self.patterns.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn record(&self, user_id: &str, analysis: &EmotionAnalysis) -> EmotionalPattern {
        self.record_at(user_id, analysis, Utc::now())
    }

    pub fn record_at(
        &self,
        user_id: &str,
        analysis: &EmotionAnalysis,
        at: DateTime<Utc>,
    ) -> EmotionalPattern {
        let pattern = EmotionalPattern {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            recorded_at: at,
            scores: analysis.scores.clone(),
            primary_emotion: analysis.primary_emotion.clone(),
            intensity: analysis.intensity,
            context: analysis.context,
        };
        self.insert(pattern.clone());
        tracing::info!(
            user_id,
            primary = %pattern.primary_emotion,
            context = %pattern.context,
            "recorded emotional pattern"
        );
        pattern
    }

    pub fn insert(&self, pattern: EmotionalPattern) {
        self.write().push(pattern);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Patterns for `user_id` from the last `days` days, oldest first.
    pub fn history(&self, user_id: &str, days: u32) -> Vec<EmotionalPattern> {
        let since = Utc::now()
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.history_since(user_id, since)
    }

    pub fn history_since(&self, user_id: &str, since: DateTime<Utc>) -> Vec<EmotionalPattern> {
        let mut history: Vec<EmotionalPattern> = self
            .read()
            .iter()
            .filter(|p| p.user_id == user_id && p.recorded_at >= since)
            .cloned()
            .collect();
        history.sort_by_key(|p| p.recorded_at);
        history
    }

    pub fn trends(&self, user_id: &str) -> EmotionalTrends {
        summarize(&self.history(user_id, self.window_days))
    }

    /// Recorded patterns closest to `analysis` by cosine similarity of their
    /// score maps. Patterns sharing no emotion are left out.
    pub fn find_similar(&self, analysis: &EmotionAnalysis, limit: usize) -> Vec<SimilarState> {
        let mut matches: Vec<SimilarState> = self
            .read()
            .iter()
            .filter_map(|pattern| {
                let similarity = cosine_similarity(&analysis.scores, &pattern.scores);
                (similarity > 0.0).then(|| SimilarState {
                    pattern: pattern.clone(),
                    similarity,
                })
            })
            .collect();
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches.truncate(limit);
        matches
    }
}

/// Trend summary over a user's chronological history.
pub fn summarize(history: &[EmotionalPattern]) -> EmotionalTrends {
    EmotionalTrends {
        dominant_emotions: dominant_emotions(history),
        improved_emotions: improved_emotions(history),
        concerning_patterns: concerning_patterns(history),
        progress_score: progress_score(history),
    }
}

fn dominant_emotions(history: &[EmotionalPattern]) -> Vec<String> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for pattern in history {
        let primary = pattern.primary_emotion.as_str();
        if primary == NEUTRAL_EMOTION {
            continue;
        }
        match tally.iter().position(|(name, _)| *name == primary) {
            Some(index) => tally[index].1 += 1,
            None => tally.push((primary, 1)),
        }
    }
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .take(DOMINANT_LIMIT)
        .map(|(name, _)| name.to_string())
        .collect()
}

fn mean_score(patterns: &[EmotionalPattern], emotion: &str) -> f64 {
    let total: f64 = patterns
        .iter()
        .map(|p| p.scores.get(emotion).copied().unwrap_or(0.0))
        .sum();
    total / patterns.len() as f64
}

fn improved_emotions(history: &[EmotionalPattern]) -> Vec<String> {
    if history.len() < 2 {
        return Vec::new();
    }
    let (earlier, later) = history.split_at(history.len() / 2);
    let seen: BTreeSet<&str> = earlier
        .iter()
        .flat_map(|p| p.scores.keys().map(String::as_str))
        .filter(|name| is_distress(name))
        .collect();
    seen.into_iter()
        .filter(|name| mean_score(later, name) < mean_score(earlier, name))
        .map(str::to_string)
        .collect()
}

fn concerning_patterns(history: &[EmotionalPattern]) -> Vec<String> {
    let mut concerns = Vec::new();
    if history.len() < STREAK_LEN {
        return concerns;
    }
    let latest = &history[history.len() - STREAK_LEN..];

    if latest.iter().all(|p| p.intensity >= HIGH_INTENSITY) {
        concerns.push("sustained_high_intensity".to_string());
    }

    let first = latest[0].primary_emotion.as_str();
    if is_distress(first) && latest.iter().all(|p| p.primary_emotion == first) {
        concerns.push(format!("recurring_{first}"));
    }
    concerns
}

fn progress_score(history: &[EmotionalPattern]) -> f64 {
    if history.is_empty() {
        return EMPTY_PROGRESS;
    }
    let steady = history
        .iter()
        .filter(|p| !is_distress(&p.primary_emotion))
        .count();
    steady as f64 / history.len() as f64
}

fn cosine_similarity(a: &EmotionScores, b: &EmotionScores) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(name, score)| b.get(name).map(|other| score * other))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::EmotionAnalyzer;

    fn analysis(text: &str) -> EmotionAnalysis {
        EmotionAnalyzer::default().analyze(text)
    }

    #[test]
    fn history_is_scoped_to_user_and_window() {
        let journal = PatternJournal::default();
        let now = Utc::now();
        journal.record_at("u1", &analysis("so sad"), now - Duration::days(40));
        journal.record_at("u1", &analysis("so happy"), now - Duration::days(2));
        journal.record_at("u2", &analysis("so anxious"), now - Duration::days(1));
        journal.record("u1", &analysis("feeling calm"));

        let history = journal.history("u1", 30);
        let primaries: Vec<_> = history.iter().map(|p| p.primary_emotion.as_str()).collect();
        assert_eq!(primaries, vec!["joy", "relief"]);
        assert_eq!(journal.history("u1", 60).len(), 3);
        assert_eq!(journal.len(), 4);
    }

    #[test]
    fn oversized_window_reaches_back_to_the_start() {
        let journal = PatternJournal::new(u32::MAX);
        journal.record_at("u1", &analysis("so sad"), Utc::now() - Duration::days(5000));
        journal.record("u1", &analysis("so happy"));

        assert_eq!(journal.history("u1", u32::MAX).len(), 2);
        let trends = journal.trends("u1");
        assert_eq!(trends.dominant_emotions, vec!["sadness", "joy"]);
    }

    #[test]
    fn trends_of_empty_history() {
        let trends = PatternJournal::default().trends("nobody");
        assert!(trends.dominant_emotions.is_empty());
        assert!(trends.improved_emotions.is_empty());
        assert!(trends.concerning_patterns.is_empty());
        assert_eq!(trends.progress_score, 0.5);
    }

    #[test]
    fn trends_track_improvement_and_dominance() {
        let journal = PatternJournal::default();
        let now = Utc::now();
        let texts = [
            "I am so anxious and worried",
            "anxious again",
            "feeling hopeful",
            "hopeful and happy",
        ];
        for (offset, text) in texts.iter().enumerate() {
            journal.record_at("u1", &analysis(text), now - Duration::hours(10 - offset as i64));
        }

        let trends = journal.trends("u1");
        assert_eq!(trends.dominant_emotions, vec!["anxiety", "hope"]);
        assert_eq!(trends.improved_emotions, vec!["anxiety"]);
        assert!(trends.concerning_patterns.is_empty());
        assert_eq!(trends.progress_score, 0.5);
    }

    #[test]
    fn recurring_distress_is_flagged() {
        let journal = PatternJournal::default();
        let now = Utc::now();
        for hours in [3, 2, 1] {
            journal.record_at(
                "u1",
                &analysis("I am really lonely and alone, so isolated and empty"),
                now - Duration::hours(hours),
            );
        }

        let trends = journal.trends("u1");
        assert!(trends
            .concerning_patterns
            .contains(&"recurring_loneliness".to_string()));
        assert!(trends
            .concerning_patterns
            .contains(&"sustained_high_intensity".to_string()));
        assert_eq!(trends.progress_score, 0.0);
    }

    #[test]
    fn find_similar_ranks_by_overlap() {
        let journal = PatternJournal::default();
        journal.record("u1", &analysis("so anxious"));
        journal.record("u2", &analysis("anxious and lonely"));
        journal.record("u3", &analysis("so happy"));
        journal.record("u4", &analysis(""));

        let similar = journal.find_similar(&analysis("nervous"), 10);
        let users: Vec<_> = similar.iter().map(|s| s.pattern.user_id.as_str()).collect();
        assert_eq!(users, vec!["u1", "u2"]);
        assert!((similar[0].similarity - 1.0).abs() < 1e-9);

        assert_eq!(journal.find_similar(&analysis("nervous"), 1).len(), 1);
    }

    #[test]
    fn journal_clones_share_storage() {
        let journal = PatternJournal::default();
        let handle = journal.clone();
        handle.record("u1", &analysis("grateful"));
        assert!(!journal.is_empty());
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary emotion reported when no emotion scored.
pub const NEUTRAL_EMOTION: &str = "neutral";

/// Emotion name -> score in `[0.0, 1.0]`. Only positively scored emotions are present.
pub type EmotionScores = BTreeMap<String, f64>;

/// Kind of peer response a post's emotional content calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    #[default]
    Comfort,
    Energy,
    Clarity,
    Solidarity,
}

impl SupportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comfort => "comfort",
            Self::Energy => "energy",
            Self::Clarity => "clarity",
            Self::Solidarity => "solidarity",
        }
    }
}

impl fmt::Display for SupportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown support type: {0}")]
pub struct ParseSupportTypeError(pub String);

impl FromStr for SupportType {
    type Err = ParseSupportTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comfort" => Ok(Self::Comfort),
            "energy" => Ok(Self::Energy),
            "clarity" => Ok(Self::Clarity),
            "solidarity" => Ok(Self::Solidarity),
            other => Err(ParseSupportTypeError(other.to_string())),
        }
    }
}

/// Communicative intent detected for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostContext {
    #[default]
    Sharing,
    Seeking,
    Reflecting,
    Celebrating,
}

impl PostContext {
    /// Declaration order. Context ties resolve to the earliest entry.
    pub const ALL: [PostContext; 4] = [
        PostContext::Sharing,
        PostContext::Seeking,
        PostContext::Reflecting,
        PostContext::Celebrating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sharing => "sharing",
            Self::Seeking => "seeking",
            Self::Reflecting => "reflecting",
            Self::Celebrating => "celebrating",
        }
    }
}

impl fmt::Display for PostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post context: {0}")]
pub struct ParseContextError(pub String);

impl FromStr for PostContext {
    type Err = ParseContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharing" => Ok(Self::Sharing),
            "seeking" => Ok(Self::Seeking),
            "reflecting" => Ok(Self::Reflecting),
            "celebrating" => Ok(Self::Celebrating),
            other => Err(ParseContextError(other.to_string())),
        }
    }
}

/// Full emotional signal for one piece of text.
///
/// Wire names are camelCase and the score map is exposed as `emotions`,
/// which is what feed clients read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysis {
    #[serde(rename = "emotions")]
    pub scores: EmotionScores,
    pub primary_emotion: String,
    pub secondary_emotions: Vec<String>,
    pub support_type: SupportType,
    pub crisis_indicators: Vec<String>,
    pub progress_indicators: Vec<String>,
    pub context: PostContext,
    pub emotional_complexity: f64,
    pub empathy_potential_score: f64,
    pub intensity: f64,
}

impl EmotionAnalysis {
    pub fn is_neutral(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn has_crisis(&self) -> bool {
        !self.crisis_indicators.is_empty()
    }

    /// The fields a post record keeps after analysis.
    pub fn signal(&self) -> PostSignal {
        PostSignal {
            scores: self.scores.clone(),
            primary_emotion: self.primary_emotion.clone(),
            support_type: self.support_type,
            intensity: self.intensity,
            empathy_potential_score: self.empathy_potential_score,
            has_crisis: self.has_crisis(),
        }
    }
}

/// Output of the flat keyword scorer kept for older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEmotionAnalysis {
    pub emotions: EmotionScores,
    pub primary_emotion: String,
    pub empathy_potential_score: f64,
    pub intensity: f64,
}

/// Persisted subset of an analysis, read by feed ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSignal {
    #[serde(rename = "emotions")]
    pub scores: EmotionScores,
    pub primary_emotion: String,
    pub support_type: SupportType,
    pub intensity: f64,
    pub empathy_potential_score: f64,
    #[serde(default)]
    pub has_crisis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: String,
    pub author_id: String,
    #[serde(flatten)]
    pub signal: PostSignal,
}

/// One recorded analysis for a user, used for trend tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalPattern {
    pub id: Uuid,
    pub user_id: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "emotions")]
    pub scores: EmotionScores,
    pub primary_emotion: String,
    pub intensity: f64,
    pub context: PostContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalTrends {
    pub dominant_emotions: Vec<String>,
    pub improved_emotions: Vec<String>,
    pub concerning_patterns: Vec<String>,
    pub progress_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> EmotionAnalysis {
        let mut scores = EmotionScores::new();
        scores.insert("anxiety".to_string(), 0.54);
        EmotionAnalysis {
            scores,
            primary_emotion: "anxiety".to_string(),
            secondary_emotions: vec![],
            support_type: SupportType::Comfort,
            crisis_indicators: vec![],
            progress_indicators: vec![],
            context: PostContext::Seeking,
            emotional_complexity: 0.1,
            empathy_potential_score: 0.61,
            intensity: 0.54,
        }
    }

    #[test]
    fn support_type_parses_case_insensitively() {
        assert_eq!("Energy".parse::<SupportType>(), Ok(SupportType::Energy));
        assert_eq!(
            " solidarity ".parse::<SupportType>(),
            Ok(SupportType::Solidarity)
        );
        let err = "hugs".parse::<SupportType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown support type: hugs");
    }

    #[test]
    fn context_order_starts_with_sharing() {
        assert_eq!(PostContext::ALL[0], PostContext::default());
        assert_eq!(PostContext::ALL[3], PostContext::Celebrating);
        assert!("venting".parse::<PostContext>().is_err());
    }

    #[test]
    fn analysis_serializes_with_client_field_names() {
        let json = serde_json::to_value(sample_analysis()).unwrap();
        assert_eq!(json["primaryEmotion"], "anxiety");
        assert_eq!(json["supportType"], "comfort");
        assert_eq!(json["context"], "seeking");
        assert_eq!(json["emotions"]["anxiety"], 0.54);
        assert!(json.get("scores").is_none());
    }

    #[test]
    fn signal_carries_crisis_flag() {
        let mut analysis = sample_analysis();
        assert!(!analysis.signal().has_crisis);

        analysis.crisis_indicators.push("no point".to_string());
        let signal = analysis.signal();
        assert!(signal.has_crisis);
        assert_eq!(signal.primary_emotion, "anxiety");
        assert_eq!(signal.support_type, SupportType::Comfort);
    }

    #[test]
    fn post_signal_backward_compat_without_crisis_flag() {
        let old_json = r#"{
            "emotions": { "joy": 0.3 },
            "primaryEmotion": "joy",
            "supportType": "solidarity",
            "intensity": 0.3,
            "empathyPotentialScore": 0.25
        }"#;

        let signal: PostSignal = serde_json::from_str(old_json).unwrap();
        assert!(!signal.has_crisis);
        assert_eq!(signal.scores.get("joy"), Some(&0.3));
    }
}

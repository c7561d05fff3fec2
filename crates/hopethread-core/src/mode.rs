use hopethread_schema::{EmotionAnalysis, LegacyEmotionAnalysis};
use serde::{Deserialize, Serialize};

use crate::analyzer::EmotionAnalyzer;
use crate::legacy::LegacyEmotionAnalyzer;
use crate::lexicon::EmotionLexicon;

/// Which scorer handles a request. `Rich` is canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerMode {
    #[default]
    Rich,
    Legacy,
}

impl AnalyzerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rich => "rich",
            Self::Legacy => "legacy",
        }
    }
}

/// Result of a mode-selected analysis. Serializes as the inner record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Rich(EmotionAnalysis),
    Legacy(LegacyEmotionAnalysis),
}

impl Analysis {
    pub fn primary_emotion(&self) -> &str {
        match self {
            Self::Rich(analysis) => &analysis.primary_emotion,
            Self::Legacy(analysis) => &analysis.primary_emotion,
        }
    }

    pub fn empathy_potential_score(&self) -> f64 {
        match self {
            Self::Rich(analysis) => analysis.empathy_potential_score,
            Self::Legacy(analysis) => analysis.empathy_potential_score,
        }
    }

    pub fn as_rich(&self) -> Option<&EmotionAnalysis> {
        match self {
            Self::Rich(analysis) => Some(analysis),
            Self::Legacy(_) => None,
        }
    }
}

pub fn analyze_with_mode(lexicon: &EmotionLexicon, mode: AnalyzerMode, text: &str) -> Analysis {
    match mode {
        AnalyzerMode::Rich => Analysis::Rich(EmotionAnalyzer::new(lexicon).analyze(text)),
        AnalyzerMode::Legacy => Analysis::Legacy(LegacyEmotionAnalyzer::new(lexicon).analyze(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_mode_produces_full_record() {
        let analysis = analyze_with_mode(
            EmotionLexicon::standard(),
            AnalyzerMode::Rich,
            "I feel so hopeless, what should I do?",
        );
        let rich = analysis.as_rich().expect("rich mode");
        assert_eq!(rich.context.as_str(), "seeking");

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("supportType").is_some());
    }

    #[test]
    fn legacy_mode_keeps_four_fields() {
        let analysis =
            analyze_with_mode(EmotionLexicon::standard(), AnalyzerMode::Legacy, "so happy");
        assert!(analysis.as_rich().is_none());
        assert_eq!(analysis.primary_emotion(), "joy");

        let json = serde_json::to_value(&analysis).unwrap();
        let fields: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            fields.len(),
            4,
            "legacy output must not carry rich fields: {fields:?}"
        );
    }

    #[test]
    fn mode_parses_from_yaml() {
        let mode: AnalyzerMode = serde_yaml::from_str("legacy").unwrap();
        assert_eq!(mode, AnalyzerMode::Legacy);
        assert_eq!(AnalyzerMode::default().as_str(), "rich");
    }
}

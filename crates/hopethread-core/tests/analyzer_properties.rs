use std::sync::Arc;
use std::thread;

use hopethread_core::{EmotionAnalyzer, EmotionLexicon};

const CORPUS: &[&str] = &[
    "",
    "   ",
    "I am feeling very anxious and worried about everything, I don't know what to do",
    "I want to kill myself, there's no point anymore",
    "I'm so proud and accomplished, I finally overcame this milestone!",
    "i am so angry right now",
    "Today was okay. Not great, not terrible. Just fine I guess?",
    "My mom passed away last month and I keep crying. Does anyone else feel this empty?",
    "Really really really happy!!! Best day ever. I got the job and I'm thrilled, grateful, blessed.",
    "Confused and lost... what should I do? Need help, any advice or suggestions?",
    "Looking back I realized I understand myself better now, learning to accept things.",
    "Burned out, exhausted, drowning in work. Too much. I can't cope, I'm overwhelmed.",
    "Ünïcödé tëxt wïth ñö kéywörds — 日本語のテキスト 😊",
    "?????",
    "self harm. cutting. overdose. end the pain. give up. can't go on.",
];

#[test]
fn scores_stay_within_documented_ranges() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS {
        let analysis = analyzer.analyze(text);

        // A lone low-weight keyword scores below the 0.3 neutral baseline.
        assert!(
            analysis.intensity > 0.0 && analysis.intensity <= 1.0,
            "intensity {} for {text:?}",
            analysis.intensity
        );
        if analysis.is_neutral() {
            assert_eq!(analysis.intensity, 0.3);
        }
        assert!(
            (0.2..=0.95).contains(&analysis.empathy_potential_score),
            "empathy {} for {text:?}",
            analysis.empathy_potential_score
        );
        for (name, score) in &analysis.scores {
            assert!(*score > 0.0 && *score <= 1.0, "{name}={score} for {text:?}");
        }
    }
}

#[test]
fn crisis_indicators_force_max_empathy() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS {
        let analysis = analyzer.analyze(text);
        if !analysis.crisis_indicators.is_empty() {
            assert_eq!(analysis.empathy_potential_score, 0.95, "{text:?}");
        }
    }
    let analysis = analyzer.analyze("self harm. cutting. overdose. end the pain. give up. can't go on.");
    assert_eq!(analysis.crisis_indicators.len(), 6);
}

#[test]
fn neutral_iff_no_scores() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS {
        let analysis = analyzer.analyze(text);
        assert_eq!(
            analysis.primary_emotion == "neutral",
            analysis.is_neutral(),
            "{text:?}"
        );
    }
}

#[test]
fn secondary_emotions_are_bounded() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS {
        let analysis = analyzer.analyze(text);
        assert!(analysis.secondary_emotions.len() <= 3);
        assert!(!analysis.secondary_emotions.contains(&analysis.primary_emotion));
        for name in &analysis.secondary_emotions {
            assert!(analysis.scores[name] > 0.3, "{name} in {text:?}");
        }
    }
}

#[test]
fn complexity_is_scored_count_over_ten() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS {
        let analysis = analyzer.analyze(text);
        assert_eq!(
            analysis.emotional_complexity,
            analysis.scores.len() as f64 / 10.0
        );
    }
}

#[test]
fn complexity_is_not_clamped() {
    let text = "happy hope grateful calm sad anxious lonely frustrated overwhelmed confused \
                ashamed pissed curious settled determined";
    let analysis = EmotionAnalyzer::default().analyze(text);
    assert_eq!(analysis.scores.len(), 15);
    assert_eq!(analysis.emotional_complexity, 1.5);
}

#[test]
fn uppercase_input_gives_identical_result() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS.iter().filter(|t| t.is_ascii()) {
        assert_eq!(
            analyzer.analyze(text),
            analyzer.analyze(&text.to_uppercase()),
            "{text:?}"
        );
    }
}

#[test]
fn repeated_analysis_is_byte_identical() {
    let analyzer = EmotionAnalyzer::default();
    for text in CORPUS {
        let first = serde_json::to_string(&analyzer.analyze(text)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(text)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn long_input_completes() {
    let text = "I feel so alone. ".repeat(20_000);
    let analysis = EmotionAnalyzer::default().analyze(&text);
    assert_eq!(analysis.primary_emotion, "loneliness");
    assert_eq!(analysis.intensity, 1.0);
}

#[test]
fn analyzer_is_shared_across_threads() {
    let analyzer = Arc::new(EmotionAnalyzer::new(EmotionLexicon::standard()));
    let expected = analyzer.analyze(CORPUS[2]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.analyze(CORPUS[2]))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

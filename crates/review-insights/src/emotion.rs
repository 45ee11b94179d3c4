/// Emotion analysis for product reviews.
use chrono::{DateTime, Utc};
use shop_common::classifier::{
    distribution, dominant, Band, Classification, Classifier, KeywordClassifier, KeywordRule,
    Label,
};
use shop_common::review::Review;
use shop_common::shop_api::{EmotionAnalysis, EmotionSummary, ReviewAnalysis};

use crate::summary::label_shares;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Happy,
    Satisfied,
    Neutral,
    Disappointed,
    Angry,
}

impl Label for Emotion {
    const ALL: &'static [Self] = &[
        Emotion::Happy,
        Emotion::Satisfied,
        Emotion::Neutral,
        Emotion::Disappointed,
        Emotion::Angry,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Satisfied => "satisfied",
            Emotion::Neutral => "neutral",
            Emotion::Disappointed => "disappointed",
            Emotion::Angry => "angry",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Satisfied => "😌",
            Emotion::Neutral => "😐",
            Emotion::Disappointed => "😔",
            Emotion::Angry => "😠",
        }
    }
}

/// Keyword rules for review text, strongest positive first.
pub fn keyword_classifier() -> KeywordClassifier<Emotion> {
    KeywordClassifier::new(
        vec![
            KeywordRule {
                label: Emotion::Happy,
                keywords: &["amazing", "excellent", "love", "perfect", "great"],
                band: Band::new(0.8, 1.0),
            },
            KeywordRule {
                label: Emotion::Satisfied,
                keywords: &["good", "nice", "satisfied", "pleased"],
                band: Band::new(0.6, 0.8),
            },
            KeywordRule {
                label: Emotion::Neutral,
                keywords: &["okay", "fine", "average", "decent"],
                band: Band::new(0.4, 0.6),
            },
            KeywordRule {
                label: Emotion::Disappointed,
                keywords: &["disappointed", "expected more", "not great"],
                band: Band::new(0.2, 0.4),
            },
            KeywordRule {
                label: Emotion::Angry,
                keywords: &["terrible", "awful", "hate", "worst"],
                band: Band::new(0.0, 0.2),
            },
        ],
        Emotion::Neutral,
        Band::new(0.4, 0.6),
    )
}

pub struct ReviewAnalyzer {
    classifier: Box<dyn Classifier<Label = Emotion>>,
}

impl ReviewAnalyzer {
    pub fn new(classifier: Box<dyn Classifier<Label = Emotion>>) -> Self {
        Self { classifier }
    }

    pub fn analyze(&self, text: &str, now: DateTime<Utc>) -> EmotionAnalysis {
        describe(self.classifier.classify(text), now)
    }

    /// Classify every review once and summarize the emotion mix.
    ///
    /// The distribution always lists every emotion; with no reviews all counts are
    /// zero and there is no dominant emotion.
    pub fn analyze_reviews(
        &self,
        reviews: &[Review],
        now: DateTime<Utc>,
    ) -> (Vec<ReviewAnalysis>, EmotionSummary) {
        let results: Vec<Classification<Emotion>> = reviews
            .iter()
            .map(|r| self.classifier.classify(&r.comment))
            .collect();

        let shares = distribution(Emotion::ALL, results.iter().map(|c| c.label));
        let summary = EmotionSummary {
            total_reviews: reviews.len(),
            emotion_distribution: label_shares(&shares, Emotion::as_str),
            dominant_emotion: dominant(&shares).map(|e| e.as_str().to_string()),
            timestamp: now.to_rfc3339(),
        };

        let analyses = reviews
            .iter()
            .zip(results)
            .map(|(r, result)| ReviewAnalysis {
                review_id: r.id.clone(),
                analysis: describe(result, now),
            })
            .collect();
        (analyses, summary)
    }
}

fn describe(result: Classification<Emotion>, now: DateTime<Utc>) -> EmotionAnalysis {
    EmotionAnalysis {
        emotion: result.label.as_str().to_string(),
        emoji: result.label.emoji().to_string(),
        score: result.confidence,
        timestamp: now.to_rfc3339(),
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::new(Box::new(keyword_classifier()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_common::sample::sample_reviews;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_keyword_emotions() {
        let classifier = keyword_classifier();
        let cases = [
            ("I absolutely love this product!", Emotion::Happy),
            ("Pretty good for daily use", Emotion::Satisfied),
            ("It's okay I guess", Emotion::Neutral),
            ("Honestly I expected more", Emotion::Disappointed),
            ("Worst purchase ever", Emotion::Angry),
            ("Arrived on Tuesday", Emotion::Neutral),
        ];
        for (text, expected) in cases {
            assert_eq!(classifier.classify(text).label, expected, "{text}");
        }
    }

    #[test]
    fn test_analysis_carries_emoji_and_band() {
        let analysis = ReviewAnalyzer::default().analyze("Terrible battery", now());
        assert_eq!(analysis.emotion, "angry");
        assert_eq!(analysis.emoji, "😠");
        assert!((0.0..=0.2).contains(&analysis.score));
        assert_eq!(analysis.timestamp, "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_summary_of_sample_headphone_reviews() {
        let reviews = sample_reviews();
        let (analyses, summary) =
            ReviewAnalyzer::default().analyze_reviews(reviews.for_product("1"), now());

        assert_eq!(analyses.len(), 3);
        assert_eq!(analyses[0].review_id, "r1");
        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.emotion_distribution.len(), Emotion::ALL.len());

        // "love"/"amazing" -> happy, "good" -> satisfied, "decent" -> neutral
        let counts: Vec<usize> = summary.emotion_distribution.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 0, 0]);
        assert_eq!(summary.dominant_emotion.as_deref(), Some("happy"));
    }

    #[test]
    fn test_no_reviews_summary() {
        let (analyses, summary) = ReviewAnalyzer::default().analyze_reviews(&[], now());
        assert!(analyses.is_empty());
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.dominant_emotion, None);

        let labels: Vec<&str> = summary.emotion_distribution.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["happy", "satisfied", "neutral", "disappointed", "angry"]);
        assert!(summary
            .emotion_distribution
            .iter()
            .all(|s| s.count == 0 && s.percentage == 0.0));
    }

    struct AlwaysAngry;

    impl Classifier for AlwaysAngry {
        type Label = Emotion;

        fn classify(&self, _text: &str) -> Classification<Emotion> {
            Classification {
                label: Emotion::Angry,
                confidence: 0.5,
            }
        }
    }

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for Counting {
        type Label = Emotion;

        fn classify(&self, _text: &str) -> Classification<Emotion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Classification {
                label: Emotion::Satisfied,
                confidence: 0.7,
            }
        }
    }

    #[test]
    fn test_each_review_classified_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = ReviewAnalyzer::new(Box::new(Counting {
            calls: Arc::clone(&calls),
        }));
        let reviews = sample_reviews();

        let (analyses, summary) = analyzer.analyze_reviews(reviews.for_product("1"), now());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(analyses.iter().all(|a| a.analysis.emotion == "satisfied"));
        assert_eq!(summary.emotion_distribution[1].count, 3);
        assert_eq!(summary.dominant_emotion.as_deref(), Some("satisfied"));
    }

    #[test]
    fn test_classifier_is_swappable() {
        let analyzer = ReviewAnalyzer::new(Box::new(AlwaysAngry));
        let analysis = analyzer.analyze("I love it", now());
        assert_eq!(analysis.emotion, "angry");
        assert_eq!(analysis.score, 0.5);
    }
}

/// Sentiment analysis for social media posts.
use chrono::{DateTime, Utc};
use shop_common::classifier::{
    Band, Classification, Classifier, KeywordClassifier, KeywordRule, Label,
};
use shop_common::shop_api::SentimentAnalysis;

pub const DEFAULT_PLATFORM: &str = "twitter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl Label for Sentiment {
    const ALL: &'static [Self] = &[
        Sentiment::VeryPositive,
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::VeryNegative,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Sentiment::VeryPositive => "very_positive",
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::VeryNegative => "very_negative",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Sentiment::VeryPositive => "😍",
            Sentiment::Positive => "😊",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "😕",
            Sentiment::VeryNegative => "😡",
        }
    }
}

pub fn keyword_classifier() -> KeywordClassifier<Sentiment> {
    KeywordClassifier::new(
        vec![
            KeywordRule {
                label: Sentiment::VeryPositive,
                keywords: &["amazing", "excellent", "love", "perfect", "great"],
                band: Band::new(0.8, 1.0),
            },
            KeywordRule {
                label: Sentiment::Positive,
                keywords: &["good", "nice", "like", "happy"],
                band: Band::new(0.6, 0.8),
            },
            KeywordRule {
                label: Sentiment::Neutral,
                keywords: &["okay", "fine", "average", "decent"],
                band: Band::new(0.4, 0.6),
            },
            KeywordRule {
                label: Sentiment::Negative,
                keywords: &["disappointed", "not good", "dislike"],
                band: Band::new(0.2, 0.4),
            },
            KeywordRule {
                label: Sentiment::VeryNegative,
                keywords: &["terrible", "awful", "hate", "worst"],
                band: Band::new(0.0, 0.2),
            },
        ],
        Sentiment::Neutral,
        Band::new(0.4, 0.6),
    )
}

pub struct PostAnalyzer {
    classifier: Box<dyn Classifier<Label = Sentiment>>,
}

impl PostAnalyzer {
    pub fn new(classifier: Box<dyn Classifier<Label = Sentiment>>) -> Self {
        Self { classifier }
    }

    pub fn classify(&self, text: &str) -> Classification<Sentiment> {
        self.classifier.classify(text)
    }

    pub fn analyze(&self, text: &str, platform: &str, now: DateTime<Utc>) -> SentimentAnalysis {
        describe(self.classify(text), platform, now)
    }
}

/// Wire form of an already computed classification.
pub fn describe(
    result: Classification<Sentiment>,
    platform: &str,
    now: DateTime<Utc>,
) -> SentimentAnalysis {
    SentimentAnalysis {
        sentiment: result.label.as_str().to_string(),
        emoji: result.label.emoji().to_string(),
        score: result.confidence,
        platform: platform.to_string(),
        timestamp: now.to_rfc3339(),
    }
}

impl Default for PostAnalyzer {
    fn default() -> Self {
        Self::new(Box::new(keyword_classifier()))
    }
}

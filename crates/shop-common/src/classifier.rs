/// Text classification capability.
///
/// Callers depend on the `Classifier` trait only, so the keyword matcher below can be
/// swapped for a model-backed implementation without touching them.
///
/// `KeywordClassifier` walks an ordered rule table: the lowercased text is checked
/// against each rule's keywords (plain substring match) and the first rule with a hit
/// decides the label. The confidence is placed inside the rule's band using a SHA-256
/// digest of the text, so identical text always scores identically.
use sha2::{Digest, Sha256};

/// A closed, ordered label set (e.g. review emotions).
///
/// `ALL` fixes the order used for distributions and for breaking ties.
pub trait Label: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// Wire name, e.g. "very_positive".
    fn as_str(self) -> &'static str;

    fn emoji(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<L> {
    pub label: L,
    /// Confidence in 0..=1
    pub confidence: f32,
}

pub trait Classifier: Send + Sync {
    type Label: Label;

    fn classify(&self, text: &str) -> Classification<Self::Label>;
}

/// Inclusive confidence range assigned to a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f32,
    pub high: f32,
}

impl Band {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Map `fraction` (0..=1) into the band.
    fn place(self, fraction: f64) -> f32 {
        let span = f64::from(self.high - self.low);
        (f64::from(self.low) + fraction * span) as f32
    }
}

#[derive(Debug, Clone)]
pub struct KeywordRule<L> {
    pub label: L,
    pub keywords: &'static [&'static str],
    pub band: Band,
}

pub struct KeywordClassifier<L: Label> {
    rules: Vec<KeywordRule<L>>,
    fallback: L,
    fallback_band: Band,
}

impl<L: Label> KeywordClassifier<L> {
    pub fn new(rules: Vec<KeywordRule<L>>, fallback: L, fallback_band: Band) -> Self {
        Self {
            rules,
            fallback,
            fallback_band,
        }
    }
}

impl<L: Label> Classifier for KeywordClassifier<L> {
    type Label = L;

    fn classify(&self, text: &str) -> Classification<L> {
        let lowered = text.to_lowercase();
        let (label, band) = self
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
            .map(|rule| (rule.label, rule.band))
            .unwrap_or((self.fallback, self.fallback_band));

        Classification {
            label,
            confidence: band.place(text_fraction(&lowered)),
        }
    }
}

/// Deterministic value in 0..=1 derived from the text's SHA-256 digest.
fn text_fraction(text: &str) -> f64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head) as f64 / u64::MAX as f64
}

/// Count and share of one key in a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share<K> {
    pub key: K,
    pub count: usize,
    /// Percentage of the total, 0 when the total is 0
    pub percentage: f64,
}

/// Tally `observed` over the ordered key set `all`.
///
/// Every key in `all` appears in the result, in order, including zero counts.
/// Observed values missing from `all` are ignored.
pub fn distribution<K: Copy + Eq>(all: &[K], observed: impl IntoIterator<Item = K>) -> Vec<Share<K>> {
    let mut counts = vec![0usize; all.len()];
    for value in observed {
        if let Some(idx) = all.iter().position(|k| *k == value) {
            counts[idx] += 1;
        }
    }
    let total: usize = counts.iter().sum();

    all.iter()
        .zip(counts)
        .map(|(&key, count)| Share {
            key,
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Key with the highest count; ties go to the earliest key. `None` when nothing was counted.
pub fn dominant<K: Copy>(shares: &[Share<K>]) -> Option<K> {
    let mut best: Option<&Share<K>> = None;
    for share in shares.iter().filter(|s| s.count > 0) {
        if best.map_or(true, |b| share.count > b.count) {
            best = Some(share);
        }
    }
    best.map(|s| s.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mood {
        Up,
        Flat,
        Down,
    }

    impl Label for Mood {
        const ALL: &'static [Self] = &[Mood::Up, Mood::Flat, Mood::Down];

        fn as_str(self) -> &'static str {
            match self {
                Mood::Up => "up",
                Mood::Flat => "flat",
                Mood::Down => "down",
            }
        }

        fn emoji(self) -> &'static str {
            ""
        }
    }

    fn mood_classifier() -> KeywordClassifier<Mood> {
        KeywordClassifier::new(
            vec![
                KeywordRule {
                    label: Mood::Up,
                    keywords: &["great"],
                    band: Band::new(0.8, 1.0),
                },
                KeywordRule {
                    label: Mood::Down,
                    keywords: &["not great", "bad"],
                    band: Band::new(0.0, 0.2),
                },
            ],
            Mood::Flat,
            Band::new(0.4, 0.6),
        )
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "not great" also contains "great", and the earlier rule takes it
        let result = mood_classifier().classify("Not great at all");
        assert_eq!(result.label, Mood::Up);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(mood_classifier().classify("BAD fit").label, Mood::Down);
    }

    #[test]
    fn test_fallback_label_and_band() {
        let result = mood_classifier().classify("arrived on tuesday");
        assert_eq!(result.label, Mood::Flat);
        assert!((0.4..=0.6).contains(&result.confidence));
    }

    #[test]
    fn test_confidence_is_deterministic_and_in_band() {
        let classifier = mood_classifier();
        for text in ["great", "great product", "really great!", "bad", "so bad"] {
            let a = classifier.classify(text);
            let b = classifier.classify(text);
            assert_eq!(a, b);
            let band = if a.label == Mood::Up {
                0.8..=1.0
            } else {
                0.0..=0.2
            };
            assert!(band.contains(&a.confidence), "{text}: {}", a.confidence);
        }
    }

    #[test]
    fn test_distribution_covers_all_keys() {
        let shares = distribution(Mood::ALL, [Mood::Up, Mood::Up, Mood::Down, Mood::Up]);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].count, 3);
        assert_eq!(shares[1].count, 0);
        assert_eq!(shares[1].percentage, 0.0);
        assert_eq!(shares[2].percentage, 25.0);

        let total: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_ties_go_to_earliest_key() {
        let shares = distribution(Mood::ALL, [Mood::Down, Mood::Flat]);
        assert_eq!(dominant(&shares), Some(Mood::Flat));
    }

    #[test]
    fn test_empty_distribution() {
        let shares = distribution(Mood::ALL, std::iter::empty());
        assert!(shares.iter().all(|s| s.count == 0 && s.percentage == 0.0));
        assert_eq!(dominant(&shares), None);
    }
}

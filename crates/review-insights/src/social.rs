/// Simulated social media mentions of a product.
///
/// Posts are generated from fixed templates and phrase pools, then run through the
/// post sentiment classifier and summarized. The random source and the clock are
/// passed in by the caller, so a seeded RNG and a fixed `now` reproduce the same posts.
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use regex::{Captures, Regex};
use shop_common::classifier::{distribution, dominant, Classification, Label};
use shop_common::shop_api::{MentionSummary, SocialMentionsResponse, SocialPostInfo};

use crate::sentiment::{describe, PostAnalyzer, Sentiment};
use crate::summary::label_shares;

/// Generated posts fall within this many days before `now`.
pub const MENTION_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Twitter,
    Instagram,
    Facebook,
    Reddit,
    Tiktok,
}

impl Platform {
    pub const ALL: &'static [Platform] = &[
        Platform::Twitter,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Reddit,
        Platform::Tiktok,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Reddit => "reddit",
            Platform::Tiktok => "tiktok",
        }
    }

    /// Instagram has no share counter.
    pub fn has_shares(self) -> bool {
        self != Platform::Instagram
    }
}

const TEMPLATES: [&str; 10] = [
    "Just bought the {product} and I {sentiment} it!",
    "Has anyone tried {product}? I'm thinking of getting one.",
    "{product} is {adjective}! {emoji}",
    "My experience with {product}: {sentiment_phrase}",
    "Don't waste your money on {product}. {negative_reason}",
    "{product} vs the competition - {comparison}",
    "Using {product} for a week now. {experience}",
    "Is it just me or is {product} {quality}?",
    "The new {product} update is {update_quality}",
    "{product} customer service is {service_quality}",
];

/// Phrase pools for one tone, keyed by template placeholder.
struct Phrases {
    sentiment: &'static [&'static str],
    adjective: &'static [&'static str],
    sentiment_phrase: &'static [&'static str],
    emoji: &'static [&'static str],
    negative_reason: &'static [&'static str],
    comparison: &'static [&'static str],
    experience: &'static [&'static str],
    quality: &'static [&'static str],
    update_quality: &'static [&'static str],
    service_quality: &'static [&'static str],
}

const POSITIVE: Phrases = Phrases {
    sentiment: &["love", "really like", "am impressed by", "recommend"],
    adjective: &["amazing", "excellent", "fantastic", "incredible"],
    sentiment_phrase: &["love it", "highly recommend", "best purchase ever", "worth every penny"],
    emoji: &["😍", "👍", "🙌", "💯"],
    negative_reason: &[],
    comparison: &["much better", "superior", "the clear winner"],
    experience: &["loving it so far", "very satisfied", "exceeded expectations"],
    quality: &["really good", "excellent", "a game changer"],
    update_quality: &["fantastic", "a great improvement", "very useful"],
    service_quality: &["excellent", "very helpful", "responsive"],
};

const NEUTRAL: Phrases = Phrases {
    sentiment: &["think it's okay", "have mixed feelings about", "am neutral about"],
    adjective: &["decent", "okay", "standard", "acceptable"],
    sentiment_phrase: &["it's okay", "does the job", "nothing special", "mixed feelings"],
    emoji: &["🤔", "😐", "🧐", "⚖️"],
    negative_reason: &[],
    comparison: &["about the same as", "similar to", "neither better nor worse than"],
    experience: &["it's fine", "does what it's supposed to", "no strong feelings"],
    quality: &["just okay", "average", "what you'd expect"],
    update_quality: &["fine", "has pros and cons", "nothing special"],
    service_quality: &["average", "okay", "could be better"],
};

const NEGATIVE: Phrases = Phrases {
    sentiment: &["dislike", "am disappointed by", "regret buying", "don't recommend"],
    adjective: &["terrible", "awful", "disappointing", "overrated"],
    sentiment_phrase: &["disappointed", "not worth the price", "had issues with it", "returning it"],
    emoji: &["👎", "😠", "🙄", "💔"],
    negative_reason: &[
        "It broke quickly",
        "Poor quality",
        "Not as advertised",
        "Too expensive for what it is",
    ],
    comparison: &["worse than", "inferior to", "not as good as"],
    experience: &["having issues", "not impressed", "disappointed"],
    quality: &["overrated", "not worth it", "a letdown"],
    update_quality: &["buggy", "a step backward", "problematic"],
    service_quality: &["terrible", "unhelpful", "slow to respond"],
};

const TONES: [&Phrases; 3] = [&POSITIVE, &NEUTRAL, &NEGATIVE];

impl Phrases {
    fn pool(&self, placeholder: &str) -> &'static [&'static str] {
        match placeholder {
            "sentiment" => self.sentiment,
            "adjective" => self.adjective,
            "sentiment_phrase" => self.sentiment_phrase,
            "emoji" => self.emoji,
            "negative_reason" => self.negative_reason,
            "comparison" => self.comparison,
            "experience" => self.experience,
            "quality" => self.quality,
            "update_quality" => self.update_quality,
            "service_quality" => self.service_quality,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialPost {
    pub id: String,
    pub platform: Platform,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub shares: Option<u32>,
    pub comments: u32,
}

pub struct MentionGenerator {
    placeholder: Regex,
}

impl MentionGenerator {
    pub fn new() -> Self {
        Self {
            placeholder: Regex::new(r"\{(\w+)\}").expect("valid regex"),
        }
    }

    /// Generate `count` posts about `product`, newest first.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        product: &str,
        count: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<SocialPost> {
        let window_secs = MENTION_WINDOW_DAYS * 24 * 60 * 60;

        let mut posts: Vec<SocialPost> = (0..count)
            .map(|i| {
                let template = TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
                let platform = Platform::ALL[rng.gen_range(0..Platform::ALL.len())];
                let tone = TONES[rng.gen_range(0..TONES.len())];
                let text = self.fill(template, product, tone, &mut *rng);

                SocialPost {
                    id: format!("post_{i}"),
                    platform,
                    text,
                    timestamp: now - Duration::seconds(rng.gen_range(0..=window_secs)),
                    likes: rng.gen_range(0..=1000),
                    shares: platform.has_shares().then(|| rng.gen_range(0..=200)),
                    comments: rng.gen_range(0..=100),
                }
            })
            .collect();

        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts
    }

    fn fill<R: Rng + ?Sized>(
        &self,
        template: &str,
        product: &str,
        tone: &Phrases,
        rng: &mut R,
    ) -> String {
        let filled = self.placeholder.replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            if name == "product" {
                return product.to_string();
            }
            let pool = tone.pool(name);
            if pool.is_empty() {
                String::new()
            } else {
                pool[rng.gen_range(0..pool.len())].to_string()
            }
        });
        filled.trim_end().to_string()
    }
}

impl Default for MentionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify each generated post once and summarize sentiment and platform mix.
pub fn analyze_mentions(
    analyzer: &PostAnalyzer,
    product: &str,
    posts: Vec<SocialPost>,
    now: DateTime<Utc>,
) -> SocialMentionsResponse {
    let results: Vec<Classification<Sentiment>> =
        posts.iter().map(|p| analyzer.classify(&p.text)).collect();

    let sentiment_shares = distribution(Sentiment::ALL, results.iter().map(|c| c.label));
    let platform_shares = distribution(Platform::ALL, posts.iter().map(|p| p.platform));

    let summary = MentionSummary {
        product: product.to_string(),
        total_mentions: posts.len(),
        sentiment_distribution: label_shares(&sentiment_shares, Sentiment::as_str),
        platform_distribution: label_shares(&platform_shares, Platform::as_str),
        overall_sentiment: dominant(&sentiment_shares).map(|s| s.as_str().to_string()),
        timestamp: now.to_rfc3339(),
    };

    let posts = posts
        .into_iter()
        .zip(results)
        .map(|(post, result)| {
            let analysis = describe(result, post.platform.as_str(), now);
            SocialPostInfo {
                id: post.id,
                platform: post.platform.as_str().to_string(),
                text: post.text,
                timestamp: post.timestamp.to_rfc3339(),
                likes: post.likes,
                shares: post.shares,
                comments: post.comments,
                analysis,
            }
        })
        .collect();

    SocialMentionsResponse { posts, summary }
}

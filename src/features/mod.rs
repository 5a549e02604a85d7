pub mod heavy;
pub mod lite;

pub use heavy::HeavyClient;
pub use lite::{LinearClassifier, LiteBundle, Vectorizer};

use serde::{Deserialize, Serialize};

use crate::error::PredictError;

pub const TOPIC_LABELS: [&str; 15] = [
    "Finance",
    "Food",
    "Sports",
    "Education",
    "Gaming",
    "Climate",
    "Business",
    "Travel",
    "Fashion",
    "Politics",
    "Health",
    "Entertainment",
    "Science",
    "AI/ML",
    "Technology",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMode {
    Lite,
    Heavy,
}

impl ModelMode {
    pub fn label(self) -> &'static str {
        match self {
            ModelMode::Lite => "lite",
            ModelMode::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFeatures {
    pub topic: String,
    pub language: String,
    pub content_length: usize,
    pub num_hashtags: usize,
    pub sentiment_positive: f64,
    pub sentiment_negative: f64,
    pub sentiment_neutral: f64,
    pub sentiment_category: String,
    pub toxicity_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

fn bucket_for_class(label: &str, index: usize) -> Option<SentimentBucket> {
    let lowered = label.to_lowercase();
    if lowered.contains("pos") {
        return Some(SentimentBucket::Positive);
    }
    if lowered.contains("neg") {
        return Some(SentimentBucket::Negative);
    }
    if lowered.contains("neu") {
        return Some(SentimentBucket::Neutral);
    }
    match index {
        0 => Some(SentimentBucket::Negative),
        1 => Some(SentimentBucket::Neutral),
        2 => Some(SentimentBucket::Positive),
        _ => None,
    }
}

impl SentimentScores {
    pub fn from_classes(classes: &[String], probabilities: &[f64]) -> Self {
        let mut scores = SentimentScores::default();
        for (index, label) in classes.iter().enumerate() {
            let probability = match probabilities.get(index) {
                Some(value) => *value,
                None => continue,
            };
            match bucket_for_class(label, index) {
                Some(SentimentBucket::Positive) => scores.positive = probability,
                Some(SentimentBucket::Negative) => scores.negative = probability,
                Some(SentimentBucket::Neutral) => scores.neutral = probability,
                None => {
                    tracing::warn!(
                        "sentiment class {label:?} at index {index} matched no bucket; leaving it at 0.0"
                    );
                }
            }
        }
        scores
    }

    // First maximum wins, scanning pos, neg, neu in that order.
    pub fn category(&self) -> &'static str {
        let mut label = "pos";
        let mut best = self.positive;
        for (candidate, value) in [("neg", self.negative), ("neu", self.neutral)] {
            if value > best {
                label = candidate;
                best = value;
            }
        }
        label
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawScores {
    pub topic: String,
    pub language: String,
    pub sentiment: SentimentScores,
    pub toxicity: f64,
}

pub fn normalize(caption: &str, raw: &RawScores) -> CanonicalFeatures {
    CanonicalFeatures {
        topic: raw.topic.clone(),
        language: raw.language.clone(),
        content_length: caption.chars().count(),
        num_hashtags: count_hashtags(caption),
        sentiment_positive: raw.sentiment.positive,
        sentiment_negative: raw.sentiment.negative,
        sentiment_neutral: raw.sentiment.neutral,
        sentiment_category: raw.sentiment.category().to_string(),
        toxicity_score: raw.toxicity * 100.0,
    }
}

pub fn count_hashtags(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            continue;
        }
        if chars.peek().map(|next| is_word_char(*next)).unwrap_or(false) {
            count += 1;
            while chars.peek().map(|next| is_word_char(*next)).unwrap_or(false) {
                chars.next();
            }
        }
    }
    count
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[derive(Clone)]
pub enum FeatureExtractor {
    Lite(LiteBundle),
    Heavy(HeavyClient),
}

impl FeatureExtractor {
    pub fn mode(&self) -> ModelMode {
        match self {
            FeatureExtractor::Lite(_) => ModelMode::Lite,
            FeatureExtractor::Heavy(_) => ModelMode::Heavy,
        }
    }

    pub async fn extract(&self, caption: &str) -> Result<CanonicalFeatures, PredictError> {
        match self {
            FeatureExtractor::Lite(bundle) => Ok(bundle.extract(caption)),
            FeatureExtractor::Heavy(client) => client.extract(caption).await,
        }
    }
}

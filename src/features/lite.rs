use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::PredictError;
use crate::features::{normalize, CanonicalFeatures, RawScores, SentimentScores};

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const TOPIC_MODEL_FILE: &str = "topic_model.json";
pub const SENTIMENT_MODEL_FILE: &str = "sentiment_model.json";
pub const TOXICITY_MODEL_FILE: &str = "toxicity_model.json";

pub const LITE_ARTIFACTS: [&str; 4] = [
    VECTORIZER_FILE,
    TOPIC_MODEL_FILE,
    SENTIMENT_MODEL_FILE,
    TOXICITY_MODEL_FILE,
];

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Deserialize)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
}

impl Vectorizer {
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.dimension()];
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                if let Some(slot) = counts.get_mut(index) {
                    *slot += 1.0;
                }
            }
        }
        counts
    }

    fn validate(&self) -> Result<(), PredictError> {
        let dimension = self.dimension();
        for (token, &index) in &self.vocabulary {
            if index >= dimension {
                return Err(PredictError::Configuration(format!(
                    "vectorizer token {token:?} has index {index} outside dimension {dimension}"
                )));
            }
        }
        Ok(())
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    fn decision(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                intercept
                    + row
                        .iter()
                        .zip(input)
                        .map(|(weight, value)| weight * value)
                        .sum::<f64>()
            })
            .collect()
    }

    pub fn predict(&self, input: &[f64]) -> Option<&str> {
        let scores = self.decision(input);
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in scores.iter().enumerate() {
            match best {
                None => best = Some((index, *score)),
                Some((_, best_score)) if *score > best_score => best = Some((index, *score)),
                _ => {}
            }
        }
        best.map(|(index, _)| self.classes[index].as_str())
    }

    pub fn predict_proba(&self, input: &[f64]) -> Vec<f64> {
        let scores = self.decision(input);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|score| (score - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        if total <= 0.0 {
            return vec![0.0; scores.len()];
        }
        exps.into_iter().map(|value| value / total).collect()
    }

    fn validate(&self, name: &str, dimension: usize) -> Result<(), PredictError> {
        if self.classes.is_empty() {
            return Err(PredictError::Configuration(format!(
                "{name} classifier has no classes"
            )));
        }
        if self.weights.len() != self.classes.len() || self.intercepts.len() != self.classes.len() {
            return Err(PredictError::Configuration(format!(
                "{name} classifier has {} classes, {} weight rows, {} intercepts",
                self.classes.len(),
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        for row in &self.weights {
            if row.len() != dimension {
                return Err(PredictError::Configuration(format!(
                    "{name} classifier weight row has {} entries for vectorizer dimension {dimension}",
                    row.len()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct LiteBundle {
    vectorizer: Vectorizer,
    topic: LinearClassifier,
    sentiment: LinearClassifier,
    toxicity: LinearClassifier,
}

impl LiteBundle {
    pub fn new(
        vectorizer: Vectorizer,
        topic: LinearClassifier,
        sentiment: LinearClassifier,
        toxicity: LinearClassifier,
    ) -> Result<Self, PredictError> {
        vectorizer.validate()?;
        let dimension = vectorizer.dimension();
        topic.validate("topic", dimension)?;
        sentiment.validate("sentiment", dimension)?;
        toxicity.validate("toxicity", dimension)?;
        Ok(Self {
            vectorizer,
            topic,
            sentiment,
            toxicity,
        })
    }

    pub fn artifacts_present(dir: &Path) -> bool {
        LITE_ARTIFACTS.iter().all(|name| dir.join(name).exists())
    }

    pub fn load(dir: &Path) -> Result<Self, PredictError> {
        let vectorizer: Vectorizer = load_artifact(dir, VECTORIZER_FILE)?;
        let topic: LinearClassifier = load_artifact(dir, TOPIC_MODEL_FILE)?;
        let sentiment: LinearClassifier = load_artifact(dir, SENTIMENT_MODEL_FILE)?;
        let toxicity: LinearClassifier = load_artifact(dir, TOXICITY_MODEL_FILE)?;
        LiteBundle::new(vectorizer, topic, sentiment, toxicity)
    }

    pub fn extract(&self, caption: &str) -> CanonicalFeatures {
        let input = self.vectorizer.transform(caption);
        let topic = self.topic.predict(&input).unwrap_or_default().to_string();
        let sentiment =
            SentimentScores::from_classes(&self.sentiment.classes, &self.sentiment.predict_proba(&input));
        // Index 1 is the toxic class of the binary classifier.
        let toxicity = self
            .toxicity
            .predict_proba(&input)
            .get(1)
            .copied()
            .unwrap_or(0.0);
        let raw = RawScores {
            topic,
            language: DEFAULT_LANGUAGE.to_string(),
            sentiment,
            toxicity,
        };
        normalize(caption, &raw)
    }
}

fn load_artifact<T: serde::de::DeserializeOwned>(dir: &Path, name: &str) -> Result<T, PredictError> {
    let path = dir.join(name);
    let contents = std::fs::read_to_string(&path).map_err(|err| {
        PredictError::Configuration(format!("failed to read {}: {err}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        PredictError::Configuration(format!("failed to parse {}: {err}", path.display()))
    })
}

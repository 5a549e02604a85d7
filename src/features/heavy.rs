use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::error::PredictError;
use crate::features::{normalize, CanonicalFeatures, RawScores, SentimentScores, TOPIC_LABELS};

#[derive(Clone)]
pub struct HeavyClient {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Serialize)]
struct TopicRequest<'a> {
    text: &'a str,
    candidate_labels: &'a [&'a str],
}

#[derive(Debug, Clone, Deserialize)]
struct TopicResponse {
    label: String,
}

#[derive(Debug, Clone, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct LanguageResponse {
    language: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SentimentResponse {
    positive: f64,
    negative: f64,
    neutral: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ToxicityResponse {
    toxicity: f64,
}

impl HeavyClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, PredictError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                PredictError::Configuration(format!("failed to build nlp client: {err}"))
            })?;
        Ok(Self { endpoint, client })
    }

    pub async fn extract(&self, caption: &str) -> Result<CanonicalFeatures, PredictError> {
        let topic: TopicResponse = self
            .post(
                "topic",
                &TopicRequest {
                    text: caption,
                    candidate_labels: &TOPIC_LABELS,
                },
            )
            .await?;
        let language: LanguageResponse = self.post("language", &TextRequest { text: caption }).await?;
        let sentiment: SentimentResponse =
            self.post("sentiment", &TextRequest { text: caption }).await?;
        let toxicity: ToxicityResponse =
            self.post("toxicity", &TextRequest { text: caption }).await?;

        let raw = RawScores {
            topic: topic.label,
            language: language.language,
            sentiment: SentimentScores {
                positive: sentiment.positive,
                negative: sentiment.negative,
                neutral: sentiment.neutral,
            },
            toxicity: toxicity.toxicity,
        };
        Ok(normalize(caption, &raw))
    }

    async fn post<Req, Resp>(&self, route: &str, payload: &Req) -> Result<Resp, PredictError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), route);
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| PredictError::Extraction(format!("{route} request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PredictError::Extraction(format!(
                "{route} error {status}: {body}"
            )));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|err| PredictError::Extraction(format!("{route} response parse failed: {err}")))
    }
}

//! HTTP client helpers for tests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, TestClientError> {
        let resp = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn generate_goal_plan(&self, text: &str) -> Result<PlanResponse, TestClientError> {
        self.post_json("/generate_goal_plan", &serde_json::json!({ "text": text }))
            .await
    }

    pub async fn keywords(
        &self,
        text: &str,
        top_n: Option<usize>,
    ) -> Result<KeywordsResponse, TestClientError> {
        let body = match top_n {
            Some(n) => serde_json::json!({ "text": text, "top_n": n }),
            None => serde_json::json!({ "text": text }),
        };
        self.post_json("/keywords", &body).await
    }

    pub async fn sentiment(&self, text: &str) -> Result<SentimentResponse, TestClientError> {
        self.post_json("/sentiment", &serde_json::json!({ "text": text }))
            .await
    }

    pub async fn predict(
        &self,
        title: &str,
        description: &str,
    ) -> Result<PredictResponse, TestClientError> {
        self.post_json(
            "/predict",
            &serde_json::json!({ "title": title, "description": description }),
        )
        .await
    }

    pub async fn rephrase(&self, text: &str) -> Result<RephraseResponse, TestClientError> {
        self.post_json("/rephrase", &serde_json::json!({ "text": text }))
            .await
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub embedder_mode: String,
    pub sentiment_mode: String,
    pub generation_mode: String,
    pub prediction: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanResponse {
    pub plan: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentimentResponse {
    pub sentiment: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictResponse {
    pub score: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RephraseResponse {
    pub rephrased: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:8000");
        assert_eq!(client.url("/healthz"), "http://localhost:8000/healthz");
        assert_eq!(client.url("healthz"), "http://localhost:8000/healthz");
    }

    #[test]
    fn test_client_exposes_endpoints() {
        let client = TestClient::new("http://localhost:8000");
        std::mem::drop(client.health());
        std::mem::drop(client.ready());
        std::mem::drop(client.generate_goal_plan("Learn Rust"));
        std::mem::drop(client.keywords("Learn Rust", None));
        std::mem::drop(client.sentiment("Learn Rust"));
        std::mem::drop(client.predict("Learn Rust", "Finish the book"));
        std::mem::drop(client.rephrase("Learn Rust"));
    }

    #[test]
    fn test_ready_response_is_ok_helper() {
        let ready = ReadyResponse {
            status: "ok".to_string(),
            components: ComponentStatus {
                http: "ready".to_string(),
                embedder_mode: "stub".to_string(),
                sentiment_mode: "lexicon".to_string(),
                generation_mode: "mock".to_string(),
                prediction: "ready".to_string(),
            },
        };
        assert!(ready.is_ok());
    }
}

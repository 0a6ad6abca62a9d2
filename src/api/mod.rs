pub mod models;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

pub use models::{NewWord, Session, Stats, Translation, UserInfo, WordEntry, WordFrequency, WordPage};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server rejected {action}")]
    Rejected { action: &'static str },
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    success: bool,
    #[serde(flatten)]
    translation: Translation,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    words: Vec<WordEntry>,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    stats: Stats,
}

#[derive(Debug, Deserialize)]
struct FrequencyResponse {
    frequency: Vec<WordFrequency>,
}

/// HTTP client for the ArabicWriter word service.
///
/// The underlying client carries a cookie store, so in the authenticated
/// variant the session cookie rides along on every call.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session_tag: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .cookie_store(true)
            .build()?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session_tag: format!("session_{millis}"),
            client,
        })
    }

    /// Tag grouping the words saved by this client instance.
    pub fn session_tag(&self) -> &str {
        &self.session_tag
    }

    pub async fn translate(&self, word: &str) -> Result<Translation, ApiError> {
        let payload = serde_json::json!({ "word": word });
        let response = self
            .client
            .post(self.url("/translate"))
            .json(&payload)
            .send()
            .await?;

        let decoded: TranslateResponse = Self::decode(response).await?;
        if !decoded.success {
            return Err(ApiError::Rejected {
                action: "translate",
            });
        }
        Ok(decoded.translation)
    }

    pub async fn create_words(&self, words: &[NewWord]) -> Result<(), ApiError> {
        let payload = serde_json::json!({
            "words": words,
            "sessionId": self.session_tag,
        });
        let response = self
            .client
            .post(self.url("/words"))
            .json(&payload)
            .send()
            .await?;

        let ack: AckResponse = Self::decode(response).await?;
        if !ack.success {
            return Err(ApiError::Rejected { action: "save" });
        }
        Ok(())
    }

    pub async fn list_words(
        &self,
        limit: u32,
        offset: u32,
        search: &str,
    ) -> Result<WordPage, ApiError> {
        let mut params = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }

        let response = self
            .client
            .get(self.url("/words"))
            .query(&params)
            .send()
            .await?;

        let decoded: ListResponse = Self::decode(response).await?;
        if !decoded.success {
            return Err(ApiError::Rejected { action: "list" });
        }
        Ok(WordPage {
            words: decoded.words,
            total: decoded.total,
        })
    }

    pub async fn delete_word(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/words/{id}")))
            .send()
            .await?;

        let ack: AckResponse = Self::decode(response).await?;
        if !ack.success {
            return Err(ApiError::Rejected { action: "delete" });
        }
        Ok(())
    }

    /// Deletes every word saved under this client's session tag.
    pub async fn clear_words(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url("/words"))
            .query(&[("sessionId", self.session_tag.as_str())])
            .send()
            .await?;

        let ack: AckResponse = Self::decode(response).await?;
        if !ack.success {
            return Err(ApiError::Rejected { action: "clear" });
        }
        Ok(())
    }

    pub async fn get_session(&self) -> Result<Session, ApiError> {
        let response = self.client.get(self.url("/user")).send().await?;
        Self::decode(response).await
    }

    pub async fn stats(&self) -> Result<Stats, ApiError> {
        let response = self.client.get(self.url("/stats")).send().await?;
        let decoded: StatsResponse = Self::decode(response).await?;
        Ok(decoded.stats)
    }

    pub async fn word_frequency(&self, limit: u32) -> Result<Vec<WordFrequency>, ApiError> {
        let response = self
            .client
            .get(self.url("/frequency"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        let decoded: FrequencyResponse = Self::decode(response).await?;
        Ok(decoded.frequency)
    }

    /// Full-page redirect target for logging in (authenticated variant).
    pub fn login_url(&self) -> String {
        format!("{}/login", self.site_root())
    }

    /// Full-page redirect target for logging out (authenticated variant).
    pub fn logout_url(&self) -> String {
        format!("{}/logout", self.site_root())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn site_root(&self) -> &str {
        self.base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus { status, body });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::from)
    }
}

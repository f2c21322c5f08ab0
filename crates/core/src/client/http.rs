use crate::client::PredictionClient;
use crate::config::Settings;
use crate::domain::{DateWindowQuery, DateWindowResult, DealQuery, DealResult};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const BEST_DATE_WINDOW_PATH: &str = "/predict/best-date-window";
pub const OPTION_RECOMMENDATION_PATH: &str = "/predict/option-recommendation";

const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Talks to a running prediction service over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
    retries: u32,
    backoff_base: Duration,
}

/// Outcome of a failed attempt: worth retrying or not.
#[derive(Debug)]
enum AttemptError {
    /// Transport failures and 5xx responses.
    Transient(anyhow::Error),
    /// 4xx responses and bodies that don't decode; repeating won't help.
    Permanent(anyhow::Error),
}

impl AttemptError {
    fn into_inner(self) -> anyhow::Error {
        match self {
            Self::Transient(err) | Self::Permanent(err) => err,
        }
    }
}

impl HttpPredictionClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.ml_service_base_url,
            Duration::from_millis(settings.ml_service_timeout_ms),
            settings.ml_service_retries,
        )
    }

    pub fn new(base_url: &str, timeout: Duration, retries: u32) -> Result<Self> {
        anyhow::ensure!(!base_url.trim().is_empty(), "prediction service base url must be non-empty");

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build prediction service http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            // Zero would mean never sending the request.
            retries: retries.max(1),
            backoff_base: DEFAULT_BACKOFF_BASE,
        })
    }

    /// Delay before the first retry; doubles on each further attempt.
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_once<Q, R>(&self, path: &str, body: &Q) -> std::result::Result<R, AttemptError>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let res = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("prediction request to {path} failed"))
            .map_err(AttemptError::Transient)?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read prediction service response")
            .map_err(AttemptError::Transient)?;

        if !status.is_success() {
            let err = anyhow::anyhow!("prediction service HTTP {status} on {path}: {text}");
            return Err(if status.is_server_error() {
                AttemptError::Transient(err)
            } else {
                AttemptError::Permanent(err)
            });
        }

        serde_json::from_str::<R>(&text)
            .with_context(|| format!("prediction service returned unexpected body on {path}: {text}"))
            .map_err(AttemptError::Permanent)
    }

    async fn post<Q, R>(&self, path: &str, body: &Q) -> Result<R>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.post_once(path, body).await {
                Ok(parsed) => return Ok(parsed),
                Err(AttemptError::Transient(err)) if attempt < self.retries => {
                    let backoff = backoff_for(self.backoff_base, attempt);
                    tracing::warn!(attempt, ?backoff, path, error = %err, "prediction request failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err.into_inner()),
            }
        }
    }
}

fn backoff_for(base: Duration, attempt: u32) -> Duration {
    base * (1u32 << (attempt - 1).min(5))
}

#[async_trait::async_trait]
impl PredictionClient for HttpPredictionClient {
    fn client_name(&self) -> &'static str {
        "http"
    }

    async fn best_date_window(&self, query: &DateWindowQuery) -> Result<DateWindowResult> {
        self.post(BEST_DATE_WINDOW_PATH, query).await
    }

    async fn option_recommendation(&self, query: &DealQuery) -> Result<DealResult> {
        self.post(OPTION_RECOMMENDATION_PATH, query).await
    }
}

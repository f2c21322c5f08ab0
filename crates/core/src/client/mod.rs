use crate::domain::{DateWindowQuery, DateWindowResult, DealQuery, DealResult};
use crate::predict;

pub mod breaker;
pub mod http;

pub use breaker::CircuitBreaker;
pub use http::HttpPredictionClient;

#[async_trait::async_trait]
pub trait PredictionClient: Send + Sync {
    fn client_name(&self) -> &'static str;

    async fn best_date_window(&self, query: &DateWindowQuery) -> anyhow::Result<DateWindowResult>;

    async fn option_recommendation(&self, query: &DealQuery) -> anyhow::Result<DealResult>;
}

/// Runs the prediction rules in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPredictionClient;

#[async_trait::async_trait]
impl PredictionClient for LocalPredictionClient {
    fn client_name(&self) -> &'static str {
        "local"
    }

    async fn best_date_window(&self, query: &DateWindowQuery) -> anyhow::Result<DateWindowResult> {
        Ok(predict::recommend(query))
    }

    async fn option_recommendation(&self, query: &DealQuery) -> anyhow::Result<DealResult> {
        Ok(predict::evaluate(query))
    }
}

/// Asks `primary` first and answers from `fallback` when it fails.
///
/// Repeated primary failures open a [`CircuitBreaker`]; while it is open the
/// primary is skipped entirely.
pub struct FallbackPredictionClient<P, F> {
    primary: P,
    fallback: F,
    breaker: CircuitBreaker,
}

impl<P, F> FallbackPredictionClient<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            breaker: CircuitBreaker::default(),
        }
    }

    pub fn with_breaker(mut self, breaker: CircuitBreaker) -> Self {
        self.breaker = breaker;
        self
    }
}

impl<P, F> FallbackPredictionClient<P, F>
where
    P: PredictionClient,
    F: PredictionClient,
{
    /// Runs the primary call unless the circuit is open; `None` means "use the fallback".
    async fn try_primary<T>(
        &self,
        operation: &'static str,
        call: impl std::future::Future<Output = anyhow::Result<T>> + Send,
    ) -> Option<T> {
        if self.breaker.is_open() {
            tracing::debug!(primary = self.primary.client_name(), operation, "circuit open; skipping primary");
            return None;
        }

        match call.await {
            Ok(res) => {
                self.breaker.record_success();
                Some(res)
            }
            Err(err) => {
                self.breaker.record_failure();
                tracing::warn!(
                    primary = self.primary.client_name(),
                    fallback = self.fallback.client_name(),
                    operation,
                    error = %err,
                    "primary prediction failed; using fallback"
                );
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl<P, F> PredictionClient for FallbackPredictionClient<P, F>
where
    P: PredictionClient,
    F: PredictionClient,
{
    fn client_name(&self) -> &'static str {
        self.primary.client_name()
    }

    async fn best_date_window(&self, query: &DateWindowQuery) -> anyhow::Result<DateWindowResult> {
        let primary = self.primary.best_date_window(query);
        match self.try_primary("best-date-window", primary).await {
            Some(res) => Ok(res),
            None => self.fallback.best_date_window(query).await,
        }
    }

    async fn option_recommendation(&self, query: &DealQuery) -> anyhow::Result<DealResult> {
        let primary = self.primary.option_recommendation(query);
        match self.try_primary("option-recommendation", primary).await {
            Some(res) => Ok(res),
            None => self.fallback.option_recommendation(query).await,
        }
    }
}

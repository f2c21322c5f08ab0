pub mod client;
pub mod domain;
pub mod predict;
pub mod time;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_ML_SERVICE_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_ML_SERVICE_TIMEOUT_MS: u64 = 2000;
    pub const DEFAULT_ML_SERVICE_RETRIES: u32 = 2;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub sentry_dsn: Option<String>,
        pub ml_service_base_url: String,
        pub ml_service_timeout_ms: u64,
        pub ml_service_retries: u32,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                port: DEFAULT_PORT,
                sentry_dsn: None,
                ml_service_base_url: DEFAULT_ML_SERVICE_BASE_URL.to_string(),
                ml_service_timeout_ms: DEFAULT_ML_SERVICE_TIMEOUT_MS,
                ml_service_retries: DEFAULT_ML_SERVICE_RETRIES,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from any key lookup; unparseable numbers fall back to defaults.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let defaults = Self::default();
            let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

            Ok(Self {
                port: non_empty("PORT")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.port),
                sentry_dsn: non_empty("SENTRY_DSN"),
                ml_service_base_url: non_empty("ML_SERVICE_BASE_URL")
                    .unwrap_or(defaults.ml_service_base_url),
                ml_service_timeout_ms: non_empty("ML_SERVICE_TIMEOUT_MS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.ml_service_timeout_ms),
                ml_service_retries: non_empty("ML_SERVICE_RETRIES")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.ml_service_retries),
            })
        }

        pub fn require_sentry_dsn(&self) -> anyhow::Result<&str> {
            self.sentry_dsn.as_deref().context("SENTRY_DSN is required")
        }

        pub fn listen_addr(&self) -> std::net::SocketAddr {
            std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
        }
    }

}

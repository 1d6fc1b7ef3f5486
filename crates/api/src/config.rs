use std::time::Duration;

use shelfsight_core::score::{ScoringPolicy, DEFAULT_ERROR_WEIGHT, DEFAULT_WARNING_WEIGHT};
use shelfsight_vision::RetryPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory where uploaded shelf photos are stored (default: `./images`).
    pub image_dir: String,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Vision service endpoint and retry settings.
    pub vision: VisionSettings,
    /// Compliance scoring weights.
    pub scoring: ScoringPolicy,
}

/// Vision service connection settings.
#[derive(Debug, Clone)]
pub struct VisionSettings {
    /// Base URL of the shelf-analysis service.
    pub base_url: String,
    /// Retry policy around the analysis call.
    pub retry: RetryPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                  |
    /// |-------------------------------|--------------------------|
    /// | `HOST`                        | `0.0.0.0`                |
    /// | `PORT`                        | `3000`                   |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                     |
    /// | `IMAGE_DIR`                   | `./images`               |
    /// | `VISION_API_URL`              | `http://localhost:8000`  |
    /// | `VISION_RETRY_MAX_ATTEMPTS`   | `3` (1 disables retries) |
    /// | `VISION_RETRY_INITIAL_MS`     | `500`                    |
    /// | `VISION_RETRY_MAX_MS`         | `5000`                   |
    /// | `SCORING_ERROR_WEIGHT`        | `15`                     |
    /// | `SCORING_WARNING_WEIGHT`      | `5`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let image_dir = std::env::var("IMAGE_DIR").unwrap_or_else(|_| "./images".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            image_dir,
            jwt: JwtConfig::from_env(),
            vision: VisionSettings::from_env(),
            scoring: scoring_from_env(),
        }
    }
}

impl VisionSettings {
    /// Load vision-service settings from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("VISION_API_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let max_attempts: u32 = std::env::var("VISION_RETRY_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("VISION_RETRY_MAX_ATTEMPTS must be a valid u32");

        let initial_ms: u64 = std::env::var("VISION_RETRY_INITIAL_MS")
            .unwrap_or_else(|_| "500".into())
            .parse()
            .expect("VISION_RETRY_INITIAL_MS must be a valid u64");

        let max_ms: u64 = std::env::var("VISION_RETRY_MAX_MS")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("VISION_RETRY_MAX_MS must be a valid u64");

        Self {
            base_url,
            retry: RetryPolicy {
                max_attempts: max_attempts.max(1),
                initial_delay: Duration::from_millis(initial_ms),
                max_delay: Duration::from_millis(max_ms),
                ..RetryPolicy::default()
            },
        }
    }
}

/// Load scoring weights from environment variables.
fn scoring_from_env() -> ScoringPolicy {
    let error_weight: u32 = std::env::var("SCORING_ERROR_WEIGHT")
        .unwrap_or_else(|_| DEFAULT_ERROR_WEIGHT.to_string())
        .parse()
        .expect("SCORING_ERROR_WEIGHT must be a valid u32");

    let warning_weight: u32 = std::env::var("SCORING_WARNING_WEIGHT")
        .unwrap_or_else(|_| DEFAULT_WARNING_WEIGHT.to_string())
        .parse()
        .expect("SCORING_WARNING_WEIGHT must be a valid u32");

    ScoringPolicy {
        error_weight,
        warning_weight,
    }
}

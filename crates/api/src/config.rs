use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

/// Failure to load server configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Pacing of the two streaming endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Number of chunks emitted by `GET /gen`.
    pub gen_chunk_count: u64,
    /// Pause before each `GET /gen` chunk.
    pub gen_chunk_delay: Duration,
    /// Pause before each line of `GET /user`.
    pub user_row_delay: Duration,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// Time allowed until response headers are produced, in seconds (default: `30`).
    /// Streaming bodies are not bounded by it.
    pub request_timeout_secs: u64,
    /// How long open connections may keep draining after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Streaming endpoint pacing.
    pub stream: StreamConfig,
    /// Insert the demo user at start-up (default: `false`).
    pub seed_demo_user: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `8000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                    |
    /// | `GEN_CHUNK_COUNT`          | `10000`                 |
    /// | `GEN_CHUNK_DELAY_MS`       | `100`                   |
    /// | `USER_STREAM_ROW_DELAY_MS` | `100`                   |
    /// | `SEED_DEMO_USER`           | `false`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", "8000", "u16")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    expected: "header value",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "30", "u64")?;
        let shutdown_timeout_secs = parse_var(&lookup, "SHUTDOWN_TIMEOUT_SECS", "30", "u64")?;

        let stream = StreamConfig {
            gen_chunk_count: parse_var(&lookup, "GEN_CHUNK_COUNT", "10000", "u64")?,
            gen_chunk_delay: Duration::from_millis(parse_var(
                &lookup,
                "GEN_CHUNK_DELAY_MS",
                "100",
                "u64",
            )?),
            user_row_delay: Duration::from_millis(parse_var(
                &lookup,
                "USER_STREAM_ROW_DELAY_MS",
                "100",
                "u64",
            )?),
        };

        let seed_demo_user = parse_var(&lookup, "SEED_DEMO_USER", "false", "bool")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            stream,
            seed_demo_user,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: raw.clone(),
    })
}

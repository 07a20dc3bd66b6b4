//! Database connection settings.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

/// Failure to read database settings from the environment.
#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// How to reach PostgreSQL.
///
/// Either a full `DATABASE_URL`, or individual `PG_*` parts for
/// environments that hand out host/port/credentials separately.
#[derive(Clone)]
pub struct DbConfig {
    /// Full connection URL. Takes precedence over the parts below when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Reported to the server as `application_name`.
    pub application_name: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load settings from process environment variables.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `DATABASE_URL`        | unset       |
    /// | `PG_HOST`             | `localhost` |
    /// | `PG_PORT`             | `5432`      |
    /// | `PG_DATABASE`         | `items`     |
    /// | `PG_USER`             | `user`      |
    /// | `PG_PASSWORD`         | `secret`    |
    /// | `DB_APPLICATION_NAME` | `itemstore` |
    /// | `DB_MAX_CONNECTIONS`  | `20`        |
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port_raw = var("PG_PORT", "5432");
        let port = port_raw.parse().map_err(|_| DbConfigError::Invalid {
            var: "PG_PORT",
            expected: "u16",
            value: port_raw.clone(),
        })?;

        let max_raw = var("DB_MAX_CONNECTIONS", "20");
        let max_connections = max_raw.parse().map_err(|_| DbConfigError::Invalid {
            var: "DB_MAX_CONNECTIONS",
            expected: "u32",
            value: max_raw.clone(),
        })?;

        Ok(Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: var("PG_HOST", "localhost"),
            port,
            database: var("PG_DATABASE", "items"),
            username: var("PG_USER", "user"),
            password: var("PG_PASSWORD", "secret"),
            application_name: var("DB_APPLICATION_NAME", "itemstore"),
            max_connections,
        })
    }

    /// Build driver connect options, tagging the session with
    /// `application_name`.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.database)
                .username(&self.username)
                .password(&self.password),
        };
        Ok(options.application_name(&self.application_name))
    }
}

// Hand-written so credentials never reach the logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("application_name", &self.application_name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

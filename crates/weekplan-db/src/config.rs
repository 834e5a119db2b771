use std::env;

/// Database configuration.
///
/// Reads from the `WEEKPLAN_DATABASE_URL` environment variable, falling back
/// to `sqlite://recipes.db` (relative to the working directory) when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full SQLite connection URL.
    pub database_url: String,
}

impl DbConfig {
    /// The default connection URL used when no environment variable is set.
    pub const DEFAULT_URL: &str = "sqlite://recipes.db";

    /// Name of the environment variable holding the connection URL.
    pub const ENV_VAR: &str = "WEEKPLAN_DATABASE_URL";

    /// Build a config from the environment.
    ///
    /// Priority: `WEEKPLAN_DATABASE_URL` env var, then the compile-time default.
    pub fn from_env() -> Self {
        let database_url =
            env::var(Self::ENV_VAR).unwrap_or_else(|_| Self::DEFAULT_URL.to_owned());
        Self { database_url }
    }

    /// Build a config from an explicit URL (useful for tests and CLI flags).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Build a config pointing at a database file on disk.
    pub fn for_path(path: &std::path::Path) -> Self {
        Self::new(format!("sqlite://{}", path.display()))
    }

    /// Whether the URL names an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    /// Extract the database file path from the URL.
    ///
    /// Returns `None` for in-memory databases or when the URL has no path.
    pub fn database_path(&self) -> Option<&str> {
        if self.is_in_memory() {
            return None;
        }
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))
            .unwrap_or(&self.database_url);
        let path = rest.split('?').next().unwrap_or(rest);
        Some(path).filter(|s| !s.is_empty())
    }
}

use std::path::PathBuf;
use std::time::Duration;

use travelhunt_core::catalog::PlaceCatalog;
use travelhunt_core::draft::DraftPolicy;
use travelhunt_pipeline::planner::{DEFAULT_PERSIST_RETRIES, DEFAULT_PERSIST_TIMEOUT};
use travelhunt_pipeline::PlannerConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
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
    /// Grace period for background tasks after the server stops (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// JSON file holding finalized trips. Trips stay in memory when unset.
    pub trips_file: Option<PathBuf>,
    /// Only accept places from the built-in catalog (default: `true`).
    pub restrict_places_to_catalog: bool,
    /// Clear traveler and dates when the place changes (default: `false`).
    pub reset_downstream_on_place_change: bool,
    /// Upper bound on one trip write in milliseconds (default: `5000`).
    pub persist_timeout_ms: u64,
    /// Extra attempts after a failed trip write (default: `2`).
    pub persist_retries: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                            | Default                 |
    /// |------------------------------------|-------------------------|
    /// | `HOST`                             | `0.0.0.0`               |
    /// | `PORT`                             | `3000`                  |
    /// | `CORS_ORIGINS`                     | `http://localhost:8081` |
    /// | `REQUEST_TIMEOUT_SECS`             | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`            | `5`                     |
    /// | `TRIPS_FILE`                       | unset (memory only)     |
    /// | `RESTRICT_PLACES_TO_CATALOG`       | `true`                  |
    /// | `RESET_DOWNSTREAM_ON_PLACE_CHANGE` | `false`                 |
    /// | `PERSIST_TIMEOUT_MS`               | `5000`                  |
    /// | `PERSIST_RETRIES`                  | `2`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8081".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let trips_file = std::env::var("TRIPS_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let restrict_places_to_catalog = env_flag("RESTRICT_PLACES_TO_CATALOG", true);
        let reset_downstream_on_place_change =
            env_flag("RESET_DOWNSTREAM_ON_PLACE_CHANGE", false);

        let persist_timeout_ms: u64 = std::env::var("PERSIST_TIMEOUT_MS")
            .map(|s| s.parse().expect("PERSIST_TIMEOUT_MS must be a valid u64"))
            .unwrap_or(DEFAULT_PERSIST_TIMEOUT.as_millis() as u64);

        let persist_retries: u32 = std::env::var("PERSIST_RETRIES")
            .map(|s| s.parse().expect("PERSIST_RETRIES must be a valid u32"))
            .unwrap_or(DEFAULT_PERSIST_RETRIES);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            trips_file,
            restrict_places_to_catalog,
            reset_downstream_on_place_change,
            persist_timeout_ms,
            persist_retries,
        }
    }

    /// Planner settings derived from this configuration.
    pub fn planner_config(&self, catalog: &PlaceCatalog) -> PlannerConfig {
        PlannerConfig {
            draft_policy: DraftPolicy {
                reset_downstream_on_place_change: self.reset_downstream_on_place_change,
            },
            catalog: self.restrict_places_to_catalog.then(|| catalog.clone()),
            persist_timeout: Duration::from_millis(self.persist_timeout_ms),
            persist_retries: self.persist_retries,
        }
    }
}

/// Parse a boolean environment variable (`true`/`false`/`1`/`0`).
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => panic!("{name} must be a boolean, got '{other}'"),
        },
        Err(_) => default,
    }
}

use crate::auth::jwt::JwtConfig;

/// Fallback reminder recipient when `NOTIFICATION_FALLBACK_EMAIL` is not set.
const DEFAULT_FALLBACK_EMAIL: &str = "client@example.com";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
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
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Bearer secret required by `GET /check-deadlines`. When `None` the
    /// endpoint is open (matches a deployment without a cron secret).
    pub cron_secret: Option<String>,
    /// Recipient used when the project owner's email cannot be resolved.
    pub fallback_email: String,
    /// Interval for the optional in-process deadline sweep. `None` disables
    /// the background task; the cron endpoint remains the primary trigger.
    pub sweep_interval_secs: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `CRON_SECRET`                 | unset (endpoint open)   |
    /// | `NOTIFICATION_FALLBACK_EMAIL` | `client@example.com`    |
    /// | `DEADLINE_SWEEP_INTERVAL_SECS`| unset (task disabled)   |
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

        let cron_secret = std::env::var("CRON_SECRET").ok().filter(|s| !s.is_empty());

        let fallback_email = std::env::var("NOTIFICATION_FALLBACK_EMAIL")
            .unwrap_or_else(|_| DEFAULT_FALLBACK_EMAIL.into());

        let sweep_interval_secs = std::env::var("DEADLINE_SWEEP_INTERVAL_SECS")
            .ok()
            .map(|v| {
                v.parse()
                    .expect("DEADLINE_SWEEP_INTERVAL_SECS must be a valid u64")
            });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            cron_secret,
            fallback_email,
            sweep_interval_secs,
        }
    }
}

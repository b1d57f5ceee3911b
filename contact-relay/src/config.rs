//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup into an immutable [`Config`], which is
//! then handed to the notifier and the router. Nothing reads the environment
//! after that.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Mail relay host. Gmail's STARTTLS submission endpoint.
pub const SMTP_HOST: &str = "smtp.gmail.com";

/// Mail relay submission port.
pub const SMTP_PORT: u16 = 587;

/// Placeholder shipped in deployment templates for `EMAIL_USER`.
pub const PLACEHOLDER_USER: &str = "tu_correo@gmail.com";

/// Placeholder shipped in deployment templates for `EMAIL_PASS`.
pub const PLACEHOLDER_PASSWORD: &str = "TU_PASSWORD_DE_APLICACION";

/// Placeholder shipped in deployment templates for `RECIPIENT_EMAIL`.
pub const PLACEHOLDER_RECIPIENT: &str = "correo_destino@ejemplo.com";

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is not set.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://127.0.0.1:5500"];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,

    /// Upper bound for a whole SMTP exchange
    pub smtp_timeout: Duration,

    /// Mail relay account and destination
    pub mail: MailConfig,
}

/// Mail relay credentials and notification destination.
#[derive(Clone, Default)]
pub struct MailConfig {
    /// Relay login, also used as the From address
    pub user: Option<String>,

    /// Relay application password
    pub password: Option<String>,

    /// Where notifications are delivered
    pub recipient: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 8080),

            allowed_origins: parse_csv("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            }),

            smtp_timeout: parse_timeout_ms("SMTP_TIMEOUT_MS", 10_000),

            mail: MailConfig {
                user: non_empty_var("EMAIL_USER"),
                password: non_empty_var("EMAIL_PASS"),
                recipient: non_empty_var("RECIPIENT_EMAIL"),
            },
        }
    }
}

impl MailConfig {
    /// Names of the settings that are missing or still hold a placeholder.
    ///
    /// An empty list means the notifier may talk to the relay.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let checks = [
            ("EMAIL_USER", &self.user, PLACEHOLDER_USER),
            ("EMAIL_PASS", &self.password, PLACEHOLDER_PASSWORD),
            ("RECIPIENT_EMAIL", &self.recipient, PLACEHOLDER_RECIPIENT),
        ];

        checks
            .into_iter()
            .filter(|(_, value, placeholder)| match value.as_deref() {
                Some(v) => v.trim().is_empty() || v == *placeholder,
                None => true,
            })
            .map(|(name, _, _)| name)
            .collect()
    }

    /// Whether every mail setting holds a real value.
    pub fn is_configured(&self) -> bool {
        self.missing_settings().is_empty()
    }
}

// The password never reaches the logs.
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Read a variable, treating an empty value the same as an unset one.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable into `T`, falling back to `default` when unset or invalid.
fn parse_or<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Parse a millisecond timeout. Zero counts as invalid.
fn parse_timeout_ms(name: &str, default_ms: u64) -> Duration {
    match parse_or(name, default_ms) {
        0 => {
            warn!(env_var = name, value = 0, "Timeout must be positive, using default");
            Duration::from_millis(default_ms)
        }
        ms => Duration::from_millis(ms),
    }
}

/// Parse a comma-separated list of strings.
fn parse_csv(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

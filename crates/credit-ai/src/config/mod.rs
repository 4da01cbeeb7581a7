use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::analysis::{DecisionPolicy, PaymentHistoryRule};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: DecisionPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy: load_policy()?,
        })
    }
}

/// Decision thresholds, each overridable through `CREDIT_*` variables.
fn load_policy() -> Result<DecisionPolicy, ConfigError> {
    let mut policy = DecisionPolicy::default();

    if let Some(value) = number_var("CREDIT_SCORE_MINIMUM")? {
        policy.score_minimum = value;
    }
    if let Some(value) = number_var("CREDIT_INCOME_FACTOR")? {
        policy.income_factor = value;
    }
    if let Some(value) = number_var("CREDIT_SCORE_NORMALIZER")? {
        if value <= 0.0 {
            return Err(ConfigError::InvalidNumber {
                var: "CREDIT_SCORE_NORMALIZER",
            });
        }
        policy.score_normalizer = value;
    }
    if let Some(value) = number_var("CREDIT_MIN_ON_TIME_RATIO")? {
        policy.minimum_on_time_ratio = value;
    }
    if let Ok(raw) = env::var("CREDIT_HISTORY_RULE") {
        policy.payment_history_rule =
            PaymentHistoryRule::parse(&raw).ok_or(ConfigError::InvalidHistoryRule(raw))?;
    }

    Ok(policy)
}

fn number_var(var: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or(ConfigError::InvalidNumber { var }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
    InvalidHistoryRule(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} has an invalid numeric value")
            }
            ConfigError::InvalidHistoryRule(value) => write!(
                f,
                "CREDIT_HISTORY_RULE must be 'late_counts' or 'on_time_ratio' (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidHistoryRule(_) => None,
        }
    }
}

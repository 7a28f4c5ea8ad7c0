use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::workflows::induction::{PlanningPolicy, PolicyError};

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
    pub planning: PlanningPolicy,
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
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            planning: load_planning_policy()?,
        })
    }
}

/// Apply `INDUCTION_*` overrides on top of the default planning policy.
fn load_planning_policy() -> Result<PlanningPolicy, ConfigError> {
    let mut policy = PlanningPolicy::default();

    override_from_env("INDUCTION_SERVICE_THRESHOLD", &mut policy.service_threshold)?;
    override_from_env(
        "INDUCTION_CLEANING_THRESHOLD",
        &mut policy.cleaning_threshold,
    )?;
    override_from_env("INDUCTION_STANDBY_THRESHOLD", &mut policy.standby_threshold)?;
    override_from_env(
        "INDUCTION_CONFLICT_EXPIRY_HOURS",
        &mut policy.conflict_expiry_hours,
    )?;
    override_from_env(
        "INDUCTION_MAINTENANCE_URGENT_DAYS",
        &mut policy.maintenance_urgent_days,
    )?;
    override_from_env(
        "INDUCTION_MAINTENANCE_SOON_DAYS",
        &mut policy.maintenance_soon_days,
    )?;
    override_from_env(
        "INDUCTION_BRANDING_COMPLIANCE",
        &mut policy.branding_compliance_baseline,
    )?;
    override_from_env(
        "INDUCTION_MILEAGE_BALANCE",
        &mut policy.mileage_balance_baseline,
    )?;

    policy.validate().map_err(ConfigError::Policy)?;
    Ok(policy)
}

fn override_from_env<T: FromStr>(key: &'static str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(raw) = env::var(key) {
        *target = raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidPolicyValue { key, value: raw })?;
    }
    Ok(())
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

/// Output shape of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPolicyValue { key: &'static str, value: String },
    Policy(PolicyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPolicyValue { key, value } => {
                write!(f, "{key} could not be parsed from '{value}'")
            }
            ConfigError::Policy(err) => write!(f, "invalid planning policy: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPolicyValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Policy(err) => Some(err),
        }
    }
}

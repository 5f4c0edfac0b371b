use std::env;
use std::fmt;

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

/// Top-level configuration for the rules engine host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub claims: ClaimsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let claim_number_attempts = env::var("APP_CLAIM_NUMBER_ATTEMPTS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidClaimNumberAttempts)?;
        if claim_number_attempts == 0 {
            return Err(ConfigError::InvalidClaimNumberAttempts);
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            claims: ClaimsConfig {
                claim_number_attempts,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Dials for claim intake, currently only the identifier retry bound.
#[derive(Debug, Clone)]
pub struct ClaimsConfig {
    pub claim_number_attempts: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidClaimNumberAttempts,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidClaimNumberAttempts => {
                write!(f, "APP_CLAIM_NUMBER_ATTEMPTS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

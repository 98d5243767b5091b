use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::recovery::ScoringWeights;

pub const DEFAULT_CLAIM_THRESHOLD: f64 = 0.75;
pub const DEFAULT_MATCH_TOP_N: usize = 3;
pub const DEFAULT_SEMANTIC_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SEMANTIC_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_SEMANTIC_TIMEOUT_SECS: u64 = 10;

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
    pub matching: MatchingConfig,
    pub semantic: SemanticConfig,
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

        let claim_threshold = match env::var("APP_CLAIM_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_CLAIM_THRESHOLD,
        };

        let top_n = match env::var("APP_MATCH_TOP_N") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidTopN)?,
            Err(_) => DEFAULT_MATCH_TOP_N,
        };

        let api_key = env::var("APP_SEMANTIC_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let model =
            env::var("APP_SEMANTIC_MODEL").unwrap_or_else(|_| DEFAULT_SEMANTIC_MODEL.to_string());
        let endpoint = env::var("APP_SEMANTIC_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_SEMANTIC_ENDPOINT.to_string());
        let timeout_secs = match env::var("APP_SEMANTIC_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_SEMANTIC_TIMEOUT_SECS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig {
                claim_threshold,
                top_n,
                weights: ScoringWeights::default(),
            },
            semantic: SemanticConfig {
                api_key,
                model,
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Parses an acceptance threshold, rejecting anything outside [0, 1].
pub fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
        .ok_or(ConfigError::InvalidThreshold)
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

/// Claim acceptance and ranking knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub claim_threshold: f64,
    pub top_n: usize,
    pub weights: ScoringWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            claim_threshold: DEFAULT_CLAIM_THRESHOLD,
            top_n: DEFAULT_MATCH_TOP_N,
            weights: ScoringWeights::default(),
        }
    }
}

/// External completion service settings. A missing key means local-only scoring.
#[derive(Clone)]
pub struct SemanticConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl SemanticConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_SEMANTIC_MODEL.to_string(),
            endpoint: DEFAULT_SEMANTIC_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_SEMANTIC_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for SemanticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold,
    InvalidTopN,
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold => {
                write!(f, "claim threshold must be a number between 0 and 1")
            }
            ConfigError::InvalidTopN => write!(f, "APP_MATCH_TOP_N must be a positive integer"),
            ConfigError::InvalidTimeout => {
                write!(f, "APP_SEMANTIC_TIMEOUT_SECS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold
            | ConfigError::InvalidTopN
            | ConfigError::InvalidTimeout => None,
        }
    }
}

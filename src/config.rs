//! Server configuration from `WEBEX_*` environment variables
//!
//! A `.env` file in the working directory is loaded first when present. All
//! problems are collected and reported together; a missing access token is
//! reported on its own as [`Error::AuthConfiguration`].

use std::collections::HashMap;
use std::fmt;

use config::{Config, Environment};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MESSAGE_FORMAT, DEFAULT_RATE_LIMIT_API_CALLS_PER_MINUTE,
    DEFAULT_RATE_LIMIT_MESSAGES_PER_SECOND, DEFAULT_TIMEOUT_SECONDS, ENV_PREFIX,
    MESSAGE_FORMATS, ROOM_TYPES,
};
use crate::error::{Error, Result};
use crate::tool_definitions::ToolDefaults;

/// Minimum level written to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Validation rejections and dispatch details
    Debug,
    /// One line per completed tool call
    Info,
    /// Platform failures and unknown tools
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARN" | "WARNING" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Environment as read, before validation
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    access_token:                    Option<String>,
    api_base_url:                    String,
    debug:                           bool,
    rate_limit_messages_per_second:  i64,
    rate_limit_api_calls_per_minute: i64,
    default_room_type:               Option<String>,
    default_message_format:          String,
    org_domain:                      Option<String>,
    validate_ssl:                    bool,
    timeout_seconds:                 i64,
    log_level:                       String,
    log_format:                      String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            access_token:                    None,
            api_base_url:                    DEFAULT_API_BASE_URL.to_string(),
            debug:                           false,
            rate_limit_messages_per_second:  DEFAULT_RATE_LIMIT_MESSAGES_PER_SECOND.into(),
            rate_limit_api_calls_per_minute: DEFAULT_RATE_LIMIT_API_CALLS_PER_MINUTE.into(),
            default_room_type:               None,
            default_message_format:          DEFAULT_MESSAGE_FORMAT.to_string(),
            org_domain:                      None,
            validate_ssl:                    true,
            timeout_seconds:                 DEFAULT_TIMEOUT_SECONDS.into(),
            log_level:                       "INFO".to_string(),
            log_format:                      "text".to_string(),
        }
    }
}

/// Validated configuration
#[derive(Clone)]
pub struct WebexConfig {
    access_token:                        String,
    pub api_base_url:                    String,
    pub debug:                           bool,
    /// Advisory only; no client-side throttling is applied
    pub rate_limit_messages_per_second:  u64,
    /// Advisory only; no client-side throttling is applied
    pub rate_limit_api_calls_per_minute: u64,
    pub default_room_type:               Option<String>,
    pub default_message_format:          String,
    pub org_domain:                      Option<String>,
    pub validate_ssl:                    bool,
    pub timeout_seconds:                 u64,
    pub log_level:                       LogLevel,
    pub log_format:                      LogFormat,
}

impl fmt::Debug for WebexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebexConfig")
            .field("access_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("debug", &self.debug)
            .field("default_room_type", &self.default_room_type)
            .field("default_message_format", &self.default_message_format)
            .field("validate_ssl", &self.validate_ssl)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl WebexConfig {
    /// Load `.env` (if any) and the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(None)
    }

    /// Read from `source` instead of the process environment when given
    pub fn from_source(source: Option<HashMap<String, String>>) -> Result<Self> {
        let raw: RawConfig = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .ignore_empty(true)
                    .source(source),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        let access_token = raw
            .access_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::AuthConfiguration(format!("set {ENV_PREFIX}_ACCESS_TOKEN"))
            })?;

        let mut issues = Vec::new();

        match Url::parse(&raw.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => issues.push(format!(
                "{ENV_PREFIX}_API_BASE_URL must be an http(s) URL, got '{}'",
                raw.api_base_url
            )),
        }

        let mut positive = |name: &str, value: i64| {
            u64::try_from(value).ok().filter(|v| *v > 0).unwrap_or_else(|| {
                issues.push(format!("{ENV_PREFIX}_{name} must be greater than 0, got {value}"));
                0
            })
        };
        let rate_limit_messages_per_second = positive(
            "RATE_LIMIT_MESSAGES_PER_SECOND",
            raw.rate_limit_messages_per_second,
        );
        let rate_limit_api_calls_per_minute = positive(
            "RATE_LIMIT_API_CALLS_PER_MINUTE",
            raw.rate_limit_api_calls_per_minute,
        );
        let timeout_seconds = positive("TIMEOUT_SECONDS", raw.timeout_seconds);

        let default_room_type = raw
            .default_room_type
            .map(|room_type| room_type.trim().to_ascii_lowercase());
        if let Some(room_type) = &default_room_type {
            if !ROOM_TYPES.contains(&room_type.as_str()) {
                issues.push(format!(
                    "{ENV_PREFIX}_DEFAULT_ROOM_TYPE must be one of {}, got '{room_type}'",
                    ROOM_TYPES.join(", ")
                ));
            }
        }

        let default_message_format = raw.default_message_format.trim().to_ascii_lowercase();
        if !MESSAGE_FORMATS.contains(&default_message_format.as_str()) {
            issues.push(format!(
                "{ENV_PREFIX}_DEFAULT_MESSAGE_FORMAT must be one of {}, got '{default_message_format}'",
                MESSAGE_FORMATS.join(", ")
            ));
        }

        let log_level = LogLevel::parse(&raw.log_level).unwrap_or_else(|| {
            issues.push(format!(
                "{ENV_PREFIX}_LOG_LEVEL must be one of DEBUG, INFO, WARN, ERROR, got '{}'",
                raw.log_level
            ));
            LogLevel::Info
        });

        let log_format = LogFormat::parse(&raw.log_format).unwrap_or_else(|| {
            issues.push(format!(
                "{ENV_PREFIX}_LOG_FORMAT must be text or json, got '{}'",
                raw.log_format
            ));
            LogFormat::Text
        });

        if !issues.is_empty() {
            return Err(Error::Configuration(issues.join("; ")));
        }

        Ok(Self {
            access_token,
            api_base_url: raw.api_base_url,
            debug: raw.debug,
            rate_limit_messages_per_second,
            rate_limit_api_calls_per_minute,
            default_room_type,
            default_message_format,
            org_domain: raw.org_domain,
            validate_ssl: raw.validate_ssl,
            timeout_seconds,
            log_level,
            log_format,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// `WEBEX_DEBUG` overrides the configured level
    pub const fn log_filter(&self) -> &'static str {
        if self.debug {
            LogLevel::Debug.as_filter()
        } else {
            self.log_level.as_filter()
        }
    }

    pub fn tool_defaults(&self) -> ToolDefaults {
        ToolDefaults {
            message_format: self.default_message_format.clone(),
            room_type:      self.default_room_type.clone(),
        }
    }

    /// Loggable view of the configuration; never includes the token
    pub fn summary(&self) -> Value {
        json!({
            "api_base_url": self.api_base_url,
            "access_token_configured": !self.access_token.is_empty(),
            "debug": self.debug,
            "rate_limit_messages_per_second": self.rate_limit_messages_per_second,
            "rate_limit_api_calls_per_minute": self.rate_limit_api_calls_per_minute,
            "default_room_type": self.default_room_type,
            "default_message_format": self.default_message_format,
            "org_domain": self.org_domain,
            "validate_ssl": self.validate_ssl,
            "timeout_seconds": self.timeout_seconds,
            "log_level": self.log_filter(),
            "log_format": self.log_format.as_str(),
        })
    }
}

use deliverus_core::error::CoreError;
use deliverus_core::product::rules::{ProductRuleConfig, DEFAULT_MAX_IMAGE_BYTES};

/// Default request body limit for multipart uploads (10 MB). Kept well
/// above the image limit so oversized images reach the size rule instead
/// of being cut off by the transport.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10_000_000;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Validation configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Image limits passed to rule construction.
    pub rules: ProductRuleConfig,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules: ProductRuleConfig::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (after `.env`).
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `PRODUCT_IMAGE_MAX_BYTES` | `2000000`                |
    /// | `PRODUCT_IMAGE_TYPES`     | `image/jpeg,image/png`   |
    /// | `MAX_BODY_BYTES`          | `10000000`               |
    /// | `LOG_FORMAT`              | `pretty` (or `json`)     |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_image_bytes = match var("PRODUCT_IMAGE_MAX_BYTES") {
            Some(raw) => parse_var("PRODUCT_IMAGE_MAX_BYTES", "u64", &raw)?,
            None => DEFAULT_MAX_IMAGE_BYTES,
        };
        let mut rules = ProductRuleConfig::with_max_image_bytes(max_image_bytes)?;

        if let Some(raw) = var("PRODUCT_IMAGE_TYPES") {
            let types: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if types.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "PRODUCT_IMAGE_TYPES",
                    expected: "comma-separated list of MIME types",
                    value: raw,
                });
            }
            rules.allowed_image_types = types;
        }

        let max_body_bytes = match var("MAX_BODY_BYTES") {
            Some(raw) => parse_var("MAX_BODY_BYTES", "usize", &raw)?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "log format (pretty or json)",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            rules,
            max_body_bytes,
            log_format,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: raw.to_string(),
    })
}

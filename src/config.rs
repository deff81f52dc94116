use crate::error::{AppError, AppResult};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Config {
    /// Key namespace of the Spaces collection.
    #[serde(default = "default_table_name")]
    #[validate(length(min = 1, max = 255))]
    pub spaces_table_name: String,

    /// Redis store; the in-process store is used when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default)]
    pub allowed_origin: Option<String>,
    /// Distribution domain serving the web client; `https://<domain>` is the
    /// allowed origin when `ALLOWED_ORIGIN` is unset.
    #[serde(default)]
    pub cloudfront_domain: Option<String>,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub server_port: u16,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default)]
    pub jwt_public_key_pem: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default)]
    #[validate(url)]
    pub alarm_webhook_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

// Default value functions
fn default_table_name() -> String {
    "spaces".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_jwt_secret() -> String {
    "your-secret-key".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spaces_table_name: default_table_name(),
            redis_url: None,
            allowed_origin: None,
            cloudfront_domain: None,
            server_host: default_host(),
            server_port: default_port(),
            jwt_secret: default_jwt_secret(),
            jwt_public_key_pem: None,
            log_level: default_log_level(),
            log_format: default_log_format(),
            alarm_webhook_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate_all()?;
        Ok(config)
    }

    pub fn validate_all(&self) -> AppResult<()> {
        self.validate()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;

        if self.jwt_public_key_pem.is_none() && self.jwt_secret == default_jwt_secret() {
            return Err(AppError::Config(
                "JWT_SECRET must be set to a secure value".to_string(),
            ));
        }

        if let Some(origin) = self.allowed_origin() {
            let parsed = url::Url::parse(&origin).map_err(|e| {
                AppError::Config(format!("Invalid allowed origin {}: {}", origin, e))
            })?;
            if parsed.origin().ascii_serialization() != origin {
                return Err(AppError::Config(format!(
                    "Allowed origin must be a bare scheme://host[:port], got {}",
                    origin
                )));
            }
        }

        Ok(())
    }

    /// The CORS origin: `ALLOWED_ORIGIN`, else `https://<CLOUDFRONT_DOMAIN>`.
    pub fn allowed_origin(&self) -> Option<String> {
        let explicit = self
            .allowed_origin
            .as_deref()
            .map(|o| o.trim().trim_end_matches('/'))
            .filter(|o| !o.is_empty());
        if let Some(origin) = explicit {
            return Some(origin.to_string());
        }

        self.cloudfront_domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|domain| format!("https://{}", domain))
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}

/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, OAUTH_BASE_URL, OAUTH_TIMEOUT_MS など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - token service の接続設定 (OAuthConfig) は authenticator 構築時に明示的に渡す
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

pub const DEFAULT_OAUTH_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_OAUTH_TIMEOUT_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where and how long to ask the token service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl OAuthConfig {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }
}

/// Transport limits applied to every inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub oauth: OAuthConfig,
    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let base_url = lookup("OAUTH_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OAUTH_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|_| ConfigError::Invalid("OAUTH_BASE_URL"))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("OAUTH_BASE_URL"));
        }

        let timeout_ms: u64 = parse_or(&lookup, "OAUTH_TIMEOUT_MS", DEFAULT_OAUTH_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid("OAUTH_TIMEOUT_MS"));
        }

        let defaults = HttpConfig::default();
        let request_timeout_secs: u64 = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        let body_limit_bytes: usize =
            parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", defaults.body_limit_bytes)?;

        Ok(Self {
            addr,
            app_env,
            oauth: OAuthConfig::new(base_url, Duration::from_millis(timeout_ms)),
            http: HttpConfig {
                request_timeout: Duration::from_secs(request_timeout_secs),
                body_limit_bytes,
            },
        })
    }
}

// Missing → default, present but unparsable → Invalid(key)
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

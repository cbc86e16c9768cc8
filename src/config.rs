/*
 * Responsibility
 * - 環境変数や設定の読み込み (DB_*, PORT, DB_PROBE_* など)
 * - 必須値の presence チェック (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
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

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// 起動時疎通確認の失敗をどう扱うか。
/// - Advisory: ログに残して起動を継続する（既定）
/// - FailFast: エラーとして起動を中断する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    Advisory,
    FailFast,
}

impl ProbeMode {
    pub fn from_env() -> Self {
        std::env::var("DB_PROBE_MODE")
            .map(|s| Self::parse(&s))
            .unwrap_or(Self::Advisory)
    }

    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Self::FailFast,
            _ => Self::Advisory,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    // port は接続構築時に解析する。壊れた値は probe の失敗経路に乗る。
    pub port: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: require("DB_HOST")?,
            port: require("DB_PORT")?,
            username: require("DB_USER")?,
            password: require("DB_PASSWORD")?,
            database: require("DB_NAME")?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::Missing(key))
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub db: DbConfig,
    pub probe_mode: ProbeMode,
    pub probe_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();
        let db = DbConfig::from_env()?;
        let probe_mode = ProbeMode::from_env();

        let probe_timeout = std::env::var("DB_PROBE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        Ok(Self {
            addr,
            app_env,
            db,
            probe_mode,
            probe_timeout,
        })
    }
}

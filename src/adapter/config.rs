use crate::application::service::DEFAULT_STORAGE_KEY;
use crate::domain::logging::LogLevel;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// アプリケーション設定を管理する構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inventory_api_url: String,
    pub inventory_timeout: Duration,
    pub storage_path: PathBuf,
    pub storage_key: String,
    pub server_port: u16,
    pub log_level: LogLevel,
}

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl AppConfig {
    /// 環境変数から設定を読み取る
    /// 環境変数が設定されていない場合はデフォルト値を使用
    pub fn from_env() -> Result<Self, ConfigError> {
        let inventory_api_url = env::var("INVENTORY_API_URL")
            .unwrap_or_else(|_| "http://localhost:3333".to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = env::var("INVENTORY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid INVENTORY_TIMEOUT_SECS: {}", e)))?;

        let storage_path = env::var("CART_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cart_storage.json"));

        let storage_key =
            env::var("CART_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid SERVER_PORT: {}", e)))?;

        let log_level = env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse::<LogLevel>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid LOG_LEVEL: {}", e)))?;

        Ok(Self {
            inventory_api_url,
            inventory_timeout: Duration::from_secs(timeout_secs),
            storage_path,
            storage_key,
            server_port,
            log_level,
        })
    }

    /// サーバーの待ち受けアドレスを生成
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}

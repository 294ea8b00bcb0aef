//! 服务配置模块
//!
//! 配置来源按优先级从低到高：内置默认值、toml 配置文件、环境变量。
//! API 密钥只从环境变量读取，永远不会被写回配置文件。

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid listen address: {0}")]
    InvalidAddress(String),
    #[error("server.request_timeout_seconds ({server}) must be greater than llm.timeout_seconds ({llm})")]
    InvalidTimeout { server: u64, llm: u64 },
}

/// 服务总配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 外部 LLM 接口配置
    pub llm: LlmConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// 端口
    pub port: u16,
    /// 单个请求的超时时间（秒），必须大于 `llm.timeout_seconds`
    pub request_timeout_seconds: u64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 连接串，例如 `sqlite://local.db` 或 `sqlite::memory:`
    pub url: String,
    /// 连接池最大连接数
    pub max_connections: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，RUST_LOG 优先
    pub level: String,
}

/// 外部 chat-completion 接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    /// 外部调用超时时间（秒）
    pub timeout_seconds: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_seconds: 180,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://local.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "deepseek/deepseek-r1".to_string(),
            timeout_seconds: 120,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// 监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_address, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// 从 toml 文本解析配置，缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// 加载配置并应用环境变量覆盖
    ///
    /// 没有给出路径时使用默认配置。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 检查各项配置之间的约束
    ///
    /// 外部调用必须先于整个请求超时，否则超时会变成没有响应体的 408。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_seconds <= self.llm.timeout_seconds {
            return Err(ConfigError::InvalidTimeout {
                server: self.server.request_timeout_seconds,
                llm: self.llm.timeout_seconds,
            });
        }
        Ok(())
    }

    /// 用外部提供的键值覆盖配置
    ///
    /// 以闭包的形式读取变量，测试里可以不碰进程环境。
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(addr) = lookup("BIND_ADDRESS") {
            self.server.bind_address = addr;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PORT",
                value: port,
            })?;
        }
        self.llm.api_key = lookup("OPENROUTER_API_KEY").filter(|key| !key.is_empty());
        Ok(())
    }
}

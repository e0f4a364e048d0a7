//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub header: HeaderConfig,
}

/// 后端接口配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// 后端地址（不含 /api/ 前缀）
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 随请求发送的 X-CSRFToken
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// 请求超时（秒），未设置则不超时
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            timeout_secs: None,
        }
    }
}

/// 头部用户徽标样式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// 用户名首字母
    #[default]
    Username,
    /// 姓与名的首字母
    Initials,
}

/// 头部配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HeaderConfig {
    #[serde(default)]
    pub style: HeaderStyle,
}

/// 获取配置文件路径
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// 加载配置（解析失败返回错误）
pub fn try_load_config(data_dir: &Path) -> Result<Config> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}

/// 加载配置（不存在或无法解析则返回默认值）
pub fn load_config(data_dir: &Path) -> Config {
    try_load_config(data_dir).unwrap_or_else(|e| {
        tracing::warn!(path = %config_path(data_dir).display(), error = %e, "failed to load config, using defaults");
        Config::default()
    })
}

/// 保存配置
pub fn save_config(data_dir: &Path, config: &Config) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let content = toml::to_string_pretty(config)?;
    fs::write(config_path(data_dir), content)?;
    Ok(())
}

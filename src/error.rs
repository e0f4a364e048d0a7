//! taskdesk 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// taskdesk 错误类型
#[derive(Debug, Error)]
pub enum TaskdeskError {
    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON 解析错误
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 网络传输错误（连接失败、响应体无法读取等）
    #[error("HTTP error: {0}")]
    Http(String),

    /// 后端返回非 2xx 状态码
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 无效数据
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 注册时两次输入的密码不一致
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// 注册时未勾选隐私政策
    #[error("Privacy policy must be accepted")]
    PolicyNotAccepted,
}

/// taskdesk Result 类型别名
pub type Result<T> = std::result::Result<T, TaskdeskError>;

impl TaskdeskError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 Http 错误
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// 创建 NotFound 错误
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

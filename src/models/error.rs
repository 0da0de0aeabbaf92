// ============================================================================
// LocaleRelay - 错误类型
// ============================================================================
//
// 文件: src/models/error.rs
// 职责: 翻译流程中的错误分类定义
// 边界:
//   - ✅ 输入契约错误（致命，向上传播）
//   - ✅ 配置错误（致命，进程以非零状态退出）
//   - ✅ 后端错误（可恢复，在翻译适配器边界内处理）
//   - ✅ 会话 Cookie 持久化错误
//   - ❌ 不应包含错误处理策略
//   - ❌ 不应包含日志输出
//
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// 后端错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    Transport,
    HttpStatus,
    Decode,
    NotFound,
    Ambiguous,
}

/// 单次后端调用失败的原因
///
/// 这些错误在翻译适配器边界处被吸收，永远不会中断批处理。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// DNS、连接被拒绝、超时等传输层失败
    #[error("transport failure: {0}")]
    Transport(String),

    /// 服务端返回非成功状态码
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// 响应体不符合预期结构
    #[error("malformed response: {0}")]
    Decode(String),

    /// 页面中找不到结果元素
    #[error("translation not found: {0}")]
    NotFound(String),

    /// 页面给出多个同等的结果，不自动择一
    #[error("multiple translations found: {}", .0.join(" | "))]
    Ambiguous(Vec<String>),
}

impl BackendError {
    /// 获取错误类别
    pub fn kind(&self) -> BackendErrorKind {
        match self {
            BackendError::Transport(_) => BackendErrorKind::Transport,
            BackendError::HttpStatus(_) => BackendErrorKind::HttpStatus,
            BackendError::Decode(_) => BackendErrorKind::Decode,
            BackendError::NotFound(_) => BackendErrorKind::NotFound,
            BackendError::Ambiguous(_) => BackendErrorKind::Ambiguous,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => BackendError::HttpStatus(status.as_u16()),
            None => BackendError::Transport(error.to_string()),
        }
    }
}

/// 翻译适配器对调用方的契约错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// 叶子节点不是文本（布尔、数字、序列等）
    #[error("Cannot translate a [{kind}]: '{value}'")]
    InputContractViolation { kind: &'static str, value: String },
}

/// 配置与命令行输入错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine language from yaml file: '{0}'")]
    UndetectableSourceLanguage(PathBuf),

    #[error("Invalid language: '{0}'")]
    UnknownLanguage(String),

    #[error("'{0}' not found")]
    MissingFile(PathBuf),

    #[error("Invalid proxy '{0}', expected host:port or user:pass@host:port")]
    InvalidProxy(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Locale file {0} must contain a mapping at its root")]
    NotAMapping(PathBuf),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// 会话 Cookie 文件读写错误
#[derive(Error, Debug)]
pub enum CookieError {
    #[error("cookie file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cookie file {path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

// ============================================================================
// LocaleRelay - 翻译后端
// ============================================================================
//
// 文件: src/core/backend/mod.rs
// 职责: 翻译后端统一接口、请求模型、限速与工厂
// 边界:
//   - ✅ Backend trait 定义（单次请求/响应）
//   - ✅ 翻译请求数据结构
//   - ✅ 请求后限速等待
//   - ✅ 按配置构建后端
//   - ❌ 不应包含占位符处理
//   - ❌ 不应包含失败回退策略
//
// ============================================================================

pub mod http;
pub mod page;
pub mod session;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::core::cookies::CookieStore;
use crate::models::config::{BackendKind, Config};
use crate::models::error::{BackendError, ConfigError};

pub use http::HttpBackend;
pub use page::HttpPageDriver;
pub use session::{PageDriver, SessionBackend, SessionSettings};

/// 单个字符串的翻译请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_lang: String,
    target_lang: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }
}

/// 翻译后端
///
/// `Ok(None)` 表示后端明确报告没有可用译文。
#[async_trait]
pub trait Backend: Send + Sync {
    /// 后端名称
    fn name(&self) -> &'static str;

    /// 执行一次翻译请求
    async fn fetch(&self, request: &TranslationRequest) -> Result<Option<String>, BackendError>;
}

/// 每次请求后的固定等待
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 无论请求成功与否都在调用后执行
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// 根据配置构建翻译后端
pub fn create_backend(config: &Config) -> Result<Arc<dyn Backend>, ConfigError> {
    let proxy = config.proxy()?;
    let throttle = Throttle::from_secs(config.translator.sleep_time);

    info!(
        "Initializing {} backend (timeout {}s, sleep {}s)",
        config.translator.backend, config.translator.timeout, config.translator.sleep_time
    );

    match config.translator.backend {
        BackendKind::Http => {
            let backend = HttpBackend::new(
                &config.translator.endpoint,
                Duration::from_secs(config.translator.timeout),
                proxy.as_ref(),
                throttle,
            )?;
            Ok(Arc::new(backend))
        }
        BackendKind::Session => {
            let driver = HttpPageDriver::new(
                &config.session.user_agent,
                Duration::from_secs(config.translator.timeout),
                proxy.as_ref(),
            )?;
            let store = CookieStore::new(config.cookie_file());
            let settings = SessionSettings::from_config(&config.session);
            Ok(Arc::new(SessionBackend::new(driver, store, settings, throttle)))
        }
    }
}

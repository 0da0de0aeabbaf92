// ============================================================================
// LocaleRelay - 有状态会话翻译后端
// ============================================================================
//
// 文件: src/core/backend/session.rs
// 职责: 通过页面会话获取译文，并在调用之间持久化 Cookie
// 边界:
//   - ✅ 页面驱动接口（Cookie、访问、按选择器取文本）
//   - ✅ 结果元素判定（唯一 / 多个 / 性别变体 / 无结果）
//   - ✅ 每次调用前后读写 Cookie 文件
//   - ❌ 不应包含占位符处理
//   - ❌ 不应包含具体的页面获取实现
//
// ============================================================================

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{Backend, Throttle, TranslationRequest};
use crate::core::cookies::{CookieJar, CookieStore, SessionCookie};
use crate::models::config::SessionConfig;
use crate::models::error::BackendError;

/// 片段中需要转义的字符
const FRAGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'/')
    .add(b'?')
    .add(b'%')
    .add(b'&')
    .add(b'+');

/// 页面自动化引擎的最小接口
#[async_trait]
pub trait PageDriver: Send + Sync {
    fn clear_cookies(&mut self);

    fn set_cookie(&mut self, name: &str, cookie: SessionCookie);

    fn cookies(&self) -> CookieJar;

    /// 访问页面，完成后可通过 `texts` 读取内容
    async fn visit(&mut self, url: &str) -> Result<(), BackendError>;

    /// 当前页面中匹配选择器的元素文本，按文档顺序
    fn texts(&self, selector: &str) -> Result<Vec<String>, BackendError>;
}

/// 会话后端设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub base_url: String,
    pub settle_time: Duration,
    pub result_selector: String,
    pub gendered_selector: String,
}

impl SessionSettings {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            settle_time: Duration::from_millis(config.settle_time),
            result_selector: config.result_selector.clone(),
            gendered_selector: config.gendered_selector.clone(),
        }
    }

    /// `<base_url>/#<source>/<target>/<转义后的文本>`
    pub fn page_url(&self, request: &TranslationRequest) -> String {
        format!(
            "{}/#{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            request.source_lang(),
            request.target_lang(),
            utf8_percent_encode(request.text(), FRAGMENT_ENCODE_SET)
        )
    }
}

/// 有状态会话后端
pub struct SessionBackend<D> {
    driver: Mutex<D>,
    store: CookieStore,
    settings: SessionSettings,
    throttle: Throttle,
}

impl<D: PageDriver> SessionBackend<D> {
    pub fn new(driver: D, store: CookieStore, settings: SessionSettings, throttle: Throttle) -> Self {
        Self {
            driver: Mutex::new(driver),
            store,
            settings,
            throttle,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    fn restore_cookies(&self, driver: &mut D) {
        match self.store.load() {
            Ok(jar) => {
                driver.clear_cookies();
                for (name, cookie) in jar {
                    driver.set_cookie(&name, cookie);
                }
            }
            Err(e) => warn!("Could not load cookies: {}", e),
        }
    }

    fn persist_cookies(&self, driver: &D) {
        if let Err(e) = self.store.save(&driver.cookies()) {
            warn!("Could not save cookies: {}", e);
        }
    }

    /// 多个结果时返回 `Ambiguous`，由调用方保留原文
    fn extract(
        &self,
        driver: &D,
        request: &TranslationRequest,
    ) -> Result<Option<String>, BackendError> {
        let mut results = driver.texts(&self.settings.result_selector)?;

        if results.len() > 1 {
            return Err(BackendError::Ambiguous(results));
        }
        if let Some(text) = results.pop() {
            return Ok(Some(text));
        }

        // 性别变体按惯例最后一个为阳性形式
        let variants = driver.texts(&self.settings.gendered_selector)?;
        match variants.into_iter().last() {
            Some(text) => Ok(Some(text)),
            None => {
                warn!("no translation found for '{}'", request.text());
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<D: PageDriver + 'static> Backend for SessionBackend<D> {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn fetch(&self, request: &TranslationRequest) -> Result<Option<String>, BackendError> {
        let mut driver = self.driver.lock().await;
        self.restore_cookies(&mut driver);

        let url = self.settings.page_url(request);
        debug!("GET {}", url);

        let result = match driver.visit(&url).await {
            Ok(()) => {
                if !self.settings.settle_time.is_zero() {
                    tokio::time::sleep(self.settings.settle_time).await;
                }
                self.extract(&driver, request)
            }
            Err(e) => Err(e),
        };

        self.persist_cookies(&driver);
        drop(driver);
        self.throttle.pause().await;

        result
    }
}

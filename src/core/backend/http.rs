// ============================================================================
// LocaleRelay - 无状态 HTTP 翻译后端
// ============================================================================
//
// 文件: src/core/backend/http.rs
// 职责: 通过一次 HTTPS POST 请求获取译文
// 边界:
//   - ✅ 请求参数组装与超时、代理设置
//   - ✅ 状态码与传输错误分类
//   - ✅ 分段 JSON 响应拼接
//   - ❌ 不应包含占位符处理
//   - ❌ 不应吞掉错误（由翻译适配器处理）
//
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{Backend, Throttle, TranslationRequest};
use crate::models::config::ProxySettings;
use crate::models::error::{BackendError, ConfigError};

/// 无状态 HTTP 后端
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    throttle: Throttle,
}

impl HttpBackend {
    pub fn new(
        endpoint: &str,
        timeout: Duration,
        proxy: Option<&ProxySettings>,
        throttle: Throttle,
    ) -> Result<Self, ConfigError> {
        let client = build_client(timeout, proxy, None)?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            throttle,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, request: &TranslationRequest) -> Result<String, BackendError> {
        let params = [
            ("client", "gtx"),
            ("dt", "t"),
            ("sl", request.source_lang()),
            ("tl", request.target_lang()),
            ("q", request.text()),
        ];

        let response = self.client.post(&self.endpoint).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, request: &TranslationRequest) -> Result<Option<String>, BackendError> {
        debug!(
            "POST {} sl={} tl={} ({} chars)",
            self.endpoint,
            request.source_lang(),
            request.target_lang(),
            request.text().chars().count()
        );

        let result = match self.request(request).await {
            Ok(body) => extract_translation(&body),
            Err(e) => Err(e),
        };
        self.throttle.pause().await;

        result.map(Some)
    }
}

/// 拼接响应中每个分段的第一个元素
///
/// 期望结构: `[[["译文片段", "原文片段", ...], ...], ...]`
pub fn extract_translation(body: &str) -> Result<String, BackendError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;

    let segments = parsed
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| BackendError::Decode("expected a list of segments".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        let fragment = segment
            .as_array()
            .and_then(|parts| parts.first())
            .ok_or_else(|| BackendError::Decode(format!("unexpected segment: {}", segment)))?;

        match fragment {
            Value::String(text) => translated.push_str(text),
            Value::Null => {}
            other => {
                return Err(BackendError::Decode(format!(
                    "unexpected fragment: {}",
                    other
                )))
            }
        }
    }

    Ok(translated)
}

/// 构建带超时与代理的 HTTP 客户端
pub(crate) fn build_client(
    timeout: Duration,
    proxy: Option<&ProxySettings>,
    user_agent: Option<&str>,
) -> Result<reqwest::Client, ConfigError> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout);

    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent);
    }

    if let Some(settings) = proxy {
        let mut proxy = reqwest::Proxy::all(settings.url())
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        if let (Some(user), Some(pass)) = (&settings.user, &settings.pass) {
            proxy = proxy.basic_auth(user, pass);
        }
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

// ============================================================================
// LocaleRelay - 翻译适配器
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 校验输入、保护插值、调用后端，并在失败时回退为原文
// 边界:
//   - ✅ 输入类型校验（仅文本可翻译）
//   - ✅ 占位符编码 → 后端请求 → 占位符解码
//   - ✅ 后端失败时记录一次警告并返回原文
//   - ❌ 不应向调用方传播后端错误
//   - ❌ 不应包含文件读写
//
// ============================================================================

use serde_yaml::Value;
use std::sync::Arc;
use tracing::warn;

use super::backend::{Backend, TranslationRequest};
use super::placeholder;
use crate::models::error::TranslateError;

/// 单个字符串的翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// 输入为空或仅含空白，未调用后端
    Empty,
    /// 后端返回的译文（插值已还原）
    Translated(String),
    /// 后端失败，保留原文
    Fallback(String),
    /// 后端明确表示没有译文
    NoContent,
}

impl Translation {
    /// 写回文件时的文本；`NoContent` 没有文本
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translation::Empty => Some(""),
            Translation::Translated(text) | Translation::Fallback(text) => Some(text),
            Translation::NoContent => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Translation::Empty => Some(String::new()),
            Translation::Translated(text) | Translation::Fallback(text) => Some(text),
            Translation::NoContent => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Translation::Fallback(_))
    }
}

/// 翻译适配器
#[derive(Clone)]
pub struct Translator {
    backend: Arc<dyn Backend>,
}

impl Translator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// 翻译 YAML 叶子节点
    ///
    /// `null` 视为空文本；字符串以外的值违反输入契约。
    pub async fn translate_value(
        &self,
        value: &Value,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError> {
        match value {
            Value::Null => Ok(Translation::Empty),
            Value::String(text) => Ok(self.translate(text, from, to).await),
            other => Err(TranslateError::InputContractViolation {
                kind: value_kind(other),
                value: render_value(other),
            }),
        }
    }

    /// 翻译单个字符串，永不失败
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Translation {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Translation::Empty;
        }

        let (encoded, placeholders) = placeholder::encode(trimmed);
        let request = TranslationRequest::new(encoded, from, to);

        match self.backend.fetch(&request).await {
            Ok(Some(translated)) => Translation::Translated(placeholders.decode(&translated)),
            Ok(None) => Translation::NoContent,
            Err(e) => {
                warn!("Translation failed for '{}': {}", text, e);
                Translation::Fallback(text.to_string())
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Sequence(_) => "Sequence",
        Value::Mapping(_) => "Mapping",
        Value::Tagged(_) => "Tagged",
    }
}

fn render_value(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|rendered| rendered.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}

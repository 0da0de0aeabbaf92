// ============================================================================
// LocaleRelay - 批量遍历器
// ============================================================================
//
// 文件: src/core/walker.rs
// 职责: 递归翻译 YAML 映射中的每个叶子节点
// 边界:
//   - ✅ 保持键、顺序与嵌套结构
//   - ✅ 严格串行：每个字符串完成往返后再处理下一个
//   - ✅ 翻译结果统计
//   - ❌ 不应包含文件读写
//   - ❌ 不应吞掉输入契约错误
//
// ============================================================================

use serde_yaml::{Mapping, Value};
use std::future::Future;
use std::pin::Pin;

use super::translator::{Translation, Translator};
use crate::models::error::TranslateError;
use crate::ui::progress::TranslationProgress;
use crate::utils::logger::Logger;
use crate::tf;

/// 一次遍历的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// 处理过的叶子总数
    pub processed: usize,
    pub translated: usize,
    pub fallbacks: usize,
    pub empty: usize,
    pub no_content: usize,
}

impl WalkStats {
    fn record(&mut self, translation: &Translation) {
        self.processed += 1;
        match translation {
            Translation::Empty => self.empty += 1,
            Translation::Translated(_) => self.translated += 1,
            Translation::Fallback(_) => self.fallbacks += 1,
            Translation::NoContent => self.no_content += 1,
        }
    }
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<Mapping, TranslateError>> + Send + 'a>>;

/// 批量遍历器
pub struct BatchWalker<'a> {
    translator: &'a Translator,
    from: &'a str,
    to: &'a str,
    verbose: bool,
    progress: Option<&'a TranslationProgress>,
    stats: WalkStats,
}

impl<'a> BatchWalker<'a> {
    pub fn new(translator: &'a Translator, from: &'a str, to: &'a str) -> Self {
        Self {
            translator,
            from,
            to,
            verbose: false,
            progress: None,
            stats: WalkStats::default(),
        }
    }

    /// 逐条打印正在翻译的文本
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_progress(mut self, progress: &'a TranslationProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// 返回结构相同的新映射
    pub async fn walk(&mut self, mapping: &Mapping) -> Result<Mapping, TranslateError> {
        self.process(mapping).await
    }

    fn process<'b>(&'b mut self, mapping: &'b Mapping) -> WalkFuture<'b> {
        Box::pin(async move {
            let mut translated = Mapping::with_capacity(mapping.len());

            for (key, value) in mapping {
                let new_value = match value {
                    Value::Mapping(nested) => Value::Mapping(self.process(nested).await?),
                    leaf => self.leaf(leaf).await?,
                };
                translated.insert(key.clone(), new_value);
            }

            Ok(translated)
        })
    }

    async fn leaf(&mut self, value: &Value) -> Result<Value, TranslateError> {
        if let Value::String(text) = value {
            if self.verbose {
                Logger::info(tf!("walker.translating", text));
            }
            if let Some(progress) = self.progress {
                progress.tick(text);
            }
        }

        let translation = self
            .translator
            .translate_value(value, self.from, self.to)
            .await?;
        self.stats.record(&translation);

        Ok(translation.into_text().map_or(Value::Null, Value::String))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{Backend, TranslationRequest};
    use crate::models::error::BackendError;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// 将文本转为大写；"boom" 失败
    struct ShoutingBackend;

    #[async_trait]
    impl Backend for ShoutingBackend {
        fn name(&self) -> &'static str {
            "shout"
        }

        async fn fetch(
            &self,
            request: &TranslationRequest,
        ) -> Result<Option<String>, BackendError> {
            match request.text() {
                "boom" => Err(BackendError::Transport("connection refused".into())),
                "silence" => Ok(None),
                "either" => Err(BackendError::Ambiguous(vec!["uno".into(), "dos".into()])),
                text => Ok(Some(text.to_uppercase())),
            }
        }
    }

    fn translator() -> Translator {
        Translator::new(Arc::new(ShoutingBackend))
    }

    fn yaml(source: &str) -> Mapping {
        serde_yaml::from_str(source).unwrap()
    }

    #[tokio::test]
    async fn keeps_nesting_and_order() {
        let translator = translator();
        let source = yaml(
            "en:\n  greeting: hello %{name}\n  menu:\n    open: open\n    close: close\n  blank: ''\n  missing:\n",
        );

        let mut walker = BatchWalker::new(&translator, "en", "es");
        let result = walker.walk(&source).await.unwrap();

        let expected = yaml(
            "en:\n  greeting: HELLO %{name}\n  menu:\n    open: OPEN\n    close: CLOSE\n  blank: ''\n  missing: ''\n",
        );
        assert_eq!(result, expected);

        let keys: Vec<_> = result["en"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, ["greeting", "menu", "blank", "missing"]);

        let stats = walker.stats();
        assert_eq!(stats.processed, 5);
        assert_eq!(stats.translated, 3);
        assert_eq!(stats.empty, 2);
    }

    #[tokio::test]
    async fn failures_and_no_content_are_counted() {
        let translator = translator();
        let source = yaml("en:\n  a: boom\n  b: silence\n");

        let mut walker = BatchWalker::new(&translator, "en", "es");
        let result = walker.walk(&source).await.unwrap();

        assert_eq!(result, yaml("en:\n  a: boom\n  b: null\n"));
        let stats = walker.stats();
        assert_eq!(stats.fallbacks, 1);
        assert_eq!(stats.no_content, 1);
    }

    #[tokio::test]
    async fn ambiguous_results_count_as_fallbacks() {
        let translator = translator();
        let source = yaml("en:\n  a: either\n  b: fine\n");

        let mut walker = BatchWalker::new(&translator, "en", "es");
        let result = walker.walk(&source).await.unwrap();

        assert_eq!(result, yaml("en:\n  a: either\n  b: FINE\n"));
        let stats = walker.stats();
        assert_eq!(stats.fallbacks, 1);
        assert_eq!(stats.translated, 1);
    }

    #[tokio::test]
    async fn contract_violation_halts_the_walk() {
        let translator = translator();
        let source = yaml("en:\n  enabled: true\n  after: never reached\n");

        let mut walker = BatchWalker::new(&translator, "en", "es");
        let error = walker.walk(&source).await.unwrap_err();

        assert!(matches!(
            error,
            TranslateError::InputContractViolation { kind: "Bool", .. }
        ));
        assert_eq!(walker.stats().processed, 0);
    }

    #[tokio::test]
    async fn progress_counts_string_leaves() {
        let translator = translator();
        let progress = TranslationProgress::hidden();
        let source = yaml("en:\n  a: one\n  b: two\n");

        let mut walker = BatchWalker::new(&translator, "en", "es").with_progress(&progress);
        walker.walk(&source).await.unwrap();

        assert_eq!(progress.position(), 2);
    }
}

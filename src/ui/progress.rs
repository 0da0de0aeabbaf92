// ============================================================================
// LocaleRelay - 翻译进度显示组件
// ============================================================================
//
// 文件: src/ui/progress.rs
// 职责: 批量翻译过程中的终端进度显示
// 边界:
//   - ✅ spinner 显示与计数
//   - ✅ 非终端或关闭时完全静默
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含统计汇总
//
// ============================================================================

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::utils::constants::spinner_chars;

/// 已翻译字符串计数 spinner
pub struct TranslationProgress {
    bar: ProgressBar,
}

impl TranslationProgress {
    /// 仅在 stdout 为终端且 `enabled` 时可见
    pub fn new(enabled: bool) -> Self {
        if !enabled || !atty::is(atty::Stream::Stdout) {
            return Self::hidden();
        }

        let style = ProgressStyle::with_template("{spinner:.cyan} {pos} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(spinner_chars::BASE);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// 记录一个已处理的字符串
    pub fn tick(&self, text: &str) {
        self.bar.inc(1);
        self.bar.set_message(preview(text));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// 单行预览，最多 40 个字符
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > 40 {
        let cut: String = line.chars().take(39).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}

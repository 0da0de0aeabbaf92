// ============================================================================
// LocaleRelay - 翻译结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 批量翻译结束后的统计汇总显示
// 边界:
//   - ✅ 统计信息格式化输出
//   - ✅ 国际化文本支持
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::io::{self, Write};
use std::time::Duration;

use crate::core::walker::WalkStats;
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::tf;

/// 汇总行，不含颜色
pub fn summary_lines(stats: &WalkStats, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", icons::SUCCESS, tf!("summary.translated", stats.translated)),
    ];

    if stats.fallbacks > 0 {
        lines.push(format!("{} {}", icons::WARNING, tf!("summary.fallbacks", stats.fallbacks)));
    }
    if stats.no_content > 0 {
        lines.push(format!("{} {}", icons::SKIP, tf!("summary.no_content", stats.no_content)));
    }
    if stats.empty > 0 {
        lines.push(format!("{} {}", icons::SKIP, tf!("summary.empty", stats.empty)));
    }

    lines.push(format!(
        "{} {}",
        icons::TIME,
        tf!(
            "summary.processed",
            stats.processed,
            format!("{:.3}", elapsed.as_secs_f64())
        )
    ));
    lines
}

/// 渲染翻译汇总
pub fn render_translation_summary(stats: &WalkStats, elapsed: Duration) {
    let mut lines = summary_lines(stats, elapsed);
    let total = lines.pop();

    for line in lines {
        Logger::info(line);
    }
    if let Some(total) = total {
        Logger::info(Colors::warn(&total));
    }

    let _ = io::stdout().flush();
}

// ============================================================================
// LocaleRelay - 语言列表命令处理
// ============================================================================
//
// 文件: src/cli/languages.rs
// 职责: 列出翻译服务支持的语言
// 边界:
//   - ✅ 语言表格式化输出
//   - ❌ 不应包含语言表定义
//
// ============================================================================

use anyhow::Result;

use crate::models::language;
use crate::tf;
use crate::utils::logger::Logger;

/// 处理语言列表命令
pub fn handle_languages() -> Result<()> {
    Logger::info(tf!("languages.header", language::list().len()));
    print_language_list();
    Ok(())
}

/// 每行一个语言：名称与代码
pub fn print_language_list() {
    for line in language_lines() {
        println!("{}", line);
    }
}

fn language_lines() -> Vec<String> {
    language::list()
        .iter()
        .map(|(name, code)| format!("  {:<24} {}", name, code))
        .collect()
}

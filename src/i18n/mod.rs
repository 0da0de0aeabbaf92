// ============================================================================
// LocaleRelay - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 界面文本国际化支持
// 边界:
//   - ✅ 翻译表查找
//   - ✅ 翻译宏定义和实现
//   - ✅ 界面语言设置（进程启动时设置一次）
//   - ✅ 参数化翻译支持
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

use std::sync::OnceLock;

static UI_LANGUAGE: OnceLock<String> = OnceLock::new();

/// 设置界面语言；仅第一次调用生效
pub fn set_language(language: &str) {
    let _ = UI_LANGUAGE.set(language.to_string());
}

/// 当前界面语言，默认 en_us
pub fn current_language() -> &'static str {
    UI_LANGUAGE.get().map(String::as_str).unwrap_or("en_us")
}

/// 获取翻译文本
pub fn get_translation(key: &str) -> String {
    let translation_data = match current_language() {
        "zh_cn" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS,
    };

    let found = translation_data
        .iter()
        .chain(en_us::TRANSLATIONS.iter())
        .find(|(k, _)| *k == key);

    match found {
        Some((_, v)) => v.to_string(),
        None => format!("Unknown translation key: {}", key),
    }
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 带参数翻译的辅助函数
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = template;
    let mut search_from = 0;
    for arg in args.iter() {
        // 替换下一个 {} 占位符，参数本身的内容不再参与匹配
        match result[search_from..].find("{}") {
            Some(offset) => {
                let pos = search_from + offset;
                result.replace_range(pos..pos + 2, arg);
                search_from = pos + arg.len();
            }
            None => break,
        }
    }
    result
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_placeholders_in_order() {
        assert_eq!(
            format_with_args("{} of {}".into(), vec!["1".into(), "2".into()]),
            "1 of 2"
        );
    }

    #[test]
    fn arguments_containing_braces_are_not_refilled() {
        assert_eq!(
            format_with_args("[{}] then {}".into(), vec!["{}".into(), "x".into()]),
            "[{}] then x"
        );
    }

    #[test]
    fn every_key_has_both_languages() {
        for (key, _) in en_us::TRANSLATIONS {
            assert!(
                zh_cn::TRANSLATIONS.iter().any(|(k, _)| k == key),
                "missing zh_cn key {}",
                key
            );
        }
        assert_eq!(en_us::TRANSLATIONS.len(), zh_cn::TRANSLATIONS.len());
    }

    #[test]
    fn unknown_key_is_reported() {
        assert_eq!(
            get_translation("no.such.key"),
            "Unknown translation key: no.such.key"
        );
    }
}

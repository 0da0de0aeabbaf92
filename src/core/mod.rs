// ============================================================================
// LocaleRelay - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心翻译逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod backend;
pub mod cookies;
pub mod locale;
pub mod placeholder;
pub mod translator;
pub mod walker;

// 重新导出常用类型
pub use backend::{create_backend, Backend, TranslationRequest};
pub use cookies::{CookieJar, CookieStore, SessionCookie};
pub use locale::{replace_lang_key, LocaleFile};
pub use translator::{Translation, Translator};
pub use walker::{BatchWalker, WalkStats};

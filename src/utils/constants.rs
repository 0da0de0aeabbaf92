// ============================================================================
// LocaleRelay - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量和默认值定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 像素图标字符定义
//   - ✅ 后端默认地址与选择器定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "LocaleRelay";

/// 日志前缀
pub const LOG_TAG: &str = "[LOCALE-RELAY]";

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "locale-relay.toml";

/// 用户状态目录名
pub const STATE_DIR_NAME: &str = "locale-relay";

/// 会话 Cookie 文件名
pub const COOKIE_FILE_NAME: &str = "cookies.yml";

/// 后端默认值
pub mod defaults {
    /// 无状态翻译接口
    pub const HTTP_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
    /// 会话翻译页面
    pub const SESSION_BASE_URL: &str = "https://translate.google.com";
    /// 译文元素
    pub const RESULT_SELECTOR: &str = "span.tlid-translation";
    /// 性别变体译文元素
    pub const GENDERED_SELECTOR: &str = "span.tlid-translation-gender-indicator";
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_3) AppleWebKit/601.4.4 (KHTML, like Gecko) Version/9.0.3 Safari/601.4.4";
}

/// 像素风格图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 时间图标
    pub const TIME: &str = "⧖";
    /// 箭头图标
    pub const ARROW: &str = "→";
    /// 跳过图标
    pub const SKIP: &str = "○";
}

/// 加载 spinner 字符
pub mod spinner_chars {
    pub const BASE: &str = "⠋⠙⠹⠸⠼⠴⠦⠧ ";
}

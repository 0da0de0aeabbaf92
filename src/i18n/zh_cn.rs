// ============================================================================
// LocaleRelay - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 翻译命令
    ("translate.start", "启动 {} v{} @{}"),
    ("translate.valid_languages", "可用语言:"),
    ("translate.direction", "翻译 {} {} {}，使用 {} 后端"),
    ("translate.written", "已写入 {}"),
    // 遍历
    ("walker.translating", "正在翻译 [{}]"),
    // 汇总
    ("summary.processed", "共处理 {} 个字符串，耗时 [{}] 秒。"),
    ("summary.translated", "已翻译: {}"),
    ("summary.fallbacks", "失败后保留原文: {}"),
    ("summary.no_content", "无译文: {}"),
    ("summary.empty", "空值: {}"),
    // 语言列表命令
    ("languages.header", "支持的语言（{}）:"),
    // 初始化命令
    ("init.start", "正在初始化配置文件..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 覆盖已存在的文件"),
    ("init.config_created", "已创建配置文件: {}"),
    (
        "init.next_steps",
        "编辑该文件后运行: locale-relay translate -y <文件> -l <语言>",
    ),
    ("init.create_failed", "创建配置文件失败: {}"),
];

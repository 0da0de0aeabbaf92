// ============================================================================
// LocaleRelay - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 配置、错误与语言表模型导出
// 边界:
//   - ✅ 模型子模块导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod config;
pub mod error;
pub mod language;

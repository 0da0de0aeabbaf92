// ============================================================================
// LocaleRelay - 工具模块
// ============================================================================
//
// 文件: src/utils/mod.rs
// 职责: 常量、颜色与日志工具导出
// 边界:
//   - ✅ 工具子模块导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod colors;
pub mod constants;
pub mod logger;

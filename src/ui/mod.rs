// ============================================================================
// LocaleRelay - UI 模块
// ============================================================================
//
// 文件: src/ui/mod.rs
// 职责: 终端进度与汇总显示组件导出
// 边界:
//   - ✅ UI 子模块导出
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

pub mod progress;
pub mod summary;

// ============================================================================
// LocaleRelay - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 启动异步运行时并执行 CLI
// 边界:
//   - ✅ 错误输出与退出码
//   - ❌ 不应包含命令实现
//
// ============================================================================

use locale_relay::cli::run_cli;
use locale_relay::utils::logger::Logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run_cli().await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

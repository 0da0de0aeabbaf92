// ============================================================================
// LocaleRelay - 初始化命令处理
// ============================================================================
//
// 文件: src/cli/init.rs
// 职责: 处理配置文件初始化命令
// 边界:
//   - ✅ 初始化命令参数解析
//   - ✅ 默认配置文件生成
//   - ✅ 配置文件存在性检查
//   - ❌ 不应包含配置文件格式定义
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::models::config::Config;
use crate::utils::constants::CONFIG_FILE_NAME;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 初始化命令参数
#[derive(Debug, Args)]
pub struct InitArgs {
    /// 强制覆盖已存在的配置文件
    #[arg(short, long)]
    pub force: bool,
}

/// 处理初始化命令；写入 `--config` 指定的路径或默认文件
pub fn handle_init(args: InitArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    Logger::info(t!("init.start"));

    if !write_default_config(&config_path, args.force)? {
        Logger::warn(tf!("init.config_exists", config_path.display()));
        Logger::info(t!("init.use_force_hint"));
        return Ok(());
    }

    Logger::success(tf!("init.config_created", config_path.display()));
    Logger::info(t!("init.next_steps"));
    Ok(())
}

/// 返回是否写入了文件
fn write_default_config(config_path: &Path, force: bool) -> Result<bool> {
    if config_path.exists() && !force {
        return Ok(false);
    }

    if let Err(e) = Config::create_default_config_file(config_path) {
        Logger::error(tf!("init.create_failed", e));
        return Err(e);
    }
    Ok(true)
}

// ============================================================================
// LocaleRelay - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 配置加载、运行时参数合并与命令路由分发
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

pub mod init;
pub mod languages;
pub mod translate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::i18n;
use crate::models::config::{Config, RuntimeArgs};
use crate::utils::colors::Colors;
use crate::utils::logger::init_tracing;
use init::{handle_init, InitArgs};
use languages::handle_languages;
use translate::{handle_translate, TranslateArgs};

/// LocaleRelay - Batch translator for YAML locale files
#[derive(Debug, Parser)]
#[command(name = "locale-relay")]
#[command(about = "Batch translator for YAML locale files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Print every string as it is translated
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Interface language (en_us, zh_cn)
    #[arg(long, global = true)]
    pub ui_language: Option<String>,

    /// Configuration file (defaults to ./locale-relay.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate a YAML locale file into another language
    Translate(TranslateArgs),
    /// List supported languages
    Languages,
    /// Initialize configuration file
    Init(InitArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // init 只写文件，不读取已有配置
    let config = match &cli.command {
        Commands::Init(_) => {
            let mut config = Config::default();
            config.merge_runtime_args(build_runtime_args(&cli));
            config
        }
        _ => {
            let mut config = Config::load(cli.config.as_deref())?;
            config.merge_runtime_args(build_runtime_args(&cli));
            config
        }
    };

    i18n::set_language(&config.i18n.language);
    Colors::set_enabled(config.output.colored);
    init_tracing(config.output.verbose, config.output.colored);

    match cli.command {
        Commands::Translate(args) => handle_translate(args, config).await,
        Commands::Languages => handle_languages(),
        Commands::Init(args) => handle_init(args, cli.config),
    }
}

/// Build runtime args from global CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        language: cli.ui_language.clone(),
        ..RuntimeArgs::default()
    }
}

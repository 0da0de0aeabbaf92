// ============================================================================
// LocaleRelay - 翻译命令处理
// ============================================================================
//
// 文件: src/cli/translate.rs
// 职责: 处理 translate 命令：校验参数、遍历翻译、写出结果
// 边界:
//   - ✅ 翻译命令参数定义与校验
//   - ✅ 后端构建与批量遍历编排
//   - ✅ 开始横幅与结束汇总
//   - ❌ 不应包含占位符或后端实现细节
//
// ============================================================================

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use super::languages::print_language_list;
use crate::core::backend::create_backend;
use crate::core::locale::{replace_lang_key, LocaleFile};
use crate::core::translator::Translator;
use crate::core::walker::BatchWalker;
use crate::models::config::{BackendKind, Config, RuntimeArgs};
use crate::models::error::ConfigError;
use crate::models::language;
use crate::ui::progress::TranslationProgress;
use crate::ui::summary::render_translation_summary;
use crate::utils::constants::{icons, APP_NAME};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 翻译命令参数
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// A YAML locale file named after its language, e.g. en.yml
    #[arg(short = 'y', long)]
    pub yaml_file: PathBuf,

    /// Target language, as a name or a code (e.g. Spanish or es)
    #[arg(short, long)]
    pub lang: String,

    /// Seconds to wait after each request
    #[arg(short, long)]
    pub sleep_time: Option<u64>,

    /// Connect and read timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Proxy, host:port or user:pass@host:port
    #[arg(short, long)]
    pub proxy: Option<String>,

    /// Translation backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendKind>,
}

/// 处理翻译命令
pub async fn handle_translate(args: TranslateArgs, mut config: Config) -> Result<()> {
    let target = match language::ensure_code(&args.lang) {
        Ok(code) => code,
        Err(e) => {
            Logger::info(t!("translate.valid_languages"));
            print_language_list();
            return Err(e.into());
        }
    };

    if !args.yaml_file.exists() {
        return Err(ConfigError::MissingFile(args.yaml_file).into());
    }

    Logger::info(tf!(
        "translate.start",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%H:%M:%S%.3f")
    ));

    config.merge_runtime_args(RuntimeArgs {
        backend: args.backend,
        sleep_time: args.sleep_time,
        timeout: args.timeout,
        proxy: args.proxy,
        ..RuntimeArgs::default()
    });

    let file = LocaleFile::detect(&args.yaml_file)?;
    let source = file.source_lang().to_string();
    let mapping = file.load()?;

    let translator = Translator::new(create_backend(&config)?);
    Logger::info(tf!(
        "translate.direction",
        source,
        icons::ARROW,
        target,
        translator.backend_name()
    ));

    let progress = TranslationProgress::new(config.output.show_progress && !config.output.verbose);
    let started = Instant::now();

    let mut walker = BatchWalker::new(&translator, &source, target)
        .verbose(config.output.verbose)
        .with_progress(&progress);
    let result = walker.walk(&mapping).await;
    progress.finish();
    let translated = result?;

    let output = file.store(target, &replace_lang_key(translated, &source, target))?;
    Logger::success(tf!("translate.written", output.display()));
    render_translation_summary(&walker.stats(), started.elapsed());

    Ok(())
}

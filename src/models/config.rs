// ============================================================================
// LocaleRelay - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值与运行时参数合并
//   - ✅ 配置文件读写操作
//   - ✅ 代理字符串解析
//   - ❌ 不应包含进程级全局状态（配置对象显式传递）
//   - ❌ 不应包含 CLI 参数定义
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::error::ConfigError;
use crate::utils::constants::{defaults, CONFIG_FILE_NAME, COOKIE_FILE_NAME, STATE_DIR_NAME};

/// LocaleRelay 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 翻译后端配置
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// 会话后端配置
    #[serde(default)]
    pub session: SessionConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 翻译后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// 使用的后端
    #[serde(default)]
    pub backend: BackendKind,
    /// HTTP 后端地址
    #[serde(default = "Config::default_endpoint")]
    pub endpoint: String,
    /// 每次请求后的等待时间（秒）
    #[serde(default = "Config::default_sleep_time")]
    pub sleep_time: u64,
    /// 连接与读取超时（秒）
    #[serde(default = "Config::default_timeout")]
    pub timeout: u64,
    /// 代理 host:port 或 user:pass@host:port
    #[serde(default)]
    pub proxy: Option<String>,
}

/// 会话后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 翻译页面地址
    #[serde(default = "Config::default_base_url")]
    pub base_url: String,
    /// Cookie 文件路径（为空时使用用户配置目录）
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
    /// 页面加载后的等待时间（毫秒）
    #[serde(default = "Config::default_settle_time")]
    pub settle_time: u64,
    /// 译文元素选择器
    #[serde(default = "Config::default_result_selector")]
    pub result_selector: String,
    /// 性别变体译文元素选择器
    #[serde(default = "Config::default_gendered_selector")]
    pub gendered_selector: String,
    /// 浏览器标识
    #[serde(default = "Config::default_user_agent")]
    pub user_agent: String,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否显示进度
    #[serde(default = "Config::default_show_progress")]
    pub show_progress: bool,
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub language: Option<String>,
    pub backend: Option<BackendKind>,
    pub sleep_time: Option<u64>,
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
}

/// 翻译后端类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// 无状态 HTTP 接口
    #[default]
    Http,
    /// 带 Cookie 的页面会话
    Session,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Http => "http",
            BackendKind::Session => "session",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 解析后的代理设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub addr: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl ProxySettings {
    /// 解析 `host:port` 或 `user:pass@host:port`
    pub fn parse(proxy: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidProxy(proxy.to_string());

        let (auth, host_port) = match proxy.split_once('@') {
            Some((auth, host_port)) => (Some(auth), host_port),
            None => (None, proxy),
        };

        let (addr, port) = host_port.split_once(':').ok_or_else(invalid)?;
        if addr.is_empty() {
            return Err(invalid());
        }
        let port = port.parse::<u16>().map_err(|_| invalid())?;

        let (user, pass) = match auth {
            Some(auth) => {
                let (user, pass) = auth.split_once(':').unwrap_or((auth, ""));
                (Some(user.to_string()), Some(pass.to_string()))
            }
            None => (None, None),
        };

        Ok(Self {
            addr: addr.to_string(),
            port,
            user,
            pass,
        })
    }

    /// 代理 URL（不含认证信息）
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.addr, self.port)
    }
}

/// 配置默认值 trait - 不依赖配置文件
pub trait ConfigDefaults {
    fn default_endpoint() -> String {
        defaults::HTTP_ENDPOINT.to_string()
    }

    fn default_sleep_time() -> u64 {
        2
    }

    fn default_timeout() -> u64 {
        30
    }

    fn default_base_url() -> String {
        defaults::SESSION_BASE_URL.to_string()
    }

    fn default_settle_time() -> u64 {
        1500
    }

    fn default_result_selector() -> String {
        defaults::RESULT_SELECTOR.to_string()
    }

    fn default_gendered_selector() -> String {
        defaults::GENDERED_SELECTOR.to_string()
    }

    fn default_user_agent() -> String {
        defaults::USER_AGENT.to_string()
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_colored() -> bool {
        true
    }

    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 加载配置文件；未指定路径且默认文件不存在时使用默认配置
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config_path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE_NAME), false),
        };

        if !config_path.exists() {
            if required {
                return Err(ConfigError::MissingFile(config_path));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::InvalidConfig {
            path: config_path,
            source,
        })
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
        if let Some(backend) = args.backend {
            self.translator.backend = backend;
        }
        if let Some(sleep_time) = args.sleep_time {
            self.translator.sleep_time = sleep_time;
        }
        if let Some(timeout) = args.timeout {
            self.translator.timeout = timeout;
        }
        if let Some(proxy) = args.proxy {
            self.translator.proxy = Some(proxy);
        }
    }

    /// 解析代理设置
    pub fn proxy(&self) -> Result<Option<ProxySettings>, ConfigError> {
        self.translator
            .proxy
            .as_deref()
            .filter(|proxy| !proxy.trim().is_empty())
            .map(ProxySettings::parse)
            .transpose()
    }

    /// Cookie 文件路径
    pub fn cookie_file(&self) -> PathBuf {
        if let Some(path) = &self.session.cookie_file {
            return path.clone();
        }
        state_directory().join(COOKIE_FILE_NAME)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::default().save_to_file(config_path)
    }
}

/// 用户级状态目录
fn state_directory() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join(STATE_DIR_NAME);
    }
    match dirs::home_dir() {
        Some(home) => home.join(format!(".{}", STATE_DIR_NAME)),
        None => PathBuf::from(format!(".{}", STATE_DIR_NAME)),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            session: SessionConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            endpoint: Config::default_endpoint(),
            sleep_time: Config::default_sleep_time(),
            timeout: Config::default_timeout(),
            proxy: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: Config::default_base_url(),
            cookie_file: None,
            settle_time: Config::default_settle_time(),
            result_selector: Config::default_result_selector(),
            gendered_selector: Config::default_gendered_selector(),
            user_agent: Config::default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: false,
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.translator.timeout, 30);
        assert_eq!(config.translator.sleep_time, 2);
        assert_eq!(config.translator.backend, BackendKind::Http);
        assert!(config.translator.proxy.is_none());
    }

    #[test]
    fn runtime_args_override_file_values() {
        let mut config = Config::default();
        config.merge_runtime_args(RuntimeArgs {
            timeout: Some(60),
            sleep_time: Some(0),
            backend: Some(BackendKind::Session),
            ..Default::default()
        });
        assert_eq!(config.translator.timeout, 60);
        assert_eq!(config.translator.sleep_time, 0);
        assert_eq!(config.translator.backend, BackendKind::Session);
        assert!(config.output.colored);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[translator]\ntimeout = 45\n").unwrap();
        assert_eq!(config.translator.timeout, 45);
        assert_eq!(config.translator.sleep_time, 2);
        assert_eq!(config.session.settle_time, 1500);
    }

    #[test]
    fn parses_plain_proxy() {
        let proxy = ProxySettings::parse("10.0.0.1:8080").unwrap();
        assert_eq!(proxy.addr, "10.0.0.1");
        assert_eq!(proxy.port, 8080);
        assert!(proxy.user.is_none());
        assert_eq!(proxy.url(), "http://10.0.0.1:8080");
    }

    #[test]
    fn parses_authenticated_proxy() {
        let proxy = ProxySettings::parse("bob:s3cr:et@proxy.local:3128").unwrap();
        assert_eq!(proxy.user.as_deref(), Some("bob"));
        assert_eq!(proxy.pass.as_deref(), Some("s3cr:et"));
        assert_eq!(proxy.addr, "proxy.local");
        assert_eq!(proxy.port, 3128);
    }

    #[test]
    fn rejects_proxy_without_port() {
        assert!(matches!(
            ProxySettings::parse("proxy.local"),
            Err(ConfigError::InvalidProxy(_))
        ));
    }

    #[test]
    fn explicit_cookie_file_wins() {
        let mut config = Config::default();
        config.session.cookie_file = Some(PathBuf::from("/tmp/jar.yml"));
        assert_eq!(config.cookie_file(), PathBuf::from("/tmp/jar.yml"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/locale-relay.toml")));
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }
}

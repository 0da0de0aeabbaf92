// ============================================================================
// LocaleRelay - 本地化文件
// ============================================================================
//
// 文件: src/core/locale.rs
// 职责: 本地化 YAML 文件的语言识别、读取与写出
// 边界:
//   - ✅ 从文件名识别源语言（<xx>.yml / <xx>.yaml）
//   - ✅ 输出文件路径（同目录、同扩展名）
//   - ✅ 顶层语言键替换
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

use crate::models::error::ConfigError;

fn file_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\w\w)\.(ya?ml)$").expect("valid locale file pattern"))
}

/// 以语言代码命名的本地化文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    path: PathBuf,
    source_lang: String,
    extension: String,
}

impl LocaleFile {
    /// 根据文件名识别源语言
    pub fn detect(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        let caps = file_name_pattern()
            .captures(file_name)
            .ok_or_else(|| ConfigError::UndetectableSourceLanguage(path.clone()))?;
        let source_lang = caps[1].to_string();
        let extension = caps[2].to_string();

        Ok(Self {
            path,
            source_lang,
            extension,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// 同目录下的 `<target>.<扩展名>`
    pub fn output_path(&self, target: &str) -> PathBuf {
        self.path
            .with_file_name(format!("{}.{}", target, self.extension))
    }

    /// 读取文件，根节点必须是映射
    pub fn load(&self) -> Result<Mapping, ConfigError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let value: Value =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::InvalidYaml {
                path: self.path.clone(),
                source,
            })?;

        match value {
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(ConfigError::NotAMapping(self.path.clone())),
        }
    }

    /// 写出翻译结果，返回输出路径
    pub fn store(&self, target: &str, mapping: &Mapping) -> Result<PathBuf, ConfigError> {
        let output = self.output_path(target);
        let data = serde_yaml::to_string(mapping).map_err(|source| ConfigError::InvalidYaml {
            path: output.clone(),
            source,
        })?;

        std::fs::write(&output, data).map_err(|source| ConfigError::Io {
            path: output.clone(),
            source,
        })?;
        Ok(output)
    }
}

/// 若第一个顶层键等于源语言，将其改名为目标语言
///
/// 其余条目及顺序保持不变；否则原样返回。已有的同名目标键会被改名后的
/// 条目取代。
pub fn replace_lang_key(mapping: Mapping, from: &str, to: &str) -> Mapping {
    let first_is_source = mapping
        .iter()
        .next()
        .map_or(false, |(key, _)| key.as_str() == Some(from));
    if !first_is_source {
        return mapping;
    }

    let mut renamed = Mapping::with_capacity(mapping.len());
    for (index, (key, value)) in mapping.into_iter().enumerate() {
        if index == 0 {
            renamed.insert(Value::String(to.to_string()), value);
        } else if key.as_str() == Some(to) {
            warn!("Replacing existing top-level key '{}' with the translated '{}' entry", to, from);
        } else {
            renamed.insert(key, value);
        }
    }
    renamed
}

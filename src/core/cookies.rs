// ============================================================================
// LocaleRelay - 会话 Cookie 持久化
// ============================================================================
//
// 文件: src/core/cookies.rs
// 职责: 会话后端 Cookie 数据结构与磁盘读写
// 边界:
//   - ✅ Cookie 数据结构（名称 → 属性）
//   - ✅ Cookie 文件读取与写入（YAML）
//   - ✅ Set-Cookie 响应头解析
//   - ❌ 不提供跨进程加锁（同一文件只供单个进程使用）
//   - ❌ 不应包含页面访问逻辑
//
// ============================================================================

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::error::CookieError;

/// Cookie 罐：名称 → 属性
pub type CookieJar = BTreeMap<String, SessionCookie>;

/// 默认有效期（年）
const DEFAULT_LIFETIME_YEARS: i64 = 30;

/// RFC 2822 之外常见的 Expires 格式（Netscape 风格的连字符日期）
const EXPIRES_FORMATS: &[&str] = &[
    "%a, %d-%b-%Y %H:%M:%S GMT",
    "%a, %d-%b-%y %H:%M:%S GMT",
    "%A, %d-%b-%y %H:%M:%S GMT",
];

/// 单个 Cookie 的属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

impl SessionCookie {
    /// 创建一个长期有效的 Cookie
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            domain: None,
            path: None,
            secure: false,
            http_only: false,
            expires: Some(Utc::now() + Duration::days(365 * DEFAULT_LIFETIME_YEARS)),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(false, |expires| expires <= now)
    }

    /// 是否应随发往 `host` 的请求发送
    pub fn matches_host(&self, host: &str) -> bool {
        match self.domain.as_deref() {
            None => true,
            Some(domain) => {
                let domain = domain.trim_start_matches('.');
                host == domain || host.ends_with(&format!(".{}", domain))
            }
        }
    }
}

/// 解析一条 Set-Cookie 响应头
pub fn parse_set_cookie(header: &str) -> Option<(String, SessionCookie)> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut cookie = SessionCookie {
        value: value.trim().to_string(),
        domain: None,
        path: None,
        secure: false,
        http_only: false,
        expires: None,
    };
    let mut max_age = None;

    for attribute in parts {
        let (key, val) = match attribute.split_once('=') {
            Some((key, val)) => (key.trim(), val.trim()),
            None => (attribute.trim(), ""),
        };
        match key.to_ascii_lowercase().as_str() {
            "domain" if !val.is_empty() => cookie.domain = Some(val.to_string()),
            "path" if !val.is_empty() => cookie.path = Some(val.to_string()),
            "secure" => cookie.secure = true,
            "httponly" => cookie.http_only = true,
            "expires" => cookie.expires = parse_expires(val),
            "max-age" => max_age = val.parse::<i64>().ok(),
            _ => {}
        }
    }

    // Max-Age 优先于 Expires
    if let Some(seconds) = max_age {
        cookie.expires = expires_after(Utc::now(), seconds);
    }

    Some((name.to_string(), cookie))
}

fn parse_expires(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    EXPIRES_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// `now + seconds`；非正值立即过期，超出可表示范围时视为不过期
fn expires_after(now: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    if seconds <= 0 {
        return Some(now);
    }
    Duration::try_seconds(seconds).and_then(|lifetime| now.checked_add_signed(lifetime))
}

/// Cookie 文件
#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取 Cookie；文件不存在或为空时返回空罐
    pub fn load(&self) -> Result<CookieJar, CookieError> {
        if !self.path.exists() {
            return Ok(CookieJar::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| CookieError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(CookieJar::new());
        }

        let jar: Option<CookieJar> =
            serde_yaml::from_str(&content).map_err(|source| CookieError::Yaml {
                path: self.path.clone(),
                source,
            })?;
        Ok(jar.unwrap_or_default())
    }

    /// 覆盖写入 Cookie，必要时创建目录
    pub fn save(&self, jar: &CookieJar) -> Result<(), CookieError> {
        let io_error = |source| CookieError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let data = serde_yaml::to_string(jar).map_err(|source| CookieError::Yaml {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, data).map_err(io_error)
    }
}

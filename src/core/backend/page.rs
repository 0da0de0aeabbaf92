// ============================================================================
// LocaleRelay - 页面驱动
// ============================================================================
//
// 文件: src/core/backend/page.rs
// 职责: 基于 reqwest + html5ever 的最小页面驱动
// 边界:
//   - ✅ 页面获取（浏览器 User-Agent、Cookie 头）
//   - ✅ Set-Cookie 记录
//   - ✅ 简单选择器（tag / .class / tag.class.other）的文本提取
//   - ❌ 不执行脚本（片段 `#...` 不会发送给服务端）
//   - ❌ 不是通用 DOM 抓取器
//
// ============================================================================

use async_trait::async_trait;
use chrono::Utc;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use reqwest::header::{COOKIE, SET_COOKIE};
use std::time::Duration;
use tracing::debug;

use super::http::build_client;
use super::session::PageDriver;
use crate::core::cookies::{parse_set_cookie, CookieJar, SessionCookie};
use crate::models::config::ProxySettings;
use crate::models::error::{BackendError, ConfigError};

/// 通过普通 HTTP GET 访问页面的驱动
pub struct HttpPageDriver {
    client: reqwest::Client,
    cookies: CookieJar,
    page: Option<String>,
}

impl HttpPageDriver {
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        proxy: Option<&ProxySettings>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client(timeout, proxy, Some(user_agent))?,
            cookies: CookieJar::new(),
            page: None,
        })
    }

    /// 载入页面内容（不发起请求）
    pub fn load_html(&mut self, html: impl Into<String>) {
        self.page = Some(html.into());
    }

    fn cookie_header(&self, host: &str) -> Option<String> {
        let now = Utc::now();
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|(_, cookie)| !cookie.is_expired(now) && cookie.matches_host(host))
            .map(|(name, cookie)| format!("{}={}", name, cookie.value))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

#[async_trait]
impl PageDriver for HttpPageDriver {
    fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    fn set_cookie(&mut self, name: &str, cookie: SessionCookie) {
        self.cookies.insert(name.to_string(), cookie);
    }

    fn cookies(&self) -> CookieJar {
        self.cookies.clone()
    }

    async fn visit(&mut self, url: &str) -> Result<(), BackendError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| BackendError::Transport(e.to_string()))?;
        let host = parsed.host_str().unwrap_or_default().to_string();

        let mut builder = self.client.get(parsed);
        if let Some(header) = self.cookie_header(&host) {
            builder = builder.header(COOKIE, header);
        }

        self.page = None;
        let response = builder.send().await?;

        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            if let Some((name, mut cookie)) = parse_set_cookie(raw) {
                if cookie.domain.is_none() {
                    cookie.domain = Some(host.clone());
                }
                debug!("Received cookie {}", name);
                self.cookies.insert(name, cookie);
            }
        }

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        self.page = Some(body);
        Ok(())
    }

    fn texts(&self, selector: &str) -> Result<Vec<String>, BackendError> {
        let selector = Selector::parse(selector)
            .ok_or_else(|| BackendError::NotFound(format!("unsupported selector '{}'", selector)))?;
        let page = self
            .page
            .as_deref()
            .ok_or_else(|| BackendError::NotFound("no page loaded".to_string()))?;

        let dom = parse_html(page)?;
        let mut found = Vec::new();
        collect_matches(&dom.document, &selector, &mut found);
        Ok(found)
    }
}

fn parse_html(html: &str) -> Result<RcDom, BackendError> {
    let mut input = html.as_bytes();
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut input)
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// `tag`、`.class` 或 `tag.class.other`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        let mut parts = selector.split('.');
        let tag = match parts.next()? {
            "" => None,
            tag if valid(tag) => Some(tag.to_ascii_lowercase()),
            _ => return None,
        };

        let mut classes = Vec::new();
        for class in parts {
            if !valid(class) {
                return None;
            }
            classes.push(class.to_string());
        }

        if tag.is_none() && classes.is_empty() {
            return None;
        }
        Some(Self { tag, classes })
    }

    fn matches(&self, node: &Handle) -> bool {
        let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = node.data
        else {
            return false;
        };

        if let Some(tag) = &self.tag {
            if &*name.local != tag.as_str() {
                return false;
            }
        }

        if self.classes.is_empty() {
            return true;
        }

        let attrs = attrs.borrow();
        let Some(class_attr) = attrs.iter().find(|attr| &*attr.name.local == "class")
        else {
            return false;
        };
        let present: Vec<&str> = class_attr.value.split_whitespace().collect();
        self.classes
            .iter()
            .all(|class| present.contains(&class.as_str()))
    }
}

/// 按文档顺序收集匹配元素的非空文本
fn collect_matches(node: &Handle, selector: &Selector, found: &mut Vec<String>) {
    if selector.matches(node) {
        let mut text = String::new();
        collect_text(node, &mut text);
        let text = text.trim();
        if !text.is_empty() {
            found.push(text.to_string());
        }
    }

    for child in node.children.borrow().iter() {
        collect_matches(child, selector, found);
    }
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_with(html: &str) -> HttpPageDriver {
        let mut driver =
            HttpPageDriver::new("test-agent", Duration::from_secs(5), None).unwrap();
        driver.load_html(html);
        driver
    }

    #[test]
    fn parses_supported_selectors() {
        assert_eq!(
            Selector::parse("span.tlid-translation"),
            Some(Selector {
                tag: Some("span".into()),
                classes: vec!["tlid-translation".into()],
            })
        );
        assert_eq!(
            Selector::parse(".a.b").map(|s| s.classes),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(Selector::parse("div").is_some());
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("div > span").is_none());
        assert!(Selector::parse("span..x").is_none());
    }

    #[test]
    fn extracts_text_of_matching_elements() {
        let driver = driver_with(
            r#"<html><body>
                <span class="tlid-translation translation"><span>Hola</span> mundo</span>
                <span class="other">ignored</span>
            </body></html>"#,
        );
        assert_eq!(
            driver.texts("span.tlid-translation").unwrap(),
            vec!["Hola mundo".to_string()]
        );
        assert_eq!(driver.texts(".other").unwrap(), vec!["ignored".to_string()]);
    }

    #[test]
    fn returns_every_match_in_document_order() {
        let driver = driver_with(
            r#"<div class="g">femenino</div><div class="g">masculino</div>"#,
        );
        assert_eq!(
            driver.texts("div.g").unwrap(),
            vec!["femenino".to_string(), "masculino".to_string()]
        );
    }

    #[test]
    fn no_match_is_an_empty_list() {
        let driver = driver_with("<p>nothing here</p>");
        assert!(driver.texts("span.tlid-translation").unwrap().is_empty());
    }

    #[test]
    fn texts_without_a_page_is_not_found() {
        let driver = HttpPageDriver::new("test-agent", Duration::from_secs(5), None).unwrap();
        let error = driver.texts("span").unwrap_err();
        assert!(matches!(error, BackendError::NotFound(_)));
    }

    #[test]
    fn cookie_header_only_carries_live_matching_cookies() {
        let mut driver = driver_with("");
        driver.set_cookie("NID", SessionCookie::new("1").with_domain(".google.com"));
        driver.set_cookie("other", SessionCookie::new("2").with_domain("example.org"));
        let mut stale = SessionCookie::new("3");
        stale.expires = Some(Utc::now() - chrono::Duration::days(1));
        driver.set_cookie("stale", stale);

        assert_eq!(
            driver.cookie_header("translate.google.com").as_deref(),
            Some("NID=1")
        );
        assert!(driver.cookie_header("nowhere.net").is_none());
    }
}

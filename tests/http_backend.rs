// ============================================================================
// LocaleRelay - HTTP 后端集成测试
// ============================================================================

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{form_param, refused_url, LogCapture, MockServer};
use locale_relay::core::backend::{HttpBackend, Throttle};
use locale_relay::core::translator::{Translation, Translator};

fn translator(endpoint: &str) -> Translator {
    let backend = HttpBackend::new(
        endpoint,
        Duration::from_secs(5),
        None,
        Throttle::from_secs(0),
    )
    .unwrap();
    Translator::new(Arc::new(backend))
}

#[tokio::test]
async fn sends_form_parameters_and_restores_placeholders() {
    let server = MockServer::fixed(200, r#"[[["hola VAR0","hello VAR0",null,null,10]],null,"en"]"#).await;
    let translator = translator(&server.url);

    let result = translator.translate("hello %{name}", "en", "es").await;
    assert_eq!(result, Translation::Translated("hola %{name}".into()));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(form_param(body, "client").as_deref(), Some("gtx"));
    assert_eq!(form_param(body, "dt").as_deref(), Some("t"));
    assert_eq!(form_param(body, "sl").as_deref(), Some("en"));
    assert_eq!(form_param(body, "tl").as_deref(), Some("es"));
    assert_eq!(form_param(body, "q").as_deref(), Some("hello VAR0"));
}

#[tokio::test]
async fn joins_multi_segment_responses() {
    let server = MockServer::fixed(
        200,
        r#"[[["primera parte ","first part "],["segunda parte","second part"]]]"#,
    )
    .await;
    let translator = translator(&server.url);

    let result = translator
        .translate("first part second part", "en", "es")
        .await;
    assert_eq!(
        result,
        Translation::Translated("primera parte segunda parte".into())
    );
}

#[tokio::test]
async fn refused_connection_falls_back_with_one_warning() {
    let logs = LogCapture::default();
    let _guard = logs.install();
    let translator = translator(&refused_url().await);

    let result = translator.translate("hello", "en", "es").await;

    assert_eq!(result, Translation::Fallback("hello".into()));
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("Translation failed for 'hello'"));
}

#[tokio::test]
async fn error_status_falls_back_with_one_warning() {
    let logs = LogCapture::default();
    let _guard = logs.install();
    let server = MockServer::fixed(503, "Service Unavailable").await;
    let translator = translator(&server.url);

    let result = translator.translate("hello %{name}", "en", "es").await;

    assert_eq!(result, Translation::Fallback("hello %{name}".into()));
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("HTTP 503"));
}

#[tokio::test]
async fn non_json_body_falls_back_with_one_warning() {
    let logs = LogCapture::default();
    let _guard = logs.install();
    let server = MockServer::fixed(200, "<html>captcha</html>").await;
    let translator = translator(&server.url);

    let result = translator.translate("hello", "en", "es").await;

    assert_eq!(result, Translation::Fallback("hello".into()));
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("malformed response"));
}

#[tokio::test]
async fn blank_text_never_reaches_the_server() {
    let server = MockServer::fixed(200, r#"[[["x","y"]]]"#).await;
    let translator = translator(&server.url);

    assert_eq!(translator.translate("   ", "en", "es").await, Translation::Empty);
    assert!(server.requests().is_empty());
}

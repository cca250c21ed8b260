use cachet::http::outcome::Outcome;
use cachet::http::request::Method;
use cachet::http::response::{render, ResponseBuilder, ResponseContext, StatusCode};
use cachet::http::writer::serialize_response;

const NOW: &str = "Sat, 17 Oct 2026 10:00:00 GMT";
const STAMP: &str = "Sat, 17 Oct 2026 09:00:00 GMT";

fn context(method: Option<Method>) -> ResponseContext {
    ResponseContext {
        now: NOW.to_string(),
        last_modified: Some(STAMP.to_string()),
        method,
        server_name: "cachet-test".to_string(),
        local_addr: Some("127.0.0.1:8080".parse().unwrap()),
    }
}

fn wire(outcome: Outcome, ctx: &ResponseContext) -> String {
    String::from_utf8(serialize_response(&render(outcome, ctx)).to_vec()).unwrap()
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotModified.as_u16(), 304);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotModified.reason_phrase(), "Not Modified");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(
        StatusCode::HttpVersionNotSupported.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_response_builder_content_length_last() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.headers.last().unwrap(), &("Content-Length".to_string(), "13".to_string()));
    assert_eq!(response.body.as_deref(), Some(&b"Hello, World!"[..]));
}

#[test]
fn test_response_builder_no_body_no_length() {
    let response = ResponseBuilder::new(StatusCode::NotModified).build();

    assert!(response.body.is_none());
    assert_eq!(response.header("Content-Length"), None);
}

#[test]
fn test_common_headers_in_order() {
    for outcome in [Outcome::Ok, Outcome::NotFound, Outcome::NotModified, Outcome::InternalError] {
        let response = render(outcome, &context(Some(Method::GET)));
        let names: Vec<&str> = response.headers.iter().take(3).map(|(k, _)| k.as_str()).collect();

        assert_eq!(names, ["Date", "Server", "Content-Type"]);
        assert_eq!(response.header("Date"), Some(NOW));
        assert_eq!(response.header("Server"), Some("cachet-test"));
        assert_eq!(response.header("Content-Type"), Some("text/html"));
    }
}

#[test]
fn test_get_ok_has_body_and_cache_control() {
    let response = render(Outcome::Ok, &context(Some(Method::GET)));
    let body = response.body.as_ref().unwrap();
    let text = std::str::from_utf8(body).unwrap();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Cache-Control"), Some("public"));
    assert_eq!(response.header("Content-Length"), Some(body.len().to_string().as_str()));
    assert!(text.contains("cachet-test"));
    assert!(text.contains("127.0.0.1"));
    assert!(text.contains("8080"));
    assert!(text.contains(NOW));
    assert!(text.contains(STAMP));
}

#[test]
fn test_head_ok_has_no_body() {
    let response = render(Outcome::Ok, &context(Some(Method::HEAD)));

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_none());
    assert_eq!(response.header("Content-Length"), None);
    assert_eq!(response.header("Cache-Control"), None);
}

#[test]
fn test_not_modified_has_last_modified_and_no_body() {
    let response = render(Outcome::NotModified, &context(Some(Method::GET)));

    assert_eq!(response.status, StatusCode::NotModified);
    assert_eq!(response.header("Last-Modified"), Some(STAMP));
    assert!(response.body.is_none());
    assert_eq!(response.header("Content-Length"), None);
}

#[test]
fn test_method_not_allowed_has_allow() {
    let response = render(Outcome::MethodNotAllowed, &context(None));

    assert_eq!(response.status.as_u16(), 405);
    assert_eq!(response.header("Allow"), Some("GET, HEAD"));
}

#[test]
fn test_error_outcomes_have_exact_content_length() {
    let errors = [
        (Outcome::Malformed, 400),
        (Outcome::MissingHost, 400),
        (Outcome::MethodNotAllowed, 405),
        (Outcome::NotFound, 404),
        (Outcome::VersionNotSupported, 505),
        (Outcome::InternalError, 500),
    ];

    for (outcome, code) in errors {
        let response = render(outcome, &context(None));
        let body = response.body.as_ref().unwrap();

        assert_eq!(response.status.as_u16(), code);
        assert_eq!(response.header("Content-Length").unwrap(), body.len().to_string());
    }
}

#[test]
fn test_render_is_deterministic() {
    let ctx = context(Some(Method::GET));

    assert_eq!(wire(Outcome::Ok, &ctx), wire(Outcome::Ok, &ctx));
    assert_eq!(wire(Outcome::NotFound, &ctx), wire(Outcome::NotFound, &ctx));
}

#[test]
fn test_only_time_differs_between_renders() {
    let first = context(Some(Method::GET));
    let mut second = first.clone();
    second.now = "Sat, 17 Oct 2026 10:00:01 GMT".to_string();

    assert_eq!(
        wire(Outcome::Ok, &first).replace(NOW, "<now>"),
        wire(Outcome::Ok, &second).replace(&second.now, "<now>"),
    );
}

#[test]
fn test_unset_clock_renders() {
    let mut ctx = context(Some(Method::GET));
    ctx.last_modified = None;
    ctx.local_addr = None;

    let response = render(Outcome::Ok, &ctx);
    assert!(response.body.is_some());
}

#[test]
fn test_wire_format() {
    let text = wire(Outcome::NotModified, &context(Some(Method::GET)));

    assert_eq!(
        text,
        format!(
            "HTTP/1.1 304 Not Modified\r\nDate: {NOW}\r\nServer: cachet-test\r\nContent-Type: text/html\r\nLast-Modified: {STAMP}\r\n\r\n"
        )
    );
}

#[test]
fn test_wire_body_follows_blank_line() {
    let text = wire(Outcome::NotFound, &context(None));
    let (head, body) = text.split_once("\r\n\r\n").unwrap();

    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(head.contains(&format!("Content-Length: {}", body.len())));
}

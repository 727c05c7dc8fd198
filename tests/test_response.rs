mod common;

use bytes::Bytes;
use common::RawResponse;
use docserve::http::response::{Body, Response, StatusCode};
use docserve::http::writer::{ResponseWriter, write_binary, write_text};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
}

#[test]
fn test_status_code_display() {
    assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
    assert_eq!(StatusCode::Ok.to_string(), "200 OK");
}

#[test]
fn test_text_body_length_counts_bytes() {
    let response = Response::html(StatusCode::Ok, "héllo ✓");

    assert_eq!(response.content_length(), "héllo ✓".len());
    assert_ne!(response.content_length(), "héllo ✓".chars().count());
}

#[test]
fn test_bad_request_helper() {
    let response = Response::bad_request();

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.content_type, "text/html");
    assert_eq!(response.body, Body::Text("<h1>400 Bad Request</h1>".to_string()));
}

#[tokio::test]
async fn test_write_text_response() {
    let mut out = Vec::new();
    write_text(&mut out, StatusCode::NotFound, "text/html", "<h1>nope</h1>")
        .await
        .unwrap();

    let expected: &[u8] = b"HTTP/1.1 404 Not Found\r\n\
        Content-Type: text/html\r\n\
        Content-Length: 13\r\n\
        \r\n\
        <h1>nope</h1>";
    assert_eq!(out, expected);
}

#[tokio::test]
async fn test_write_text_multibyte_content_length() {
    let mut out = Vec::new();
    write_text(&mut out, StatusCode::Ok, "text/html", "ünïcödé")
        .await
        .unwrap();

    let parsed = RawResponse::parse(&out);
    assert_eq!(parsed.header("Content-Length"), Some("11"));
    assert_eq!(parsed.body, "ünïcödé".as_bytes());
}

#[tokio::test]
async fn test_write_binary_passes_bytes_through() {
    let body: Vec<u8> = vec![0x00, b'\r', b'\n', 0xff, b'\n', 0x80, b'\r'];
    let mut out = Vec::new();
    write_binary(&mut out, StatusCode::Ok, "application/javascript", &body)
        .await
        .unwrap();

    let parsed = RawResponse::parse(&out);
    assert_eq!(parsed.status_line, "HTTP/1.1 200 OK");
    assert_eq!(parsed.header("Content-Type"), Some("application/javascript"));
    assert_eq!(parsed.header("Content-Length"), Some("7"));
    assert_eq!(parsed.body, body);
}

#[tokio::test]
async fn test_writer_header_order() {
    let response = Response::binary(StatusCode::Ok, "text/css", Bytes::from_static(b"a{}"));
    let mut out = Vec::new();
    ResponseWriter::new(&response)
        .write_to_stream(&mut out)
        .await
        .unwrap();

    let parsed = RawResponse::parse(&out);
    let names: Vec<&str> = parsed.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Content-Type", "Content-Length"]);
    assert_eq!(parsed.body, b"a{}");
}

#[tokio::test]
async fn test_empty_body() {
    let response = Response::binary(StatusCode::Ok, "text/html", Vec::new());
    let mut out = Vec::new();
    ResponseWriter::new(&response)
        .write_to_stream(&mut out)
        .await
        .unwrap();

    assert!(out.ends_with(b"Content-Length: 0\r\n\r\n"));
}

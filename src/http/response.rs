//! Response bodies.
//!
//! Every successful answer is one line: the result text with surrounding
//! whitespace trimmed, followed by a single `\n`. Relayed upstream bodies
//! get the same treatment.

use std::fmt::Display;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Trim `raw` and terminate it with a newline.
pub fn line_bytes(raw: &[u8]) -> Vec<u8> {
    let mut body = raw.trim_ascii().to_vec();
    body.push(b'\n');
    body
}

/// 200 response whose body is `value` as a single line.
pub fn text_line(value: impl Display) -> Response {
    relay(value.to_string().as_bytes())
}

/// 200 response relaying raw bytes as a single line.
pub fn relay(raw: &[u8]) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN))],
        Bytes::from(line_bytes(raw)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bytes() {
        assert_eq!(line_bytes(b"5\n"), b"5\n");
        assert_eq!(line_bytes(b"  12 \r\n\n"), b"12\n");
        assert_eq!(line_bytes(b""), b"\n");
    }

    #[tokio::test]
    async fn test_text_line() {
        let response = text_line(7);
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"7\n");
    }
}

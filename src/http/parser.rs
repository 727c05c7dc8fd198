use crate::http::request::{Method, RequestLine};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not split into exactly method, target and version.
    TokenCount(usize),
    /// The line is longer than the configured limit.
    TooLong,
}

/// Turns the raw bytes of a request line into text.
///
/// The line ending is removed before the length is compared with `limit`.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn request_line_text(raw: &[u8], limit: usize) -> Result<String, ParseError> {
    let line = trim_line_ending(raw);
    if line.len() > limit {
        return Err(ParseError::TooLong);
    }
    Ok(String::from_utf8_lossy(line).into_owned())
}

/// Splits a request line (already stripped of its line terminator) into its
/// three tokens.
///
/// Tokens are separated by single spaces, so repeated spaces produce empty
/// tokens and make the line malformed.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();

    let [method, target, version] = tokens.as_slice() else {
        return Err(ParseError::TokenCount(tokens.len()));
    };

    Ok(RequestLine {
        method: Method::parse(method),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Removes one trailing `\n` or `\r\n` from a raw line.
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

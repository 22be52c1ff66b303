use crate::http::request::{is_token, Header, WireRequest};

/// Upper bound on the request line plus headers before we give up waiting
/// for the blank line.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Largest Content-Length accepted; anything bigger is refused up front.
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidHeader,
    InvalidContentLength,
    HeadTooLarge,
    BodyTooLarge,
    /// Any Transfer-Encoding; only Content-Length framing is supported
    UnsupportedTransferEncoding,
    Incomplete,
}

impl ParseError {
    /// Status the event loop answers with before closing the connection.
    pub fn status(&self) -> u16 {
        match self {
            ParseError::BodyTooLarge => 413,
            ParseError::UnsupportedTransferEncoding => 501,
            _ => 400,
        }
    }
}

pub fn parse_http_request(buf: &[u8]) -> Result<(WireRequest, usize), ParseError> {

    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > MAX_HEAD_SIZE => return Err(ParseError::HeadTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest);
    let mut parts = request_line?.split_whitespace();

    let method = parts.next().ok_or(ParseError::InvalidRequest)?;
    let uri = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    if !is_token(method) {
        return Err(ParseError::InvalidMethod);
    }

    // Headers, kept in arrival order
    let mut headers = Vec::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (name, value) = line
            .split_once(':')
            .ok_or(ParseError::InvalidHeader)?;

        let name = name.trim();
        if !is_token(name) {
            return Err(ParseError::InvalidHeader);
        }

        headers.push(Header::new(name, value.trim()));
    }

    if headers.iter().any(|h| h.name.eq_ignore_ascii_case("Transfer-Encoding")) {
        return Err(ParseError::UnsupportedTransferEncoding);
    }

    // Body
    let content_length = headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("Content-Length"))
        .map(|h| h.value.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?;

    let body_len = content_length.unwrap_or(0);
    if body_len > MAX_BODY_SIZE {
        return Err(ParseError::BodyTooLarge);
    }

    if body_bytes.len() < body_len {
        return Err(ParseError::Incomplete);
    }

    let body = content_length.map(|len| body_bytes[..len].to_vec());

    let request = WireRequest {
        method: method.to_string(),
        uri: uri.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + body_len;
    Ok((request, total_consumed))

}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

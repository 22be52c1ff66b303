use bytes::Bytes;

use crate::adapter::headers::normalize;
use crate::http::request::WireRequest;
use crate::model::Request;

/// Builds the application-facing request from a wire request.
///
/// `host` and `port` come from configuration, not from the request. The
/// method and header names are lower-cased the same way (ASCII only). Nothing
/// is validated: whatever the event loop parsed is passed through.
pub fn from_wire_request(host: &str, port: u16, request: WireRequest) -> Request {
    let WireRequest {
        method,
        uri,
        headers,
        body,
        ..
    } = request;

    let (path, query) = split_uri(&uri);

    Request::new(
        host.to_string(),
        port,
        path.to_string(),
        query.map(str::to_string),
        method.to_ascii_lowercase(),
        normalize(&headers),
        body.map(Bytes::from).unwrap_or_default(),
    )
}

/// Splits on the first `?`. A trailing `?` yields an empty, present query.
pub fn split_uri(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    }
}

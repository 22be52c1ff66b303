use std::io;

use crate::http::request::Header;
use crate::http::response::WireResponse;
use crate::model::Response;

/// Materializes an application response for the event loop.
///
/// The body is written into memory in full, because the event loop only
/// accepts complete byte arrays. A failing body write fails the whole
/// translation, and so does a header that cannot go on the wire as a single
/// line (a name that is not a token, or a value with CR, LF or NUL). The
/// reason phrase comes from the status table.
pub fn to_wire_response(response: Response) -> io::Result<WireResponse> {
    let (status, headers, body) = response.into_parts();

    let headers = headers
        .into_iter()
        .map(|(name, value)| {
            let header = Header { name, value };
            if header.is_writable() {
                Ok(header)
            } else {
                Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid response header {:?}", header.name),
                ))
            }
        })
        .collect::<io::Result<Vec<_>>>()?;

    let mut buf = Vec::new();
    body.write_to(&mut buf)?;

    Ok(WireResponse::new(status, headers, buf))
}

use std::collections::HashMap;

use crate::http::request::Header;

/// Folds a wire header list into a map keyed by lower-cased name.
///
/// Values are untouched. When a name repeats, the last occurrence wins and
/// the earlier values are dropped rather than combined.
pub fn normalize(headers: &[Header]) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(headers.len());
    for h in headers {
        map.insert(h.name.to_ascii_lowercase(), h.value.clone());
    }
    map
}

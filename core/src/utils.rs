//! utils.rs
//! Helpers around `Content-Encoding` header values.

/// Split a `Content-Encoding` value into an ordered encoding list.
///
/// Segments are comma separated and trimmed; case is preserved (registry
/// keys are case-sensitive). Empty segments are kept as blank entries, which
/// the pipelines treat as no-ops.
///
/// `"gzip, br,,zstd"` -> `["gzip", "br", "", "zstd"]`; `""` -> `[]`.
pub fn parse_encoding_list(header: &str) -> Vec<String> {
    if header.trim().is_empty() {
        return Vec::new();
    }
    header.split(',').map(|segment| segment.trim().to_string()).collect()
}

/// Join an encoding list back into a header value, dropping blank entries.
pub fn format_encoding_list<S: AsRef<str>>(order: &[S]) -> String {
    order
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Message normalization
//!
//! Every later stage works on normalized text: whitespace runs collapsed to a
//! single space, ends trimmed, and the whole message lowercased.

/// Normalize raw user input
///
/// Total and idempotent; empty or whitespace-only input yields `""`.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.to_lowercase()
}

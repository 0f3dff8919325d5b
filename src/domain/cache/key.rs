//! Cache key canonicalization
//!
//! User-typed queries vary in case and whitespace. Every store keys entries
//! by the canonical form so "Kenny Scharf Cars" and " kenny  scharf cars "
//! address the same entry.

/// Canonical form of a query string: trimmed, case-folded, internal
/// whitespace runs collapsed to single spaces.
pub fn canonical_query(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

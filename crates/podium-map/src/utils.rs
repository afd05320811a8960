/// Normalizes a header for comparison: trimmed and lowercased.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// First column equal to `wanted` after normalization.
pub fn find_case_insensitive<'c>(columns: &'c [String], wanted: &str) -> Option<&'c str> {
    let wanted = normalize_header(wanted);
    if wanted.is_empty() {
        return None;
    }
    columns
        .iter()
        .find(|c| normalize_header(c) == wanted)
        .map(String::as_str)
}

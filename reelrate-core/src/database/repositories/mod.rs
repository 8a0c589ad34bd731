pub mod movies;
pub mod ratings;

/// Escape `ILIKE` metacharacters so a bound genre filter matches as a
/// literal substring, identical to the in-memory matcher.
pub(crate) fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

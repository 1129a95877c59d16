///
/// sanitize_order
///
/// Allow-list sanitizer for the raw ORDER BY text. Strips every
/// character outside `[A-Za-z0-9_,\s()]`; the surviving text is the
/// only caller-supplied string that enters SQL without being bound,
/// and it is used in no other clause.
///

#[must_use]
pub fn sanitize_order(raw: &str) -> String {
    raw.chars()
        .filter(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | ',' | '(' | ')') || c.is_ascii_whitespace()
        })
        .collect()
}

//! Free-text description cleanup.
//!
//! At least one app publishes EPG data which ends up in the
//! description, so the text is length-bounded before it reaches the
//! document. JSON escaping is owned by the document serializer.

const ELLIPSIS: &str = "...";

/// Sanitize raw description text. Returns `None` when nothing usable
/// remains: empty input, or input that is only whitespace and
/// punctuation.
///
/// A literal `", null"` fragment is removed first — a known artifact
/// of upstream producers joining absent fields into the text.
pub fn sanitize_description(raw: &str, max_len: usize) -> Option<String> {
    if raw.is_empty()
        || raw
            .chars()
            .all(|c| c.is_whitespace() || c.is_ascii_punctuation())
    {
        return None;
    }

    let cleaned = raw.replace(", null", "");
    if cleaned.is_empty() || cleaned == "null" {
        return None;
    }

    Some(truncate(&cleaned, max_len))
}

/// Bound `text` to `max_len` characters, ellipsis included. Counts
/// characters, not bytes, so multi-byte input is never split.
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Normalizes a text node extracted from the document.
///
/// Trims surrounding whitespace and turns every newline into a single space.
/// Runs of spaces or tabs inside the text are left alone.
pub fn normalize(raw: Option<&str>) -> String {
    match raw {
        Some(text) if !text.is_empty() => text.trim().replace('\n', " "),
        _ => String::new(),
    }
}

/// Shorthand for normalizing text that is known to be present
pub fn normalize_str(raw: &str) -> String {
    normalize(Some(raw))
}

//! Docstring normalization shared by every IR entity

/// Remove the indentation of the first non-empty line from every line.
///
/// Lines that do not start with that exact indentation are left untouched.
///
/// # Examples
/// ```
/// use vdl_core::docs::normalize_indent;
/// assert_eq!(normalize_indent("    a\n      b"), "a\n  b");
/// assert_eq!(normalize_indent("a\n  b"), "a\n  b");
/// ```
pub fn normalize_indent(text: &str) -> String {
    let indentation = text
        .split('\n')
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            let end = line
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map_or(line.len(), |(i, _)| i);
            &line[..end]
        })
        .unwrap_or("");

    if indentation.is_empty() {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| line.strip_prefix(indentation).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize indentation and trim; blank docs become `None`
pub fn normalize_doc(raw: Option<&str>) -> Option<String> {
    let normalized = normalize_indent(raw?);
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

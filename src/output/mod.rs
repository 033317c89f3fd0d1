// Output formatting: colored terminal display and JSON.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so usernames with emoji or accented
/// letters never panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Format a signed percentage with an explicit sign, e.g. "-12.5%" or "+3.0%".
pub fn signed_percent(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Pretty-print any serializable value as JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

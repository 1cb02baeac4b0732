/// Literal bullet marking a checklist line inside a note body.
pub const CHECKLIST_MARKER: &str = "○ ";

/// Appends a checklist bullet, on a new line when `body` is non-empty.
pub fn append_checklist_item(body: &str) -> String {
    if body.is_empty() {
        CHECKLIST_MARKER.to_string()
    } else {
        format!("{body}\n{CHECKLIST_MARKER}")
    }
}

/// Returns the text after the bullet of every checklist line in plain text.
pub fn checklist_items(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim_start().strip_prefix(CHECKLIST_MARKER))
        .map(|item| item.trim_end().to_string())
        .collect()
}

//! Text normalization applied before any pattern matching.

/// Drop a leading byte-order mark and rewrite `\r\n` and lone `\r` line
/// endings as `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Clean raw OCR text for pattern matching.
///
/// Line endings are unified first, every character outside printable ASCII
/// (other than `\n`) becomes a space, then all whitespace runs collapse to a
/// single space and the result is trimmed. Total over all inputs.
pub fn clean_text(text: &str) -> String {
    let printable: String = normalize_line_endings(text)
        .chars()
        .map(|c| match c {
            '\n' | ' '..='~' => c,
            _ => ' ',
        })
        .collect();

    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

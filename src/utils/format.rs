//! Human-readable formatting helpers for progress output.

use indicatif::BinaryBytes;

/// Format a byte count with binary units.
///
/// ```rust
/// use tally::utils::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(2048), "2.00 KiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    BinaryBytes(bytes).to_string()
}

/// Make sure `text` ends with a newline, appending one only when missing.
pub(crate) fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

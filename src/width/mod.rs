//! Terminal display width helpers.
//!
//! Provides ANSI-aware width calculation for rendered content so plan
//! padding stays aligned when frames pass through styled pipelines.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sequences_do_not_count() {
        assert_eq!(display_width("plain"), 5);
        assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
    }
}

//! Display helpers for catalog text.

/// Maximum title length shown on product cards.
pub const CARD_TITLE_MAX_CHARS: usize = 50;

/// Marker appended to truncated text.
const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max_chars` characters, appending `...` when
/// anything was cut.
///
/// Counts characters, not bytes, so multi-byte text is never split inside a
/// character.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_index, _)) => {
            let mut shortened = String::with_capacity(byte_index + ELLIPSIS.len());
            shortened.push_str(text.get(..byte_index).unwrap_or(text));
            shortened.push_str(ELLIPSIS);
            shortened
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate("Backpack", 50), "Backpack");
        assert_eq!(truncate("", 50), "");
    }

    #[test]
    fn test_text_at_limit_is_unchanged() {
        let exact = "a".repeat(50);
        assert_eq!(truncate(&exact, 50), exact);
    }

    #[test]
    fn test_long_text_is_cut_and_marked() {
        let title = "Mens Casual Premium Slim Fit T-Shirts with extra long sleeves";
        let shortened = truncate(title, CARD_TITLE_MAX_CHARS);
        assert_eq!(shortened.chars().count(), CARD_TITLE_MAX_CHARS + 3);
        assert!(shortened.ends_with("..."));
        assert!(title.starts_with(shortened.trim_end_matches("...")));
    }

    #[test]
    fn test_multibyte_text_is_cut_on_character_boundary() {
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }
}

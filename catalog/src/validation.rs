//! Input checks applied before anything reaches the catalog.

use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

/// Shortest non-blank search term worth sending.
pub const MIN_SEARCH_TERM_LEN: usize = 2;

/// Message shown when a search term is too short.
pub const SEARCH_TERM_TOO_SHORT: &str = "Search term must be at least 2 characters";

/// Message shown when a card id is malformed.
pub const INVALID_CARD_ID: &str = "Invalid card id";

static CARD_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+-[a-zA-Z0-9]+$").ok());

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Blank terms are allowed (they list everything); otherwise the trimmed
/// term needs at least [`MIN_SEARCH_TERM_LEN`] characters.
#[must_use]
pub fn validate_search_term(term: &str) -> bool {
    let trimmed = term.trim();
    trimmed.is_empty() || trimmed.chars().count() >= MIN_SEARCH_TERM_LEN
}

/// Trim, drop `<` and `>`, and collapse whitespace runs to a single space.
#[must_use]
pub fn sanitize_string(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.replace(['<', '>'], ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `id` has the catalog's `<set>-<number>` shape, e.g. `base1-4`.
#[must_use]
pub fn validate_card_id(id: &str) -> bool {
    CARD_ID_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(id))
}

/// Whether `url` is an http(s) URL pointing at a jpg, jpeg, png or webp image.
#[must_use]
pub fn is_valid_image_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    matches!(parsed.scheme(), "http" | "https")
        && IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_boundary() {
        assert!(validate_search_term(""));
        assert!(validate_search_term("   "));
        assert!(!validate_search_term("a"));
        assert!(!validate_search_term(" a "));
        assert!(validate_search_term("ab"));
        assert!(validate_search_term("pikachu"));
    }

    #[test]
    fn sanitize_strips_markup_and_collapses_spaces() {
        assert_eq!(sanitize_string("  mr   mime  "), "mr mime");
        assert_eq!(sanitize_string("<script>pika</script>"), "scriptpika/script");
        assert_eq!(sanitize_string("a\t\nb"), "a b");
        assert_eq!(sanitize_string("a < b"), "a b");
        assert_eq!(sanitize_string(""), "");
    }

    #[test]
    fn card_id_shape() {
        assert!(validate_card_id("base1-4"));
        assert!(validate_card_id("XY7-54"));
        assert!(!validate_card_id("base1"));
        assert!(!validate_card_id("base1-4-1"));
        assert!(!validate_card_id("base 1-4"));
        assert!(!validate_card_id(""));
    }

    #[test]
    fn image_urls() {
        assert!(is_valid_image_url("https://images.pokemontcg.io/base1/4.png"));
        assert!(is_valid_image_url("http://cdn.example/card.webp"));
        assert!(!is_valid_image_url("ftp://cdn.example/card.png"));
        assert!(!is_valid_image_url("https://cdn.example/card.gif"));
        assert!(!is_valid_image_url("not a url.png"));
    }
}

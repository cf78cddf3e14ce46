//! Display helpers for card attributes.

use std::fmt;

/// `25` → `#025`.
#[must_use]
pub fn format_pokedex_number(number: u32) -> String {
    format!("#{number:03}")
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Uppercase the first letter of each space-separated word and lowercase the rest.
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `["Fire", "Water"]` → `"Fire, Water"`.
#[must_use]
pub fn format_types(types: &[String]) -> String {
    types.join(", ")
}

/// Numeric HP from printed text such as `"120"` or `"120 HP"`. Missing or
/// digit-free input gives 0.
#[must_use]
pub fn parse_hp(hp: Option<&str>) -> u32 {
    hp.map(|text| text.chars().filter(char::is_ascii_digit).collect::<String>())
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// Card rarity tiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rarity {
    /// Common
    Common,
    /// Uncommon
    Uncommon,
    /// Rare
    Rare,
    /// Rare Holo
    RareHolo,
    /// Ultra Rare
    UltraRare,
    /// Secret Rare
    SecretRare,
    /// Any other printed rarity, kept verbatim.
    Other(String),
}

impl Rarity {
    /// Classify printed rarity text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "Common" => Self::Common,
            "Uncommon" => Self::Uncommon,
            "Rare" => Self::Rare,
            "Rare Holo" => Self::RareHolo,
            "Ultra Rare" => Self::UltraRare,
            "Secret Rare" => Self::SecretRare,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::RareHolo => "Rare Holo",
            Self::UltraRare => "Ultra Rare",
            Self::SecretRare => "Secret Rare",
            Self::Other(text) => text,
        }
    }

    /// Short marker for compact listings.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Common => "●",
            Self::Uncommon => "◆",
            Self::Rare => "★",
            Self::RareHolo => "★H",
            Self::UltraRare => "★★",
            Self::SecretRare => "★★★",
            Self::Other(_) => "?",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Card data returned by the catalog.
//!
//! All types are read-only views of the catalog's JSON. Unknown fields are
//! ignored and optional fields default to absent, so new catalog attributes
//! never break decoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque card identifier, e.g. `base1-4`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier has the catalog's `<set>-<number>` shape.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        crate::validation::validate_card_id(&self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Card artwork URLs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
    /// Thumbnail image.
    pub small: String,
    /// Full-size image.
    pub large: String,
}

/// Expansion a card belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    /// Set name, e.g. "Base".
    pub name: String,
    /// Series name, e.g. "Base".
    pub series: String,
}

/// A trading card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,
    /// Card name.
    pub name: String,
    /// Artwork.
    #[serde(default)]
    pub images: CardImages,
    /// National Pokédex numbers of the depicted Pokémon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_pokedex_numbers: Option<Vec<u32>>,
    /// Energy types, e.g. `["Fire"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Hit points as printed, e.g. "120".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<String>,
    /// Collector number within the set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Illustrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Rarity as printed, e.g. "Rare Holo".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    /// Expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<CardSet>,
}

impl Card {
    /// Minimal card with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            images: CardImages::default(),
            national_pokedex_numbers: None,
            types: None,
            hp: None,
            number: None,
            artist: None,
            rarity: None,
            set: None,
        }
    }
}

/// One page of a card listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage {
    /// Cards on this page.
    pub data: Vec<Card>,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of cards on this page.
    #[serde(default)]
    pub count: u32,
    /// Number of matching cards across all pages.
    #[serde(default)]
    pub total_count: u32,
}

/// Envelope of a single-card lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleCardResponse {
    /// The card.
    pub data: Card,
}

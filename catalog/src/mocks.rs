//! In-memory catalog and card fixtures for tests.

use crate::client::CardCatalog;
use crate::error::{CatalogError, Result};
use crate::types::{Card, CardId, CardPage};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Catalog serving a fixed card list.
///
/// Searches can be slowed down per term to reproduce out-of-order
/// responses, and every call can be forced to fail. Clones share the
/// request counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    cards: Vec<Card>,
    delays: HashMap<String, Duration>,
    failure: Option<CatalogError>,
    requests: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    /// Catalog serving `cards`.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    /// Delay searches for `term` (case-insensitive; `""` for the unfiltered listing).
    #[must_use]
    pub fn with_delay(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.trim().to_lowercase(), delay);
        self
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_failure(mut self, error: CatalogError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn page_of(matches: Vec<Card>, page_size: u32, page: u32) -> CardPage {
        let total_count = u32::try_from(matches.len()).unwrap_or(u32::MAX);
        let size = page_size.max(1) as usize;
        let skip = (page.max(1) as usize - 1) * size;
        let data: Vec<Card> = matches.into_iter().skip(skip).take(size).collect();
        CardPage {
            count: u32::try_from(data.len()).unwrap_or(u32::MAX),
            data,
            page: page.max(1),
            page_size,
            total_count,
        }
    }
}

impl CardCatalog for InMemoryCatalog {
    fn search_by_name(
        &self,
        term: Option<&str>,
        page_size: u32,
        page: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send {
        let needle = term.unwrap_or_default().trim().to_lowercase();
        let delay = self.delays.get(&needle).copied();
        let started = self.begin();
        let matches: Vec<Card> = self
            .cards
            .iter()
            .filter(|card| needle.is_empty() || card.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            started?;
            Ok(Self::page_of(matches, page_size, page))
        }
    }

    fn fetch_by_id(&self, id: &CardId) -> impl Future<Output = Result<Card>> + Send {
        let started = self.begin();
        let found = self.cards.iter().find(|card| &card.id == id).cloned();
        let id = id.to_string();

        async move {
            started?;
            found.ok_or(CatalogError::CardNotFound { id, status: 404 })
        }
    }

    fn fetch_by_type(
        &self,
        card_type: &str,
        page_size: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send {
        let started = self.begin();
        let matches: Vec<Card> = self
            .cards
            .iter()
            .filter(|card| {
                card.types
                    .as_ref()
                    .is_some_and(|types| types.iter().any(|t| t.eq_ignore_ascii_case(card_type)))
            })
            .cloned()
            .collect();

        async move {
            started?;
            Ok(Self::page_of(matches, page_size, 1))
        }
    }

    fn fetch_by_pokedex_number(
        &self,
        number: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send {
        let started = self.begin();
        let matches: Vec<Card> = self
            .cards
            .iter()
            .filter(|card| {
                card.national_pokedex_numbers
                    .as_ref()
                    .is_some_and(|numbers| numbers.contains(&number))
            })
            .cloned()
            .collect();
        let page_size = u32::try_from(matches.len()).unwrap_or(u32::MAX);

        async move {
            started?;
            Ok(Self::page_of(matches, page_size, 1))
        }
    }
}

/// Sample cards.
pub mod fixtures {
    use crate::types::{Card, CardImages, CardSet};

    fn card(
        id: &str,
        name: &str,
        pokedex: u32,
        card_type: &str,
        hp: &str,
        rarity: &str,
        set: &str,
    ) -> Card {
        let (set_code, number) = id.split_once('-').unwrap_or((id, ""));
        Card {
            images: CardImages {
                small: format!("https://images.pokemontcg.io/{set_code}/{number}.png"),
                large: format!("https://images.pokemontcg.io/{set_code}/{number}_hires.png"),
            },
            national_pokedex_numbers: Some(vec![pokedex]),
            types: Some(vec![card_type.to_string()]),
            hp: Some(hp.to_string()),
            number: Some(number.to_string()),
            artist: Some("Mitsuhiro Arita".to_string()),
            rarity: Some(rarity.to_string()),
            set: Some(CardSet {
                name: set.to_string(),
                series: "Base".to_string(),
            }),
            ..Card::new(id, name)
        }
    }

    /// Base Set Charizard, `base1-4`.
    #[must_use]
    pub fn charizard() -> Card {
        card("base1-4", "Charizard", 6, "Fire", "120", "Rare Holo", "Base")
    }

    /// Base Set Blastoise, `base1-2`.
    #[must_use]
    pub fn blastoise() -> Card {
        card("base1-2", "Blastoise", 9, "Water", "100", "Rare Holo", "Base")
    }

    /// Base Set Pikachu, `base1-58`.
    #[must_use]
    pub fn pikachu() -> Card {
        card("base1-58", "Pikachu", 25, "Lightning", "40", "Common", "Base")
    }

    /// Jungle Pikachu, `base2-60`.
    #[must_use]
    pub fn jungle_pikachu() -> Card {
        card("base2-60", "Pikachu", 25, "Lightning", "50", "Common", "Jungle")
    }

    /// Base Set Charmander, `base1-46`.
    #[must_use]
    pub fn charmander() -> Card {
        card("base1-46", "Charmander", 4, "Fire", "50", "Common", "Base")
    }

    /// All fixtures above.
    #[must_use]
    pub fn sample_cards() -> Vec<Card> {
        vec![blastoise(), charizard(), charmander(), pikachu(), jungle_pikachu()]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn search_filters_and_pages() {
        let catalog = InMemoryCatalog::new(sample_cards());

        let page = catalog.search_by_name(Some("PIKA"), 1, 2).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.data, vec![jungle_pikachu()]);

        let all = catalog.search_by_name(None, 15, 1).await.unwrap();
        assert_eq!(all.data.len(), 5);
        assert_eq!(catalog.request_count(), 2);
    }

    #[tokio::test]
    async fn lookups() {
        let catalog = InMemoryCatalog::new(sample_cards());

        assert_eq!(catalog.fetch_by_id(&CardId::new("base1-4")).await.unwrap(), charizard());
        assert!(matches!(
            catalog.fetch_by_id(&CardId::new("base1-999")).await,
            Err(CatalogError::CardNotFound { status: 404, .. })
        ));
        assert_eq!(catalog.fetch_by_type("fire", 15).await.unwrap().data.len(), 2);
        assert_eq!(catalog.fetch_by_pokedex_number(25).await.unwrap().data.len(), 2);
    }

    #[tokio::test]
    async fn forced_failure() {
        let catalog = InMemoryCatalog::new(sample_cards())
            .with_failure(CatalogError::Network("offline".to_string()));
        assert!(catalog.search_by_name(None, 15, 1).await.is_err());
        assert_eq!(catalog.request_count(), 1);
    }
}

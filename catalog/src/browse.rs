//! Card browsing as a reducer.
//!
//! Listing and detail fetches each carry a request generation. Only the
//! response for the latest generation is applied, so a slow search that
//! finishes after a newer one can never overwrite the newer results.

use crate::client::CardCatalog;
use crate::error::CatalogError;
use crate::types::{Card, CardId};
use crate::validation::{
    INVALID_CARD_ID, SEARCH_TERM_TOO_SHORT, sanitize_string, validate_card_id,
    validate_search_term,
};
use cardvault_core::environment::Clock;
use cardvault_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use std::sync::Arc;

/// Browse screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    /// Current listing.
    pub cards: Vec<Card>,
    /// Card shown in the detail view.
    pub selected: Option<Card>,
    /// A listing request is in flight.
    pub loading: bool,
    /// A detail request is in flight.
    pub loading_details: bool,
    /// User-facing message for the last failure.
    pub error: Option<String>,
    /// Term being edited; applied by [`BrowseAction::Search`].
    pub search_term: String,
    /// Page of the current listing.
    pub page: u32,
    /// Generation of the latest listing request.
    pub generation: u64,
    /// Generation of the latest detail request.
    pub detail_generation: u64,
    /// When the current listing arrived.
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Browse screen actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    /// Edit the search term without searching.
    UpdateSearchTerm(String),
    /// Search with the current term.
    Search,
    /// Fetch a listing. A blank or absent term lists all Pokémon cards.
    FetchCards {
        /// Name filter
        term: Option<String>,
        /// 1-based page
        page: u32,
    },
    /// Listing response.
    CardsLoaded {
        /// Generation of the request this answers
        generation: u64,
        /// Cards on the page
        cards: Vec<Card>,
    },
    /// Listing failure.
    CardsFailed {
        /// Generation of the request this answers
        generation: u64,
        /// Cause
        error: CatalogError,
    },
    /// Load one card into the detail view.
    FetchCardDetails(CardId),
    /// Detail response.
    CardDetailsLoaded {
        /// Generation of the request this answers
        generation: u64,
        /// The card
        card: Card,
    },
    /// Detail failure.
    CardDetailsFailed {
        /// Generation of the request this answers
        generation: u64,
        /// Cause
        error: CatalogError,
    },
    /// Repeat the last listing (same term and page).
    Refresh,
    /// Drop results, error and search term.
    ClearResults,
    /// Input was rejected before reaching the catalog.
    ValidationFailed(String),
}

/// Dependencies of [`BrowseReducer`].
pub struct BrowseEnvironment<C, K> {
    /// Card source.
    pub catalog: Arc<C>,
    /// Time source for `loaded_at`.
    pub clock: K,
    /// Cards per listing page.
    pub page_size: u32,
}

impl<C, K> BrowseEnvironment<C, K> {
    /// Environment with the given catalog, clock and page size.
    #[must_use]
    pub const fn new(catalog: Arc<C>, clock: K, page_size: u32) -> Self {
        Self {
            catalog,
            clock,
            page_size,
        }
    }
}

/// Reducer for browsing and inspecting cards.
pub struct BrowseReducer<C, K> {
    _phantom: PhantomData<fn() -> (C, K)>,
}

impl<C, K> BrowseReducer<C, K> {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<C, K> Default for BrowseReducer<C, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, K> BrowseReducer<C, K>
where
    C: CardCatalog + 'static,
    K: Clock,
{
    fn fetch_cards(
        state: &mut BrowseState,
        term: Option<String>,
        page: u32,
        env: &BrowseEnvironment<C, K>,
    ) -> SmallVec<[Effect<BrowseAction>; 4]> {
        let term = term
            .map(|term| sanitize_string(&term))
            .filter(|term| !term.is_empty());

        if let Some(term) = &term {
            if !validate_search_term(term) {
                return Self::reject(state, SEARCH_TERM_TOO_SHORT.to_string());
            }
        }

        state.generation += 1;
        state.page = page.max(1);
        state.loading = true;
        state.error = None;

        let generation = state.generation;
        let page = state.page;
        let page_size = env.page_size;
        let catalog = Arc::clone(&env.catalog);
        tracing::debug!(generation, ?term, page, "Fetching cards");

        smallvec![Effect::future(async move {
            match catalog.search_by_name(term.as_deref(), page_size, page).await {
                Ok(listing) => Some(BrowseAction::CardsLoaded {
                    generation,
                    cards: listing.data,
                }),
                Err(error) => {
                    tracing::warn!(generation, %error, "Card listing failed");
                    Some(BrowseAction::CardsFailed { generation, error })
                },
            }
        })]
    }

    fn fetch_details(
        state: &mut BrowseState,
        id: CardId,
        env: &BrowseEnvironment<C, K>,
    ) -> SmallVec<[Effect<BrowseAction>; 4]> {
        if !validate_card_id(id.as_str()) {
            return Self::reject(state, INVALID_CARD_ID.to_string());
        }

        state.detail_generation += 1;
        state.loading_details = true;
        state.error = None;

        let generation = state.detail_generation;
        let catalog = Arc::clone(&env.catalog);
        tracing::debug!(generation, %id, "Fetching card details");

        smallvec![Effect::future(async move {
            match catalog.fetch_by_id(&id).await {
                Ok(card) => Some(BrowseAction::CardDetailsLoaded { generation, card }),
                Err(error) => {
                    tracing::warn!(generation, %error, "Card lookup failed");
                    Some(BrowseAction::CardDetailsFailed { generation, error })
                },
            }
        })]
    }

    fn reject(state: &mut BrowseState, message: String) -> SmallVec<[Effect<BrowseAction>; 4]> {
        tracing::debug!(%message, "Rejected browse input");
        state.error = Some(message);
        SmallVec::new()
    }
}

impl<C, K> Reducer for BrowseReducer<C, K>
where
    C: CardCatalog + 'static,
    K: Clock,
{
    type State = BrowseState;
    type Action = BrowseAction;
    type Environment = BrowseEnvironment<C, K>;

    fn reduce(
        &self,
        state: &mut BrowseState,
        action: BrowseAction,
        env: &BrowseEnvironment<C, K>,
    ) -> SmallVec<[Effect<BrowseAction>; 4]> {
        match action {
            BrowseAction::UpdateSearchTerm(term) => {
                state.search_term = term;
                SmallVec::new()
            },

            BrowseAction::Search => {
                let term = Some(state.search_term.clone());
                Self::fetch_cards(state, term, 1, env)
            },

            BrowseAction::FetchCards { term, page } => Self::fetch_cards(state, term, page, env),

            BrowseAction::Refresh => {
                let term = Some(state.search_term.clone());
                let page = state.page;
                Self::fetch_cards(state, term, page, env)
            },

            BrowseAction::CardsLoaded { generation, cards } => {
                if generation != state.generation {
                    tracing::warn!(
                        generation,
                        latest = state.generation,
                        "Discarding stale card listing"
                    );
                    return SmallVec::new();
                }
                tracing::debug!(generation, count = cards.len(), "Cards loaded");
                state.cards = cards;
                state.loading = false;
                state.error = None;
                state.loaded_at = Some(env.clock.now());
                SmallVec::new()
            },

            BrowseAction::CardsFailed { generation, error } => {
                if generation != state.generation {
                    tracing::warn!(
                        generation,
                        latest = state.generation,
                        "Discarding stale listing failure"
                    );
                    return SmallVec::new();
                }
                state.cards.clear();
                state.loading = false;
                state.error = Some(error.user_message().to_string());
                SmallVec::new()
            },

            BrowseAction::FetchCardDetails(id) => Self::fetch_details(state, id, env),

            BrowseAction::CardDetailsLoaded { generation, card } => {
                if generation != state.detail_generation {
                    tracing::warn!(
                        generation,
                        latest = state.detail_generation,
                        "Discarding stale card details"
                    );
                    return SmallVec::new();
                }
                state.selected = Some(card);
                state.loading_details = false;
                state.error = None;
                SmallVec::new()
            },

            BrowseAction::CardDetailsFailed { generation, error } => {
                if generation != state.detail_generation {
                    tracing::warn!(
                        generation,
                        latest = state.detail_generation,
                        "Discarding stale detail failure"
                    );
                    return SmallVec::new();
                }
                state.selected = None;
                state.loading_details = false;
                state.error = Some(error.user_message().to_string());
                SmallVec::new()
            },

            BrowseAction::ClearResults => {
                // In-flight responses become stale.
                state.generation += 1;
                state.cards.clear();
                state.loading = false;
                state.error = None;
                state.search_term.clear();
                state.page = 1;
                state.loaded_at = None;
                SmallVec::new()
            },

            BrowseAction::ValidationFailed(message) => Self::reject(state, message),
        }
    }
}

//! Storage keys.
//!
//! Each logical store owns its keys exclusively. The names match what the
//! web client has always written, so existing browser data keeps loading.

/// Login flag owned by the session store.
pub const IS_LOGGED_IN: &str = "isLoggedIn";

/// Username owned by the session store.
pub const USERNAME: &str = "username";

/// JSON array of card ids owned by the favorites store.
pub const FAVORITES: &str = "pokemon_favorites";

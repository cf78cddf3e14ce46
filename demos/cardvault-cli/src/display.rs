//! Terminal rendering of cards and favorites.

use cardvault_catalog::format::{
    Rarity, capitalize_words, format_pokedex_number, format_types, parse_hp, truncate_text,
};
use cardvault_catalog::validation::is_valid_image_url;
use cardvault_catalog::Card;
use cardvault_session::FavoritesStore;
use cardvault_storage::KeyValueBackend;

const NAME_WIDTH: usize = 24;

pub fn print_listing<B: KeyValueBackend>(cards: &[Card], favorites: &FavoritesStore<B>) {
    if cards.is_empty() {
        println!("No cards found");
        return;
    }
    for card in cards {
        println!("{}", listing_line(card, favorites.contains(&card.id)));
    }
}

pub fn print_card<B: KeyValueBackend>(card: &Card, favorites: &FavoritesStore<B>) {
    for line in detail_lines(card, favorites.contains(&card.id)) {
        println!("{line}");
    }
}

pub fn print_favorites<B: KeyValueBackend>(favorites: &FavoritesStore<B>) {
    if favorites.is_empty() {
        println!("No favorites yet");
        return;
    }
    for id in favorites {
        println!("★ {id}");
    }
    println!("{} favorite(s)", favorites.count());
}

fn star(starred: bool) -> &'static str {
    if starred { "★" } else { " " }
}

fn listing_line(card: &Card, starred: bool) -> String {
    let rarity = card
        .rarity
        .as_deref()
        .map_or("", |text| Rarity::parse(text).symbol());
    let types = card.types.as_deref().map(format_types).unwrap_or_default();
    format!(
        "{} {:<12} {:<width$} {:<16} {:>4} HP {}",
        star(starred),
        card.id,
        truncate_text(&card.name, NAME_WIDTH),
        types,
        parse_hp(card.hp.as_deref()),
        rarity,
        width = NAME_WIDTH + 3,
    )
}

fn detail_lines(card: &Card, starred: bool) -> Vec<String> {
    let mut lines = vec![format!("{} {} ({})", star(starred), card.name, card.id)];

    if let Some(numbers) = card.national_pokedex_numbers.as_deref() {
        let numbers: Vec<String> = numbers.iter().copied().map(format_pokedex_number).collect();
        if !numbers.is_empty() {
            lines.push(format!("  Pokédex: {}", numbers.join(", ")));
        }
    }
    if let Some(types) = card.types.as_deref() {
        lines.push(format!("  Types:   {}", format_types(types)));
    }
    if card.hp.is_some() {
        lines.push(format!("  HP:      {}", parse_hp(card.hp.as_deref())));
    }
    if let Some(rarity) = card.rarity.as_deref() {
        let rarity = Rarity::parse(rarity);
        lines.push(format!("  Rarity:  {} {}", rarity.symbol(), rarity));
    }
    if let Some(set) = &card.set {
        let number = card.number.as_deref().unwrap_or("?");
        lines.push(format!(
            "  Set:     {} ({}) #{number}",
            set.name,
            capitalize_words(&set.series)
        ));
    }
    if let Some(artist) = &card.artist {
        lines.push(format!("  Artist:  {artist}"));
    }
    if is_valid_image_url(&card.images.large) {
        lines.push(format!("  Image:   {}", card.images.large));
    }
    lines
}

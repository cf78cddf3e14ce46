//! Listing queries and their URL parameters.

/// A card listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardQuery {
    /// Cards whose name matches `term`; all Pokémon cards when `term` is absent or blank.
    Search {
        /// Name to search for
        term: Option<String>,
        /// Cards per page
        page_size: u32,
        /// 1-based page number
        page: u32,
    },
    /// Cards of one energy type.
    ByType {
        /// Energy type, e.g. "Fire"
        card_type: String,
        /// Cards per page
        page_size: u32,
    },
    /// Cards depicting one National Pokédex entry.
    ByPokedexNumber(u32),
}

impl CardQuery {
    /// Query parameters for `GET /cards`, unencoded.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Search {
                term,
                page_size,
                page,
            } => {
                let q = match term.as_deref().map(str::trim) {
                    Some(term) if !term.is_empty() => name_filter(term),
                    _ => "supertype:pokemon".to_string(),
                };
                vec![
                    ("q", q),
                    ("orderBy", "number,name".to_string()),
                    ("pageSize", page_size.to_string()),
                    ("page", page.to_string()),
                ]
            },
            Self::ByType {
                card_type,
                page_size,
            } => vec![
                ("q", format!("types:{}", card_type.trim())),
                ("orderBy", "name".to_string()),
                ("pageSize", page_size.to_string()),
            ],
            Self::ByPokedexNumber(number) => vec![
                ("q", format!("nationalPokedexNumbers:{number}")),
                ("orderBy", "name".to_string()),
            ],
        }
    }
}

// Multi-word names must be quoted or the catalog treats the rest as separate clauses.
fn name_filter(term: &str) -> String {
    let term: String = term.chars().filter(|c| *c != '"').collect();
    if term.contains(char::is_whitespace) {
        format!("name:\"{term}\"")
    } else {
        format!("name:{term}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(query: &CardQuery) -> String {
        query
            .params()
            .into_iter()
            .find(|(k, _)| *k == "q")
            .map(|(_, v)| v)
            .unwrap_or_default()
    }

    #[test]
    fn blank_search_lists_all_pokemon() {
        for term in [None, Some(String::new()), Some("   ".to_string())] {
            let query = CardQuery::Search {
                term,
                page_size: 15,
                page: 1,
            };
            assert_eq!(q(&query), "supertype:pokemon");
        }
    }

    #[test]
    fn search_params_in_order() {
        let query = CardQuery::Search {
            term: Some("pikachu".to_string()),
            page_size: 15,
            page: 2,
        };
        assert_eq!(
            query.params(),
            vec![
                ("q", "name:pikachu".to_string()),
                ("orderBy", "number,name".to_string()),
                ("pageSize", "15".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn multi_word_names_are_quoted() {
        let query = CardQuery::Search {
            term: Some("mr \"mime\"".to_string()),
            page_size: 15,
            page: 1,
        };
        assert_eq!(q(&query), "name:\"mr mime\"");
    }

    #[test]
    fn type_and_pokedex_queries() {
        let by_type = CardQuery::ByType {
            card_type: "Fire".to_string(),
            page_size: 10,
        };
        assert_eq!(q(&by_type), "types:Fire");
        assert!(by_type.params().contains(&("orderBy", "name".to_string())));

        let by_number = CardQuery::ByPokedexNumber(25);
        assert_eq!(q(&by_number), "nationalPokedexNumbers:25");
        assert!(!by_number.params().iter().any(|(k, _)| *k == "pageSize"));
    }
}

//! Search term and category filtering over the master list.

use futures::future::join_all;
use tracing::debug;

use crate::api::PokeApi;
use crate::models::PokemonSummary;

/// Most cards a single grid shows
pub const MAX_GRID_RESULTS: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub term: String,
    pub category: Option<String>,
}

impl FilterQuery {
    pub fn new(term: impl Into<String>, category: Option<String>) -> Self {
        Self {
            term: term.into(),
            category,
        }
    }

    /// The selected category, treating a blank one as unset
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Case-insensitive substring match of `term` against names, in list order.
pub fn match_term<'a>(master: &'a [PokemonSummary], term: &str) -> Vec<&'a PokemonSummary> {
    let needle = term.trim().to_lowercase();
    master
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Names to render for `query`, at most `MAX_GRID_RESULTS`.
///
/// With a category selected every term match is fetched concurrently and
/// kept only if it carries that category; without one no detail is fetched.
pub async fn apply_filters(
    api: &PokeApi,
    master: &[PokemonSummary],
    query: &FilterQuery,
) -> Vec<String> {
    let candidates = match_term(master, &query.term);

    let mut names: Vec<String> = match query.category() {
        Some(category) => {
            debug!(candidates = candidates.len(), category, "Fetching details for category filter");
            let details = join_all(
                candidates
                    .iter()
                    .map(|p| api.fetch_pokemon_details(&p.name)),
            )
            .await;
            details
                .into_iter()
                .flatten()
                .filter(|d| d.has_type(category))
                .map(|d| d.name.clone())
                .collect()
        }
        None => candidates.into_iter().map(|p| p.name.clone()).collect(),
    };

    names.truncate(MAX_GRID_RESULTS);
    names
}

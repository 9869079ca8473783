//! Resolving identifiers into grid cards.

use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::api::PokeApi;
use crate::models::PokemonDetail;
use crate::router::Route;

/// Context-dependent action a card offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    AddToTeam,
    RemoveFromTeam,
}

impl CardAction {
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Home => CardAction::AddToTeam,
            Route::Team => CardAction::RemoveFromTeam,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardAction::AddToTeam => "Add",
            CardAction::RemoveFromTeam => "Remove",
        }
    }
}

/// One rendered grid item
#[derive(Debug, Clone)]
pub struct Card {
    pub detail: Arc<PokemonDetail>,
    pub action: CardAction,
}

/// Fetch details for every identifier at once. Identifiers that resolve to
/// nothing are dropped; the rest keep their input order.
pub async fn resolve_details<S: AsRef<str>>(
    api: &PokeApi,
    identifiers: &[S],
) -> Vec<Arc<PokemonDetail>> {
    let details = join_all(
        identifiers
            .iter()
            .map(|id| api.fetch_pokemon_details(id.as_ref())),
    )
    .await;

    let resolved: Vec<Arc<PokemonDetail>> = details.into_iter().flatten().collect();
    if resolved.len() < identifiers.len() {
        debug!(
            requested = identifiers.len(),
            resolved = resolved.len(),
            "Dropped unresolved grid entries"
        );
    }
    resolved
}

/// Resolve identifiers into cards carrying the action for `route`.
pub async fn build_cards<S: AsRef<str>>(
    api: &PokeApi,
    identifiers: &[S],
    route: Route,
) -> Vec<Card> {
    let action = CardAction::for_route(route);
    resolve_details(api, identifiers)
        .await
        .into_iter()
        .map(|detail| Card { detail, action })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;

    #[tokio::test]
    async fn test_keeps_input_order_and_drops_missing() {
        let (api, _) = ScriptedTransport::new()
            .with_pokemon(7, "squirtle", &["water"])
            .with_pokemon(1, "bulbasaur", &["grass", "poison"])
            .into_api();

        let details = resolve_details(&api, &["squirtle", "missingno", "bulbasaur"]).await;
        let names: Vec<&str> = details.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["squirtle", "bulbasaur"]);
    }

    #[tokio::test]
    async fn test_cached_entries_not_refetched() {
        let (api, transport) = ScriptedTransport::new()
            .with_pokemon(25, "pikachu", &["electric"])
            .into_api();

        resolve_details(&api, &["pikachu"]).await;
        resolve_details(&api, &["pikachu", "25"]).await;
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cards_carry_route_action() {
        let (api, _) = ScriptedTransport::new()
            .with_pokemon(25, "pikachu", &["electric"])
            .into_api();

        let names = vec!["pikachu".to_string()];
        let home = build_cards(&api, &names, Route::Home).await;
        let team = build_cards(&api, &names, Route::Team).await;

        assert_eq!(home[0].action, CardAction::AddToTeam);
        assert_eq!(team[0].action, CardAction::RemoveFromTeam);
        assert_eq!(team[0].action.label(), "Remove");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (api, transport) = ScriptedTransport::new().into_api();
        let empty: [&str; 0] = [];
        assert!(resolve_details(&api, &empty).await.is_empty());
        assert_eq!(transport.call_count(), 0);
    }
}

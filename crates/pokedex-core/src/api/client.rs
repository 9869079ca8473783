//! Gateway for the PokéAPI REST endpoints.
//!
//! Every public fetch goes through the shared `MemoCache` first and fails
//! soft: errors are logged and turned into an empty list or `None` so that
//! rendering code never has to deal with them.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::MemoCache;
use crate::config::Config;
use crate::models::{ListResponse, NamedResource, PokemonDetail, PokemonSummary};

use super::transport::{HttpTransport, Transport};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Public PokéAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Categories the API lists but no Pokémon actually carries
const EXCLUDED_TYPES: [&str; 2] = ["unknown", "shadow"];

/// Cache key for the category list
const TYPES_CACHE_KEY: &str = "types";

/// Values stored in the memo table. One table serves every endpoint, so the
/// variant records which shape a key holds.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Summaries(Vec<PokemonSummary>),
    Detail(Arc<PokemonDetail>),
    Types(Vec<String>),
}

/// Cache key for a `/pokemon?limit=N` list
pub fn list_cache_key(limit: u32) -> String {
    format!("all_{}", limit)
}

/// Normalise a name or numeric id into a lookup key.
fn identifier_key(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// PokéAPI client with a process-lifetime memo cache.
/// Clone is cheap and clones share both the transport and the cache.
#[derive(Clone)]
pub struct PokeApi {
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    cache: Arc<MemoCache<CachedValue>>,
}

impl PokeApi {
    /// Create a client over HTTP using the configured base URL and timeout
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_transport(config.base_url(), Arc::new(transport)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            transport,
            cache: Arc::new(MemoCache::new()),
        }
    }

    pub fn cache(&self) -> &MemoCache<CachedValue> {
        &self.cache
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.transport.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // ===== Data Fetching Methods =====

    /// Fetch the first `limit` Pokémon names. Empty on any failure.
    pub async fn fetch_all_pokemon(&self, limit: u32) -> Vec<PokemonSummary> {
        let key = list_cache_key(limit);
        if let Some(CachedValue::Summaries(list)) = self.cache.get(&key) {
            debug!(key = %key, "list served from cache");
            return list;
        }

        let url = format!("{}/pokemon?limit={}", self.base_url, limit);
        match self.get_json::<ListResponse<PokemonSummary>>(&url).await {
            Ok(response) => {
                debug!(count = response.results.len(), "Fetched pokemon list");
                self.cache
                    .set(key, CachedValue::Summaries(response.results.clone()));
                response.results
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), limit, "Failed to fetch pokemon list");
                Vec::new()
            }
        }
    }

    /// Fetch one Pokémon by name or numeric id. `None` on any failure,
    /// including a 404 for an unknown identifier.
    pub async fn fetch_pokemon_details(&self, identifier: &str) -> Option<Arc<PokemonDetail>> {
        let key = identifier_key(identifier);
        if key.is_empty() {
            return None;
        }
        if let Some(CachedValue::Detail(detail)) = self.cache.get(&key) {
            return Some(detail);
        }

        let url = format!("{}/pokemon/{}", self.base_url, key);
        match self.get_json::<PokemonDetail>(&url).await {
            Ok(detail) => {
                let detail = Arc::new(detail);
                // Serve later lookups by either name or id
                self.cache.set(detail.id.to_string(), CachedValue::Detail(detail.clone()));
                self.cache.set(key, CachedValue::Detail(detail.clone()));
                Some(detail)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    identifier = %key,
                    "Failed to fetch pokemon details"
                );
                None
            }
        }
    }

    /// Fetch the category names, minus the sentinel categories. Empty on failure.
    pub async fn fetch_types(&self) -> Vec<String> {
        if let Some(CachedValue::Types(types)) = self.cache.get(TYPES_CACHE_KEY) {
            return types;
        }

        let url = format!("{}/type", self.base_url);
        match self.get_json::<ListResponse<NamedResource>>(&url).await {
            Ok(response) => {
                let types: Vec<String> = response
                    .results
                    .into_iter()
                    .map(|t| t.name)
                    .filter(|name| !EXCLUDED_TYPES.contains(&name.as_str()))
                    .collect();
                self.cache.set(TYPES_CACHE_KEY, CachedValue::Types(types.clone()));
                types
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Failed to fetch types");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{list_json, ScriptedTransport, BASE_URL};

    #[tokio::test]
    async fn test_details_fetched_once_per_identifier() {
        let (api, transport) = ScriptedTransport::new()
            .with_pokemon(4, "charmander", &["fire"])
            .into_api();

        let first = api.fetch_pokemon_details("charmander").await.expect("found");
        let second = api.fetch_pokemon_details("charmander").await.expect("found");

        assert_eq!(first.id, 4);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_details_cached_under_id_and_name() {
        let (api, transport) = ScriptedTransport::new()
            .with_pokemon(4, "charmander", &["fire"])
            .into_api();

        api.fetch_pokemon_details("charmander").await.expect("found");
        let by_id = api.fetch_pokemon_details("4").await.expect("served from cache");

        assert_eq!(by_id.name, "charmander");
        assert_eq!(transport.call_count(), 1);
        assert!(api.cache().contains("4"));
        assert!(api.cache().contains("charmander"));
    }

    #[tokio::test]
    async fn test_identifier_is_normalised() {
        let (api, transport) = ScriptedTransport::new()
            .with_pokemon(4, "charmander", &["fire"])
            .into_api();

        assert!(api.fetch_pokemon_details("  Charmander ").await.is_some());
        assert_eq!(transport.calls(), vec![format!("{}/pokemon/charmander", BASE_URL)]);

        assert!(api.fetch_pokemon_details("   ").await.is_none());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_pokemon_is_none_and_not_cached() {
        let (api, transport) = ScriptedTransport::new().into_api();

        assert!(api.fetch_pokemon_details("missingno").await.is_none());
        assert!(api.fetch_pokemon_details("missingno").await.is_none());
        assert_eq!(transport.call_count(), 2);
        assert!(api.cache().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_detail_is_none() {
        let (api, _) = ScriptedTransport::new()
            .with_body("/pokemon/glitch", "{not json")
            .into_api();
        assert!(api.fetch_pokemon_details("glitch").await.is_none());
    }

    #[tokio::test]
    async fn test_list_cached_by_limit() {
        let (api, transport) = ScriptedTransport::new()
            .with_body("/pokemon?limit=3", list_json(&["bulbasaur", "ivysaur", "venusaur"]))
            .into_api();

        let list = api.fetch_all_pokemon(3).await;
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].name, "bulbasaur");

        api.fetch_all_pokemon(3).await;
        assert_eq!(transport.call_count(), 1);
        assert!(api.cache().contains(&list_cache_key(3)));
    }

    #[tokio::test]
    async fn test_list_fails_soft() {
        let (api, _) = ScriptedTransport::new()
            .with_status("/pokemon?limit=151", 503)
            .into_api();
        assert!(api.fetch_all_pokemon(151).await.is_empty());
        assert!(api.cache().is_empty());
    }

    #[tokio::test]
    async fn test_types_exclude_sentinels() {
        let (api, transport) = ScriptedTransport::new()
            .with_body("/type", list_json(&["normal", "unknown", "shadow", "fire"]))
            .into_api();

        assert_eq!(api.fetch_types().await, vec!["normal", "fire"]);
        assert_eq!(api.fetch_types().await, vec!["normal", "fire"]);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_types_fail_soft() {
        let (api, _) = ScriptedTransport::new().with_body("/type", r#"{"oops": true}"#).into_api();
        assert!(api.fetch_types().await.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let (api, _) = ScriptedTransport::new().into_api();
        let api = PokeApi::with_transport(&format!("{}/", BASE_URL), api.transport.clone());
        assert_eq!(&*api.base_url, BASE_URL);
    }
}

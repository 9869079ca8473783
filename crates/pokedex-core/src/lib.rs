//! Core library for the Pokédex client.
//!
//! - `api`: PokéAPI gateway with a shared memo cache and soft-failing fetches
//! - `cache`: the process-lifetime memo table
//! - `team`: the persisted six-member team and its change notifications
//! - `storage`: key/value persistence port with file and memory backends
//! - `router`: `#home` / `#team` view routing
//! - `filter`, `grid`: search and category filtering, concurrent card resolution
//! - `theme`, `config`, `utils`: preferences, settings and display helpers

pub mod api;
pub mod cache;
pub mod config;
pub mod filter;
pub mod grid;
pub mod models;
pub mod router;
pub mod storage;
pub mod team;
pub mod theme;
pub mod utils;

pub use api::{ApiError, PokeApi};
pub use config::Config;
pub use filter::{apply_filters, FilterQuery, MAX_GRID_RESULTS};
pub use grid::{build_cards, resolve_details, Card, CardAction};
pub use models::{PokemonDetail, PokemonSummary, TeamMember};
pub use router::{Route, Router};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use team::{TeamError, TeamEvent, TeamStore, MAX_TEAM_SIZE};
pub use theme::Theme;

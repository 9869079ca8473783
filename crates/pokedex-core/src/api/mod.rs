//! REST API client module for PokéAPI.
//!
//! `PokeApi` fetches the Pokémon list, individual records and the category
//! list, memoizing every successful response. Transport failures never reach
//! callers; they come back as empty lists or `None`.

pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{list_cache_key, CachedValue, PokeApi, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use transport::{HttpTransport, Transport};

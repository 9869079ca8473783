//! In-memory memoization for API responses.
//!
//! `MemoCache` holds list results and Pokémon details for the lifetime of the
//! process. Nothing is written to disk and nothing expires; the dataset a
//! session touches is a few hundred entries at most.

pub mod memo;

pub use memo::{CacheEntry, MemoCache};

//! Data models for PokéAPI entities and the local team.
//!
//! - `PokemonSummary`: list entry used for searching before details are loaded
//! - `PokemonDetail`: full record with sprites, types and base stats
//! - `TeamMember`: the slice of a detail that is persisted with the team

pub mod pokemon;
pub mod team;

pub use pokemon::{
    Artwork, ListResponse, NamedResource, OtherSprites, PokemonDetail, PokemonSummary, Sprites,
    StatEntry, TypeSlot,
};
pub use team::TeamMember;

use serde::{Deserialize, Serialize};

use super::PokemonDetail;

/// A team slot: the reduced projection of a `PokemonDetail` that gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<&PokemonDetail> for TeamMember {
    fn from(detail: &PokemonDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name.clone(),
            image: detail.sprite_url().map(String::from),
        }
    }
}

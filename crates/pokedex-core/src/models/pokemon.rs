use serde::{Deserialize, Serialize};

/// A `{name, url}` pair as the API returns it in list and link fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Minimal reference used for listing and filtering before a detail fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl PokemonSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// Envelope for `/pokemon?limit=N` and `/type`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: Option<u32>,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: Option<u8>,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// Full record from `/pokemon/{identifier}`, kept as the API sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
}

impl PokemonDetail {
    /// Category names in slot order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.kind.name.as_str())
    }

    pub fn has_type(&self, category: &str) -> bool {
        self.type_names().any(|t| t == category)
    }

    /// Official artwork when the API has it, otherwise the default sprite.
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }

    pub fn sprite_url(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHARMANDER: &str = r#"{
        "id": 4,
        "name": "charmander",
        "height": 6,
        "weight": 85,
        "base_experience": 62,
        "sprites": {
            "front_default": "https://img/4.png",
            "back_default": null,
            "other": {
                "official-artwork": { "front_default": "https://img/art/4.png", "front_shiny": null },
                "dream_world": { "front_default": null }
            }
        },
        "types": [ { "slot": 1, "type": { "name": "fire", "url": "https://pokeapi.co/api/v2/type/10/" } } ],
        "stats": [
            { "base_stat": 39, "effort": 0, "stat": { "name": "hp", "url": "x" } },
            { "base_stat": 52, "effort": 0, "stat": { "name": "attack", "url": "x" } }
        ]
    }"#;

    #[test]
    fn test_parse_detail_ignores_unknown_fields() {
        let detail: PokemonDetail = serde_json::from_str(CHARMANDER).expect("valid detail");
        assert_eq!(detail.id, 4);
        assert_eq!(detail.name, "charmander");
        assert_eq!(detail.height, 6);
        assert_eq!(detail.weight, 85);
        assert_eq!(detail.stats.len(), 2);
        assert_eq!(detail.stats[1].stat.name, "attack");
        assert!(detail.has_type("fire"));
        assert!(!detail.has_type("water"));
    }

    #[test]
    fn test_artwork_prefers_official() {
        let detail: PokemonDetail = serde_json::from_str(CHARMANDER).expect("valid detail");
        assert_eq!(detail.artwork_url(), Some("https://img/art/4.png"));
        assert_eq!(detail.sprite_url(), Some("https://img/4.png"));
    }

    #[test]
    fn test_artwork_falls_back_to_sprite() {
        let json = r#"{"id": 1, "name": "bulbasaur", "sprites": {"front_default": "https://img/1.png", "other": null}}"#;
        let detail: PokemonDetail = serde_json::from_str(json).expect("valid detail");
        assert_eq!(detail.artwork_url(), Some("https://img/1.png"));
        assert!(detail.types.is_empty());
    }

    #[test]
    fn test_parse_list_response() {
        let json = r#"{"count": 1302, "next": "x", "previous": null,
            "results": [{"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}]}"#;
        let list: ListResponse<PokemonSummary> = serde_json::from_str(json).expect("valid list");
        assert_eq!(list.count, Some(1302));
        assert_eq!(list.results[0].name, "bulbasaur");
    }
}

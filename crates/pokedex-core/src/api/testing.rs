//! Scripted transport for tests: canned bodies keyed by URL, with a call log.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::{self, BoxFuture, FutureExt};

use super::{ApiError, PokeApi, Transport};

pub const BASE_URL: &str = "https://poke.test/api/v2";

enum Reply {
    Body(String),
    Status(u16),
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `path` (relative to `BASE_URL`) with `body`.
    pub fn with_body(self, path: &str, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(format!("{}{}", BASE_URL, path), Reply::Body(body.into()));
        self
    }

    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(format!("{}{}", BASE_URL, path), Reply::Status(status));
        self
    }

    /// Register a minimal detail record reachable by name.
    pub fn with_pokemon(self, id: u32, name: &str, types: &[&str]) -> Self {
        let body = detail_json(id, name, types);
        self.with_body(&format!("/pokemon/{}", name), body)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn into_api(self) -> (PokeApi, Arc<ScriptedTransport>) {
        let transport = Arc::new(self);
        let api = PokeApi::with_transport(BASE_URL, transport.clone());
        (api, transport)
    }
}

impl Transport for ScriptedTransport {
    fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, ApiError>> {
        self.calls.lock().unwrap().push(url.to_string());
        let result = match self.replies.lock().unwrap().get(url) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(404)) | None => Err(ApiError::NotFound(url.to_string())),
            Some(Reply::Status(code)) => Err(ApiError::ServerError(format!("status {}", code))),
        };
        future::ready(result).boxed()
    }
}

pub fn detail_json(id: u32, name: &str, types: &[&str]) -> String {
    let types: Vec<serde_json::Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| serde_json::json!({ "slot": i + 1, "type": { "name": t, "url": "" } }))
        .collect();
    serde_json::json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": format!("https://img/{}.png", id),
            "other": { "official-artwork": { "front_default": format!("https://img/art/{}.png", id) } }
        },
        "types": types,
        "stats": [ { "base_stat": 45, "stat": { "name": "hp", "url": "" } } ]
    })
    .to_string()
}

pub fn list_json(names: &[&str]) -> String {
    let results: Vec<serde_json::Value> = names
        .iter()
        .map(|n| serde_json::json!({ "name": n, "url": "" }))
        .collect();
    serde_json::json!({ "count": names.len(), "results": results }).to_string()
}

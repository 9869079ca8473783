//! The user's team: at most six distinct Pokémon, persisted after every change.
//!
//! Mutations go through `add` and `remove` only. Each one saves the team to
//! the `pokemon_team` entry and broadcasts a `TeamEvent` so views can refresh
//! the team badge or re-render the team page.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::models::{PokemonDetail, TeamMember};
use crate::storage::{load_json, save_json, KeyValueStore};

/// Maximum number of members on a team
pub const MAX_TEAM_SIZE: usize = 6;

/// Storage key for the serialized team
pub const TEAM_STORAGE_KEY: &str = "pokemon_team";

/// Buffer for change notifications. Receivers that lag only miss
/// intermediate sizes, and every event carries the current size.
const EVENT_BUFFER_SIZE: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("Your team is full! (Max {max})")]
    Full { max: usize },

    #[error("{name} is already on your team!")]
    AlreadyOnTeam { name: String },
}

/// Broadcast after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamEvent {
    pub size: usize,
}

pub struct TeamStore {
    members: Vec<TeamMember>,
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<TeamEvent>,
}

impl TeamStore {
    /// Restore the team from `store`. Absent or corrupt data gives an empty team.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let stored: Vec<TeamMember> =
            load_json(store.as_ref(), TEAM_STORAGE_KEY).unwrap_or_default();
        let members = Self::normalize(stored);
        debug!(size = members.len(), "Team loaded");

        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            members,
            store,
            events,
        }
    }

    /// Drop repeated ids (first wins) and anything past the size cap.
    fn normalize(stored: Vec<TeamMember>) -> Vec<TeamMember> {
        let mut members: Vec<TeamMember> = Vec::with_capacity(MAX_TEAM_SIZE);
        for member in stored {
            if members.len() == MAX_TEAM_SIZE {
                warn!("Stored team exceeds {} members, truncating", MAX_TEAM_SIZE);
                break;
            }
            if members.iter().any(|m| m.id == member.id) {
                warn!(id = member.id, "Dropping duplicate stored team member");
                continue;
            }
            members.push(member);
        }
        members
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    pub fn contains(&self, id: u32) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Member names in team order, for resolving the team grid
    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TeamEvent> {
        self.events.subscribe()
    }

    /// Append `detail` to the team. The error's message is meant for the user.
    pub fn add(&mut self, detail: &PokemonDetail) -> Result<(), TeamError> {
        if self.is_full() {
            return Err(TeamError::Full { max: MAX_TEAM_SIZE });
        }
        if self.contains(detail.id) {
            return Err(TeamError::AlreadyOnTeam {
                name: detail.name.clone(),
            });
        }

        self.members.push(TeamMember::from(detail));
        info!(id = detail.id, name = %detail.name, size = self.members.len(), "Added to team");
        self.save_team();
        Ok(())
    }

    /// Remove the member with `id`. Absent ids leave the team unchanged.
    pub fn remove(&mut self, id: u32) {
        self.members.retain(|m| m.id != id);
        info!(id, size = self.members.len(), "Removed from team");
        self.save_team();
    }

    fn save_team(&self) {
        if let Err(e) = save_json(self.store.as_ref(), TEAM_STORAGE_KEY, &self.members) {
            warn!(error = %e, "Failed to persist team");
        }
        self.notify_team_change();
    }

    /// Broadcast the current size to every subscriber.
    pub fn notify_team_change(&self) {
        let event = TeamEvent {
            size: self.members.len(),
        };
        if self.events.send(event).is_err() {
            debug!("Team changed with no subscribers");
        }
    }
}

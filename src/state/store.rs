use chrono::{DateTime, Utc};

use super::data::Entity;
use super::schedule::{Generations, Ticket};

/// Load progress of one view's collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// The fetch failed; the collection stays empty
    Failed(String),
}

/// The EntityStore holds the full unfiltered collection of one view.
///
/// It is filled once per mount by a fetch whose completion must present
/// the ticket issued by `begin_fetch`; completions for an older fetch or
/// for an unmounted view are discarded.
#[derive(Debug)]
pub struct EntityStore {
    entities: Vec<Entity>,
    load: LoadState,
    fetches: Generations,
    live: Option<Ticket>,
    fetched_at: Option<DateTime<Utc>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            load: LoadState::Loading,
            fetches: Generations::new(),
            live: None,
            fetched_at: None,
        }
    }

    /// Start a fetch; the returned ticket must accompany its completion
    pub fn begin_fetch(&mut self) -> Ticket {
        self.load = LoadState::Loading;
        let ticket = self.fetches.issue();
        self.live = Some(ticket);
        ticket
    }

    /// Apply a fetch completion. Returns false when the ticket is stale.
    pub fn complete<E: ToString>(&mut self, ticket: Ticket, result: Result<Vec<Entity>, E>) -> bool {
        if !self.fetches.is_live(ticket) {
            return false;
        }

        match result {
            Ok(entities) => {
                self.entities = entities;
                self.load = LoadState::Loaded;
                self.fetched_at = Some(Utc::now());
            }
            Err(e) => {
                self.entities = Vec::new();
                self.load = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    /// Whether `ticket` belongs to the current fetch of a mounted view
    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.fetches.is_live(ticket)
    }

    /// Ticket of the current fetch, `None` once detached
    pub fn current_ticket(&self) -> Option<Ticket> {
        self.live
    }

    /// Invalidate any in-flight fetch, used on unmount
    pub fn detach(&mut self) {
        self.fetches.cancel();
        self.live = None;
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::CatalogKind;

    fn sample() -> Vec<Entity> {
        vec![
            Entity::new("1", CatalogKind::Abilities, "Rasengan"),
            Entity::new("2", CatalogKind::Abilities, "Chidori"),
        ]
    }

    #[test]
    fn test_live_fetch_replaces_collection() {
        let mut store = EntityStore::new();
        let ticket = store.begin_fetch();
        assert_eq!(store.load_state(), &LoadState::Loading);

        assert!(store.complete::<String>(ticket, Ok(sample())));
        assert_eq!(store.entities().len(), 2);
        assert_eq!(store.load_state(), &LoadState::Loaded);
        assert!(store.fetched_at().is_some());
    }

    #[test]
    fn test_completion_after_detach_is_discarded() {
        let mut store = EntityStore::new();
        let ticket = store.begin_fetch();
        store.detach();
        assert_eq!(store.current_ticket(), None);
        assert!(!store.complete::<String>(ticket, Ok(sample())));
        assert!(store.entities().is_empty());
    }

    #[test]
    fn test_older_fetch_is_discarded() {
        let mut store = EntityStore::new();
        let old = store.begin_fetch();
        let new = store.begin_fetch();
        assert!(store.complete::<String>(new, Ok(sample())));
        assert!(!store.complete::<String>(old, Ok(Vec::new())));
        assert_eq!(store.entities().len(), 2);
    }

    #[test]
    fn test_failure_clears_collection() {
        let mut store = EntityStore::new();
        let ticket = store.begin_fetch();
        store.complete::<String>(ticket, Ok(sample()));
        let ticket = store.begin_fetch();
        store.complete(ticket, Err("HTTP 500"));
        assert!(store.entities().is_empty());
        assert_eq!(store.load_state(), &LoadState::Failed("HTTP 500".into()));
    }
}

//! In-process player store.
//!
//! Keeps players in a `BTreeMap` keyed by id, so iteration is already in id
//! order. Ids start at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

use super::PlayerStore;
use crate::filter::{PageRequest, PlayerFilter};
use crate::models::{NewPlayer, Player};

/// Player store backed by process memory.
#[derive(Debug)]
pub struct MemoryPlayerStore {
    players: RwLock<BTreeMap<i64, Player>>,
    next_id: AtomicI64,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored players.
    pub fn len(&self) -> usize {
        self.players.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.read().is_empty()
    }

    fn matching(&self, filter: &PlayerFilter) -> Vec<Player> {
        let predicates = filter.predicates();
        self.players
            .read()
            .values()
            .filter(|player| predicates.iter().all(|p| p.matches(player)))
            .cloned()
            .collect()
    }
}

impl Default for MemoryPlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.players.read().contains_key(&id))
    }

    async fn get(&self, id: i64) -> Result<Option<Player>> {
        Ok(self.players.read().get(&id).cloned())
    }

    async fn find_all(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        Ok(self.matching(filter))
    }

    async fn find_page(&self, filter: &PlayerFilter, page: &PageRequest) -> Result<Vec<Player>> {
        let mut players = self.matching(filter);
        players.sort_by(|a, b| page.order.compare(a, b));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(players.into_iter().skip(offset).take(limit).collect())
    }

    async fn insert(&self, player: NewPlayer) -> Result<Player> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let player = player.into_player(id);
        self.players.write().insert(id, player.clone());
        Ok(player)
    }

    async fn save(&self, player: &Player) -> Result<bool> {
        let mut players = self.players.write();
        match players.get_mut(&player.id) {
            Some(stored) => {
                *stored = player.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.players.write().remove(&id).is_some())
    }

    async fn healthy(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

//! Player persistence abstraction.
//!
//! All player reads and writes go through [`PlayerStore`]. Two backends
//! exist: [`PgPlayerStore`] for PostgreSQL and [`MemoryPlayerStore`] for
//! running without a database (and for tests).
//!
//! Stores do no validation; they persist whatever the service hands them.

mod memory;
mod postgres;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryPlayerStore;
pub use postgres::PgPlayerStore;

use crate::filter::{PageRequest, PlayerFilter};
use crate::models::{NewPlayer, Player};

/// Persistence operations over player records.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Whether a player with this id exists.
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Load a player by id.
    async fn get(&self, id: i64) -> Result<Option<Player>>;

    /// Every player matching the filter, ordered by id.
    async fn find_all(&self, filter: &PlayerFilter) -> Result<Vec<Player>>;

    /// One page of players matching the filter.
    async fn find_page(&self, filter: &PlayerFilter, page: &PageRequest) -> Result<Vec<Player>>;

    /// Number of players matching the filter.
    ///
    /// Defaults to counting [`find_all`](Self::find_all); backends that can
    /// count without materializing rows override it.
    async fn count(&self, filter: &PlayerFilter) -> Result<u64> {
        Ok(self.find_all(filter).await?.len() as u64)
    }

    /// Persist a new player and return it with its assigned id.
    async fn insert(&self, player: NewPlayer) -> Result<Player>;

    /// Overwrite an existing player. Returns `false` if the id is unknown.
    async fn save(&self, player: &Player) -> Result<bool>;

    /// Remove a player. Returns `false` if the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Whether the backing store is reachable.
    async fn healthy(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

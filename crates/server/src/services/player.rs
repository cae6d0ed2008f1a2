//! Player service.
//!
//! Orchestrates validation, level derivation, and store access for the
//! player CRUD, listing, and counting operations.

use std::sync::Arc;

use tracing::{debug, info};

use super::validation::{validate_create, validate_update};
use crate::error::{AppError, AppResult};
use crate::filter::{PageRequest, PlayerFilter};
use crate::metrics::Metrics;
use crate::models::{CreatePlayer, Player, UpdatePlayer};
use crate::store::PlayerStore;

/// Service for player operations.
#[derive(Clone)]
pub struct PlayerService {
    inner: Arc<PlayerServiceInner>,
}

struct PlayerServiceInner {
    store: Arc<dyn PlayerStore>,
    metrics: Arc<Metrics>,
}

impl PlayerService {
    /// Create a new player service.
    pub fn new(store: Arc<dyn PlayerStore>, metrics: Arc<Metrics>) -> Self {
        Self {
            inner: Arc::new(PlayerServiceInner { store, metrics }),
        }
    }

    /// Validate and persist a new player.
    pub async fn create(&self, input: CreatePlayer) -> AppResult<Player> {
        let new_player = validate_create(input).inspect_err(|e| {
            debug!(error = %e, "rejected player create");
            self.record("create", e);
        })?;

        let player = self
            .inner
            .store
            .insert(new_player)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| self.record("create", e))?;

        self.inner.metrics.record_operation("create", "ok");
        info!(player_id = player.id, level = player.level, "player created");
        Ok(player)
    }

    /// Load a player by id.
    pub async fn read(&self, id: i64) -> AppResult<Player> {
        self.inner
            .store
            .get(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Apply a sparse update to an existing player.
    ///
    /// Existence is checked before validation, so an unknown id is reported
    /// as not found even when the update is also invalid.
    pub async fn update(&self, id: i64, input: UpdatePlayer) -> AppResult<Player> {
        let Some(mut player) = self.load("update", id).await? else {
            self.record("update", &AppError::NotFound);
            return Err(AppError::NotFound);
        };

        validate_update(&input).inspect_err(|e| {
            debug!(player_id = id, error = %e, "rejected player update");
            self.record("update", e);
        })?;

        if input.is_empty() {
            debug!(player_id = id, "empty player update");
            return Ok(player);
        }

        input.apply_to(&mut player);

        let saved = self
            .inner
            .store
            .save(&player)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| self.record("update", e))?;

        if !saved {
            // Deleted between the read and the write
            self.record("update", &AppError::NotFound);
            return Err(AppError::NotFound);
        }

        self.inner.metrics.record_operation("update", "ok");
        info!(player_id = id, level = player.level, "player updated");
        Ok(player)
    }

    /// Delete a player, returning the record as it was before removal.
    pub async fn delete(&self, id: i64) -> AppResult<Player> {
        let Some(player) = self.load("delete", id).await? else {
            self.record("delete", &AppError::NotFound);
            return Err(AppError::NotFound);
        };

        let deleted = self
            .inner
            .store
            .delete(id)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| self.record("delete", e))?;

        if !deleted {
            self.record("delete", &AppError::NotFound);
            return Err(AppError::NotFound);
        }

        self.inner.metrics.record_operation("delete", "ok");
        info!(player_id = id, "player deleted");
        Ok(player)
    }

    /// Whether a player with this id exists.
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.inner.store.exists(id).await?)
    }

    /// Every player matching the filter, in store order.
    pub async fn read_all(&self, filter: &PlayerFilter) -> AppResult<Vec<Player>> {
        Ok(self.inner.store.find_all(filter).await?)
    }

    /// One page of players matching the filter.
    pub async fn list(&self, filter: &PlayerFilter, page: &PageRequest) -> AppResult<Vec<Player>> {
        let players = self.inner.store.find_page(filter, page).await?;
        debug!(
            page = page.number,
            size = page.size,
            order = %page.order,
            returned = players.len(),
            "listed players"
        );
        Ok(players)
    }

    /// Number of players matching the filter.
    pub async fn count(&self, filter: &PlayerFilter) -> AppResult<u64> {
        Ok(self.inner.store.count(filter).await?)
    }

    /// Fetch a player ahead of a write, counting store failures against `operation`.
    async fn load(&self, operation: &str, id: i64) -> AppResult<Option<Player>> {
        self.inner
            .store
            .get(id)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| self.record(operation, e))
    }

    fn record(&self, operation: &str, error: &AppError) {
        let outcome = match error {
            AppError::Validation(_) => "invalid",
            AppError::NotFound => "not_found",
            _ => "error",
        };
        self.inner.metrics.record_operation(operation, outcome);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::filter::PlayerOrder;
    use crate::models::{NewPlayer, Profession, Race};
    use crate::store::MemoryPlayerStore;

    /// 2010-01-01T00:00:00Z
    const BIRTHDAY_2010: i64 = 1_262_304_000_000;

    /// Store whose every operation fails, as an unreachable database would.
    struct UnavailableStore;

    #[async_trait::async_trait]
    impl PlayerStore for UnavailableStore {
        async fn exists(&self, _id: i64) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }

        async fn get(&self, _id: i64) -> anyhow::Result<Option<Player>> {
            anyhow::bail!("connection refused")
        }

        async fn find_all(&self, _filter: &PlayerFilter) -> anyhow::Result<Vec<Player>> {
            anyhow::bail!("connection refused")
        }

        async fn find_page(
            &self,
            _filter: &PlayerFilter,
            _page: &PageRequest,
        ) -> anyhow::Result<Vec<Player>> {
            anyhow::bail!("connection refused")
        }

        async fn insert(&self, _player: NewPlayer) -> anyhow::Result<Player> {
            anyhow::bail!("connection refused")
        }

        async fn save(&self, _player: &Player) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }

        async fn delete(&self, _id: i64) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }

        async fn healthy(&self) -> bool {
            false
        }

        fn backend(&self) -> &'static str {
            "unavailable"
        }
    }

    fn service() -> (PlayerService, Arc<MemoryPlayerStore>) {
        let store = Arc::new(MemoryPlayerStore::new());
        let service = PlayerService::new(store.clone(), Arc::new(Metrics::new()));
        (service, store)
    }

    fn input(name: &str, experience: i32) -> CreatePlayer {
        CreatePlayer {
            name: Some(name.to_string()),
            title: Some("Adventurer".to_string()),
            race: Some(Race::Elf),
            profession: Some(Profession::Sorcerer),
            birthday: Some(BIRTHDAY_2010),
            banned: None,
            experience: Some(experience),
        }
    }

    #[tokio::test]
    async fn create_derives_level_and_defaults_banned() {
        let (service, _) = service();
        let player = service.create(input("Elrond", 100)).await.unwrap();

        assert_eq!(player.id, 1);
        assert!(!player.banned);
        assert_eq!(player.level, 1);
        assert_eq!(player.until_next_level, 200);
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let (service, store) = service();
        let mut bad = input("Elrond", 100);
        bad.title = Some("x".repeat(31));

        assert!(matches!(
            service.create(bad).await,
            Err(AppError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let (service, _) = service();
        assert!(matches!(service.read(5).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn banned_only_update_keeps_other_fields() {
        let (service, _) = service();
        let created = service.create(input("Elrond", 1000)).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdatePlayer {
                    banned: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.banned);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.experience, created.experience);
        assert_eq!(updated.level, created.level);
        assert_eq!(service.read(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn experience_update_recomputes_progress() {
        let (service, _) = service();
        let created = service.create(input("Elrond", 0)).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdatePlayer {
                    experience: Some(5000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.level, 9);
        assert_eq!(updated.until_next_level, 500);
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_unchanged() {
        let (service, _) = service();
        let created = service.create(input("Elrond", 0)).await.unwrap();

        let result = service
            .update(
                created.id,
                UpdatePlayer {
                    banned: Some(true),
                    experience: Some(20_000_000),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.read(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (service, _) = service();
        let result = service.update(3, UpdatePlayer::default()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn empty_update_returns_stored_record() {
        let (service, _) = service();
        let created = service.create(input("Elrond", 42)).await.unwrap();
        let same = service
            .update(created.id, UpdatePlayer::default())
            .await
            .unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn delete_returns_prior_contents() {
        let (service, store) = service();
        let keep = service.create(input("Keep", 0)).await.unwrap();
        let gone = service.create(input("Gone", 0)).await.unwrap();

        let deleted = service.delete(gone.id).await.unwrap();

        assert_eq!(deleted, gone);
        assert_eq!(store.len(), 1);
        assert!(service.read(keep.id).await.is_ok());
        assert!(matches!(service.read(gone.id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_leaves_store_unmodified() {
        let (service, store) = service();
        service.create(input("Keep", 0)).await.unwrap();

        assert!(matches!(service.delete(77).await, Err(AppError::NotFound)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_count_and_read_all_agree() {
        let (service, _) = service();
        for i in 0..10 {
            service
                .create(input(&format!("Hero{i}"), i * 100))
                .await
                .unwrap();
        }

        let filter = PlayerFilter {
            min_experience: Some(100),
            max_experience: Some(500),
            ..Default::default()
        };
        assert_eq!(service.count(&filter).await.unwrap(), 5);
        assert_eq!(service.read_all(&filter).await.unwrap().len(), 5);

        let page = PageRequest {
            number: 1,
            size: 3,
            order: PlayerOrder::Id,
        };
        let ids: Vec<i64> = service
            .list(&PlayerFilter::default(), &page)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn store_failures_are_counted_as_errors() {
        let metrics = Arc::new(Metrics::new());
        let service = PlayerService::new(Arc::new(UnavailableStore), metrics.clone());

        assert!(matches!(
            service.create(input("Elrond", 0)).await,
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            service.update(1, UpdatePlayer::default()).await,
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            service.delete(1).await,
            Err(AppError::Internal(_))
        ));

        let output = metrics.encode();
        for operation in ["create", "update", "delete"] {
            let line = format!("operation=\"{operation}\",outcome=\"error\"");
            assert!(output.contains(&line), "missing {line} in {output}");
        }
    }

    #[tokio::test]
    async fn exists_reflects_store() {
        let (service, _) = service();
        let created = service.create(input("Elrond", 0)).await.unwrap();

        assert!(service.exists(created.id).await.unwrap());
        assert!(!service.exists(created.id + 1).await.unwrap());
    }
}

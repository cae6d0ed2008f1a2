//! PostgreSQL player store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::PlayerStore;
use crate::db;
use crate::filter::{PageRequest, PlayerFilter, PlayerQueryBuilder};
use crate::models::{NewPlayer, Player};

/// Row as stored; enum columns are text.
#[derive(Debug, sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    name: String,
    title: String,
    race: String,
    profession: String,
    birthday: i64,
    banned: bool,
    experience: i32,
    level: i32,
    until_next_level: i32,
}

impl TryFrom<PlayerRow> for Player {
    type Error = anyhow::Error;

    fn try_from(row: PlayerRow) -> Result<Self> {
        Ok(Player {
            id: row.id,
            name: row.name,
            title: row.title,
            race: row.race.parse()?,
            profession: row.profession.parse()?,
            birthday: row.birthday,
            banned: row.banned,
            experience: row.experience,
            level: row.level,
            until_next_level: row.until_next_level,
        })
    }
}

fn into_players(rows: Vec<PlayerRow>) -> Result<Vec<Player>> {
    rows.into_iter()
        .map(Player::try_from)
        .collect::<Result<Vec<_>>>()
        .context("player row has an unknown enum value")
}

/// Player store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM player WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("failed to check player existence")?;

        Ok(exists)
    }

    async fn get(&self, id: i64) -> Result<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            "SELECT id, name, title, race, profession, birthday, banned, experience, level, until_next_level FROM player WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch player by id")?;

        row.map(Player::try_from).transpose()
    }

    async fn find_all(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        let sql = PlayerQueryBuilder::new(filter).build_all();
        let rows = sqlx::query_as::<_, PlayerRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list players")?;

        into_players(rows)
    }

    async fn find_page(&self, filter: &PlayerFilter, page: &PageRequest) -> Result<Vec<Player>> {
        let sql = PlayerQueryBuilder::new(filter).build_page(page);
        let rows = sqlx::query_as::<_, PlayerRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list player page")?;

        into_players(rows)
    }

    async fn count(&self, filter: &PlayerFilter) -> Result<u64> {
        let sql = PlayerQueryBuilder::new(filter).build_count();
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .context("failed to count players")?;

        Ok(count as u64)
    }

    async fn insert(&self, player: NewPlayer) -> Result<Player> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO player (name, title, race, profession, birthday, banned, experience, level, until_next_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race.as_str())
        .bind(player.profession.as_str())
        .bind(player.birthday)
        .bind(player.banned)
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert player")?;

        Ok(player.into_player(id))
    }

    async fn save(&self, player: &Player) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE player SET
                name = $1,
                title = $2,
                race = $3,
                profession = $4,
                birthday = $5,
                banned = $6,
                experience = $7,
                level = $8,
                until_next_level = $9
            WHERE id = $10
            "#,
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race.as_str())
        .bind(player.profession.as_str())
        .bind(player.birthday)
        .bind(player.banned)
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .bind(player.id)
        .execute(&self.pool)
        .await
        .context("failed to update player")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM player WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete player")?;

        Ok(result.rows_affected() > 0)
    }

    async fn healthy(&self) -> bool {
        db::check_health(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

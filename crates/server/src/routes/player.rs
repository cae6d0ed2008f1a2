//! Player REST routes.
//!
//! Listing and counting accept the same filter parameters; listing also
//! accepts `order`, `pageNumber`, and `pageSize`.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::filter::{DEFAULT_PAGE_SIZE, PageRequest, PlayerFilter, PlayerOrder};
use crate::models::{CreatePlayer, Player, Profession, Race, UpdatePlayer};
use crate::services::parse_player_id;
use crate::state::AppState;

/// Query parameters for listing and counting players.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Earliest birthday, epoch millis.
    pub after: Option<i64>,
    /// Latest birthday, epoch millis.
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
    pub order: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl PlayerQuery {
    pub fn filter(&self) -> PlayerFilter {
        PlayerFilter {
            name: self.name.clone(),
            title: self.title.clone(),
            race: self.race,
            profession: self.profession,
            after: self.after,
            before: self.before,
            banned: self.banned,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }

    pub fn page(&self) -> AppResult<PageRequest> {
        let order = match self.order.as_deref() {
            Some(raw) => raw.parse::<PlayerOrder>()?,
            None => PlayerOrder::default(),
        };

        Ok(PageRequest {
            number: self.page_number.unwrap_or(0),
            size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            order,
        })
    }
}

fn query_params(query: Result<Query<PlayerQuery>, QueryRejection>) -> AppResult<PlayerQuery> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::validation(e.body_text()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(b)| b)
        .map_err(|e| AppError::validation(e.body_text()))
}

/// GET /players: One page of matching players.
async fn list_players(
    State(state): State<AppState>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Player>>> {
    let query = query_params(query)?;
    let page = query.page()?;
    let players = state.players().list(&query.filter(), &page).await?;
    Ok(Json(players))
}

/// GET /players/count: Number of matching players.
async fn count_players(
    State(state): State<AppState>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> AppResult<Json<u64>> {
    let query = query_params(query)?;
    let count = state.players().count(&query.filter()).await?;
    Ok(Json(count))
}

/// POST /players: Create a player.
async fn create_player(
    State(state): State<AppState>,
    body: Result<Json<CreatePlayer>, JsonRejection>,
) -> AppResult<Json<Player>> {
    let input = json_body(body)?;
    let player = state.players().create(input).await?;
    Ok(Json(player))
}

/// GET /players/{id}: Fetch one player.
async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Player>> {
    let id = parse_player_id(&id)?;
    let player = state.players().read(id).await?;
    Ok(Json(player))
}

/// POST /players/{id}: Apply a partial update.
async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePlayer>, JsonRejection>,
) -> AppResult<Json<Player>> {
    let id = parse_player_id(&id)?;
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            // An unknown id outranks a malformed body
            if !state.players().exists(id).await? {
                return Err(AppError::NotFound);
            }
            return Err(AppError::validation(rejection.body_text()));
        }
    };
    let player = state.players().update(id, input).await?;
    Ok(Json(player))
}

/// DELETE /players/{id}: Remove a player.
async fn delete_player(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<()> {
    let id = parse_player_id(&id)?;
    state.players().delete(id).await?;
    Ok(())
}

/// Create the player router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route("/players/count", get(count_players))
        .route(
            "/players/{id}",
            get(get_player).post(update_player).delete(delete_player),
        )
}

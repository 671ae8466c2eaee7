use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{ApiError, PageParams, Pagination, PaginationMeta};
use crate::models::{MapStats, MatchPerformance, PlayerHistory, TeamRecord};

/// Lifetime totals with the derived ratio.
#[derive(Debug, Serialize)]
pub struct PlayerSummary {
    #[serde(flatten)]
    pub history: PlayerHistory,
    pub kdr: String,
}

impl From<PlayerHistory> for PlayerSummary {
    fn from(history: PlayerHistory) -> Self {
        let kdr = history.kdr();
        Self { history, kdr }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<PlayerSummary>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct PlayerDetailResponse {
    pub player: PlayerSummary,
    pub performances: Vec<MatchPerformance>,
}

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamRecord>,
}

#[derive(Debug, Serialize)]
pub struct MapsResponse {
    pub maps: Vec<MapStats>,
}

/// Players by lifetime kills, most first.
pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let mut players = state.history.players()?;
    players.sort_by(|a, b| {
        b.total_kills
            .cmp(&a.total_kills)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });

    let (players, pagination) = Pagination::from(&params).apply(players);
    Ok(Json(PlayerListResponse {
        players: players.into_iter().map(PlayerSummary::from).collect(),
        pagination,
    }))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerDetailResponse>, ApiError> {
    let player = state
        .history
        .player(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("player {}", id)))?;
    let performances = state.history.performances_for_player(&id)?;

    Ok(Json(PlayerDetailResponse {
        player: player.into(),
        performances,
    }))
}

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<TeamsResponse>, ApiError> {
    let mut teams = state.history.teams()?;
    teams.sort_by(|a, b| {
        b.matches_played
            .cmp(&a.matches_played)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(Json(TeamsResponse { teams }))
}

/// Maps by times played, most first.
pub async fn list_maps(State(state): State<AppState>) -> Result<Json<MapsResponse>, ApiError> {
    let mut maps = state.history.maps()?;
    maps.sort_by(|a, b| {
        b.times_played
            .cmp(&a.times_played)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(Json(MapsResponse { maps }))
}

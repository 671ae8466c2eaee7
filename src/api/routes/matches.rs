use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{ApiError, PageParams, Pagination, PaginationMeta};
use crate::calculate::{side_comparison, SideComparison};
use crate::models::{MatchRecord, MatchResult, ReviewItem};

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchRecord>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct MatchDetailResponse {
    pub record: MatchRecord,
    pub result: MatchResult,
    pub reviews: Vec<ReviewItem>,
}

/// Recorded matches, newest match date first.
pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let mut matches = state.history.matches()?;
    matches.sort_by(|a, b| {
        b.match_date
            .cmp(&a.match_date)
            .then_with(|| b.recorded_at.cmp(&a.recorded_at))
    });

    let (matches, pagination) = Pagination::from(&params).apply(matches);
    Ok(Json(MatchListResponse {
        matches,
        pagination,
    }))
}

fn load(state: &AppState, id: &str) -> Result<(MatchRecord, MatchResult), ApiError> {
    let record = state
        .history
        .match_record(id)?
        .ok_or_else(|| ApiError::NotFound(format!("match {}", id)))?;
    let result = state
        .history
        .load_result(id)?
        .ok_or_else(|| ApiError::Internal(format!("results for match {} are missing", id)))?;
    Ok((record, result))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchDetailResponse>, ApiError> {
    let (record, result) = load(&state, &id)?;
    let reviews = state.history.reviews_for_match(&id)?;
    Ok(Json(MatchDetailResponse {
        record,
        result,
        reviews,
    }))
}

pub async fn match_comparison(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SideComparison>, ApiError> {
    let (_, result) = load(&state, &id)?;
    Ok(Json(side_comparison(&result)))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_matches_sorted_and_paginated() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        for (file, date) in [("a.json", "2024-09-07"), ("b.json", "2024-09-21"), ("c.json", "2024-09-14")] {
            state
                .history
                .record_match(file, &sample_match("Foy", date), &[])
                .unwrap();
        }

        let (status, json) =
            get_json(build_router(state.clone()), "/api/matches?page_size=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["matches"].as_array().unwrap().len(), 2);
        assert_eq!(json["matches"][0]["match_date"], "2024-09-21");
        assert_eq!(json["pagination"]["total_items"], 3);
        assert_eq!(json["pagination"]["has_next"], true);

        let (_, json) = get_json(build_router(state), "/api/matches?page=2&page_size=2").await;
        assert_eq!(json["matches"][0]["match_date"], "2024-09-07");
    }

    #[tokio::test]
    async fn test_get_match() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        let result = sample_match("Foy", "2024-09-14");
        let outcome = state.history.record_match("a.json", &result, &[]).unwrap();

        let uri = format!("/api/matches/{}", outcome.match_id());
        let (status, json) = get_json(build_router(state), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["record"]["file_name"], "a.json");
        assert_eq!(json["result"]["Map"], "Foy");
        assert_eq!(json["result"]["Axis"]["Total"]["Kills"], 20);
        assert_eq!(json["result"]["Axis"]["Total"]["KDR"], "5.00");
        assert_eq!(json["result"]["Allies"]["Artillery"]["Players"][0]["Name"], "Boomer");
    }

    #[tokio::test]
    async fn test_match_comparison() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        let result = sample_match("Foy", "2024-09-14");
        let outcome = state.history.record_match("a.json", &result, &[]).unwrap();

        let uri = format!("/api/matches/{}/comparison", outcome.match_id());
        let (status, json) = get_json(build_router(state), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Axis Team vs Allies Team Comprehensive Comparison");
        assert_eq!(json["categories"][0]["category"], "Total");
        assert_eq!(json["categories"][0]["metrics"][0]["axis"], 20);
        assert_eq!(json["categories"][0]["metrics"][0]["allies"], 29);
    }

    #[tokio::test]
    async fn test_unknown_match_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let (status, json) = get_json(build_router(state), "/api/matches/deadbeef").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}

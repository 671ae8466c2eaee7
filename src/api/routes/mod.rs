pub mod matches;
pub mod players;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub recorded_matches: usize,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        recorded_matches: state.history.matches()?.len(),
    }))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::api::build_router;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        state
            .history
            .record_match("a.json", &sample_match("Foy", "2024-09-14"), &[])
            .unwrap();

        let (status, json) = get_json(build_router(state), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["recorded_matches"], 1);
    }
}

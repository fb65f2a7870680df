//! Schedule read endpoints.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use cinemas_core::{
    query::{PeriodRequest, ResolveError, ScheduleRequest, ScheduleResult},
    schedule::{ScheduleError, ScheduleRecord},
};
use serde::Deserialize;
use serde_json::json;

use crate::{handlers::AppError, state::AppState};

/// Query parameters for the movies endpoint.
#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(rename = "movieId")]
    pub movie_id: Option<String>,
}

/// GET /cinemas/{cinemaId}/movies - a cinema's schedule.
///
/// With `?movieId=` the response is a single schedule object, otherwise an
/// array ordered by movie ID.
#[axum::debug_handler]
pub async fn list_movies(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<MoviesQuery>, QueryRejection>,
) -> Result<Json<ScheduleResult>, AppError> {
    let Path(cinema_id) = path.map_err(|e| ResolveError::InvalidRequest(e.body_text()))?;
    let Query(query) = query.map_err(|e| ResolveError::InvalidRequest(e.body_text()))?;

    let request = ScheduleRequest::parse(&cinema_id, query.movie_id.as_deref())?;
    let result = state.resolver.resolve_schedule(&request).await?;

    Ok(Json(result))
}

/// GET /cinemas/{cinemaId}/periods/{period}/movies - a cinema's schedule in one period.
#[axum::debug_handler]
pub async fn list_movies_by_period(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    let Path((cinema_id, period)) =
        path.map_err(|e| ResolveError::InvalidRequest(e.body_text()))?;

    let request = PeriodRequest::parse(&cinema_id, &period)?;
    let records = state.resolver.resolve_by_period(&request).await?;

    Ok(Json(records))
}

/// Fallback for unmatched routes.
///
/// An empty path segment never matches a `{param}` route, but a request like
/// `/cinemas//movies` is missing an identifier rather than asking for an
/// unknown resource.
pub async fn fallback(uri: Uri) -> Response {
    let segments: Vec<&str> = uri.path().trim_end_matches('/').split('/').collect();
    let missing = match segments.as_slice() {
        ["", "cinemas", "", "movies"] | ["", "cinemas", "", "periods", _, "movies"] => {
            Some("cinemaId is required".to_string())
        }
        ["", "cinemas", _, "periods", "", "movies"] => Some(ScheduleError::EmptyPeriod.to_string()),
        _ => None,
    };

    match missing {
        Some(message) => AppError(ResolveError::InvalidRequest(message)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response(),
    }
}

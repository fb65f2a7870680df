use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        schedules::{fallback, list_movies, list_movies_by_period},
    },
    middleware::request_deadline,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // Read-only CORS for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-amz-date")]);

    let api_routes = Router::new()
        .route("/cinemas/{cinemaId}/movies", get(list_movies))
        .route(
            "/cinemas/{cinemaId}/periods/{period}/movies",
            get(list_movies_by_period),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .merge(api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(request_timeout, request_deadline))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use std::sync::Arc;

    use async_trait::async_trait;
    use cinemas_core::query::RetryPolicy;
    use cinemas_core::schedule::{seed_schedules, CinemaId, MovieId, Period, ScheduleRecord};
    use cinemas_core::storage::{self, ScheduleStore, StoreError};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn record(cinema: i64, movie: &str, period: &str) -> ScheduleRecord {
        ScheduleRecord::new(CinemaId::new(cinema), MovieId::new(movie).unwrap())
            .with_period(Period::new(period).unwrap())
    }

    /// The two-record store from the 1001 scenario.
    async fn scenario_app() -> Router {
        let state = AppState::with_records(vec![
            record(1001, "c5002", "evening"),
            record(1001, "c5001", "evening"),
        ])
        .await;
        create_app(state, Duration::from_secs(10))
    }

    /// Fails every call with `error` after sleeping for `delay`.
    struct FailingStore {
        error: StoreError,
        delay: Duration,
    }

    impl FailingStore {
        async fn fail<T>(&self) -> storage::Result<T> {
            tokio::time::sleep(self.delay).await;
            Err(self.error.clone())
        }
    }

    #[async_trait]
    impl ScheduleStore for FailingStore {
        async fn query_by_partition(
            &self,
            _cinema_id: CinemaId,
        ) -> storage::Result<Vec<ScheduleRecord>> {
            self.fail().await
        }

        async fn get_by_key(
            &self,
            _cinema_id: CinemaId,
            _movie_id: &MovieId,
        ) -> storage::Result<Option<ScheduleRecord>> {
            self.fail().await
        }

        async fn query_by_partition_and_period(
            &self,
            _cinema_id: CinemaId,
            _period: &Period,
        ) -> storage::Result<Vec<ScheduleRecord>> {
            self.fail().await
        }
    }

    fn failing_app(error: StoreError, delay: Duration, request_timeout: Duration) -> Router {
        let policy = RetryPolicy::default()
            .with_timeout(Duration::from_secs(2))
            .with_min_delay(Duration::from_millis(1));
        let state = AppState::with_store(Arc::new(FailingStore { error, delay }), policy);
        create_app(state, request_timeout)
    }

    async fn assert_json_error(response: Response, status: StatusCode, message: &str) {
        assert_eq!(response.status(), status);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("CinemaTable"), "store detail leaked: {text}");
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({ "error": message })
        );
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let response = get(scenario_app().await, "/livez").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_movies_for_cinema() {
        let response = get(scenario_app().await, "/cinemas/1001/movies").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            json_body(response).await,
            json!([
                { "cinemaId": 1001, "movieId": "c5001", "period": "evening" },
                { "cinemaId": 1001, "movieId": "c5002", "period": "evening" }
            ])
        );
    }

    #[tokio::test]
    async fn test_get_single_movie() {
        let response = get(scenario_app().await, "/cinemas/1001/movies?movieId=c5002").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "cinemaId": 1001, "movieId": "c5002", "period": "evening" })
        );
    }

    #[tokio::test]
    async fn test_unknown_movie_is_404() {
        let response = get(scenario_app().await, "/cinemas/1001/movies?movieId=c9999").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Movie c9999 is not scheduled at cinema 1001" })
        );
    }

    #[tokio::test]
    async fn test_unknown_cinema_is_empty_array() {
        let response = get(scenario_app().await, "/cinemas/9999/movies").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_non_numeric_cinema_is_400() {
        let response = get(scenario_app().await, "/cinemas/abc/movies").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "cinemaId must be an integer, got 'abc'" })
        );
    }

    #[tokio::test]
    async fn test_missing_cinema_is_400() {
        let response = get(scenario_app().await, "/cinemas//movies").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_movie_id_is_absent() {
        let app = scenario_app().await;

        let with_empty = json_body(get(app.clone(), "/cinemas/1001/movies?movieId=").await).await;
        let without = json_body(get(app, "/cinemas/1001/movies").await).await;

        assert_eq!(with_empty, without);
        assert_eq!(with_empty.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_movie_id_is_400() {
        let response = get(
            scenario_app().await,
            "/cinemas/1001/movies?movieId=c5001&movieId=c5002",
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_repeated_requests_are_idempotent() {
        let app = scenario_app().await;

        let first = json_body(get(app.clone(), "/cinemas/1001/movies").await).await;
        for _ in 0..3 {
            let again = json_body(get(app.clone(), "/cinemas/1001/movies").await).await;
            assert_eq!(again, first);
        }
    }

    #[tokio::test]
    async fn test_list_movies_by_period() {
        let state = AppState::with_records(seed_schedules()).await;
        let app = create_app(state, Duration::from_secs(10));

        let response = get(app.clone(), "/cinemas/1002/periods/evening/movies").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let movies: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["movieId"].as_str().unwrap())
            .collect();
        assert_eq!(movies, vec!["c5003"]);

        let response = get(app.clone(), "/cinemas/1002/periods/noon/movies").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));

        let response = get(app, "/cinemas/x/periods/evening/movies").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_payload_attributes_are_returned() {
        let state = AppState::with_records(seed_schedules()).await;
        let app = create_app(state, Duration::from_secs(10));

        let body = json_body(get(app, "/cinemas/1001/movies?movieId=c5001").await).await;

        assert_eq!(body["title"], "The Lighthouse Keeper");
        assert_eq!(body["showtimes"], json!(["19:00", "21:30"]));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = get(scenario_app().await, "/nope").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = scenario_app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/cinemas/1001/movies")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_missing_cinema_on_period_route_is_400() {
        let response = get(scenario_app().await, "/cinemas//periods/evening/movies").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "cinemaId is required" })
        );
    }

    #[tokio::test]
    async fn test_missing_period_is_400() {
        let response = get(scenario_app().await, "/cinemas/1001/periods//movies").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "period cannot be empty" })
        );
    }

    #[tokio::test]
    async fn test_throttled_store_is_json_500() {
        let app = failing_app(
            StoreError::Throttled("Throughput exceeded on CinemaTable".to_string()),
            Duration::ZERO,
            Duration::from_secs(10),
        );

        let response = get(app, "/cinemas/1001/movies").await;
        assert_json_error(
            response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Schedule service temporarily unavailable",
        )
        .await;
    }

    #[tokio::test]
    async fn test_unavailable_store_on_point_read_is_json_500() {
        let app = failing_app(
            StoreError::Unavailable("CinemaTable endpoint unreachable".to_string()),
            Duration::ZERO,
            Duration::from_secs(10),
        );

        let response = get(app, "/cinemas/1001/movies?movieId=c5001").await;
        assert_json_error(
            response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Schedule service temporarily unavailable",
        )
        .await;
    }

    #[tokio::test]
    async fn test_query_failure_is_opaque_json_500() {
        let app = failing_app(
            StoreError::QueryFailed("Table CinemaTable not found".to_string()),
            Duration::ZERO,
            Duration::from_secs(10),
        );

        let response = get(app, "/cinemas/1001/periods/evening/movies").await;
        assert_json_error(
            response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )
        .await;
    }

    #[tokio::test]
    async fn test_request_deadline_is_json_500() {
        // Only the request deadline can answer before the 2s per-attempt timeout.
        let app = failing_app(
            StoreError::Unavailable("CinemaTable endpoint unreachable".to_string()),
            Duration::from_secs(5),
            Duration::from_millis(300),
        );

        let response = get(app, "/cinemas/1001/movies").await;
        assert_json_error(
            response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Schedule service temporarily unavailable",
        )
        .await;
    }
}

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::individuals::handlers;
use crate::features::individuals::services::IndividualService;

pub fn routes(service: Arc<IndividualService>) -> Router {
    Router::new()
        .route("/api/individuals", get(handlers::list_individuals))
        .route("/api/individuals/statistics", get(handlers::get_statistics))
        .route("/api/individuals/export", get(handlers::export_individuals))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let service = Arc::new(IndividualService::new(lazy_pool()));
        TestServer::new(with_user_auth(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_negative_cursor_is_bad_request() {
        let response = server()
            .get("/api/individuals")
            .add_query_param("cursor", "-1")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_bad_request() {
        let response = server()
            .get("/api/individuals")
            .add_query_param("sort_by", "Name")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_requires_identity() {
        let service = Arc::new(IndividualService::new(lazy_pool()));
        let server = TestServer::new(routes(service)).unwrap();

        server
            .get("/api/individuals/export")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

//! HTTP server for the Mod3d catalog.
//!
//! Exposes the lifecycle orchestrator over REST. Handlers are thin: they
//! resolve the caller's identity, parse the payload, call one orchestrator
//! operation, and map its typed error to a status code.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{AuthProvider, Authenticated, BearerUserAuth, Credentials, Identity};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::CatalogServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use mod3d_gate::GateConfig;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(AppState::in_memory(GateConfig::default()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("authorization", format!("Bearer {user}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create(app: &Router, user: &str, body: Value) -> Value {
        let (status, record) = send(app, Method::POST, "/mod3ds", Some(user), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        record
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn create_requires_identity() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/mod3ds",
            None,
            Some(json!({ "title": "Benchy" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_then_fetch_with_author() {
        let app = app();
        let record = create(
            &app,
            "u1",
            json!({ "title": "Benchy", "imageId": "img1", "author": "someone-else" }),
        )
        .await;
        assert_eq!(record["author"], "u1");
        assert_eq!(record["imageId"], "img1");

        let id = record["id"].as_str().unwrap();
        let (status, view) = send(&app, Method::GET, &format!("/mod3ds/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["title"], "Benchy");
        assert_eq!(view["author"], Value::Null);
    }

    #[tokio::test]
    async fn create_with_empty_title_is_server_error() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/mod3ds",
            Some("u1"),
            Some(json!({ "title": "", "imageId": "img1" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["details"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn public_listing_hides_private_records() {
        let app = app();
        create(&app, "u1", json!({ "title": "legacy" })).await;
        create(&app, "u1", json!({ "title": "public", "isPublic": true })).await;
        create(&app, "u1", json!({ "title": "private", "isPublic": false })).await;

        let (status, public) = send(&app, Method::GET, "/mod3ds", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let mut titles: Vec<&str> = public
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["title"].as_str().unwrap())
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["legacy", "public"]);

        let (_, all) = send(&app, Method::GET, "/mod3ds/all", None, None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_replaces_image() {
        let app = app();
        let record = create(&app, "u1", json!({ "title": "Benchy", "imageId": "old.png" })).await;
        let id = record["id"].as_str().unwrap();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/mod3ds/{id}"),
            Some("u1"),
            Some(json!({ "imageId": "new.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["imageId"], "new.png");
        assert_eq!(updated["title"], "Benchy");
    }

    #[tokio::test]
    async fn delete_by_non_author_is_forbidden() {
        let app = app();
        let record = create(&app, "u1", json!({ "title": "Benchy" })).await;
        let uri = format!("/mod3ds/{}", record["id"].as_str().unwrap());

        let (status, body) = send(&app, Method::DELETE, &uri, Some("u2"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Not authorized");

        let (status, _) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_by_author_succeeds() {
        let app = app();
        let record = create(&app, "u1", json!({ "title": "Benchy" })).await;
        let uri = format!("/mod3ds/{}", record["id"].as_str().unwrap());

        let (status, body) = send(&app, Method::DELETE, &uri, Some("u1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Model not found");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/mod3ds/not-a-uuid", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

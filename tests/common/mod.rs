use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use promotions_api::{
    app_router,
    config::AppConfig,
    db::{self, DbConfig},
    repositories::{PromotionRepository, PromotionStore},
    AppState,
};

/// Helper harness for spinning up an application backed by an in-memory
/// SQLite database.
pub struct TestApp {
    router: Router,
    pub store: Arc<dyn PromotionStore>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        // A single connection keeps every query on the same in-memory database.
        let db_cfg = DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let store: Arc<dyn PromotionStore> = Arc::new(PromotionRepository::new(Arc::new(pool)));
        let state = AppState {
            store: store.clone(),
            config: cfg,
        };

        Self {
            router: app_router(state),
            store,
        }
    }

    /// Send a request; a JSON body sets the content type automatically.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = if let Some(json) = body {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("serialize request body"))
        } else {
            Body::empty()
        };
        let request = builder.body(body).expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// Send raw bytes with an explicit (possibly absent) content type.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        body: &[u8],
        content_type: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = content_type {
            builder = builder.header(header::CONTENT_TYPE, value);
        }
        let request = builder
            .body(Body::from(body.to_vec()))
            .expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// Number of promotions currently stored.
    pub async fn stored_count(&self) -> usize {
        self.store.all().await.expect("list stored promotions").len()
    }
}

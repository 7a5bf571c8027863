//! Promotions API Library
//!
//! This crate implements a REST service that creates, reads, updates and
//! deletes promotions: time-bounded discount offers tied to products.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod models;
pub mod repositories;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::repositories::PromotionStore;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PromotionStore>,
    pub config: config::AppConfig,
}

/// Root URL response: a service descriptor pointing at the listing endpoint.
async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "Promotion REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": format!("http://{}:{}/promotions", state.config.host, state.config.port),
    }))
}

/// Assemble the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(handlers::health::health_check))
        .nest("/promotions", handlers::promotions::promotion_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

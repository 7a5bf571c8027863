//! REST resource layer for promotions.
//!
//! Handlers orchestrate model validation against the promotion store and map
//! outcomes to response codes; they never bypass the model's validation.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use super::common::{check_content_type, parse_json_body};
use crate::{
    errors::ApiError,
    handlers::AppState,
    models::{promotion::date_value, ListPromotionsParams, Promotion, PromotionFilter},
};

pub fn promotion_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_promotions).post(create_promotion))
        .route(
            "/:id",
            get(get_promotion)
                .put(update_promotion)
                .delete(delete_promotion),
        )
        .route("/:id/valid", put(mark_valid).delete(mark_invalid))
        .route("/:id/extend", put(extend_promotion))
}

async fn find_or_404(state: &AppState, id: i32) -> Result<Promotion, ApiError> {
    state
        .store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("promotion with id '{id}' was not found")))
}

/// Create a new promotion. Product id and description have to be present;
/// the rest of the fields have default values.
async fn create_promotion(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    info!("Request to create a promotion");
    check_content_type(&headers)?;

    let payload = parse_json_body(&body)?;
    let mut promotion = Promotion::new();
    promotion.deserialize(&payload)?;
    // ids are server-assigned; whatever the caller sent is discarded
    promotion.id = None;

    let created = state.store.create(promotion).await?;
    let id = created.id.unwrap_or_default();
    info!("Promotion with new id [{}] saved", id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/promotions/{id}"))],
        Json(created.serialize()),
    ))
}

/// Read a single promotion.
async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    info!("Request to retrieve promotion with id [{}]", id);
    let promotion = find_or_404(&state, id).await?;
    Ok(Json(promotion.serialize()))
}

/// List promotions, optionally narrowed by a single query filter.
async fn list_promotions(
    State(state): State<AppState>,
    Query(params): Query<ListPromotionsParams>,
) -> Result<Json<Value>, ApiError> {
    info!("Request to list promotions");
    let filter = params.resolve()?;
    let promotions = match filter {
        PromotionFilter::All => state.store.all().await?,
        other => state.store.find_by(other).await?,
    };
    Ok(Json(Value::Array(
        promotions.iter().map(Promotion::serialize).collect(),
    )))
}

/// Full-overwrite update of an existing promotion.
async fn update_promotion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    info!("Request to update promotion with id [{}]", id);
    check_content_type(&headers)?;

    let mut promotion = find_or_404(&state, id).await?;
    let payload = parse_json_body(&body)?;
    // deserialize never touches the id, so the resource identity is kept
    promotion.deserialize(&payload)?;

    let updated = state.store.update(promotion).await?;
    Ok(Json(updated.serialize()))
}

/// Delete a promotion. Idempotent: an absent id still yields 204.
async fn delete_promotion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    info!("Request to delete promotion with id [{}]", id);
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_valid(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    set_validity(&state, id, true).await
}

async fn mark_invalid(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    set_validity(&state, id, false).await
}

/// Pure field toggle: other fields are untouched and not re-validated.
async fn set_validity(state: &AppState, id: i32, validity: bool) -> Result<Json<Value>, ApiError> {
    info!(
        "Request to mark promotion with id [{}] {}",
        id,
        if validity { "valid" } else { "invalid" }
    );
    let mut promotion = find_or_404(state, id).await?;
    promotion.validity = validity;
    let updated = state.store.update(promotion).await?;
    Ok(Json(updated.serialize()))
}

/// Move the end date of a promotion to the date in the payload. The new
/// date may not precede the promotion's current start date.
async fn extend_promotion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    info!("Request to change the end_date of promotion with id [{}]", id);
    check_content_type(&headers)?;

    let mut promotion = find_or_404(&state, id).await?;
    let payload = parse_json_body(&body)?;
    let Some(raw) = payload.get("end_date") else {
        return Err(ApiError::BadRequest(
            "application/json does not contain end_date".to_string(),
        ));
    };

    let new_date = date_value(raw, "end_date")?;
    if new_date < promotion.start_date {
        return Err(ApiError::BadRequest(
            "new end_date is before start_date".to_string(),
        ));
    }

    promotion.end_date = new_date;
    let updated = state.store.update(promotion).await?;
    Ok(Json(updated.serialize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repositories::InMemoryPromotionRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState {
            store: Arc::new(InMemoryPromotionRepository::new()),
            config: AppConfig::new(
                "sqlite::memory:".to_string(),
                "127.0.0.1".to_string(),
                8080,
                "test".to_string(),
            ),
        };
        Router::new()
            .nest("/promotions", promotion_routes())
            .with_state(state)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        content_type: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let body = match body {
            Some(json) => Body::from(serde_json::to_vec(&json).unwrap()),
            None => Body::empty(),
        };
        router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn summer_payload() -> Value {
        json!({
            "name": "Summer",
            "product_id": 1,
            "description": "20% off",
            "start_date": "2025-06-01",
            "end_date": "2025-06-30",
        })
    }

    #[tokio::test]
    async fn content_type_is_checked_before_the_lookup() {
        let router = test_router();
        // id 999 does not exist, but the media type failure must win
        let response = send(
            &router,
            Method::PUT,
            "/promotions/999",
            Some(summer_payload()),
            Some("text/plain"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn create_discards_a_caller_supplied_id() {
        let router = test_router();
        let mut payload = summer_payload();
        payload.as_object_mut().unwrap().insert("id".into(), json!(424242));

        let response = send(
            &router,
            Method::POST,
            "/promotions",
            Some(payload),
            Some("application/json"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn extend_requires_the_end_date_key() {
        let router = test_router();
        let response = send(
            &router,
            Method::POST,
            "/promotions",
            Some(summer_payload()),
            Some("application/json"),
        )
        .await;
        let id = json_body(response).await["id"].as_i64().unwrap();

        let response = send(
            &router,
            Method::PUT,
            &format!("/promotions/{id}/extend"),
            Some(json!({"other": 1})),
            Some("application/json"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "application/json does not contain end_date");
    }

    #[tokio::test]
    async fn validity_toggle_round_trips() {
        let router = test_router();
        let response = send(
            &router,
            Method::POST,
            "/promotions",
            Some(summer_payload()),
            Some("application/json"),
        )
        .await;
        let id = json_body(response).await["id"].as_i64().unwrap();

        let response = send(
            &router,
            Method::PUT,
            &format!("/promotions/{id}/valid"),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["validity"], json!(true));

        let response = send(
            &router,
            Method::DELETE,
            &format!("/promotions/{id}/valid"),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["validity"], json!(false));
    }
}

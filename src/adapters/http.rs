//! JSON request boundary: `POST /api/find_contracts`.

use crate::core::pipeline::MatchPipeline;
use crate::domain::model::BusinessQuery;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

/// Incoming form. Fields may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
pub struct FindContractsRequest {
    pub name: Option<String>,
    pub services: Option<String>,
    pub specialties: Option<String>,
    pub other: Option<String>,
}

impl From<FindContractsRequest> for BusinessQuery {
    fn from(request: FindContractsRequest) -> Self {
        BusinessQuery {
            name: request.name.unwrap_or_default(),
            services: request.services.unwrap_or_default(),
            specialties: request.specialties.unwrap_or_default(),
            other: request.other.unwrap_or_default(),
        }
    }
}

pub fn router(pipeline: Arc<MatchPipeline>) -> Router {
    Router::new()
        .route("/api/find_contracts", post(find_contracts))
        .with_state(pipeline)
}

async fn find_contracts(
    State(pipeline): State<Arc<MatchPipeline>>,
    Json(request): Json<FindContractsRequest>,
) -> Response {
    let query = BusinessQuery::from(request);

    match pipeline.run(&query).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) if e.is_input_fault() => {
            tracing::info!("🚫 Rejected request: {}", e.user_friendly_message());
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.user_friendly_message() })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("❌ Pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.user_friendly_message() })),
            )
                .into_response()
        }
    }
}

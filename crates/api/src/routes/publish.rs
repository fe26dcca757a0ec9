//! `POST /publish` — publish one album as a static site.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use albumpress_publisher::PublishRequest;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishBody {
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub owner_identity_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    /// Public URL; absent when no root domain is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub branch: String,
}

/// Require a non-blank string field.
fn require(value: Option<String>, field: &str) -> ApiResult<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

async fn publish(
    State(state): State<AppState>,
    Json(body): Json<PublishBody>,
) -> ApiResult<Json<PublishResponse>> {
    let album_id = require(body.album_id, "albumId")?;
    let owner_identity_id = require(body.owner_identity_id, "ownerIdentityId")?;

    tracing::info!(album_id = %album_id, "Publish requested");

    let outcome = state
        .publisher
        .publish(PublishRequest {
            album_id,
            template: body.template,
            owner_identity_id,
        })
        .await?;

    Ok(Json(PublishResponse {
        url: outcome.url,
        branch: outcome.branch,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/publish", post(publish))
}

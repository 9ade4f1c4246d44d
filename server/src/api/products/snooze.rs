use crate::api::ErrorResponse;
use crate::auth::HouseholdMember;
use crate::cadence_store::{PgCadenceStore, SnoozeTxError};
use crate::db::DbPool;
use crate::get_conn;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use boodschappen_core::{snooze, SnoozeError};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SnoozeRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SnoozeResponse {
    pub product_id: Uuid,
    pub snoozed_until: DateTime<Utc>,
    pub frequency_correction_factor: f64,
}

#[utoipa::path(
    post,
    path = "/api/products/expected/snooze",
    tag = "products",
    request_body = SnoozeRequest,
    responses(
        (status = 200, description = "Product snoozed for 24 hours", body = SnoozeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("session_cookie" = []))
)]
pub async fn snooze_product(
    member: HouseholdMember,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<SnoozeRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    // Snooze upsert and factor update commit together or not at all
    let result = conn.transaction::<_, SnoozeTxError, _>(|conn| {
        let mut store = PgCadenceStore::new(conn);
        Ok(snooze(
            &mut store,
            member.household_id,
            request.product_id,
            Utc::now(),
        )?)
    });

    match result {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SnoozeResponse {
                product_id: outcome.product_id,
                snoozed_until: outcome.snoozed_until,
                frequency_correction_factor: outcome.frequency_correction_factor,
            }),
        )
            .into_response(),
        Err(SnoozeTxError::Snooze(SnoozeError::NotFound)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Product not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(product_id = %request.product_id, "Failed to snooze product: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to snooze product".to_string(),
                }),
            )
                .into_response()
        }
    }
}

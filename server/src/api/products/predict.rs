use crate::api::ErrorResponse;
use crate::auth::HouseholdMember;
use crate::db::{household_categories, DbPool};
use crate::get_conn;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use boodschappen_core::{is_fruit, predict_category_emoji, resolve_category_id};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PredictQuery {
    /// Free-text product name
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictResponse {
    pub category_name: String,
    pub emoji: String,
    /// The household category the prediction resolves to, if any
    pub category_id: Option<Uuid>,
    /// Fruit sorts before vegetables within produce
    pub is_fruit: bool,
}

#[utoipa::path(
    get,
    path = "/api/products/predict",
    tag = "products",
    params(PredictQuery),
    responses(
        (status = 200, description = "Predicted category and emoji", body = PredictResponse),
        (status = 400, description = "Missing product name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("session_cookie" = []))
)]
pub async fn predict_product(
    member: HouseholdMember,
    State(pool): State<Arc<DbPool>>,
    Query(query): Query<PredictQuery>,
) -> impl IntoResponse {
    let name = query.name.trim();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Product name is required".to_string(),
            }),
        )
            .into_response();
    }

    let prediction = predict_category_emoji(name);

    let mut conn = get_conn!(pool);
    let categories = match household_categories(&mut conn, member.household_id) {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to load categories: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load categories".to_string(),
                }),
            )
                .into_response();
        }
    };

    let category_id = resolve_category_id(&prediction.category_name, &categories).copied();

    (
        StatusCode::OK,
        Json(PredictResponse {
            is_fruit: is_fruit(name),
            category_name: prediction.category_name,
            emoji: prediction.emoji,
            category_id,
        }),
    )
        .into_response()
}

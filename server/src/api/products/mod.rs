pub mod create;
pub mod predict;
pub mod snooze;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/products endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_product))
        .route("/predict", get(predict::predict_product))
        .route("/expected/snooze", post(snooze::snooze_product))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_product,
        predict::predict_product,
        snooze::snooze_product
    ),
    components(schemas(
        create::CreateProductRequest,
        create::CreateProductResponse,
        predict::PredictResponse,
        snooze::SnoozeRequest,
        snooze::SnoozeResponse,
    ))
)]
pub struct ApiDoc;

use crate::api::ErrorResponse;
use crate::auth::HouseholdMember;
use crate::db::{household_categories, DbPool};
use crate::get_conn;
use crate::models::{NewProduct, Product};
use crate::schema::products;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use boodschappen_core::{
    default_classifier, resolve_category_with_fallback, Classifier, Prediction, FALLBACK_EMOJI,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Column widths of `products.name` and `products.emoji`, in characters.
pub const MAX_NAME_CHARS: usize = 255;
pub const MAX_EMOJI_CHARS: usize = 32;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    /// Predicted from the name when omitted
    pub category_id: Option<Uuid>,
    /// Predicted from the name when omitted
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub category_id: Option<Uuid>,
}

/// Request problems reported to the caller as 400.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidProduct {
    #[error("Product name is required")]
    EmptyName,

    #[error("Product name is longer than {MAX_NAME_CHARS} characters")]
    NameTooLong,

    #[error("Emoji is longer than {MAX_EMOJI_CHARS} characters")]
    EmojiTooLong,

    #[error("Unknown category")]
    UnknownCategory,
}

/// Where a new product goes and how it is shown.
#[derive(Debug, PartialEq)]
pub struct ProductPlacement<'a> {
    pub name: &'a str,
    pub category_id: Option<Uuid>,
    pub emoji: String,
    /// Set only when the name had to be classified.
    pub prediction: Option<Prediction>,
}

/// Decide category and emoji for a new product.
///
/// Caller-supplied values win. A supplied category must be one of
/// `categories` (the household's own). Missing values are predicted from the
/// name, the category resolved against `categories` with "Overig" as
/// fallback; the product stays uncategorized when neither resolves.
pub fn place_product<'a>(
    classifier: &Classifier,
    request: &'a CreateProductRequest,
    categories: &[(Uuid, String)],
) -> Result<ProductPlacement<'a>, InvalidProduct> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(InvalidProduct::EmptyName);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(InvalidProduct::NameTooLong);
    }

    let requested_emoji = request
        .emoji
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    if requested_emoji.is_some_and(|e| e.chars().count() > MAX_EMOJI_CHARS) {
        return Err(InvalidProduct::EmojiTooLong);
    }

    // Only classify when the caller left something to predict
    let prediction = (request.category_id.is_none() || requested_emoji.is_none())
        .then(|| classifier.predict(name));

    let category_id = match (request.category_id, &prediction) {
        (Some(id), _) => {
            if !categories.iter().any(|(owned, _)| *owned == id) {
                return Err(InvalidProduct::UnknownCategory);
            }
            Some(id)
        }
        (None, Some(prediction)) => {
            resolve_category_with_fallback(&prediction.category_name, categories).copied()
        }
        (None, None) => None,
    };

    let emoji = requested_emoji
        .or(prediction.as_ref().map(|p| p.emoji.as_str()))
        .unwrap_or(FALLBACK_EMOJI)
        .to_string();

    Ok(ProductPlacement {
        name,
        category_id,
        emoji,
        prediction,
    })
}

fn error(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("session_cookie" = []))
)]
pub async fn create_product(
    member: HouseholdMember,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateProductRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let categories = match household_categories(&mut conn, member.household_id) {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to load categories: {}", e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create product");
        }
    };

    let placement = match place_product(default_classifier(), &request, &categories) {
        Ok(placement) => placement,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    if let (None, Some(prediction)) = (placement.category_id, &placement.prediction) {
        tracing::warn!(
            household_id = %member.household_id,
            category = %prediction.category_name,
            "household has no matching or fallback category"
        );
    }

    let new_product = NewProduct {
        household_id: member.household_id,
        name: placement.name,
        emoji: &placement.emoji,
        category_id: placement.category_id,
    };

    match diesel::insert_into(products::table)
        .values(&new_product)
        .returning(Product::as_returning())
        .get_result(&mut conn)
    {
        Ok(product) => {
            tracing::info!(
                product_id = %product.id,
                user_id = %member.user_id,
                "product created"
            );
            (
                StatusCode::CREATED,
                Json(CreateProductResponse {
                    id: product.id,
                    name: product.name,
                    emoji: product.emoji,
                    category_id: product.category_id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create product: {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create product")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, category_id: Option<Uuid>, emoji: Option<&str>) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            category_id,
            emoji: emoji.map(str::to_string),
        }
    }

    fn household() -> (Uuid, Uuid, Vec<(Uuid, String)>) {
        let dairy = Uuid::new_v4();
        let other = Uuid::new_v4();
        let categories = vec![
            (dairy, "Zuivel".to_string()),
            (other, "Overige".to_string()),
        ];
        (dairy, other, categories)
    }

    fn place<'a>(
        req: &'a CreateProductRequest,
        categories: &[(Uuid, String)],
    ) -> Result<ProductPlacement<'a>, InvalidProduct> {
        place_product(default_classifier(), req, categories)
    }

    #[test]
    fn test_blank_name_rejected() {
        let (_, _, categories) = household();
        let req = request("   ", None, None);
        assert_eq!(place(&req, &categories), Err(InvalidProduct::EmptyName));
    }

    #[test]
    fn test_name_is_trimmed() {
        let (_, _, categories) = household();
        let req = request("  melk ", None, None);
        assert_eq!(place(&req, &categories).unwrap().name, "melk");
    }

    #[test]
    fn test_foreign_category_rejected() {
        let (_, _, categories) = household();
        let req = request("melk", Some(Uuid::new_v4()), None);
        assert_eq!(place(&req, &categories), Err(InvalidProduct::UnknownCategory));
    }

    #[test]
    fn test_predicted_category_resolves_via_alias() {
        let (dairy, _, categories) = household();
        let req = request("melk", None, None);
        let placement = place(&req, &categories).unwrap();
        assert_eq!(placement.category_id, Some(dairy));
        assert_eq!(placement.emoji, "🥛");
    }

    #[test]
    fn test_falls_back_to_overig() {
        let (_, other, categories) = household();
        let req = request("cola", None, None);
        assert_eq!(place(&req, &categories).unwrap().category_id, Some(other));

        let req = request("xyz onbekend", None, None);
        let placement = place(&req, &categories).unwrap();
        assert_eq!(placement.category_id, Some(other));
        assert_eq!(placement.emoji, FALLBACK_EMOJI);
    }

    #[test]
    fn test_uncategorized_without_fallback() {
        let categories = vec![(Uuid::new_v4(), "Dranken".to_string())];
        let req = request("melk", None, None);
        let placement = place(&req, &categories).unwrap();
        assert_eq!(placement.category_id, None);
        assert!(placement.prediction.is_some());
    }

    #[test]
    fn test_supplied_emoji_beats_prediction() {
        let (dairy, _, categories) = household();
        let req = request("melk", None, Some(" 🐄 "));
        let placement = place(&req, &categories).unwrap();
        assert_eq!(placement.emoji, "🐄");
        assert_eq!(placement.category_id, Some(dairy));
    }

    #[test]
    fn test_blank_emoji_is_predicted() {
        let (_, _, categories) = household();
        let req = request("melk", None, Some("  "));
        assert_eq!(place(&req, &categories).unwrap().emoji, "🥛");
    }

    #[test]
    fn test_no_prediction_when_everything_supplied() {
        let (_, other, categories) = household();
        let req = request("melk", Some(other), Some("🧃"));
        let placement = place(&req, &categories).unwrap();
        assert_eq!(placement.prediction, None);
        assert_eq!(placement.category_id, Some(other));
        assert_eq!(placement.emoji, "🧃");
    }

    #[test]
    fn test_column_lengths() {
        let (_, _, categories) = household();

        let req = request(&"a".repeat(MAX_NAME_CHARS), None, None);
        assert!(place(&req, &categories).is_ok());
        let req = request(&"a".repeat(MAX_NAME_CHARS + 1), None, None);
        assert_eq!(place(&req, &categories), Err(InvalidProduct::NameTooLong));

        // multi-byte characters count once
        let req = request("melk", None, Some("🥛".repeat(MAX_EMOJI_CHARS).as_str()));
        assert!(place(&req, &categories).is_ok());
        let req = request("melk", None, Some("🥛".repeat(MAX_EMOJI_CHARS + 1).as_str()));
        assert_eq!(place(&req, &categories), Err(InvalidProduct::EmojiTooLong));
    }
}

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use models::{Product, ProductInput};

use super::body::parse_json_body;
use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const LIST_FAILED: &str = "Erreur lors de la récupération des produits";
pub const CREATE_FAILED: &str = "Erreur lors de l'ajout du produit";

/// GET /api/products
pub async fn list_products(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    state
        .catalog
        .list_products()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, LIST_FAILED))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let input: ProductInput = parse_json_body(&body?)?;
    state
        .catalog
        .create_product(input)
        .await
        .map(|product| (StatusCode::CREATED, Json(product)))
        .map_err(|e| JsonApiError::from_service(e, CREATE_FAILED))
}

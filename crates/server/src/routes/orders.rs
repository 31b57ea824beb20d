use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use models::{Order, OrderInput};

use super::body::parse_json_body;
use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const LIST_FAILED: &str = "Erreur lors de la récupération des commandes";
pub const CREATE_FAILED: &str = "Erreur lors de la création de la commande";

/// GET /api/orders
pub async fn list_orders(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Order>>, JsonApiError> {
    state
        .orders
        .list_orders()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, LIST_FAILED))
}

/// POST /api/orders. Unknown product ids answer 400 and leave the order file as it was.
pub async fn create_order(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Order>), JsonApiError> {
    let input: OrderInput = parse_json_body(&body?)?;
    state
        .orders
        .create_order(input)
        .await
        .map(|order| (StatusCode::CREATED, Json(order)))
        .map_err(|e| JsonApiError::from_service(e, CREATE_FAILED))
}

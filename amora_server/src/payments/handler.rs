use std::sync::Arc;

use amora_core::payments::dto::PaymentRecord;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::dto::MessageResponse;
use crate::error::ErrorServer;
use crate::state::ServerState;

pub async fn list_payments(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<PaymentRecord>>, ErrorServer> {
    Ok(Json(state.payments.all()?))
}

/// Terminal operator decision; credits the owning user exactly once.
pub async fn approve_payment(
    State(state): State<Arc<ServerState>>,
    Path(payment_id): Path<String>,
) -> Result<Json<MessageResponse>, ErrorServer> {
    let payment = state.payments.approve(&state.users, &payment_id)?;
    log::info!(
        "payment {} approved for user {}",
        payment.id,
        payment.user_id
    );
    Ok(Json(MessageResponse {
        success: true,
        message: format!("Payment {} approved", payment.id),
    }))
}

pub async fn reject_payment(
    State(state): State<Arc<ServerState>>,
    Path(payment_id): Path<String>,
) -> Result<Json<MessageResponse>, ErrorServer> {
    let payment = state.payments.reject(&payment_id)?;
    log::info!(
        "payment {} rejected for user {}",
        payment.id,
        payment.user_id
    );
    Ok(Json(MessageResponse {
        success: true,
        message: format!("Payment {} rejected", payment.id),
    }))
}

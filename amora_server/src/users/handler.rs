use std::sync::Arc;

use amora_core::error::StoreError;
use amora_core::users::dto::{UserRecord, UserUpdate};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::dto::MessageResponse;
use crate::error::ErrorServer;
use crate::state::ServerState;

pub async fn list_users(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<UserRecord>>, ErrorServer> {
    Ok(Json(state.users.all()?))
}

pub async fn update_user(
    State(state): State<Arc<ServerState>>,
    Path(user_id): Path<i64>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserRecord>, ErrorServer> {
    Ok(Json(state.users.apply(user_id, &update)?))
}

pub async fn delete_user(
    State(state): State<Arc<ServerState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ErrorServer> {
    if !state.users.exists(user_id)? {
        return Err(StoreError::NotFound(user_id.to_string()).into());
    }
    state.users.delete(user_id)?;
    Ok(Json(MessageResponse {
        success: true,
        message: format!("User {} deleted", user_id),
    }))
}

use std::sync::Arc;

use amora_core::stats::{Stats, collect};
use axum::{Json, extract::State};

use crate::error::ErrorServer;
use crate::state::ServerState;

pub async fn stats(State(state): State<Arc<ServerState>>) -> Result<Json<Stats>, ErrorServer> {
    Ok(Json(collect(&state.users, &state.payments)?))
}

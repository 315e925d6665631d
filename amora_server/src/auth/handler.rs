use std::env;

use amora_core::helpers::jwt::JwtManager;
use axum::Json;

use super::dto::{LoginRequest, LoginResponse, MessageResponse};
use crate::error::ErrorServer;

/// Check operator credentials against the environment and issue a session
/// token for the dashboard.
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, ErrorServer> {
    let username = env::var("ADMIN_USERNAME").map_err(|_| ErrorServer {
        message: "ADMIN_USERNAME is not configured".to_string(),
        status: 500,
    })?;
    let password = env::var("ADMIN_PASSWORD").map_err(|_| ErrorServer {
        message: "ADMIN_PASSWORD is not configured".to_string(),
        status: 500,
    })?;

    if request.username != username || request.password != password {
        return Err(ErrorServer {
            message: "Invalid credentials".to_string(),
            status: 401,
        });
    }

    let token = JwtManager::new()
        .generate_token(&request.username)
        .map_err(|e| {
            log::error!("failed to issue session token: {}", e);
            ErrorServer {
                message: "Failed to issue session token".to_string(),
                status: 500,
            }
        })?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// Sessions are stateless tokens; logging out is the client discarding
/// its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: "Logged out".to_string(),
    })
}

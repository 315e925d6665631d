use amora_core::helpers::jwt::JwtManager;
use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ErrorServer;

/// Dashboard session check: a bearer token issued by `POST /admin/login`.
pub async fn auth(mut req: Request, next: Next) -> Result<Response, ErrorServer> {
    let headers = req.headers();
    let token = headers.get("Authorization").and_then(|h| h.to_str().ok());

    if let Some(token) = token {
        let jwt_manager = JwtManager::new();
        let token = token.replace("Bearer ", "");
        let claims = jwt_manager.validate_token(&token).map_err(|e| ErrorServer {
            message: e.to_string(),
            status: 401,
        })?;

        req.extensions_mut().insert(claims);
    } else {
        return Err(ErrorServer {
            message: "Authentication required".to_string(),
            status: 401,
        });
    }

    Ok(next.run(req).await)
}

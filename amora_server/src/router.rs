use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    auth::handler::{login, logout},
    middlewares::handler::auth,
    payments::handler::{approve_payment, list_payments, reject_payment},
    state::ServerState,
    stats::handler::stats,
    users::handler::{delete_user, list_users, update_user},
};

pub fn router(state: Arc<ServerState>) -> Router {
    let protected = Router::new()
        .route("/admin/stats", get(stats))
        .route("/admin/users", get(list_users))
        .route(
            "/admin/users/{user_id}",
            put(update_user).delete(delete_user),
        )
        .route("/admin/payments", get(list_payments))
        .route("/admin/payments/{payment_id}/approve", post(approve_payment))
        .route("/admin/payments/{payment_id}/reject", post(reject_payment))
        .route_layer(middleware::from_fn(auth));

    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amora_core::payments::handler::Payments;
    use amora_core::users::handler::Users;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let state = Arc::new(ServerState::new(
            Users::new(&db).unwrap(),
            Payments::new(&db).unwrap(),
        ));
        router(state)
    }

    #[tokio::test]
    async fn protected_routes_require_a_session() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn logout_is_always_available() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

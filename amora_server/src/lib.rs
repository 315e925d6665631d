pub mod auth;
pub mod error;
pub mod middlewares;
pub mod payments;
pub mod router;
pub mod state;
pub mod stats;
pub mod users;

pub use router::router;
pub use state::ServerState;

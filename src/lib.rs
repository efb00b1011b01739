//! SSC - session control front end for PON subscribers.

pub mod config;
pub mod models;
pub mod operator;
pub mod routes;
pub mod state;

pub use config::Config;
pub use models::{ApiError, DeleteForm, DeleteResponse, LookupResponse, NOT_FOUND_MESSAGE};
pub use operator::RemoteUser;
pub use routes::create_router;
pub use state::AppState;

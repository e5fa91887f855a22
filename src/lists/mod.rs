mod dto;
mod handlers;
mod repo;

pub use dto::MessageResponse;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::list_routes()
}

pub mod dto;
mod handlers;
pub mod repo;
mod seed;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::catalog_routes()
}

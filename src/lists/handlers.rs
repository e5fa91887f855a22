use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{ListEntryRequest, ListType, MessageResponse},
    repo,
};
use crate::{auth::jwt::AuthUser, catalog::repo::Movie, error::ApiError, state::AppState};

pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/user/lists", post(add_to_list).delete(remove_from_list))
        .route("/user/lists/:list_type", get(get_list))
}

#[instrument(skip(state))]
async fn add_to_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ListEntryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if repo::contains(&state.db, user_id, payload.movie_id, payload.list_type).await? {
        return Err(ApiError::AlreadyInList);
    }

    repo::add(&state.db, user_id, payload.movie_id, payload.list_type)
        .await
        .map_err(|e| {
            // a concurrent duplicate add lands on the unique constraint
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                ApiError::AlreadyInList
            } else {
                ApiError::from(e)
            }
        })?;

    info!(user_id = %user_id, movie_id = %payload.movie_id, list_type = %payload.list_type, "added to list");
    Ok(Json(MessageResponse {
        message: format!("Added to {}", payload.list_type),
    }))
}

#[instrument(skip(state))]
async fn remove_from_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ListEntryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = repo::remove(&state.db, user_id, payload.movie_id, payload.list_type).await?;
    if !removed {
        return Err(ApiError::NotInList);
    }

    info!(user_id = %user_id, movie_id = %payload.movie_id, list_type = %payload.list_type, "removed from list");
    Ok(Json(MessageResponse {
        message: format!("Removed from {}", payload.list_type),
    }))
}

#[instrument(skip(state))]
async fn get_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_type): Path<ListType>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = repo::movies_in(&state.db, user_id, list_type).await?;
    Ok(Json(movies))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_messages_name_the_list() {
        let added = MessageResponse {
            message: format!("Added to {}", ListType::Favorites),
        };
        let removed = MessageResponse {
            message: format!("Removed from {}", ListType::Watched),
        };
        assert_eq!(added.message, "Added to favorites");
        assert_eq!(removed.message, "Removed from watched");
    }

    #[test]
    fn list_entry_request_parses_wire_body() {
        let body = r#"{"movie_id":"8f14e45f-ceea-467f-a07d-c5ad3aed4e39","list_type":"watched"}"#;
        let req: ListEntryRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.list_type, ListType::Watched);
    }
}

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{MovieCreate, MovieQuery},
    repo::{Genre, Movie},
    seed,
};
use crate::{error::ApiError, lists::MessageResponse, state::AppState};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/:id", get(get_movie))
        .route("/genres", get(list_genres).post(create_genre))
        .route("/init-data", post(init_data))
}

#[instrument(skip(state))]
async fn list_movies(
    State(state): State<AppState>,
    Query(q): Query<MovieQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = Movie::search(
        &state.db,
        q.search.as_deref(),
        q.genre_id.as_deref(),
        q.limit,
        q.skip,
    )
    .await?;
    Ok(Json(movies))
}

#[instrument(skip(state))]
async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Movie>, ApiError> {
    let movie = Movie::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::MovieNotFound)?;
    Ok(Json(movie))
}

#[instrument(skip(state, payload))]
async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<MovieCreate>,
) -> Result<Json<Movie>, ApiError> {
    let movie = Movie::create(&state.db, &payload).await?;
    info!(movie_id = %movie.id, title = %movie.title, "movie created");
    Ok(Json(movie))
}

#[instrument(skip(state))]
async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, ApiError> {
    let genres = Genre::all(&state.db).await?;
    Ok(Json(genres))
}

#[instrument(skip(state, payload))]
async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<Genre>,
) -> Result<Json<Genre>, ApiError> {
    Genre::insert_if_absent(&state.db, &payload).await?;
    Ok(Json(payload))
}

#[instrument(skip(state))]
async fn init_data(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    seed::seed_sample_data(&state.db).await?;
    Ok(Json(MessageResponse {
        message: "Sample data initialized successfully".into(),
    }))
}

use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        jwt::{AuthUser, JwtKeys},
        password,
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if !is_valid_email(&payload.email) {
        warn!("register with invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.is_empty() {
        warn!("register with empty password");
        return Err(ApiError::BadRequest("Password must not be empty".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    // Argon2 is CPU-bound; keep it off the event loop.
    let plain = payload.password.clone();
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(anyhow::Error::from)??;

    // The unique index on email closes the check-then-insert race.
    let user = User::create(&state.db, &payload.email, &payload.name, &hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::EmailTaken
            } else {
                ApiError::from(e)
            }
        })?;

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        user,
        token,
        message: "Registration successful".into(),
    }))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // Unknown email and wrong password must be indistinguishable to the caller.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login with unknown email");
            ApiError::InvalidCredentials
        })?;

    let plain = payload.password.clone();
    let hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .map_err(anyhow::Error::from)??;

    if !ok {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        user,
        token,
        message: "Login successful".into(),
    }))
}

#[instrument(skip(state))]
async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "token subject no longer exists");
            ApiError::UserNotFound
        })?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn auth_response_excludes_password_hash() {
        let response = AuthResponse {
            user: User {
                id: Uuid::new_v4(),
                email: "alice@example.com".into(),
                name: "Alice".into(),
                password_hash: "$argon2id$v=19$secret".into(),
                created_at: datetime!(2024-01-01 00:00 UTC),
            },
            token: "header.payload.signature".into(),
            message: "Registration successful".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(json.contains("token"));
        assert!(!json.contains("password_hash"));
    }
}

// DB-backed flows; run with `cargo test -- --ignored` against a disposable
// Postgres pointed to by DATABASE_URL.
#[cfg(test)]
mod db_tests {
    use std::sync::Arc;

    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    use super::*;
    use crate::config::{AppConfig, JwtConfig};

    async fn test_state() -> AppState {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for DB tests");
        let db = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to test database");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("run migrations");
        AppState {
            db,
            config: Arc::new(AppConfig {
                database_url: url,
                jwt: JwtConfig {
                    secret: "test-secret".into(),
                    ttl_hours: 24,
                },
            }),
        }
    }

    fn unique_email() -> String {
        format!("alice-{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requires Postgres via DATABASE_URL"]
    async fn register_then_login_resolve_to_same_user() {
        let state = test_state().await;
        let email = unique_email();

        let registered = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: email.clone(),
                password: "pw123".into(),
                name: "Alice".into(),
            }),
        )
        .await
        .expect("register")
        .0;

        let logged_in = login(
            State(state.clone()),
            Json(LoginRequest {
                email: email.clone(),
                password: "pw123".into(),
            }),
        )
        .await
        .expect("login")
        .0;

        assert_eq!(registered.user.id, logged_in.user.id);

        // tokens may differ but both resolve to the same subject
        let keys = JwtKeys::from_ref(&state);
        assert_eq!(
            keys.verify(&registered.token).expect("verify").sub,
            keys.verify(&logged_in.token).expect("verify").sub,
        );

        let err = login(
            State(state),
            Json(LoginRequest {
                email,
                password: "wrongpw".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[tokio::test]
    #[ignore = "requires Postgres via DATABASE_URL"]
    async fn repeated_registration_fails_email_taken() {
        let state = test_state().await;
        let email = unique_email();

        register(
            State(state.clone()),
            Json(RegisterRequest {
                email: email.clone(),
                password: "pw123".into(),
                name: "Alice".into(),
            }),
        )
        .await
        .expect("first register");

        // different name and password make no difference
        let err = register(
            State(state),
            Json(RegisterRequest {
                email,
                password: "other-password".into(),
                name: "Mallory".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::EmailTaken));
    }
}

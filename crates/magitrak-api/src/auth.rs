use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use magitrak_db::{Database, MatchStore};
use magitrak_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub matches: Arc<dyn MatchStore>,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

impl AppStateInner {
    /// Users and matches both live in `db`.
    pub fn new(db: Arc<Database>, jwt_secret: String, token_ttl: chrono::Duration) -> Self {
        Self {
            matches: db.clone(),
            db,
            jwt_secret,
            token_ttl,
        }
    }

    /// Serve matches from a different store than users.
    pub fn with_match_store(mut self, matches: Arc<dyn MatchStore>) -> Self {
        self.matches = matches;
        self
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.len() < 3 || req.username.len() > 32 {
        return Err(ApiError::BadRequest("username must be 3 to 32 characters"));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest("password must be at least 8 characters"));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    // The UNIQUE constraint decides, so concurrent registrations cannot both win
    let user_id = state
        .db
        .create_user(&req.username, &password_hash)?
        .ok_or(ApiError::Conflict("username already taken"))?;
    let token = create_token(&state.jwt_secret, user_id, &req.username, state.token_ttl)?;

    info!(user_id, username = %req.username, "User registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_username(&req.username)?
        .ok_or(ApiError::Unauthenticated)?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("corrupt password hash for user {}: {}", user.id, e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthenticated)?;

    let token = create_token(&state.jwt_secret, user.id, &user.username, state.token_ttl)?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

pub fn create_token(
    secret: &str,
    user_id: i64,
    username: &str,
    ttl: chrono::Duration,
) -> anyhow::Result<String> {
    let expires_at = chrono::Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow::anyhow!("token lifetime {} overflows", ttl))?;
    let exp = usize::try_from(expires_at.timestamp())
        .map_err(|_| anyhow::anyhow!("token expiry {} is before the epoch", expires_at))?;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

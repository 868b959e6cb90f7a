use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;

use magitrak_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// The authenticated owner behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// Session context handed to every match handler. Handlers never look the
/// session up themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Authenticated(Identity),
    Absent,
}

impl Session {
    pub fn identity(&self) -> Result<&Identity, ApiError> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Absent => Err(ApiError::Unauthenticated),
        }
    }
}

/// Resolve the bearer token in `headers`. Anything short of a valid,
/// unexpired token signed with `secret` is `Session::Absent`.
pub fn resolve_session(headers: &HeaderMap, secret: &str) -> Session {
    let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
    else {
        return Session::Absent;
    };

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => Session::Authenticated(Identity {
            user_id: data.claims.sub,
            username: data.claims.username,
        }),
        Err(e) => {
            debug!("Rejected bearer token: {}", e);
            Session::Absent
        }
    }
}

/// Routing-layer gate: requests without a session stop here with 401.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = resolve_session(req.headers(), &state.jwt_secret);
    if session == Session::Absent {
        return Err(ApiError::Unauthenticated);
    }

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Session>()
            .cloned()
            .unwrap_or(Session::Absent))
    }
}

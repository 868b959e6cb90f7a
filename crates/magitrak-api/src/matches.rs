use axum::{
    Json,
    extract::{Path, Query, State},
};
use bytes::Bytes;
use tracing::{error, info};

use magitrak_db::ListFilter;
use magitrak_types::api::{CreateMatchResponse, DeleteMatchResponse, ListMatchesQuery};
use magitrak_types::{MatchRecord, NewMatch};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::guard::authorize;
use crate::middleware::{Identity, Session};
use crate::validation::validate;

/// POST /match
pub async fn create_match(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<Json<CreateMatchResponse>, ApiError> {
    let new: NewMatch =
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedInput(e.to_string()))?;
    validate(&new)?;

    let identity = session.identity()?;
    // Nobody records matches on another user's behalf
    authorize(identity.user_id, new.owner_id)?;

    let store = state.matches.clone();
    let owner_id = new.owner_id;
    let match_id = run_blocking(move || store.create(&new)).await?;

    info!(%match_id, owner_id, "Match created");
    Ok(Json(CreateMatchResponse { match_id }))
}

/// GET /match/{match_id}
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    session: Session,
) -> Result<Json<MatchRecord>, ApiError> {
    let identity = session.identity()?;
    let record = fetch_owned(&state, &match_id, identity).await?;
    Ok(Json(record))
}

/// DELETE /match/{match_id}
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    session: Session,
) -> Result<Json<DeleteMatchResponse>, ApiError> {
    let identity = session.identity()?;
    fetch_owned(&state, &match_id, identity).await?;

    let store = state.matches.clone();
    let id = match_id.clone();
    let removed = run_blocking(move || store.delete_by_id(&id)).await?;
    if !removed {
        return Err(anyhow::anyhow!("match {} vanished before delete", match_id).into());
    }

    info!(%match_id, owner_id = identity.user_id, "Match deleted");
    Ok(Json(DeleteMatchResponse))
}

/// GET /match — the session owner's matches, newest first.
pub async fn list_matches(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    let owner_id = session.identity()?.user_id;
    let filter = ListFilter {
        limit: query.limit,
        before: query.before,
    };

    let store = state.matches.clone();
    let matches = run_blocking(move || store.list_by_owner(owner_id, &filter)).await?;
    Ok(Json(matches))
}

/// Fetch a match and check the session owns it. A foreign match is rejected
/// as a bad request, not hidden behind 404.
async fn fetch_owned(
    state: &AppState,
    match_id: &str,
    identity: &Identity,
) -> Result<MatchRecord, ApiError> {
    let store = state.matches.clone();
    let id = match_id.to_string();
    let record = run_blocking(move || store.fetch_by_id(&id))
        .await?
        .ok_or(ApiError::NotFound)?;

    authorize(identity.user_id, record.owner_id)?;
    Ok(record)
}

/// Run a store call off the async runtime.
async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Store(e.into())
        })?
        .map_err(ApiError::Store)
}

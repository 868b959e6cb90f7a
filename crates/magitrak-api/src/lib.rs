pub mod auth;
pub mod error;
pub mod guard;
pub mod matches;
pub mod middleware;
pub mod validation;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::auth::AppState;
use crate::middleware::require_session;

/// All public routes, nested under `/v1`. Match routes sit behind the
/// session gate.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/match", get(matches::list_matches).post(matches::create_match))
        .route(
            "/match/{match_id}",
            get(matches::get_match).delete(matches::delete_match),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .nest("/v1", public_routes.merge(protected_routes))
        .with_state(state)
}

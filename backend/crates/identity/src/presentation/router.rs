//! Identity Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sqlx::PgPool;

use crate::application::config::IdentityConfig;
use crate::domain::repository::CredentialStore;
use crate::infra::postgres::PgCredentialStore;
use crate::presentation::handlers;
use crate::presentation::middleware::require_caller;
use crate::presentation::state::IdentityState;

/// Create the Identity router with the PostgreSQL credential store
pub fn identity_router(pool: PgPool, config: IdentityConfig) -> Router {
    identity_router_generic(IdentityState::new(PgCredentialStore::new(pool), config))
}

/// Create a generic Identity router for any credential store
///
/// Registration, login and logout are public; `/users/{id}` sits behind
/// the authorization gate.
pub fn identity_router_generic<S>(state: IdentityState<S>) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/users/{id}",
            get(handlers::get_user::<S>)
                .patch(handlers::update_user::<S>)
                .delete(handlers::delete_user::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_caller::<S>,
        ));

    Router::new()
        .route("/users", post(handlers::register::<S>))
        .route("/auth/login", post(handlers::login::<S>))
        .route("/auth/logout", post(handlers::logout::<S>))
        .merge(protected)
        .with_state(state)
}

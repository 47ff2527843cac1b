//! Authorization Gate
//!
//! Middleware for protected routes: resolves the bearer token (header or
//! cookie) into a [`Caller`] and stores it in the request extensions.
//! Handlers behind it take `Extension<Caller>`.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use kernel::caller::Caller;

use crate::application::ResolveCallerUseCase;
use crate::domain::repository::CredentialStore;
use crate::error::IdentityError;
use crate::presentation::state::IdentityState;

/// Middleware that requires a valid access token
pub async fn require_caller<S>(
    State(state): State<IdentityState<S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, IdentityError>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let token = platform::cookie::extract_token(req.headers(), &state.config.token_cookie_name)
        .ok_or_else(|| {
            tracing::debug!("token rejected: none supplied");
            IdentityError::Unauthorized
        })?;

    let caller: Caller = ResolveCallerUseCase::new(state.store.clone(), state.config.clone())
        .execute(&token)
        .await?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

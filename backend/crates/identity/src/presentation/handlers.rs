//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::Extension;
use kernel::caller::Caller;
use platform::cookie::{delete_cookie_header, set_cookie_header};

use crate::application::{
    AuthenticateInput, AuthenticateUseCase, ProfileUpdateInput, ProfileUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::UserId;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest};
use crate::presentation::state::IdentityState;

// ============================================================================
// Register
// ============================================================================

/// POST /users
pub async fn register<S>(
    State(state): State<IdentityState<S>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<(StatusCode, Json<UserProfile>)>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.store.clone(), state.config.clone());

    let profile = use_case
        .execute(RegisterInput {
            name: req.name,
            firstname: req.firstname,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /auth/login
///
/// The token is returned in the body, in the `Authorization` header and as
/// an HttpOnly cookie; all three carry the same bearer token.
pub async fn login<S>(
    State(state): State<IdentityState<S>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<impl IntoResponse>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(state.store.clone(), state.config.clone());

    let output = use_case
        .execute(AuthenticateInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let authorization = HeaderValue::from_str(&format!("Bearer {}", output.token))
        .map_err(|e| IdentityError::Internal(e.to_string()))?;
    let cookie = set_cookie_header(&state.config.token_cookie(), &output.token);

    Ok((
        StatusCode::OK,
        [(header::AUTHORIZATION, authorization), (header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            token: output.token,
            token_type: "Bearer",
            expires_at: output.expires_at,
            user_id: output.user_id,
        }),
    ))
}

/// POST /auth/logout
///
/// Tokens are stateless: this only clears the cookie. A copied token stays
/// valid until it expires.
pub async fn logout<S>(State(state): State<IdentityState<S>>) -> impl IntoResponse
where
    S: CredentialStore + Send + Sync + 'static,
{
    let cookie = delete_cookie_header(&state.config.token_cookie());
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

// ============================================================================
// Profile (behind the gate)
// ============================================================================

/// GET /users/{id}
pub async fn get_user<S>(
    State(state): State<IdentityState<S>>,
    Path(id): Path<String>,
) -> IdentityResult<Json<UserProfile>>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    let use_case = ProfileUseCase::new(state.store.clone(), state.config.clone());
    Ok(Json(use_case.get(&id).await?))
}

/// PATCH /users/{id}
pub async fn update_user<S>(
    State(state): State<IdentityState<S>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> IdentityResult<Json<UserProfile>>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    let use_case = ProfileUseCase::new(state.store.clone(), state.config.clone());

    let profile = use_case
        .update(
            &caller,
            &id,
            ProfileUpdateInput {
                name: req.name,
                firstname: req.firstname,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(profile))
}

/// DELETE /users/{id}
pub async fn delete_user<S>(
    State(state): State<IdentityState<S>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> IdentityResult<StatusCode>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    let use_case = ProfileUseCase::new(state.store.clone(), state.config.clone());
    use_case.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_user_id(raw: &str) -> IdentityResult<UserId> {
    raw.parse()
        .map_err(|_| IdentityError::InvalidInput("Malformed user id".into()))
}

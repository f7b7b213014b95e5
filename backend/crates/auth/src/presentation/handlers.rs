//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use kernel::response::ApiResponse;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::refresh_token_value::RefreshTokenValue;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, MeResponse, RegisterRequest};
use crate::presentation::extract::JsonBody;
use crate::presentation::middleware::{AuthenticatedUser, TokenSources};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    /// Where logout looks for the refresh token
    pub refresh_sources: TokenSources,
}

impl<R> AuthAppState<R>
where
    R: AuthStore,
{
    pub fn new(repo: R, config: Arc<AuthConfig>) -> Self {
        let refresh_sources = TokenSources::cookie_then_bearer(&config.refresh_cookie.name);

        Self {
            repo: Arc::new(repo),
            config,
            refresh_sources,
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Register success")),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let refresh_token = output.refresh_token.into_string();

    let cookies = AppendHeaders([
        (
            header::SET_COOKIE,
            state.config.access_cookie.build_set_cookie(&output.access_token),
        ),
        (
            header::SET_COOKIE,
            state.config.refresh_cookie.build_set_cookie(&refresh_token),
        ),
    ]);

    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::with_data(
            "Login success",
            LoginResponse {
                access_token: output.access_token,
                refresh_token,
            },
        )),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let token = state
        .refresh_sources
        .find(&headers)
        .ok_or(AuthError::InvalidToken)?;

    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case
        .execute(&RefreshTokenValue::from_presented(token))
        .await?;

    let cookies = AppendHeaders([
        (
            header::SET_COOKIE,
            state.config.access_cookie.build_delete_cookie(),
        ),
        (
            header::SET_COOKIE,
            state.config.refresh_cookie.build_delete_cookie(),
        ),
    ]);

    Ok((
        StatusCode::OK,
        cookies,
        Json(ApiResponse::message("Logout success")),
    ))
}

// ============================================================================
// Me (behind the access gate)
// ============================================================================

/// GET /api/auth/me
pub async fn me(user: AuthenticatedUser) -> Json<ApiResponse<MeResponse>> {
    Json(ApiResponse::with_data(
        "Authenticated",
        MeResponse {
            user_id: user.user_id.to_string(),
        },
    ))
}

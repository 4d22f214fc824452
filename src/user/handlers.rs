use axum::{extract::State, http::StatusCode, Json};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::error::{ApiError, FieldError};
use crate::state::AppState;
use crate::store::NewUser;

use super::dto::{CreateUserRequest, TokenRequest, TokenResponse, UserResponse};
use super::{password, token};

const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// POST /user/create
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = normalize_email(&payload.email);

    let mut errors = Vec::new();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "enter a valid email address"));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if !errors.is_empty() {
        warn!(email = %email, "registration rejected by validation");
        return Err(ApiError::Validation(errors));
    }

    let password_hash = password::hash_password(&payload.password)?;

    // Blind insert; the store's uniqueness constraint decides duplicates.
    let user = state
        .store
        .create_user(NewUser {
            email,
            password_hash,
            name: payload.name,
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "create user failed");
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            email: user.email,
            name: user.name,
        }),
    ))
}

/// POST /user/token
#[instrument(skip(state, payload))]
pub async fn create_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = normalize_email(&payload.email);

    let mut errors = Vec::new();
    if email.is_empty() {
        errors.push(FieldError::new("email", "this field is required"));
    }
    if payload.password.is_empty() {
        errors.push(FieldError::new("password", "this field is required"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let user = match state.store.find_by_email(&email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "token request for unknown email");
            return Err(ApiError::Authentication);
        }
    };

    if !password::verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "token request with invalid password");
        return Err(ApiError::Authentication);
    }

    let auth_token = state
        .store
        .get_or_create_token(user.id, &token::generate_key())
        .await?;

    info!(user_id = %user.id, "token issued");
    Ok(Json(TokenResponse {
        token: auth_token.key,
    }))
}

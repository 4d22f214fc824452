use axum::{routing::post, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod password;
pub mod token;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/create", post(handlers::create_user))
        .route("/user/token", post(handlers::create_token))
}

use serde::{Deserialize, Serialize};

/// Request body for user registration. Absent fields deserialize to empty
/// strings so the handler's own validation decides the response, not the
/// JSON extractor.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Public fields of a created user. The password hash never leaves the
/// store layer.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: Option<String>,
}

/// Request body for the credential exchange.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response carrying the opaque bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

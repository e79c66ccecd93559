//! Sign-in / sign-out
//!
//! The collaborator that writes the token the request pipeline reads. The backend
//! answers `POST /auth/login` with an access token; it is stored as-is under the
//! token key and picked up by the very next request.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiError, Transport};
use crate::token::{TokenStore, TokenStoreError};

pub const LOGIN_PATH: &str = "/auth/login";

/// Credentials accepted by the backend login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub correo_electronico: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            correo_electronico: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub mensaje: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Sign-in failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] TokenStoreError),

    #[error("Login response did not contain a token")]
    EmptyToken,
}

/// Exchange credentials for a token and store it
pub async fn sign_in<T: Transport>(
    client: &ApiClient<T>,
    tokens: &dyn TokenStore,
    credentials: &LoginRequest,
) -> Result<TokenResponse, AuthError> {
    let response: TokenResponse = client.post(LOGIN_PATH, credentials).await?.json()?;

    if response.access_token.trim().is_empty() {
        return Err(AuthError::EmptyToken);
    }

    tokens.write_token(&response.access_token)?;
    tracing::info!("Signed in as {}", credentials.correo_electronico);

    Ok(response)
}

/// Forget the stored token
pub fn sign_out(tokens: &dyn TokenStore) -> Result<(), TokenStoreError> {
    tokens.clear_token()?;
    tracing::info!("Signed out");
    Ok(())
}

//! Thin typed wrapper over the remote HTTP API. Every request goes through
//! the same path: attach credentials and the stored bearer token, translate
//! failures into `ApiError`, and expire the session on a 401.

use std::fmt;

use gloo_console::warn;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use web_sys::RequestCredentials;

pub const API_BASE_URL: &str = "https://api.finwell.app/prod";

const TOKEN_KEY: &str = "access_token";
const SESSION_KEY: &str = "session";

#[derive(Clone, PartialEq, Debug)]
pub enum ApiError {
    Network(String),
    Status(u16, String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status(code, msg) if msg.is_empty() => {
                write!(f, "request failed with status {}", code)
            }
            ApiError::Status(code, msg) => write!(f, "request failed ({}): {}", code, msg),
            ApiError::Decode(msg) => write!(f, "unexpected response shape: {}", msg),
        }
    }
}

/// The signed-in user as reported by the auth API. Passed around as an
/// explicit context value instead of being re-derived from the token.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: Session,
}

pub fn access_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(TOKEN_KEY).ok()?
}

pub fn store_token(token: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }
}

pub fn load_session() -> Option<Session> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(SESSION_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

pub fn store_session(session: &Session) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_KEY, &raw);
            }
        }
    }
}

pub fn clear_session() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE_URL, path)
}

fn authorize(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.credentials(RequestCredentials::Include);
    match access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn expire_session() {
    warn!("session expired, returning to sign-in");
    clear_session();
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

async fn run(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.status() == 401 {
        // a 401 with no stored token is just a failed sign-in, not an expiry
        if access_token().is_some() {
            expire_session();
        }
        return Err(ApiError::Status(401, "unauthorized".to_string()));
    }
    if !response.ok() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status(response.status(), message));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = authorize(Request::get(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(run(request).await?).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let request = authorize(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    decode(run(request).await?).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let request = authorize(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    decode(run(request).await?).await
}

pub async fn post_empty(path: &str) -> Result<(), ApiError> {
    let request = authorize(Request::post(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    run(request).await?;
    Ok(())
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let request = authorize(Request::delete(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    run(request).await?;
    Ok(())
}

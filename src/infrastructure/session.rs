//! Cookie sessions and flash messages
//!
//! Session storage and the `SESSIONID` cookie are handled by `tower-sessions`.
//! [`Session`] wraps its handle with a typed accessor for the logged-in hunter
//! (stored under [`USER_ATTRIBUTE`]) and at most one pending flash message.
//!
//! A flash message is recorded against the path the client is redirected to.
//! [`flash_middleware`] removes it at the start of the next request of the same
//! session and only hands it to the handler when that request targets the
//! recorded path.

use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::domain::{DomainError, HunterIdentity};

pub const SESSION_COOKIE: &str = "SESSIONID";
pub const USER_ATTRIBUTE: &str = "user";
const FLASH_ATTRIBUTE: &str = "flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub target: String,
    pub message: String,
}

/// Message taken from the session for the current request
#[derive(Debug, Clone, Default)]
struct Alert(Option<String>);

fn store_error(e: tower_sessions::session::Error) -> DomainError {
    DomainError::Internal(format!("Session store failed: {}", e))
}

/// Session layer with in-memory storage, expiring after `ttl` of inactivity
pub fn session_layer(ttl: Duration) -> SessionManagerLayer<MemoryStore> {
    let inactivity = time::Duration::try_from(ttl).unwrap_or_else(|e| {
        tracing::warn!("Session TTL out of range ({}), using one hour", e);
        time::Duration::hours(1)
    });

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(inactivity))
}

/// Request-scoped handle on the caller's session
#[derive(Clone)]
pub struct Session {
    inner: tower_sessions::Session,
    alert: Option<String>,
}

impl Session {
    fn new(inner: tower_sessions::Session, alert: Option<String>) -> Self {
        Self { inner, alert }
    }

    /// Read an attribute. Absent attributes and values of the wrong shape
    /// both yield `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.inner.get::<Value>(key).await {
            Ok(value) => value?,
            Err(e) => {
                tracing::error!("Failed to read session attribute '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Session attribute '{}' has unexpected shape: {}", key, e);
                None
            }
        }
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        self.inner.insert(key, value).await.map_err(store_error)
    }

    pub async fn remove(&self, key: &str) {
        if let Err(e) = self.inner.remove::<Value>(key).await {
            tracing::error!("Failed to remove session attribute '{}': {}", key, e);
        }
    }

    /// The logged-in hunter, if any
    pub async fn user(&self) -> Option<HunterIdentity> {
        self.get(USER_ATTRIBUTE).await
    }

    /// Store the hunter under a fresh session id
    pub async fn log_in(&self, hunter: &HunterIdentity) -> Result<(), DomainError> {
        self.inner.cycle_id().await.map_err(store_error)?;
        self.insert(USER_ATTRIBUTE, hunter).await
    }

    pub async fn clear_user(&self) {
        self.remove(USER_ATTRIBUTE).await;
    }

    /// Leave a one-time message for the next request, shown only if that
    /// request is for `target`.
    pub async fn flash(&self, target: impl Into<String>, message: impl Into<String>) {
        let flash = Flash {
            target: target.into(),
            message: message.into(),
        };
        if let Err(e) = self.insert(FLASH_ATTRIBUTE, &flash).await {
            tracing::error!("Failed to store flash message: {}", e);
        }
    }

    async fn take_flash(&self) -> Option<Flash> {
        let flash = self.get::<Flash>(FLASH_ATTRIBUTE).await?;
        self.remove(FLASH_ATTRIBUTE).await;
        Some(flash)
    }

    /// Message flashed by the previous request for this path
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

fn session_unavailable() -> (StatusCode, Json<Value>) {
    tracing::error!("Session extractor used without the session layer");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Session unavailable" })),
    )
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let inner = parts
            .extensions
            .get::<tower_sessions::Session>()
            .cloned()
            .ok_or_else(session_unavailable)?;
        let alert = parts
            .extensions
            .get::<Alert>()
            .cloned()
            .unwrap_or_default();

        Ok(Session::new(inner, alert.0))
    }
}

/// Middleware consuming the pending flash message of the session.
///
/// Must run inside [`session_layer`].
pub async fn flash_middleware(mut req: Request, next: Next) -> Response {
    if let Some(inner) = req.extensions().get::<tower_sessions::Session>().cloned() {
        let alert = Session::new(inner, None)
            .take_flash()
            .await
            .filter(|flash| flash.target == req.uri().path())
            .map(|flash| flash.message);
        req.extensions_mut().insert(Alert(alert));
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(tower_sessions::Session::new(None, store, None), None)
    }

    #[tokio::test]
    async fn test_user_accessor() {
        let session = session();
        assert!(session.user().await.is_none());

        let hunter = HunterIdentity {
            id: 7,
            nickname: "boletus_bob".to_string(),
            admin: false,
        };
        session.log_in(&hunter).await.unwrap();
        assert_eq!(session.user().await.map(|u| u.id), Some(7));

        session.clear_user().await;
        assert!(session.user().await.is_none());
    }

    #[tokio::test]
    async fn test_user_of_wrong_shape_is_absent() {
        let session = session();
        session
            .insert(USER_ATTRIBUTE, &"just a string")
            .await
            .unwrap();
        assert!(session.user().await.is_none());
    }

    #[tokio::test]
    async fn test_flash_is_taken_once() {
        let session = session();
        session.flash("/visits", "Visit was deleted.").await;

        let flash = session.take_flash().await.expect("flash should be pending");
        assert_eq!(flash.target, "/visits");
        assert_eq!(flash.message, "Visit was deleted.");
        assert!(session.take_flash().await.is_none());
    }
}

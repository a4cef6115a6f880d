//! Hunter Service - registration and credential checks

use crate::domain::{DomainError, HunterIdentity, NewHunter};
use crate::infrastructure::auth::{hash_password, verify_password};
use crate::infrastructure::AppState;

/// Input for registering a hunter with a plain-text password
#[derive(Debug, Clone)]
pub struct HunterRegistration {
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub admin: bool,
}

pub async fn register_hunter(
    state: &AppState,
    registration: HunterRegistration,
) -> Result<HunterIdentity, DomainError> {
    let nickname = registration.nickname.trim().to_string();
    if nickname.is_empty() {
        return Err(DomainError::Validation("Nickname is required".to_string()));
    }
    if registration.password.is_empty() {
        return Err(DomainError::Validation("Password is required".to_string()));
    }

    let password_hash = hash_password(&registration.password)?;

    state
        .hunter_repo
        .create(NewHunter {
            nickname,
            first_name: registration.first_name,
            last_name: registration.last_name,
            password_hash,
            admin: registration.admin,
        })
        .await
}

/// Check a nickname/password pair.
///
/// Unknown nicknames and wrong passwords both yield `Ok(None)`.
pub async fn authenticate(
    state: &AppState,
    nickname: &str,
    password: &str,
) -> Result<Option<HunterIdentity>, DomainError> {
    let Some(credentials) = state.hunter_repo.find_credentials(nickname).await? else {
        tracing::warn!("Hunter not found: {}", nickname);
        return Ok(None);
    };

    if verify_password(password, &credentials.password_hash)? {
        Ok(Some(credentials.identity))
    } else {
        tracing::warn!("Password verification failed for hunter: {}", nickname);
        Ok(None)
    }
}

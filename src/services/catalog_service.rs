//! Catalog Service - forests and mushrooms offered by the visit forms

use serde::Serialize;

use crate::domain::{DomainError, Forest, Mushroom, MushroomKind, NewForest, NewMushroom};
use crate::infrastructure::AppState;

/// Reference data every visit form needs
#[derive(Debug, Clone, Serialize)]
pub struct FormCatalogs {
    pub forests: Vec<Forest>,
    pub mushrooms: Vec<Mushroom>,
}

pub async fn list_forests(state: &AppState) -> Result<Vec<Forest>, DomainError> {
    state.forest_repo.find_all().await
}

pub async fn list_mushrooms(state: &AppState) -> Result<Vec<Mushroom>, DomainError> {
    state.mushroom_repo.find_all().await
}

/// Load the full forest and mushroom catalogs (no paging)
pub async fn load_catalogs(state: &AppState) -> Result<FormCatalogs, DomainError> {
    Ok(FormCatalogs {
        forests: list_forests(state).await?,
        mushrooms: list_mushrooms(state).await?,
    })
}

pub async fn create_forest(
    state: &AppState,
    name: &str,
    description: Option<&str>,
) -> Result<Forest, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("Forest name is required".to_string()));
    }

    state
        .forest_repo
        .create(NewForest {
            name: name.to_string(),
            description: description.map(str::to_string),
        })
        .await
}

pub async fn create_mushroom(
    state: &AppState,
    name: &str,
    kind: MushroomKind,
    description: Option<&str>,
) -> Result<Mushroom, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("Mushroom name is required".to_string()));
    }

    state
        .mushroom_repo
        .create(NewMushroom {
            name: name.to_string(),
            kind,
            description: description.map(str::to_string),
        })
        .await
}

//! Demo data for a fresh database
//!
//! Rows whose unique name already exists are left alone, so seeding twice is
//! harmless.

use crate::domain::{DomainError, MushroomKind};
use crate::infrastructure::AppState;
use crate::services::catalog_service;
use crate::services::hunter_service::{self, HunterRegistration};

const HUNTERS: &[(&str, &str, &str, &str, bool)] = &[
    ("admin", "Ada", "Hribova", "admin", true),
    ("boletus_bob", "Bob", "Kozak", "hunter", false),
];

const FORESTS: &[(&str, &str)] = &[
    ("Moravian Karst", "Beech and spruce woods north of Brno"),
    ("Sumava", "Old-growth spruce forest on the Bavarian border"),
    ("Krivoklatsko", "Oak and hornbeam woods along the Berounka"),
];

const MUSHROOMS: &[(&str, MushroomKind, &str)] = &[
    ("Penny bun", MushroomKind::Edible, "Boletus edulis"),
    ("Chanterelle", MushroomKind::Edible, "Cantharellus cibarius"),
    ("Bitter bolete", MushroomKind::Unedible, "Tylopilus felleus"),
    ("Death cap", MushroomKind::Poisonous, "Amanita phalloides"),
];

fn skip_existing<T>(result: Result<T, DomainError>, what: &str) -> Result<(), DomainError> {
    match result {
        Ok(_) => Ok(()),
        Err(DomainError::Conflict(_)) => {
            tracing::debug!("Seed: {} already exists", what);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    for (nickname, first_name, last_name, password, admin) in HUNTERS {
        let result = hunter_service::register_hunter(
            state,
            HunterRegistration {
                nickname: nickname.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password: password.to_string(),
                admin: *admin,
            },
        )
        .await;
        skip_existing(result, nickname)?;
    }

    for (name, description) in FORESTS {
        let result = catalog_service::create_forest(state, name, Some(description)).await;
        skip_existing(result, name)?;
    }

    for (name, kind, description) in MUSHROOMS {
        let result = catalog_service::create_mushroom(state, name, *kind, Some(description)).await;
        skip_existing(result, name)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{db::init_db, Config};

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        let state = AppState::new(db, &Config::default());

        seed_demo_data(&state).await.expect("First seed failed");
        seed_demo_data(&state).await.expect("Second seed failed");

        let forests = catalog_service::list_forests(&state).await.unwrap();
        assert_eq!(forests.len(), FORESTS.len());
        let mushrooms = catalog_service::list_mushrooms(&state).await.unwrap();
        assert_eq!(mushrooms.len(), MUSHROOMS.len());

        let admin = hunter_service::authenticate(&state, "admin", "admin")
            .await
            .unwrap()
            .expect("admin should log in");
        assert!(admin.admin);
    }
}

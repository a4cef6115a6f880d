//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Authenticated hunter as stored in the session under `user`.
///
/// Nicknames are unique, so equality only looks at the nickname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HunterIdentity {
    pub id: i32,
    pub nickname: String,
    pub admin: bool,
}

impl PartialEq for HunterIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.nickname == other.nickname
    }
}

impl Eq for HunterIdentity {}

impl Hash for HunterIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nickname.hash(state);
    }
}

/// Hunter identity together with the stored password hash, used by login only
#[derive(Debug, Clone)]
pub struct HunterCredentials {
    pub identity: HunterIdentity,
    pub password_hash: String,
}

/// Input for registering a hunter
#[derive(Debug, Clone)]
pub struct NewHunter {
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub admin: bool,
}

/// Forest data for views. Two forests are equal when their names are.
#[derive(Debug, Clone, Serialize)]
pub struct Forest {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl PartialEq for Forest {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Forest {}

impl Hash for Forest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Input for creating a forest
#[derive(Debug, Clone)]
pub struct NewForest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MushroomKind {
    Edible,
    Unedible,
    Poisonous,
}

impl MushroomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MushroomKind::Edible => "edible",
            MushroomKind::Unedible => "unedible",
            MushroomKind::Poisonous => "poisonous",
        }
    }
}

impl FromStr for MushroomKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edible" => Ok(MushroomKind::Edible),
            "unedible" => Ok(MushroomKind::Unedible),
            "poisonous" => Ok(MushroomKind::Poisonous),
            other => Err(DomainError::Validation(format!(
                "Unknown mushroom kind: {}",
                other
            ))),
        }
    }
}

/// Mushroom data for views. Two mushrooms are equal when their names are.
#[derive(Debug, Clone, Serialize)]
pub struct Mushroom {
    pub id: i32,
    pub name: String,
    pub kind: MushroomKind,
    pub description: Option<String>,
}

impl PartialEq for Mushroom {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Mushroom {}

/// Input for creating a mushroom
#[derive(Debug, Clone)]
pub struct NewMushroom {
    pub name: String,
    pub kind: MushroomKind,
    pub description: Option<String>,
}

/// Visit data for views.
///
/// Identity is the natural key `(hunter, forest, date)`; the surrogate `id`
/// only addresses the record in URLs and takes no part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    pub id: i32,
    pub hunter: HunterIdentity,
    pub forest: Forest,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub mushrooms: Vec<Mushroom>,
}

impl PartialEq for Visit {
    fn eq(&self, other: &Self) -> bool {
        self.hunter == other.hunter && self.forest == other.forest && self.date == other.date
    }
}

impl Eq for Visit {}

impl Hash for Visit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hunter.hash(state);
        self.forest.hash(state);
        self.date.hash(state);
    }
}

/// Validated input for creating or updating a visit
#[derive(Debug, Clone, PartialEq)]
pub struct VisitInput {
    pub hunter_id: i32,
    pub forest_id: i32,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub mushroom_ids: Vec<i32>,
}

/// Repository trait for Visit entity
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Find all visits, newest first
    async fn find_all(&self) -> Result<Vec<Visit>, DomainError>;

    /// Find a visit by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Visit>, DomainError>;

    /// Look up the visit holding the given natural key, if any
    async fn find_id_by_natural_key(
        &self,
        hunter_id: i32,
        forest_id: i32,
        date: NaiveDate,
    ) -> Result<Option<i32>, DomainError>;

    /// Create a visit together with its mushroom links
    async fn create(&self, input: VisitInput) -> Result<Visit, DomainError>;

    /// Replace a visit's fields and mushroom links
    async fn update(&self, id: i32, input: VisitInput) -> Result<Visit, DomainError>;

    /// Delete a visit by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Forest entity
#[async_trait]
pub trait ForestRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Forest>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Forest>, DomainError>;

    async fn create(&self, forest: NewForest) -> Result<Forest, DomainError>;
}

/// Repository trait for Mushroom entity
#[async_trait]
pub trait MushroomRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Mushroom>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Mushroom>, DomainError>;

    async fn create(&self, mushroom: NewMushroom) -> Result<Mushroom, DomainError>;
}

/// Repository trait for MushroomHunter entity
#[async_trait]
pub trait HunterRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<HunterIdentity>, DomainError>;

    /// Load the identity and password hash for a nickname
    async fn find_credentials(
        &self,
        nickname: &str,
    ) -> Result<Option<HunterCredentials>, DomainError>;

    async fn create(&self, hunter: NewHunter) -> Result<HunterIdentity, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hunter(id: i32, nickname: &str) -> HunterIdentity {
        HunterIdentity {
            id,
            nickname: nickname.to_string(),
            admin: false,
        }
    }

    fn forest(id: i32, name: &str) -> Forest {
        Forest {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    fn visit(id: i32, note: Option<&str>) -> Visit {
        Visit {
            id,
            hunter: hunter(7, "boletus_bob"),
            forest: forest(3, "Moravian Karst"),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            note: note.map(str::to_string),
            mushrooms: vec![],
        }
    }

    #[test]
    fn test_visit_equality_uses_natural_key() {
        let a = visit(1, None);
        let b = visit(2, Some("lots of chanterelles"));
        assert_eq!(a, b);

        let mut c = visit(1, None);
        c.date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_ne!(a, c);

        let set: HashSet<Visit> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_forest_equality_uses_name() {
        assert_eq!(forest(1, "Sumava"), forest(2, "Sumava"));
        assert_ne!(forest(1, "Sumava"), forest(1, "Krkonose"));
    }

    #[test]
    fn test_mushroom_kind_parsing() {
        assert_eq!(
            "poisonous".parse::<MushroomKind>().unwrap(),
            MushroomKind::Poisonous
        );
        assert_eq!(MushroomKind::Edible.as_str(), "edible");
        assert!("tasty".parse::<MushroomKind>().is_err());
    }
}

//! Visit Service - the facade between visit handlers and the repositories
//!
//! Turns submitted [`VisitForm`]s into validated [`VisitInput`]s, resolving
//! the forest and mushroom references, and reports every problem through
//! [`FieldErrors`] so the form can be shown again with per-field flags.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DomainError, FieldErrors, HunterIdentity, Visit, VisitInput};
use crate::infrastructure::AppState;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CONFLICT_MESSAGE: &str = "This hunter already has a visit to this forest on this date";

/// Submitted visit form, exactly as the client sent it.
///
/// Kept as raw strings so a rejected submission can be echoed back unchanged.
/// `id` and `hunter` are accepted for symmetry with the edit view but never
/// trusted: the path id and the stored or session hunter always win.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisitForm {
    pub id: Option<String>,
    pub hunter: Option<String>,
    pub forest: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
    pub mushrooms: Vec<String>,
}

impl From<&Visit> for VisitForm {
    fn from(visit: &Visit) -> Self {
        Self {
            id: Some(visit.id.to_string()),
            hunter: Some(visit.hunter.id.to_string()),
            forest: Some(visit.forest.id.to_string()),
            date: Some(visit.date.format(DATE_FORMAT).to_string()),
            note: visit.note.clone(),
            mushrooms: visit.mushrooms.iter().map(|m| m.id.to_string()).collect(),
        }
    }
}

/// Error type for visit operations
#[derive(Debug)]
pub enum VisitError {
    /// One or more fields failed validation; nothing was written
    Invalid(FieldErrors),
    /// The (hunter, forest, date) triple is already taken
    Conflict(FieldErrors),
    NotFound,
    Domain(DomainError),
}

impl From<DomainError> for VisitError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => VisitError::NotFound,
            DomainError::Conflict(_) => {
                VisitError::Conflict(FieldErrors::single("date", CONFLICT_MESSAGE))
            }
            other => VisitError::Domain(other),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a submitted mushroom list, skipping blanks and collapsing duplicates.
///
/// Elements that are not decimal integers are reported on the `mushrooms`
/// field instead of being dropped.
pub fn parse_mushroom_ids(values: &[String], errors: &mut FieldErrors) -> Vec<i32> {
    let mut ids = Vec::new();

    for raw in values {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        match value.parse::<i32>() {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(_) => {
                tracing::debug!("Rejected mushroom reference '{}'", value);
                errors.add("mushrooms", format!("Invalid mushroom id: {}", value));
            }
        }
    }

    ids
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Validate a form for the given hunter, resolving every reference.
///
/// `existing_id` is the visit being edited, which may keep its own natural key.
async fn validate(
    state: &AppState,
    hunter_id: i32,
    form: &VisitForm,
    existing_id: Option<i32>,
) -> Result<VisitInput, VisitError> {
    let mut errors = FieldErrors::new();

    let forest_id = match non_blank(&form.forest) {
        None => {
            errors.add("forest", "Forest is required");
            None
        }
        Some(raw) => match raw.parse::<i32>() {
            Err(_) => {
                errors.add("forest", format!("Invalid forest id: {}", raw));
                None
            }
            Ok(id) => {
                if state.forest_repo.find_by_id(id).await?.is_none() {
                    errors.add("forest", format!("Unknown forest: {}", id));
                    None
                } else {
                    Some(id)
                }
            }
        },
    };

    let date = match non_blank(&form.date) {
        None => {
            errors.add("date", "Date is required");
            None
        }
        Some(raw) => {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                errors.add("date", format!("Invalid date: {} (expected YYYY-MM-DD)", raw));
            }
            parsed
        }
    };

    let mushroom_ids = parse_mushroom_ids(&form.mushrooms, &mut errors);
    for id in &mushroom_ids {
        if state.mushroom_repo.find_by_id(*id).await?.is_none() {
            errors.add("mushrooms", format!("Unknown mushroom: {}", id));
        }
    }

    let (Some(forest_id), Some(date)) = (forest_id, date) else {
        return Err(VisitError::Invalid(errors));
    };
    if !errors.is_empty() {
        return Err(VisitError::Invalid(errors));
    }

    if let Some(taken_by) = state
        .visit_repo
        .find_id_by_natural_key(hunter_id, forest_id, date)
        .await?
        && Some(taken_by) != existing_id
    {
        tracing::info!(
            "Visit conflict: hunter={} forest={} date={} already stored as {}",
            hunter_id,
            forest_id,
            date,
            taken_by
        );
        return Err(VisitError::Conflict(FieldErrors::single(
            "date",
            CONFLICT_MESSAGE,
        )));
    }

    Ok(VisitInput {
        hunter_id,
        forest_id,
        date,
        note: non_blank(&form.note).and(form.note.clone()),
        mushroom_ids,
    })
}

/// List all visits
pub async fn list_visits(state: &AppState) -> Result<Vec<Visit>, DomainError> {
    state.visit_repo.find_all().await
}

/// Get a single visit by ID
pub async fn find_visit(state: &AppState, id: i32) -> Result<Visit, VisitError> {
    state
        .visit_repo
        .find_by_id(id)
        .await?
        .ok_or(VisitError::NotFound)
}

/// Record a new visit for the given hunter
pub async fn create_visit(
    state: &AppState,
    hunter: &HunterIdentity,
    form: &VisitForm,
) -> Result<Visit, VisitError> {
    if state.hunter_repo.find_by_id(hunter.id).await?.is_none() {
        return Err(VisitError::Invalid(FieldErrors::single(
            "hunter",
            format!("Unknown hunter: {}", hunter.id),
        )));
    }

    let input = validate(state, hunter.id, form, None).await?;
    let visit = state.visit_repo.create(input).await?;

    tracing::info!(
        "Visit {} created: hunter={} forest={} date={}",
        visit.id,
        visit.hunter.nickname,
        visit.forest.name,
        visit.date
    );
    Ok(visit)
}

/// Update a stored visit from a submitted form.
///
/// The visit's own id and hunter are kept; `form.id` and `form.hunter` are
/// ignored.
pub async fn update_visit(
    state: &AppState,
    existing: &Visit,
    form: &VisitForm,
) -> Result<Visit, VisitError> {
    let id = existing.id;

    if form.id.as_deref().is_some_and(|body_id| body_id.trim() != id.to_string()) {
        tracing::warn!(
            "Visit update for {} carried a different id in the body ({:?}), ignoring it",
            id,
            form.id
        );
    }

    let input = validate(state, existing.hunter.id, form, Some(id)).await?;
    let visit = state.visit_repo.update(id, input).await?;

    tracing::info!("Visit {} updated", visit.id);
    Ok(visit)
}

/// Delete a visit by ID
pub async fn delete_visit(state: &AppState, id: i32) -> Result<(), VisitError> {
    state.visit_repo.delete(id).await?;
    tracing::info!("Visit {} deleted", id);
    Ok(())
}

//! Visit handlers: list, create, read, edit and delete
//!
//! Mutations answer with a `303 See Other` redirect and leave a one-time
//! message in the session for the page they redirect to.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::api::forms::{decode_visit_form, FormPairs};
use crate::api::view::{error_response, View};
use crate::domain::{DomainError, FieldErrors};
use crate::infrastructure::{AppState, Session};
use crate::services::catalog_service;
use crate::services::visit_service::{self, VisitError, VisitForm};

pub const VISITS_PATH: &str = "/visits";

pub fn read_path(id: i32) -> String {
    format!("{}/read/{}", VISITS_PATH, id)
}

fn unauthenticated() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "Authentication required")
}

fn domain_error(e: DomainError) -> Response {
    tracing::error!("Visit request failed: {}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn visit_not_found(id: i32) -> Response {
    tracing::debug!("Visit {} not found", id);
    error_response(StatusCode::NOT_FOUND, format!("Visit {} not found", id))
}

/// Map non-form outcomes of the facade to responses
fn visit_error(id: Option<i32>, e: VisitError) -> Response {
    match e {
        VisitError::NotFound => visit_not_found(id.unwrap_or_default()),
        VisitError::Domain(e) => domain_error(e),
        VisitError::Invalid(errors) | VisitError::Conflict(errors) => {
            // Only reachable if a caller skipped the form re-render
            tracing::error!("Unhandled visit validation errors: {:?}", errors);
            error_response(StatusCode::BAD_REQUEST, "Invalid visit")
        }
    }
}

/// The state of a create or edit form being rendered
struct FormPage<'a> {
    view: &'static str,
    attribute: &'static str,
    hunter_id: i32,
    form: &'a VisitForm,
    errors: Option<&'a FieldErrors>,
    status: StatusCode,
}

async fn render_form(state: &AppState, session: &Session, page: FormPage<'_>) -> Response {
    let catalogs = match catalog_service::load_catalogs(state).await {
        Ok(catalogs) => catalogs,
        Err(e) => return domain_error(e),
    };

    let mut view = View::new(page.view)
        .status(page.status)
        .with("hunter", page.hunter_id)
        .with(page.attribute, page.form)
        .with("mushrooms", &catalogs.mushrooms)
        .with("forests", &catalogs.forests)
        .with_alert(session);

    if let Some(errors) = page.errors {
        view = view.with_errors(errors);
    }

    view.into_response()
}

/// Status for a re-rendered form, or `None` when the error is not about the form
fn form_error_status(e: &VisitError) -> Option<(StatusCode, &FieldErrors)> {
    match e {
        VisitError::Invalid(errors) => Some((StatusCode::UNPROCESSABLE_ENTITY, errors)),
        VisitError::Conflict(errors) => Some((StatusCode::CONFLICT, errors)),
        _ => None,
    }
}

#[utoipa::path(
    get,
    path = "/visits",
    responses((status = 200, description = "View `visits/list` with all visits"))
)]
pub async fn list_visits(State(state): State<AppState>, session: Session) -> Response {
    tracing::debug!("[VISIT] List all");

    match visit_service::list_visits(&state).await {
        Ok(visits) => View::new("visits/list")
            .with("visits", visits)
            .with_alert(&session)
            .into_response(),
        Err(e) => domain_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/visits/create",
    responses(
        (status = 200, description = "View `visits/create` with an empty form and catalogs"),
        (status = 401, description = "No hunter is logged in")
    )
)]
pub async fn create_form(State(state): State<AppState>, session: Session) -> Response {
    let Some(hunter) = session.user().await else {
        return unauthenticated();
    };

    tracing::debug!("[VISIT] Register new Visit");

    render_form(
        &state,
        &session,
        FormPage {
            view: "visits/create",
            attribute: "registerVisit",
            hunter_id: hunter.id,
            form: &VisitForm::default(),
            errors: None,
            status: StatusCode::OK,
        },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/visits/create",
    responses(
        (status = 303, description = "Visit created, redirect to its detail page"),
        (status = 401, description = "No hunter is logged in"),
        (status = 409, description = "Form re-rendered: the hunter already visited this forest that day"),
        (status = 422, description = "Form re-rendered with per-field error flags")
    )
)]
pub async fn create_visit(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<FormPairs>,
) -> Response {
    let Some(hunter) = session.user().await else {
        return unauthenticated();
    };

    let form = decode_visit_form(pairs);

    match visit_service::create_visit(&state, &hunter, &form).await {
        Ok(visit) => {
            let target = read_path(visit.id);
            session
                .flash(&target, "Register of new visit was successful")
                .await;
            Redirect::to(&target).into_response()
        }
        Err(e) => match form_error_status(&e) {
            Some((status, errors)) => {
                tracing::debug!("Visit creation rejected: {} field error(s)", errors.len());
                render_form(
                    &state,
                    &session,
                    FormPage {
                        view: "visits/create",
                        attribute: "registerVisit",
                        hunter_id: hunter.id,
                        form: &form,
                        errors: Some(errors),
                        status,
                    },
                )
                .await
            }
            None => visit_error(None, e),
        },
    }
}

#[utoipa::path(
    get,
    path = "/visits/read/{id}",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "View `visits/read` with the visit"),
        (status = 404, description = "Visit not found")
    )
)]
pub async fn read_visit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    tracing::debug!("[VISIT] Read ({})", id);

    match visit_service::find_visit(&state, id).await {
        Ok(visit) => View::new("visits/read")
            .with("visit", visit)
            .with_alert(&session)
            .into_response(),
        Err(e) => visit_error(Some(id), e),
    }
}

#[utoipa::path(
    post,
    path = "/visits/delete/{id}",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 303, description = "Visit deleted, redirect to the list"),
        (status = 404, description = "Visit not found")
    )
)]
pub async fn delete_visit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    match visit_service::delete_visit(&state, id).await {
        Ok(()) => {
            tracing::debug!("delete visit({})", id);
            session.flash(VISITS_PATH, "Visit was deleted.").await;
            Redirect::to(VISITS_PATH).into_response()
        }
        Err(e) => visit_error(Some(id), e),
    }
}

#[utoipa::path(
    get,
    path = "/visits/edit/{id}",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "View `visits/edit` with the stored visit and catalogs"),
        (status = 401, description = "No hunter is logged in"),
        (status = 404, description = "Visit not found")
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    tracing::debug!("[VISIT] Edit {}", id);

    let Some(hunter) = session.user().await else {
        return unauthenticated();
    };

    let visit = match visit_service::find_visit(&state, id).await {
        Ok(visit) => visit,
        Err(e) => return visit_error(Some(id), e),
    };

    render_form(
        &state,
        &session,
        FormPage {
            view: "visits/edit",
            attribute: "visitEdit",
            hunter_id: hunter.id,
            form: &VisitForm::from(&visit),
            errors: None,
            status: StatusCode::OK,
        },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/visits/edit/{id}",
    params(("id" = i32, Path, description = "Visit id, overrides any id in the body")),
    responses(
        (status = 303, description = "Visit updated, redirect to its detail page"),
        (status = 401, description = "No hunter is logged in"),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "Form re-rendered: natural key already taken"),
        (status = 422, description = "Form re-rendered with per-field error flags")
    )
)]
pub async fn update_visit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(pairs): Form<FormPairs>,
) -> Response {
    if session.user().await.is_none() {
        return unauthenticated();
    }

    let mut form = decode_visit_form(pairs);

    tracing::debug!("Visit - update {}", id);

    let existing = match visit_service::find_visit(&state, id).await {
        Ok(visit) => visit,
        Err(e) => return visit_error(Some(id), e),
    };

    match visit_service::update_visit(&state, &existing, &form).await {
        Ok(visit) => {
            let target = read_path(visit.id);
            session.flash(&target, "Visit was updated").await;
            Redirect::to(&target).into_response()
        }
        Err(e) => match form_error_status(&e) {
            Some((status, errors)) => {
                tracing::debug!("Visit - has errors: {} field error(s)", errors.len());
                form.id = Some(id.to_string());
                render_form(
                    &state,
                    &session,
                    FormPage {
                        view: "visits/edit",
                        attribute: "visitEdit",
                        hunter_id: existing.hunter.id,
                        form: &form,
                        errors: Some(errors),
                        status,
                    },
                )
                .await
            }
            None => visit_error(Some(id), e),
        },
    }
}

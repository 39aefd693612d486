// HTTP handlers for contact form endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{Action, CurrentUser, Resource};
use crate::contacts::models::{Contact, ContactQuery, CreateContact, UpdateContactStatus};
use crate::error::ApiError;
use crate::query::{PageParams, QueryValidator};
use crate::validation::validate_contact_status;
use crate::AppState;

/// Handler for POST /api/contacts
/// Public; accepts a contact form submission
pub async fn create_contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateContact>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    payload.validate()?;

    let contact = state.contacts.create(&payload).await?;
    tracing::info!("New contact submission {} from {}", contact.id, contact.email);

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Handler for GET /api/contacts
/// Requires CONTACT READ permission; `?status=` narrows the triage list
pub async fn list_contacts_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    user.require(Resource::Contact, Action::Read)?;

    let status = match query.status {
        Some(raw) => {
            let normalized = raw.to_lowercase();
            validate_contact_status(&normalized)
                .map_err(|_| ApiError::BadQuery(format!("unknown contact status '{raw}'")))?;
            Some(normalized)
        }
        None => None,
    };
    let (page, limit) = QueryValidator::validate_pagination(&PageParams {
        page: query.page,
        limit: query.limit,
    })?;

    let contacts = state.contacts.list(status.as_deref(), page, limit).await?;
    Ok(Json(contacts))
}

/// Handler for GET /api/contacts/:id
/// Requires CONTACT READ permission
pub async fn get_contact_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, ApiError> {
    user.require(Resource::Contact, Action::Read)?;

    let contact = state
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Contact".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(contact))
}

/// Handler for PUT /api/contacts/:id/status
/// Requires CONTACT UPDATE permission
pub async fn update_contact_status_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactStatus>,
) -> Result<Json<Contact>, ApiError> {
    user.require(Resource::Contact, Action::Update)?;
    payload.validate()?;

    let contact = state.contacts.update_status(id, &payload.status).await?;
    Ok(Json(contact))
}

/// Handler for DELETE /api/contacts/:id
/// Requires CONTACT DELETE permission
pub async fn delete_contact_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    user.require(Resource::Contact, Action::Delete)?;

    state.contacts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

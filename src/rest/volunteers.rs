use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::extract::{AppJson, AppPath};
use super::{AppState, ErrorBody};
use crate::error::Error;
use crate::models::{NewVolunteer, Volunteer, VolunteerUpdate};

#[derive(Serialize, ToSchema)]
pub struct VolunteerEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub volunteer: Volunteer,
}

#[derive(Serialize, ToSchema)]
pub struct VolunteerList {
    pub success: bool,
    pub volunteers: Vec<Volunteer>,
}

#[utoipa::path(
    get,
    path = "/api/volunteers",
    tag = "volunteers",
    responses((status = 200, description = "All volunteers", body = VolunteerList))
)]
pub async fn list_volunteers(State(state): State<Arc<AppState>>) -> Result<Json<VolunteerList>, Error> {
    let volunteers = state.storage.list_volunteers()?;
    Ok(Json(VolunteerList {
        success: true,
        volunteers,
    }))
}

#[utoipa::path(
    post,
    path = "/api/volunteers/register",
    tag = "volunteers",
    request_body = NewVolunteer,
    responses(
        (status = 200, description = "Volunteer registered as active", body = VolunteerEnvelope),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn register_volunteer(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewVolunteer>,
) -> Result<Json<VolunteerEnvelope>, Error> {
    let volunteer = state.storage.register_volunteer(new)?;
    Ok(Json(VolunteerEnvelope {
        success: true,
        message: Some("Volunteer registered successfully".to_string()),
        volunteer,
    }))
}

#[utoipa::path(
    get,
    path = "/api/volunteers/{volunteer_id}",
    tag = "volunteers",
    params(("volunteer_id" = u64, Path, description = "Volunteer id")),
    responses(
        (status = 200, description = "The volunteer", body = VolunteerEnvelope),
        (status = 404, description = "Unknown volunteer", body = ErrorBody)
    )
)]
pub async fn get_volunteer(
    State(state): State<Arc<AppState>>,
    AppPath(volunteer_id): AppPath<u64>,
) -> Result<Json<VolunteerEnvelope>, Error> {
    let volunteer = state.storage.get_volunteer(volunteer_id)?;
    Ok(Json(VolunteerEnvelope {
        success: true,
        message: None,
        volunteer,
    }))
}

#[utoipa::path(
    get,
    path = "/api/volunteers/location/{state}/{district}",
    tag = "volunteers",
    params(
        ("state" = String, Path, description = "State name"),
        ("district" = String, Path, description = "District name")
    ),
    responses((status = 200, description = "Volunteers in that district", body = VolunteerList))
)]
pub async fn volunteers_by_location(
    State(state): State<Arc<AppState>>,
    AppPath((region, district)): AppPath<(String, String)>,
) -> Result<Json<VolunteerList>, Error> {
    let volunteers = state.storage.volunteers_by_location(&region, &district)?;
    Ok(Json(VolunteerList {
        success: true,
        volunteers,
    }))
}

#[utoipa::path(
    put,
    path = "/api/volunteers/{volunteer_id}",
    tag = "volunteers",
    params(("volunteer_id" = u64, Path, description = "Volunteer id")),
    request_body = VolunteerUpdate,
    responses(
        (status = 200, description = "Volunteer updated", body = VolunteerEnvelope),
        (status = 404, description = "Unknown volunteer", body = ErrorBody)
    )
)]
pub async fn update_volunteer(
    State(state): State<Arc<AppState>>,
    AppPath(volunteer_id): AppPath<u64>,
    AppJson(patch): AppJson<VolunteerUpdate>,
) -> Result<Json<VolunteerEnvelope>, Error> {
    let volunteer = state.storage.update_volunteer(volunteer_id, patch)?;
    Ok(Json(VolunteerEnvelope {
        success: true,
        message: Some("Volunteer updated successfully".to_string()),
        volunteer,
    }))
}

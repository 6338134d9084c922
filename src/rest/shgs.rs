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
use crate::models::{NewShg, Shg, ShgUpdate};

#[derive(Serialize, ToSchema)]
pub struct ShgEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub shg: Shg,
}

#[derive(Serialize, ToSchema)]
pub struct ShgList {
    pub success: bool,
    pub shgs: Vec<Shg>,
}

fn list(shgs: Vec<Shg>) -> Json<ShgList> {
    Json(ShgList { success: true, shgs })
}

#[utoipa::path(
    get,
    path = "/api/shgs",
    tag = "shgs",
    responses((status = 200, description = "All SHGs", body = ShgList))
)]
pub async fn list_shgs(State(state): State<Arc<AppState>>) -> Result<Json<ShgList>, Error> {
    Ok(list(state.storage.list_shgs()?))
}

#[utoipa::path(
    post,
    path = "/api/shgs",
    tag = "shgs",
    request_body = NewShg,
    responses(
        (status = 200, description = "SHG created with zeroed counters", body = ShgEnvelope),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Code already taken", body = ErrorBody)
    )
)]
pub async fn create_shg(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewShg>,
) -> Result<Json<ShgEnvelope>, Error> {
    let shg = state.storage.create_shg(new)?;
    Ok(Json(ShgEnvelope {
        success: true,
        message: Some("SHG created successfully".to_string()),
        shg,
    }))
}

#[utoipa::path(
    get,
    path = "/api/shgs/{shg_code}",
    tag = "shgs",
    params(("shg_code" = String, Path, description = "SHG code, e.g. SHG-MP-001")),
    responses(
        (status = 200, description = "The SHG", body = ShgEnvelope),
        (status = 404, description = "Unknown code", body = ErrorBody)
    )
)]
pub async fn get_shg(
    State(state): State<Arc<AppState>>,
    AppPath(shg_code): AppPath<String>,
) -> Result<Json<ShgEnvelope>, Error> {
    let shg = state.storage.get_shg(&shg_code)?;
    Ok(Json(ShgEnvelope {
        success: true,
        message: None,
        shg,
    }))
}

#[utoipa::path(
    get,
    path = "/api/shgs/location/{state}/{district}",
    tag = "shgs",
    params(
        ("state" = String, Path, description = "State name"),
        ("district" = String, Path, description = "District name")
    ),
    responses((status = 200, description = "SHGs in that district", body = ShgList))
)]
pub async fn shgs_by_location(
    State(state): State<Arc<AppState>>,
    AppPath((region, district)): AppPath<(String, String)>,
) -> Result<Json<ShgList>, Error> {
    Ok(list(state.storage.shgs_by_location(&region, &district)?))
}

#[utoipa::path(
    get,
    path = "/api/shgs/by-state/{state}",
    tag = "shgs",
    params(("state" = String, Path, description = "State name")),
    responses((status = 200, description = "SHGs in that state", body = ShgList))
)]
pub async fn shgs_by_state(
    State(state): State<Arc<AppState>>,
    AppPath(region): AppPath<String>,
) -> Result<Json<ShgList>, Error> {
    Ok(list(state.storage.shgs_by_state(&region)?))
}

#[utoipa::path(
    put,
    path = "/api/shgs/{shg_code}",
    tag = "shgs",
    params(("shg_code" = String, Path, description = "SHG code")),
    request_body = ShgUpdate,
    responses(
        (status = 200, description = "SHG updated; absent fields keep their values", body = ShgEnvelope),
        (status = 404, description = "Unknown code", body = ErrorBody)
    )
)]
pub async fn update_shg(
    State(state): State<Arc<AppState>>,
    AppPath(shg_code): AppPath<String>,
    AppJson(patch): AppJson<ShgUpdate>,
) -> Result<Json<ShgEnvelope>, Error> {
    let shg = state.storage.update_shg(&shg_code, patch)?;
    Ok(Json(ShgEnvelope {
        success: true,
        message: Some("SHG updated successfully".to_string()),
        shg,
    }))
}

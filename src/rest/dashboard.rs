//! Read-only aggregate views; each request recomputes from the documents.

use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};

use super::extract::AppPath;
use super::{AppState, ErrorBody};
use crate::dashboard::{AdminDashboard, MemberDashboard, NationalOverview, ShgDashboard, VolunteerDashboard};
use crate::error::Error;

#[utoipa::path(
    get,
    path = "/api/dashboard/national-overview",
    tag = "dashboard",
    responses((status = 200, description = "Country-wide totals, top states and recent activity", body = NationalOverview))
)]
pub async fn national_overview(State(state): State<Arc<AppState>>) -> Result<Json<NationalOverview>, Error> {
    Ok(Json(state.storage.national_overview()?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/shg/{shg_code}",
    tag = "dashboard",
    params(("shg_code" = String, Path, description = "SHG code")),
    responses(
        (status = 200, description = "One SHG with its loans", body = ShgDashboard),
        (status = 404, description = "Unknown SHG", body = ErrorBody)
    )
)]
pub async fn shg_dashboard(
    State(state): State<Arc<AppState>>,
    AppPath(shg_code): AppPath<String>,
) -> Result<Json<ShgDashboard>, Error> {
    Ok(Json(state.storage.shg_dashboard(&shg_code)?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    tag = "dashboard",
    responses((status = 200, description = "Pending requests and every SHG", body = AdminDashboard))
)]
pub async fn admin_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<AdminDashboard>, Error> {
    Ok(Json(state.storage.admin_dashboard()?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/volunteer/{volunteer_id}",
    tag = "dashboard",
    params(("volunteer_id" = u64, Path, description = "Volunteer id")),
    responses(
        (status = 200, description = "Volunteer stats and SHGs in the same district", body = VolunteerDashboard),
        (status = 404, description = "Unknown volunteer", body = ErrorBody)
    )
)]
pub async fn volunteer_dashboard(
    State(state): State<Arc<AppState>>,
    AppPath(volunteer_id): AppPath<u64>,
) -> Result<Json<VolunteerDashboard>, Error> {
    Ok(Json(state.storage.volunteer_dashboard(volunteer_id)?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/member/{shg_code}/{member_name}",
    tag = "dashboard",
    params(
        ("shg_code" = String, Path, description = "SHG code"),
        ("member_name" = String, Path, description = "Exact member name")
    ),
    responses(
        (status = 200, description = "A member's loans and share of savings", body = MemberDashboard),
        (status = 404, description = "Unknown SHG", body = ErrorBody)
    )
)]
pub async fn member_dashboard(
    State(state): State<Arc<AppState>>,
    AppPath((shg_code, member_name)): AppPath<(String, String)>,
) -> Result<Json<MemberDashboard>, Error> {
    Ok(Json(state.storage.member_dashboard(&shg_code, &member_name)?))
}

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::extract::{AppJson, AppPath};
use super::{AppState, ErrorBody};
use crate::error::Error;
use crate::models::{LoginRequest, NewUser, UserProfile, UserUpdate};

#[derive(Serialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

#[derive(Serialize, ToSchema)]
pub struct UserList {
    pub success: bool,
    pub users: Vec<UserProfile>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleFilter {
    /// Only users with this role (`member`, `admin`, `volunteer`)
    pub role: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserEnvelope),
        (status = 401, description = "Unknown email or wrong user type", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<UserEnvelope>, Error> {
    let user = crate::auth::login(&state.storage, &request)?;
    Ok(Json(UserEnvelope {
        success: true,
        message: "Login successful".to_string(),
        user,
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = NewUser,
    responses(
        (status = 200, description = "User registered", body = UserEnvelope),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewUser>,
) -> Result<Json<UserEnvelope>, Error> {
    let user = state.storage.register_user(new)?;
    Ok(Json(UserEnvelope {
        success: true,
        message: "User registered successfully".to_string(),
        user: user.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "auth",
    params(RoleFilter),
    responses((status = 200, description = "Registered users", body = UserList))
)]
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RoleFilter>,
) -> Result<Json<UserList>, Error> {
    let users = state.storage.list_users(filter.role.as_deref())?;
    Ok(Json(UserList {
        success: true,
        users: users.into_iter().map(UserProfile::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile/{user_id}",
    tag = "auth",
    params(("user_id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<u64>,
) -> Result<Json<UserProfile>, Error> {
    Ok(Json(state.storage.get_user(user_id)?.into()))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile/{user_id}",
    tag = "auth",
    params(("user_id" = u64, Path, description = "User id")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Profile updated", body = UserEnvelope),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<u64>,
    AppJson(patch): AppJson<UserUpdate>,
) -> Result<Json<UserEnvelope>, Error> {
    let user = state.storage.update_user(user_id, patch)?;
    Ok(Json(UserEnvelope {
        success: true,
        message: "Profile updated successfully".to_string(),
        user: user.into(),
    }))
}

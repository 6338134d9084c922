//! REST API layer for the SHG platform using Axum
//!
//! Maps HTTP verbs/paths under `/api` onto the collection operations and the
//! dashboard views. Errors become `{ "success": false, "detail": ... }`
//! bodies; storage failures are logged in full and reported generically.

mod auth;
mod chat;
mod dashboard;
mod docs;
mod extract;
mod loans;
mod shgs;
mod volunteers;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::chat::{ChatBackend, ChatError};
use crate::error::Error;
use crate::storage::Storage;

pub use docs::ApiDoc;

/// Shared app state for REST handlers (Arc-wrapped for concurrency)
pub struct AppState {
    storage: Storage,
    chat: Arc<dyn ChatBackend>,
}

/// Error body returned for every failed request.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::AlreadyExists { .. } => StatusCode::CONFLICT,
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
            Error::Io { .. } | Error::Corrupt { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Chat(ChatError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Chat(ChatError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Chat(ChatError::Request(_) | ChatError::EmptyReply) => StatusCode::BAD_GATEWAY,
        };

        let detail = if self.is_storage_failure() {
            error!(error = %self, "storage failure");
            "internal storage error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { success: false, detail })).into_response()
    }
}

/// Create Axum router with every `/api` endpoint
pub fn create_router(storage: Storage, chat: Arc<dyn ChatBackend>) -> Router {
    let state = Arc::new(AppState { storage, chat });

    let api = Router::new()
        .route("/health", get(health_handler))
        // auth
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/users", get(auth::list_users_handler))
        .route(
            "/auth/profile/:user_id",
            get(auth::get_profile_handler).put(auth::update_profile_handler),
        )
        // loans
        .route("/loans", get(loans::list_loans).post(loans::submit_loan))
        .route("/loans/status/:status", get(loans::loans_by_status))
        .route("/loans/shg/:shg_code", get(loans::loans_by_shg))
        .route("/loans/:loan_id", get(loans::get_loan).put(loans::update_loan))
        .route("/loans/:loan_id/approve", put(loans::approve_loan))
        .route("/loans/:loan_id/reject", put(loans::reject_loan))
        // shgs
        .route("/shgs", get(shgs::list_shgs).post(shgs::create_shg))
        .route("/shgs/location/:state/:district", get(shgs::shgs_by_location))
        .route("/shgs/by-state/:state", get(shgs::shgs_by_state))
        .route("/shgs/:shg_code", get(shgs::get_shg).put(shgs::update_shg))
        // volunteers
        .route("/volunteers", get(volunteers::list_volunteers))
        .route("/volunteers/register", post(volunteers::register_volunteer))
        .route(
            "/volunteers/location/:state/:district",
            get(volunteers::volunteers_by_location),
        )
        .route(
            "/volunteers/:volunteer_id",
            get(volunteers::get_volunteer).put(volunteers::update_volunteer),
        )
        // dashboards
        .route("/dashboard/national-overview", get(dashboard::national_overview))
        .route("/dashboard/shg/:shg_code", get(dashboard::shg_dashboard))
        .route("/dashboard/admin", get(dashboard::admin_dashboard))
        .route("/dashboard/volunteer/:volunteer_id", get(dashboard::volunteer_dashboard))
        .route(
            "/dashboard/member/:shg_code/:member_name",
            get(dashboard::member_dashboard),
        )
        // chat helper
        .route("/gemini/chat", post(chat::chat_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/api-docs/openapi.json", get(docs::openapi_handler))
        .nest("/api", api)
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

/// Allow any origin; answers preflight requests directly.
async fn cors_middleware(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type, authorization"),
    );
    response
}

#[derive(Serialize, ToSchema)]
pub struct Banner {
    pub message: String,
    pub version: String,
    pub docs: String,
}

async fn root_handler() -> Json<Banner> {
    Json(Banner {
        message: "SHG Digital Platform Backend API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/api-docs/openapi.json".to_string(),
    })
}

#[derive(Serialize, ToSchema)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses((status = 200, description = "Server is up", body = Health))
)]
pub async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "Server is running".to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
    })
}

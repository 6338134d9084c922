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
use crate::models::{Loan, LoanApproval, LoanStatus, LoanUpdate, NewLoan};

#[derive(Serialize, ToSchema)]
pub struct LoanEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub loan: Loan,
}

impl LoanEnvelope {
    fn found(loan: Loan) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            loan,
        })
    }

    fn done(message: &str, loan: Loan) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            loan,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoanList {
    pub success: bool,
    pub loans: Vec<Loan>,
}

fn list(loans: Vec<Loan>) -> Json<LoanList> {
    Json(LoanList { success: true, loans })
}

#[utoipa::path(
    get,
    path = "/api/loans",
    tag = "loans",
    responses((status = 200, description = "All loans", body = LoanList))
)]
pub async fn list_loans(State(state): State<Arc<AppState>>) -> Result<Json<LoanList>, Error> {
    Ok(list(state.storage.list_loans()?))
}

#[utoipa::path(
    post,
    path = "/api/loans",
    tag = "loans",
    request_body = NewLoan,
    responses(
        (status = 200, description = "Loan request submitted as pending", body = LoanEnvelope),
        (status = 400, description = "Missing field or non-positive amount", body = ErrorBody)
    )
)]
pub async fn submit_loan(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewLoan>,
) -> Result<Json<LoanEnvelope>, Error> {
    let loan = state.storage.submit_loan(new)?;
    Ok(LoanEnvelope::done("Loan request submitted successfully", loan))
}

#[utoipa::path(
    get,
    path = "/api/loans/{loan_id}",
    tag = "loans",
    params(("loan_id" = u64, Path, description = "Loan id")),
    responses(
        (status = 200, description = "The loan", body = LoanEnvelope),
        (status = 404, description = "Unknown loan", body = ErrorBody)
    )
)]
pub async fn get_loan(
    State(state): State<Arc<AppState>>,
    AppPath(loan_id): AppPath<u64>,
) -> Result<Json<LoanEnvelope>, Error> {
    Ok(LoanEnvelope::found(state.storage.get_loan(loan_id)?))
}

#[utoipa::path(
    get,
    path = "/api/loans/status/{status}",
    tag = "loans",
    params(("status" = LoanStatus, Path, description = "pending, approved or rejected")),
    responses(
        (status = 200, description = "Loans in that status", body = LoanList),
        (status = 400, description = "Unknown status", body = ErrorBody)
    )
)]
pub async fn loans_by_status(
    State(state): State<Arc<AppState>>,
    AppPath(status): AppPath<String>,
) -> Result<Json<LoanList>, Error> {
    let status: LoanStatus = status.parse()?;
    Ok(list(state.storage.loans_by_status(status)?))
}

#[utoipa::path(
    get,
    path = "/api/loans/shg/{shg_code}",
    tag = "loans",
    params(("shg_code" = String, Path, description = "SHG code")),
    responses((status = 200, description = "Loans of one SHG", body = LoanList))
)]
pub async fn loans_by_shg(
    State(state): State<Arc<AppState>>,
    AppPath(shg_code): AppPath<String>,
) -> Result<Json<LoanList>, Error> {
    Ok(list(state.storage.loans_by_shg(&shg_code)?))
}

#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}",
    tag = "loans",
    params(("loan_id" = u64, Path, description = "Loan id")),
    request_body = LoanUpdate,
    responses(
        (status = 200, description = "Loan updated", body = LoanEnvelope),
        (status = 404, description = "Unknown loan", body = ErrorBody)
    )
)]
pub async fn update_loan(
    State(state): State<Arc<AppState>>,
    AppPath(loan_id): AppPath<u64>,
    AppJson(patch): AppJson<LoanUpdate>,
) -> Result<Json<LoanEnvelope>, Error> {
    let loan = state.storage.update_loan(loan_id, patch)?;
    Ok(LoanEnvelope::done("Loan updated successfully", loan))
}

#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}/approve",
    tag = "loans",
    params(("loan_id" = u64, Path, description = "Loan id")),
    request_body = LoanApproval,
    responses(
        (status = 200, description = "Loan approved", body = LoanEnvelope),
        (status = 400, description = "Missing approver", body = ErrorBody),
        (status = 404, description = "Unknown loan", body = ErrorBody)
    )
)]
pub async fn approve_loan(
    State(state): State<Arc<AppState>>,
    AppPath(loan_id): AppPath<u64>,
    AppJson(approval): AppJson<LoanApproval>,
) -> Result<Json<LoanEnvelope>, Error> {
    let loan = state.storage.approve_loan(loan_id, approval)?;
    Ok(LoanEnvelope::done("Loan approved successfully", loan))
}

#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}/reject",
    tag = "loans",
    params(("loan_id" = u64, Path, description = "Loan id")),
    responses(
        (status = 200, description = "Loan rejected", body = LoanEnvelope),
        (status = 404, description = "Unknown loan", body = ErrorBody)
    )
)]
pub async fn reject_loan(
    State(state): State<Arc<AppState>>,
    AppPath(loan_id): AppPath<u64>,
) -> Result<Json<LoanEnvelope>, Error> {
    let loan = state.storage.reject_loan(loan_id)?;
    Ok(LoanEnvelope::done("Loan rejected successfully", loan))
}

use axum::Json;
use utoipa::OpenApi;

use super::{auth, chat, dashboard, loans, shgs, volunteers, Banner, ErrorBody, Health};
use crate::dashboard::{
    AdminDashboard, AdminStats, MemberDashboard, MemberStats, NationalActivity, NationalOverview, NationalStats,
    ShgActivity, ShgDashboard, ShgStats, StateSummary, VolunteerDashboard, VolunteerStats,
};
use crate::models::{
    Loan, LoanApproval, LoanStatus, LoanUpdate, LoginRequest, NewLoan, NewShg, NewUser, NewVolunteer, Shg,
    ShgUpdate, UserProfile, UserUpdate, Volunteer, VolunteerUpdate,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "SHG Digital Platform API", description = "Records and dashboards for Self Help Groups"),
    paths(
        super::health_handler,
        auth::login_handler,
        auth::register_handler,
        auth::list_users_handler,
        auth::get_profile_handler,
        auth::update_profile_handler,
        loans::list_loans,
        loans::submit_loan,
        loans::get_loan,
        loans::loans_by_status,
        loans::loans_by_shg,
        loans::update_loan,
        loans::approve_loan,
        loans::reject_loan,
        shgs::list_shgs,
        shgs::create_shg,
        shgs::get_shg,
        shgs::shgs_by_location,
        shgs::shgs_by_state,
        shgs::update_shg,
        volunteers::list_volunteers,
        volunteers::register_volunteer,
        volunteers::get_volunteer,
        volunteers::volunteers_by_location,
        volunteers::update_volunteer,
        dashboard::national_overview,
        dashboard::shg_dashboard,
        dashboard::admin_dashboard,
        dashboard::volunteer_dashboard,
        dashboard::member_dashboard,
        chat::chat_handler,
    ),
    components(schemas(
        Banner,
        ErrorBody,
        Health,
        UserProfile,
        NewUser,
        LoginRequest,
        UserUpdate,
        auth::UserEnvelope,
        auth::UserList,
        Loan,
        LoanStatus,
        NewLoan,
        LoanUpdate,
        LoanApproval,
        loans::LoanEnvelope,
        loans::LoanList,
        Shg,
        NewShg,
        ShgUpdate,
        shgs::ShgEnvelope,
        shgs::ShgList,
        Volunteer,
        NewVolunteer,
        VolunteerUpdate,
        volunteers::VolunteerEnvelope,
        volunteers::VolunteerList,
        NationalOverview,
        NationalStats,
        StateSummary,
        NationalActivity,
        ShgDashboard,
        ShgStats,
        ShgActivity,
        AdminDashboard,
        AdminStats,
        VolunteerDashboard,
        VolunteerStats,
        MemberDashboard,
        MemberStats,
        chat::ChatRequest,
        chat::ChatReply,
    )),
    tags(
        (name = "system", description = "Liveness"),
        (name = "auth", description = "Accounts and role login"),
        (name = "loans", description = "Loan requests and their approval"),
        (name = "shgs", description = "Self Help Group records"),
        (name = "volunteers", description = "Volunteer registry"),
        (name = "dashboard", description = "Aggregated views"),
        (name = "chat", description = "Platform guide assistant")
    )
)]
pub struct ApiDoc;

pub(super) async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

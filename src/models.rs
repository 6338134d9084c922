//! Persisted entities and the inputs used to create or patch them.
//!
//! Field names follow the camelCase layout of the JSON documents on disk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Error;
use crate::storage::Record;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    /// Placeholder only; never verified.
    #[serde(default)]
    pub password: String,
    pub role: String,
    pub name: String,
    pub shg_code: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub created_at: Option<String>,
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> u64 {
        self.id
    }
}

/// A user as shown to clients (no password field).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub shg_code: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub created_at: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            shg_code: user.shg_code,
            state: user.state,
            district: user.district,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shg {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub state: String,
    pub district: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub members: u64,
    #[serde(default)]
    pub savings: u64,
    /// Denormalized loan counter, maintained by hand through updates.
    #[serde(default)]
    pub loans: u64,
    #[serde(default)]
    pub founded_year: i32,
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
}

impl Record for Shg {
    const COLLECTION: &'static str = "shgs";

    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

impl LoanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::validation(
                "status",
                format!("`{other}` is not one of pending, approved, rejected"),
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: u64,
    pub shg_code: String,
    pub member_name: String,
    pub amount: f64,
    pub purpose: String,
    pub status: LoanStatus,
    pub date: String,
    pub interest_rate: String,
    pub approval_date: Option<String>,
    pub approved_by: Option<String>,
}

impl Record for Loan {
    const COLLECTION: &'static str = "loans";

    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub state: String,
    pub district: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub hours_volunteered: u64,
    #[serde(default)]
    pub activities_joined: u64,
    #[serde(default)]
    pub shgs_supported: u64,
    pub status: String,
    pub registration_date: String,
}

impl Record for Volunteer {
    const COLLECTION: &'static str = "volunteers";

    fn id(&self) -> u64 {
        self.id
    }
}

// --- Inputs ---
//
// Required text fields default to empty so a missing field surfaces as a
// validation error naming it, rather than a body rejection.

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub user_type: String,
    pub shg_code: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub shg_code: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewShg {
    pub code: String,
    pub name: String,
    pub state: String,
    pub district: String,
    pub block: Option<String>,
    pub head: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShgUpdate {
    pub members: Option<u64>,
    pub savings: Option<u64>,
    pub loans: Option<u64>,
    pub founded_year: Option<i32>,
    pub head: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLoan {
    pub shg_code: String,
    pub member_name: String,
    pub amount: f64,
    pub purpose: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanUpdate {
    pub member_name: Option<String>,
    pub amount: Option<f64>,
    pub purpose: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanApproval {
    pub approved_by: String,
    pub interest_rate: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub state: String,
    pub district: String,
    pub skills: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerUpdate {
    pub hours_volunteered: Option<u64>,
    pub activities_joined: Option<u64>,
    pub shgs_supported: Option<u64>,
    pub skills: Option<Vec<String>>,
}

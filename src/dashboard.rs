//! Read-only views joining SHGs, loans and volunteers.
//!
//! The free functions are pure over record slices; the `Storage` methods at
//! the bottom load the snapshots they need and delegate.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::models::{Loan, LoanStatus, Shg, Volunteer};
use crate::storage::Storage;

const TOP_STATES: usize = 5;
const RECENT_NATIONAL: usize = 10;
const RECENT_PER_SHG: usize = 5;
const RECENT_ADMIN: usize = 10;
/// Flat share of approved borrowing reported as still owed.
const OUTSTANDING_SHARE: f64 = 0.6;

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NationalOverview {
    pub stats: NationalStats,
    #[serde(rename = "topStates")]
    pub top_states: Vec<StateSummary>,
    #[serde(rename = "recentActivities")]
    pub recent_activities: Vec<NationalActivity>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NationalStats {
    pub total_funds_managed: u64,
    #[serde(rename = "activeSHGs")]
    pub active_shgs: usize,
    pub active_volunteers: usize,
    pub pending_loans: usize,
    pub approved_loans: usize,
    pub total_members: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StateSummary {
    pub name: String,
    pub shgs: usize,
    pub funds: u64,
    pub volunteers: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NationalActivity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub status: LoanStatus,
    pub date: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShgDashboard {
    pub shg_info: Shg,
    pub stats: ShgStats,
    pub recent_activities: Vec<ShgActivity>,
    pub loans: Vec<Loan>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShgStats {
    pub total_members: u64,
    pub total_savings: u64,
    pub loans_disbursed: f64,
    pub active_loan_accounts: u64,
    pub pending_loans: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ShgActivity {
    pub id: u64,
    pub activity: String,
    pub date: String,
    pub amount: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub pending_loan_requests: Vec<Loan>,
    pub shgs: Vec<Shg>,
    pub recent_loans: Vec<Loan>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(rename = "totalSHGs")]
    pub total_shgs: usize,
    pub total_members: u64,
    pub total_savings: u64,
    pub pending_loans: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct VolunteerDashboard {
    #[serde(rename = "volunteerInfo")]
    pub volunteer_info: Volunteer,
    pub stats: VolunteerStats,
    #[serde(rename = "nearbySHGs")]
    pub nearby_shgs: Vec<Shg>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStats {
    pub shgs_in_region: usize,
    pub hours_volunteered: u64,
    pub activities_joined: u64,
    pub shgs_supported: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDashboard {
    pub shg_info: Shg,
    pub member_loans: Vec<Loan>,
    pub stats: MemberStats,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub group_savings: u64,
    pub your_contribution: u64,
    pub total_loans_taken: f64,
    pub outstanding_dues: u64,
}

pub fn national_overview(shgs: &[Shg], loans: &[Loan], volunteers: &[Volunteer]) -> NationalOverview {
    let stats = NationalStats {
        total_funds_managed: saturating_total(shgs.iter().map(|s| s.savings)),
        active_shgs: shgs.len(),
        active_volunteers: volunteers.len(),
        pending_loans: count_status(loans, LoanStatus::Pending),
        approved_loans: count_status(loans, LoanStatus::Approved),
        total_members: saturating_total(shgs.iter().map(|s| s.members)),
    };

    // States in first-seen order; volunteers only count toward states with an SHG.
    let mut states: Vec<StateSummary> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for shg in shgs {
        let index = *slot.entry(shg.state.as_str()).or_insert_with(|| {
            states.push(StateSummary {
                name: shg.state.clone(),
                shgs: 0,
                funds: 0,
                volunteers: 0,
            });
            states.len() - 1
        });
        states[index].shgs += 1;
        states[index].funds = states[index].funds.saturating_add(shg.savings);
    }
    for volunteer in volunteers {
        if let Some(&index) = slot.get(volunteer.state.as_str()) {
            states[index].volunteers += 1;
        }
    }
    states.sort_by(|a, b| b.shgs.cmp(&a.shgs));
    states.truncate(TOP_STATES);

    let recent_activities = most_recent(loans.iter(), RECENT_NATIONAL)
        .into_iter()
        .map(|loan| national_activity(&loan, shgs))
        .collect();

    NationalOverview {
        stats,
        top_states: states,
        recent_activities,
    }
}

pub fn shg_dashboard(shgs: &[Shg], loans: &[Loan], code: &str) -> Result<ShgDashboard> {
    let shg = find_shg(shgs, code)?;
    let shg_loans: Vec<Loan> = loans.iter().filter(|l| l.shg_code == code).cloned().collect();

    let stats = ShgStats {
        total_members: shg.members,
        total_savings: shg.savings,
        loans_disbursed: approved_total(&shg_loans),
        active_loan_accounts: shg.loans,
        pending_loans: count_status(&shg_loans, LoanStatus::Pending),
    };
    let recent_activities = most_recent(shg_loans.iter(), RECENT_PER_SHG)
        .into_iter()
        .map(|loan| ShgActivity {
            id: loan.id,
            activity: format!("Loan {} - {}", status_verb(loan.status), loan.purpose),
            amount: format_rupees(loan.amount),
            date: loan.date,
        })
        .collect();

    Ok(ShgDashboard {
        shg_info: shg.clone(),
        stats,
        recent_activities,
        loans: shg_loans,
    })
}

pub fn admin_dashboard(shgs: &[Shg], loans: &[Loan]) -> AdminDashboard {
    let pending: Vec<Loan> = loans
        .iter()
        .filter(|l| l.status == LoanStatus::Pending)
        .cloned()
        .collect();

    AdminDashboard {
        stats: AdminStats {
            total_shgs: shgs.len(),
            total_members: saturating_total(shgs.iter().map(|s| s.members)),
            total_savings: saturating_total(shgs.iter().map(|s| s.savings)),
            pending_loans: pending.len(),
        },
        pending_loan_requests: pending,
        shgs: shgs.to_vec(),
        recent_loans: most_recent(loans.iter(), RECENT_ADMIN),
    }
}

pub fn volunteer_dashboard(volunteers: &[Volunteer], shgs: &[Shg], id: u64) -> Result<VolunteerDashboard> {
    let volunteer = volunteers
        .iter()
        .find(|v| v.id == id)
        .ok_or_else(|| Error::not_found("Volunteer", id))?;

    let nearby_shgs: Vec<Shg> = shgs
        .iter()
        .filter(|s| s.state == volunteer.state && s.district == volunteer.district)
        .cloned()
        .collect();

    Ok(VolunteerDashboard {
        stats: VolunteerStats {
            shgs_in_region: nearby_shgs.len(),
            hours_volunteered: volunteer.hours_volunteered,
            activities_joined: volunteer.activities_joined,
            shgs_supported: volunteer.shgs_supported,
        },
        volunteer_info: volunteer.clone(),
        nearby_shgs,
    })
}

/// Member names match exactly; no case or whitespace folding.
pub fn member_dashboard(shgs: &[Shg], loans: &[Loan], code: &str, member_name: &str) -> Result<MemberDashboard> {
    let shg = find_shg(shgs, code)?;
    let member_loans: Vec<Loan> = loans
        .iter()
        .filter(|l| l.shg_code == code && l.member_name == member_name)
        .cloned()
        .collect();

    let total_loans_taken = approved_total(&member_loans);
    let your_contribution = shg.savings.checked_div(shg.members).unwrap_or(0);

    Ok(MemberDashboard {
        shg_info: shg.clone(),
        stats: MemberStats {
            group_savings: shg.savings,
            your_contribution,
            total_loans_taken,
            outstanding_dues: (total_loans_taken * OUTSTANDING_SHARE).floor() as u64,
        },
        member_loans,
    })
}

/// Indian-rupee display amount with thousands separators, e.g. `₹50,000`.
pub fn format_rupees(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let paise = (amount.abs() * 100.0).round() as u64;
    let digits = (paise / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match paise % 100 {
        0 => format!("{sign}₹{grouped}"),
        fraction => format!("{sign}₹{grouped}.{fraction:02}"),
    }
}

/// Newest first by calendar date; dates that do not parse as `YYYY-MM-DD`
/// sort after every valid date. Ties keep their stored order.
fn most_recent<'a>(loans: impl Iterator<Item = &'a Loan>, limit: usize) -> Vec<Loan> {
    let mut sorted: Vec<Loan> = loans.cloned().collect();
    sorted.sort_by(|a, b| compare_dates(&b.date, &a.date));
    sorted.truncate(limit);
    sorted
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    let parse = |date: &str| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
    (parse(a), a).cmp(&(parse(b), b))
}

fn national_activity(loan: &Loan, shgs: &[Shg]) -> NationalActivity {
    let shg = shgs.iter().find(|s| s.code == loan.shg_code);
    let (name, location) = match shg {
        Some(shg) => (shg.name.clone(), format!("{}, {}", shg.district, shg.state)),
        None => ("Unknown SHG".to_string(), "Unknown".to_string()),
    };
    let (kind, headline) = match loan.status {
        LoanStatus::Pending => ("loan", "New loan request"),
        LoanStatus::Approved => ("approval", "Loan approved"),
        LoanStatus::Rejected => ("rejection", "Loan rejected"),
    };

    NationalActivity {
        id: loan.id,
        kind: kind.to_string(),
        description: format!("{headline} from {name}, {location}"),
        amount: format_rupees(loan.amount),
        status: loan.status,
        date: loan.date.clone(),
    }
}

fn status_verb(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Pending => "Requested",
        LoanStatus::Approved => "Approved",
        LoanStatus::Rejected => "Rejected",
    }
}

fn find_shg<'a>(shgs: &'a [Shg], code: &str) -> Result<&'a Shg> {
    shgs.iter()
        .find(|s| s.code == code)
        .ok_or_else(|| Error::not_found("SHG", code))
}

fn count_status(loans: &[Loan], status: LoanStatus) -> usize {
    loans.iter().filter(|l| l.status == status).count()
}

/// Counters are unbounded on update; totals clamp at `u64::MAX`.
fn saturating_total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

fn approved_total(loans: &[Loan]) -> f64 {
    loans
        .iter()
        .filter(|l| l.status == LoanStatus::Approved)
        .map(|l| l.amount)
        .sum()
}

impl Storage {
    pub fn national_overview(&self) -> Result<NationalOverview> {
        Ok(national_overview(
            &self.list_shgs()?,
            &self.list_loans()?,
            &self.list_volunteers()?,
        ))
    }

    pub fn shg_dashboard(&self, code: &str) -> Result<ShgDashboard> {
        shg_dashboard(&self.list_shgs()?, &self.list_loans()?, code)
    }

    pub fn admin_dashboard(&self) -> Result<AdminDashboard> {
        Ok(admin_dashboard(&self.list_shgs()?, &self.list_loans()?))
    }

    pub fn volunteer_dashboard(&self, id: u64) -> Result<VolunteerDashboard> {
        volunteer_dashboard(&self.list_volunteers()?, &self.list_shgs()?, id)
    }

    pub fn member_dashboard(&self, code: &str, member_name: &str) -> Result<MemberDashboard> {
        member_dashboard(&self.list_shgs()?, &self.list_loans()?, code, member_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shg(id: u64, code: &str, state: &str, district: &str, members: u64, savings: u64) -> Shg {
        Shg {
            id,
            code: code.into(),
            name: format!("{code} SHG"),
            state: state.into(),
            district: district.into(),
            block: String::new(),
            members,
            savings,
            loans: 3,
            founded_year: 2019,
            head: String::new(),
            contact: String::new(),
            email: String::new(),
        }
    }

    fn loan(id: u64, code: &str, member: &str, amount: f64, status: LoanStatus, date: &str) -> Loan {
        Loan {
            id,
            shg_code: code.into(),
            member_name: member.into(),
            amount,
            purpose: "Dairy setup".into(),
            status,
            date: date.into(),
            interest_rate: "7%".into(),
            approval_date: None,
            approved_by: None,
        }
    }

    fn volunteer(id: u64, state: &str, district: &str) -> Volunteer {
        Volunteer {
            id,
            name: format!("Volunteer {id}"),
            email: format!("v{id}@example.com"),
            phone: String::new(),
            state: state.into(),
            district: district.into(),
            skills: vec![],
            hours_volunteered: 24,
            activities_joined: 5,
            shgs_supported: 3,
            status: "active".into(),
            registration_date: "2024-10-15".into(),
        }
    }

    #[test]
    fn national_totals_and_state_rollup() {
        let shgs = vec![
            shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000),
            shg(2, "SHG-MH-001", "Maharashtra", "Pune", 10, 90_000),
            shg(3, "SHG-MP-002", "Madhya Pradesh", "Ujjain", 12, 180_000),
        ];
        let loans = vec![
            loan(1, "SHG-MP-001", "Priya", 50_000.0, LoanStatus::Pending, "2025-01-05"),
            loan(2, "SHG-MP-002", "Anjali", 30_000.0, LoanStatus::Approved, "2025-01-03"),
        ];
        let volunteers = vec![
            volunteer(1, "Madhya Pradesh", "Indore"),
            volunteer(2, "Kerala", "Kochi"),
        ];

        let overview = national_overview(&shgs, &loans, &volunteers);
        assert_eq!(overview.stats.total_members, 37);
        assert_eq!(overview.stats.total_funds_managed, 520_000);
        assert_eq!(overview.stats.active_shgs, 3);
        assert_eq!(overview.stats.active_volunteers, 2);
        assert_eq!((overview.stats.pending_loans, overview.stats.approved_loans), (1, 1));

        let mp = &overview.top_states[0];
        assert_eq!((mp.name.as_str(), mp.shgs, mp.funds, mp.volunteers), ("Madhya Pradesh", 2, 430_000, 1));
        // Kerala has no SHG, so its volunteer is dropped from the rollup.
        assert_eq!(overview.top_states.len(), 2);
        assert!(overview.top_states.iter().all(|s| s.name != "Kerala"));
    }

    #[test]
    fn huge_counters_clamp_instead_of_overflowing() {
        let big = u64::MAX / 2 + 1;
        let shgs = vec![
            shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", big, big),
            shg(2, "SHG-MP-002", "Madhya Pradesh", "Ujjain", big, big),
        ];

        let overview = national_overview(&shgs, &[], &[]);
        assert_eq!(overview.stats.total_funds_managed, u64::MAX);
        assert_eq!(overview.stats.total_members, u64::MAX);
        assert_eq!(overview.top_states[0].funds, u64::MAX);

        let admin = admin_dashboard(&shgs, &[]);
        assert_eq!(admin.stats.total_savings, u64::MAX);
        assert_eq!(admin.stats.total_members, u64::MAX);
    }

    #[test]
    fn top_states_capped_at_five_with_stable_ties() {
        let states = ["A", "B", "C", "D", "E", "F", "G"];
        let mut shgs: Vec<Shg> = states
            .iter()
            .enumerate()
            .map(|(i, state)| shg(i as u64 + 1, &format!("SHG-{i}"), state, "X", 1, 100))
            .collect();
        shgs.push(shg(20, "SHG-F2", "F", "X", 1, 100));

        let overview = national_overview(&shgs, &[], &[]);
        let names: Vec<&str> = overview.top_states.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["F", "A", "B", "C", "D"]);
        assert!(overview
            .top_states
            .windows(2)
            .all(|pair| pair[0].shgs >= pair[1].shgs));
    }

    #[test]
    fn recent_activities_newest_first_with_unknown_shg_fallback() {
        let shgs = vec![shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000)];
        let loans = vec![
            loan(1, "SHG-MP-001", "Priya", 50_000.0, LoanStatus::Pending, "2025-01-01"),
            loan(2, "SHG-ZZ-404", "Ghost", 1_234.5, LoanStatus::Approved, "2025-01-05"),
            loan(3, "SHG-MP-001", "Meera", 75_000.0, LoanStatus::Approved, "2025-01-03"),
        ];

        let activities = national_overview(&shgs, &loans, &[]).recent_activities;
        let dates: Vec<&str> = activities.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-05", "2025-01-03", "2025-01-01"]);

        assert_eq!(activities[0].description, "Loan approved from Unknown SHG, Unknown");
        assert_eq!(activities[0].amount, "₹1,234.50");
        assert_eq!(activities[0].kind, "approval");
        assert_eq!(
            activities[2].description,
            "New loan request from SHG-MP-001 SHG, Indore, Madhya Pradesh"
        );
        assert_eq!(activities[2].kind, "loan");
        assert_eq!(activities[2].amount, "₹50,000");
    }

    #[test]
    fn malformed_dates_sort_last() {
        let loans = vec![
            loan(1, "A", "x", 1.0, LoanStatus::Pending, "5/1/2025"),
            loan(2, "A", "x", 1.0, LoanStatus::Pending, "2024-12-31"),
            loan(3, "A", "x", 1.0, LoanStatus::Pending, "2025-01-02"),
        ];
        let ids: Vec<u64> = most_recent(loans.iter(), 10).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn shg_dashboard_totals() {
        let shgs = vec![shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000)];
        let mut loans: Vec<Loan> = (1..=7)
            .map(|i| {
                let status = if i % 2 == 0 { LoanStatus::Approved } else { LoanStatus::Pending };
                loan(i, "SHG-MP-001", "Priya", 10_000.0, status, &format!("2025-01-0{i}"))
            })
            .collect();
        loans.push(loan(8, "SHG-MP-002", "Other", 99_000.0, LoanStatus::Approved, "2025-02-01"));

        let dashboard = shg_dashboard(&shgs, &loans, "SHG-MP-001").unwrap();
        assert_eq!(dashboard.loans.len(), 7);
        assert_eq!(dashboard.stats.loans_disbursed, 30_000.0);
        assert_eq!(dashboard.stats.pending_loans, 4);
        assert_eq!(dashboard.stats.active_loan_accounts, 3);
        assert_eq!(dashboard.recent_activities.len(), 5);
        assert_eq!(dashboard.recent_activities[0].date, "2025-01-07");
        assert_eq!(dashboard.recent_activities[0].activity, "Loan Requested - Dairy setup");
        assert_eq!(dashboard.recent_activities[1].activity, "Loan Approved - Dairy setup");

        assert!(matches!(
            shg_dashboard(&shgs, &loans, "SHG-MP-999"),
            Err(Error::NotFound { entity: "SHG", .. })
        ));
    }

    #[test]
    fn admin_dashboard_lists_pending_and_recent() {
        let shgs = vec![
            shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000),
            shg(2, "SHG-MP-002", "Madhya Pradesh", "Ujjain", 12, 180_000),
        ];
        let loans: Vec<Loan> = (1..=12)
            .map(|i| {
                let status = if i <= 3 { LoanStatus::Pending } else { LoanStatus::Rejected };
                loan(i, "SHG-MP-001", "Priya", 1_000.0, status, &format!("2025-01-{i:02}"))
            })
            .collect();

        let dashboard = admin_dashboard(&shgs, &loans);
        assert_eq!(dashboard.stats.total_shgs, 2);
        assert_eq!(dashboard.stats.total_members, 27);
        assert_eq!(dashboard.stats.total_savings, 430_000);
        assert_eq!(dashboard.stats.pending_loans, 3);
        assert_eq!(dashboard.pending_loan_requests.len(), 3);
        assert_eq!(dashboard.recent_loans.len(), 10);
        assert_eq!(dashboard.recent_loans[0].id, 12);
    }

    #[test]
    fn volunteer_dashboard_finds_nearby_shgs() {
        let shgs = vec![
            shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000),
            shg(2, "SHG-MP-002", "Madhya Pradesh", "Ujjain", 12, 180_000),
        ];
        let volunteers = vec![volunteer(1, "Madhya Pradesh", "Indore"), volunteer(2, "Maharashtra", "Pune")];

        let dashboard = volunteer_dashboard(&volunteers, &shgs, 1).unwrap();
        assert_eq!(dashboard.stats.shgs_in_region, 1);
        assert_eq!(dashboard.nearby_shgs[0].code, "SHG-MP-001");
        assert_eq!(dashboard.stats.hours_volunteered, 24);

        let lonely = volunteer_dashboard(&volunteers, &shgs, 2).unwrap();
        assert!(lonely.nearby_shgs.is_empty());
        assert_eq!(lonely.stats.shgs_in_region, 0);

        assert!(matches!(
            volunteer_dashboard(&volunteers, &shgs, 99),
            Err(Error::NotFound { entity: "Volunteer", .. })
        ));
    }

    #[test]
    fn member_contribution_uses_floor_division() {
        let shgs = vec![
            shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000),
            shg(2, "SHG-NEW", "Madhya Pradesh", "Indore", 0, 5_000),
        ];
        let loans = vec![
            loan(1, "SHG-MP-001", "Priya Sharma", 50_000.0, LoanStatus::Approved, "2025-01-05"),
            loan(2, "SHG-MP-001", "Priya Sharma", 25_000.0, LoanStatus::Pending, "2025-01-06"),
            loan(3, "SHG-MP-001", "priya sharma", 10_000.0, LoanStatus::Approved, "2025-01-07"),
            loan(4, "SHG-MP-001", "Priya Sharma", 12_345.0, LoanStatus::Approved, "2025-01-08"),
        ];

        let dashboard = member_dashboard(&shgs, &loans, "SHG-MP-001", "Priya Sharma").unwrap();
        assert_eq!(dashboard.stats.your_contribution, 16_666);
        assert_eq!(dashboard.stats.group_savings, 250_000);
        assert_eq!(dashboard.member_loans.len(), 3);
        assert_eq!(dashboard.stats.total_loans_taken, 62_345.0);
        assert_eq!(dashboard.stats.outstanding_dues, 37_407);

        let empty = member_dashboard(&shgs, &loans, "SHG-NEW", "Priya Sharma").unwrap();
        assert_eq!(empty.stats.your_contribution, 0);
        assert!(empty.member_loans.is_empty());

        assert!(member_dashboard(&shgs, &loans, "SHG-XX", "Priya Sharma").is_err());
    }

    #[test]
    fn rupee_formatting() {
        assert_eq!(format_rupees(0.0), "₹0");
        assert_eq!(format_rupees(999.0), "₹999");
        assert_eq!(format_rupees(75_000.0), "₹75,000");
        assert_eq!(format_rupees(1_234_567.25), "₹1,234,567.25");
    }

    #[test]
    fn overview_serializes_with_legacy_field_names() {
        let shgs = vec![shg(1, "SHG-MP-001", "Madhya Pradesh", "Indore", 15, 250_000)];
        let value = serde_json::to_value(national_overview(&shgs, &[], &[])).unwrap();
        assert_eq!(value["stats"]["activeSHGs"], 1);
        assert_eq!(value["stats"]["totalFundsManaged"], 250_000);
        assert_eq!(value["topStates"][0]["name"], "Madhya Pradesh");
        assert!(value["recentActivities"].as_array().unwrap().is_empty());
    }
}

//! Loan requests (`loans.json`) and their approval workflow.

use tracing::{info, warn};

use crate::error::{require, Error, Result};
use crate::models::{Loan, LoanApproval, LoanStatus, LoanUpdate, NewLoan, Shg};
use crate::storage::{next_id, today, Storage};

/// Rate recorded on submission, until an approver sets one.
pub const RATE_UNDECIDED: &str = "TBD";
/// Rate applied when an approval does not name one.
pub const DEFAULT_INTEREST_RATE: &str = "7%";

impl Storage {
    /// Submit a loan request; it starts out pending.
    ///
    /// The referenced SHG is not required to exist, only logged when missing.
    pub fn submit_loan(&self, new: NewLoan) -> Result<Loan> {
        require("shgCode", &new.shg_code)?;
        require("memberName", &new.member_name)?;
        require("purpose", &new.purpose)?;
        if !(new.amount > 0.0) {
            return Err(Error::validation("amount", "must be greater than zero"));
        }

        if !self.load::<Shg>()?.iter().any(|s| s.code == new.shg_code) {
            warn!(shg_code = %new.shg_code, "loan submitted for unknown SHG");
        }

        let loan = self.modify(|loans: &mut Vec<Loan>| {
            let loan = Loan {
                id: next_id(loans),
                shg_code: new.shg_code,
                member_name: new.member_name,
                amount: new.amount,
                purpose: new.purpose,
                status: LoanStatus::Pending,
                date: today(),
                interest_rate: RATE_UNDECIDED.to_string(),
                approval_date: None,
                approved_by: None,
            };
            loans.push(loan.clone());
            Ok(loan)
        })?;

        info!(loan_id = loan.id, shg_code = %loan.shg_code, amount = loan.amount, "loan submitted");
        Ok(loan)
    }

    pub fn list_loans(&self) -> Result<Vec<Loan>> {
        self.load()
    }

    pub fn get_loan(&self, id: u64) -> Result<Loan> {
        self.load::<Loan>()?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::not_found("Loan", id))
    }

    pub fn loans_by_status(&self, status: LoanStatus) -> Result<Vec<Loan>> {
        let mut loans = self.load::<Loan>()?;
        loans.retain(|l| l.status == status);
        Ok(loans)
    }

    pub fn loans_by_shg(&self, shg_code: &str) -> Result<Vec<Loan>> {
        let mut loans = self.load::<Loan>()?;
        loans.retain(|l| l.shg_code == shg_code);
        Ok(loans)
    }

    /// Merge the fields present in `patch`.
    pub fn update_loan(&self, id: u64, patch: LoanUpdate) -> Result<Loan> {
        if let Some(amount) = patch.amount {
            if !(amount > 0.0) {
                return Err(Error::validation("amount", "must be greater than zero"));
            }
        }
        let loan = self.with_loan(id, |loan| {
            if let Some(member_name) = patch.member_name {
                loan.member_name = member_name;
            }
            if let Some(amount) = patch.amount {
                loan.amount = amount;
            }
            if let Some(purpose) = patch.purpose {
                loan.purpose = purpose;
            }
        })?;

        info!(loan_id = id, "loan updated");
        Ok(loan)
    }

    /// Mark a loan approved, stamping today's date and the approver.
    pub fn approve_loan(&self, id: u64, approval: LoanApproval) -> Result<Loan> {
        require("approvedBy", &approval.approved_by)?;
        let rate = approval
            .interest_rate
            .filter(|rate| !rate.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INTEREST_RATE.to_string());

        let loan = self.with_loan(id, |loan| {
            loan.status = LoanStatus::Approved;
            loan.approval_date = Some(today());
            loan.approved_by = Some(approval.approved_by);
            loan.interest_rate = rate;
        })?;

        info!(loan_id = id, approved_by = ?loan.approved_by, "loan approved");
        Ok(loan)
    }

    pub fn reject_loan(&self, id: u64) -> Result<Loan> {
        let loan = self.with_loan(id, |loan| loan.status = LoanStatus::Rejected)?;
        info!(loan_id = id, "loan rejected");
        Ok(loan)
    }

    fn with_loan(&self, id: u64, change: impl FnOnce(&mut Loan)) -> Result<Loan> {
        self.modify(|loans: &mut Vec<Loan>| {
            let loan = loans
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| Error::not_found("Loan", id))?;
            change(loan);
            Ok(loan.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scratch_storage;

    fn request(member: &str, amount: f64) -> NewLoan {
        NewLoan {
            shg_code: "SHG-MP-001".into(),
            member_name: member.into(),
            amount,
            purpose: "Tailoring unit".into(),
        }
    }

    #[test]
    fn submit_then_approve() {
        let storage = scratch_storage("loans_approve");
        let loan = storage.submit_loan(request("Priya Sharma", 50000.0)).unwrap();
        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.approval_date, None);
        assert_eq!(loan.interest_rate, RATE_UNDECIDED);
        assert_eq!(loan.date, today());

        let approved = storage
            .approve_loan(
                loan.id,
                LoanApproval {
                    approved_by: "admin".into(),
                    interest_rate: Some("7%".into()),
                },
            )
            .unwrap();
        assert_eq!(approved.status, LoanStatus::Approved);
        assert_eq!(approved.approval_date, Some(today()));
        assert_eq!(approved.interest_rate, "7%");
        assert_eq!(approved.approved_by.as_deref(), Some("admin"));
        assert_eq!(storage.get_loan(loan.id).unwrap(), approved);
    }

    #[test]
    fn approval_without_rate_uses_default() {
        let storage = scratch_storage("loans_default_rate");
        let loan = storage.submit_loan(request("Priya Sharma", 20000.0)).unwrap();
        let approved = storage
            .approve_loan(
                loan.id,
                LoanApproval {
                    approved_by: "admin".into(),
                    interest_rate: Some(String::new()),
                },
            )
            .unwrap();
        assert_eq!(approved.interest_rate, DEFAULT_INTEREST_RATE);
    }

    #[test]
    fn reject_and_filter_by_status() {
        let storage = scratch_storage("loans_reject");
        let first = storage.submit_loan(request("Priya Sharma", 10000.0)).unwrap();
        storage.submit_loan(request("Anjali Verma", 15000.0)).unwrap();

        let rejected = storage.reject_loan(first.id).unwrap();
        assert_eq!(rejected.status, LoanStatus::Rejected);
        assert_eq!(rejected.approval_date, None);

        assert_eq!(storage.loans_by_status(LoanStatus::Pending).unwrap().len(), 1);
        assert_eq!(storage.loans_by_status(LoanStatus::Rejected).unwrap()[0].id, first.id);
        assert_eq!(storage.loans_by_shg("SHG-MP-001").unwrap().len(), 2);
        assert!(storage.loans_by_shg("SHG-MP-002").unwrap().is_empty());
    }

    #[test]
    fn unknown_loan_is_not_found() {
        let storage = scratch_storage("loans_missing");
        assert!(matches!(
            storage.reject_loan(42),
            Err(Error::NotFound { entity: "Loan", .. })
        ));
    }

    #[test]
    fn invalid_requests_name_the_field() {
        let storage = scratch_storage("loans_validation");
        assert!(matches!(
            storage.submit_loan(request("Priya Sharma", 0.0)),
            Err(Error::Validation { field: "amount", .. })
        ));
        assert!(matches!(
            storage.submit_loan(NewLoan {
                purpose: " ".into(),
                ..request("Priya Sharma", 100.0)
            }),
            Err(Error::Validation { field: "purpose", .. })
        ));
        assert!(storage.list_loans().unwrap().is_empty());
    }

    #[test]
    fn update_merges_present_fields() {
        let storage = scratch_storage("loans_update");
        let loan = storage.submit_loan(request("Priya Sharma", 10000.0)).unwrap();
        let updated = storage
            .update_loan(
                loan.id,
                LoanUpdate {
                    amount: Some(12500.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, 12500.0);
        assert_eq!(updated.member_name, "Priya Sharma");
        assert_eq!(updated.status, LoanStatus::Pending);
    }
}

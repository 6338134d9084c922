//! Self-Help Groups (`shgs.json`), keyed by their business `code`.

use chrono::Datelike;
use tracing::info;

use crate::error::{require, Error, Result};
use crate::models::{NewShg, Shg, ShgUpdate};
use crate::storage::{next_id, Storage};

impl Storage {
    /// Create an SHG with zeroed counters; codes are unique.
    pub fn create_shg(&self, new: NewShg) -> Result<Shg> {
        require("code", &new.code)?;
        require("name", &new.name)?;
        require("state", &new.state)?;
        require("district", &new.district)?;

        let shg = self.modify(|shgs: &mut Vec<Shg>| {
            if shgs.iter().any(|s| s.code == new.code) {
                return Err(Error::already_exists("SHG", "code", new.code.clone()));
            }
            let shg = Shg {
                id: next_id(shgs),
                code: new.code,
                name: new.name,
                state: new.state,
                district: new.district,
                block: new.block.unwrap_or_default(),
                members: 0,
                savings: 0,
                loans: 0,
                founded_year: chrono::Local::now().year(),
                head: new.head.unwrap_or_default(),
                contact: new.contact.unwrap_or_default(),
                email: new.email.unwrap_or_default(),
            };
            shgs.push(shg.clone());
            Ok(shg)
        })?;

        info!(shg_id = shg.id, code = %shg.code, "SHG created");
        Ok(shg)
    }

    pub fn list_shgs(&self) -> Result<Vec<Shg>> {
        self.load()
    }

    pub fn get_shg(&self, code: &str) -> Result<Shg> {
        self.load::<Shg>()?
            .into_iter()
            .find(|s| s.code == code)
            .ok_or_else(|| Error::not_found("SHG", code))
    }

    pub fn shgs_by_location(&self, state: &str, district: &str) -> Result<Vec<Shg>> {
        let mut shgs = self.load::<Shg>()?;
        shgs.retain(|s| s.state == state && s.district == district);
        Ok(shgs)
    }

    pub fn shgs_by_state(&self, state: &str) -> Result<Vec<Shg>> {
        let mut shgs = self.load::<Shg>()?;
        shgs.retain(|s| s.state == state);
        Ok(shgs)
    }

    /// Merge the fields present in `patch`; absent fields keep their values.
    pub fn update_shg(&self, code: &str, patch: ShgUpdate) -> Result<Shg> {
        let shg = self.modify(|shgs: &mut Vec<Shg>| {
            let shg = shgs
                .iter_mut()
                .find(|s| s.code == code)
                .ok_or_else(|| Error::not_found("SHG", code))?;
            if let Some(members) = patch.members {
                shg.members = members;
            }
            if let Some(savings) = patch.savings {
                shg.savings = savings;
            }
            if let Some(loans) = patch.loans {
                shg.loans = loans;
            }
            if let Some(year) = patch.founded_year {
                shg.founded_year = year;
            }
            if let Some(head) = patch.head {
                shg.head = head;
            }
            if let Some(contact) = patch.contact {
                shg.contact = contact;
            }
            if let Some(email) = patch.email {
                shg.email = email;
            }
            Ok(shg.clone())
        })?;

        info!(code, "SHG updated");
        Ok(shg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scratch_storage;

    fn new_shg(code: &str, state: &str, district: &str) -> NewShg {
        NewShg {
            code: code.into(),
            name: format!("{code} group"),
            state: state.into(),
            district: district.into(),
            head: Some("Meera Sharma".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_starts_with_zero_counters() {
        let storage = scratch_storage("shgs_create");
        let shg = storage
            .create_shg(new_shg("SHG-MP-001", "Madhya Pradesh", "Indore"))
            .unwrap();

        assert_eq!(shg.id, 1);
        assert_eq!((shg.members, shg.savings, shg.loans), (0, 0, 0));
        assert_eq!(shg.founded_year, chrono::Local::now().year());
        assert_eq!(shg.block, "");
        assert_eq!(shg.head, "Meera Sharma");
        assert_eq!(storage.get_shg("SHG-MP-001").unwrap(), shg);
    }

    #[test]
    fn duplicate_code_is_rejected_without_writing() {
        let storage = scratch_storage("shgs_duplicate");
        storage
            .create_shg(new_shg("SHG-MP-001", "Madhya Pradesh", "Indore"))
            .unwrap();
        let before = storage.list_shgs().unwrap();

        let err = storage
            .create_shg(new_shg("SHG-MP-001", "Maharashtra", "Pune"))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { entity: "SHG", field: "code", .. }));
        assert_eq!(storage.list_shgs().unwrap(), before);
    }

    #[test]
    fn partial_update_keeps_absent_fields() {
        let storage = scratch_storage("shgs_update");
        storage
            .create_shg(new_shg("X", "Madhya Pradesh", "Indore"))
            .unwrap();
        storage
            .update_shg(
                "X",
                ShgUpdate {
                    members: Some(10),
                    savings: Some(100),
                    ..Default::default()
                },
            )
            .unwrap();

        let shg = storage
            .update_shg(
                "X",
                ShgUpdate {
                    savings: Some(200),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(shg.code, "X");
        assert_eq!(shg.members, 10);
        assert_eq!(shg.savings, 200);
        assert_eq!(shg.head, "Meera Sharma");
        assert_eq!(storage.get_shg("X").unwrap(), shg);
    }

    #[test]
    fn location_filters_match_exactly() {
        let storage = scratch_storage("shgs_location");
        storage
            .create_shg(new_shg("SHG-MP-001", "Madhya Pradesh", "Indore"))
            .unwrap();
        storage
            .create_shg(new_shg("SHG-MP-002", "Madhya Pradesh", "Ujjain"))
            .unwrap();
        storage
            .create_shg(new_shg("SHG-MH-001", "Maharashtra", "Pune"))
            .unwrap();

        let indore = storage.shgs_by_location("Madhya Pradesh", "Indore").unwrap();
        assert_eq!(indore.len(), 1);
        assert_eq!(storage.shgs_by_state("Madhya Pradesh").unwrap().len(), 2);
        assert!(storage.shgs_by_location("madhya pradesh", "Indore").unwrap().is_empty());
    }

    #[test]
    fn unknown_code_is_not_found() {
        let storage = scratch_storage("shgs_missing");
        assert!(matches!(
            storage.get_shg("SHG-XX-999"),
            Err(Error::NotFound { entity: "SHG", .. })
        ));
        assert!(matches!(
            storage.update_shg("SHG-XX-999", ShgUpdate::default()),
            Err(Error::NotFound { .. })
        ));
    }
}

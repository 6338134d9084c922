//! Volunteers (`volunteers.json`).

use tracing::info;

use crate::error::{require, Error, Result};
use crate::models::{NewVolunteer, Volunteer, VolunteerUpdate};
use crate::storage::{next_id, today, Storage};

impl Storage {
    /// Register a volunteer; emails are unique.
    pub fn register_volunteer(&self, new: NewVolunteer) -> Result<Volunteer> {
        require("name", &new.name)?;
        require("email", &new.email)?;
        require("state", &new.state)?;
        require("district", &new.district)?;

        let volunteer = self.modify(|volunteers: &mut Vec<Volunteer>| {
            if volunteers.iter().any(|v| v.email == new.email) {
                return Err(Error::already_exists("Volunteer", "email", new.email.clone()));
            }
            let volunteer = Volunteer {
                id: next_id(volunteers),
                name: new.name,
                email: new.email,
                phone: new.phone.unwrap_or_default(),
                state: new.state,
                district: new.district,
                skills: new.skills.unwrap_or_default(),
                hours_volunteered: 0,
                activities_joined: 0,
                shgs_supported: 0,
                status: "active".to_string(),
                registration_date: today(),
            };
            volunteers.push(volunteer.clone());
            Ok(volunteer)
        })?;

        info!(volunteer_id = volunteer.id, "volunteer registered");
        Ok(volunteer)
    }

    pub fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        self.load()
    }

    pub fn get_volunteer(&self, id: u64) -> Result<Volunteer> {
        self.load::<Volunteer>()?
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| Error::not_found("Volunteer", id))
    }

    pub fn volunteers_by_location(&self, state: &str, district: &str) -> Result<Vec<Volunteer>> {
        let mut volunteers = self.load::<Volunteer>()?;
        volunteers.retain(|v| v.state == state && v.district == district);
        Ok(volunteers)
    }

    pub fn update_volunteer(&self, id: u64, patch: VolunteerUpdate) -> Result<Volunteer> {
        let volunteer = self.modify(|volunteers: &mut Vec<Volunteer>| {
            let volunteer = volunteers
                .iter_mut()
                .find(|v| v.id == id)
                .ok_or_else(|| Error::not_found("Volunteer", id))?;
            if let Some(hours) = patch.hours_volunteered {
                volunteer.hours_volunteered = hours;
            }
            if let Some(activities) = patch.activities_joined {
                volunteer.activities_joined = activities;
            }
            if let Some(supported) = patch.shgs_supported {
                volunteer.shgs_supported = supported;
            }
            if let Some(skills) = patch.skills {
                volunteer.skills = skills;
            }
            Ok(volunteer.clone())
        })?;

        info!(volunteer_id = id, "volunteer updated");
        Ok(volunteer)
    }
}

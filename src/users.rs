//! User accounts (`users.json`).

use tracing::info;

use crate::auth::PASSWORD_PLACEHOLDER;
use crate::error::{require, Error, Result};
use crate::models::{NewUser, User, UserUpdate};
use crate::storage::{next_id, today, Storage};

impl Storage {
    /// Register a user; emails are unique.
    pub fn register_user(&self, new: NewUser) -> Result<User> {
        require("email", &new.email)?;
        require("name", &new.name)?;
        require("userType", &new.user_type)?;

        let user = self.modify(|users: &mut Vec<User>| {
            if users.iter().any(|u| u.email == new.email) {
                return Err(Error::already_exists("User", "email", new.email.clone()));
            }
            let user = User {
                id: next_id(users),
                email: new.email,
                password: PASSWORD_PLACEHOLDER.to_string(),
                role: new.user_type,
                name: new.name,
                shg_code: new.shg_code,
                state: new.state,
                district: new.district,
                created_at: Some(today()),
            };
            users.push(user.clone());
            Ok(user)
        })?;

        info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }

    pub fn get_user(&self, id: u64) -> Result<User> {
        self.load::<User>()?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::not_found("User", id))
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.load::<User>()?.into_iter().find(|u| u.email == email))
    }

    /// All users, optionally only those with the given role.
    pub fn list_users(&self, role: Option<&str>) -> Result<Vec<User>> {
        let mut users = self.load::<User>()?;
        if let Some(role) = role {
            users.retain(|u| u.role == role);
        }
        Ok(users)
    }

    pub fn update_user(&self, id: u64, patch: UserUpdate) -> Result<User> {
        let user = self.modify(|users: &mut Vec<User>| {
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| Error::not_found("User", id))?;
            if let Some(name) = patch.name {
                user.name = name;
            }
            if patch.shg_code.is_some() {
                user.shg_code = patch.shg_code;
            }
            if patch.state.is_some() {
                user.state = patch.state;
            }
            if patch.district.is_some() {
                user.district = patch.district;
            }
            Ok(user.clone())
        })?;

        info!(user_id = id, "user profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scratch_storage;

    fn member(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password: "secret".into(),
            name: "Priya Sharma".into(),
            user_type: "member".into(),
            shg_code: Some("SHG-MP-001".into()),
            ..Default::default()
        }
    }

    #[test]
    fn register_assigns_ids_and_placeholder_password() {
        let storage = scratch_storage("users_register");
        let first = storage.register_user(member("priya@shg.com")).unwrap();
        let second = storage.register_user(member("meera@shg.com")).unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(first.password, PASSWORD_PLACEHOLDER);
        assert_eq!(first.created_at, Some(today()));
        assert_eq!(storage.get_user(2).unwrap().email, "meera@shg.com");
    }

    #[test]
    fn duplicate_email_is_rejected_without_writing() {
        let storage = scratch_storage("users_duplicate");
        storage.register_user(member("priya@shg.com")).unwrap();

        let err = storage.register_user(member("priya@shg.com")).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { field: "email", .. }));
        assert_eq!(storage.list_users(None).unwrap().len(), 1);
    }

    #[test]
    fn missing_name_names_the_field() {
        let storage = scratch_storage("users_validation");
        let err = storage
            .register_user(NewUser {
                name: String::new(),
                ..member("priya@shg.com")
            })
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name", .. }));
    }

    #[test]
    fn list_filters_by_role_and_update_merges() {
        let storage = scratch_storage("users_update");
        storage.register_user(member("priya@shg.com")).unwrap();
        storage
            .register_user(NewUser {
                user_type: "volunteer".into(),
                shg_code: None,
                ..member("rajesh@shg.com")
            })
            .unwrap();

        let volunteers = storage.list_users(Some("volunteer")).unwrap();
        assert_eq!(volunteers.len(), 1);
        assert_eq!(volunteers[0].email, "rajesh@shg.com");

        let updated = storage
            .update_user(
                1,
                UserUpdate {
                    district: Some("Indore".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.district.as_deref(), Some("Indore"));
        assert_eq!(updated.shg_code.as_deref(), Some("SHG-MP-001"));
        assert_eq!(updated.name, "Priya Sharma");

        assert!(matches!(
            storage.update_user(9, UserUpdate::default()),
            Err(Error::NotFound { entity: "User", .. })
        ));
    }
}

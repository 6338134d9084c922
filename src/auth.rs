//! Login against the user document.
//!
//! There is no real authentication: passwords are stored as a fixed
//! placeholder and never checked. A login succeeds when the email exists and
//! the requested user type equals the stored role.

use tracing::{info, warn};

use crate::error::{require, Error, Result};
use crate::models::{LoginRequest, UserProfile};
use crate::storage::Storage;

/// Stored in place of a password hash for every account.
pub const PASSWORD_PLACEHOLDER: &str = "$2a$10$5K5.8K8E5K5E5K5E5K5E5K5E5K5E5K5E5K5E5K5E5K5E5";

pub fn login(storage: &Storage, request: &LoginRequest) -> Result<UserProfile> {
    require("email", &request.email)?;
    require("userType", &request.user_type)?;

    let user = storage
        .find_user_by_email(&request.email)?
        .ok_or(Error::InvalidCredentials {
            reason: "unknown email",
        })?;

    if user.role != request.user_type {
        warn!(user_id = user.id, requested = %request.user_type, "login with wrong role");
        return Err(Error::InvalidCredentials {
            reason: "invalid role for this user",
        });
    }

    info!(user_id = user.id, "login");
    Ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::storage::scratch_storage;

    fn seeded() -> Storage {
        let storage = scratch_storage("auth");
        storage
            .register_user(NewUser {
                email: "admin@shg.com".into(),
                password: "anything".into(),
                name: "Meera Sharma".into(),
                user_type: "admin".into(),
                ..Default::default()
            })
            .unwrap();
        storage
    }

    fn request(email: &str, user_type: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: "whatever".into(),
            user_type: user_type.into(),
        }
    }

    #[test]
    fn login_matches_email_and_role() {
        let storage = seeded();
        let profile = login(&storage, &request("admin@shg.com", "admin")).unwrap();
        assert_eq!(profile.name, "Meera Sharma");
        assert_eq!(profile.role, "admin");
    }

    #[test]
    fn wrong_role_or_unknown_email_is_rejected() {
        let storage = seeded();
        assert!(matches!(
            login(&storage, &request("admin@shg.com", "member")),
            Err(Error::InvalidCredentials { reason: "invalid role for this user" })
        ));
        assert!(matches!(
            login(&storage, &request("nobody@shg.com", "admin")),
            Err(Error::InvalidCredentials { reason: "unknown email" })
        ));
    }
}

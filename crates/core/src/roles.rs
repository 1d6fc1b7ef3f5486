//! Role name constants and validation.
//!
//! The platform has exactly two roles: store employees run shelf
//! verifications; supervisors manage stores, planograms, and reports.

use crate::error::CoreError;

/// Runs shelf verifications and works assigned tasks.
pub const ROLE_EMPLOYEE: &str = "employee";
/// Manages stores, planograms, shelves, and reports across the chain.
pub const ROLE_SUPERVISOR: &str = "supervisor";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_EMPLOYEE, ROLE_SUPERVISOR];

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown role: '{role}'. Valid roles: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        assert!(validate_role("employee").is_ok());
        assert!(validate_role("supervisor").is_ok());
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(validate_role("admin").is_err());
        assert!(validate_role("").is_err());
    }
}

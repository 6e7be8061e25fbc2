//! Request checks applied before anything reaches the store.
//!
//! The table's own constraints stay authoritative; these checks only turn
//! obviously bad input into a 400 with a readable message.

use crate::db::{NewUser, UserUpdate};
use crate::error::AppError;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE_EXCLUSIVE: i64 = 150;

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("name must not be empty".into()));
    }
    Ok(())
}

fn validate_age(age: i64) -> Result<(), AppError> {
    if !(MIN_AGE..MAX_AGE_EXCLUSIVE).contains(&age) {
        return Err(AppError::ValidationError(format!(
            "age must be between {} and {}, got {}",
            MIN_AGE,
            MAX_AGE_EXCLUSIVE - 1,
            age
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::ValidationError(format!("invalid email address: {}", email));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() || domain.starts_with('.') {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> Result<(), AppError> {
    validate_name(&user.name)?;
    validate_age(user.age)?;
    validate_email(&user.email)
}

/// Checks only the fields that were supplied.
pub fn validate_update(update: &UserUpdate) -> Result<(), AppError> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(age) = update.age {
        validate_age(age)?;
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_new_user() {
        assert!(validate_new_user(&NewUser::new("Alice", 30, "alice@example.com")).is_ok());
        assert!(validate_new_user(&NewUser::new("Min", 1, "min@example.com")).is_ok());
        assert!(validate_new_user(&NewUser::new("Max", 149, "max@example.com")).is_ok());
    }

    #[test]
    fn test_age_out_of_range() {
        for age in [0, 150, -3] {
            let result = validate_new_user(&NewUser::new("Alice", age, "alice@example.com"));
            assert!(matches!(result, Err(AppError::ValidationError(_))), "age {}", age);
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "alice", "@example.com", "alice@", "alice@example", "a b@example.com", "a@b@c.com", "alice@.com"] {
            let result = validate_new_user(&NewUser::new("Alice", 30, email));
            assert!(matches!(result, Err(AppError::ValidationError(_))), "email {:?}", email);
        }
    }

    #[test]
    fn test_blank_name() {
        let result = validate_new_user(&NewUser::new("   ", 30, "alice@example.com"));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_update_checks_only_supplied_fields() {
        assert!(validate_update(&UserUpdate::default()).is_ok());
        assert!(validate_update(&UserUpdate::default().age(18)).is_ok());
        assert!(validate_update(&UserUpdate::default().email("nope")).is_err());
        assert!(validate_update(&UserUpdate::default().name("").age(18)).is_err());
    }
}

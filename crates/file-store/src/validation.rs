//! Account field rules applied at registration.
//!
//! Lengths are counted in characters, not bytes.

use crate::error::{Result, StoreError};

/// Usernames must be longer than this (exclusive)
const USERNAME_MIN_EXCLUSIVE: usize = 3;
/// Usernames must be shorter than this (exclusive)
const USERNAME_MAX_EXCLUSIVE: usize = 20;
/// Minimum password length (inclusive)
pub const PASSWORD_MIN_LEN: usize = 8;

/// Check a username: 4 to 19 alphanumeric characters.
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    len > USERNAME_MIN_EXCLUSIVE
        && len < USERNAME_MAX_EXCLUSIVE
        && username.chars().all(char::is_alphanumeric)
}

/// Check a password: at least [`PASSWORD_MIN_LEN`] characters of anything.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
}

/// Validate a registration request.
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if is_valid_username(username) && is_valid_password(password) {
        Ok(())
    } else {
        Err(StoreError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds_are_exclusive() {
        assert!(!is_valid_username("abc"));
        assert!(is_valid_username("abcd"));
        assert!(is_valid_username(&"a".repeat(19)));
        assert!(!is_valid_username(&"a".repeat(20)));
    }

    #[test]
    fn test_username_rejects_empty() {
        assert!(!is_valid_username(""));
    }

    #[test]
    fn test_username_rejects_non_alphanumeric() {
        assert!(!is_valid_username("alice_b"));
        assert!(!is_valid_username("alice b"));
        assert!(!is_valid_username("alice-b"));
        assert!(!is_valid_username("alice.b"));
    }

    #[test]
    fn test_username_accepts_digits_and_unicode_letters() {
        assert!(is_valid_username("user1234"));
        assert!(is_valid_username("jürgen"));
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert!(is_valid_username("éééé"));
        // 19 characters, 38 bytes
        assert!(is_valid_username(&"é".repeat(19)));
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(!is_valid_password(""));
        assert!(!is_valid_password("1234567"));
        assert!(is_valid_password("12345678"));
        assert!(is_valid_password("pass word with spaces!"));
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("alice", "password1").is_ok());
        assert_eq!(
            validate_credentials("ab", "password1"),
            Err(StoreError::InvalidInput)
        );
        assert_eq!(
            validate_credentials("alice", "short"),
            Err(StoreError::InvalidInput)
        );
    }
}

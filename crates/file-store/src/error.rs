use thiserror::Error;

/// Failures returned by [`Store`](crate::Store) operations.
///
/// The display text of each variant is the message shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(
        "Invalid username/password. Usernames must be at least 3 characters and no more than 20, and may only contain alphanumeric characters. Passwords must be at least 8 characters."
    )]
    InvalidInput,

    #[error("Username already exists.")]
    AlreadyExists,

    /// Unknown user and wrong password are deliberately the same error.
    #[error("Invalid username/password.")]
    InvalidCredentials,

    #[error("Invalid session.")]
    InvalidSession,

    #[error("Invalid filename.")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;

//! file-store: In-memory multi-tenant file store.
//!
//! Holds three collections:
//! - accounts (username -> plaintext password + owned files)
//! - per-account file sets (filename -> raw bytes)
//! - login sessions (token -> account)
//!
//! A session token only ever reaches the files of the account that
//! produced it. Nothing is persisted; state lives as long as the [`Store`].

mod error;
mod store;
pub mod validation;

pub use error::{Result, StoreError};
pub use store::Store;

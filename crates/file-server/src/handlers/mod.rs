//! Route handlers
//!
//! - `accounts`: registration and login
//! - `files`: per-session file operations
//! - `status`: health probe and the JSON 404 fallback

pub mod accounts;
pub mod files;
pub mod status;

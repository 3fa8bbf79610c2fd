//! Authentication primitives
//!
//! Argon2id password hashing and the in-memory bearer token table.

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password};
pub use session::{Session, SessionStore};

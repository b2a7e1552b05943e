// src/store/mod.rs
//
// The remote-store boundary. Everything the session core knows about the
// database goes through the traits in `status` and `results`, and every
// failure crossing the boundary is one of the closed `StoreError` kinds
// below. The core switches on the tag, never on error strings.

pub mod results;
pub mod status;
pub mod users;

use std::fmt;

/// Tagged error returned by every store adapter operation.
#[derive(Debug)]
pub enum StoreError {
    /// The addressed record does not exist.
    NotFound,
    /// The store rejected the access outright.
    PermissionDenied,
    /// Connectivity or timeout faults that a later attempt might not hit.
    Transient(String),
    /// Everything else.
    Other(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::PermissionDenied => write!(f, "permission denied"),
            StoreError::Transient(msg) => write!(f, "transient store failure: {msg}"),
            StoreError::Other(msg) => write!(f, "store failure: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

// SQLSTATE classes that map onto the closed tag set.
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";
const PG_SERIALIZATION_FAILURE: &str = "40001";
const PG_TOO_MANY_CONNECTIONS: &str = "53300";
const PG_ADMIN_SHUTDOWN: &str = "57P01";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Io(e) => StoreError::Transient(e.to_string()),
            sqlx::Error::PoolTimedOut => {
                StoreError::Transient("timed out acquiring a connection".to_string())
            }
            sqlx::Error::PoolClosed => {
                StoreError::Transient("connection pool closed".to_string())
            }
            sqlx::Error::Database(db) => match db.code().as_deref() {
                Some(PG_INSUFFICIENT_PRIVILEGE) => StoreError::PermissionDenied,
                Some(PG_SERIALIZATION_FAILURE | PG_TOO_MANY_CONNECTIONS | PG_ADMIN_SHUTDOWN) => {
                    StoreError::Transient(db.to_string())
                }
                _ => StoreError::Other(db.to_string()),
            },
            other => StoreError::Other(other.to_string()),
        }
    }
}

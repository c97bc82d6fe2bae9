use std::fmt;

use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

pub mod courses_repo;
pub mod memory;
pub mod posts_repo;

pub use memory::MemoryRepo;

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Outcome of a store call, independent of the backend behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    /// The identifier could not be parsed into the store's id type.
    MalformedId(String),
    Backend(String),
}

pub type StoreResult<T> = core::result::Result<T, StoreError>;

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no matching record"),
            Self::MalformedId(id) => write!(f, "malformed identifier: {id}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            err => {
                error!("Database error: {:?}", err);
                Self::Backend(err.to_string())
            }
        }
    }
}

pub fn parse_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}

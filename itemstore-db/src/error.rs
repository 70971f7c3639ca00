//! Error types for itemstore-db
//!
//! Every driver error is classified once, here, into the store taxonomy.
//! Nothing is retried or suppressed; callers see the failure as-is.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable, credentials rejected, unknown database, or the pool
    /// could not hand out a connection.
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// DDL statement failed (e.g. the table already exists).
    #[error("Schema error: {0}")]
    Schema(#[source] sqlx::Error),

    /// Unique constraint violated on insert. The whole batch was rejected.
    #[error("Duplicate key: {0}")]
    DuplicateKey(#[source] sqlx::Error),

    #[error("Store is not connected")]
    NotConnected,

    /// Connection settings could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Coarse class of a driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    Connection,
    Config,
    UniqueViolation,
    DuplicateTable,
    Other,
}

impl StoreError {
    /// Classify a driver error raised by a DML statement or pool operation.
    pub fn classify(err: sqlx::Error) -> Self {
        match class_of(&err) {
            ErrorClass::Connection => Self::Connection(err),
            ErrorClass::Config => Self::Config(err),
            ErrorClass::UniqueViolation => Self::DuplicateKey(err),
            ErrorClass::DuplicateTable | ErrorClass::Other => Self::Database(err),
        }
    }

    /// Classify a driver error raised while opening the pool.
    pub fn connection(err: sqlx::Error) -> Self {
        match class_of(&err) {
            ErrorClass::Config => Self::Config(err),
            _ => Self::Connection(err),
        }
    }

    /// Classify a driver error raised while running DDL.
    ///
    /// Connection failures keep their class; anything else the server
    /// rejects is a schema error.
    pub fn schema(err: sqlx::Error) -> Self {
        match class_of(&err) {
            ErrorClass::Connection => Self::Connection(err),
            ErrorClass::Config => Self::Config(err),
            _ => Self::Schema(err),
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::classify(err)
    }
}

fn class_of(err: &sqlx::Error) -> ErrorClass {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorClass::Connection,
        sqlx::Error::Configuration(_) => ErrorClass::Config,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| sqlstate_class(&code))
            .unwrap_or(ErrorClass::Other),
        _ => ErrorClass::Other,
    }
}

/// Map a Postgres SQLSTATE to an error class.
///
/// Class 08 is connection exceptions, class 28 is authorization failures,
/// 3D000 is an unknown database and 57P0x is the server going away.
fn sqlstate_class(code: &str) -> ErrorClass {
    match code {
        "23505" => ErrorClass::UniqueViolation,
        "42P07" => ErrorClass::DuplicateTable,
        "3D000" => ErrorClass::Connection,
        c if c.starts_with("08") || c.starts_with("28") || c.starts_with("57P0") => {
            ErrorClass::Connection
        }
        _ => ErrorClass::Other,
    }
}

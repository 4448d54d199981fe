use thiserror::Error;

/// Unified application error.
///
/// Covers everything that can stop the binary from starting or serving:
/// configuration, pool setup and migrations, metric registration, and
/// socket I/O.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcomes of the employee lifecycle that are not plain success.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee already exists with given email: {email}")]
    Conflict { email: String },

    #[error("Employee not found: {id}")]
    NotFound { id: i64 },

    #[error("Employee has no id; save it before updating")]
    MissingId,

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl EmployeeError {
    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }
}

/// Returns `true` when the store rejected a write because of the unique
/// index on `employees.email`.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

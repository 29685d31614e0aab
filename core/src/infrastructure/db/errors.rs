use sea_orm::{DbErr, RuntimeErr, SqlErr};
use tracing::error;

use crate::domain::common::entities::app_errors::{
    ConstraintViolation, CoreError, TransientKind,
};

/// Maps a driver error onto the core taxonomy so callers never see dialect codes.
pub fn translate_db_error(err: DbErr, operation: &str) -> CoreError {
    match &err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => return CoreError::NotFound,
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            error!(operation, error = %err, "Database connection unavailable");
            return CoreError::Transient(TransientKind::Connection);
        }
        _ => {}
    }

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            return CoreError::constraint(ConstraintViolation::Unique, detail);
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return CoreError::constraint(ConstraintViolation::ForeignKey, detail);
        }
        _ => {}
    }

    if let Some(sqlx_err) = sqlx_error(&err) {
        match sqlx_err {
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code()
                    && let Some(translated) = classify(&code, db_err.message())
                {
                    return translated;
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                error!(operation, error = %err, "Database connection unavailable");
                return CoreError::Transient(TransientKind::Connection);
            }
            _ => {}
        }
    }

    error!(operation, error = %err, "Database operation failed");
    CoreError::InternalServerError
}

fn sqlx_error(err: &DbErr) -> Option<&sqlx::Error> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(inner)) | DbErr::Query(RuntimeErr::SqlxError(inner)) => {
            Some(inner)
        }
        _ => None,
    }
}

/// Classifies a database error code. Covers PostgreSQL SQLSTATEs, SQLite extended result
/// codes and the MySQL `23000` family, which needs the message to tell constraints apart.
pub fn classify(code: &str, message: &str) -> Option<CoreError> {
    let constraint = |kind| Some(CoreError::constraint(kind, message));
    let transient = |kind| Some(CoreError::Transient(kind));

    match code {
        "23505" | "2067" | "1555" => constraint(ConstraintViolation::Unique),
        "23503" | "787" => constraint(ConstraintViolation::ForeignKey),
        "23502" | "1299" => constraint(ConstraintViolation::NotNull),
        "22001" => constraint(ConstraintViolation::DataTooLong),
        "23514" | "275" => constraint(ConstraintViolation::Check),
        "40P01" | "40001" => transient(TransientKind::Deadlock),
        "57014" | "55P03" | "5" | "6" => transient(TransientKind::Timeout),
        "23000" => {
            let lowered = message.to_lowercase();
            if lowered.contains("duplicate") {
                constraint(ConstraintViolation::Unique)
            } else if lowered.contains("foreign key") {
                constraint(ConstraintViolation::ForeignKey)
            } else if lowered.contains("cannot be null") {
                constraint(ConstraintViolation::NotNull)
            } else {
                constraint(ConstraintViolation::Check)
            }
        }
        _ => None,
    }
}

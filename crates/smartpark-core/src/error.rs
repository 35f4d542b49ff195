// crates/smartpark-core/src/error.rs

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database query failed: {0}")]
    Database(sqlx::Error),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}

// Foreign-key failures are split out so callers can tell a dangling parent
// reference (or a parent that still has children) apart from other store errors.
impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return CoreError::ForeignKeyViolation(db_err.message().to_string());
            }
        }
        CoreError::Database(err)
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_stays_a_database_error() {
        let err = CoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, CoreError::Database(sqlx::Error::RowNotFound)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_names_the_entity() {
        let id = Uuid::nil();
        let err = CoreError::not_found("Parking slot", id);
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Parking slot '00000000-0000-0000-0000-000000000000' not found"
        );
    }
}

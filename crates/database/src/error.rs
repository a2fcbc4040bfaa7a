use models::validation::ValidationErrors;
use sea_orm::{DbErr, SqlErr};

/// Failure of a single service operation. Every kind is scoped to one request.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("seminar not found")]
    NotFound,
    #[error("participant already joined this seminar")]
    AlreadyJoined,
    #[error("uniqueness constraint violated")]
    ConstraintViolation,
    #[error("only the organizer may modify this seminar")]
    Forbidden,
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Whether the caller should treat this as a missing target
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::AlreadyJoined | Self::ConstraintViolation
        )
    }

    /// Maps a failed insert, separating unique-key collisions from other errors
    pub fn from_insert(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::ConstraintViolation,
            _ => Self::Database(err),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::validation::Field;

    #[test]
    fn test_not_found_family() {
        assert!(ServiceError::NotFound.is_not_found());
        assert!(ServiceError::AlreadyJoined.is_not_found());
        assert!(ServiceError::ConstraintViolation.is_not_found());
        assert!(!ServiceError::Forbidden.is_not_found());
        assert!(!ServiceError::from(ValidationErrors::single(Field::Topic, "bad")).is_not_found());
    }

    #[test]
    fn test_from_insert_keeps_other_errors() {
        let err = ServiceError::from_insert(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, ServiceError::Database(_)));
    }
}

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name and last name must have a minimum length of 3 characters")]
    NameTooShort,
    #[error("First name and last name must contain alphabetic characters only")]
    NameNotAlphabetic,
    #[error("DOB is mandatory")]
    MissingDateOfBirth,
    #[error("Age must be greater than 15 years and less than or equal to 20 years")]
    AgeOutOfRange,
    #[error("Section must have a valid value of A, B, or C")]
    InvalidSection,
    #[error("Gender must have a valid value of M or F")]
    InvalidGender,
    #[error("Marks must be within the range of 0 to 100")]
    MarksOutOfRange,
    /// Update path only: one rejection for every marks problem.
    #[error("Marks must be present, non-zero and within the range of 1 to 100")]
    InvalidMarks,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("stored row is invalid: {0}")]
    Corrupt(String),
    #[error("no stored record with id {0}")]
    Missing(i64),
    #[error("record store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("student {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_text() {
        assert_eq!(ValidationError::MissingDateOfBirth.to_string(), "DOB is mandatory");
        assert_eq!(
            ServiceError::from(ValidationError::InvalidGender).to_string(),
            "Gender must have a valid value of M or F"
        );
        assert_eq!(ServiceError::NotFound(7).to_string(), "student 7 not found");
    }
}

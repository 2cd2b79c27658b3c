use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key \"{key}\"")]
    InvalidKey { key: String },

    #[error("Stored value under \"{key}\" is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for \"{key}\": {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("\"{email}\" is not a valid email address")]
    InvalidEmail { email: String },

    #[error("No account found for {email}")]
    UnknownAccount { email: String },

    #[error("An account for {email} already exists")]
    AccountExists { email: String },

    /// Raised by external providers that do not explain the failure.
    #[error("")]
    Rejected,

    #[error("{0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("Course name can't be empty")]
    EmptyCourseName,

    #[error("Invalid color \"{input}\" (expected #rrggbb)")]
    InvalidColor { input: String },

    #[error("No course matches \"{query}\"")]
    UnknownCourse { query: String },

    #[error("Metric index {index} is out of range (expected 1 to 5)")]
    MetricOutOfRange { index: usize },

    #[error("Metric value {value} can't be negative")]
    NegativeMetric { value: f64 },

    #[error("{0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_names_the_key() {
        let source = serde_json::from_str::<u32>("{").unwrap_err();
        let e = StorageError::Malformed {
            key: "tasks_u1".to_string(),
            source,
        };
        assert!(e.to_string().starts_with("Stored value under \"tasks_u1\" is malformed"));
    }

    #[test]
    fn auth_error_display() {
        let e = AuthError::UnknownAccount {
            email: "a@b.c".to_string(),
        };
        assert_eq!(e.to_string(), "No account found for a@b.c");
        assert_eq!(AuthError::Rejected.to_string(), "");
        assert_eq!(
            AuthError::MissingField { field: "Password" }.to_string(),
            "Password is required"
        );
    }

    #[test]
    fn study_error_display() {
        assert_eq!(
            StudyError::InvalidColor {
                input: "red".to_string()
            }
            .to_string(),
            "Invalid color \"red\" (expected #rrggbb)"
        );
        assert_eq!(
            StudyError::MetricOutOfRange { index: 6 }.to_string(),
            "Metric index 6 is out of range (expected 1 to 5)"
        );
    }

    #[test]
    fn study_error_from_storage_error() {
        let storage = StorageError::InvalidKey {
            key: "../x".to_string(),
        };
        let study: StudyError = storage.into();
        assert_eq!(study.to_string(), "Invalid storage key \"../x\"");
    }
}

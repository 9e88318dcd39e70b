use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    /// A patient payload field failed validation.
    #[error("{0}")]
    InvalidInput(String),
    /// A query parameter (sort field or order) was not recognised.
    #[error("{0}")]
    InvalidQuery(String),
    #[error("Patient not found")]
    NotFound(String),
    #[error("Patient already exists")]
    AlreadyExists(String),

    #[error("patient store does not exist: {path}", path = .0.display())]
    StoreMissing(PathBuf),
    #[error("failed to write patient store: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read patient store: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize patient store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient store: {0}")]
    Deserialization(serde_json::Error),
}

impl PatientError {
    /// Returns `true` for failures of the backing store rather than of the request.
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            PatientError::StoreMissing(_)
                | PatientError::FileWrite(_)
                | PatientError::FileRead(_)
                | PatientError::Serialization(_)
                | PatientError::Deserialization(_)
        )
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;

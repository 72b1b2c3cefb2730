//! Definitions of errors that the crate can encounter.

/// A [`std::result::Result`] that has the crate [`Error`] as the error variant.
pub type DeltaResult<T, E = Error> = std::result::Result<T, E>;

/// All the types of errors that can occur in this crate.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A general error that isn't differentiated further.
    #[error("Generic delta kernel error: {0}")]
    Generic(String),

    /// A column ordinal held a different type than the caller asked for.
    #[error("Unexpected column type: {0}")]
    UnexpectedColumnType(String),

    /// Data was expected to be present at an ordinal but was null.
    #[error("Data missing for field {0}")]
    MissingData(String),

    /// A schema was structurally invalid, or a row did not match its schema.
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// An error occurred while serializing JSON.
    #[error("Json serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl Error {
    pub fn generic(msg: impl ToString) -> Self {
        Self::Generic(msg.to_string())
    }
    pub fn unexpected_column_type(msg: impl ToString) -> Self {
        Self::UnexpectedColumnType(msg.to_string())
    }
    pub fn missing_data(msg: impl ToString) -> Self {
        Self::MissingData(msg.to_string())
    }
    pub fn schema(msg: impl ToString) -> Self {
        Self::Schema(msg.to_string())
    }
}

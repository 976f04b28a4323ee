use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("required column '{column}' missing from {sheet} input")]
    MissingInputColumn { column: String, sheet: String },

    #[error("no shelves provided, nothing to assign into")]
    EmptyShelfSet,

    #[error("duplicate shelf id '{id}' in input")]
    DuplicateShelfId { id: String },

    #[error("unknown shelf id '{id}'")]
    UnknownShelf { id: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, AllocError>;

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidCharacters {
        field: &'static str,
        input: String,
    },
    TooMany {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    FileCount {
        min: usize,
        max: usize,
        actual: usize,
    },
    UnreadableFile {
        path: PathBuf,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidReserveDateTime {
        input: String,
    },
}

impl ValidationError {
    /// Popbill-style error code reported for every locally rejected argument.
    pub const CODE: i64 = -99_999_999;

    /// Sentinel code shared by all validation failures.
    pub fn code(&self) -> i64 {
        Self::CODE
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidCharacters { field, input } => {
                write!(f, "{field} contains invalid characters: {input}")
            }
            Self::TooMany { field, max, actual } => {
                write!(f, "too many {field}: {actual} (max {max})")
            }
            Self::FileCount { min, max, actual } => {
                write!(f, "file count out of range: {actual} (expected {min}..={max})")
            }
            Self::UnreadableFile { path } => {
                write!(f, "file does not exist or cannot be read: {}", path.display())
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidReserveDateTime { input } => {
                write!(f, "invalid reservation time (expected yyyyMMddHHmmss): {input}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

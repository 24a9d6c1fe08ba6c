//! Error types for ARINC 429 word encoding and decoding

use thiserror::Error;

/// Result type for ARINC 429 codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// The word field an argument was destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Label (octal identifier)
    Label,
    /// 19-bit data field
    Data,
    /// Sign/Status Matrix
    Ssm,
    /// Source/Destination Identifier
    Sdi,
    /// The whole 32-bit word
    Word,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Label => write!(f, "label"),
            Field::Data => write!(f, "data"),
            Field::Ssm => write!(f, "ssm"),
            Field::Sdi => write!(f, "sdi"),
            Field::Word => write!(f, "word"),
        }
    }
}

/// Error types encountered while building or reading ARINC 429 words
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value does not fit the field it was given for
    #[error("Invalid argument: {field} = {value} out of range [{min}, {max}]")]
    InvalidArgument {
        /// Field that rejected the value
        field: Field,
        /// The rejected value
        value: i64,
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: i64,
    },

    /// Textual word representation could not be parsed
    #[error("Invalid word: {0}")]
    InvalidWord(String),
}

impl CodecError {
    /// Create a new InvalidArgument error for a field accepting `[0, max]`
    pub fn invalid_argument(field: Field, value: i64, max: i64) -> Self {
        CodecError::InvalidArgument {
            field,
            value,
            min: 0,
            max,
        }
    }

    /// Create a new InvalidWord error
    pub fn invalid_word(msg: impl Into<String>) -> Self {
        CodecError::InvalidWord(msg.into())
    }

    /// The field an InvalidArgument error refers to
    pub fn field(&self) -> Option<Field> {
        match self {
            CodecError::InvalidArgument { field, .. } => Some(*field),
            CodecError::InvalidWord(_) => None,
        }
    }
}

/// Check that `value` lies within `[0, max]` for `field`
pub(crate) fn check_range(field: Field, value: i64, max: i64) -> Result<()> {
    if !(0..=max).contains(&value) {
        return Err(CodecError::invalid_argument(field, value, max));
    }
    Ok(())
}

//! Error types for record decoding and activation.

use std::io;

pub type DataStoreResult<T> = Result<T, DataStoreError>;

#[derive(Debug, thiserror::Error)]
pub enum DataStoreError {
    #[error("unexpected end of input")]
    Truncated,

    #[error("variable-length integer does not fit in 32 bits")]
    VliOverflow,

    #[error("variable-length integer has redundant trailing bytes")]
    VliOverlong,

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    #[error("length {0} does not fit a variable-length integer")]
    LengthTooLarge(usize),

    #[error("unknown tag `{0}`")]
    UnknownTag(String),

    #[error("tag `{tag}` registered twice")]
    DuplicateTag { tag: String },

    #[error("id {id} assigned to both `{first}` and `{second}`")]
    DuplicateId { id: u32, first: String, second: String },

    #[error("tag `{0}` has no id in the active record")]
    UnassignedTag(String),

    #[error("no tag registered for id {0}")]
    UnknownId(u32),

    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for DataStoreError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            DataStoreError::Truncated
        } else {
            DataStoreError::Io(error)
        }
    }
}

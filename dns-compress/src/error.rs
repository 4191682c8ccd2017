use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum CompressionError {
    /// The name is longer than 253 bytes once a trailing '.' is removed.
    NameTooLong(usize),

    /// The output area cannot hold the encoded name.
    EmptyOutputSpace { needed: usize, available: usize },

    /// The name has an empty label (e.g. "a..com") or one over 63 bytes.
    InvalidLabel(String),

    /// A previously written name could not be walked. The encoder skips
    /// such candidates, so this never escapes [`crate::compress`].
    MalformedCandidate(usize),

    /// Appending would grow the message past its configured limit.
    MessageTooLong { len: usize, max: usize },
}

impl Error for CompressionError {}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Self::NameTooLong(len) => write!(f, "name of {} bytes exceeds 253 bytes", len),
            Self::EmptyOutputSpace { needed, available } => write!(
                f,
                "output space too small: need {} bytes, have {}",
                needed, available
            ),
            Self::InvalidLabel(name) => write!(f, "invalid label in name: {:?}", name),
            Self::MalformedCandidate(pos) => {
                write!(f, "malformed compressed name at offset {}", pos)
            }
            Self::MessageTooLong { len, max } => {
                write!(f, "message of {} bytes exceeds limit of {}", len, max)
            }
        }
    }
}

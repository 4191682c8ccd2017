//! RFC1035 (4.1.4) domain name compression.
//!
//! Names are written as length prefixed labels into a message buffer, with
//! the longest suffix already present in the message replaced by a two byte
//! pointer. Positions of previously written names are kept in a
//! [`NameRegistry`] for the lifetime of one message.
mod compress;
mod error;
mod labels;
mod matcher;
mod parser;
mod registry;
mod writer;

pub use compress::compress;
pub use error::CompressionError;
pub use labels::{split_labels, LabelLengths};
pub use matcher::{match_suffix, SuffixMatch};
pub use parser::{label_offsets, LabelOffsets};
pub use registry::NameRegistry;
pub use writer::{NameWriter, WriterConfig};

type Result<T> = std::result::Result<T, CompressionError>;

/// Longest name accepted once a trailing '.' has been stripped.
pub const MAX_NAME_LEN: usize = 253;

/// Number of name bytes inspected before giving up on finding its end.
pub const MAX_SCAN_LEN: usize = 255;

/// RFC1035 - labels are restricted to 63 octets or less.
pub const MAX_LABEL_LEN: usize = 63;

/// Every label costs at least two bytes of the 253 byte budget.
pub const MAX_LABELS: usize = 127;

/// Upper bound on the labels resolved from one compressed name.
pub const MAX_OFFSETS: usize = 128;

/// Pointers carry 14 bits of offset, so nothing at or beyond this position
/// can be referenced.
pub const MAX_POINTER_OFFSET: usize = 0x4000;

/// RFC1035 - messages carried by UDP are restricted to 512 bytes.
pub const MAX_UDP_MESSAGE_LEN: usize = 512;

/// Messages carried over TCP are prefixed with a two byte length.
pub const MAX_TCP_MESSAGE_LEN: usize = 65535;

/// The top two bits of a length byte that introduce a pointer.
pub(crate) const POINTER_MASK: u8 = 0xc0;

use crate::error::CompressionError;
use crate::{Result, MAX_LABELS, MAX_LABEL_LEN};
use tracing::{instrument, trace};

/// Lengths of the labels of one name, most significant label last.
pub type LabelLengths = heapless::Vec<u8, MAX_LABELS>;

/// Splits a name (without its trailing '.') into the lengths of its labels.
///
/// Fails with [`CompressionError::InvalidLabel`] if any label is empty or
/// longer than 63 bytes.
#[instrument]
pub fn split_labels(name: &[u8]) -> Result<LabelLengths> {
    let mut lens = LabelLengths::new();
    for label in name.split(|b| *b == b'.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(invalid_label(name));
        }
        // A 253 byte name cannot hold more than 127 labels.
        lens.push(label.len() as u8).map_err(|_| invalid_label(name))?;
    }

    trace!("Split into {} labels", lens.len());

    Ok(lens)
}

fn invalid_label(name: &[u8]) -> CompressionError {
    CompressionError::InvalidLabel(String::from_utf8_lossy(name).into_owned())
}

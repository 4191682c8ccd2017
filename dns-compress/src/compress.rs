use crate::error::CompressionError;
use crate::labels::split_labels;
use crate::matcher::{match_suffix, SuffixMatch};
use crate::registry::NameRegistry;
use crate::{Result, MAX_NAME_LEN, MAX_SCAN_LEN, POINTER_MASK};
use tracing::{debug, instrument, trace};

/// Writes `name` in wire format at offset `dst` of `message`, replacing the
/// longest suffix it shares with a name listed in `registry` by a pointer.
///
/// `message[..dst]` is the message assembled so far, starting at its first
/// byte, and `message[dst..]` is the space the name may be written to. At
/// most 255 bytes of `name` are inspected, stopping early at a NUL byte, and
/// a single trailing '.' is ignored. The empty name (or ".") is the root and
/// encodes to a single zero byte.
///
/// Without a registry nothing is compressed. With one, names that took more
/// than a bare pointer to encode are recorded for later calls while the
/// registry has room.
///
/// Returns the number of bytes written.
#[instrument(
    skip(name, message, registry),
    fields(domain = %String::from_utf8_lossy(name))
)]
pub fn compress(
    name: &[u8],
    message: &mut [u8],
    dst: usize,
    mut registry: Option<&mut NameRegistry>,
) -> Result<usize> {
    let scan = &name[..name.len().min(MAX_SCAN_LEN)];
    let mut name = match scan.iter().position(|b| *b == 0) {
        Some(nul) => &scan[..nul],
        None => scan,
    };
    if let Some((&b'.', rest)) = name.split_last() {
        name = rest;
    }

    if name.len() > MAX_NAME_LEN {
        return Err(CompressionError::NameTooLong(name.len()));
    }
    let space = message.len().saturating_sub(dst);
    if space == 0 {
        return Err(CompressionError::EmptyOutputSpace {
            needed: 1,
            available: 0,
        });
    }
    if name.is_empty() {
        message[dst] = 0;
        return Ok(1);
    }

    let lens = split_labels(name)?;

    let mut best: Option<SuffixMatch> = None;
    if let Some(registry) = registry.as_deref() {
        let prior = &message[..dst];
        for &candidate in registry.candidates() {
            let found = match match_suffix(prior, candidate, name, &lens) {
                Some(found) => found,
                None => continue,
            };
            if found.len > best.map_or(0, |b| b.len) {
                best = Some(found);
                if found.len == name.len() {
                    break;
                }
            }
        }
    }
    debug!("Best match: {:?}", best);

    let matched = best.map_or(0, |b| b.len);
    let unmatched = name.len() - matched;
    // Exactly what gets written. A partial match already counted the '.'
    // in front of it, so the first length byte is extra.
    let needed = unmatched + 2 + if matched > 0 && unmatched > 0 { 1 } else { 0 };
    if space < needed {
        return Err(CompressionError::EmptyOutputSpace {
            needed,
            available: space,
        });
    }

    let out = &mut message[dst..];
    let mut written = 0;
    let mut pos = 0;
    for &len in lens.iter() {
        if pos >= unmatched {
            break;
        }
        let len = len as usize;
        out[written] = len as u8;
        out[written + 1..written + 1 + len].copy_from_slice(&name[pos..pos + len]);
        written += len + 1;
        pos += len + 1;
    }

    match best {
        Some(found) => {
            out[written] = POINTER_MASK | (found.offset >> 8) as u8;
            out[written + 1] = found.offset as u8;
            written += 2;
        }
        None => {
            out[written] = 0;
            written += 1;
        }
    }

    if written > 2 {
        if let Some(registry) = registry.as_deref_mut() {
            if registry.push(dst) {
                trace!("Recorded name at {}", dst);
            }
        }
    }

    trace!("Wrote {} bytes", written);

    Ok(written)
}

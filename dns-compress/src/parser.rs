use crate::error::CompressionError;
use crate::{Result, MAX_OFFSETS, MAX_POINTER_OFFSET};
use nom::bits::bits;
use nom::bits::complete::take as take_bits;
use nom::IResult;
use tracing::{instrument, trace};

/// Message offsets of the labels of one compressed name, in wire order.
pub type LabelOffsets = heapless::Vec<u16, MAX_OFFSETS>;

/// The first byte (or two) of each label: either the length of the label
/// that follows, or the offset of the rest of the name.
#[derive(Debug, PartialEq)]
enum LabelHeader {
    Length(u8),
    Pointer(u16),
    /// The `01` and `10` prefixes are not assigned by RFC1035.
    Reserved(u8),
}

fn label_header_bits(input: (&[u8], usize)) -> IResult<(&[u8], usize), LabelHeader> {
    let (input, flags): (_, u8) = take_bits(2usize)(input)?;
    match flags {
        0b11 => {
            let (input, offset): (_, u16) = take_bits(14usize)(input)?;
            Ok((input, LabelHeader::Pointer(offset)))
        }
        0b00 => {
            let (input, len): (_, u8) = take_bits(6usize)(input)?;
            Ok((input, LabelHeader::Length(len)))
        }
        _ => Ok((input, LabelHeader::Reserved(flags))),
    }
}

fn read_label_header(input: &[u8]) -> IResult<&[u8], LabelHeader> {
    bits::<_, _, nom::error::Error<(&[u8], usize)>, nom::error::Error<&[u8]>, _>(
        label_header_bits,
    )(input)
}

/// Walks the name starting at `start` within `message`, following pointers,
/// and collects the offset of every label it is made of.
///
/// `message` must only cover bytes already written to the message, starting
/// at the message's first byte. Every step is bounded: labels starting at or
/// beyond 0x4000, more than 128 labels or pointer hops, reserved length
/// prefixes and reads past the end of `message` all fail with
/// [`CompressionError::MalformedCandidate`].
#[instrument(skip(message))]
pub fn label_offsets(message: &[u8], start: usize) -> Result<LabelOffsets> {
    let malformed = || CompressionError::MalformedCandidate(start);

    let mut offsets = LabelOffsets::new();
    let mut cursor = start;
    let mut hops = 0;

    loop {
        let input = message.get(cursor..).ok_or_else(malformed)?;
        let (_, header) = read_label_header(input).map_err(|_| malformed())?;

        match header {
            LabelHeader::Pointer(offset) => {
                hops += 1;
                if hops > MAX_OFFSETS {
                    trace!("Too many pointer hops, assuming a loop");
                    return Err(malformed());
                }
                trace!("Name pointer at {} to offset {}", cursor, offset);
                cursor = offset as usize;
            }
            LabelHeader::Length(0) => {
                trace!("Name ends at {} after {} labels", cursor, offsets.len());
                return Ok(offsets);
            }
            LabelHeader::Length(len) => {
                // Only labels a pointer could reach are of any use.
                if cursor >= MAX_POINTER_OFFSET {
                    trace!("Label at {} is out of pointer range", cursor);
                    return Err(malformed());
                }
                offsets.push(cursor as u16).map_err(|_| malformed())?;
                cursor += len as usize + 1;
            }
            LabelHeader::Reserved(flags) => {
                trace!("Reserved label type {:#04b} at {}", flags, cursor);
                return Err(malformed());
            }
        }
    }
}

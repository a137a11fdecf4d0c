//! Record framing: extracting successive length-prefixed records from a
//! byte buffer.

use std::io::Cursor;

use tracing::debug;

use crate::archive::category::ResolvedArchive;
use crate::archive::error::ParseError;
use crate::archive::value::XdrValue;
use crate::codec::ArchiveCodec;

/// Frame and decode every record in an archive buffer, in archive order.
///
/// Each record is prefixed with its length as a 4-byte big-endian integer.
/// The prefix is only used to detect the end of the stream: running out of
/// bytes exactly at a prefix boundary is the normal termination condition,
/// while a partial prefix is a framing error. The record's actual size is
/// never validated against the prefix, so a codec that over- or
/// under-consumes bytes desynchronises the stream and surfaces as a decode
/// failure at a later record (see [`crate::codec::ArchiveCodec`]).
///
/// Ledger archives are additionally checked against their checkpoint count
/// rule once the buffer is exhausted.
pub fn frame_records(
    codec: &dyn ArchiveCodec,
    archive: &ResolvedArchive,
    data: &[u8],
) -> Result<Vec<XdrValue>, ParseError> {
    let mut cursor = Cursor::new(data);
    let mut records = Vec::new();

    while read_length_prefix(&mut cursor)?.is_some() {
        let record = codec
            .decode_record(archive.category, &mut cursor)
            .map_err(|source| ParseError::Decode {
                category: archive.category,
                index: records.len(),
                source,
            })?;
        records.push(record);
    }

    if let Some(expected) = archive.expected_record_count() {
        if records.len() != expected {
            return Err(ParseError::RecordCountMismatch {
                observed: records.len(),
                expected,
            });
        }
    }

    debug!(
        category = %archive.category,
        records = records.len(),
        "framed archive buffer"
    );
    Ok(records)
}

/// Read the next 4-byte big-endian length prefix.
///
/// Returns `None` when the buffer ends exactly at a record boundary and an
/// error when it ends inside a prefix.
fn read_length_prefix(cursor: &mut Cursor<&[u8]>) -> Result<Option<u32>, ParseError> {
    let offset = cursor.position() as usize;
    let remaining = &cursor.get_ref()[offset..];

    if remaining.is_empty() {
        return Ok(None);
    }
    if remaining.len() < 4 {
        return Err(ParseError::Framing { offset });
    }

    let prefix = u32::from_be_bytes([remaining[0], remaining[1], remaining[2], remaining[3]]);
    cursor.set_position((offset + 4) as u64);
    Ok(Some(prefix))
}

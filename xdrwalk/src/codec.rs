//! Boundary traits for the external XDR codec.
//!
//! The codec owns the field-level binary grammar (struct and union layouts,
//! discriminants, fixed and variable-length arrays, padding) entirely. This
//! crate only sees the codec's typed output, an [`XdrValue`] graph.

use std::io::Cursor;

use crate::archive::category::ArchiveCategory;
use crate::archive::value::XdrValue;

/// Errors surfaced by a codec implementation.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The buffer ended before a full record could be read.
    #[error("end of buffer")]
    EndOfBuffer,

    /// The record bytes do not match the expected grammar.
    #[error("invalid record data: {0}")]
    InvalidData(String),
}

/// Per-category decode and transaction encode entry points.
///
/// `decode_record` must consume exactly one self-delimited record from the
/// cursor and advance it past the record's final byte. The framer does not
/// bound the decoder by the record's length prefix, so a decoder that over-
/// or under-consumes bytes desynchronises the stream; the failure then
/// surfaces at a later record as a generic decode error.
///
/// `encode_transaction` must be the exact structural inverse of the decode
/// path for transaction values: canonical content hashing is only correct if
/// a decoded transaction round-trips byte-for-byte through the encoder.
/// Implementations integrating a different codec must verify this
/// independently.
pub trait ArchiveCodec {
    /// Decode one record of the given category from the cursor.
    fn decode_record(
        &self,
        category: ArchiveCategory,
        cursor: &mut Cursor<&[u8]>,
    ) -> Result<XdrValue, CodecError>;

    /// Encode a decoded transaction value into its canonical byte form.
    fn encode_transaction(&self, transaction: &XdrValue) -> Result<Vec<u8>, CodecError>;
}

//! Error types for the archive parse pipeline.

use crate::archive::category::ArchiveCategory;
use crate::codec::CodecError;

/// Parse pipeline errors. Every variant is fatal to the current parse pass.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A record length prefix was truncated mid-stream (not at a record
    /// boundary).
    #[error("framing error: length prefix truncated at byte {offset}")]
    Framing {
        /// Byte offset of the truncated prefix.
        offset: usize,
    },

    /// The codec rejected a record's bytes.
    #[error("codec rejected {category} record {index}: {source}")]
    Decode {
        /// Category being decoded.
        category: ArchiveCategory,
        /// Zero-based index of the failing record.
        index: usize,
        /// Underlying codec error.
        source: CodecError,
    },

    /// The codec failed to re-encode a transaction for hashing.
    #[error("codec failed to encode transaction: {0}")]
    Encode(#[source] CodecError),

    /// A ledger archive's record count disagrees with its checkpoint rule.
    #[error("found {observed} ledger records, expected {expected}")]
    RecordCountMismatch {
        /// Records actually decoded.
        observed: usize,
        /// Records required by the checkpoint rule.
        expected: usize,
    },

    /// The archive identifier carries no known category token.
    #[error("unknown archive category: {0:?}")]
    UnknownCategory(String),

    /// A result code has no entry in the relevant code table. Silent
    /// substitution of the raw number would mask a codec/table version
    /// mismatch, so this is fatal.
    #[error("no entry for code {code} in {table}")]
    EnumLookupMiss {
        /// Name of the code table consulted.
        table: String,
        /// The unmatched raw code.
        code: i64,
    },

    /// A decoded transaction entry is missing a field the hash attachment
    /// walk requires.
    #[error("transaction entry missing field: {0}")]
    MissingField(&'static str),

    /// A byte field expected to hold text is not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// IO error while loading an archive file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! A record stream decoder and canonicalising formatter for ledger history
//! archive files.
//!
//! History archives store a sequence of length-prefixed XDR records. This
//! crate frames those records out of a raw byte buffer, dispatches each to a
//! caller-supplied codec, and re-expresses every decoded value as a
//! JSON-compatible tree while applying path-sensitive reinterpretation of raw
//! scalars (account keys, hashes, signatures, asset codes, scaled amounts,
//! numeric result codes). It can also recompute a transaction's canonical
//! content hash and attach it to the output.
//!
//! The field-level XDR grammar itself is owned by the codec implementation
//! behind [`codec::ArchiveCodec`]; this crate never inspects raw field bytes
//! except through the codec's typed output.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod archive;
pub mod codec;
pub mod format;
pub mod hashing;
pub mod input;

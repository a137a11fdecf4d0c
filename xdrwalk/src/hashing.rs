//! Canonical transaction content hashing.
//!
//! A transaction's content hash is `SHA-256(network_hash || envelope_type ||
//! canonical_tx_bytes)`: the network identifier hash, the 4-byte XDR
//! encoding of the transaction envelope type, then the transaction
//! re-encoded into its canonical binary form by the codec. The result is
//! what the network itself signs and what external explorers display.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::archive::error::ParseError;
use crate::archive::value::XdrValue;
use crate::codec::ArchiveCodec;

/// XDR encoding of the transaction envelope type discriminant (2).
pub const ENVELOPE_TYPE_TX: [u8; 4] = [0x00, 0x00, 0x00, 0x02];

/// Hash a network identifier string into the 32-byte network hash.
pub fn network_hash(network_id: &str) -> [u8; 32] {
    Sha256::digest(network_id.as_bytes()).into()
}

/// Compute the canonical content hash of one decoded transaction.
///
/// Correct only when the codec's encoder is the exact structural inverse of
/// its decoder; see [`ArchiveCodec::encode_transaction`].
pub fn transaction_hash(
    codec: &dyn ArchiveCodec,
    transaction: &XdrValue,
    network_hash: &[u8; 32],
) -> Result<[u8; 32], ParseError> {
    let canonical = codec
        .encode_transaction(transaction)
        .map_err(ParseError::Encode)?;

    let mut hasher = Sha256::new();
    hasher.update(network_hash);
    hasher.update(ENVELOPE_TYPE_TX);
    hasher.update(&canonical);
    Ok(hasher.finalize().into())
}

/// Attach a content hash to every transaction in a decoded transaction
/// archive.
///
/// Each record is a transaction-history entry holding a transaction set
/// (`txSet.txs`) of envelopes; the hash is computed over each envelope's
/// `tx` field and appended to the envelope as a `hash` bytes field, so it
/// flows through normalisation and hex-renders like any other hash-named
/// field.
pub fn attach_transaction_hashes(
    codec: &dyn ArchiveCodec,
    records: &mut [XdrValue],
    network_hash: &[u8; 32],
) -> Result<(), ParseError> {
    let mut hashed = 0usize;

    for entry in records.iter_mut() {
        let txs = entry
            .field_mut("txSet")
            .ok_or(ParseError::MissingField("txSet"))?
            .field_mut("txs")
            .ok_or(ParseError::MissingField("txs"))?;
        let envelopes = match txs {
            XdrValue::List(envelopes) => envelopes,
            _ => return Err(ParseError::MissingField("txs")),
        };

        for envelope in envelopes.iter_mut() {
            let transaction = envelope.field("tx").ok_or(ParseError::MissingField("tx"))?;
            let digest = transaction_hash(codec, transaction, network_hash)?;
            envelope.push_field("hash", XdrValue::Bytes(digest.to_vec()));
            hashed += 1;
        }
    }

    debug!(transactions = hashed, "attached transaction hashes");
    Ok(())
}

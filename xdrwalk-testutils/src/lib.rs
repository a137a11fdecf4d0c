//! Test support for xdrwalk.
//!
//! Provides [`TagCodec`], a self-describing tag-length-value codec that
//! stands in for a generated XDR codec, plus builders for archive buffers
//! and realistic record shapes. The codec's encoder is the exact inverse of
//! its decoder, so transaction hashing behaves the same as with a real
//! codec.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::io::Cursor;

use tracing_subscriber::EnvFilter;
use xdrwalk::archive::{ArchiveCategory, XdrValue};
use xdrwalk::codec::{ArchiveCodec, CodecError};

/// Initialise test logging from `RUST_LOG`. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Value tags of the stand-in wire format.
mod tag {
    pub const VOID: u8 = 0x00;
    pub const STRUCT: u8 = 0x01;
    pub const LIST: u8 = 0x02;
    pub const INT: u8 = 0x03;
    pub const BYTES: u8 = 0x04;
    pub const TEXT: u8 = 0x05;
}

/// A tag-length-value codec over [`XdrValue`] graphs.
///
/// Every category shares the one grammar; category-specific record shapes
/// come from the builders below, not from the codec.
#[derive(Debug, Default)]
pub struct TagCodec;

impl ArchiveCodec for TagCodec {
    fn decode_record(
        &self,
        _category: ArchiveCategory,
        cursor: &mut Cursor<&[u8]>,
    ) -> Result<XdrValue, CodecError> {
        decode_value(cursor)
    }

    fn encode_transaction(&self, transaction: &XdrValue) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        encode_value(transaction, &mut buffer);
        Ok(buffer)
    }
}

/// Encode one value in the stand-in wire format.
pub fn encode_value(value: &XdrValue, out: &mut Vec<u8>) {
    match value {
        XdrValue::Void => out.push(tag::VOID),
        XdrValue::Struct(fields) => {
            out.push(tag::STRUCT);
            out.extend_from_slice(&(fields.len() as u16).to_be_bytes());
            for (name, field_value) in fields {
                out.extend_from_slice(&(name.len() as u16).to_be_bytes());
                out.extend_from_slice(name.as_bytes());
                encode_value(field_value, out);
            }
        }
        XdrValue::List(items) => {
            out.push(tag::LIST);
            out.extend_from_slice(&(items.len() as u32).to_be_bytes());
            for item in items {
                encode_value(item, out);
            }
        }
        XdrValue::Int(i) => {
            out.push(tag::INT);
            out.extend_from_slice(&i.to_be_bytes());
        }
        XdrValue::Bytes(bytes) => {
            out.push(tag::BYTES);
            out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            out.extend_from_slice(bytes);
        }
        XdrValue::Text(text) => {
            out.push(tag::TEXT);
            out.extend_from_slice(&(text.len() as u32).to_be_bytes());
            out.extend_from_slice(text.as_bytes());
        }
    }
}

/// Decode one value from the cursor, advancing it past the value's final
/// byte.
pub fn decode_value(cursor: &mut Cursor<&[u8]>) -> Result<XdrValue, CodecError> {
    let tag_byte = take(cursor, 1)?[0];
    match tag_byte {
        tag::VOID => Ok(XdrValue::Void),
        tag::STRUCT => {
            let count = u16::from_be_bytes(take(cursor, 2)?.try_into().unwrap());
            let mut fields = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let name_len = u16::from_be_bytes(take(cursor, 2)?.try_into().unwrap());
                let name = String::from_utf8(take(cursor, name_len as usize)?)
                    .map_err(|e| CodecError::InvalidData(e.to_string()))?;
                let value = decode_value(cursor)?;
                fields.push((name, value));
            }
            Ok(XdrValue::Struct(fields))
        }
        tag::LIST => {
            let count = u32::from_be_bytes(take(cursor, 4)?.try_into().unwrap());
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(decode_value(cursor)?);
            }
            Ok(XdrValue::List(items))
        }
        tag::INT => {
            let bytes = take(cursor, 8)?;
            Ok(XdrValue::Int(i64::from_be_bytes(bytes.try_into().unwrap())))
        }
        tag::BYTES => {
            let len = u32::from_be_bytes(take(cursor, 4)?.try_into().unwrap());
            Ok(XdrValue::Bytes(take(cursor, len as usize)?))
        }
        tag::TEXT => {
            let len = u32::from_be_bytes(take(cursor, 4)?.try_into().unwrap());
            let text = String::from_utf8(take(cursor, len as usize)?)
                .map_err(|e| CodecError::InvalidData(e.to_string()))?;
            Ok(XdrValue::Text(text))
        }
        other => Err(CodecError::InvalidData(format!("unknown tag {other:#04x}"))),
    }
}

fn take(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<u8>, CodecError> {
    let offset = cursor.position() as usize;
    let data = cursor.get_ref();
    if data.len() < offset + len {
        return Err(CodecError::EndOfBuffer);
    }
    let out = data[offset..offset + len].to_vec();
    cursor.set_position((offset + len) as u64);
    Ok(out)
}

/// Concatenate records into an archive buffer of `[u32 BE length][record]`
/// units.
pub fn build_archive(records: &[XdrValue]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for record in records {
        let mut encoded = Vec::new();
        encode_value(record, &mut encoded);
        buffer.extend_from_slice(&(encoded.len() as u32).to_be_bytes());
        buffer.extend_from_slice(&encoded);
    }
    buffer
}

/// A deterministic pseudo key derived from a seed.
pub fn test_key(seed: u8) -> Vec<u8> {
    (0..32u8).map(|i| i.wrapping_mul(31).wrapping_add(seed)).collect()
}

/// A transaction-history entry with one payment transaction per given
/// sequence number, shaped like the decoded output of a real codec.
pub fn transaction_entry(ledger_seq: i64, tx_seqs: &[i64]) -> XdrValue {
    let envelopes = tx_seqs
        .iter()
        .map(|seq| {
            let key = test_key(*seq as u8);
            XdrValue::Struct(vec![
                (
                    "tx".to_string(),
                    XdrValue::Struct(vec![
                        (
                            "sourceAccount".to_string(),
                            XdrValue::Struct(vec![(
                                "ed25519".to_string(),
                                XdrValue::Bytes(key.clone()),
                            )]),
                        ),
                        ("fee".to_string(), XdrValue::Int(100)),
                        ("seqNum".to_string(), XdrValue::Int(*seq)),
                        (
                            "operations".to_string(),
                            XdrValue::List(vec![XdrValue::Struct(vec![
                                (
                                    "asset".to_string(),
                                    XdrValue::Struct(vec![(
                                        "assetCode".to_string(),
                                        XdrValue::Bytes(b"KIN\x00".to_vec()),
                                    )]),
                                ),
                                ("amount".to_string(), XdrValue::Int(seq * 10_000_000)),
                            ])]),
                        ),
                    ]),
                ),
                (
                    "signatures".to_string(),
                    XdrValue::List(vec![XdrValue::Struct(vec![
                        ("hint".to_string(), XdrValue::Bytes(key[28..].to_vec())),
                        ("signature".to_string(), XdrValue::Bytes(vec![*seq as u8; 64])),
                    ])]),
                ),
            ])
        })
        .collect();

    XdrValue::Struct(vec![
        ("ledgerSeq".to_string(), XdrValue::Int(ledger_seq)),
        (
            "txSet".to_string(),
            XdrValue::Struct(vec![
                (
                    "previousLedgerHash".to_string(),
                    XdrValue::Bytes(vec![ledger_seq as u8; 32]),
                ),
                ("txs".to_string(), XdrValue::List(envelopes)),
            ]),
        ),
    ])
}

/// A ledger-header history entry.
pub fn ledger_entry(ledger_seq: i64) -> XdrValue {
    XdrValue::Struct(vec![
        ("hash".to_string(), XdrValue::Bytes(vec![ledger_seq as u8; 32])),
        (
            "header".to_string(),
            XdrValue::Struct(vec![
                ("ledgerSeq".to_string(), XdrValue::Int(ledger_seq)),
                (
                    "previousLedgerHash".to_string(),
                    XdrValue::Bytes(vec![(ledger_seq - 1) as u8; 32]),
                ),
                (
                    "skipList".to_string(),
                    XdrValue::List(
                        (0..4)
                            .map(|i| XdrValue::Bytes(vec![i as u8; 32]))
                            .collect(),
                    ),
                ),
            ]),
        ),
    ])
}

/// A transaction-result history entry with one successful payment result.
pub fn result_entry(ledger_seq: i64) -> XdrValue {
    XdrValue::Struct(vec![
        ("ledgerSeq".to_string(), XdrValue::Int(ledger_seq)),
        (
            "txResultSet".to_string(),
            XdrValue::List(vec![XdrValue::Struct(vec![
                (
                    "transactionHash".to_string(),
                    XdrValue::Bytes(vec![ledger_seq as u8; 32]),
                ),
                (
                    "result".to_string(),
                    XdrValue::Struct(vec![
                        ("feeCharged".to_string(), XdrValue::Int(100)),
                        ("code".to_string(), XdrValue::Int(0)),
                        (
                            "results".to_string(),
                            XdrValue::List(vec![XdrValue::Struct(vec![
                                ("code".to_string(), XdrValue::Int(0)),
                                (
                                    "paymentResult".to_string(),
                                    XdrValue::Struct(vec![(
                                        "code".to_string(),
                                        XdrValue::Int(0),
                                    )]),
                                ),
                            ])]),
                        ),
                    ]),
                ),
            ])]),
        ),
    ])
}

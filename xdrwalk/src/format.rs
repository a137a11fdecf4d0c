//! Path-sensitive scalar formatting.
//!
//! The same raw value can mean different things at different positions in a
//! record: a 32-byte field named `ed25519` is an account key, one named
//! `txSetHash` is a hash, one named `hint` is a signer hint. The formatter
//! therefore dispatches on the scalar's runtime kind together with the last
//! one or two segments of its path from the record-list root. This is an
//! explicit rule table, not reflection; an unmatched byte field falls
//! through to a plain list of byte values.

pub mod amount;
pub mod strkey;
pub mod tables;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::archive::error::ParseError;
use crate::archive::value::{TreeValue, XdrValue};
use self::amount::ScaledAmount;

/// One segment of a scalar's path: a field name for map descent or a
/// decimal index for sequence descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Descent into a named struct field.
    Field(&'a str),
    /// Descent into a sequence element.
    Index(usize),
}

/// Formatting switches for one parse invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Leave scaled amounts as raw integers instead of exact decimals.
    pub raw_amounts: bool,
}

/// Render one scalar according to its path context.
///
/// Callers hand every scalar leaf here exactly once; composite values are
/// descended into by the normaliser and never reach the formatter.
pub fn format_scalar(
    value: &XdrValue,
    path: &[PathSegment<'_>],
    options: &FormatOptions,
) -> Result<TreeValue, ParseError> {
    let mut segments = path.iter().rev();
    let last = segments.next();
    let parent = segments.next();

    match value {
        XdrValue::Int(raw) => format_int(*raw, last, parent, options),
        XdrValue::Bytes(bytes) => format_bytes(bytes, last, parent),
        XdrValue::Text(text) => Ok(TreeValue::Str(text.clone())),
        XdrValue::Void => Ok(TreeValue::Null),
        XdrValue::Struct(_) | XdrValue::List(_) => {
            unreachable!("composite value offered to the formatter")
        }
    }
}

fn format_int(
    raw: i64,
    last: Option<&PathSegment<'_>>,
    parent: Option<&PathSegment<'_>>,
    options: &FormatOptions,
) -> Result<TreeValue, ParseError> {
    match last {
        Some(PathSegment::Field("amount" | "startingBalance")) if !options.raw_amounts => {
            Ok(TreeValue::Amount(ScaledAmount::from_raw(raw)))
        }
        Some(PathSegment::Field("code")) => match parent {
            Some(parent) => Ok(TreeValue::Str(tables::lookup_code(parent, raw)?.to_string())),
            // A bare `code` with no context has no table to consult.
            None => Ok(TreeValue::Int(raw)),
        },
        _ => Ok(TreeValue::Int(raw)),
    }
}

fn format_bytes(
    bytes: &[u8],
    last: Option<&PathSegment<'_>>,
    parent: Option<&PathSegment<'_>>,
) -> Result<TreeValue, ParseError> {
    match last {
        Some(PathSegment::Field("ed25519")) => {
            Ok(TreeValue::Str(strkey::encode_account(bytes)))
        }
        Some(PathSegment::Field("assetCode")) => {
            let text = std::str::from_utf8(bytes)?;
            Ok(TreeValue::Str(text.trim_end_matches('\0').to_string()))
        }
        Some(PathSegment::Field(name)) if name.to_ascii_lowercase().contains("hash") => {
            Ok(TreeValue::Str(hex::encode(bytes)))
        }
        // skipList is a list of hashes in a ledger header; its elements'
        // final segment is a numeric index, so the parent decides.
        _ if matches!(parent, Some(PathSegment::Field("skipList"))) => {
            Ok(TreeValue::Str(hex::encode(bytes)))
        }
        Some(PathSegment::Field("signature")) => Ok(TreeValue::Str(BASE64.encode(bytes))),
        Some(PathSegment::Field("hint")) => Ok(TreeValue::Str(hint_mask(bytes))),
        Some(PathSegment::Field("text")) => {
            Ok(TreeValue::Str(std::str::from_utf8(bytes)?.to_string()))
        }
        _ => Ok(TreeValue::Array(
            bytes.iter().map(|b| TreeValue::Int(*b as i64)).collect(),
        )),
    }
}

/// Reconstruct the fragment of an address recoverable from a signer hint.
///
/// The hint is the last 4 bytes of a 32-byte public key. Left-padding it
/// with zero bytes and encoding yields an address whose characters 46..51
/// depend only on the hint, so only those are revealed; every other
/// position is masked with `_`.
fn hint_mask(hint: &[u8]) -> String {
    let mut key = [0u8; 32];
    let take = hint.len().min(key.len());
    key[32 - take..].copy_from_slice(&hint[hint.len() - take..]);
    let address = strkey::encode_account(&key);

    let mut masked = String::with_capacity(56);
    masked.push('G');
    masked.extend(std::iter::repeat('_').take(46));
    masked.push_str(&address[46..51]);
    masked.push_str("____");
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: XdrValue, path: &[PathSegment<'_>]) -> TreeValue {
        format_scalar(&value, path, &FormatOptions::default()).unwrap()
    }

    mod amounts {
        use super::*;

        #[test]
        fn amount_fields_scale_down_exactly() {
            let tree = fmt(XdrValue::Int(200), &[PathSegment::Field("amount")]);
            assert_eq!(tree, TreeValue::Amount(ScaledAmount::from_raw(200)));
            assert_eq!(serde_json::to_string(&tree).unwrap(), r#""0.00002""#);
        }

        #[test]
        fn starting_balance_scales_like_amount() {
            let tree = fmt(
                XdrValue::Int(6_000_000_000),
                &[PathSegment::Field("startingBalance")],
            );
            assert_eq!(serde_json::to_string(&tree).unwrap(), r#""600""#);
        }

        #[test]
        fn raw_mode_passes_amounts_through() {
            let tree = format_scalar(
                &XdrValue::Int(20_000_000),
                &[PathSegment::Field("amount")],
                &FormatOptions { raw_amounts: true },
            )
            .unwrap();
            assert_eq!(tree, TreeValue::Int(20_000_000));
        }

        #[test]
        fn other_integer_fields_are_untouched() {
            let tree = fmt(XdrValue::Int(20_000_000), &[PathSegment::Field("fee")]);
            assert_eq!(tree, TreeValue::Int(20_000_000));
        }
    }

    mod codes {
        use super::*;

        #[test]
        fn code_under_result_uses_the_transaction_table() {
            let path = [PathSegment::Field("result"), PathSegment::Field("code")];
            assert_eq!(
                fmt(XdrValue::Int(0), &path),
                TreeValue::Str("txSUCCESS".to_string())
            );
        }

        #[test]
        fn code_under_an_index_uses_the_operation_table() {
            let path = [
                PathSegment::Field("results"),
                PathSegment::Index(2),
                PathSegment::Field("code"),
            ];
            assert_eq!(
                fmt(XdrValue::Int(-1), &path),
                TreeValue::Str("opBAD_AUTH".to_string())
            );
        }

        #[test]
        fn code_under_an_operation_arm_uses_that_table() {
            let path = [
                PathSegment::Field("createAccountResult"),
                PathSegment::Field("code"),
            ];
            assert_eq!(
                fmt(XdrValue::Int(-2), &path),
                TreeValue::Str("CREATE_ACCOUNT_UNDERFUNDED".to_string())
            );
        }

        #[test]
        fn unknown_code_propagates_as_an_error() {
            let path = [PathSegment::Field("result"), PathSegment::Field("code")];
            let err =
                format_scalar(&XdrValue::Int(-99), &path, &FormatOptions::default()).unwrap_err();
            assert!(matches!(err, ParseError::EnumLookupMiss { .. }));
        }
    }

    mod bytes {
        use super::*;

        #[test]
        fn ed25519_renders_as_a_checksummed_address() {
            let key =
                hex::decode("3f0c34bf93ad0d9971d04ccc90f705511c838aad9734a4a2fb0d7a03fc7fe89a")
                    .unwrap();
            let tree = fmt(XdrValue::Bytes(key), &[PathSegment::Field("ed25519")]);
            assert_eq!(
                tree,
                TreeValue::Str(
                    "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ".to_string()
                )
            );
        }

        #[test]
        fn asset_code_strips_trailing_nulls_only() {
            let tree = fmt(
                XdrValue::Bytes(b"KIN\x00".to_vec()),
                &[PathSegment::Field("assetCode")],
            );
            assert_eq!(tree, TreeValue::Str("KIN".to_string()));

            // An internal null byte is data, not padding.
            let tree = fmt(
                XdrValue::Bytes(b"K\x00N\x00".to_vec()),
                &[PathSegment::Field("assetCode")],
            );
            assert_eq!(tree, TreeValue::Str("K\u{0}N".to_string()));
        }

        #[test]
        fn hash_named_fields_render_as_lowercase_hex() {
            let value = vec![0xABu8; 32];
            for field in ["previousLedgerHash", "txSetHash", "hash", "bucketListHash"] {
                let tree = fmt(XdrValue::Bytes(value.clone()), &[PathSegment::Field(field)]);
                match tree {
                    TreeValue::Str(expected_hex) => {
                        assert_eq!(expected_hex.len(), 64);
                        assert_eq!(expected_hex, "ab".repeat(32));
                    }
                    other => panic!("expected hex string for {field}, got {other:?}"),
                }
            }
        }

        #[test]
        fn skip_list_entries_render_as_hex() {
            let path = [PathSegment::Field("skipList"), PathSegment::Index(1)];
            let tree = fmt(XdrValue::Bytes(vec![0x01; 32]), &path);
            assert_eq!(tree, TreeValue::Str("01".repeat(32)));
        }

        #[test]
        fn signatures_render_as_base64() {
            let tree = fmt(
                XdrValue::Bytes(vec![0u8; 3]),
                &[PathSegment::Field("signature")],
            );
            assert_eq!(tree, TreeValue::Str("AAAA".to_string()));
        }

        #[test]
        fn hint_reveals_only_the_recoverable_fragment() {
            let key =
                hex::decode("3f0c34bf93ad0d9971d04ccc90f705511c838aad9734a4a2fb0d7a03fc7fe89a")
                    .unwrap();
            let hint = key[28..].to_vec();

            let tree = fmt(XdrValue::Bytes(hint.clone()), &[PathSegment::Field("hint")]);
            let masked = match tree {
                TreeValue::Str(s) => s,
                other => panic!("expected masked address, got {other:?}"),
            };

            assert_eq!(masked.len(), 56);
            assert!(masked.starts_with('G'));
            assert_eq!(&masked[1..47], "_".repeat(46));
            assert_eq!(&masked[52..], "____");

            // The revealed characters come from the zero-padded key.
            let mut padded = vec![0u8; 28];
            padded.extend_from_slice(&hint);
            let reference = strkey::encode_account(&padded);
            assert_eq!(&masked[47..52], &reference[46..51]);
        }

        #[test]
        fn text_fields_decode_as_utf8() {
            let tree = fmt(
                XdrValue::Bytes("welcome friend".as_bytes().to_vec()),
                &[PathSegment::Field("text")],
            );
            assert_eq!(tree, TreeValue::Str("welcome friend".to_string()));
        }

        #[test]
        fn invalid_utf8_text_is_an_error() {
            let err = format_scalar(
                &XdrValue::Bytes(vec![0xff, 0xfe]),
                &[PathSegment::Field("text")],
                &FormatOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, ParseError::Utf8(_)));
        }

        #[test]
        fn unmatched_byte_fields_become_byte_lists() {
            let tree = fmt(
                XdrValue::Bytes(vec![0, 127, 255]),
                &[PathSegment::Field("value")],
            );
            assert_eq!(
                tree,
                TreeValue::Array(vec![
                    TreeValue::Int(0),
                    TreeValue::Int(127),
                    TreeValue::Int(255)
                ])
            );
        }

        #[test]
        fn same_bytes_format_differently_by_path() {
            let bytes = vec![0x42u8; 32];
            let as_hash = fmt(
                XdrValue::Bytes(bytes.clone()),
                &[PathSegment::Field("txSetHash")],
            );
            let as_key = fmt(
                XdrValue::Bytes(bytes.clone()),
                &[PathSegment::Field("ed25519")],
            );
            let as_raw = fmt(XdrValue::Bytes(bytes), &[PathSegment::Field("padding")]);

            assert_eq!(as_hash, TreeValue::Str("42".repeat(32)));
            assert!(matches!(&as_key, TreeValue::Str(s) if s.starts_with('G')));
            assert!(matches!(as_raw, TreeValue::Array(_)));
            assert_ne!(as_hash, as_key);
        }
    }

    mod passthrough {
        use super::*;

        #[test]
        fn text_scalars_pass_through() {
            let tree = fmt(
                XdrValue::Text("inflation".to_string()),
                &[PathSegment::Field("opType")],
            );
            assert_eq!(tree, TreeValue::Str("inflation".to_string()));
        }

        #[test]
        fn void_becomes_null() {
            let tree = fmt(XdrValue::Void, &[PathSegment::Field("inner")]);
            assert_eq!(tree, TreeValue::Null);
        }
    }
}

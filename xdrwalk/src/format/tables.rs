//! Result-code tables for numeric `code` fields.
//!
//! Which table applies is decided by the path: a `code` directly under a
//! `result` field is a transaction result, a `code` under a sequence index
//! is a generic operation result, and a `code` under a per-operation union
//! arm (`paymentResult`, `createAccountResult`, ...) uses that operation's
//! table. The upstream generated codec names these tables by capitalising
//! the field name and appending `Code`; that convention is fragile across
//! codec versions, so the field-to-table mapping is maintained by hand here
//! and the synthesised name is only ever used in the miss error.

use crate::archive::error::ParseError;
use crate::format::PathSegment;

/// A result-code table: `(name, entries)`.
type CodeTable = (&'static str, &'static [(i64, &'static str)]);

const TRANSACTION_RESULT: CodeTable = (
    "TransactionResultCode",
    &[
        (0, "txSUCCESS"),
        (-1, "txFAILED"),
        (-2, "txTOO_EARLY"),
        (-3, "txTOO_LATE"),
        (-4, "txMISSING_OPERATION"),
        (-5, "txBAD_SEQ"),
        (-6, "txBAD_AUTH"),
        (-7, "txINSUFFICIENT_BALANCE"),
        (-8, "txNO_ACCOUNT"),
        (-9, "txINSUFFICIENT_FEE"),
        (-10, "txBAD_AUTH_EXTRA"),
        (-11, "txINTERNAL_ERROR"),
    ],
);

const OPERATION_RESULT: CodeTable = (
    "OperationResultCode",
    &[
        (0, "opINNER"),
        (-1, "opBAD_AUTH"),
        (-2, "opNO_ACCOUNT"),
        (-3, "opNOT_SUPPORTED"),
    ],
);

const CREATE_ACCOUNT_RESULT: CodeTable = (
    "CreateAccountResultCode",
    &[
        (0, "CREATE_ACCOUNT_SUCCESS"),
        (-1, "CREATE_ACCOUNT_MALFORMED"),
        (-2, "CREATE_ACCOUNT_UNDERFUNDED"),
        (-3, "CREATE_ACCOUNT_LOW_RESERVE"),
        (-4, "CREATE_ACCOUNT_ALREADY_EXIST"),
    ],
);

const PAYMENT_RESULT: CodeTable = (
    "PaymentResultCode",
    &[
        (0, "PAYMENT_SUCCESS"),
        (-1, "PAYMENT_MALFORMED"),
        (-2, "PAYMENT_UNDERFUNDED"),
        (-3, "PAYMENT_SRC_NO_TRUST"),
        (-4, "PAYMENT_SRC_NOT_AUTHORIZED"),
        (-5, "PAYMENT_NO_DESTINATION"),
        (-6, "PAYMENT_NO_TRUST"),
        (-7, "PAYMENT_NOT_AUTHORIZED"),
        (-8, "PAYMENT_LINE_FULL"),
        (-9, "PAYMENT_NO_ISSUER"),
    ],
);

const PATH_PAYMENT_RESULT: CodeTable = (
    "PathPaymentResultCode",
    &[
        (0, "PATH_PAYMENT_SUCCESS"),
        (-1, "PATH_PAYMENT_MALFORMED"),
        (-2, "PATH_PAYMENT_UNDERFUNDED"),
        (-3, "PATH_PAYMENT_SRC_NO_TRUST"),
        (-4, "PATH_PAYMENT_SRC_NOT_AUTHORIZED"),
        (-5, "PATH_PAYMENT_NO_DESTINATION"),
        (-6, "PATH_PAYMENT_NO_TRUST"),
        (-7, "PATH_PAYMENT_NOT_AUTHORIZED"),
        (-8, "PATH_PAYMENT_LINE_FULL"),
        (-9, "PATH_PAYMENT_NO_ISSUER"),
        (-10, "PATH_PAYMENT_TOO_FEW_OFFERS"),
        (-11, "PATH_PAYMENT_OFFER_CROSS_SELF"),
        (-12, "PATH_PAYMENT_OVER_SENDMAX"),
    ],
);

const MANAGE_OFFER_RESULT: CodeTable = (
    "ManageOfferResultCode",
    &[
        (0, "MANAGE_OFFER_SUCCESS"),
        (-1, "MANAGE_OFFER_MALFORMED"),
        (-2, "MANAGE_OFFER_SELL_NO_TRUST"),
        (-3, "MANAGE_OFFER_BUY_NO_TRUST"),
        (-4, "MANAGE_OFFER_SELL_NOT_AUTHORIZED"),
        (-5, "MANAGE_OFFER_BUY_NOT_AUTHORIZED"),
        (-6, "MANAGE_OFFER_LINE_FULL"),
        (-7, "MANAGE_OFFER_UNDERFUNDED"),
        (-8, "MANAGE_OFFER_CROSS_SELF"),
        (-9, "MANAGE_OFFER_SELL_NO_ISSUER"),
        (-10, "MANAGE_OFFER_BUY_NO_ISSUER"),
        (-11, "MANAGE_OFFER_NOT_FOUND"),
        (-12, "MANAGE_OFFER_LOW_RESERVE"),
    ],
);

const SET_OPTIONS_RESULT: CodeTable = (
    "SetOptionsResultCode",
    &[
        (0, "SET_OPTIONS_SUCCESS"),
        (-1, "SET_OPTIONS_LOW_RESERVE"),
        (-2, "SET_OPTIONS_TOO_MANY_SIGNERS"),
        (-3, "SET_OPTIONS_BAD_FLAGS"),
        (-4, "SET_OPTIONS_INVALID_INFLATION"),
        (-5, "SET_OPTIONS_CANT_CHANGE"),
        (-6, "SET_OPTIONS_UNKNOWN_FLAG"),
        (-7, "SET_OPTIONS_THRESHOLD_OUT_OF_RANGE"),
        (-8, "SET_OPTIONS_BAD_SIGNER"),
        (-9, "SET_OPTIONS_INVALID_HOME_DOMAIN"),
    ],
);

const CHANGE_TRUST_RESULT: CodeTable = (
    "ChangeTrustResultCode",
    &[
        (0, "CHANGE_TRUST_SUCCESS"),
        (-1, "CHANGE_TRUST_MALFORMED"),
        (-2, "CHANGE_TRUST_NO_ISSUER"),
        (-3, "CHANGE_TRUST_INVALID_LIMIT"),
        (-4, "CHANGE_TRUST_LOW_RESERVE"),
        (-5, "CHANGE_TRUST_SELF_NOT_ALLOWED"),
    ],
);

const ALLOW_TRUST_RESULT: CodeTable = (
    "AllowTrustResultCode",
    &[
        (0, "ALLOW_TRUST_SUCCESS"),
        (-1, "ALLOW_TRUST_MALFORMED"),
        (-2, "ALLOW_TRUST_NO_TRUST_LINE"),
        (-3, "ALLOW_TRUST_TRUST_NOT_REQUIRED"),
        (-4, "ALLOW_TRUST_CANT_REVOKE"),
        (-5, "ALLOW_TRUST_SELF_NOT_ALLOWED"),
    ],
);

const ACCOUNT_MERGE_RESULT: CodeTable = (
    "AccountMergeResultCode",
    &[
        (0, "ACCOUNT_MERGE_SUCCESS"),
        (-1, "ACCOUNT_MERGE_MALFORMED"),
        (-2, "ACCOUNT_MERGE_NO_ACCOUNT"),
        (-3, "ACCOUNT_MERGE_IMMUTABLE_SET"),
        (-4, "ACCOUNT_MERGE_HAS_SUB_ENTRIES"),
        (-5, "ACCOUNT_MERGE_SEQNUM_TOO_FAR"),
        (-6, "ACCOUNT_MERGE_DEST_FULL"),
    ],
);

const INFLATION_RESULT: CodeTable = (
    "InflationResultCode",
    &[(0, "INFLATION_SUCCESS"), (-1, "INFLATION_NOT_TIME")],
);

const MANAGE_DATA_RESULT: CodeTable = (
    "ManageDataResultCode",
    &[
        (0, "MANAGE_DATA_SUCCESS"),
        (-1, "MANAGE_DATA_NOT_SUPPORTED_YET"),
        (-2, "MANAGE_DATA_NAME_NOT_FOUND"),
        (-3, "MANAGE_DATA_LOW_RESERVE"),
        (-4, "MANAGE_DATA_INVALID_NAME"),
    ],
);

const BUMP_SEQUENCE_RESULT: CodeTable = (
    "BumpSequenceResultCode",
    &[(0, "BUMP_SEQUENCE_SUCCESS"), (-1, "BUMP_SEQUENCE_BAD_SEQ")],
);

/// Per-operation union arm field names and the table each resolves to.
/// Note the mismatches a name-synthesis scheme would get wrong:
/// `createPassiveOfferResult` shares `ManageOfferResultCode`, and
/// `bumpSeqResult` resolves to `BumpSequenceResultCode`.
const OPERATION_ARM_TABLES: &[(&str, CodeTable)] = &[
    ("createAccountResult", CREATE_ACCOUNT_RESULT),
    ("paymentResult", PAYMENT_RESULT),
    ("pathPaymentResult", PATH_PAYMENT_RESULT),
    ("manageOfferResult", MANAGE_OFFER_RESULT),
    ("createPassiveOfferResult", MANAGE_OFFER_RESULT),
    ("setOptionsResult", SET_OPTIONS_RESULT),
    ("changeTrustResult", CHANGE_TRUST_RESULT),
    ("allowTrustResult", ALLOW_TRUST_RESULT),
    ("accountMergeResult", ACCOUNT_MERGE_RESULT),
    ("inflationResult", INFLATION_RESULT),
    ("manageDataResult", MANAGE_DATA_RESULT),
    ("bumpSeqResult", BUMP_SEQUENCE_RESULT),
];

/// Resolve a raw result code to its human-readable name, picking the table
/// from the code's parent path segment. A missing table or missing entry is
/// fatal: substituting the raw number would mask a codec/table version
/// mismatch.
pub fn lookup_code(parent: &PathSegment<'_>, code: i64) -> Result<&'static str, ParseError> {
    let (table_name, entries) = match parent {
        PathSegment::Field("result") => TRANSACTION_RESULT,
        PathSegment::Index(_) => OPERATION_RESULT,
        PathSegment::Field(arm) => match OPERATION_ARM_TABLES
            .iter()
            .find(|(name, _)| name == arm)
        {
            Some((_, table)) => *table,
            None => {
                return Err(ParseError::EnumLookupMiss {
                    table: synthesised_table_name(arm),
                    code,
                })
            }
        },
    };

    entries
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, name)| *name)
        .ok_or_else(|| ParseError::EnumLookupMiss {
            table: table_name.to_string(),
            code,
        })
}

/// The table name the upstream codec's naming convention would produce,
/// used only to label a lookup miss.
fn synthesised_table_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{}Code", first.to_ascii_uppercase(), chars.as_str()),
        None => "Code".to_string(),
    }
}

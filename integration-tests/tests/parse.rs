//! End-to-end parse pipeline tests: identifier resolution, gzip input,
//! framing and path-sensitive formatting through the public API.

use serde_json::Value as Json;
use xdrwalk::archive::{parse_archive, ParseError, ParseOptions};
use xdrwalk::input::decompress_if_gzip;
use xdrwalk_testutils::{
    build_archive, init_tracing, ledger_entry, result_entry, test_key, transaction_entry, TagCodec,
};

fn parse_json(identifier: &str, data: &[u8], options: &ParseOptions) -> Json {
    let tree = parse_archive(&TagCodec, identifier, data, options).unwrap();
    serde_json::to_value(&tree).unwrap()
}

#[test]
fn transactions_archive_parses_end_to_end() {
    init_tracing();
    let records: Vec<_> = (0..64).map(|i| transaction_entry(i, &[i + 1])).collect();
    let buffer = build_archive(&records);

    let json = parse_json(
        "history/00/43/transactions-0043733f.xdr",
        &buffer,
        &ParseOptions::default(),
    );

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 64);

    let tx = &entries[0]["txSet"]["txs"][0]["tx"];
    let address = tx["sourceAccount"]["ed25519"].as_str().unwrap();
    assert_eq!(address.len(), 56);
    assert!(address.starts_with('G'));

    let operation = &tx["operations"][0];
    assert_eq!(operation["asset"]["assetCode"], Json::String("KIN".into()));
    assert_eq!(operation["amount"], Json::String("1".into()));

    let signature_entry = &entries[0]["txSet"]["txs"][0]["signatures"][0];
    let hint = signature_entry["hint"].as_str().unwrap();
    assert_eq!(hint.len(), 56);
    assert!(hint.starts_with('G'));
    assert!(hint.ends_with("____"));
    let signature = signature_entry["signature"].as_str().unwrap();
    assert!(!signature.is_empty());

    // txSet's previousLedgerHash formats as 64 lowercase hex chars.
    let hash = entries[0]["txSet"]["previousLedgerHash"].as_str().unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn gzipped_input_is_transparent() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let buffer = build_archive(&[transaction_entry(1, &[1])]);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&buffer).unwrap();
    let compressed = encoder.finish().unwrap();

    let data = decompress_if_gzip(compressed).unwrap();
    assert_eq!(data, buffer);

    let json = parse_json(
        "transactions-0043733f.xdr.gz",
        &data,
        &ParseOptions::default(),
    );
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn ledger_archive_count_rules_apply() {
    let full: Vec<_> = (1..=64).map(ledger_entry).collect();
    let json = parse_json(
        "ledger-0043733f.xdr",
        &build_archive(&full),
        &ParseOptions::default(),
    );
    assert_eq!(json.as_array().unwrap().len(), 64);

    // The first checkpoint holds one record fewer.
    let first: Vec<_> = (1..=63).map(ledger_entry).collect();
    let json = parse_json(
        "ledger-0000003f.xdr",
        &build_archive(&first),
        &ParseOptions::default(),
    );
    assert_eq!(json.as_array().unwrap().len(), 63);

    let err = parse_archive(
        &TagCodec,
        "ledger-0043733f.xdr",
        &build_archive(&first),
        &ParseOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::RecordCountMismatch {
            observed: 63,
            expected: 64
        }
    ));
}

#[test]
fn skip_list_hashes_render_as_hex() {
    let records: Vec<_> = (1..=64).map(ledger_entry).collect();
    let json = parse_json(
        "ledger-0043733f.xdr",
        &build_archive(&records),
        &ParseOptions::default(),
    );
    let skip_list = json[0]["header"]["skipList"].as_array().unwrap();
    assert_eq!(skip_list.len(), 4);
    assert_eq!(skip_list[1], Json::String("01".repeat(32)));
}

#[test]
fn result_codes_resolve_to_names() {
    let json = parse_json(
        "results-0043733f.xdr",
        &build_archive(&[result_entry(5)]),
        &ParseOptions::default(),
    );
    let result = &json[0]["txResultSet"][0]["result"];
    assert_eq!(result["code"], Json::String("txSUCCESS".into()));
    assert_eq!(result["results"][0]["code"], Json::String("opINNER".into()));
    assert_eq!(
        result["results"][0]["paymentResult"]["code"],
        Json::String("PAYMENT_SUCCESS".into())
    );
}

#[test]
fn raw_amount_mode_is_honoured_end_to_end() {
    let buffer = build_archive(&[transaction_entry(1, &[3])]);
    let options = ParseOptions {
        raw_amounts: true,
        ..Default::default()
    };
    let json = parse_json("transactions-0043733f.xdr", &buffer, &options);
    assert_eq!(
        json[0]["txSet"]["txs"][0]["tx"]["operations"][0]["amount"],
        Json::Number(30_000_000.into())
    );
}

#[test]
fn unknown_category_fails_before_decoding() {
    // The buffer is garbage; resolution must fail first.
    let err = parse_archive(
        &TagCodec,
        "snapshots-0043733f.xdr",
        &[0xde, 0xad],
        &ParseOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::UnknownCategory(_)));
}

#[test]
fn corrupt_record_reports_its_index() {
    let mut buffer = build_archive(&[transaction_entry(1, &[1]), transaction_entry(2, &[2])]);
    // Poison the second record's tag byte.
    let first_unit_len =
        4 + u32::from_be_bytes(buffer[..4].try_into().unwrap()) as usize;
    buffer[first_unit_len + 4] = 0x7f;

    let err = parse_archive(
        &TagCodec,
        "transactions-0043733f.xdr",
        &buffer,
        &ParseOptions::default(),
    )
    .unwrap_err();
    match err {
        ParseError::Decode { index, .. } => assert_eq!(index, 1),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn source_account_matches_the_seeded_key() {
    let json = parse_json(
        "transactions-0043733f.xdr",
        &build_archive(&[transaction_entry(1, &[9])]),
        &ParseOptions::default(),
    );
    let address = json[0]["txSet"]["txs"][0]["tx"]["sourceAccount"]["ed25519"]
        .as_str()
        .unwrap()
        .to_string();
    let decoded = xdrwalk::format::strkey::decode_account(&address).unwrap();
    assert_eq!(decoded, test_key(9));
}

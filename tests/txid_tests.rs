use sha2::{Digest, Sha256};
use tx_fingerprint::FingerprintError;
use tx_fingerprint::core::genesis::{
    GENESIS_TX_HEX, GENESIS_TXID, LITECOIN_GENESIS_TX_HEX, LITECOIN_GENESIS_TXID,
};
use tx_fingerprint::core::hash::{Txid, compute_txid, sha256d};

/// Independent double-SHA-256 + reversal, straight on `sha2`.
fn reference_txid(bytes: &[u8]) -> String {
    let first = Sha256::digest(bytes);
    let second = Sha256::digest(first);
    let mut out = second.to_vec();
    out.reverse();
    hex::encode(out)
}

#[test]
fn txid_of_single_zero_byte_matches_reference() {
    let txid = compute_txid("00").unwrap();
    assert_eq!(txid.to_string(), reference_txid(&[0x00]));
    assert_eq!(
        txid.to_string(),
        "9a538906e6466ebd2617d321f71bc94e56056ce213d366773699e28158e00614"
    );
}

#[test]
fn txid_is_deterministic() {
    let a = compute_txid(GENESIS_TX_HEX).unwrap();
    let b = compute_txid(GENESIS_TX_HEX).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn genesis_txid_matches_known_value() {
    let txid = compute_txid(GENESIS_TX_HEX).unwrap();
    assert_eq!(txid.to_string(), GENESIS_TXID);

    let bytes = hex::decode(GENESIS_TX_HEX).unwrap();
    assert_eq!(txid.to_string(), reference_txid(&bytes));
}

/// Coinbase text pushed by the genesis scriptSig (push length at byte 49).
fn coinbase_text(tx: &[u8]) -> &[u8] {
    let push = tx[49] as usize;
    &tx[50..50 + push]
}

#[test]
fn litecoin_genesis_coinbase_matches_historical_txid() {
    let txid = compute_txid(LITECOIN_GENESIS_TX_HEX).unwrap();
    assert_eq!(txid.to_string(), LITECOIN_GENESIS_TXID);
    assert_eq!(
        txid.to_string(),
        "97ddfbbae6be97fd6cdf3e7ca13232a3afff2353e29badfab7f73011edd4ced9"
    );

    let bytes = hex::decode(LITECOIN_GENESIS_TX_HEX).unwrap();
    assert_eq!(
        coinbase_text(&bytes),
        "NY Times 05/Oct/2011 Steve Jobs, Apple\u{2019}s Visionary, Dies at 56".as_bytes()
    );
}

#[test]
fn reference_literal_is_one_byte_short_of_historical_coinbase() {
    let short = hex::decode(GENESIS_TX_HEX).unwrap();
    let full = hex::decode(LITECOIN_GENESIS_TX_HEX).unwrap();
    assert_eq!(short.len() + 1, full.len());

    // The 64-byte push runs one byte into the sequence field.
    let text = coinbase_text(&short);
    assert!(text.starts_with(b"NY Times 05/Oct/2011 Stev Jobs"));
    assert_eq!(text.last(), Some(&0xff));

    assert_ne!(compute_txid(GENESIS_TX_HEX).unwrap().to_string(), LITECOIN_GENESIS_TXID);
}

#[test]
fn txid_display_is_reversed_digest() {
    let txid = compute_txid("00").unwrap();
    let mut expected = sha256d(&[0x00]);
    expected.reverse();
    assert_eq!(txid.to_display_bytes(), expected);
    assert_eq!(txid.as_bytes(), &sha256d(&[0x00]));
}

#[test]
fn txid_ignores_case_and_surrounding_whitespace() {
    let lower = compute_txid("ff00ab").unwrap();
    let upper = compute_txid("  FF00AB\n").unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn odd_length_hex_is_invalid_input() {
    let err = compute_txid("abc").unwrap_err();
    assert!(
        matches!(err, FingerprintError::InvalidInput(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn non_hex_characters_are_invalid_input() {
    let err = compute_txid("zz").unwrap_err();
    assert!(matches!(err, FingerprintError::InvalidInput(_)));
}

#[test]
fn txid_parses_back_from_display_form() {
    let txid: Txid = GENESIS_TXID.parse().unwrap();
    assert_eq!(txid.to_string(), GENESIS_TXID);
    assert_eq!(txid, compute_txid(GENESIS_TX_HEX).unwrap());
}

#[test]
fn txid_parse_rejects_wrong_length() {
    let err = "deadbeef".parse::<Txid>().unwrap_err().to_string();
    assert!(err.contains("invalid transaction hex"), "unexpected error: {err}");
}

#[test]
fn txid_serializes_as_display_string() {
    let txid: Txid = GENESIS_TXID.parse().unwrap();
    let v = serde_json::to_value(txid).unwrap();
    assert_eq!(v, serde_json::Value::String(GENESIS_TXID.to_string()));
}

#[test]
fn uppercase_txid_is_displayed_lowercase() {
    let txid: Txid = GENESIS_TXID.to_uppercase().parse().unwrap();
    assert_eq!(txid.to_string(), GENESIS_TXID);
}

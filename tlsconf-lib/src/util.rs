//! Shared encoding and naming utilities.

use crate::oid;

/// Format bytes as colon-separated uppercase hex (e.g., "AB:CD:EF").
pub fn hex_colon_upper(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Normalize a fingerprint string for comparison: drop `:`, whitespace and
/// case so "AB:CD" and "abcd" compare equal.
pub fn normalize_fingerprint(fingerprint: &str) -> String {
    fingerprint
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Check whether input looks like PEM (begins with `-----BEGIN`).
pub fn is_pem(input: &[u8]) -> bool {
    let trimmed = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .and_then(|start| input.get(start..))
        .unwrap_or_default();
    trimmed.starts_with(b"-----BEGIN")
}

/// Map a distinguished-name attribute OID to its short name.
pub fn oid_short_name(oid_str: &str) -> String {
    match oid_str {
        oid::COMMON_NAME => "CN".into(),
        oid::COUNTRY => "C".into(),
        oid::LOCALITY => "L".into(),
        oid::STATE_OR_PROVINCE => "ST".into(),
        oid::ORGANIZATION => "O".into(),
        oid::ORGANIZATIONAL_UNIT => "OU".into(),
        oid::SERIAL_NUMBER => "serialNumber".into(),
        oid::EMAIL_ADDRESS => "emailAddress".into(),
        other => other.to_string(),
    }
}

//! Small helper functions for certificate checks.
//!
//! Role classification, whole-year arithmetic and signature-scheme matching.

use crate::fields::{CertificateInfo, SignatureFamily, SignatureInfo};
use std::fmt;
use time::OffsetDateTime;

/// Role that decides which validity ceiling applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainRole {
    EndEntity,
    IntermediateCa,
    RootCa,
}

impl ChainRole {
    /// Exclusive upper bound on the number of full validity years.
    pub fn max_validity_years(self) -> i32 {
        match self {
            Self::RootCa => 6,
            Self::IntermediateCa => 5,
            Self::EndEntity => 3,
        }
    }
}

impl fmt::Display for ChainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EndEntity => "end-entity certificate",
            Self::IntermediateCa => "intermediate CA certificate",
            Self::RootCa => "root CA certificate",
        })
    }
}

/// A certificate is a CA iff BasicConstraints asserts cA; a self-issued CA
/// is a root.
pub fn validity_role(cert: &CertificateInfo) -> ChainRole {
    match (cert.is_ca(), cert.self_issued) {
        (true, true) => ChainRole::RootCa,
        (true, false) => ChainRole::IntermediateCa,
        (false, _) => ChainRole::EndEntity,
    }
}

/// Number of complete years between two instants.
///
/// The calendar-year difference is reduced by one unless `not_after` falls on
/// a later day of the year than `not_before`.
pub fn full_years(not_before: OffsetDateTime, not_after: OffsetDateTime) -> i32 {
    let years = not_after.year() - not_before.year();
    if not_before.ordinal() >= not_after.ordinal() {
        years - 1
    } else {
        years
    }
}

pub fn contains_wildcard(name: &str) -> bool {
    name.contains('*')
}

/// `<sig>With<hash>`, the TLS 1.2 naming of a signature algorithm.
pub fn tls12_signature_name(signature: &SignatureInfo) -> Option<String> {
    let family = signature.family?;
    let hash = signature.hash.as_deref()?;
    Some(format!("{}With{}", family.tls12_name(), hash))
}

/// Whether a TLS 1.2 table description names this certificate signature.
pub fn matches_tls12(description: &str, signature: &SignatureInfo) -> bool {
    tls12_signature_name(signature).is_some_and(|name| name.eq_ignore_ascii_case(description))
}

/// Whether a TLS 1.3 SignatureScheme name (e.g. `ecdsa_secp256r1_sha256`)
/// names this certificate signature.
pub fn matches_tls13(description: &str, signature: &SignatureInfo) -> bool {
    let description = description.to_ascii_lowercase();
    match (signature.family, signature.hash.as_deref()) {
        (Some(family @ (SignatureFamily::Ed25519 | SignatureFamily::Ed448)), _) => {
            description == family.tls13_prefix()
        }
        (Some(family), Some(hash)) => {
            description.starts_with(family.tls13_prefix()) && description.ends_with(hash)
        }
        _ => false,
    }
}

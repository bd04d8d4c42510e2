//! tlsconf-lib: Library for verifying TLS implementations against a
//! normative conformance specification.
//!
//! Provides the checklist evaluator that compares a declared capability
//! profile with REQUIRED/FORBIDDEN/AT_LEAST_ONE/OPTIONAL requirement tables,
//! a codec for TLS extension records, and validation of the declared
//! X.509 certificate chain.

pub mod certificate;
pub mod checklist;
mod extensions;
mod fields;
mod fingerprint;
mod model;
mod oid;
mod parser;
mod registry;
mod restriction;
mod util;
mod verdict;

pub use certificate::{
    assemble_chain, run_chain_checks, verify_certificates, ChainCertificate, ChainOptions,
    ReachabilityProbe, RevocationLists, TcpProbe,
};
pub use checklist::{run_checklist, ChecklistOptions};
pub use extensions::{
    decode, decode_block, encode, encode_block, find_first, types_present, ExtensionError,
    ExtensionRecord, RECORD_HEADER_LEN,
};
pub use fields::{
    AiaEntry, CertificateInfo, DateTime, DigestAlgorithm, DistinguishedName, Extension,
    ExtensionValue, KeyAlgorithm, KeyUsageFlags, PublicKeyInfo, RevocationList,
    RevokedCertificate, SanEntry, SignatureFamily, SignatureInfo,
};
pub use fingerprint::{compute_fingerprint, detect_algorithm, fingerprint_matches};
pub use model::{
    format_duration, parse_duration, ApplicationRole, ChainEntry, DutProfile, DutVersionProfile,
    TlsSpecification, VersionSpecification,
};
pub use parser::{parse_cert, parse_crls, parse_der, parse_pem};
pub use registry::{
    ExtensionType, NamedGroup, TlsVersion, PSK_CIPHER_SUITE_KINDS,
    TLS_EMPTY_RENEGOTIATION_INFO_SCSV,
};
pub use restriction::{
    KeyLengthRequirement, KeyLengthTable, KeyLengthWindow, RestrictionLevel, SpecEntry, SpecTable,
    UseUntil,
};
pub use verdict::{
    to_json, DiagnosticSink, Finding, Findings, MemorySink, Severity, TracingSink, Verdict,
};

/// Errors returned by tlsconf-lib.
#[derive(Debug, thiserror::Error)]
pub enum ConformanceError {
    #[error("Failed to parse certificate: {0}")]
    ParseError(String),

    #[error("Invalid PEM format: {0}")]
    PemError(String),

    #[error("Invalid DER format: {0}")]
    DerError(String),

    #[error("Malformed extension block: {0}")]
    Extensions(#[from] ExtensionError),

    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),

    #[error("Duplicate requirement entry: {0}")]
    DuplicateEntry(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

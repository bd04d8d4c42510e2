//! Centralized OID string constants used throughout tlsconf-lib.
//!
//! Only the identifiers the conformance checks actually look at are listed:
//! subject attributes used for naming, the signature and key algorithms that
//! decide key-length and signature-scheme rules, the named curves whose order
//! gives an ECDSA key its size, and the extensions inspected per chain role.

// ── X.509 Distinguished Name attributes (RFC 4519 / X.520) ──────────────

pub const COMMON_NAME: &str = "2.5.4.3";
pub const COUNTRY: &str = "2.5.4.6";
pub const LOCALITY: &str = "2.5.4.7";
pub const STATE_OR_PROVINCE: &str = "2.5.4.8";
pub const ORGANIZATION: &str = "2.5.4.10";
pub const ORGANIZATIONAL_UNIT: &str = "2.5.4.11";
pub const SERIAL_NUMBER: &str = "2.5.4.5";
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1"; // PKCS#9

// ── Signature algorithms ─────────────────────────────────────────────────

pub const SHA1_WITH_RSA: &str = "1.2.840.113549.1.1.5";
pub const SHA224_WITH_RSA: &str = "1.2.840.113549.1.1.14";
pub const SHA256_WITH_RSA: &str = "1.2.840.113549.1.1.11";
pub const SHA384_WITH_RSA: &str = "1.2.840.113549.1.1.12";
pub const SHA512_WITH_RSA: &str = "1.2.840.113549.1.1.13";
pub const RSASSA_PSS: &str = "1.2.840.113549.1.1.10";
pub const ECDSA_WITH_SHA1: &str = "1.2.840.10045.4.1";
pub const ECDSA_WITH_SHA224: &str = "1.2.840.10045.4.3.1";
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
pub const ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";
pub const DSA_WITH_SHA1: &str = "1.2.840.10040.4.3";
pub const DSA_WITH_SHA224: &str = "2.16.840.1.101.3.4.3.1";
pub const DSA_WITH_SHA256: &str = "2.16.840.1.101.3.4.3.2";
pub const ED25519: &str = "1.3.101.112";
pub const ED448: &str = "1.3.101.113";

// ── Hash algorithms (RSASSA-PSS parameters, RFC 4055) ────────────────────

pub const HASH_SHA1: &str = "1.3.14.3.2.26";
pub const HASH_SHA224: &str = "2.16.840.1.101.3.4.2.4";
pub const HASH_SHA256: &str = "2.16.840.1.101.3.4.2.1";
pub const HASH_SHA384: &str = "2.16.840.1.101.3.4.2.2";
pub const HASH_SHA512: &str = "2.16.840.1.101.3.4.2.3";

// ── Public key types ─────────────────────────────────────────────────────

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const DSA: &str = "1.2.840.10040.4.1";

// ── Named elliptic curves ────────────────────────────────────────────────

pub const CURVE_P192: &str = "1.2.840.10045.3.1.1";
pub const CURVE_P224: &str = "1.3.132.0.33";
pub const CURVE_P256: &str = "1.2.840.10045.3.1.7";
pub const CURVE_P384: &str = "1.3.132.0.34";
pub const CURVE_P521: &str = "1.3.132.0.35";
pub const CURVE_SECP256K1: &str = "1.3.132.0.10";
pub const CURVE_BRAINPOOL_P256R1: &str = "1.3.36.3.3.2.8.1.1.7";
pub const CURVE_BRAINPOOL_P384R1: &str = "1.3.36.3.3.2.8.1.1.11";
pub const CURVE_BRAINPOOL_P512R1: &str = "1.3.36.3.3.2.8.1.1.13";

// ── X.509v3 extensions (RFC 5280 Section 4.2) ───────────────────────────

pub const EXT_CRL_DISTRIBUTION_POINTS: &str = "2.5.29.31";

// ── PKIX Authority Information Access (RFC 5280 Section 4.2.2.1) ────────

pub const EXT_AUTHORITY_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.1";
pub const ACCESS_OCSP: &str = "1.3.6.1.5.5.7.48.1";
pub const ACCESS_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";

// ── Extended Key Usage values (RFC 5280 Section 4.2.1.12) ────────────────

pub const EKU_SERVER_AUTH: &str = "1.3.6.1.5.5.7.3.1";
pub const EKU_CLIENT_AUTH: &str = "1.3.6.1.5.5.7.3.2";
pub const EKU_CODE_SIGNING: &str = "1.3.6.1.5.5.7.3.3";
pub const EKU_EMAIL_PROTECTION: &str = "1.3.6.1.5.5.7.3.4";
pub const EKU_TIME_STAMPING: &str = "1.3.6.1.5.5.7.3.8";
pub const EKU_OCSP_SIGNING: &str = "1.3.6.1.5.5.7.3.9";
pub const EKU_ANY: &str = "2.5.29.37.0";

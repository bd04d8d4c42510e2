//! Certificate data types and field extraction.

use crate::oid;
use serde::Serialize;

/// Digest algorithm for fingerprint computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
    Sha1,
}

/// A parsed X.509 certificate reduced to the fields conformance rules read.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateInfo {
    /// Serial number as a colon-separated hex string.
    pub serial: String,
    pub signature: SignatureInfo,
    pub issuer: DistinguishedName,
    pub subject: DistinguishedName,
    pub not_before: DateTime,
    pub not_after: DateTime,
    pub public_key: PublicKeyInfo,
    pub extensions: Vec<Extension>,
    /// Subject and issuer encodings are byte-identical.
    pub self_issued: bool,

    /// Raw DER bytes of the entire certificate (for fingerprint computation).
    #[serde(skip)]
    pub raw_der: Vec<u8>,
}

/// Distinguished name with ordered components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistinguishedName {
    /// Ordered list of (attribute_type, value) pairs.
    /// Attribute types use short names where known (e.g., "CN", "O", "C").
    pub components: Vec<(String, String)>,
}

impl DistinguishedName {
    /// Format as a comma-separated one-line string.
    /// Example: "C = US, O = Org, CN = example.com"
    ///
    /// Values containing commas, equals signs, or backslashes are escaped.
    pub fn to_oneline(&self) -> String {
        let mut result = String::new();
        for (i, (k, v)) in self.components.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            result.push_str(k);
            result.push_str(" = ");
            for ch in v.chars() {
                match ch {
                    '\\' => result.push_str("\\\\"),
                    ',' => result.push_str("\\,"),
                    '=' => result.push_str("\\="),
                    _ => result.push(ch),
                }
            }
        }
        result
    }

    /// Values of every attribute with the given short name.
    pub fn values(&self, short_name: &str) -> impl Iterator<Item = &str> {
        let short_name = short_name.to_string();
        self.components
            .iter()
            .filter(move |(k, _)| *k == short_name)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_oneline())
    }
}

/// Public-key algorithm family, named as key-length tables name them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeyAlgorithm {
    Rsa,
    Ecdsa,
    Dsa,
    Ed25519,
    Ed448,
    /// Anything else, by OID.
    Other(String),
}

impl KeyAlgorithm {
    pub fn name(&self) -> &str {
        match self {
            Self::Rsa => "RSA",
            Self::Ecdsa => "ECDSA",
            Self::Dsa => "DSA",
            Self::Ed25519 => "Ed25519",
            Self::Ed448 => "Ed448",
            Self::Other(oid) => oid,
        }
    }
}

/// Public key information.
#[derive(Debug, Clone, Serialize)]
pub struct PublicKeyInfo {
    pub algorithm: KeyAlgorithm,
    /// Modulus bits (RSA), curve order bits (ECDSA), prime `p` bits (DSA).
    /// `None` when it cannot be derived.
    pub key_bits: Option<u32>,
    /// Named curve for EC keys (e.g., "P-256", "brainpoolP384r1").
    pub curve: Option<String>,
}

/// Signature scheme family of a certificate signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignatureFamily {
    Rsa,
    RsaPss,
    Ecdsa,
    Dsa,
    Ed25519,
    Ed448,
}

impl SignatureFamily {
    /// Name used in TLS 1.2 `<sig>With<hash>` descriptions.
    pub fn tls12_name(self) -> &'static str {
        match self {
            Self::Rsa | Self::RsaPss => "rsa",
            Self::Ecdsa => "ecdsa",
            Self::Dsa => "dsa",
            Self::Ed25519 => "ed25519",
            Self::Ed448 => "ed448",
        }
    }

    /// Prefix of the matching TLS 1.3 SignatureScheme names.
    pub fn tls13_prefix(self) -> &'static str {
        match self {
            Self::Rsa => "rsa_pkcs1",
            Self::RsaPss => "rsa_pss",
            Self::Ecdsa => "ecdsa",
            Self::Dsa => "dsa",
            Self::Ed25519 => "ed25519",
            Self::Ed448 => "ed448",
        }
    }
}

/// Certificate signature algorithm, split into scheme and digest.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureInfo {
    pub oid: String,
    /// Conventional name, e.g. "sha256WithRSAEncryption".
    pub name: String,
    pub family: Option<SignatureFamily>,
    /// Digest name in lowercase, e.g. "sha256". `None` for EdDSA and unknown OIDs.
    pub hash: Option<String>,
}

/// A certificate extension.
#[derive(Debug, Clone, Serialize)]
pub struct Extension {
    /// OID as a dotted-decimal string.
    pub oid: String,
    pub critical: bool,
    pub value: ExtensionValue,
}

/// KeyUsage bits (RFC 5280 Section 4.2.1.3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyUsageFlags {
    pub digital_signature: bool,
    pub non_repudiation: bool,
    pub key_encipherment: bool,
    pub data_encipherment: bool,
    pub key_agreement: bool,
    pub key_cert_sign: bool,
    pub crl_sign: bool,
    pub encipher_only: bool,
    pub decipher_only: bool,
}

/// Strongly-typed extension values.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ExtensionValue {
    BasicConstraints {
        ca: bool,
        path_len: Option<u32>,
    },
    KeyUsage(KeyUsageFlags),
    /// Purpose OIDs in dotted form.
    ExtendedKeyUsage(Vec<String>),
    SubjectAltName(Vec<SanEntry>),
    AuthorityInfoAccess(Vec<AiaEntry>),
    /// Full-name URIs of every distribution point.
    CrlDistributionPoints(Vec<String>),
    /// Fallback for extensions we don't parse into a specific variant.
    Raw(String),
}

/// Subject Alternative Name entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum SanEntry {
    Dns(String),
    Email(String),
    Ip(String),
    Uri(String),
    DirName(String),
    Other(String),
}

impl SanEntry {
    pub fn value(&self) -> &str {
        match self {
            Self::Dns(v)
            | Self::Email(v)
            | Self::Ip(v)
            | Self::Uri(v)
            | Self::DirName(v)
            | Self::Other(v) => v,
        }
    }
}

/// Authority Information Access entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiaEntry {
    /// Access method: "OCSP" or "CA Issuers".
    pub method: String,
    /// Access location (usually a URI).
    pub location: String,
}

/// A certificate revocation list reduced to what the status check reads.
#[derive(Debug, Clone, Serialize)]
pub struct RevocationList {
    pub issuer: DistinguishedName,
    /// `thisUpdate` as a Unix timestamp.
    pub this_update: i64,
    /// `nextUpdate` as a Unix timestamp, when present.
    pub next_update: Option<i64>,
    pub revoked: Vec<RevokedCertificate>,
}

impl RevocationList {
    /// Whether the list is in force at `now`.
    pub fn is_current(&self, now: i64) -> bool {
        self.this_update <= now && self.next_update.map_or(true, |next| now <= next)
    }

    pub fn find(&self, serial: &str) -> Option<&RevokedCertificate> {
        self.revoked.iter().find(|entry| entry.serial == serial)
    }
}

/// One entry of a revocation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevokedCertificate {
    /// Serial number, formatted like [`CertificateInfo::serial`].
    pub serial: String,
    /// RFC 5280 reason name; `unspecified` when the entry carries none.
    pub reason: String,
}

/// Date-time representation.
#[derive(Debug, Clone, Serialize)]
pub struct DateTime {
    /// ISO 8601 formatted string.
    pub iso8601: String,
    /// Unix timestamp.
    pub timestamp: i64,
}

impl DateTime {
    pub fn from_timestamp(timestamp: i64) -> Self {
        let iso8601 = match ::time::OffsetDateTime::from_unix_timestamp(timestamp) {
            Ok(dt) => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                dt.year(),
                u8::from(dt.month()),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Err(_) => format!("{}", timestamp),
        };
        Self { iso8601, timestamp }
    }

    pub fn to_offset(&self) -> Option<::time::OffsetDateTime> {
        ::time::OffsetDateTime::from_unix_timestamp(self.timestamp).ok()
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.iso8601)
    }
}

impl CertificateInfo {
    /// Return the subject as a one-line string.
    pub fn subject_string(&self) -> String {
        self.subject.to_oneline()
    }

    /// Return the issuer as a one-line string.
    pub fn issuer_string(&self) -> String {
        self.issuer.to_oneline()
    }

    /// Compute the fingerprint of the certificate DER using the given digest algorithm.
    pub fn fingerprint(&self, algorithm: DigestAlgorithm) -> String {
        crate::fingerprint::compute_fingerprint(&self.raw_der, algorithm)
    }

    /// Find an extension by OID.
    pub fn extension(&self, oid: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.oid == oid)
    }

    /// Subject Common Name values.
    pub fn common_names(&self) -> Vec<&str> {
        self.subject.values("CN").collect()
    }

    /// Extract all SAN entries.
    pub fn san_entries(&self) -> Vec<&SanEntry> {
        self.extensions
            .iter()
            .find_map(|ext| match &ext.value {
                ExtensionValue::SubjectAltName(entries) => Some(entries.iter().collect()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// DNS-type SAN entries.
    pub fn san_dns_names(&self) -> Vec<&str> {
        self.san_entries()
            .into_iter()
            .filter_map(|entry| match entry {
                SanEntry::Dns(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// BasicConstraints as `(critical, ca, path_len)`.
    pub fn basic_constraints(&self) -> Option<(bool, bool, Option<u32>)> {
        self.extensions.iter().find_map(|ext| match ext.value {
            ExtensionValue::BasicConstraints { ca, path_len } => Some((ext.critical, ca, path_len)),
            _ => None,
        })
    }

    /// KeyUsage as `(critical, flags)`.
    pub fn key_usage(&self) -> Option<(bool, KeyUsageFlags)> {
        self.extensions.iter().find_map(|ext| match ext.value {
            ExtensionValue::KeyUsage(flags) => Some((ext.critical, flags)),
            _ => None,
        })
    }

    /// Extended Key Usage purpose OIDs, if the extension is present.
    pub fn ext_key_usage(&self) -> Option<&[String]> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::ExtendedKeyUsage(oids) => Some(oids.as_slice()),
            _ => None,
        })
    }

    /// BasicConstraints present with the cA flag set.
    pub fn is_ca(&self) -> bool {
        self.basic_constraints().is_some_and(|(_, ca, _)| ca)
    }

    /// Self-issued and a CA: the root of a chain.
    pub fn is_root(&self) -> bool {
        self.self_issued && self.is_ca()
    }

    /// CRL distribution point URIs.
    pub fn crl_urls(&self) -> Vec<&str> {
        self.extensions
            .iter()
            .filter_map(|ext| match &ext.value {
                ExtensionValue::CrlDistributionPoints(uris) => Some(uris),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// AIA locations (OCSP responders and CA issuers).
    pub fn aia_urls(&self) -> Vec<&str> {
        self.extensions
            .iter()
            .filter_map(|ext| match &ext.value {
                ExtensionValue::AuthorityInfoAccess(entries) => Some(entries),
                _ => None,
            })
            .flatten()
            .map(|entry| entry.location.as_str())
            .collect()
    }

    /// Whether a CRL distribution point or AIA extension is present at all.
    pub fn has_revocation_extension(&self) -> bool {
        self.extension(oid::EXT_CRL_DISTRIBUTION_POINTS).is_some()
            || self.extension(oid::EXT_AUTHORITY_INFO_ACCESS).is_some()
    }
}

//! IANA TLS registries used as static lookup data.
//!
//! The closed protocol enumerations (versions, extension types, named groups)
//! are plain enums with their code points and display names attached, so the
//! rule engine compares explicit fields instead of matching on strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signaling-only cipher suite value. Not a real cipher; excluded from
/// priority ordering.
pub const TLS_EMPTY_RENEGOTIATION_INFO_SCSV: &str = "TLS_EMPTY_RENEGOTIATION_INFO_SCSV";

/// Cipher-suite categories that are not demanded by TLS 1.2 REQUIRED rows.
pub const PSK_CIPHER_SUITE_KINDS: &[&str] = &[
    "PSK-based-CipherSuites",
    "PSK-and-certificate-based-CipherSuites",
];

/// Protocol versions a DUT may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TlsVersion {
    #[serde(rename = "TLSv1.0", alias = "TLS_V1_0")]
    Tls10,
    #[serde(rename = "TLSv1.1", alias = "TLS_V1_1")]
    Tls11,
    #[serde(rename = "TLSv1.2", alias = "TLS_V1_2")]
    Tls12,
    #[serde(rename = "TLSv1.3", alias = "TLS_V1_3")]
    Tls13,
}

impl TlsVersion {
    pub const ALL: [TlsVersion; 4] = [Self::Tls10, Self::Tls11, Self::Tls12, Self::Tls13];

    pub fn name(self) -> &'static str {
        match self {
            Self::Tls10 => "TLSv1.0",
            Self::Tls11 => "TLSv1.1",
            Self::Tls12 => "TLSv1.2",
            Self::Tls13 => "TLSv1.3",
        }
    }

    /// Wire value of `ProtocolVersion`.
    pub fn code(self) -> u16 {
        match self {
            Self::Tls10 => 0x0301,
            Self::Tls11 => 0x0302,
            Self::Tls12 => 0x0303,
            Self::Tls13 => 0x0304,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

impl fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// TLS ExtensionType registry entries (RFC 8446 Section 4.2 and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionType {
    ServerName,
    MaxFragmentLength,
    ClientCertificateUrl,
    TrustedCaKeys,
    TruncatedHmac,
    StatusRequest,
    SupportedGroups,
    EcPointFormats,
    SignatureAlgorithms,
    UseSrtp,
    Heartbeat,
    ApplicationLayerProtocolNegotiation,
    StatusRequestV2,
    SignedCertificateTimestamp,
    Padding,
    EncryptThenMac,
    ExtendedMasterSecret,
    SessionTicket,
    PreSharedKey,
    EarlyData,
    SupportedVersions,
    Cookie,
    PskKeyExchangeModes,
    CertificateAuthorities,
    OidFilters,
    PostHandshakeAuth,
    SignatureAlgorithmsCert,
    KeyShare,
    RenegotiationInfo,
}

const UP_TO_TLS12: &[TlsVersion] = &[TlsVersion::Tls10, TlsVersion::Tls11, TlsVersion::Tls12];
const TLS12_AND_13: &[TlsVersion] = &[TlsVersion::Tls12, TlsVersion::Tls13];
const TLS13_ONLY: &[TlsVersion] = &[TlsVersion::Tls13];
const ALL_VERSIONS: &[TlsVersion] = &TlsVersion::ALL;

impl ExtensionType {
    pub const ALL: [ExtensionType; 29] = [
        Self::ServerName,
        Self::MaxFragmentLength,
        Self::ClientCertificateUrl,
        Self::TrustedCaKeys,
        Self::TruncatedHmac,
        Self::StatusRequest,
        Self::SupportedGroups,
        Self::EcPointFormats,
        Self::SignatureAlgorithms,
        Self::UseSrtp,
        Self::Heartbeat,
        Self::ApplicationLayerProtocolNegotiation,
        Self::StatusRequestV2,
        Self::SignedCertificateTimestamp,
        Self::Padding,
        Self::EncryptThenMac,
        Self::ExtendedMasterSecret,
        Self::SessionTicket,
        Self::PreSharedKey,
        Self::EarlyData,
        Self::SupportedVersions,
        Self::Cookie,
        Self::PskKeyExchangeModes,
        Self::CertificateAuthorities,
        Self::OidFilters,
        Self::PostHandshakeAuth,
        Self::SignatureAlgorithmsCert,
        Self::KeyShare,
        Self::RenegotiationInfo,
    ];

    pub fn code(self) -> u16 {
        match self {
            Self::ServerName => 0x0000,
            Self::MaxFragmentLength => 0x0001,
            Self::ClientCertificateUrl => 0x0002,
            Self::TrustedCaKeys => 0x0003,
            Self::TruncatedHmac => 0x0004,
            Self::StatusRequest => 0x0005,
            Self::SupportedGroups => 0x000A,
            Self::EcPointFormats => 0x000B,
            Self::SignatureAlgorithms => 0x000D,
            Self::UseSrtp => 0x000E,
            Self::Heartbeat => 0x000F,
            Self::ApplicationLayerProtocolNegotiation => 0x0010,
            Self::StatusRequestV2 => 0x0011,
            Self::SignedCertificateTimestamp => 0x0012,
            Self::Padding => 0x0015,
            Self::EncryptThenMac => 0x0016,
            Self::ExtendedMasterSecret => 0x0017,
            Self::SessionTicket => 0x0023,
            Self::PreSharedKey => 0x0029,
            Self::EarlyData => 0x002A,
            Self::SupportedVersions => 0x002B,
            Self::Cookie => 0x002C,
            Self::PskKeyExchangeModes => 0x002D,
            Self::CertificateAuthorities => 0x002F,
            Self::OidFilters => 0x0030,
            Self::PostHandshakeAuth => 0x0031,
            Self::SignatureAlgorithmsCert => 0x0032,
            Self::KeyShare => 0x0033,
            Self::RenegotiationInfo => 0xFF01,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ServerName => "server_name",
            Self::MaxFragmentLength => "max_fragment_length",
            Self::ClientCertificateUrl => "client_certificate_url",
            Self::TrustedCaKeys => "trusted_ca_keys",
            Self::TruncatedHmac => "truncated_hmac",
            Self::StatusRequest => "status_request",
            Self::SupportedGroups => "supported_groups",
            Self::EcPointFormats => "ec_point_formats",
            Self::SignatureAlgorithms => "signature_algorithms",
            Self::UseSrtp => "use_srtp",
            Self::Heartbeat => "heartbeat",
            Self::ApplicationLayerProtocolNegotiation => "application_layer_protocol_negotiation",
            Self::StatusRequestV2 => "status_request_v2",
            Self::SignedCertificateTimestamp => "signed_certificate_timestamp",
            Self::Padding => "padding",
            Self::EncryptThenMac => "encrypt_then_mac",
            Self::ExtendedMasterSecret => "extended_master_secret",
            Self::SessionTicket => "session_ticket",
            Self::PreSharedKey => "pre_shared_key",
            Self::EarlyData => "early_data",
            Self::SupportedVersions => "supported_versions",
            Self::Cookie => "cookie",
            Self::PskKeyExchangeModes => "psk_key_exchange_modes",
            Self::CertificateAuthorities => "certificate_authorities",
            Self::OidFilters => "oid_filters",
            Self::PostHandshakeAuth => "post_handshake_auth",
            Self::SignatureAlgorithmsCert => "signature_algorithms_cert",
            Self::KeyShare => "key_share",
            Self::RenegotiationInfo => "renegotiation_info",
        }
    }

    /// Protocol versions in which the extension may appear.
    pub fn versions(self) -> &'static [TlsVersion] {
        match self {
            Self::TruncatedHmac
            | Self::EcPointFormats
            | Self::EncryptThenMac
            | Self::ExtendedMasterSecret
            | Self::SessionTicket
            | Self::StatusRequestV2
            | Self::RenegotiationInfo => UP_TO_TLS12,
            Self::PreSharedKey
            | Self::EarlyData
            | Self::SupportedVersions
            | Self::Cookie
            | Self::PskKeyExchangeModes
            | Self::CertificateAuthorities
            | Self::OidFilters
            | Self::PostHandshakeAuth
            | Self::KeyShare => TLS13_ONLY,
            Self::SignatureAlgorithmsCert => TLS12_AND_13,
            _ => ALL_VERSIONS,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

/// TLS Supported Groups registry entries (RFC 8422, RFC 7919, RFC 8446, RFC 8734).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedGroup {
    Sect163k1,
    Sect163r1,
    Sect163r2,
    Sect193r1,
    Sect193r2,
    Sect233k1,
    Sect233r1,
    Sect239k1,
    Sect283k1,
    Sect283r1,
    Sect409k1,
    Sect409r1,
    Sect571k1,
    Sect571r1,
    Secp160k1,
    Secp160r1,
    Secp160r2,
    Secp192k1,
    Secp192r1,
    Secp224k1,
    Secp224r1,
    Secp256k1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
    BrainpoolP256r1,
    BrainpoolP384r1,
    BrainpoolP512r1,
    X25519,
    X448,
    BrainpoolP256r1Tls13,
    BrainpoolP384r1Tls13,
    BrainpoolP512r1Tls13,
    Ffdhe2048,
    Ffdhe3072,
    Ffdhe4096,
    Ffdhe6144,
    Ffdhe8192,
}

impl NamedGroup {
    pub const ALL: [NamedGroup; 38] = [
        Self::Sect163k1,
        Self::Sect163r1,
        Self::Sect163r2,
        Self::Sect193r1,
        Self::Sect193r2,
        Self::Sect233k1,
        Self::Sect233r1,
        Self::Sect239k1,
        Self::Sect283k1,
        Self::Sect283r1,
        Self::Sect409k1,
        Self::Sect409r1,
        Self::Sect571k1,
        Self::Sect571r1,
        Self::Secp160k1,
        Self::Secp160r1,
        Self::Secp160r2,
        Self::Secp192k1,
        Self::Secp192r1,
        Self::Secp224k1,
        Self::Secp224r1,
        Self::Secp256k1,
        Self::Secp256r1,
        Self::Secp384r1,
        Self::Secp521r1,
        Self::BrainpoolP256r1,
        Self::BrainpoolP384r1,
        Self::BrainpoolP512r1,
        Self::X25519,
        Self::X448,
        Self::BrainpoolP256r1Tls13,
        Self::BrainpoolP384r1Tls13,
        Self::BrainpoolP512r1Tls13,
        Self::Ffdhe2048,
        Self::Ffdhe3072,
        Self::Ffdhe4096,
        Self::Ffdhe6144,
        Self::Ffdhe8192,
    ];

    /// Wire code point.
    pub fn code(self) -> u16 {
        match self {
            Self::Sect163k1 => 0x0001,
            Self::Sect163r1 => 0x0002,
            Self::Sect163r2 => 0x0003,
            Self::Sect193r1 => 0x0004,
            Self::Sect193r2 => 0x0005,
            Self::Sect233k1 => 0x0006,
            Self::Sect233r1 => 0x0007,
            Self::Sect239k1 => 0x0008,
            Self::Sect283k1 => 0x0009,
            Self::Sect283r1 => 0x000A,
            Self::Sect409k1 => 0x000B,
            Self::Sect409r1 => 0x000C,
            Self::Sect571k1 => 0x000D,
            Self::Sect571r1 => 0x000E,
            Self::Secp160k1 => 0x000F,
            Self::Secp160r1 => 0x0010,
            Self::Secp160r2 => 0x0011,
            Self::Secp192k1 => 0x0012,
            Self::Secp192r1 => 0x0013,
            Self::Secp224k1 => 0x0014,
            Self::Secp224r1 => 0x0015,
            Self::Secp256k1 => 0x0016,
            Self::Secp256r1 => 0x0017,
            Self::Secp384r1 => 0x0018,
            Self::Secp521r1 => 0x0019,
            Self::BrainpoolP256r1 => 0x001A,
            Self::BrainpoolP384r1 => 0x001B,
            Self::BrainpoolP512r1 => 0x001C,
            Self::X25519 => 0x001D,
            Self::X448 => 0x001E,
            Self::BrainpoolP256r1Tls13 => 0x001F,
            Self::BrainpoolP384r1Tls13 => 0x0020,
            Self::BrainpoolP512r1Tls13 => 0x0021,
            Self::Ffdhe2048 => 0x0100,
            Self::Ffdhe3072 => 0x0101,
            Self::Ffdhe4096 => 0x0102,
            Self::Ffdhe6144 => 0x0103,
            Self::Ffdhe8192 => 0x0104,
        }
    }

    /// IANA name, as written in specification tables.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sect163k1 => "sect163k1",
            Self::Sect163r1 => "sect163r1",
            Self::Sect163r2 => "sect163r2",
            Self::Sect193r1 => "sect193r1",
            Self::Sect193r2 => "sect193r2",
            Self::Sect233k1 => "sect233k1",
            Self::Sect233r1 => "sect233r1",
            Self::Sect239k1 => "sect239k1",
            Self::Sect283k1 => "sect283k1",
            Self::Sect283r1 => "sect283r1",
            Self::Sect409k1 => "sect409k1",
            Self::Sect409r1 => "sect409r1",
            Self::Sect571k1 => "sect571k1",
            Self::Sect571r1 => "sect571r1",
            Self::Secp160k1 => "secp160k1",
            Self::Secp160r1 => "secp160r1",
            Self::Secp160r2 => "secp160r2",
            Self::Secp192k1 => "secp192k1",
            Self::Secp192r1 => "secp192r1",
            Self::Secp224k1 => "secp224k1",
            Self::Secp224r1 => "secp224r1",
            Self::Secp256k1 => "secp256k1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::BrainpoolP256r1 => "brainpoolP256r1",
            Self::BrainpoolP384r1 => "brainpoolP384r1",
            Self::BrainpoolP512r1 => "brainpoolP512r1",
            Self::X25519 => "x25519",
            Self::X448 => "x448",
            Self::BrainpoolP256r1Tls13 => "brainpoolP256r1tls13",
            Self::BrainpoolP384r1Tls13 => "brainpoolP384r1tls13",
            Self::BrainpoolP512r1Tls13 => "brainpoolP512r1tls13",
            Self::Ffdhe2048 => "ffdhe2048",
            Self::Ffdhe3072 => "ffdhe3072",
            Self::Ffdhe4096 => "ffdhe4096",
            Self::Ffdhe6144 => "ffdhe6144",
            Self::Ffdhe8192 => "ffdhe8192",
        }
    }

    pub fn is_finite_field(self) -> bool {
        matches!(
            self,
            Self::Ffdhe2048 | Self::Ffdhe3072 | Self::Ffdhe4096 | Self::Ffdhe6144 | Self::Ffdhe8192
        )
    }

    /// Protocol versions in which the group may be negotiated. TLS 1.3 keeps
    /// only the NIST prime curves, the CFRG curves, the TLS 1.3 brainpool
    /// variants and the finite-field groups.
    pub fn versions(self) -> &'static [TlsVersion] {
        match self {
            Self::Secp256r1
            | Self::Secp384r1
            | Self::Secp521r1
            | Self::X25519
            | Self::X448
            | Self::Ffdhe2048
            | Self::Ffdhe3072
            | Self::Ffdhe4096
            | Self::Ffdhe6144
            | Self::Ffdhe8192 => ALL_VERSIONS,
            Self::BrainpoolP256r1Tls13
            | Self::BrainpoolP384r1Tls13
            | Self::BrainpoolP512r1Tls13 => TLS13_ONLY,
            _ => UP_TO_TLS12,
        }
    }

    pub fn valid_for(self, version: TlsVersion) -> bool {
        self.versions().contains(&version)
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

impl fmt::Display for NamedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04x})", self.name(), self.code())
    }
}

//! Specification and DUT capability models.
//!
//! Both models are loaded once (from JSON here; other formats are parsed by
//! the caller) and are read-only for the rest of a verification run.

use crate::registry::TlsVersion;
use crate::restriction::{KeyLengthTable, SpecTable};
use crate::ConformanceError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Normative rule tables for one TLS version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionSpecification {
    pub cipher_suites: SpecTable,
    pub groups: SpecTable,
    /// Handshake signature algorithms.
    pub signature_algorithms: SpecTable,
    /// Certificate signature algorithms (TLS 1.3 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_signature_algorithms: Option<SpecTable>,
}

/// The full normative specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSpecification {
    /// Restriction levels for the protocol versions themselves.
    pub tls_versions: SpecTable,
    pub versions: BTreeMap<TlsVersion, VersionSpecification>,
    #[serde(default)]
    pub key_lengths: KeyLengthTable,
    #[serde(deserialize_with = "deserialize_duration", serialize_with = "serialize_duration")]
    pub max_session_lifetime: Duration,
}

impl TlsSpecification {
    pub fn from_json(input: &str) -> Result<Self, ConformanceError> {
        let spec: Self = serde_json::from_str(input)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reject a model that carries no per-version tables at all.
    pub fn validate(&self) -> Result<(), ConformanceError> {
        if self.versions.is_empty() {
            return Err(ConformanceError::InvalidSpecification(
                "no per-version requirement tables".into(),
            ));
        }
        Ok(())
    }

    pub fn version(&self, version: TlsVersion) -> Option<&VersionSpecification> {
        self.versions.get(&version)
    }

    /// Tables that govern `version`, together with the version they were
    /// written for. TLS 1.0 and 1.1 fall back to the TLS 1.2 tables when they
    /// have none of their own; TLS 1.3 never falls back.
    pub fn tables_for(&self, version: TlsVersion) -> Option<(TlsVersion, &VersionSpecification)> {
        if let Some(tables) = self.version(version) {
            return Some((version, tables));
        }
        match version {
            TlsVersion::Tls10 | TlsVersion::Tls11 => self
                .version(TlsVersion::Tls12)
                .map(|tables| (TlsVersion::Tls12, tables)),
            TlsVersion::Tls12 | TlsVersion::Tls13 => None,
        }
    }
}

/// Whether the DUT acts as the TLS server or the TLS client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationRole {
    #[default]
    #[serde(rename = "SERVER", alias = "server")]
    Server,
    #[serde(rename = "CLIENT", alias = "client")]
    Client,
}

/// One expected certificate of the DUT's chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Hex digest of the certificate file (SHA-1/256/384/512, picked by length).
    pub fingerprint: String,
    pub subject: String,
}

/// Declared capabilities for one supported TLS version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DutVersionProfile {
    /// Supported cipher suites, most preferred first.
    pub cipher_suites: Vec<String>,
    pub groups: BTreeSet<String>,
    pub signature_algorithms: BTreeSet<String>,
    pub certificate_signature_algorithms: BTreeSet<String>,
    /// Algorithm name to key length in bits.
    pub key_lengths: BTreeMap<String, u32>,
    #[serde(
        deserialize_with = "deserialize_opt_duration",
        serialize_with = "serialize_opt_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_lifetime: Option<Duration>,
}

/// The DUT capability declaration (ICS).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DutProfile {
    /// Software version the declaration was written for.
    pub ics_version: Option<String>,
    pub role: ApplicationRole,
    pub versions: BTreeMap<TlsVersion, DutVersionProfile>,
    /// Profile-wide session lifetime, used by versions without their own.
    #[serde(
        deserialize_with = "deserialize_opt_duration",
        serialize_with = "serialize_opt_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_lifetime: Option<Duration>,
    /// DNS names the server certificate has to cover.
    pub domain_names: Vec<String>,
    /// Expected chain, leaf first.
    pub certificate_chain: Vec<ChainEntry>,
}

impl DutProfile {
    pub fn from_json(input: &str) -> Result<Self, ConformanceError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn declared_versions(&self) -> impl Iterator<Item = TlsVersion> + '_ {
        self.versions.keys().copied()
    }

    pub fn session_lifetime_for(&self, version: TlsVersion) -> Option<Duration> {
        self.versions
            .get(&version)
            .and_then(|p| p.session_lifetime)
            .or(self.session_lifetime)
    }
}

/// Parse a duration written as `"<h>h <m>m <s>s"`; every part is optional but
/// at least one must be present.
pub fn parse_duration(input: &str) -> Result<Duration, ConformanceError> {
    let invalid =
        || ConformanceError::InvalidSpecification(format!("invalid duration: {:?}", input));
    let mut seconds: u64 = 0;
    let mut digits = String::new();
    let mut seen_unit = false;
    let mut last_rank = 0;
    for ch in input.trim().chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if ch.is_whitespace() {
            continue;
        }
        let (rank, factor) = match ch {
            'h' | 'H' => (1, 3600),
            'm' | 'M' => (2, 60),
            's' | 'S' => (3, 1),
            _ => return Err(invalid()),
        };
        if rank <= last_rank || digits.is_empty() {
            return Err(invalid());
        }
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        seconds = value
            .checked_mul(factor)
            .and_then(|v| seconds.checked_add(v))
            .ok_or_else(invalid)?;
        digits.clear();
        seen_unit = true;
        last_rank = rank;
    }
    if !digits.is_empty() || !seen_unit {
        return Err(invalid());
    }
    Ok(Duration::from_secs(seconds))
}

/// Render a duration the way [`parse_duration`] reads it.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 || parts.is_empty() {
        parts.push(format!("{}s", s));
    }
    parts.join(" ")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(u64),
    Text(String),
}

impl RawDuration {
    fn into_duration(self) -> Result<Duration, ConformanceError> {
        match self {
            Self::Seconds(secs) => Ok(Duration::from_secs(secs)),
            Self::Text(text) => parse_duration(&text),
        }
    }
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    RawDuration::deserialize(deserializer)?
        .into_duration()
        .map_err(serde::de::Error::custom)
}

fn deserialize_opt_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    Option::<RawDuration>::deserialize(deserializer)?
        .map(RawDuration::into_duration)
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn serialize_duration<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}

fn serialize_opt_duration<S: serde::Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serialize_duration(d, serializer),
        None => serializer.serialize_none(),
    }
}

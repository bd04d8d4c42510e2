//! Restriction-tagged specification tables and key-length requirements.
//!
//! Every normative table (TLS versions, cipher suites, groups, signature
//! algorithms) is a [`SpecTable`]: a name-keyed set of [`SpecEntry`] values,
//! each tagged with a [`RestrictionLevel`]. Minimum key lengths are kept in a
//! separate [`KeyLengthTable`] whose windows expire by calendar year.

use crate::ConformanceError;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How strongly a specification table constrains one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RestrictionLevel {
    #[serde(rename = "REQUIRED")]
    Required,
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    #[serde(rename = "ATLEASTONE", alias = "AT_LEAST_ONE")]
    AtLeastOne,
    #[serde(rename = "OPTIONAL")]
    Optional,
}

impl RestrictionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::AtLeastOne => "ATLEASTONE",
            Self::Optional => "OPTIONAL",
        }
    }

    /// Whether a DUT may declare an entry carrying this level.
    pub fn permits(self) -> bool {
        self != Self::Forbidden
    }
}

impl fmt::Display for RestrictionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestrictionLevel {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REQUIRED" => Ok(Self::Required),
            "FORBIDDEN" => Ok(Self::Forbidden),
            "ATLEASTONE" | "AT_LEAST_ONE" => Ok(Self::AtLeastOne),
            "OPTIONAL" => Ok(Self::Optional),
            other => Err(ConformanceError::InvalidSpecification(format!(
                "unknown restriction level: {}",
                other
            ))),
        }
    }
}

/// One row of a specification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecEntry {
    /// Name the DUT declares (cipher suite, group, algorithm, version).
    pub description: String,
    pub restriction: RestrictionLevel,
    /// Preference rank, lower is more preferred. Meaningful for cipher suites only.
    #[serde(default)]
    pub priority: u32,
    /// Category label, e.g. `PSK-based-CipherSuites`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SpecEntry {
    pub fn new(description: impl Into<String>, restriction: RestrictionLevel) -> Self {
        Self {
            description: description.into(),
            restriction,
            priority: 0,
            kind: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether the entry belongs to one of the pre-shared-key cipher-suite categories.
    pub fn is_psk(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| crate::registry::PSK_CIPHER_SUITE_KINDS.contains(&k))
    }
}

/// Name-keyed specification table. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<SpecEntry>")]
pub struct SpecTable {
    entries: BTreeMap<String, SpecEntry>,
}

impl SpecTable {
    /// Build a table, rejecting a second entry with an already-used name.
    pub fn from_entries(
        entries: impl IntoIterator<Item = SpecEntry>,
    ) -> Result<Self, ConformanceError> {
        let mut table = Self::default();
        for entry in entries {
            if table.entries.contains_key(&entry.description) {
                return Err(ConformanceError::DuplicateEntry(entry.description));
            }
            table.entries.insert(entry.description.clone(), entry);
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&SpecEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &SpecEntry> {
        self.entries.values()
    }

    /// Entries tagged with `level`, in name order.
    pub fn with_level(&self, level: RestrictionLevel) -> impl Iterator<Item = &SpecEntry> {
        self.entries.values().filter(move |e| e.restriction == level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<SpecEntry>> for SpecTable {
    type Error = ConformanceError;

    fn try_from(entries: Vec<SpecEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl Serialize for SpecTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

/// End of a key-length window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseUntil {
    /// Applies up to and including this year.
    Year(i32),
    /// Marked with a trailing `+`; never expires.
    Unbounded,
}

impl FromStr for UseUntil {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.ends_with('+') {
            return Ok(Self::Unbounded);
        }
        s.parse::<i32>().map(Self::Year).map_err(|_| {
            ConformanceError::InvalidSpecification(format!("invalid useUntil year: {:?}", s))
        })
    }
}

impl fmt::Display for UseUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{}", year),
            Self::Unbounded => f.write_str("+"),
        }
    }
}

impl Serialize for UseUntil {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UseUntil {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A minimum key length that holds until a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLengthWindow {
    pub minimum_bits: u32,
    pub use_until: UseUntil,
}

impl KeyLengthWindow {
    pub fn new(minimum_bits: u32, use_until: UseUntil) -> Self {
        Self {
            minimum_bits,
            use_until,
        }
    }

    /// A window is applicable while its end year has not passed.
    pub fn applies(&self, as_of_year: i32) -> bool {
        match self.use_until {
            UseUntil::Year(year) => year >= as_of_year,
            UseUntil::Unbounded => true,
        }
    }
}

/// Time-windowed minimum key lengths for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLengthRequirement {
    pub algorithm: String,
    pub windows: Vec<KeyLengthWindow>,
}

impl KeyLengthRequirement {
    pub fn new(algorithm: impl Into<String>, windows: Vec<KeyLengthWindow>) -> Self {
        Self {
            algorithm: algorithm.into(),
            windows,
        }
    }

    /// Weakest minimum among windows still applicable in `as_of_year`.
    pub fn effective_minimum(&self, as_of_year: i32) -> Option<u32> {
        self.windows
            .iter()
            .filter(|w| w.applies(as_of_year))
            .map(|w| w.minimum_bits)
            .min()
    }

    pub fn is_satisfied_by(&self, bits: u32, as_of_year: i32) -> bool {
        self.effective_minimum(as_of_year)
            .is_some_and(|minimum| minimum <= bits)
    }
}

/// Global key-length table, looked up by algorithm name (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyLengthTable {
    requirements: Vec<KeyLengthRequirement>,
}

impl KeyLengthTable {
    pub fn new(requirements: Vec<KeyLengthRequirement>) -> Self {
        Self { requirements }
    }

    pub fn find(&self, algorithm: &str) -> Option<&KeyLengthRequirement> {
        self.requirements
            .iter()
            .find(|r| r.algorithm.eq_ignore_ascii_case(algorithm))
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyLengthRequirement> {
        self.requirements.iter()
    }
}

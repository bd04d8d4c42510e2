//! Restriction-table primitives.
//!
//! Each function compares one declared capability list against one
//! [`SpecTable`] and returns every violation it finds. None of them stop at
//! the first problem, and none of them look at another category's result.

use crate::extensions::{self, ExtensionError};
use crate::registry::{ExtensionType, TLS_EMPTY_RENEGOTIATION_INFO_SCSV};
use crate::restriction::{KeyLengthTable, RestrictionLevel, SpecEntry, SpecTable};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

/// How a declared name that has no table entry is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlistedPolicy {
    /// Unlisted names are violations (cipher suites, groups, versions).
    Reject,
    /// Unlisted names are accepted (signature algorithms).
    Permit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenViolation {
    Forbidden(String),
    Unlisted(String),
}

impl ForbiddenViolation {
    pub fn name(&self) -> &str {
        match self {
            Self::Forbidden(n) | Self::Unlisted(n) => n,
        }
    }
}

impl fmt::Display for ForbiddenViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden(name) => write!(f, "{} is forbidden", name),
            Self::Unlisted(name) => write!(f, "{} is not listed as allowed", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityViolation {
    /// The name has no table entry, so it has no rank.
    Unlisted(String),
    /// `first` is ranked after `second` but declared before it.
    OutOfOrder { first: String, second: String },
}

impl PriorityViolation {
    /// The name the violation is attributed to.
    pub fn name(&self) -> &str {
        match self {
            Self::Unlisted(name) => name,
            Self::OutOfOrder { first, .. } => first,
        }
    }
}

impl fmt::Display for PriorityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlisted(name) => write!(f, "{} has no specified priority", name),
            Self::OutOfOrder { first, second } => {
                write!(f, "{} is declared before the more preferred {}", first, second)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLengthViolation {
    NoSpecifiedMinimum {
        algorithm: String,
        bits: u32,
    },
    BelowMinimum {
        algorithm: String,
        bits: u32,
        /// Weakest applicable minimum; `None` when every window has expired.
        minimum: Option<u32>,
    },
}

impl KeyLengthViolation {
    pub fn algorithm(&self) -> &str {
        match self {
            Self::NoSpecifiedMinimum { algorithm, .. } | Self::BelowMinimum { algorithm, .. } => {
                algorithm
            }
        }
    }
}

impl fmt::Display for KeyLengthViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpecifiedMinimum { algorithm, bits } => write!(
                f,
                "no specified minimum key length for algorithm {} ({} bits)",
                algorithm, bits
            ),
            Self::BelowMinimum {
                algorithm,
                bits,
                minimum: Some(minimum),
            } => write!(
                f,
                "key length {} bits for {} is below the minimum of {} bits",
                bits, algorithm, minimum
            ),
            Self::BelowMinimum {
                algorithm,
                bits,
                minimum: None,
            } => write!(
                f,
                "no key-length window for {} is applicable any more ({} bits)",
                algorithm, bits
            ),
        }
    }
}

/// Names of REQUIRED entries missing from `declared`, in table order.
pub fn verify_required_present(declared: &BTreeSet<String>, table: &SpecTable) -> Vec<String> {
    verify_required_present_where(declared, table, |_| true)
}

/// Like [`verify_required_present`], restricted to entries accepted by `demanded`.
pub fn verify_required_present_where(
    declared: &BTreeSet<String>,
    table: &SpecTable,
    demanded: impl Fn(&SpecEntry) -> bool,
) -> Vec<String> {
    table
        .with_level(RestrictionLevel::Required)
        .filter(|entry| demanded(*entry))
        .filter(|entry| !declared.contains(&entry.description))
        .map(|entry| entry.description.clone())
        .collect()
}

/// Declared names that are FORBIDDEN, or unlisted under [`UnlistedPolicy::Reject`].
pub fn verify_none_forbidden<'a>(
    declared: impl IntoIterator<Item = &'a String>,
    table: &SpecTable,
    policy: UnlistedPolicy,
) -> Vec<ForbiddenViolation> {
    declared
        .into_iter()
        .filter_map(|name| match table.get(name) {
            Some(entry) if entry.restriction == RestrictionLevel::Forbidden => {
                Some(ForbiddenViolation::Forbidden(name.clone()))
            }
            Some(_) => None,
            None if policy == UnlistedPolicy::Reject => {
                Some(ForbiddenViolation::Unlisted(name.clone()))
            }
            None => None,
        })
        .collect()
}

/// The AT_LEAST_ONE alternatives when none of them is declared.
///
/// A table without AT_LEAST_ONE entries demands nothing and always passes.
pub fn verify_at_least_one(declared: &BTreeSet<String>, table: &SpecTable) -> Option<Vec<String>> {
    let alternatives: Vec<&SpecEntry> = table.with_level(RestrictionLevel::AtLeastOne).collect();
    if alternatives.is_empty()
        || alternatives
            .iter()
            .any(|entry| declared.contains(&entry.description))
    {
        return None;
    }
    Some(
        alternatives
            .into_iter()
            .map(|entry| entry.description.clone())
            .collect(),
    )
}

/// Check that adjacent declared names are in non-decreasing priority.
///
/// The renegotiation SCSV is dropped first. Unlisted names are reported
/// once each, in declared order; a pair containing one is not compared.
pub fn verify_priority_order(ordered: &[String], table: &SpecTable) -> Vec<PriorityViolation> {
    let ranked: Vec<&String> = ordered
        .iter()
        .filter(|name| name.as_str() != TLS_EMPTY_RENEGOTIATION_INFO_SCSV)
        .collect();

    let mut violations = Vec::new();
    let mut reported = BTreeSet::new();
    for pair in ranked.windows(2) {
        let [first, second] = pair else { continue };
        match (table.get(first), table.get(second)) {
            (Some(a), Some(b)) => {
                if a.priority > b.priority {
                    violations.push(PriorityViolation::OutOfOrder {
                        first: (*first).clone(),
                        second: (*second).clone(),
                    });
                }
            }
            (a, b) => {
                for (name, entry) in [(first, a), (second, b)] {
                    if entry.is_none() && reported.insert(name.as_str()) {
                        violations.push(PriorityViolation::Unlisted((*name).clone()));
                    }
                }
            }
        }
    }
    violations
}

/// Check observed key lengths against the time-windowed minimum table.
pub fn verify_key_length_table(
    observed: &BTreeMap<String, u32>,
    table: &KeyLengthTable,
    as_of_year: i32,
) -> Vec<KeyLengthViolation> {
    observed
        .iter()
        .filter_map(|(algorithm, &bits)| check_key_length(algorithm, bits, table, as_of_year))
        .collect()
}

/// Check one key length; `None` means it satisfies the table.
pub fn check_key_length(
    algorithm: &str,
    bits: u32,
    table: &KeyLengthTable,
    as_of_year: i32,
) -> Option<KeyLengthViolation> {
    let Some(requirement) = table.find(algorithm) else {
        return Some(KeyLengthViolation::NoSpecifiedMinimum {
            algorithm: algorithm.to_string(),
            bits,
        });
    };
    if requirement.is_satisfied_by(bits, as_of_year) {
        return None;
    }
    Some(KeyLengthViolation::BelowMinimum {
        algorithm: algorithm.to_string(),
        bits,
        minimum: requirement.effective_minimum(as_of_year),
    })
}

/// The declared lifetime must be strictly shorter than the maximum.
pub fn verify_session_lifetime(declared: Duration, maximum: Duration) -> bool {
    declared < maximum
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionViolation {
    Missing(u16),
    Unexpected(u16),
}

impl fmt::Display for ExtensionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, code) = match self {
            Self::Missing(code) => ("lacks", *code),
            Self::Unexpected(code) => ("offers", *code),
        };
        match ExtensionType::from_code(code) {
            Some(known) => write!(f, "message {} extension {}", verb, known),
            None => write!(f, "message {} extension 0x{:04x}", verb, code),
        }
    }
}

/// Compare the extensions observed in a captured message with expectations.
pub fn verify_extensions(
    observed: &[u8],
    required: &[u16],
    forbidden: &[u16],
) -> Result<Vec<ExtensionViolation>, ExtensionError> {
    let present = extensions::types_present(observed)?;
    let missing = required
        .iter()
        .filter(|code| !present.contains(*code))
        .map(|&code| ExtensionViolation::Missing(code));
    let unexpected = forbidden
        .iter()
        .filter(|code| present.contains(*code))
        .map(|&code| ExtensionViolation::Unexpected(code));
    Ok(missing.chain(unexpected).collect())
}

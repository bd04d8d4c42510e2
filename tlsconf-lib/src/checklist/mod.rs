//! ICS checklist verification.
//!
//! Compares a DUT capability declaration against the normative
//! specification, one verdict per rule category. Categories are independent
//! of each other and are evaluated in parallel; the verdict list keeps the
//! fixed category order below.

mod rules;

use crate::model::{DutProfile, DutVersionProfile, TlsSpecification, VersionSpecification};
use crate::registry::{NamedGroup, TlsVersion, TLS_EMPTY_RENEGOTIATION_INFO_SCSV};
use crate::restriction::SpecTable;
use crate::verdict::{DiagnosticSink, Findings, Verdict};
use crate::ConformanceError;
use rayon::prelude::*;
use std::collections::BTreeSet;

pub use rules::{
    check_key_length, verify_at_least_one, verify_extensions, verify_key_length_table,
    verify_none_forbidden, verify_priority_order, verify_required_present,
    verify_required_present_where, verify_session_lifetime, ExtensionViolation,
    ForbiddenViolation, KeyLengthViolation, PriorityViolation, UnlistedPolicy,
};

/// Options controlling checklist evaluation.
#[derive(Debug, Clone, Default)]
pub struct ChecklistOptions {
    /// Year used to decide which key-length windows still apply.
    /// Defaults to the current UTC year.
    pub as_of_year: Option<i32>,
}

struct Context<'a> {
    dut: &'a DutProfile,
    spec: &'a TlsSpecification,
    as_of_year: i32,
}

type CheckFn = fn(&Context<'_>) -> Findings;

const CHECKS: &[(&str, &str, CheckFn)] = &[
    ("TLS_ICS_01", "ICS covers the submitted software version", check_ics_version),
    ("TLS_ICS_02", "All mandatory TLS versions are supported", check_versions_required),
    ("TLS_ICS_03", "No forbidden TLS version is supported", check_versions_forbidden),
    ("TLS_ICS_04", "All mandatory cipher suites are supported", check_cipher_suites_required),
    ("TLS_ICS_05", "No forbidden cipher suite is supported", check_cipher_suites_forbidden),
    ("TLS_ICS_06", "Supported groups are IANA named groups", check_groups_registered),
    ("TLS_ICS_07", "Supported groups match the requirements", check_groups),
    ("TLS_ICS_08", "Declared key lengths meet the minimum", check_key_lengths),
    (
        "TLS_ICS_09",
        "Handshake signature algorithms match the requirements",
        check_signature_algorithms,
    ),
    (
        "TLS_ICS_10",
        "Certificate signature algorithms match the requirements",
        check_certificate_signature_algorithms,
    ),
    ("TLS_ICS_11", "Session lifetime is below the maximum", check_session_lifetime),
    ("TLS_ICS_12", "Cipher suites are declared in priority order", check_cipher_suite_priority),
];

/// Run every checklist category and report each verdict to `sink`.
///
/// Only a specification without any per-version tables is an error; every
/// other problem is recorded in the affected verdict.
pub fn run_checklist(
    dut: &DutProfile,
    spec: &TlsSpecification,
    options: &ChecklistOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Verdict>, ConformanceError> {
    spec.validate()?;

    let ctx = Context {
        dut,
        spec,
        as_of_year: options.as_of_year.unwrap_or_else(current_year),
    };

    let verdicts: Vec<Verdict> = CHECKS
        .par_iter()
        .map(|(check, title, run)| {
            tracing::debug!(check, "running checklist category");
            run(&ctx).into_verdict(check, title)
        })
        .collect();

    for verdict in &verdicts {
        sink.record(verdict);
    }
    Ok(verdicts)
}

pub(crate) fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}

/// A declared version and the tables that govern it.
struct Scoped<'a> {
    version: TlsVersion,
    profile: &'a DutVersionProfile,
    tables: &'a VersionSpecification,
    /// The tables were written for TLS 1.2 and only bound FORBIDDEN, unlisted
    /// and ordering rules for this version.
    borrowed: bool,
}

/// Declared versions with the tables that govern them, in version order. A
/// version without tables of its own borrows the TLS 1.2 tables; a version
/// with nothing to check against is fatal for the category.
fn declared_versions<'a>(ctx: &'a Context<'_>, findings: &mut Findings) -> Vec<Scoped<'a>> {
    let mut scoped = Vec::new();
    for (version, profile) in &ctx.dut.versions {
        match ctx.spec.tables_for(*version) {
            Some((source, tables)) => {
                let borrowed = source != *version;
                if borrowed {
                    findings.info(format!(
                        "{} is checked against the {} tables for FORBIDDEN, unlisted and order rules",
                        version, source
                    ));
                }
                scoped.push(Scoped {
                    version: *version,
                    profile,
                    tables,
                    borrowed,
                });
            }
            None => findings.fatal(format!("No requirement tables apply to {}", version)),
        }
    }
    scoped
}

fn report_missing_required(
    findings: &mut Findings,
    what: &str,
    scope: &str,
    missing: Vec<String>,
) {
    for name in missing {
        findings.error(format!("Missing required {} for {}: {}", what, scope, name));
    }
}

fn report_at_least_one(
    findings: &mut Findings,
    what: &str,
    scope: &str,
    alternatives: Option<Vec<String>>,
) {
    if let Some(alternatives) = alternatives {
        findings.error(format!(
            "Missing at least one of the following {}s for {}: {}",
            what,
            scope,
            alternatives.join(", ")
        ));
    }
}

fn report_forbidden(
    findings: &mut Findings,
    what: &str,
    scope: &str,
    violations: Vec<ForbiddenViolation>,
) {
    for violation in violations {
        findings.error(format!("Declared {} for {}: {}", what, scope, violation));
    }
}

/// REQUIRED, AT_LEAST_ONE and FORBIDDEN rules of one table in one go.
/// Borrowed tables only contribute their FORBIDDEN and unlisted rules.
fn check_table(
    findings: &mut Findings,
    what: &str,
    scope: &str,
    declared: &BTreeSet<String>,
    table: &SpecTable,
    policy: UnlistedPolicy,
    borrowed: bool,
) {
    if !borrowed {
        report_missing_required(findings, what, scope, verify_required_present(declared, table));
        report_at_least_one(findings, what, scope, verify_at_least_one(declared, table));
    }
    report_forbidden(
        findings,
        what,
        scope,
        verify_none_forbidden(declared, table, policy),
    );
}

fn check_ics_version(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    match ctx.dut.ics_version.as_deref().map(str::trim) {
        Some(version) if !version.is_empty() => findings.warning(format!(
            "The ICS is submitted for version {}. It has to be checked manually against the exact version of the submitted software.",
            version
        )),
        _ => findings.error("The ICS does not state the software version it covers"),
    }
    findings
}

fn declared_version_names(dut: &DutProfile) -> BTreeSet<String> {
    dut.declared_versions().map(|v| v.name().to_string()).collect()
}

fn check_versions_required(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    let declared = declared_version_names(ctx.dut);
    let table = &ctx.spec.tls_versions;
    let scope = "the application";
    report_missing_required(
        &mut findings,
        "TLS version",
        scope,
        verify_required_present(&declared, table),
    );
    report_at_least_one(
        &mut findings,
        "TLS version",
        scope,
        verify_at_least_one(&declared, table),
    );
    findings
}

fn check_versions_forbidden(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    let declared = declared_version_names(ctx.dut);
    report_forbidden(
        &mut findings,
        "TLS version",
        "the application",
        verify_none_forbidden(&declared, &ctx.spec.tls_versions, UnlistedPolicy::Reject),
    );
    findings
}

fn check_cipher_suites_required(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for scoped in declared_versions(ctx, &mut findings) {
        if scoped.borrowed {
            continue;
        }
        let table = &scoped.tables.cipher_suites;
        let declared: BTreeSet<String> = scoped.profile.cipher_suites.iter().cloned().collect();
        let missing = if scoped.version == TlsVersion::Tls12 {
            verify_required_present_where(&declared, table, |entry| !entry.is_psk())
        } else {
            verify_required_present(&declared, table)
        };
        let scope = scoped.version.name();
        report_missing_required(&mut findings, "cipher suite", scope, missing);
        report_at_least_one(
            &mut findings,
            "cipher suite",
            scope,
            verify_at_least_one(&declared, table),
        );
    }
    findings
}

fn check_cipher_suites_forbidden(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for scoped in declared_versions(ctx, &mut findings) {
        let suites = scoped
            .profile
            .cipher_suites
            .iter()
            .filter(|name| name.as_str() != TLS_EMPTY_RENEGOTIATION_INFO_SCSV);
        report_forbidden(
            &mut findings,
            "cipher suite",
            scoped.version.name(),
            verify_none_forbidden(suites, &scoped.tables.cipher_suites, UnlistedPolicy::Reject),
        );
    }
    findings
}

fn check_groups_registered(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for (version, profile) in &ctx.dut.versions {
        for name in &profile.groups {
            match NamedGroup::from_name(name) {
                None => findings.error(format!(
                    "Group {} declared for {} is not an IANA named group",
                    name, version
                )),
                Some(group) if !group.valid_for(*version) => findings.error(format!(
                    "Group {} is not defined for {}",
                    group, version
                )),
                Some(_) => {}
            }
        }
    }
    findings
}

fn check_groups(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for scoped in declared_versions(ctx, &mut findings) {
        check_table(
            &mut findings,
            "group",
            scoped.version.name(),
            &scoped.profile.groups,
            &scoped.tables.groups,
            UnlistedPolicy::Reject,
            scoped.borrowed,
        );
    }
    findings
}

fn check_key_lengths(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for (version, profile) in &ctx.dut.versions {
        for violation in
            verify_key_length_table(&profile.key_lengths, &ctx.spec.key_lengths, ctx.as_of_year)
        {
            findings.error(format!("{}: {}", version, violation));
        }
    }
    findings
}

fn check_signature_algorithms(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for scoped in declared_versions(ctx, &mut findings) {
        check_table(
            &mut findings,
            "signature algorithm",
            scoped.version.name(),
            &scoped.profile.signature_algorithms,
            &scoped.tables.signature_algorithms,
            UnlistedPolicy::Permit,
            scoped.borrowed,
        );
    }
    findings
}

fn check_certificate_signature_algorithms(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    let version = TlsVersion::Tls13;
    let Some(profile) = ctx.dut.versions.get(&version) else {
        findings.info(
            "TLSv1.3 is not declared; certificate signature algorithms are not applicable",
        );
        return findings;
    };
    let Some(table) = ctx
        .spec
        .version(version)
        .and_then(|tables| tables.certificate_signature_algorithms.as_ref())
    else {
        findings.info("No certificate signature algorithm requirements for TLSv1.3");
        return findings;
    };
    check_table(
        &mut findings,
        "certificate signature algorithm",
        version.name(),
        &profile.certificate_signature_algorithms,
        table,
        UnlistedPolicy::Permit,
        false,
    );
    findings
}

fn check_session_lifetime(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    let maximum = ctx.spec.max_session_lifetime;
    for version in ctx.dut.declared_versions() {
        match ctx.dut.session_lifetime_for(version) {
            None => findings.error(format!("No session lifetime declared for {}", version)),
            Some(declared) if verify_session_lifetime(declared, maximum) => {}
            Some(declared) => findings.error(format!(
                "Session lifetime {} for {} is not below the maximum of {}",
                crate::model::format_duration(declared),
                version,
                crate::model::format_duration(maximum)
            )),
        }
    }
    findings
}

fn check_cipher_suite_priority(ctx: &Context<'_>) -> Findings {
    let mut findings = Findings::new();
    for scoped in declared_versions(ctx, &mut findings) {
        let declared = &scoped.profile.cipher_suites;
        for violation in verify_priority_order(declared, &scoped.tables.cipher_suites) {
            findings.error(format!("Cipher suite order for {}: {}", scoped.version, violation));
        }
    }
    findings
}

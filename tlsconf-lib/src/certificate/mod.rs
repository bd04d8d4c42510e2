//! X.509 certificate chain conformance.
//!
//! The chain is assembled from caller-supplied certificate files, each
//! matched against a fingerprint the DUT declared, and then checked rule by
//! rule. Depth 0 is the leaf; a certificate whose subject equals its issuer
//! is a root wherever it sits.

mod checks;
mod crl;
mod helpers;
mod revocation;

use crate::fields::CertificateInfo;
use crate::fingerprint::fingerprint_matches;
use crate::model::{ChainEntry, DutProfile, TlsSpecification};
use crate::parser::parse_cert;
use crate::registry::TlsVersion;
use crate::restriction::SpecTable;
use crate::verdict::{DiagnosticSink, Findings, Verdict};
use crate::ConformanceError;
use std::time::Duration;

use checks::{
    check_basic_constraints, check_ca_key_usage, check_current_validity, check_domain_names,
    check_extended_key_usage, check_key_lengths, check_leaf_key_usage, check_no_wildcards,
    check_signature_algorithms, check_validity_duration,
};
use crl::check_revocation_status;
use revocation::check_revocation_info;

pub use crl::RevocationLists;
pub use helpers::{
    full_years, matches_tls12, matches_tls13, tls12_signature_name, validity_role, ChainRole,
};
pub use revocation::{ReachabilityProbe, TcpProbe, DEFAULT_PROBE_TIMEOUT};

/// A certificate of the assembled chain.
#[derive(Debug, Clone)]
pub struct ChainCertificate {
    /// Position in the declared chain (0 = leaf).
    pub depth: usize,
    pub info: CertificateInfo,
}

impl ChainCertificate {
    pub fn new(depth: usize, info: CertificateInfo) -> Self {
        Self { depth, info }
    }

    pub fn is_leaf(&self) -> bool {
        self.depth == 0
    }

    /// Prefix for diagnostics, e.g. `certificate at depth 1 (CN = CA)`.
    pub fn label(&self) -> String {
        format!(
            "certificate at depth {} ({})",
            self.depth,
            self.info.subject_string()
        )
    }
}

/// Options controlling chain verification.
#[derive(Debug, Clone)]
pub struct ChainOptions {
    /// Verify at a specific Unix timestamp instead of the current time.
    pub at_time: Option<i64>,
    /// Year used for key-length windows. Defaults to the year of `at_time`.
    pub as_of_year: Option<i32>,
    /// Per-attempt timeout of the [`TcpProbe`] used when the caller supplies
    /// no probe of its own.
    pub probe_timeout: Duration,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            at_time: None,
            as_of_year: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ChainOptions {
    /// The probe [`verify_certificates`] falls back to.
    pub fn tcp_probe(&self) -> TcpProbe {
        TcpProbe::new(self.probe_timeout)
    }

    fn now(&self) -> i64 {
        self.at_time
            .unwrap_or_else(|| time::OffsetDateTime::now_utc().unix_timestamp())
    }

    fn year(&self, now: i64) -> i32 {
        self.as_of_year.unwrap_or_else(|| {
            time::OffsetDateTime::from_unix_timestamp(now)
                .map(|dt| dt.year())
                .unwrap_or_else(|_| crate::checklist::current_year())
        })
    }
}

/// Match declared chain entries to certificate files by fingerprint.
///
/// The fingerprint may cover the file bytes as supplied or the certificate
/// DER. Unparsable files and unmatched entries are fatal findings; the
/// certificates that did match keep their declared depth.
pub fn assemble_chain(
    entries: &[ChainEntry],
    files: &[Vec<u8>],
) -> (Vec<ChainCertificate>, Findings) {
    let mut findings = Findings::new();
    if entries.is_empty() {
        findings.fatal("no certificate chain declared");
    }

    let parsed: Vec<(&[u8], CertificateInfo)> = files
        .iter()
        .enumerate()
        .filter_map(|(i, file)| match parse_cert(file) {
            Ok(info) => Some((file.as_slice(), info)),
            Err(e) => {
                findings.fatal(format!("certificate file {} could not be parsed: {}", i, e));
                None
            }
        })
        .collect();

    let mut chain = Vec::new();
    for (depth, entry) in entries.iter().enumerate() {
        let matched = parsed.iter().find(|(raw, info)| {
            fingerprint_matches(raw, &entry.fingerprint)
                || fingerprint_matches(&info.raw_der, &entry.fingerprint)
        });
        match matched {
            Some((_, info)) => {
                tracing::debug!(depth, subject = %entry.subject, "matched chain certificate");
                findings.info(format!(
                    "certificate for subject {} found at depth {}",
                    entry.subject, depth
                ));
                chain.push(ChainCertificate::new(depth, info.clone()));
            }
            None => findings.fatal(format!(
                "Certificate missing for subject {} (fingerprint {})",
                entry.subject, entry.fingerprint
            )),
        }
    }
    (chain, findings)
}

/// Signature tables the chain is judged against, one per declared version.
fn signature_tables<'a>(
    dut: &DutProfile,
    spec: &'a TlsSpecification,
) -> Vec<(TlsVersion, &'a SpecTable)> {
    dut.declared_versions()
        .filter_map(|version| {
            let tables = spec.version(version)?;
            match version {
                TlsVersion::Tls13 => Some((
                    version,
                    tables
                        .certificate_signature_algorithms
                        .as_ref()
                        .unwrap_or(&tables.signature_algorithms),
                )),
                TlsVersion::Tls12 => Some((version, &tables.signature_algorithms)),
                _ => None,
            }
        })
        .collect()
}

struct ChainContext<'a> {
    chain: &'a [ChainCertificate],
    dut: &'a DutProfile,
    spec: &'a TlsSpecification,
    probe: &'a dyn ReachabilityProbe,
    crls: &'a RevocationLists,
    now: i64,
    year: i32,
}

impl ChainContext<'_> {
    fn leaf(&self) -> Option<&ChainCertificate> {
        self.chain.first().filter(|c| c.is_leaf())
    }
}

type CheckFn = fn(&ChainContext<'_>) -> Findings;

const CHECKS: &[(&str, &str, CheckFn)] = &[
    ("TLS_CERT_01", "Key lengths meet the minimum", |ctx| {
        check_key_lengths(ctx.chain, &ctx.spec.key_lengths, ctx.year)
    }),
    ("TLS_CERT_02", "Signature algorithms are allowed", |ctx| {
        check_signature_algorithms(ctx.chain, &signature_tables(ctx.dut, ctx.spec))
    }),
    ("TLS_CERT_03", "No wildcard names", |ctx| check_no_wildcards(ctx.chain)),
    ("TLS_CERT_04", "Revocation information is present and reachable", |ctx| {
        check_revocation_info(ctx.chain, ctx.probe)
    }),
    ("TLS_CERT_05", "No certificate is revoked", |ctx| {
        check_revocation_status(ctx.chain, ctx.crls, ctx.now)
    }),
    ("TLS_CERT_06", "Leaf KeyUsage is critical with digitalSignature only", |ctx| {
        check_leaf_key_usage(ctx.leaf())
    }),
    ("TLS_CERT_07", "CA KeyUsage is critical with keyCertSign and cRLSign", |ctx| {
        check_ca_key_usage(ctx.chain)
    }),
    ("TLS_CERT_08", "Leaf ExtendedKeyUsage matches the application role", |ctx| {
        check_extended_key_usage(ctx.leaf(), ctx.dut.role)
    }),
    ("TLS_CERT_09", "Leaf covers all domain names", |ctx| {
        check_domain_names(ctx.leaf(), ctx.dut.role, &ctx.dut.domain_names)
    }),
    ("TLS_CERT_10", "CA BasicConstraints are critical", |ctx| {
        check_basic_constraints(ctx.chain)
    }),
    ("TLS_CERT_11", "Validity periods are within role limits", |ctx| {
        check_validity_duration(ctx.chain)
    }),
    ("TLS_CERT_12", "Certificates are currently valid", |ctx| {
        check_current_validity(ctx.chain, ctx.now)
    }),
];

/// Run every chain check on an already assembled chain.
///
/// `crls` feed the revocation status check. With an empty chain every check
/// fails with a fatal finding.
pub fn run_chain_checks(
    chain: &[ChainCertificate],
    dut: &DutProfile,
    spec: &TlsSpecification,
    crls: &RevocationLists,
    options: &ChainOptions,
    probe: &dyn ReachabilityProbe,
) -> Vec<Verdict> {
    let now = options.now();
    let ctx = ChainContext {
        chain,
        dut,
        spec,
        probe,
        crls,
        now,
        year: options.year(now),
    };

    CHECKS
        .iter()
        .map(|(check, title, run)| {
            tracing::debug!(check, certificates = chain.len(), "running chain check");
            let findings = if chain.is_empty() {
                let mut findings = Findings::new();
                findings.fatal("no certificate of the declared chain is available");
                findings
            } else {
                run(&ctx)
            };
            findings.into_verdict(check, title)
        })
        .collect()
}

/// Assemble the declared chain from `files` and verify it, reading
/// revocation status from the DER or PEM lists in `crl_files`.
///
/// Returns one verdict for the assembly step followed by one per chain rule.
/// Without a `probe`, revocation sources are probed over TCP with
/// [`ChainOptions::probe_timeout`].
pub fn verify_certificates(
    dut: &DutProfile,
    spec: &TlsSpecification,
    files: &[Vec<u8>],
    crl_files: &[Vec<u8>],
    options: &ChainOptions,
    probe: Option<&dyn ReachabilityProbe>,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Verdict>, ConformanceError> {
    spec.validate()?;

    let (chain, assembly) = assemble_chain(&dut.certificate_chain, files);
    let mut verdicts = vec![assembly.into_verdict(
        "TLS_CERT_CHAIN",
        "Certificate files match the declared chain",
    )];
    let fallback = options.tcp_probe();
    let probe = probe.unwrap_or(&fallback);
    let crls = RevocationLists::load(crl_files);
    verdicts.extend(run_chain_checks(&chain, dut, spec, &crls, options, probe));

    for verdict in &verdicts {
        sink.record(verdict);
    }
    Ok(verdicts)
}

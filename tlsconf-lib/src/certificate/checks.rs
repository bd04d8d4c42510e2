//! Individual chain conformance checks.
//!
//! Each function inspects the whole chain (or the role-filtered part it is
//! about) and returns its findings. Depth 0 is the leaf; every other
//! position holds a CA certificate.

use super::helpers::{contains_wildcard, full_years, matches_tls12, matches_tls13, validity_role};
use super::ChainCertificate;
use crate::checklist::check_key_length;
use crate::fields::KeyAlgorithm;
use crate::model::ApplicationRole;
use crate::oid;
use crate::registry::TlsVersion;
use crate::restriction::{KeyLengthTable, SpecTable};
use crate::verdict::Findings;

const LEAF_UNAVAILABLE: &str = "leaf certificate (depth 0) is not available";

pub(crate) fn check_key_lengths(
    chain: &[ChainCertificate],
    table: &KeyLengthTable,
    as_of_year: i32,
) -> Findings {
    let mut findings = Findings::new();
    for cert in chain {
        let key = &cert.info.public_key;
        let bits = match (&key.algorithm, key.key_bits) {
            (KeyAlgorithm::Other(oid), _) => {
                findings.error(format!(
                    "{}: unable to determine key length for key algorithm {}",
                    cert.label(),
                    oid
                ));
                continue;
            }
            (algorithm, None) => {
                findings.error(format!(
                    "{}: unable to determine key length of {} key",
                    cert.label(),
                    algorithm.name()
                ));
                continue;
            }
            (_, Some(bits)) => bits,
        };
        match check_key_length(key.algorithm.name(), bits, table, as_of_year) {
            Some(violation) => findings.error(format!("{}: {}", cert.label(), violation)),
            None => findings.info(format!(
                "{}: {} key of {} bits",
                cert.label(),
                key.algorithm.name(),
                bits
            )),
        }
    }
    findings
}

/// A certificate passes if any declared version's table holds a permitted
/// entry naming its signature algorithm.
pub(crate) fn check_signature_algorithms(
    chain: &[ChainCertificate],
    tables: &[(TlsVersion, &SpecTable)],
) -> Findings {
    let mut findings = Findings::new();
    if tables.is_empty() {
        findings.fatal("no signature algorithm requirements for the declared TLS versions");
        return findings;
    }
    for cert in chain {
        let signature = &cert.info.signature;
        if signature.family.is_none() {
            findings.error(format!(
                "{}: unknown signature algorithm {}",
                cert.label(),
                signature.name
            ));
            continue;
        }
        let accepted = tables.iter().find(|(version, table)| {
            table.iter().any(|entry| {
                entry.restriction.permits()
                    && match version {
                        TlsVersion::Tls13 => matches_tls13(&entry.description, signature),
                        _ => matches_tls12(&entry.description, signature),
                    }
            })
        });
        match accepted {
            Some((version, _)) => findings.info(format!(
                "{}: signature algorithm {} is allowed for {}",
                cert.label(),
                signature.name,
                version
            )),
            None => findings.error(format!(
                "{}: signature algorithm {} is not allowed",
                cert.label(),
                signature.name
            )),
        }
    }
    findings
}

pub(crate) fn check_no_wildcards(chain: &[ChainCertificate]) -> Findings {
    let mut findings = Findings::new();
    for cert in chain {
        for cn in cert.info.common_names() {
            if contains_wildcard(cn) {
                findings.error(format!("{}: wildcard in Common Name {}", cert.label(), cn));
            }
        }
        for name in cert.info.san_dns_names() {
            if contains_wildcard(name) {
                findings.error(format!(
                    "{}: wildcard in SubjectAltName DNS entry {}",
                    cert.label(),
                    name
                ));
            }
        }
    }
    findings
}

pub(crate) fn check_leaf_key_usage(leaf: Option<&ChainCertificate>) -> Findings {
    let mut findings = Findings::new();
    let Some(leaf) = leaf else {
        findings.fatal(LEAF_UNAVAILABLE);
        return findings;
    };
    let Some((critical, usage)) = leaf.info.key_usage() else {
        findings.error(format!("{}: KeyUsage extension is missing", leaf.label()));
        return findings;
    };
    if !critical {
        findings.error(format!("{}: KeyUsage extension is not critical", leaf.label()));
    }
    if !usage.digital_signature {
        findings.error(format!("{}: digitalSignature is not set", leaf.label()));
    }
    if usage.key_cert_sign {
        findings.error(format!("{}: keyCertSign must not be set", leaf.label()));
    }
    if usage.crl_sign {
        findings.error(format!("{}: cRLSign must not be set", leaf.label()));
    }
    findings
}

pub(crate) fn check_ca_key_usage(chain: &[ChainCertificate]) -> Findings {
    let mut findings = Findings::new();
    let mut cas = chain.iter().filter(|c| !c.is_leaf()).peekable();
    if cas.peek().is_none() {
        findings.info("no CA certificates in the chain");
    }
    for cert in cas {
        let Some((critical, usage)) = cert.info.key_usage() else {
            findings.error(format!("{}: KeyUsage extension is missing", cert.label()));
            continue;
        };
        if !critical {
            findings.error(format!("{}: KeyUsage extension is not critical", cert.label()));
        }
        if !usage.key_cert_sign {
            findings.error(format!("{}: keyCertSign is not set", cert.label()));
        }
        if !usage.crl_sign {
            findings.error(format!("{}: cRLSign is not set", cert.label()));
        }
    }
    findings
}

pub(crate) fn check_extended_key_usage(
    leaf: Option<&ChainCertificate>,
    role: ApplicationRole,
) -> Findings {
    let mut findings = Findings::new();
    let Some(leaf) = leaf else {
        findings.fatal(LEAF_UNAVAILABLE);
        return findings;
    };
    let (purpose, purpose_name) = match role {
        ApplicationRole::Server => (oid::EKU_SERVER_AUTH, "id-kp-serverAuth"),
        ApplicationRole::Client => (oid::EKU_CLIENT_AUTH, "id-kp-clientAuth"),
    };
    match leaf.info.ext_key_usage() {
        None => findings.error(format!(
            "{}: ExtendedKeyUsage extension is missing",
            leaf.label()
        )),
        Some(purposes) if purposes.iter().any(|p| p == purpose) => {}
        Some(_) => findings.error(format!(
            "{}: ExtendedKeyUsage does not contain {}",
            leaf.label(),
            purpose_name
        )),
    }
    findings
}

pub(crate) fn check_domain_names(
    leaf: Option<&ChainCertificate>,
    role: ApplicationRole,
    required: &[String],
) -> Findings {
    let mut findings = Findings::new();
    if role == ApplicationRole::Client {
        findings.info("domain name coverage is not applicable for a client");
        return findings;
    }
    let Some(leaf) = leaf else {
        findings.fatal(LEAF_UNAVAILABLE);
        return findings;
    };
    let present = leaf.info.san_dns_names();
    for name in required {
        if !present.iter().any(|dns| dns.eq_ignore_ascii_case(name)) {
            findings.error(format!(
                "{}: domain name {} is not a SubjectAltName DNS entry",
                leaf.label(),
                name
            ));
        }
    }
    findings
}

pub(crate) fn check_basic_constraints(chain: &[ChainCertificate]) -> Findings {
    let mut findings = Findings::new();
    for cert in chain.iter().filter(|c| !c.is_leaf()) {
        let Some((critical, ca, path_len)) = cert.info.basic_constraints() else {
            findings.error(format!(
                "{}: BasicConstraints extension is missing",
                cert.label()
            ));
            continue;
        };
        if !critical {
            findings.error(format!(
                "{}: BasicConstraints extension is not critical",
                cert.label()
            ));
        }
        if !ca {
            findings.error(format!("{}: BasicConstraints does not assert cA", cert.label()));
        }
        match path_len {
            None => findings.warning(format!(
                "{}: no pathLenConstraint; manual verification required",
                cert.label()
            )),
            Some(len) => findings.info(format!("{}: pathLenConstraint {}", cert.label(), len)),
        }
    }
    findings
}

pub(crate) fn check_validity_duration(chain: &[ChainCertificate]) -> Findings {
    let mut findings = Findings::new();
    for cert in chain {
        let (Some(not_before), Some(not_after)) =
            (cert.info.not_before.to_offset(), cert.info.not_after.to_offset())
        else {
            findings.fatal(format!("{}: validity dates out of range", cert.label()));
            continue;
        };
        let role = validity_role(&cert.info);
        let years = full_years(not_before, not_after);
        if years >= role.max_validity_years() {
            findings.error(format!(
                "{}: valid for {} full years, a {} must be valid for less than {}",
                cert.label(),
                years,
                role,
                role.max_validity_years()
            ));
        }
    }
    findings
}

pub(crate) fn check_current_validity(chain: &[ChainCertificate], now: i64) -> Findings {
    let mut findings = Findings::new();
    for cert in chain {
        if now < cert.info.not_before.timestamp {
            findings.error(format!(
                "{}: not yet valid (notBefore {})",
                cert.label(),
                cert.info.not_before
            ));
        } else if now > cert.info.not_after.timestamp {
            findings.error(format!(
                "{}: expired (notAfter {})",
                cert.label(),
                cert.info.not_after
            ));
        }
    }
    findings
}

//! Revocation status against caller-supplied CRLs.
//!
//! Fetching the lists is up to the caller; this module only reads them. A
//! list applies to a certificate when its issuer name matches the
//! certificate's issuer and it is in force at the verification time. CRL
//! signatures are not verified.

use super::ChainCertificate;
use crate::fields::RevocationList;
use crate::parser::parse_crls;
use crate::verdict::Findings;

/// Revocation lists available to the status check, together with any
/// problems met while loading them.
#[derive(Debug, Clone, Default)]
pub struct RevocationLists {
    pub lists: Vec<RevocationList>,
    /// Fatal findings for CRL files that could not be parsed.
    pub load_findings: Findings,
}

impl RevocationLists {
    /// Parse every supplied DER or PEM CRL file.
    pub fn load(files: &[Vec<u8>]) -> Self {
        let mut loaded = Self::default();
        for (i, file) in files.iter().enumerate() {
            match parse_crls(file) {
                Ok(parsed) => {
                    tracing::debug!(file = i, lists = parsed.len(), "loaded revocation lists");
                    loaded.lists.extend(parsed);
                }
                Err(e) => loaded
                    .load_findings
                    .fatal(format!("CRL file {} could not be parsed: {}", i, e)),
            }
        }
        loaded
    }
}

impl From<Vec<RevocationList>> for RevocationLists {
    fn from(lists: Vec<RevocationList>) -> Self {
        Self {
            lists,
            load_findings: Findings::new(),
        }
    }
}

/// No certificate of the chain may be listed on a current CRL of its issuer.
///
/// A certificate that names CRL distribution points needs a current list
/// from its issuer; without one it fails, or needs manual review when it is
/// self-issued. Certificates without any CRL distribution point are left to
/// the revocation-information check.
pub(crate) fn check_revocation_status(
    chain: &[ChainCertificate],
    crls: &RevocationLists,
    now: i64,
) -> Findings {
    let mut findings = crls.load_findings.clone();
    for cert in chain {
        let issuer = cert.info.issuer.to_oneline();
        let from_issuer: Vec<&RevocationList> = crls
            .lists
            .iter()
            .filter(|list| list.issuer == cert.info.issuer)
            .collect();
        let current: Vec<&RevocationList> = from_issuer
            .iter()
            .copied()
            .filter(|list| list.is_current(now))
            .collect();

        if let Some(entry) = current.iter().find_map(|list| list.find(&cert.info.serial)) {
            findings.error(format!(
                "{}: revoked by the CRL of {} (reason: {})",
                cert.label(),
                issuer,
                entry.reason
            ));
            continue;
        }
        if !current.is_empty() {
            findings.info(format!("{}: not listed on the CRL of {}", cert.label(), issuer));
            continue;
        }
        if cert.info.crl_urls().is_empty() {
            findings.info(format!(
                "{}: no CRL distribution point, status not checked against a CRL",
                cert.label()
            ));
            continue;
        }

        let message = if from_issuer.is_empty() {
            format!("{}: no CRL of {} was supplied", cert.label(), issuer)
        } else {
            format!("{}: no CRL of {} is current", cert.label(), issuer)
        };
        if cert.info.self_issued {
            findings.warning(format!("{}; manual review required", message));
        } else {
            findings.error(message);
        }
    }
    findings
}

//! Revocation-information presence and reachability.
//!
//! Whether a CRL or OCSP source actually answers is decided by a
//! [`ReachabilityProbe`]. The shipped [`TcpProbe`] only opens a TCP
//! connection to each candidate; fetching and parsing revocation data is
//! left to the caller.

use super::ChainCertificate;
use crate::verdict::Findings;
use rayon::prelude::*;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use url::{Host, Url};

/// Default per-attempt connection timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Decides whether a revocation source URI can be reached.
pub trait ReachabilityProbe: Sync {
    fn is_reachable(&self, uri: &str) -> bool;
}

/// Probes a URI by connecting to its host over TCP. Name resolution and each
/// connection attempt are both bounded by the timeout.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

fn default_port(url: &Url) -> Option<u16> {
    url.port_or_known_default().or(match url.scheme() {
        "ldap" => Some(389),
        "ldaps" => Some(636),
        _ => None,
    })
}

/// Resolve on a helper thread so a stalled lookup cannot outlast `timeout`.
/// A lookup that times out is abandoned; its thread finishes on its own.
fn resolve_domain(domain: &str, port: u16, timeout: Duration) -> Vec<SocketAddr> {
    let (tx, rx) = mpsc::channel();
    let host = domain.to_string();
    thread::spawn(move || {
        let resolved = (host.as_str(), port)
            .to_socket_addrs()
            .map(|addrs| addrs.collect::<Vec<_>>());
        let _ = tx.send(resolved);
    });
    match rx.recv_timeout(timeout) {
        Ok(Ok(addrs)) => addrs,
        Ok(Err(e)) => {
            tracing::debug!(host = domain, error = %e, "failed to resolve revocation host");
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(host = domain, error = %e, "revocation host lookup timed out");
            Vec::new()
        }
    }
}

fn resolve(url: &Url, timeout: Duration) -> Vec<SocketAddr> {
    let Some(port) = default_port(url) else {
        return Vec::new();
    };
    match url.host() {
        Some(Host::Domain(domain)) => resolve_domain(domain, port, timeout),
        Some(Host::Ipv4(ip)) => vec![SocketAddr::new(ip.into(), port)],
        Some(Host::Ipv6(ip)) => vec![SocketAddr::new(ip.into(), port)],
        None => Vec::new(),
    }
}

impl ReachabilityProbe for TcpProbe {
    fn is_reachable(&self, uri: &str) -> bool {
        let url = match Url::parse(uri) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(uri, error = %e, "unparsable revocation URI");
                return false;
            }
        };
        for addr in resolve(&url, self.timeout) {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return true,
                Err(e) => tracing::debug!(uri, %addr, error = %e, "revocation source unreachable"),
            }
        }
        false
    }
}

/// Every certificate needs CRL distribution points or AIA, and at least one
/// listed source must be reachable. A self-issued certificate without a
/// reachable source only needs manual review.
pub(crate) fn check_revocation_info(
    chain: &[ChainCertificate],
    probe: &dyn ReachabilityProbe,
) -> Findings {
    let per_certificate: Vec<Findings> = chain
        .par_iter()
        .map(|cert| probe_certificate(cert, probe))
        .collect();

    let mut findings = Findings::new();
    for f in per_certificate {
        findings.merge(f);
    }
    findings
}

fn probe_certificate(cert: &ChainCertificate, probe: &dyn ReachabilityProbe) -> Findings {
    let mut findings = Findings::new();
    let self_signed = cert.info.self_issued;

    if !cert.info.has_revocation_extension() {
        let message = format!(
            "{}: neither CRL distribution points nor authority information access present",
            cert.label()
        );
        if self_signed {
            findings.warning(format!("{}; manual review required", message));
        } else {
            findings.error(message);
        }
        return findings;
    }

    let mut candidates: Vec<&str> = cert.info.crl_urls();
    for uri in cert.info.aia_urls() {
        if !candidates.contains(&uri) {
            candidates.push(uri);
        }
    }

    match candidates.iter().find(|uri| probe.is_reachable(uri)) {
        Some(uri) => findings.info(format!(
            "{}: revocation information reachable at {}",
            cert.label(),
            uri
        )),
        None => {
            let message = format!(
                "{}: no reachable revocation source among [{}]",
                cert.label(),
                candidates.join(", ")
            );
            if self_signed {
                findings.warning(format!("{}; manual review required", message));
            } else {
                findings.error(message);
            }
        }
    }
    findings
}

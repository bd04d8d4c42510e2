#![no_main]

use libfuzzer_sys::fuzz_target;
use tlsconf_lib::certificate::{run_chain_checks, ChainOptions};
use tlsconf_lib::{
    assemble_chain, parse_cert, ChainCertificate, ChainEntry, DigestAlgorithm, DutProfile,
    ReachabilityProbe, RevocationLists, TlsSpecification, TlsVersion, VersionSpecification,
};

struct Offline;

impl ReachabilityProbe for Offline {
    fn is_reachable(&self, _uri: &str) -> bool {
        false
    }
}

fuzz_target!(|data: &[u8]| {
    // Neither parser may panic, regardless of input.
    let crls = RevocationLists::load(&[data.to_vec()]);
    let Ok(cert) = parse_cert(data) else {
        return;
    };
    let _ = cert.subject_string();
    let _ = cert.fingerprint(DigestAlgorithm::Sha256);
    let _ = cert.san_entries();
    let _ = cert.crl_urls();
    let _ = cert.aia_urls();

    // Neither assembly nor any chain check may panic on a parsed certificate.
    let entries = [ChainEntry {
        fingerprint: cert.fingerprint(DigestAlgorithm::Sha1),
        subject: cert.subject_string(),
    }];
    let _ = assemble_chain(&entries, &[data.to_vec()]);

    let spec = TlsSpecification {
        tls_versions: Default::default(),
        versions: [(TlsVersion::Tls13, VersionSpecification::default())].into(),
        key_lengths: Default::default(),
        max_session_lifetime: std::time::Duration::from_secs(3600),
    };
    let chain = [ChainCertificate::new(0, cert)];
    let _ = run_chain_checks(
        &chain,
        &DutProfile::default(),
        &spec,
        &crls,
        &ChainOptions::default(),
        &Offline,
    );
});

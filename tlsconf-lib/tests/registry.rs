#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Tests for the IANA lookup tables and table entry metadata.

use tlsconf_lib::*;

#[test]
fn named_group_code_points() {
    assert_eq!(NamedGroup::Sect163k1.code(), 0x0001);
    assert_eq!(NamedGroup::Secp256r1.code(), 0x0017);
    assert_eq!(NamedGroup::X25519.code(), 0x001D);
    assert_eq!(NamedGroup::BrainpoolP512r1Tls13.code(), 0x0021);
    assert_eq!(NamedGroup::Ffdhe2048.code(), 0x0100);
    assert_eq!(NamedGroup::Ffdhe8192.code(), 0x0104);
    assert!(NamedGroup::Ffdhe3072.is_finite_field());
    assert!(!NamedGroup::X448.is_finite_field());
}

#[test]
fn named_group_codes_are_unique() {
    let codes: std::collections::BTreeSet<u16> =
        NamedGroup::ALL.iter().map(|g| g.code()).collect();
    assert_eq!(codes.len(), NamedGroup::ALL.len());
    for group in NamedGroup::ALL {
        assert_eq!(NamedGroup::from_code(group.code()), Some(group));
        assert_eq!(NamedGroup::from_name(group.name()), Some(group));
    }
    assert_eq!(NamedGroup::X448.code(), 0x001E);
    assert_eq!(NamedGroup::Ffdhe2048.name(), "ffdhe2048");
}

#[test]
fn named_group_lookup() {
    assert_eq!(NamedGroup::from_code(0x0018), Some(NamedGroup::Secp384r1));
    assert_eq!(NamedGroup::from_name("x25519"), Some(NamedGroup::X25519));
    assert_eq!(NamedGroup::from_name("P-256"), None);
    assert_eq!(NamedGroup::Secp256r1.to_string(), "secp256r1(0x0017)");
}

#[test]
fn named_group_versions() {
    assert!(NamedGroup::Secp256r1.valid_for(TlsVersion::Tls13));
    assert!(NamedGroup::Secp256r1.valid_for(TlsVersion::Tls12));
    assert!(!NamedGroup::Sect571r1.valid_for(TlsVersion::Tls13));
    assert!(!NamedGroup::BrainpoolP256r1Tls13.valid_for(TlsVersion::Tls12));
}

#[test]
fn extension_type_lookup() {
    assert_eq!(ExtensionType::from_code(0x002B), Some(ExtensionType::SupportedVersions));
    assert_eq!(ExtensionType::from_name("KEY_SHARE"), Some(ExtensionType::KeyShare));
    assert_eq!(ExtensionType::RenegotiationInfo.code(), 0xFF01);
    assert_eq!(ExtensionType::KeyShare.to_string(), "key_share(51)");
    assert!(ExtensionType::KeyShare
        .versions()
        .contains(&TlsVersion::Tls13));
}

#[test]
fn tls_version_names() {
    assert_eq!(TlsVersion::from_name("TLSv1.2"), Some(TlsVersion::Tls12));
    assert_eq!(TlsVersion::Tls13.code(), 0x0304);
    assert_eq!(TlsVersion::Tls10.to_string(), "TLSv1.0");
}

#[test]
fn psk_categories() {
    let psk = SpecEntry::new("TLS_PSK_WITH_AES_128_GCM_SHA256", RestrictionLevel::Required)
        .with_kind(PSK_CIPHER_SUITE_KINDS[1]);
    assert!(psk.is_psk());
    let plain = SpecEntry::new("TLS_AES_128_GCM_SHA256", RestrictionLevel::Required)
        .with_kind("TLS13-CipherSuites");
    assert!(!plain.is_psk());
}

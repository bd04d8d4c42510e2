#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Tests for the ICS checklist rules and the checklist suite.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tlsconf_lib::checklist::*;
use tlsconf_lib::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn table(entries: &[(&str, RestrictionLevel)]) -> SpecTable {
    SpecTable::from_entries(
        entries
            .iter()
            .map(|(name, level)| SpecEntry::new(*name, *level)),
    )
    .unwrap()
}

fn ranked(entries: &[(&str, u32)]) -> SpecTable {
    SpecTable::from_entries(entries.iter().map(|(name, priority)| {
        SpecEntry::new(*name, RestrictionLevel::Optional).with_priority(*priority)
    }))
    .unwrap()
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn rsa_table() -> KeyLengthTable {
    KeyLengthTable::new(vec![KeyLengthRequirement::new(
        "RSA",
        vec![
            KeyLengthWindow::new(2000, UseUntil::Year(2029)),
            KeyLengthWindow::new(3000, UseUntil::Unbounded),
        ],
    )])
}

const SPEC_JSON: &str = r#"{
    "tlsVersions": [
        { "description": "TLSv1.2", "restriction": "REQUIRED" },
        { "description": "TLSv1.3", "restriction": "OPTIONAL" },
        { "description": "TLSv1.1", "restriction": "FORBIDDEN" },
        { "description": "TLSv1.0", "restriction": "FORBIDDEN" }
    ],
    "versions": {
        "TLSv1.2": {
            "cipherSuites": [
                { "description": "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", "restriction": "REQUIRED", "priority": 1 },
                { "description": "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", "restriction": "OPTIONAL", "priority": 2 },
                { "description": "TLS_PSK_WITH_AES_128_GCM_SHA256", "restriction": "REQUIRED", "priority": 3, "kind": "PSK-based-CipherSuites" },
                { "description": "TLS_RSA_WITH_RC4_128_SHA", "restriction": "FORBIDDEN", "priority": 9 }
            ],
            "groups": [
                { "description": "secp256r1", "restriction": "ATLEASTONE" },
                { "description": "secp384r1", "restriction": "ATLEASTONE" },
                { "description": "secp192r1", "restriction": "FORBIDDEN" }
            ],
            "signatureAlgorithms": [
                { "description": "ecdsa_secp256r1_sha256", "restriction": "REQUIRED" },
                { "description": "rsa_pkcs1_sha1", "restriction": "FORBIDDEN" }
            ]
        },
        "TLSv1.3": {
            "cipherSuites": [
                { "description": "TLS_AES_128_GCM_SHA256", "restriction": "REQUIRED", "priority": 1 },
                { "description": "TLS_AES_256_GCM_SHA384", "restriction": "OPTIONAL", "priority": 2 }
            ],
            "groups": [
                { "description": "x25519", "restriction": "REQUIRED" }
            ],
            "signatureAlgorithms": [
                { "description": "ecdsa_secp256r1_sha256", "restriction": "REQUIRED" }
            ],
            "certificateSignatureAlgorithms": [
                { "description": "ecdsa_secp256r1_sha256", "restriction": "REQUIRED" },
                { "description": "rsa_pkcs1_sha1", "restriction": "FORBIDDEN" }
            ]
        }
    },
    "keyLengths": [
        { "algorithm": "RSA", "windows": [
            { "minimumBits": 2000, "useUntil": "2029" },
            { "minimumBits": 3000, "useUntil": "2029+" }
        ] },
        { "algorithm": "ECDSA", "windows": [ { "minimumBits": 250, "useUntil": "2029+" } ] }
    ],
    "maxSessionLifetime": "48h"
}"#;

const DUT_JSON: &str = r#"{
    "icsVersion": "2.4.1",
    "role": "SERVER",
    "sessionLifetime": "24h",
    "versions": {
        "TLSv1.2": {
            "cipherSuites": [
                "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
                "TLS_EMPTY_RENEGOTIATION_INFO_SCSV",
                "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"
            ],
            "groups": ["secp256r1"],
            "signatureAlgorithms": ["ecdsa_secp256r1_sha256", "rsa_pss_rsae_sha256"],
            "keyLengths": { "RSA": 3072, "ECDSA": 256 }
        },
        "TLSv1.3": {
            "cipherSuites": ["TLS_AES_128_GCM_SHA256", "TLS_AES_256_GCM_SHA384"],
            "groups": ["x25519"],
            "signatureAlgorithms": ["ecdsa_secp256r1_sha256"],
            "certificateSignatureAlgorithms": ["ecdsa_secp256r1_sha256"],
            "sessionLifetime": "1h 30m"
        }
    }
}"#;

fn run(dut: &DutProfile, spec: &TlsSpecification) -> Vec<Verdict> {
    let options = ChecklistOptions {
        as_of_year: Some(2026),
    };
    run_checklist(dut, spec, &options, &mut MemorySink::new()).unwrap()
}

fn verdict<'a>(verdicts: &'a [Verdict], check: &str) -> &'a Verdict {
    verdicts
        .iter()
        .find(|v| v.check == check)
        .unwrap_or_else(|| panic!("no verdict for {}", check))
}

// ---------------------------------------------------------------------------
// Required / forbidden / at least one
// ---------------------------------------------------------------------------

#[test]
fn required_missing_is_reported() {
    let t = table(&[
        ("A", RestrictionLevel::Required),
        ("B", RestrictionLevel::Required),
        ("C", RestrictionLevel::Optional),
    ]);
    assert_eq!(verify_required_present(&set(&["A", "C"]), &t), names(&["B"]));
    assert!(verify_required_present(&set(&["A", "B"]), &t).is_empty());
}

#[test]
fn forbidden_and_unlisted() {
    let t = table(&[
        ("A", RestrictionLevel::Optional),
        ("X", RestrictionLevel::Forbidden),
    ]);
    let declared = set(&["A", "X", "Z"]);

    let rejected = verify_none_forbidden(&declared, &t, UnlistedPolicy::Reject);
    assert_eq!(
        rejected,
        vec![
            ForbiddenViolation::Forbidden("X".into()),
            ForbiddenViolation::Unlisted("Z".into())
        ]
    );

    let permitted = verify_none_forbidden(&declared, &t, UnlistedPolicy::Permit);
    assert_eq!(permitted, vec![ForbiddenViolation::Forbidden("X".into())]);
}

#[test]
fn at_least_one_group() {
    let t = table(&[
        ("secp256r1", RestrictionLevel::AtLeastOne),
        ("secp384r1", RestrictionLevel::AtLeastOne),
    ]);
    assert!(verify_at_least_one(&set(&["secp384r1"]), &t).is_none());
    assert_eq!(
        verify_at_least_one(&set(&["x25519"]), &t),
        Some(names(&["secp256r1", "secp384r1"]))
    );
}

#[test]
fn empty_at_least_one_set_is_satisfied() {
    let t = table(&[("A", RestrictionLevel::Required)]);
    assert!(verify_at_least_one(&BTreeSet::new(), &t).is_none());
}

#[test]
fn duplicate_table_entry_rejected() {
    let err = SpecTable::from_entries(vec![
        SpecEntry::new("A", RestrictionLevel::Required),
        SpecEntry::new("A", RestrictionLevel::Forbidden),
    ])
    .unwrap_err();
    assert!(matches!(err, ConformanceError::DuplicateEntry(name) if name == "A"));
}

#[test]
fn restriction_level_names() {
    assert_eq!("ATLEASTONE".parse::<RestrictionLevel>().unwrap(), RestrictionLevel::AtLeastOne);
    assert_eq!("at_least_one".parse::<RestrictionLevel>().unwrap(), RestrictionLevel::AtLeastOne);
    assert!("SOMETIMES".parse::<RestrictionLevel>().is_err());
    assert!(!RestrictionLevel::Forbidden.permits());
    assert!(RestrictionLevel::Optional.permits());
}

// ---------------------------------------------------------------------------
// Priority order
// ---------------------------------------------------------------------------

#[test]
fn priority_order_in_order() {
    let t = ranked(&[("TLS_A", 1), ("TLS_B", 2)]);
    assert!(verify_priority_order(&names(&["TLS_A", "TLS_B"]), &t).is_empty());
}

#[test]
fn priority_order_reversed() {
    let t = ranked(&[("TLS_A", 1), ("TLS_B", 2)]);
    let violations = verify_priority_order(&names(&["TLS_B", "TLS_A"]), &t);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].name(), "TLS_B");
}

#[test]
fn priority_order_equal_priorities_pass() {
    let t = ranked(&[("TLS_A", 1), ("TLS_B", 1)]);
    assert!(verify_priority_order(&names(&["TLS_B", "TLS_A"]), &t).is_empty());
}

#[test]
fn priority_order_ignores_scsv() {
    let t = ranked(&[("TLS_A", 1), ("TLS_B", 2)]);
    let ordered = names(&["TLS_A", TLS_EMPTY_RENEGOTIATION_INFO_SCSV, "TLS_B"]);
    assert!(verify_priority_order(&ordered, &t).is_empty());
}

#[test]
fn priority_order_reports_each_unlisted_once() {
    let t = ranked(&[("TLS_A", 1)]);
    let violations = verify_priority_order(&names(&["TLS_X", "TLS_Y", "TLS_A", "TLS_X"]), &t);
    assert_eq!(
        violations,
        vec![
            PriorityViolation::Unlisted("TLS_X".into()),
            PriorityViolation::Unlisted("TLS_Y".into())
        ]
    );
}

// ---------------------------------------------------------------------------
// Key lengths and session lifetime
// ---------------------------------------------------------------------------

#[test]
fn key_length_window_expires() {
    let t = rsa_table();
    // Both windows apply in 2028: the weaker 2000-bit minimum is enough.
    assert!(check_key_length("RSA", 2048, &t, 2028).is_none());
    // Only the unbounded 3000-bit window remains in 2030.
    let violation = check_key_length("RSA", 2048, &t, 2030).unwrap();
    assert_eq!(
        violation,
        KeyLengthViolation::BelowMinimum {
            algorithm: "RSA".into(),
            bits: 2048,
            minimum: Some(3000)
        }
    );
}

#[test]
fn rsa_1024_fails_unbounded_2048() {
    let t = KeyLengthTable::new(vec![KeyLengthRequirement::new(
        "RSA",
        vec![KeyLengthWindow::new(2048, UseUntil::Unbounded)],
    )]);
    assert!(check_key_length("RSA", 1024, &t, 2026).is_some());
}

#[test]
fn unknown_key_algorithm_has_no_minimum() {
    let observed = BTreeMap::from([("GOST".to_string(), 512)]);
    let violations = verify_key_length_table(&observed, &rsa_table(), 2026);
    assert_eq!(
        violations,
        vec![KeyLengthViolation::NoSpecifiedMinimum {
            algorithm: "GOST".into(),
            bits: 512
        }]
    );
}

#[test]
fn key_length_lookup_ignores_case() {
    assert!(check_key_length("rsa", 3072, &rsa_table(), 2040).is_none());
}

#[test]
fn use_until_parsing() {
    assert_eq!("2029".parse::<UseUntil>().unwrap(), UseUntil::Year(2029));
    assert_eq!("2029+".parse::<UseUntil>().unwrap(), UseUntil::Unbounded);
    assert!("soon".parse::<UseUntil>().is_err());
}

#[test]
fn session_lifetime_strictly_below() {
    let max = Duration::from_secs(48 * 3600);
    assert!(verify_session_lifetime(Duration::from_secs(3600), max));
    assert!(!verify_session_lifetime(max, max));
}

#[test]
fn duration_strings() {
    assert_eq!(parse_duration("24h").unwrap(), Duration::from_secs(86400));
    assert_eq!(parse_duration("1h 30m").unwrap(), Duration::from_secs(5400));
    assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
    assert!(parse_duration("30m 1h").is_err());
    assert!(parse_duration("").is_err());
    assert!(parse_duration("12").is_err());
    assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
}

// ---------------------------------------------------------------------------
// Configuration loading
// ---------------------------------------------------------------------------

#[test]
fn load_specification_json() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    assert_eq!(spec.tls_versions.len(), 4);
    assert_eq!(spec.max_session_lifetime, Duration::from_secs(48 * 3600));

    let tls12 = spec.version(TlsVersion::Tls12).unwrap();
    let psk = tls12.cipher_suites.get("TLS_PSK_WITH_AES_128_GCM_SHA256").unwrap();
    assert!(psk.is_psk());
    assert_eq!(psk.priority, 3);
    assert!(tls12.certificate_signature_algorithms.is_none());

    let rsa = spec.key_lengths.find("RSA").unwrap();
    assert_eq!(rsa.windows[1].use_until, UseUntil::Unbounded);
}

#[test]
fn specification_without_versions_rejected() {
    let json = r#"{ "tlsVersions": [], "versions": {}, "maxSessionLifetime": 60 }"#;
    assert!(matches!(
        TlsSpecification::from_json(json),
        Err(ConformanceError::InvalidSpecification(_))
    ));
}

#[test]
fn specification_with_duplicate_rejected() {
    let json = SPEC_JSON.replace(
        "\"TLSv1.0\", \"restriction\": \"FORBIDDEN\"",
        "\"TLSv1.1\", \"restriction\": \"FORBIDDEN\"",
    );
    assert!(TlsSpecification::from_json(&json).is_err());
}

#[test]
fn load_dut_json() {
    let dut = DutProfile::from_json(DUT_JSON).unwrap();
    assert_eq!(dut.role, ApplicationRole::Server);
    assert_eq!(
        dut.declared_versions().collect::<Vec<_>>(),
        vec![TlsVersion::Tls12, TlsVersion::Tls13]
    );
    assert_eq!(
        dut.session_lifetime_for(TlsVersion::Tls13),
        Some(Duration::from_secs(5400))
    );
    assert_eq!(
        dut.session_lifetime_for(TlsVersion::Tls12),
        Some(Duration::from_secs(86400))
    );
}

// ---------------------------------------------------------------------------
// Suite
// ---------------------------------------------------------------------------

#[test]
fn conforming_dut_passes_every_category() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    let dut = DutProfile::from_json(DUT_JSON).unwrap();
    let verdicts = run(&dut, &spec);

    let ids: Vec<&str> = verdicts.iter().map(|v| v.check.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "TLS_ICS_01", "TLS_ICS_02", "TLS_ICS_03", "TLS_ICS_04", "TLS_ICS_05", "TLS_ICS_06",
            "TLS_ICS_07", "TLS_ICS_08", "TLS_ICS_09", "TLS_ICS_10", "TLS_ICS_11", "TLS_ICS_12",
        ]
    );
    for v in &verdicts {
        assert!(v.passed, "{}", v);
    }
    // The software version always needs manual review.
    assert!(verdict(&verdicts, "TLS_ICS_01").has_warnings());
}

#[test]
fn psk_suites_not_demanded_for_tls12() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    let dut = DutProfile::from_json(DUT_JSON).unwrap();
    let verdicts = run(&dut, &spec);
    let v = verdict(&verdicts, "TLS_ICS_04");
    assert!(v.passed);
    assert!(!v
        .messages()
        .iter()
        .any(|m| m.contains("TLS_PSK_WITH_AES_128_GCM_SHA256")));
}

#[test]
fn nonconforming_dut_fails_expected_categories() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    let mut dut = DutProfile::from_json(DUT_JSON).unwrap();
    dut.ics_version = None;
    dut.session_lifetime = Some(Duration::from_secs(72 * 3600));
    dut.versions.insert(TlsVersion::Tls11, DutVersionProfile::default());
    {
        let tls12 = dut.versions.get_mut(&TlsVersion::Tls12).unwrap();
        tls12.cipher_suites = names(&[
            "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
            "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
            "TLS_RSA_WITH_RC4_128_SHA",
        ]);
        tls12.groups = set(&["x25519", "brainpool"]);
        tls12.signature_algorithms.insert("rsa_pkcs1_sha1".into());
        tls12.key_lengths.insert("RSA".into(), 1024);
    }

    let verdicts = run(&dut, &spec);
    let failed: Vec<&str> = verdicts
        .iter()
        .filter(|v| !v.passed)
        .map(|v| v.check.as_str())
        .collect();
    assert_eq!(
        failed,
        vec![
            "TLS_ICS_01", "TLS_ICS_03", "TLS_ICS_05", "TLS_ICS_06", "TLS_ICS_07", "TLS_ICS_08",
            "TLS_ICS_09", "TLS_ICS_11", "TLS_ICS_12",
        ]
    );

    let forbidden = verdict(&verdicts, "TLS_ICS_03");
    assert!(forbidden.messages().iter().any(|m| m.contains("TLSv1.1 is forbidden")));

    let groups = verdict(&verdicts, "TLS_ICS_07");
    assert!(groups
        .messages()
        .iter()
        .any(|m| m.starts_with("Missing at least one of the following groups for TLSv1.2")));

    let lifetime = verdict(&verdicts, "TLS_ICS_11");
    // TLSv1.3 keeps its own shorter lifetime.
    assert_eq!(lifetime.errors, 2);
}

#[test]
fn older_versions_use_tls12_tables_for_forbidden_and_order() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    let mut dut = DutProfile::from_json(DUT_JSON).unwrap();
    dut.versions.insert(
        TlsVersion::Tls11,
        DutVersionProfile {
            cipher_suites: names(&["TLS_RSA_WITH_RC4_128_SHA", "TLS_UNHEARD_OF"]),
            groups: set(&["secp192r1"]),
            ..Default::default()
        },
    );
    let verdicts = run(&dut, &spec);

    let forbidden = verdict(&verdicts, "TLS_ICS_05");
    assert!(!forbidden.passed);
    assert_eq!(forbidden.errors, 2);
    let messages = forbidden.messages();
    assert!(messages
        .iter()
        .any(|m| m.ends_with("TLSv1.1: TLS_RSA_WITH_RC4_128_SHA is forbidden")));
    assert!(messages
        .iter()
        .any(|m| m.ends_with("TLSv1.1: TLS_UNHEARD_OF is not listed as allowed")));

    let groups = verdict(&verdicts, "TLS_ICS_07");
    assert!(!groups.passed);
    assert_eq!(groups.errors, 1);
    assert!(groups
        .messages()
        .contains(&"Declared group for TLSv1.1: secp192r1 is forbidden"));

    let order = verdict(&verdicts, "TLS_ICS_12");
    assert!(!order.passed);
    assert!(order
        .messages()
        .iter()
        .any(|m| m.contains("TLSv1.1: TLS_UNHEARD_OF has no specified priority")));

    // Borrowed tables never demand REQUIRED or AT_LEAST_ONE entries.
    assert!(verdict(&verdicts, "TLS_ICS_04").passed);
    assert!(verdict(&verdicts, "TLS_ICS_09").passed);
}

#[test]
fn version_without_any_tables_is_fatal() {
    let mut spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    spec.versions.remove(&TlsVersion::Tls13);
    let dut = DutProfile::from_json(DUT_JSON).unwrap();
    let verdicts = run(&dut, &spec);

    for check in ["TLS_ICS_04", "TLS_ICS_05", "TLS_ICS_07", "TLS_ICS_09", "TLS_ICS_12"] {
        let v = verdict(&verdicts, check);
        assert!(!v.passed, "{}", v);
        assert_eq!(v.fatal_errors, 1, "{}", v);
        assert!(v.messages().contains(&"No requirement tables apply to TLSv1.3"));
    }
}

#[test]
fn sink_receives_every_verdict() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    let dut = DutProfile::from_json(DUT_JSON).unwrap();
    let mut sink = MemorySink::new();
    let verdicts = run_checklist(&dut, &spec, &ChecklistOptions::default(), &mut sink).unwrap();
    assert_eq!(sink.verdicts, verdicts);
    assert!(sink.get("TLS_ICS_12").is_some());
}

#[test]
fn verdicts_serialize_to_json() {
    let spec = TlsSpecification::from_json(SPEC_JSON).unwrap();
    let dut = DutProfile::from_json(DUT_JSON).unwrap();
    let json = to_json(&run(&dut, &spec)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["check"], "TLS_ICS_01");
    assert_eq!(value[0]["findings"][0]["severity"], "warning");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn level_strategy() -> impl Strategy<Value = RestrictionLevel> {
    prop_oneof![
        Just(RestrictionLevel::Required),
        Just(RestrictionLevel::Forbidden),
        Just(RestrictionLevel::AtLeastOne),
        Just(RestrictionLevel::Optional),
    ]
}

proptest! {
    #[test]
    fn required_present_iff_all_required_declared(
        levels in prop::collection::btree_map("[a-e]", level_strategy(), 0..5),
        declared in prop::collection::btree_set("[a-e]", 0..5),
    ) {
        let t = SpecTable::from_entries(
            levels.iter().map(|(name, level)| SpecEntry::new(name.clone(), *level)),
        ).unwrap();
        let all_present = levels
            .iter()
            .filter(|(_, level)| **level == RestrictionLevel::Required)
            .all(|(name, _)| declared.contains(name));
        prop_assert_eq!(verify_required_present(&declared, &t).is_empty(), all_present);
    }

    #[test]
    fn none_forbidden_iff_no_forbidden_declared(
        levels in prop::collection::btree_map("[a-e]", level_strategy(), 0..5),
        declared in prop::collection::btree_set("[a-e]", 0..5),
    ) {
        let t = SpecTable::from_entries(
            levels.iter().map(|(name, level)| SpecEntry::new(name.clone(), *level)),
        ).unwrap();
        let clean = declared
            .iter()
            .all(|name| levels.get(name) != Some(&RestrictionLevel::Forbidden));
        prop_assert_eq!(
            verify_none_forbidden(&declared, &t, UnlistedPolicy::Permit).is_empty(),
            clean
        );
    }

    #[test]
    fn priority_check_is_idempotent(
        priorities in prop::collection::btree_map("[a-f]", 0u32..4, 1..6),
        order in prop::collection::vec("[a-g]", 0..8),
    ) {
        let t = SpecTable::from_entries(priorities.iter().map(|(name, p)| {
            SpecEntry::new(name.clone(), RestrictionLevel::Optional).with_priority(*p)
        })).unwrap();
        prop_assert_eq!(verify_priority_order(&order, &t), verify_priority_order(&order, &t));
    }

    #[test]
    fn sorted_listed_suites_never_violate(
        priorities in prop::collection::btree_map("[a-f]", 0u32..4, 1..6),
    ) {
        let t = SpecTable::from_entries(priorities.iter().map(|(name, p)| {
            SpecEntry::new(name.clone(), RestrictionLevel::Optional).with_priority(*p)
        })).unwrap();
        let mut order: Vec<String> = priorities.keys().cloned().collect();
        order.sort_by_key(|name| priorities[name]);
        prop_assert!(verify_priority_order(&order, &t).is_empty());
    }

    #[test]
    fn key_length_windows_expire_after_their_year(
        minimum in 512u32..4096,
        until in 2000i32..2100,
        bits in 256u32..8192,
    ) {
        let t = KeyLengthTable::new(vec![KeyLengthRequirement::new(
            "RSA",
            vec![KeyLengthWindow::new(minimum, UseUntil::Year(until))],
        )]);
        prop_assert_eq!(check_key_length("RSA", bits, &t, until).is_none(), bits >= minimum);
        prop_assert!(check_key_length("RSA", bits, &t, until + 1).is_some());
    }
}

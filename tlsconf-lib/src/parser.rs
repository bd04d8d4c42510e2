//! Certificate parsing from PEM and DER formats.

use crate::fields::{
    AiaEntry, CertificateInfo, DateTime, DistinguishedName, Extension, ExtensionValue,
    KeyAlgorithm, KeyUsageFlags, PublicKeyInfo, RevocationList, RevokedCertificate, SanEntry,
    SignatureFamily, SignatureInfo,
};
use crate::oid;
use crate::util;
use crate::ConformanceError;
use x509_parser::der_parser::asn1_rs::{Any, Class, Tag, ToDer};
use x509_parser::prelude::*;

/// Parse a certificate from PEM or DER (auto-detected).
///
/// If the input begins with `-----BEGIN` (after stripping whitespace), it is
/// treated as PEM. Otherwise it is treated as DER.
pub fn parse_cert(input: &[u8]) -> Result<CertificateInfo, ConformanceError> {
    if input.is_empty() {
        return Err(ConformanceError::ParseError("empty input".into()));
    }

    if util::is_pem(input) {
        parse_pem(input)
    } else {
        parse_der(input)
    }
}

/// Parse a certificate from PEM format.
pub fn parse_pem(input: &[u8]) -> Result<CertificateInfo, ConformanceError> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(input)
        .map_err(|e| ConformanceError::PemError(format!("{}", e)))?;

    if pem.label != "CERTIFICATE"
        && pem.label != "TRUSTED CERTIFICATE"
        && pem.label != "X509 CERTIFICATE"
    {
        return Err(ConformanceError::PemError(format!(
            "expected CERTIFICATE, got {}",
            pem.label
        )));
    }

    parse_der(&pem.contents)
}

/// Parse a certificate from DER format.
pub fn parse_der(input: &[u8]) -> Result<CertificateInfo, ConformanceError> {
    let (remaining, x509) = X509Certificate::from_der(input)
        .map_err(|e| ConformanceError::DerError(format!("{}", e)))?;

    // Use only the actual certificate bytes, not any trailing data,
    // so that fingerprints are computed over the correct content.
    let cert_len = input.len() - remaining.len();
    let cert_der = input.get(..cert_len).unwrap_or(input);
    Ok(build_certificate_info(&x509, cert_der))
}

/// Parse one CRL file: DER, or PEM holding one or more `X509 CRL` blocks.
pub fn parse_crls(input: &[u8]) -> Result<Vec<RevocationList>, ConformanceError> {
    if input.is_empty() {
        return Err(ConformanceError::ParseError("empty CRL input".into()));
    }
    if !util::is_pem(input) {
        return Ok(vec![parse_crl_der(input)?]);
    }

    let mut lists = Vec::new();
    for pem in Pem::iter_from_buffer(input) {
        let pem = pem.map_err(|e| ConformanceError::PemError(format!("CRL: {}", e)))?;
        if pem.label == "X509 CRL" {
            lists.push(parse_crl_der(&pem.contents)?);
        }
    }
    if lists.is_empty() {
        return Err(ConformanceError::PemError("no CRLs found in PEM input".into()));
    }
    Ok(lists)
}

fn parse_crl_der(input: &[u8]) -> Result<RevocationList, ConformanceError> {
    let (_, crl) = CertificateRevocationList::from_der(input)
        .map_err(|e| ConformanceError::DerError(format!("CRL: {}", e)))?;

    let revoked = crl
        .iter_revoked_certificates()
        .map(|entry| RevokedCertificate {
            serial: format_serial(entry.raw_serial()),
            reason: entry
                .reason_code()
                .map_or("unspecified", |(_, code)| crl_reason_name(&code))
                .to_string(),
        })
        .collect();

    Ok(RevocationList {
        issuer: build_dn(crl.issuer()),
        this_update: crl.last_update().timestamp(),
        next_update: crl.next_update().map(|t| t.timestamp()),
        revoked,
    })
}

/// RFC 5280 Section 5.3.1 reason names.
fn crl_reason_name(code: &ReasonCode) -> &'static str {
    match code.0 {
        1 => "keyCompromise",
        2 => "cACompromise",
        3 => "affiliationChanged",
        4 => "superseded",
        5 => "cessationOfOperation",
        6 => "certificateHold",
        8 => "removeFromCRL",
        9 => "privilegeWithdrawn",
        10 => "aACompromise",
        _ => "unspecified",
    }
}

fn build_certificate_info(x509: &X509Certificate, raw_der: &[u8]) -> CertificateInfo {
    let tbs = &x509.tbs_certificate;

    CertificateInfo {
        serial: format_serial(tbs.raw_serial()),
        signature: build_signature_info(&x509.signature_algorithm),
        issuer: build_dn(&tbs.issuer),
        subject: build_dn(&tbs.subject),
        not_before: DateTime::from_timestamp(tbs.validity.not_before.timestamp()),
        not_after: DateTime::from_timestamp(tbs.validity.not_after.timestamp()),
        public_key: build_public_key_info(&tbs.subject_pki),
        extensions: tbs.extensions().iter().map(build_extension).collect(),
        self_issued: tbs.subject.as_raw() == tbs.issuer.as_raw(),
        raw_der: raw_der.to_vec(),
    }
}

/// Format a serial number as a colon-separated uppercase hex string,
/// stripping leading zero bytes but keeping at least one byte.
fn format_serial(raw: &[u8]) -> String {
    let stripped = match raw.iter().position(|&b| b != 0) {
        Some(pos) => raw.get(pos..).unwrap_or(raw),
        None => raw.get(raw.len().saturating_sub(1)..).unwrap_or(raw),
    };
    util::hex_colon_upper(stripped)
}

fn build_signature_info(algo: &AlgorithmIdentifier) -> SignatureInfo {
    let oid_str = algo.algorithm.to_id_string();
    let (name, family, hash): (&str, Option<SignatureFamily>, Option<&str>) =
        match oid_str.as_str() {
            oid::SHA1_WITH_RSA => (
                "sha1WithRSAEncryption",
                Some(SignatureFamily::Rsa),
                Some("sha1"),
            ),
            oid::SHA224_WITH_RSA => (
                "sha224WithRSAEncryption",
                Some(SignatureFamily::Rsa),
                Some("sha224"),
            ),
            oid::SHA256_WITH_RSA => (
                "sha256WithRSAEncryption",
                Some(SignatureFamily::Rsa),
                Some("sha256"),
            ),
            oid::SHA384_WITH_RSA => (
                "sha384WithRSAEncryption",
                Some(SignatureFamily::Rsa),
                Some("sha384"),
            ),
            oid::SHA512_WITH_RSA => (
                "sha512WithRSAEncryption",
                Some(SignatureFamily::Rsa),
                Some("sha512"),
            ),
            oid::RSASSA_PSS => (
                "rsassaPss",
                Some(SignatureFamily::RsaPss),
                Some(pss_hash(algo.parameters.as_ref()).unwrap_or("unknown")),
            ),
            oid::ECDSA_WITH_SHA1 => ("ecdsa-with-SHA1", Some(SignatureFamily::Ecdsa), Some("sha1")),
            oid::ECDSA_WITH_SHA224 => (
                "ecdsa-with-SHA224",
                Some(SignatureFamily::Ecdsa),
                Some("sha224"),
            ),
            oid::ECDSA_WITH_SHA256 => (
                "ecdsa-with-SHA256",
                Some(SignatureFamily::Ecdsa),
                Some("sha256"),
            ),
            oid::ECDSA_WITH_SHA384 => (
                "ecdsa-with-SHA384",
                Some(SignatureFamily::Ecdsa),
                Some("sha384"),
            ),
            oid::ECDSA_WITH_SHA512 => (
                "ecdsa-with-SHA512",
                Some(SignatureFamily::Ecdsa),
                Some("sha512"),
            ),
            oid::DSA_WITH_SHA1 => ("dsaWithSHA1", Some(SignatureFamily::Dsa), Some("sha1")),
            oid::DSA_WITH_SHA224 => ("dsa_with_SHA224", Some(SignatureFamily::Dsa), Some("sha224")),
            oid::DSA_WITH_SHA256 => ("dsa_with_SHA256", Some(SignatureFamily::Dsa), Some("sha256")),
            oid::ED25519 => ("Ed25519", Some(SignatureFamily::Ed25519), None),
            oid::ED448 => ("Ed448", Some(SignatureFamily::Ed448), None),
            other => (other, None, None),
        };
    SignatureInfo {
        name: name.to_string(),
        family,
        hash: hash.map(str::to_string),
        oid: oid_str.clone(),
    }
}

/// Digest named by RSASSA-PSS parameters (RFC 4055): the explicit `[0]`
/// hashAlgorithm, SHA-1 when absent.
fn pss_hash(params: Option<&Any>) -> Option<&'static str> {
    let Some(params) = params else {
        return Some("sha1");
    };
    if params.data.is_empty() {
        return Some("sha1");
    }
    let (_, first) = Any::from_der(params.data).ok()?;
    if first.header.class() != Class::ContextSpecific || first.header.tag() != Tag(0) {
        return Some("sha1");
    }
    let (_, hash_alg) = AlgorithmIdentifier::from_der(first.data).ok()?;
    match hash_alg.algorithm.to_id_string().as_str() {
        oid::HASH_SHA1 => Some("sha1"),
        oid::HASH_SHA224 => Some("sha224"),
        oid::HASH_SHA256 => Some("sha256"),
        oid::HASH_SHA384 => Some("sha384"),
        oid::HASH_SHA512 => Some("sha512"),
        _ => None,
    }
}

fn build_dn(name: &X509Name) -> DistinguishedName {
    let mut components = Vec::new();
    for rdn in name.iter() {
        for attr in rdn.iter() {
            let key = util::oid_short_name(&attr.attr_type().to_id_string());
            let value = attr.as_str().unwrap_or("<binary>").to_string();
            components.push((key, value));
        }
    }
    DistinguishedName { components }
}

fn build_public_key_info(spki: &SubjectPublicKeyInfo) -> PublicKeyInfo {
    let oid_str = spki.algorithm.algorithm.to_id_string();

    let (algorithm, key_bits, curve) = match oid_str.as_str() {
        oid::RSA_ENCRYPTION | oid::RSASSA_PSS => (
            KeyAlgorithm::Rsa,
            extract_rsa_modulus_bits(&spki.subject_public_key.data),
            None,
        ),
        oid::EC_PUBLIC_KEY => {
            let (curve_name, order_bits) = extract_ec_curve(&spki.algorithm);
            (KeyAlgorithm::Ecdsa, order_bits, Some(curve_name))
        }
        oid::DSA => (
            KeyAlgorithm::Dsa,
            spki.algorithm
                .parameters
                .as_ref()
                .and_then(extract_dsa_prime_bits),
            None,
        ),
        oid::ED25519 => (KeyAlgorithm::Ed25519, Some(256), None),
        oid::ED448 => (KeyAlgorithm::Ed448, Some(448), None),
        _ => (KeyAlgorithm::Other(oid_str), None, None),
    };

    PublicKeyInfo {
        algorithm,
        key_bits,
        curve,
    }
}

/// Bit length of a big-endian unsigned integer.
fn bit_length(bytes: &[u8]) -> u32 {
    match bytes.iter().position(|&b| b != 0) {
        Some(pos) => {
            let significant = bytes.len() - pos;
            let leading = bytes.get(pos).map_or(0, |b| b.leading_zeros());
            (significant as u32) * 8 - leading
        }
        None => 0,
    }
}

/// First INTEGER of a DER SEQUENCE, as its bit length.
fn first_integer_bits(der: &[u8]) -> Option<u32> {
    let (_, parsed) = x509_parser::der_parser::parse_der(der).ok()?;
    let seq = parsed.as_sequence().ok()?;
    let bigint = seq.first().and_then(|m| m.as_bigint().ok())?;
    Some(bit_length(&bigint.to_bytes_be().1))
}

/// Extract the RSA modulus size from raw public key DER.
///
/// Returns `None` if the DER structure cannot be parsed.
fn extract_rsa_modulus_bits(data: &[u8]) -> Option<u32> {
    first_integer_bits(data)
}

/// Size of the DSA prime `p` from the `Dss-Parms` SEQUENCE.
fn extract_dsa_prime_bits(params: &Any) -> Option<u32> {
    let der = params.to_der_vec().ok()?;
    first_integer_bits(&der)
}

/// Named curve and the bit length of its group order.
fn extract_ec_curve(algo: &AlgorithmIdentifier) -> (String, Option<u32>) {
    if let Some(params) = &algo.parameters {
        if let Ok(oid) = params.as_oid() {
            let (name, bits) = match oid.to_id_string().as_str() {
                oid::CURVE_P192 => ("P-192", 192),
                oid::CURVE_P224 => ("P-224", 224),
                oid::CURVE_P256 => ("P-256", 256),
                oid::CURVE_P384 => ("P-384", 384),
                oid::CURVE_P521 => ("P-521", 521),
                oid::CURVE_SECP256K1 => ("secp256k1", 256),
                oid::CURVE_BRAINPOOL_P256R1 => ("brainpoolP256r1", 256),
                oid::CURVE_BRAINPOOL_P384R1 => ("brainpoolP384r1", 384),
                oid::CURVE_BRAINPOOL_P512R1 => ("brainpoolP512r1", 512),
                other => return (other.to_string(), None),
            };
            return (name.to_string(), Some(bits));
        }
    }
    ("unknown".into(), None)
}

fn build_extension(ext: &X509Extension) -> Extension {
    let value = match ext.parsed_extension() {
        ParsedExtension::BasicConstraints(bc) => ExtensionValue::BasicConstraints {
            ca: bc.ca,
            path_len: bc.path_len_constraint,
        },
        ParsedExtension::KeyUsage(ku) => ExtensionValue::KeyUsage(KeyUsageFlags {
            digital_signature: ku.digital_signature(),
            non_repudiation: ku.non_repudiation(),
            key_encipherment: ku.key_encipherment(),
            data_encipherment: ku.data_encipherment(),
            key_agreement: ku.key_agreement(),
            key_cert_sign: ku.key_cert_sign(),
            crl_sign: ku.crl_sign(),
            encipher_only: ku.encipher_only(),
            decipher_only: ku.decipher_only(),
        }),
        ParsedExtension::ExtendedKeyUsage(eku) => {
            let mut purposes: Vec<String> = [
                (eku.any, oid::EKU_ANY),
                (eku.server_auth, oid::EKU_SERVER_AUTH),
                (eku.client_auth, oid::EKU_CLIENT_AUTH),
                (eku.code_signing, oid::EKU_CODE_SIGNING),
                (eku.email_protection, oid::EKU_EMAIL_PROTECTION),
                (eku.time_stamping, oid::EKU_TIME_STAMPING),
                (eku.ocsp_signing, oid::EKU_OCSP_SIGNING),
            ]
            .into_iter()
            .filter(|(set, _)| *set)
            .map(|(_, purpose)| purpose.to_string())
            .collect();
            purposes.extend(eku.other.iter().map(|o| o.to_id_string()));
            ExtensionValue::ExtendedKeyUsage(purposes)
        }
        ParsedExtension::SubjectAlternativeName(san) => {
            let entries = san
                .general_names
                .iter()
                .map(general_name_to_san_entry)
                .collect();
            ExtensionValue::SubjectAltName(entries)
        }
        ParsedExtension::AuthorityInfoAccess(aia) => {
            let entries = aia
                .accessdescs
                .iter()
                .map(|desc| {
                    let method = match desc.access_method.to_id_string().as_str() {
                        oid::ACCESS_OCSP => "OCSP".into(),
                        oid::ACCESS_CA_ISSUERS => "CA Issuers".into(),
                        other => other.to_string(),
                    };
                    let location = general_name_to_san_entry(&desc.access_location)
                        .value()
                        .to_string();
                    AiaEntry { method, location }
                })
                .collect();
            ExtensionValue::AuthorityInfoAccess(entries)
        }
        ParsedExtension::CRLDistributionPoints(cdp) => {
            let mut uris = Vec::new();
            for point in &cdp.points {
                if let Some(x509_parser::extensions::DistributionPointName::FullName(names)) =
                    &point.distribution_point
                {
                    for gn in names {
                        if let GeneralName::URI(uri) = gn {
                            uris.push(uri.to_string());
                        }
                    }
                }
            }
            ExtensionValue::CrlDistributionPoints(uris)
        }
        _ => ExtensionValue::Raw(hex::encode(ext.value)),
    };

    Extension {
        oid: ext.oid.to_id_string(),
        critical: ext.critical,
        value,
    }
}

fn general_name_to_san_entry(gn: &GeneralName) -> SanEntry {
    match gn {
        GeneralName::DNSName(name) => SanEntry::Dns(name.to_string()),
        GeneralName::RFC822Name(email) => SanEntry::Email(email.to_string()),
        GeneralName::IPAddress(ip_bytes) => SanEntry::Ip(format_ip_bytes(ip_bytes)),
        GeneralName::URI(uri) => SanEntry::Uri(uri.to_string()),
        GeneralName::DirectoryName(dn) => SanEntry::DirName(build_dn(dn).to_oneline()),
        other => SanEntry::Other(format!("{:?}", other)),
    }
}

fn format_ip_bytes(bytes: &[u8]) -> String {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        std::net::Ipv4Addr::from(octets).to_string()
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        std::net::Ipv6Addr::from(octets).to_string()
    } else {
        hex::encode(bytes)
    }
}

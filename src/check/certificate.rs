//! Certificate shape validation.

use crate::decode::ViewCertificate;
use crate::error::{Error, Result};

/// Fields each certificate kind may print, keyed by the view's tag.
///
/// Each entry is an upper bound: a certificate may omit fields, never add
/// any. Kinds missing here are not checked.
pub const CERTIFICATE_FIELDS: &[(&str, &[&str])] = &[
    (
        "genesis key delegation",
        &["VRF key hash", "delegate key hash", "genesis key hash"],
    ),
    (
        "MIR",
        &["pot", "target stake addresses", "send to treasury", "send to reserves"],
    ),
    (
        "stake address deregistration",
        &["stake credential key hash", "stake credential script hash"],
    ),
    (
        "stake address registration",
        &["stake credential key hash", "stake credential script hash"],
    ),
    (
        "stake address delegation",
        &["pool", "stake credential key hash", "stake credential script hash"],
    ),
    ("stake pool retirement", &["epoch", "pool"]),
    (
        "stake pool registration",
        &[
            "VRF key hash",
            "cost",
            "margin",
            "metadata",
            "owners (stake key hashes)",
            "pledge",
            "pool",
            "relays",
            "reward account",
        ],
    ),
];

/// Allowed fields for a certificate kind, if the kind is registered.
pub fn allowed_fields(kind: &str) -> Option<&'static [&'static str]> {
    CERTIFICATE_FIELDS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, fields)| *fields)
}

/// Check that a certificate prints no field outside its kind's schema.
pub fn check_certificate_shape(cert: &ViewCertificate) -> Result<()> {
    let Some(allowed) = allowed_fields(&cert.kind) else {
        return Ok(());
    };

    let unexpected: Vec<String> = cert
        .fields
        .iter()
        .filter(|field| !allowed.contains(&field.as_str()))
        .cloned()
        .collect();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(Error::CertificateShape {
            kind: cert.kind.clone(),
            unexpected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert(kind: &str, fields: &[&str]) -> ViewCertificate {
        ViewCertificate {
            kind: kind.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_subset_passes() {
        let c = cert("stake address registration", &["stake credential key hash"]);
        assert!(check_certificate_shape(&c).is_ok());
    }

    #[test]
    fn test_full_schema_passes() {
        let c = cert("stake pool retirement", &["epoch", "pool"]);
        assert!(check_certificate_shape(&c).is_ok());
    }

    #[test]
    fn test_extra_field_fails() {
        let c = cert(
            "stake address registration",
            &["stake credential key hash", "bogus field"],
        );
        match check_certificate_shape(&c) {
            Err(Error::CertificateShape { kind, unexpected }) => {
                assert_eq!(kind, "stake address registration");
                assert_eq!(unexpected, vec!["bogus field".to_string()]);
            }
            other => panic!("Expected CertificateShape, got {:?}", other),
        }
    }

    #[test]
    fn test_unregistered_kind_skipped() {
        let c = cert("vote delegation", &["anything at all"]);
        assert!(check_certificate_shape(&c).is_ok());
        assert!(allowed_fields("vote delegation").is_none());
    }
}

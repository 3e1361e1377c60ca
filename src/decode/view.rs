//! Parsed `transaction view` output.

use crate::era::Era;
use crate::error::{Error, Result};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;

/// Keys of the `transaction view` document.
pub mod keys {
    pub const INPUTS: &str = "inputs";
    pub const OUTPUTS: &str = "outputs";
    pub const ADDRESS: &str = "address";
    pub const AMOUNT: &str = "amount";
    pub const FEE: &str = "fee";
    pub const VALIDITY_RANGE: &str = "validity range";
    pub const LOWER_BOUND: &str = "lower bound";
    pub const UPPER_BOUND: &str = "upper bound";
    pub const TIME_TO_LIVE: &str = "time to live";
    pub const MINT: &str = "mint";
    pub const WITHDRAWALS: &str = "withdrawals";
    pub const CERTIFICATES: &str = "certificates";
    pub const ERA: &str = "era";
    pub const COLLATERAL_INPUTS: &str = "collateral inputs";
    pub const REFERENCE_INPUTS: &str = "reference inputs";
}

/// A `transaction view` document, decoded from the CLI's YAML.
///
/// The tree is kept as loosely typed data; accessors pull out each field
/// in the shape the checks need.
#[derive(Debug, Clone)]
pub struct DecodedView {
    tree: Map<String, JsonValue>,
}

/// One entry of the `outputs` list.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTxOut<'a> {
    pub address: &'a str,
    pub amount: &'a JsonValue,
}

/// One entry of the `certificates` list: a single-key tagged map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCertificate {
    pub kind: String,
    pub fields: BTreeSet<String>,
}

impl DecodedView {
    /// Parse the text printed by `transaction view`.
    ///
    /// Both the legacy YAML and the newer JSON output parse here, JSON
    /// being a subset of YAML.
    pub fn parse(text: &str) -> Result<Self> {
        let value: JsonValue =
            serde_yaml::from_str(text).map_err(|e| Error::ViewParse(e.to_string()))?;

        match value {
            JsonValue::Object(tree) => Ok(DecodedView { tree }),
            other => Err(Error::ViewParse(format!(
                "expected a mapping at the top level, got {}",
                type_name(&other)
            ))),
        }
    }

    /// The whole document.
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.tree
    }

    /// Field lookup treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.tree.get(key).filter(|v| !v.is_null())
    }

    /// Transaction inputs, `hash#index`.
    pub fn inputs(&self) -> Result<BTreeSet<String>> {
        string_set(keys::INPUTS, self.get(keys::INPUTS))
    }

    /// Transaction outputs.
    pub fn outputs(&self) -> Result<Vec<ViewTxOut<'_>>> {
        let Some(outputs) = self.get(keys::OUTPUTS) else {
            return Ok(Vec::new());
        };
        let outputs = outputs.as_array().ok_or_else(|| invalid(keys::OUTPUTS, "expected a list"))?;

        outputs.iter().map(view_txout).collect()
    }

    /// Fee field, e.g. `"171617 Lovelace"`.
    pub fn fee(&self) -> Option<&JsonValue> {
        self.get(keys::FEE)
    }

    fn validity_range(&self) -> Result<Option<&Map<String, JsonValue>>> {
        match self.get(keys::VALIDITY_RANGE) {
            None => Ok(None),
            Some(JsonValue::Object(range)) => Ok(Some(range)),
            Some(_) => Err(invalid(keys::VALIDITY_RANGE, "expected a mapping")),
        }
    }

    /// `lower bound` of the validity range.
    pub fn invalid_before(&self) -> Result<Option<u64>> {
        let Some(range) = self.validity_range()? else {
            return Ok(None);
        };
        slot(keys::LOWER_BOUND, range.get(keys::LOWER_BOUND))
    }

    /// `upper bound` of the validity range, or the legacy `time to live`.
    pub fn invalid_hereafter(&self) -> Result<Option<u64>> {
        let Some(range) = self.validity_range()? else {
            return Ok(None);
        };
        match slot(keys::UPPER_BOUND, range.get(keys::UPPER_BOUND))? {
            Some(upper) => Ok(Some(upper)),
            None => slot(keys::TIME_TO_LIVE, range.get(keys::TIME_TO_LIVE)),
        }
    }

    /// The `mint` policy map, if any.
    pub fn mint(&self) -> Option<&JsonValue> {
        self.get(keys::MINT)
    }

    /// Withdrawal records.
    pub fn withdrawals(&self) -> Result<&[JsonValue]> {
        list(keys::WITHDRAWALS, self.get(keys::WITHDRAWALS))
    }

    /// Certificates, each reduced to its kind and field names.
    pub fn certificates(&self) -> Result<Vec<ViewCertificate>> {
        list(keys::CERTIFICATES, self.get(keys::CERTIFICATES))?
            .iter()
            .map(|cert| -> Result<ViewCertificate> {
                let (kind, body) = cert
                    .as_object()
                    .and_then(|m| m.iter().next())
                    .ok_or_else(|| invalid(keys::CERTIFICATES, "expected a single-key mapping"))?;
                let fields = match body {
                    JsonValue::Object(fields) => fields.keys().cloned().collect(),
                    _ => BTreeSet::new(),
                };
                Ok(ViewCertificate {
                    kind: kind.clone(),
                    fields,
                })
            })
            .collect()
    }

    /// Transaction era.
    pub fn era(&self) -> Result<Era> {
        self.get(keys::ERA)
            .ok_or_else(|| Error::MissingField(keys::ERA.to_string()))?
            .as_str()
            .ok_or_else(|| invalid(keys::ERA, "expected a string"))?
            .parse()
    }

    /// Collateral inputs; `None` when the key is missing.
    pub fn collateral_inputs(&self) -> Result<Option<BTreeSet<String>>> {
        if !self.tree.contains_key(keys::COLLATERAL_INPUTS) {
            return Ok(None);
        }
        string_set(keys::COLLATERAL_INPUTS, self.get(keys::COLLATERAL_INPUTS)).map(Some)
    }

    /// Reference inputs, empty when the key is missing.
    pub fn reference_inputs(&self) -> Result<BTreeSet<String>> {
        string_set(keys::REFERENCE_INPUTS, self.get(keys::REFERENCE_INPUTS))
    }
}

fn view_txout(txout: &JsonValue) -> Result<ViewTxOut<'_>> {
    let address = txout
        .get(keys::ADDRESS)
        .ok_or_else(|| Error::MissingField(format!("outputs.{}", keys::ADDRESS)))?
        .as_str()
        .ok_or_else(|| invalid("outputs.address", "expected a string"))?;
    let amount = txout
        .get(keys::AMOUNT)
        .ok_or_else(|| Error::MissingField(format!("outputs.{}", keys::AMOUNT)))?;
    Ok(ViewTxOut { address, amount })
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "a mapping",
    }
}

fn list<'a>(field: &str, value: Option<&'a JsonValue>) -> Result<&'a [JsonValue]> {
    match value {
        None => Ok(&[]),
        Some(JsonValue::Array(items)) => Ok(items),
        Some(_) => Err(invalid(field, "expected a list")),
    }
}

fn string_set(field: &str, value: Option<&JsonValue>) -> Result<BTreeSet<String>> {
    list(field, value)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(field, "expected a list of strings"))
        })
        .collect()
}

fn slot(field: &str, value: Option<&JsonValue>) -> Result<Option<u64>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| invalid(field, "expected a slot number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: &str = r#"
auxiliary scripts: null
certificates: null
era: Babbage
fee: 171617 Lovelace
inputs:
- 0bd2e4b3a3bd4cc4fc5e6fd0e5b0e84e08c3a5a1e6bd3d20d98e9bce2ad1c8d6#0
outputs:
- address: addr_test1vpst87uzwafqkxumyf446zr2jsyn44cfpu9fe8yqanyuh6glj2hkl
  address era: Shelley
  amount:
    lovelace: 1000000
  datum: null
validity range:
  lower bound: null
  time to live: 1500
withdrawals: null
"#;

    #[test]
    fn test_parse_view() {
        let view = DecodedView::parse(VIEW).unwrap();
        assert_eq!(view.era().unwrap(), Era::Babbage);
        assert_eq!(view.inputs().unwrap().len(), 1);
        assert_eq!(view.fee().and_then(|f| f.as_str()), Some("171617 Lovelace"));
        assert_eq!(view.invalid_before().unwrap(), None);
        assert_eq!(view.invalid_hereafter().unwrap(), Some(1500));
        assert!(view.withdrawals().unwrap().is_empty());
        assert!(view.certificates().unwrap().is_empty());
        assert_eq!(view.collateral_inputs().unwrap(), None);
        assert!(view.reference_inputs().unwrap().is_empty());

        let outputs = view.outputs().unwrap();
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].address.starts_with("addr_test1"));
    }

    #[test]
    fn test_parse_json_view() {
        let view = DecodedView::parse(r#"{"era": "Alonzo", "collateral inputs": []}"#).unwrap();
        assert_eq!(view.era().unwrap(), Era::Alonzo);
        assert_eq!(view.collateral_inputs().unwrap(), Some(BTreeSet::new()));
    }

    #[test]
    fn test_upper_bound_preferred_over_ttl() {
        let view = DecodedView::parse(
            "validity range:\n  lower bound: 10\n  upper bound: 20\n  time to live: 30\n",
        )
        .unwrap();
        assert_eq!(view.invalid_before().unwrap(), Some(10));
        assert_eq!(view.invalid_hereafter().unwrap(), Some(20));
    }

    #[test]
    fn test_malformed_view() {
        let err = DecodedView::parse("inputs: [unclosed").unwrap_err();
        assert!(matches!(err, Error::ViewParse(_)));
    }

    #[test]
    fn test_non_mapping_view() {
        let err = DecodedView::parse("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, Error::ViewParse(_)));
    }

    #[test]
    fn test_certificates() {
        let view = DecodedView::parse(
            r#"
certificates:
- stake address registration:
    stake credential key hash: 337b62cfff6403a06a3acbc34f8c46003c69fe79a3628cefa9ea4725
- genesis key delegation: null
"#,
        )
        .unwrap();
        let certs = view.certificates().unwrap();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].kind, "stake address registration");
        assert!(certs[0].fields.contains("stake credential key hash"));
        assert!(certs[1].fields.is_empty());
    }

    #[test]
    fn test_missing_era() {
        let view = DecodedView::parse("fee: 0 Lovelace\n").unwrap();
        assert!(matches!(view.era(), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_missing_output_address() {
        let view = DecodedView::parse("outputs:\n- amount: 5 Lovelace\n").unwrap();
        assert!(matches!(view.outputs(), Err(Error::MissingField(_))));
    }
}

//! Coin and multi-asset amount normalization.
//!
//! The view prints an output amount either as a bare coin string
//! (`"1000000 Lovelace"`, pre-Mary eras) or as a map keyed by `lovelace`
//! and `policy <id>` entries. Both normalize to `(quantity, token)` pairs,
//! where the token is `lovelace`, `<policy>.<asset hex>` or a bare `<policy>`.

use crate::error::{Error, Result};
use crate::request::DEFAULT_COIN;
use serde_json::{Map, Value as JsonValue};

/// Token quantity. Output amounts go up to `u64::MAX`, burns are negative.
pub type Quantity = i128;

/// Canonical `(quantity, token)` pair.
pub type Amount = (Quantity, String);

const POLICY_PREFIX: &str = "policy ";
const ASSET_PREFIX: &str = "asset ";
const DEFAULT_ASSET: &str = "default asset";

/// An amount as printed by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountValue<'a> {
    /// Bare coin quantity.
    Lovelace(Quantity),
    /// Coin plus assets grouped by policy.
    MultiAsset(&'a Map<String, JsonValue>),
}

impl<'a> AmountValue<'a> {
    /// Select the variant from the shape of the value.
    pub fn from_view(field: &str, value: &'a JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(AmountValue::MultiAsset(map)),
            scalar => Ok(AmountValue::Lovelace(parse_quantity(field, Some(scalar))?)),
        }
    }

    /// Flatten into canonical pairs. A zero coin quantity is dropped.
    pub fn normalize(&self, field: &str) -> Result<Vec<Amount>> {
        let (lovelace, assets) = match self {
            AmountValue::Lovelace(amount) => (*amount, None),
            AmountValue::MultiAsset(map) => (parse_quantity(field, map.get(DEFAULT_COIN))?, Some(*map)),
        };

        let mut amounts = Vec::new();
        if lovelace != 0 {
            amounts.push((lovelace, DEFAULT_COIN.to_string()));
        }
        if let Some(assets) = assets {
            amounts.extend(load_assets(field, assets)?);
        }
        Ok(amounts)
    }
}

/// Parse a quantity printed as a number or as `"<int> <unit>"`.
///
/// Absent, `null` and empty values count as zero.
pub fn parse_quantity(field: &str, value: Option<&JsonValue>) -> Result<Quantity> {
    match value {
        None | Some(JsonValue::Null) => Ok(0),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .map(Quantity::from)
            .or_else(|| n.as_u64().map(Quantity::from))
            .or_else(|| n.to_string().parse().ok())
            .ok_or_else(|| bad_quantity(field, &n.to_string())),
        Some(JsonValue::String(s)) => match s.split_whitespace().next() {
            None => Ok(0),
            Some(leading) => leading.parse().map_err(|_| bad_quantity(field, s)),
        },
        Some(other) => Err(bad_quantity(field, &other.to_string())),
    }
}

fn bad_quantity(field: &str, value: &str) -> Error {
    Error::InvalidField {
        field: field.to_string(),
        reason: format!("expected a quantity, got '{value}'"),
    }
}

/// Normalize a `policy <id>` → `asset <name>` → quantity map.
///
/// The `lovelace` entry, if present, is skipped.
pub fn load_assets(field: &str, assets: &Map<String, JsonValue>) -> Result<Vec<Amount>> {
    let mut loaded = Vec::new();

    for (policy_key, policy_rec) in assets {
        if policy_key == DEFAULT_COIN {
            continue;
        }
        let policy_id = policy_key.strip_prefix(POLICY_PREFIX).unwrap_or(policy_key);
        let policy_rec = policy_rec.as_object().ok_or_else(|| Error::InvalidField {
            field: field.to_string(),
            reason: format!("assets of '{policy_key}' are not a mapping"),
        })?;

        for (asset_key, amount) in policy_rec {
            let amount = parse_quantity(field, Some(amount))?;
            loaded.push((amount, token_id(policy_id, asset_name(asset_key))));
        }
    }

    Ok(loaded)
}

/// Hex asset name from a view key such as `asset 6161 (aa)`.
fn asset_name(asset_key: &str) -> &str {
    if asset_key == DEFAULT_ASSET {
        return "";
    }
    match asset_key.strip_prefix(ASSET_PREFIX) {
        Some(rest) => {
            let end = rest
                .find(|c: char| !matches!(c, '0'..='9' | 'a'..='f'))
                .unwrap_or(rest.len());
            &rest[..end]
        }
        None => asset_key,
    }
}

/// Token identifier; an empty asset name yields the bare policy id.
pub fn token_id(policy_id: &str, asset_name: &str) -> String {
    if asset_name.is_empty() {
        policy_id.to_string()
    } else {
        format!("{policy_id}.{asset_name}")
    }
}

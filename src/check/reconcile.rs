//! Cross-check a requested transaction against its `transaction view`.

use crate::check::amount::{Amount, AmountValue, Quantity, load_assets, parse_quantity};
use crate::check::certificate::check_certificate_shape;
use crate::check::utxo::{request_collaterals, request_inputs, request_reference_inputs};
use crate::check::withdrawal::{request_withdrawals, view_withdrawals};
use crate::decode::{DecodedView, keys};
use crate::era::{DEFAULT_TX_ERA, Era};
use crate::error::{Error, Result};
use crate::request::TxRequest;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Debug;
use tracing::{debug, info};

/// Properties compared between request and view, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Inputs,
    Outputs,
    Fee,
    InvalidBefore,
    InvalidHereafter,
    Mint,
    Withdrawals,
    Certificates,
    CertificateShapes,
    Era,
    CollateralInputs,
    ReferenceInputs,
}

impl Property {
    pub const ALL: [Property; 12] = [
        Property::Inputs,
        Property::Outputs,
        Property::Fee,
        Property::InvalidBefore,
        Property::InvalidHereafter,
        Property::Mint,
        Property::Withdrawals,
        Property::Certificates,
        Property::CertificateShapes,
        Property::Era,
        Property::CollateralInputs,
        Property::ReferenceInputs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Inputs => "txins",
            Property::Outputs => "txouts",
            Property::Fee => "fee",
            Property::InvalidBefore => "invalid before",
            Property::InvalidHereafter => "invalid hereafter",
            Property::Mint => "mint",
            Property::Withdrawals => "withdrawals",
            Property::Certificates => "certificates",
            Property::CertificateShapes => "certificate fields",
            Property::Era => "transaction era",
            Property::CollateralInputs => "collateral inputs",
            Property::ReferenceInputs => "reference inputs",
        }
    }
}

/// Result of one property check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    /// Not applicable to the transaction's era.
    Skipped,
}

/// Outcome of one property check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub property: Property,
    pub status: CheckStatus,
}

/// Options for reconciliation.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Era assumed when the request doesn't declare one.
    pub default_era: Era,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        ReconcileOptions {
            default_era: DEFAULT_TX_ERA,
        }
    }
}

/// Parse a `transaction view` dump and check it against the request.
///
/// Returns the parsed view when every property agrees; otherwise the first
/// disagreement, in [`Property::ALL`] order.
pub fn check_tx_view(
    request: &TxRequest,
    view_text: &str,
    options: &ReconcileOptions,
) -> Result<DecodedView> {
    let view = DecodedView::parse(view_text)?;
    reconcile(request, &view, options)?;
    Ok(view)
}

/// Check every property of an already parsed view.
pub fn reconcile(
    request: &TxRequest,
    view: &DecodedView,
    options: &ReconcileOptions,
) -> Result<Vec<CheckOutcome>> {
    let mut outcomes = Vec::with_capacity(Property::ALL.len());

    // Inputs
    expect_equal(Property::Inputs, request_inputs(request), view.inputs()?)?;
    outcomes.push(passed(Property::Inputs));

    // Outputs; the view may show more than was asked for
    let requested_txouts: BTreeSet<(String, Quantity, String)> = request
        .txouts
        .iter()
        .map(|t| (t.address.clone(), t.amount, t.coin.clone()))
        .collect();
    let loaded_txouts = view_txouts(view)?;
    if !requested_txouts.is_subset(&loaded_txouts) {
        return Err(Error::Mismatch {
            property: Property::Outputs.as_str(),
            expected: format!("{requested_txouts:?}"),
            actual: format!("not in {loaded_txouts:?}"),
        });
    }
    outcomes.push(passed(Property::Outputs));

    // Fee
    let fee = parse_quantity(keys::FEE, view.fee())?;
    if let Some(declared) = request.declared_fee() {
        expect_equal(Property::Fee, Quantity::from(declared), fee)?;
    }
    outcomes.push(passed(Property::Fee));

    // Validity interval
    expect_equal(
        Property::InvalidBefore,
        request.invalid_before,
        view.invalid_before()?,
    )?;
    outcomes.push(passed(Property::InvalidBefore));
    expect_equal(
        Property::InvalidHereafter,
        request.invalid_hereafter,
        view.invalid_hereafter()?,
    )?;
    outcomes.push(passed(Property::InvalidHereafter));

    // Minting and burning
    let requested_mint: BTreeSet<Amount> = request
        .mint
        .iter()
        .flat_map(|m| m.txouts.iter())
        .map(|t| (t.amount, t.coin.clone()))
        .collect();
    expect_equal(Property::Mint, requested_mint, view_mint(view)?)?;
    outcomes.push(passed(Property::Mint));

    // Withdrawals
    expect_equal(
        Property::Withdrawals,
        request_withdrawals(request.all_withdrawals())?,
        view_withdrawals(view.withdrawals()?)?,
    )?;
    outcomes.push(passed(Property::Withdrawals));

    // Certificates
    let certificates = view.certificates()?;
    expect_equal(
        Property::Certificates,
        request.certificate_count(),
        certificates.len(),
    )?;
    outcomes.push(passed(Property::Certificates));
    for cert in &certificates {
        check_certificate_shape(cert)?;
    }
    outcomes.push(passed(Property::CertificateShapes));

    // Era
    let loaded_era = view.era()?;
    let requested_era = request.era_or(options.default_era)?;
    if requested_era.ordinal() != loaded_era.ordinal() {
        return Err(Error::Mismatch {
            property: Property::Era.as_str(),
            expected: format!("{requested_era} ({})", requested_era.ordinal()),
            actual: format!("{loaded_era} ({})", loaded_era.ordinal()),
        });
    }
    outcomes.push(passed(Property::Era));

    // Collateral inputs, Alonzo onwards
    if loaded_era.has_collateral() {
        let loaded = view
            .collateral_inputs()?
            .ok_or_else(|| Error::MissingField(keys::COLLATERAL_INPUTS.to_string()))?;
        expect_equal(Property::CollateralInputs, request_collaterals(request), loaded)?;
        outcomes.push(passed(Property::CollateralInputs));
    } else {
        outcomes.push(skipped(Property::CollateralInputs, loaded_era));
    }

    // Reference inputs, Babbage onwards
    if loaded_era.has_reference_inputs() {
        expect_equal(
            Property::ReferenceInputs,
            request_reference_inputs(request),
            view.reference_inputs()?,
        )?;
        outcomes.push(passed(Property::ReferenceInputs));
    } else {
        outcomes.push(skipped(Property::ReferenceInputs, loaded_era));
    }

    info!(era = %loaded_era, "transaction view matches request");
    Ok(outcomes)
}

fn passed(property: Property) -> CheckOutcome {
    debug!(property = property.as_str(), "check passed");
    CheckOutcome {
        property,
        status: CheckStatus::Passed,
    }
}

fn skipped(property: Property, era: Era) -> CheckOutcome {
    debug!(property = property.as_str(), %era, "check skipped for era");
    CheckOutcome {
        property,
        status: CheckStatus::Skipped,
    }
}

fn expect_equal<T: PartialEq + Debug>(property: Property, expected: T, actual: T) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::Mismatch {
            property: property.as_str(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

/// Every `(address, quantity, token)` the view's outputs carry.
fn view_txouts(view: &DecodedView) -> Result<BTreeSet<(String, Quantity, String)>> {
    let mut loaded = BTreeSet::new();
    for txout in view.outputs()? {
        let amounts = AmountValue::from_view(keys::AMOUNT, txout.amount)?.normalize(keys::AMOUNT)?;
        for (amount, token) in amounts {
            loaded.insert((txout.address.to_string(), amount, token));
        }
    }
    Ok(loaded)
}

fn view_mint(view: &DecodedView) -> Result<BTreeSet<Amount>> {
    match view.mint() {
        None => Ok(BTreeSet::new()),
        Some(serde_json::Value::Object(assets)) => {
            Ok(load_assets(keys::MINT, assets)?.into_iter().collect())
        }
        Some(_) => Err(Error::InvalidField {
            field: keys::MINT.to_string(),
            reason: "expected a policy mapping".to_string(),
        }),
    }
}

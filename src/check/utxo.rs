//! Collateral and reference input resolution.
//!
//! Collateral can be attached to any Plutus-witnessed part of a request:
//! minting actions, script inputs, script withdrawals and script-witnessed
//! certificates. Each part exposes its collateral through
//! [`CollateralSource`] so the request can be walked uniformly.

use crate::request::{ComplexCert, Mint, ScriptTxIn, ScriptWithdrawal, TxRequest, UtxoRef};
use std::collections::BTreeSet;

/// A request component that pledges collateral.
pub trait CollateralSource {
    fn collaterals(&self) -> &[UtxoRef];
}

impl CollateralSource for Mint {
    fn collaterals(&self) -> &[UtxoRef] {
        &self.collaterals
    }
}

impl CollateralSource for ScriptTxIn {
    fn collaterals(&self) -> &[UtxoRef] {
        &self.collaterals
    }
}

impl CollateralSource for ScriptWithdrawal {
    fn collaterals(&self) -> &[UtxoRef] {
        &self.collaterals
    }
}

impl CollateralSource for ComplexCert {
    fn collaterals(&self) -> &[UtxoRef] {
        &self.collaterals
    }
}

/// Render references in their `hash#index` form.
pub fn utxo_strings<'a>(utxos: impl IntoIterator<Item = &'a UtxoRef>) -> BTreeSet<String> {
    utxos.into_iter().map(UtxoRef::to_string).collect()
}

/// Plain inputs plus every input spent by a script.
pub fn request_inputs(request: &TxRequest) -> BTreeSet<String> {
    let script_txins = request.script_txins.iter().flat_map(|s| s.txins.iter());
    utxo_strings(request.txins.iter().chain(script_txins))
}

/// Collateral pledged anywhere in the request.
pub fn request_collaterals(request: &TxRequest) -> BTreeSet<String> {
    let sources: Vec<&dyn CollateralSource> = request
        .mint
        .iter()
        .map(|m| m as &dyn CollateralSource)
        .chain(request.script_txins.iter().map(|s| s as &dyn CollateralSource))
        .chain(request.script_withdrawals.iter().map(|w| w as &dyn CollateralSource))
        .chain(request.complex_certs.iter().map(|c| c as &dyn CollateralSource))
        .collect();

    utxo_strings(sources.iter().flat_map(|s| s.collaterals()))
}

/// Read-only reference inputs plus the reference scripts of script inputs.
pub fn request_reference_inputs(request: &TxRequest) -> BTreeSet<String> {
    let reference_scripts = request
        .script_txins
        .iter()
        .filter_map(|s| s.reference_txin.as_ref());
    utxo_strings(request.readonly_reference_txins.iter().chain(reference_scripts))
}

//! Withdrawal normalization: `(credential hash, amount)` on both sides.

use crate::check::amount::{Quantity, parse_quantity};
use crate::decode::decode_reward_credential;
use crate::error::Result;
use crate::request::TxOut;
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use tracing::trace;

/// Canonical withdrawal: stake credential hash (hex) and amount.
///
/// A view record carrying no credential keeps `None`, so it can never equal
/// a requested withdrawal.
pub type WithdrawalKey = (Option<String>, Quantity);

type CredentialExtractor = fn(&JsonValue) -> Option<&str>;

/// Where a withdrawal record may keep its credential hash, tried in order.
///
/// The nested `credential` shapes are what node 1.34.1 printed. Keep the
/// order as is; it is unknown which later versions still emit which shape.
const CREDENTIAL_EXTRACTORS: &[CredentialExtractor] = &[
    stake_key_hash,
    stake_script_hash,
    legacy_key_hash,
    legacy_script_hash,
];

fn stake_key_hash(w: &JsonValue) -> Option<&str> {
    w.get("stake credential key hash")?.as_str()
}

fn stake_script_hash(w: &JsonValue) -> Option<&str> {
    w.get("stake credential script hash")?.as_str()
}

fn legacy_key_hash(w: &JsonValue) -> Option<&str> {
    w.get("credential")?.get("key hash")?.as_str()
}

fn legacy_script_hash(w: &JsonValue) -> Option<&str> {
    w.get("credential")?.get("script hash")?.as_str()
}

/// Credential hash of a decoded withdrawal record.
pub fn view_credential(withdrawal: &JsonValue) -> Option<&str> {
    CREDENTIAL_EXTRACTORS
        .iter()
        .find_map(|extract| extract(withdrawal).filter(|hash| !hash.is_empty()))
}

/// Normalize the view's `withdrawals` records.
pub fn view_withdrawals(records: &[JsonValue]) -> Result<BTreeSet<WithdrawalKey>> {
    records
        .iter()
        .map(|record| -> Result<WithdrawalKey> {
            let credential = view_credential(record).map(str::to_string);
            let amount = parse_quantity("withdrawals.amount", record.get("amount"))?;
            Ok((credential, amount))
        })
        .collect()
}

/// Normalize the requested withdrawals, decoding each reward address.
pub fn request_withdrawals<'a>(
    withdrawals: impl IntoIterator<Item = &'a TxOut>,
) -> Result<BTreeSet<WithdrawalKey>> {
    withdrawals
        .into_iter()
        .map(|w| -> Result<WithdrawalKey> {
            let credential = decode_reward_credential(&w.address)?;
            trace!(
                address = %w.address,
                kind = credential.cred_type.map(|t| t.as_str()),
                hash = %credential.hash,
                "decoded reward address"
            );
            Ok((Some(credential.hash), w.amount))
        })
        .collect()
}

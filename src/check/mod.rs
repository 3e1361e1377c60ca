//! Checks of `transaction view` output against the requested transaction.

pub mod amount;
pub mod certificate;
mod reconcile;
pub mod utxo;
pub mod withdrawal;

pub use amount::{Amount, AmountValue};
pub use certificate::{CERTIFICATE_FIELDS, check_certificate_shape};
pub use reconcile::{
    CheckOutcome, CheckStatus, Property, ReconcileOptions, check_tx_view, reconcile,
};

//! The transaction as it was requested from the node CLI.
//!
//! A [`TxRequest`] is the JSON record a test harness writes next to the
//! transaction body it built. Field names follow the harness' own records so
//! the file can be dumped without translation.

use crate::check::amount::Quantity;
use crate::era::Era;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Base unit of the chain.
pub const DEFAULT_COIN: &str = "lovelace";

/// Fee value marking a `transaction build` request, where the CLI picks the fee.
pub const BUILD_FEE: i64 = -1;

/// Reference to a transaction output, `hash#index`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UtxoRef {
    pub utxo_hash: String,
    pub utxo_ix: u32,
}

impl UtxoRef {
    pub fn new(utxo_hash: impl Into<String>, utxo_ix: u32) -> Self {
        UtxoRef {
            utxo_hash: utxo_hash.into(),
            utxo_ix,
        }
    }

    /// Parse the `hash#index` form.
    pub fn parse(s: &str) -> Option<Self> {
        let (hash, ix) = s.split_once('#')?;
        if hash.is_empty() || hash.contains(char::is_whitespace) {
            return None;
        }
        Some(UtxoRef::new(hash, ix.parse().ok()?))
    }
}

impl fmt::Display for UtxoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.utxo_hash, self.utxo_ix)
    }
}

impl<'de> Deserialize<'de> for UtxoRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Record { utxo_hash: String, utxo_ix: u32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => UtxoRef::parse(&s).ok_or_else(|| {
                serde::de::Error::custom(format!("expected 'hash#index', got '{s}'"))
            }),
            Repr::Record { utxo_hash, utxo_ix } => Ok(UtxoRef::new(utxo_hash, utxo_ix)),
        }
    }
}

/// An output: address, quantity and token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub address: String,
    pub amount: Quantity,
    #[serde(default = "default_coin")]
    pub coin: String,
}

fn default_coin() -> String {
    DEFAULT_COIN.to_string()
}

impl TxOut {
    pub fn new(address: impl Into<String>, amount: Quantity, coin: impl Into<String>) -> Self {
        TxOut {
            address: address.into(),
            amount,
            coin: coin.into(),
        }
    }
}

/// Redeemer attached to a Plutus script action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Redeemer {
    pub redeemer_file: Option<PathBuf>,
    pub redeemer_value: Option<String>,
    pub redeemer_cbor_file: Option<PathBuf>,
    pub execution_units: Option<(u64, u64)>,
}

/// Inputs spent by a script, with the collateral that backs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptTxIn {
    pub txins: Vec<UtxoRef>,
    pub script_file: Option<PathBuf>,
    pub reference_txin: Option<UtxoRef>,
    pub collaterals: Vec<UtxoRef>,
    pub datum_file: Option<PathBuf>,
    #[serde(flatten)]
    pub redeemer: Redeemer,
}

/// A minting (or burning) action under one policy script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mint {
    pub txouts: Vec<TxOut>,
    pub script_file: Option<PathBuf>,
    pub collaterals: Vec<UtxoRef>,
    #[serde(flatten)]
    pub redeemer: Redeemer,
}

/// A reward withdrawal authorized by a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptWithdrawal {
    pub txout: TxOut,
    #[serde(default)]
    pub script_file: Option<PathBuf>,
    #[serde(default)]
    pub collaterals: Vec<UtxoRef>,
    #[serde(flatten)]
    pub redeemer: Redeemer,
}

/// A certificate witnessed by a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexCert {
    pub certificate_file: PathBuf,
    #[serde(default)]
    pub script_file: Option<PathBuf>,
    #[serde(default)]
    pub collaterals: Vec<UtxoRef>,
    #[serde(flatten)]
    pub redeemer: Redeemer,
}

/// Structured description of a built transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    #[serde(default)]
    pub txins: Vec<UtxoRef>,
    #[serde(default)]
    pub script_txins: Vec<ScriptTxIn>,
    #[serde(default)]
    pub txouts: Vec<TxOut>,
    #[serde(default = "default_fee")]
    pub fee: i64,
    #[serde(default)]
    pub invalid_before: Option<u64>,
    #[serde(default)]
    pub invalid_hereafter: Option<u64>,
    #[serde(default)]
    pub mint: Vec<Mint>,
    #[serde(default)]
    pub withdrawals: Vec<TxOut>,
    #[serde(default)]
    pub script_withdrawals: Vec<ScriptWithdrawal>,
    #[serde(default)]
    pub certificate_files: Vec<PathBuf>,
    #[serde(default)]
    pub complex_certs: Vec<ComplexCert>,
    #[serde(default)]
    pub readonly_reference_txins: Vec<UtxoRef>,
    #[serde(default)]
    pub era: Option<String>,
}

fn default_fee() -> i64 {
    BUILD_FEE
}

impl Default for TxRequest {
    fn default() -> Self {
        TxRequest {
            txins: Vec::new(),
            script_txins: Vec::new(),
            txouts: Vec::new(),
            fee: BUILD_FEE,
            invalid_before: None,
            invalid_hereafter: None,
            mint: Vec::new(),
            withdrawals: Vec::new(),
            script_withdrawals: Vec::new(),
            certificate_files: Vec::new(),
            complex_certs: Vec::new(),
            readonly_reference_txins: Vec::new(),
            era: None,
        }
    }
}

impl TxRequest {
    /// Parse a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Load a request from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::IoError {
            path: Some(path.to_path_buf()),
            source: e,
        })?;
        Self::from_json(&text)
    }

    /// The fee to compare against, or `None` in build mode.
    pub fn declared_fee(&self) -> Option<i64> {
        (self.fee != BUILD_FEE).then_some(self.fee)
    }

    /// Declared era, or `default` when the request has none.
    pub fn era_or(&self, default: Era) -> Result<Era> {
        match &self.era {
            Some(name) => name.parse(),
            None => Ok(default),
        }
    }

    /// Every withdrawal output, plain and script-authorized.
    pub fn all_withdrawals(&self) -> impl Iterator<Item = &TxOut> {
        self.withdrawals
            .iter()
            .chain(self.script_withdrawals.iter().map(|w| &w.txout))
    }

    /// Number of certificates the transaction carries.
    pub fn certificate_count(&self) -> usize {
        self.certificate_files.len() + self.complex_certs.len()
    }
}

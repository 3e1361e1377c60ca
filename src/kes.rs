//! Classification of `query kes-period-info` results.
//!
//! The node CLI reports the chain's current KES period, the validity window
//! of an operational certificate and both issue counters (the one on disk and
//! the one recorded in the node's protocol state). From these the certificate
//! falls into one of four scenarios.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verdict line printed when the KES period is valid.
const KES_PERIOD_OK: &str = "Operational certificate's KES period is within the correct KES period interval";

/// Verdict line printed when the issue counter is valid.
const COUNTER_OK: &str = "The operational certificate counter agrees with the node protocol state counter";

/// Metrics written by `query kes-period-info --out-file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KesMetrics {
    #[serde(rename = "qKesCurrentKesPeriod")]
    pub current_kes_period: u64,
    #[serde(rename = "qKesStartKesInterval")]
    pub start_kes_interval: u64,
    #[serde(rename = "qKesEndKesInterval")]
    pub end_kes_interval: u64,
    #[serde(rename = "qKesOnDiskOperationalCertificateNumber")]
    pub on_disk_counter: u64,
    /// `null` until the pool has forged a block.
    #[serde(
        rename = "qKesNodeStateOperationalCertificateNumber",
        deserialize_with = "Option::deserialize"
    )]
    pub node_state_counter: Option<u64>,
    #[serde(rename = "qKesMaxKESEvolutions", default)]
    pub max_kes_evolutions: Option<u64>,
    #[serde(rename = "qKesSlotsPerKesPeriod", default)]
    pub slots_per_kes_period: Option<u64>,
    #[serde(rename = "qKesRemainingSlotsInKesPeriod", default)]
    pub remaining_slots_in_kes_period: Option<u64>,
}

/// Validity scenario of an operational certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KesScenario {
    AllValid,
    InvalidKesPeriod,
    InvalidCounters,
    AllInvalid,
}

impl KesScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            KesScenario::AllValid => "all_valid",
            KesScenario::InvalidKesPeriod => "invalid_kes_period",
            KesScenario::InvalidCounters => "invalid_counters",
            KesScenario::AllInvalid => "all_invalid",
        }
    }

    fn from_checks(kes_period_valid: bool, counter_valid: bool) -> Self {
        match (kes_period_valid, counter_valid) {
            (true, true) => KesScenario::AllValid,
            (false, true) => KesScenario::InvalidKesPeriod,
            (true, false) => KesScenario::InvalidCounters,
            (false, false) => KesScenario::AllInvalid,
        }
    }

    fn kes_period_valid(&self) -> bool {
        matches!(self, KesScenario::AllValid | KesScenario::InvalidCounters)
    }

    fn counter_valid(&self) -> bool {
        matches!(self, KesScenario::AllValid | KesScenario::InvalidKesPeriod)
    }
}

impl fmt::Display for KesScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KesScenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_valid" => Ok(KesScenario::AllValid),
            "invalid_kes_period" => Ok(KesScenario::InvalidKesPeriod),
            "invalid_counters" => Ok(KesScenario::InvalidCounters),
            "all_invalid" => Ok(KesScenario::AllInvalid),
            _ => Err(Error::InvalidKesInfo(format!("unknown scenario '{s}'"))),
        }
    }
}

impl KesMetrics {
    /// Parse the metrics JSON. A document wrapping them under `metrics`
    /// is accepted too.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::InvalidKesInfo(e.to_string()))?;
        let metrics = match value.get("metrics") {
            Some(inner) => inner.clone(),
            None => value,
        };
        serde_json::from_value(metrics).map_err(|e| Error::InvalidKesInfo(e.to_string()))
    }

    /// Periods elapsed since the certificate's start period.
    pub fn kes_period_delta(&self) -> i128 {
        i128::from(self.current_kes_period) - i128::from(self.start_kes_interval)
    }

    /// The current period lies within `[start, end)`.
    pub fn kes_period_valid(&self) -> bool {
        self.start_kes_interval <= self.current_kes_period
            && self.current_kes_period < self.end_kes_interval
    }

    /// The on-disk counter equals the node's counter or is one ahead of it.
    pub fn counter_valid(&self) -> bool {
        match self.node_state_counter {
            None => true,
            Some(node_state) => {
                node_state <= self.on_disk_counter
                    && node_state
                        .checked_add(1)
                        .is_none_or(|next| self.on_disk_counter <= next)
            }
        }
    }

    /// Classify the certificate.
    pub fn classify(&self) -> KesScenario {
        KesScenario::from_checks(self.kes_period_valid(), self.counter_valid())
    }
}

/// Check a `kes-period-info` result against the expected scenario.
///
/// When the CLI's human-readable output is given, its verdict lines must
/// agree with the classification as well.
pub fn check_kes_period_info(
    metrics: &KesMetrics,
    output_text: Option<&str>,
    expected: KesScenario,
) -> Result<KesScenario> {
    let actual = metrics.classify();
    tracing::debug!(
        delta = %metrics.kes_period_delta(),
        on_disk = metrics.on_disk_counter,
        node_state = ?metrics.node_state_counter,
        scenario = %actual,
        "classified KES period info"
    );

    if actual != expected {
        return Err(Error::KesScenarioMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
            detail: None,
        });
    }

    if let Some(text) = output_text {
        let verdicts = [
            ("KES period", KES_PERIOD_OK, actual.kes_period_valid()),
            ("counter", COUNTER_OK, actual.counter_valid()),
        ];
        for (what, line, valid) in verdicts {
            if text.contains(line) != valid {
                return Err(Error::KesScenarioMismatch {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                    detail: Some(format!(
                        "CLI output {} the {what} check",
                        if valid { "doesn't pass" } else { "passes" }
                    )),
                });
            }
        }
    }

    Ok(actual)
}

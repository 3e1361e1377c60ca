//! JSON output formatting.

use crate::check::CheckOutcome;
use crate::decode::DecodedView;
use crate::error::{Error, Result};
use crate::kes::{KesMetrics, KesScenario};

/// Format a checked view as JSON: the parsed view plus the check outcomes.
pub fn format_view_json(view: &DecodedView, outcomes: &[CheckOutcome]) -> Result<String> {
    let json = serde_json::json!({
        "view": view.as_map(),
        "checks": outcomes,
    });
    serde_json::to_string_pretty(&json).map_err(|e| Error::FormatError(e.to_string()))
}

/// Format a classified `kes-period-info` result as JSON.
pub fn format_kes_json(metrics: &KesMetrics, scenario: KesScenario) -> Result<String> {
    let json = serde_json::json!({
        "scenario": scenario,
        "kes_period_valid": metrics.kes_period_valid(),
        "counter_valid": metrics.counter_valid(),
        "metrics": metrics,
    });
    serde_json::to_string_pretty(&json).map_err(|e| Error::FormatError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckStatus, Property};

    #[test]
    fn test_format_view_json() {
        let view = DecodedView::parse("era: Babbage\nfee: 0 Lovelace\n").unwrap();
        let outcomes = vec![CheckOutcome {
            property: Property::ReferenceInputs,
            status: CheckStatus::Passed,
        }];
        let output = format_view_json(&view, &outcomes).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["view"]["era"], "Babbage");
        assert_eq!(parsed["checks"][0]["property"], "reference_inputs");
        assert_eq!(parsed["checks"][0]["status"], "passed");
    }

    #[test]
    fn test_format_kes_json() {
        let metrics = KesMetrics {
            current_kes_period: 10,
            start_kes_interval: 5,
            end_kes_interval: 67,
            on_disk_counter: 1,
            node_state_counter: Some(2),
            max_kes_evolutions: Some(62),
            slots_per_kes_period: None,
            remaining_slots_in_kes_period: None,
        };
        let output = format_kes_json(&metrics, metrics.classify()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["scenario"], "invalid_counters");
        assert_eq!(parsed["counter_valid"], false);
        assert_eq!(parsed["metrics"]["qKesCurrentKesPeriod"], 10);
    }
}

//! Output formatting module.

mod json;
mod pretty;

use crate::check::CheckOutcome;
use crate::decode::DecodedView;
use crate::error::Result;
use crate::kes::{KesMetrics, KesScenario};

pub use json::{format_kes_json, format_view_json};
pub use pretty::{format_kes_pretty, format_view_pretty};

/// Something txcheck prints on success.
pub enum Report<'a> {
    View {
        view: &'a DecodedView,
        outcomes: &'a [CheckOutcome],
    },
    Kes {
        metrics: &'a KesMetrics,
        scenario: KesScenario,
    },
}

/// Format a report according to the output flag.
pub fn format_output(report: &Report<'_>, json: bool) -> Result<String> {
    match (report, json) {
        (Report::View { view, outcomes }, true) => format_view_json(view, outcomes),
        (Report::View { view, outcomes }, false) => format_view_pretty(view, outcomes),
        (Report::Kes { metrics, scenario }, true) => format_kes_json(metrics, *scenario),
        (Report::Kes { metrics, scenario }, false) => format_kes_pretty(metrics, *scenario),
    }
}

//! Pretty terminal output with colors and tables.

use crate::check::amount::parse_quantity;
use crate::check::{CheckOutcome, CheckStatus};
use crate::decode::{DecodedView, keys};
use crate::error::Result;
use crate::kes::{KesMetrics, KesScenario};
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets};

/// Format a successful view check.
pub fn format_view_pretty(view: &DecodedView, outcomes: &[CheckOutcome]) -> Result<String> {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Transaction View".bold().cyan()));

    let era = view
        .get(keys::ERA)
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    output.push_str(&format!("  {} {}\n", "Era:".dimmed(), era.yellow()));

    let fee = parse_quantity(keys::FEE, view.fee())?;
    output.push_str(&format!(
        "  {} {} lovelace\n",
        "Fee:".dimmed(),
        format_number_with_separators(fee)
    ));

    output.push_str(&format!(
        "  {} {}\n",
        "Inputs:".dimmed(),
        view.inputs()?.len()
    ));
    output.push_str(&format!(
        "  {} {}\n\n",
        "Outputs:".dimmed(),
        view.outputs()?.len()
    ));

    output.push_str(&format!("{} ({})\n", "Checks".bold().cyan(), outcomes.len()));
    output.push_str(&format_checks_table(outcomes));

    let passed = outcomes
        .iter()
        .filter(|o| o.status == CheckStatus::Passed)
        .count();
    output.push_str(&format!(
        "{} {} passed, {} skipped",
        "OK".green().bold(),
        passed,
        outcomes.len() - passed
    ));

    Ok(output)
}

/// Format check outcomes as a table.
fn format_checks_table(outcomes: &[CheckOutcome]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(comfy_table::Color::DarkGrey),
        Cell::new("Property").fg(comfy_table::Color::DarkGrey),
        Cell::new("Status").fg(comfy_table::Color::DarkGrey),
    ]);

    for (idx, outcome) in outcomes.iter().enumerate() {
        let status = match outcome.status {
            CheckStatus::Passed => "passed".green().to_string(),
            CheckStatus::Skipped => "skipped (era)".dimmed().to_string(),
        };
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(outcome.property.as_str()),
            Cell::new(status),
        ]);
    }

    format!("{}\n", table)
}

/// Format a classified `kes-period-info` result.
pub fn format_kes_pretty(metrics: &KesMetrics, scenario: KesScenario) -> Result<String> {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "KES Period Info".bold().cyan()));
    output.push_str(&format!(
        "  {} {}\n",
        "Current KES period:".dimmed(),
        metrics.current_kes_period
    ));
    output.push_str(&format!(
        "  {} [{}, {})\n",
        "Certificate interval:".dimmed(),
        metrics.start_kes_interval,
        metrics.end_kes_interval
    ));
    output.push_str(&format!(
        "  {} {}\n",
        "Period delta:".dimmed(),
        metrics.kes_period_delta()
    ));

    let node_state = metrics
        .node_state_counter
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".dimmed().to_string());
    output.push_str(&format!(
        "  {} {} on disk, {} in node state\n",
        "Counters:".dimmed(),
        metrics.on_disk_counter,
        node_state
    ));

    if let Some(remaining) = metrics.remaining_slots_in_kes_period {
        output.push_str(&format!(
            "  {} {}\n",
            "Slots left in period:".dimmed(),
            format_number_with_separators(remaining.into())
        ));
    }

    output.push_str(&format!(
        "  {} {}\n",
        "KES period:".dimmed(),
        verdict(metrics.kes_period_valid())
    ));
    output.push_str(&format!(
        "  {} {}\n\n",
        "Counter:".dimmed(),
        verdict(metrics.counter_valid())
    ));

    let scenario_str = match scenario {
        KesScenario::AllValid => scenario.as_str().green(),
        _ => scenario.as_str().red(),
    };
    output.push_str(&format!("{} {}", "Scenario:".bold(), scenario_str));

    Ok(output)
}

fn verdict(valid: bool) -> String {
    if valid {
        "valid".green().to_string()
    } else {
        "invalid".red().to_string()
    }
}

/// Format a number with thousand separators.
fn format_number_with_separators(n: i128) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    if n < 0 {
        result.insert(0, '-');
    }
    result
}

//! txcheck - cross-checks Cardano `transaction view` output.
//!
//! Given the JSON description of a transaction that was built (its inputs,
//! outputs, fee, validity interval, mint, withdrawals, certificates and
//! script parts) and the `cardano-cli transaction view` dump of the result,
//! txcheck verifies the two describe the same transaction. It also classifies
//! `query kes-period-info` metrics into one of four certificate scenarios.
//!
//! # Features
//!
//! - Accepts views from a file or stdin, in YAML or JSON
//! - Normalizes lovelace and multi-asset amounts across CLI versions
//! - Understands legacy withdrawal layouts
//! - Gates collateral and reference input checks by era
//! - Pretty terminal output with colors, or JSON for piping
//! - Exit codes distinguish mismatches from malformed input

pub mod check;
pub mod cli;
pub mod decode;
pub mod era;
pub mod error;
pub mod format;
pub mod input;
pub mod kes;
pub mod request;

pub use cli::Args;
pub use error::{Error, Result};

use check::{ReconcileOptions, reconcile};
use cli::{Command, InputSpec};
use decode::DecodedView;
use format::{Report, format_output};
use input::read_input;
use kes::{KesMetrics, check_kes_period_info};
use request::TxRequest;

/// Run txcheck with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    let output = match &args.command {
        Command::View {
            request,
            view,
            default_era,
            json,
        } => {
            let request = TxRequest::load(request)?;
            let text = read_input(&InputSpec::from_arg(view.as_ref()))?;
            let view = DecodedView::parse(&text)?;

            let options = ReconcileOptions {
                default_era: *default_era,
            };
            let outcomes = reconcile(&request, &view, &options)?;

            format_output(
                &Report::View {
                    view: &view,
                    outcomes: &outcomes,
                },
                *json,
            )?
        }

        Command::Kes {
            metrics,
            expect,
            output_text,
            json,
        } => {
            let text = read_input(&InputSpec::File(metrics.clone()))?;
            let metrics = KesMetrics::from_json(&text)?;

            let scenario = match expect {
                Some(expected) => {
                    let cli_output = output_text
                        .as_ref()
                        .map(|path| read_input(&InputSpec::File(path.clone())))
                        .transpose()?;
                    check_kes_period_info(&metrics, cli_output.as_deref(), *expected)?
                }
                None => metrics.classify(),
            };

            format_output(
                &Report::Kes {
                    metrics: &metrics,
                    scenario,
                },
                *json,
            )?
        }
    };

    println!("{}", output);
    Ok(())
}

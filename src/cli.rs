//! CLI argument parsing for txcheck.

use crate::era::Era;
use crate::kes::KesScenario;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cross-check Cardano `transaction view` output against the requested transaction.
#[derive(Parser, Debug)]
#[command(
    name = "txcheck",
    version,
    about = "Cross-check Cardano transaction views and KES period info",
    after_help = r#"EXAMPLES:
    txcheck view --request tx.json view.yaml       Check a saved view
    cardano-cli transaction view --tx-body-file tx.body \
      | txcheck view --request tx.json             Check a piped view
    txcheck view --request tx.json view.yaml --json
                                                   Print the parsed view as JSON
    txcheck kes kes.json                           Classify KES period info
    txcheck kes kes.json --expect invalid_counters Exit 1 unless the scenario matches

EXIT CODES:
    0  views agree / scenario matches
    1  mismatch
    2  malformed view or KES info
    3  I/O error
    4  malformed request"#
)]
pub struct Args {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log each check to stderr (repeat for more detail).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a `transaction view` dump against the transaction request.
    ///
    /// Compares inputs, outputs, fee, validity interval, mint, withdrawals,
    /// certificates, era, collateral and reference inputs, and stops at the
    /// first disagreement.
    #[command(name = "view")]
    View {
        /// JSON file describing the requested transaction.
        #[arg(long, short = 'r', value_name = "FILE")]
        request: PathBuf,

        /// `transaction view` output (YAML or JSON). Reads stdin if omitted.
        #[arg(value_name = "VIEW")]
        view: Option<PathBuf>,

        /// Era assumed when the request doesn't declare one.
        #[arg(long, env = "TX_ERA", default_value = "babbage")]
        default_era: Era,

        /// Output the parsed view as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Classify `query kes-period-info` metrics.
    #[command(name = "kes")]
    Kes {
        /// JSON metrics written by `query kes-period-info --out-file`.
        #[arg(value_name = "METRICS")]
        metrics: PathBuf,

        /// Scenario the certificate is expected to be in.
        #[arg(long, short = 'e', value_name = "SCENARIO")]
        expect: Option<KesScenario>,

        /// Human-readable `kes-period-info` output to cross-check.
        #[arg(long, value_name = "FILE", requires = "expect")]
        output_text: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },
}

/// Specifies how to obtain input text.
#[derive(Debug, Clone)]
pub enum InputSpec {
    /// Read from stdin.
    Stdin,
    /// Read from a file path.
    File(PathBuf),
}

impl InputSpec {
    /// File if given, stdin otherwise.
    pub fn from_arg(path: Option<&PathBuf>) -> Self {
        match path {
            Some(path) => InputSpec::File(path.clone()),
            None => InputSpec::Stdin,
        }
    }
}

impl Args {
    /// Log filter directive implied by `-v`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

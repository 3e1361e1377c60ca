//! Ledger eras and the view fields they gate.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Cardano ledger eras, ordered by introduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Era {
    Byron = 1,
    Shelley = 2,
    Allegra = 3,
    Mary = 4,
    Alonzo = 5,
    Babbage = 6,
    Conway = 7,
}

/// Era name table, lowercase.
const ERA_NAMES: &[(&str, Era)] = &[
    ("byron", Era::Byron),
    ("shelley", Era::Shelley),
    ("allegra", Era::Allegra),
    ("mary", Era::Mary),
    ("alonzo", Era::Alonzo),
    ("babbage", Era::Babbage),
    ("conway", Era::Conway),
];

/// First era whose transactions carry collateral inputs.
pub const COLLATERAL_ERA: Era = Era::Alonzo;

/// First era whose transactions carry reference inputs.
pub const REFERENCE_INPUTS_ERA: Era = Era::Babbage;

/// Era assumed for requests that don't declare one.
pub const DEFAULT_TX_ERA: Era = Era::Babbage;

impl Era {
    pub fn as_str(&self) -> &'static str {
        match self {
            Era::Byron => "byron",
            Era::Shelley => "shelley",
            Era::Allegra => "allegra",
            Era::Mary => "mary",
            Era::Alonzo => "alonzo",
            Era::Babbage => "babbage",
            Era::Conway => "conway",
        }
    }

    /// Ordinal version of the era.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Whether `collateral inputs` is expected in the view.
    pub fn has_collateral(&self) -> bool {
        *self >= COLLATERAL_ERA
    }

    /// Whether `reference inputs` is expected in the view.
    pub fn has_reference_inputs(&self) -> bool {
        *self >= REFERENCE_INPUTS_ERA
    }
}

impl FromStr for Era {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        ERA_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, era)| *era)
            .ok_or_else(|| Error::UnknownEra(s.to_string()))
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

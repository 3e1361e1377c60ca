//! Input reading implementation.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use crate::input::InputSource;
use std::fs;
use std::io::{self, Read};

/// Read input text from the specified source.
pub fn read_input(spec: &InputSpec) -> Result<String> {
    let source = InputSource::from_spec(spec)?;

    match source {
        InputSource::File(path) => fs::read_to_string(&path).map_err(|e| Error::IoError {
            path: Some(path),
            source: e,
        }),

        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::IoError {
                    path: None,
                    source: e,
                })?;

            non_empty(buffer)
        }
    }
}

/// Reject input that is only whitespace.
fn non_empty(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::NoInput);
    }
    Ok(text)
}

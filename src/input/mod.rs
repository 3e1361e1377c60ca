//! Input detection and reading module.

mod detect;
mod read;

pub use detect::InputSource;
pub use read::read_input;

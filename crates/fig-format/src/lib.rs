//! Textual formats for fig
//!
//! This crate parses descriptor references given on the command line
//! (`foo/1.2.3:default`) and reads and prints package definition files.

mod descriptor;
mod error;
mod parser;
mod unparser;

pub use descriptor::{is_valid_name, parse_descriptor, PartialDescriptor};
pub use error::FormatError;
pub use parser::parse_package;
pub use unparser::{package_to_string, Unparser};

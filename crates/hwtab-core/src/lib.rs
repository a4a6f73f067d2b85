//! Build-time generator for CPU implementer and part-number lookup tables.
//!
//! Reads the `id_part` and `hw_impl` arrays out of util-linux's `lscpu-arm.c`,
//! joins them and renders the nested literal used by the arm64 CPU detection code.

pub mod assemble;
pub mod emit;
pub mod error;
pub mod scan;
pub mod table;

pub use assemble::{Implementer, assemble};
pub use emit::{Format, GoOptions};
pub use error::Error;
pub use scan::{ArrayRole, DuplicatePolicy, Extraction, Scanner};

use serde::Serialize;

///
/// Options
/// Everything that can vary between runs.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Options {
    pub format: Format,
    pub go: GoOptions,
    pub duplicates: DuplicatePolicy,

    #[serde(skip)]
    pub debug: bool,
}

// generate
/// Scan `source`, join the tables and render them.
///
/// The output is built completely before it is returned, so a failing run
/// never produces partial tables.
pub fn generate(source: &str, options: &Options) -> Result<String, Error> {
    if options.debug {
        eprintln!("[debug] options: {}", serde_json::to_string(options)?);
    }

    let extraction = Scanner::new(options.duplicates, options.debug).scan(source)?;
    let rows = assemble(&extraction)?;

    if options.debug {
        eprintln!(
            "[debug] assembled {} implementers from {} part tables",
            rows.len(),
            extraction.parts.len()
        );
    }

    emit::render(&rows, options.format, &options.go)
}

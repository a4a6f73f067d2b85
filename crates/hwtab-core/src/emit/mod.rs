pub mod go;
pub mod json;

use crate::{Error, assemble::Implementer};
use serde::Serialize;

///
/// Format
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Go map literal (`var hwVariant = map[uint64]hwImpl{ ... }`).
    #[default]
    Go,

    /// JSON array of implementer records.
    Json,
}

///
/// GoOptions
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GoOptions {
    pub var_name: String,
    pub impl_type: String,
}

impl GoOptions {
    pub const DEFAULT_VAR_NAME: &'static str = "hwVariant";
    pub const DEFAULT_IMPL_TYPE: &'static str = "hwImpl";
}

impl Default for GoOptions {
    fn default() -> Self {
        Self {
            var_name: Self::DEFAULT_VAR_NAME.to_string(),
            impl_type: Self::DEFAULT_IMPL_TYPE.to_string(),
        }
    }
}

/// Render assembled rows in the requested format.
pub fn render(
    rows: &[Implementer<'_>],
    format: Format,
    go_options: &GoOptions,
) -> Result<String, Error> {
    match format {
        Format::Go => Ok(go::render(rows, go_options)?),
        Format::Json => json::render(rows),
    }
}

use crate::scan::ArrayRole;
use thiserror::Error as ThisError;

///
/// Error
/// Every variant is fatal for the run; nothing is emitted after one.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("array `{name}` declared on line {line} runs to end of input without a terminating line")]
    UnterminatedArray { name: String, line: usize },

    #[error("implementer {code} ({label}) references part table `{table}`, which is never declared")]
    MissingPartTable {
        code: String,
        label: String,
        table: String,
    },

    #[error(
        "{role} array `{name}` on line {line} redeclares the one on line {previous_line}"
    )]
    DuplicateDeclaration {
        role: ArrayRole,
        name: String,
        line: usize,
        previous_line: usize,
    },

    #[error("code `{code}` of {label} is not an unsigned integer")]
    InvalidCode { code: String, label: String },

    #[error(transparent)]
    Format(#[from] std::fmt::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

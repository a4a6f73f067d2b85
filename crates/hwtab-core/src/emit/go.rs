use crate::{assemble::Implementer, emit::GoOptions};
use std::fmt::Write;

/// Render the Go map literal consumed by the arm64 CPU detection code.
///
/// Codes and labels are copied verbatim from the source; C hex and string
/// literals are valid Go literals as they stand.
pub fn render(rows: &[Implementer<'_>], options: &GoOptions) -> Result<String, std::fmt::Error> {
    let GoOptions {
        var_name,
        impl_type,
    } = options;
    let mut out = String::new();

    writeln!(out, "var {var_name} = map[uint64]{impl_type}{{")?;
    for row in rows {
        writeln!(out, "\t{}: {impl_type}{{", row.code)?;
        writeln!(out, "\t\tname: {},", row.label)?;
        writeln!(out, "\t\tparts: map[uint64]string{{")?;
        for part in row.parts {
            writeln!(out, "\t\t\t{}: {},", part.code, part.label)?;
        }
        writeln!(out, "\t\t}},")?;
        writeln!(out, "\t}},")?;
    }
    writeln!(out, "}}")?;

    Ok(out)
}

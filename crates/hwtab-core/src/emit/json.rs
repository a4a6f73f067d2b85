use crate::{
    Error,
    assemble::Implementer,
    table::{Code, Label},
};
use serde::Serialize;

///
/// ImplementerRecord
///

#[derive(Debug, Serialize)]
struct ImplementerRecord {
    code: u64,
    name: String,
    parts: Vec<PartRecord>,
}

///
/// PartRecord
///

#[derive(Debug, Serialize)]
struct PartRecord {
    code: u64,
    name: String,
}

fn numeric(code: &Code, label: &Label) -> Result<u64, Error> {
    code.value().ok_or_else(|| Error::InvalidCode {
        code: code.to_string(),
        label: label.to_string(),
    })
}

/// Render the tables as a pretty-printed JSON array, one object per implementer.
pub fn render(rows: &[Implementer<'_>]) -> Result<String, Error> {
    let records = rows
        .iter()
        .map(|row| {
            let parts = row
                .parts
                .iter()
                .map(|part| {
                    Ok(PartRecord {
                        code: numeric(&part.code, &part.label)?,
                        name: part.label.text(),
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?;

            Ok(ImplementerRecord {
                code: numeric(row.code, row.label)?,
                name: row.label.text(),
                parts,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut out = serde_json::to_string_pretty(&records)?;
    out.push('\n');

    Ok(out)
}

use crate::{
    Error,
    scan::Extraction,
    table::{Code, Label, PartEntry},
};

///
/// Implementer
/// One output row: an implementer joined with its part table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Implementer<'a> {
    pub code: &'a Code,
    pub label: &'a Label,
    pub parts: &'a [PartEntry],
}

/// Join the implementer table with the part tables it references.
///
/// Rows keep the implementer table's order. A reference to an undeclared part
/// table fails the whole join.
pub fn assemble(extraction: &Extraction) -> Result<Vec<Implementer<'_>>, Error> {
    let Some(implementers) = &extraction.implementers else {
        return Ok(Vec::new());
    };

    implementers
        .entries
        .iter()
        .map(|entry| {
            let parts = extraction
                .parts
                .get(&entry.table)
                .ok_or_else(|| Error::MissingPartTable {
                    code: entry.code.to_string(),
                    label: entry.label.to_string(),
                    table: entry.table.clone(),
                })?;

            Ok(Implementer {
                code: &entry.code,
                label: &entry.label,
                parts: &parts.entries,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ImplementerEntry, ImplementerTable, PartTable};

    fn part_table(name: &str, rows: &[(&str, &str)]) -> (String, PartTable) {
        let entries = rows
            .iter()
            .map(|(code, label)| PartEntry {
                code: Code::new(*code),
                label: Label::new(*label),
            })
            .collect();

        (
            name.to_string(),
            PartTable {
                name: name.to_string(),
                line: 1,
                entries,
            },
        )
    }

    fn implementers(rows: &[(&str, &str, &str)]) -> ImplementerTable {
        ImplementerTable {
            name: "hw_implementer".to_string(),
            line: 1,
            entries: rows
                .iter()
                .map(|(code, table, label)| ImplementerEntry {
                    code: Code::new(*code),
                    table: (*table).to_string(),
                    label: Label::new(*label),
                })
                .collect(),
        }
    }

    #[test]
    fn no_implementer_array_assembles_to_nothing() {
        let extraction = Extraction {
            parts: [part_table("a", &[("0x1", "\"Foo\"")])].into_iter().collect(),
            implementers: None,
        };

        assert!(assemble(&extraction).unwrap().is_empty());
    }

    #[test]
    fn rows_follow_implementer_order() {
        let extraction = Extraction {
            parts: [
                part_table("a", &[("0x1", "\"Foo\"")]),
                part_table("b", &[("0x2", "\"Bar\""), ("0x3", "\"Baz\"")]),
            ]
            .into_iter()
            .collect(),
            implementers: Some(implementers(&[
                ("0x50", "b", "\"Second\""),
                ("0x41", "a", "\"First\""),
            ])),
        };
        let rows = assemble(&extraction).unwrap();

        let codes: Vec<_> = rows.iter().map(|row| row.code.as_str()).collect();
        assert_eq!(codes, ["0x50", "0x41"]);
        assert_eq!(rows[0].parts.len(), 2);
        assert_eq!(rows[1].parts.len(), 1);
        assert_eq!(rows[1].parts[0].label.as_str(), "\"Foo\"");
    }

    #[test]
    fn shared_part_table_is_reused() {
        let extraction = Extraction {
            parts: [part_table("a", &[("0x1", "\"Foo\"")])].into_iter().collect(),
            implementers: Some(implementers(&[
                ("0x41", "a", "\"One\""),
                ("0x42", "a", "\"Two\""),
            ])),
        };
        let rows = assemble(&extraction).unwrap();

        assert_eq!(rows[0].parts, rows[1].parts);
    }

    #[test]
    fn missing_part_table_fails_the_join() {
        let extraction = Extraction {
            parts: [part_table("a", &[("0x1", "\"Foo\"")])].into_iter().collect(),
            implementers: Some(implementers(&[
                ("0x41", "a", "\"Fine\""),
                ("0x42", "nope", "\"Broken\""),
            ])),
        };
        let err = assemble(&extraction).unwrap_err();

        assert!(
            matches!(
                err,
                Error::MissingPartTable { ref code, ref table, .. }
                    if code == "0x42" && table == "nope"
            ),
            "unexpected error: {err:?}"
        );
    }
}

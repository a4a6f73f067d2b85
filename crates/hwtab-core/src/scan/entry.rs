use crate::{
    Error,
    scan::Header,
    table::{Code, ImplementerEntry, Label, PartEntry},
};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// `{ 0xd03, "Cortex-A53" },`
static PART_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\{\s*(-1|[0-9a-fx]*),\s*(".*")\s*\},.*"#)
        .expect("part entry pattern must compile")
});

// `{ 0x41, arm_part, "ARM" },`
static IMPLEMENTER_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\{\s*(-1|[0-9a-fx]*),\s*([A-Za-z0-9_]*),\s*(".*")\s*\},.*"#)
        .expect("implementer entry pattern must compile")
});

///
/// Entry
/// One row shape of a declared array.
///

pub trait Entry: Sized {
    fn pattern() -> &'static Regex;

    fn from_captures(caps: &Captures<'_>) -> Self;

    fn code(&self) -> &Code;

    /// Match a single line against this shape.
    fn parse(line: &str) -> Option<Self> {
        Self::pattern()
            .captures(line)
            .map(|caps| Self::from_captures(&caps))
    }
}

impl Entry for PartEntry {
    fn pattern() -> &'static Regex {
        &PART_ENTRY
    }

    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            code: Code::new(&caps[1]),
            label: Label::new(&caps[2]),
        }
    }

    fn code(&self) -> &Code {
        &self.code
    }
}

impl Entry for ImplementerEntry {
    fn pattern() -> &'static Regex {
        &IMPLEMENTER_ENTRY
    }

    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            code: Code::new(&caps[1]),
            table: caps[2].to_string(),
            label: Label::new(&caps[3]),
        }
    }

    fn code(&self) -> &Code {
        &self.code
    }
}

///
/// EntryList
///

#[derive(Debug)]
pub struct EntryList<E> {
    pub entries: Vec<E>,

    /// Index of the first line that did not match; it is left for the caller.
    pub next: usize,

    /// Sentinel rows that were matched and then dropped.
    pub sentinels: usize,
}

/// Consume entries of shape `E` starting at `lines[start]`.
///
/// The list ends at the first line that does not match, which is not consumed.
/// Running out of lines before that happens is an error.
pub fn parse_entries<E: Entry>(
    lines: &[&str],
    start: usize,
    header: &Header<'_>,
) -> Result<EntryList<E>, Error> {
    let mut entries = Vec::new();
    let mut sentinels = 0;

    for (pos, line) in lines.iter().enumerate().skip(start) {
        let Some(entry) = E::parse(line) else {
            return Ok(EntryList {
                entries,
                next: pos,
                sentinels,
            });
        };

        if entry.code().is_sentinel() {
            sentinels += 1;
            continue;
        }
        entries.push(entry);
    }

    Err(Error::UnterminatedArray {
        name: header.name.to_string(),
        line: header.line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ArrayRole;

    fn header(name: &str) -> Header<'_> {
        Header {
            role: ArrayRole::PartArray,
            tag: "id_part",
            name,
            line: 1,
        }
    }

    #[test]
    fn part_entry_matches_lscpu_rows() {
        let entry = PartEntry::parse(r#"    { 0xd03, "Cortex-A53" },"#).unwrap();
        assert_eq!(entry.code.as_str(), "0xd03");
        assert_eq!(entry.label.as_str(), r#""Cortex-A53""#);

        let entry = PartEntry::parse(r#"{0x1,"Foo"}, /* trailing */"#).unwrap();
        assert_eq!(entry.code.as_str(), "0x1");
        assert_eq!(entry.label.as_str(), r#""Foo""#);
    }

    #[test]
    fn part_entry_rejects_other_shapes() {
        assert!(PartEntry::parse("};").is_none());
        assert!(PartEntry::parse(r#"    { 0x41, arm_part, "ARM" },"#).is_none());
        assert!(PartEntry::parse(r#"    { 0xd03, "Cortex-A53" }"#).is_none());
        assert!(PartEntry::parse(r#"    { 0xD03, "Cortex-A53" },"#).is_none());
    }

    #[test]
    fn implementer_entry_captures_table_reference() {
        let entry = ImplementerEntry::parse(r#"    { 0x41, arm_part, "ARM" },"#).unwrap();
        assert_eq!(entry.code.as_str(), "0x41");
        assert_eq!(entry.table, "arm_part");
        assert_eq!(entry.label.as_str(), r#""ARM""#);

        assert!(ImplementerEntry::parse(r#"    { 0xd03, "Cortex-A53" },"#).is_none());
    }

    #[test]
    fn sentinel_rows_are_matched_then_dropped() {
        let lines = [
            r#"    { 0x1, "Foo" },"#,
            r#"    { -1, "unknown" },"#,
            r#"    { 0x2, "Bar" },"#,
            "};",
        ];
        let list = parse_entries::<PartEntry>(&lines, 0, &header("parts")).unwrap();

        let codes: Vec<_> = list.entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["0x1", "0x2"]);
        assert_eq!(list.sentinels, 1);
        assert_eq!(list.next, 3);
    }

    #[test]
    fn terminating_line_is_not_consumed() {
        let lines = [
            "static const struct id_part parts[] = {",
            r#"    { 0x1, "Foo" },"#,
            "static const struct id_part more[] = {",
        ];
        let list = parse_entries::<PartEntry>(&lines, 1, &header("parts")).unwrap();

        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.next, 2);
    }

    #[test]
    fn empty_list_ends_immediately() {
        let lines = ["};"];
        let list = parse_entries::<PartEntry>(&lines, 0, &header("parts")).unwrap();

        assert!(list.entries.is_empty());
        assert_eq!(list.next, 0);
    }

    #[test]
    fn end_of_input_inside_list_is_unterminated() {
        let lines = [r#"    { 0x1, "Foo" },"#];
        let err = parse_entries::<PartEntry>(&lines, 0, &header("parts")).unwrap_err();

        assert!(
            matches!(err, Error::UnterminatedArray { ref name, line: 1 } if name == "parts"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn header_on_last_line_is_unterminated() {
        let lines = ["static const struct id_part parts[] = {"];
        let err = parse_entries::<PartEntry>(&lines, 1, &header("parts")).unwrap_err();

        assert!(matches!(err, Error::UnterminatedArray { .. }));
    }
}

//! Declaration scanner.
//!
//! Walks the source lines once, recognises `static const struct <tag> <name>[] = {`
//! headers and hands the following lines to the entry parser for the role the
//! tag selects.

pub mod entry;

use crate::{
    Error,
    table::{ImplementerEntry, ImplementerTable, PartEntry, PartTable},
};
use entry::{EntryList, parse_entries};
use regex::Regex;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    sync::LazyLock,
};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^static const struct ([A-Za-z0-9_]*) ([A-Za-z0-9_]*)\[\] = \{")
        .expect("header pattern must compile")
});

const HEADER_PREFIX: &str = "static const struct";

///
/// ArrayRole
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArrayRole {
    PartArray,
    ImplementerArray,
    Unrecognized,
}

impl ArrayRole {
    pub const PART_TAG: &'static str = "id_part";
    pub const IMPLEMENTER_TAG: &'static str = "hw_impl";

    #[must_use]
    pub fn classify(tag: &str) -> Self {
        match tag {
            Self::PART_TAG => Self::PartArray,
            Self::IMPLEMENTER_TAG => Self::ImplementerArray,
            _ => Self::Unrecognized,
        }
    }
}

impl Display for ArrayRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PartArray => "part",
            Self::ImplementerArray => "implementer",
            Self::Unrecognized => "unrecognized",
        })
    }
}

///
/// Header
/// A matched array declaration line.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header<'a> {
    pub role: ArrayRole,
    pub tag: &'a str,
    pub name: &'a str,

    /// 1-based line number.
    pub line: usize,
}

impl<'a> Header<'a> {
    #[must_use]
    pub fn parse(text: &'a str, line: usize) -> Option<Self> {
        let caps = HEADER.captures(text)?;
        let tag = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();

        Some(Self {
            role: ArrayRole::classify(tag),
            tag,
            name,
            line,
        })
    }
}

///
/// DuplicatePolicy
/// What to do when an array is declared a second time.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later declaration replaces the earlier one.
    #[default]
    Overwrite,

    /// A redeclaration fails the run.
    Reject,
}

///
/// Extraction
/// Everything the scanner collected in one pass.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extraction {
    pub parts: BTreeMap<String, PartTable>,
    pub implementers: Option<ImplementerTable>,
}

impl Extraction {
    fn insert_parts(&mut self, table: PartTable, policy: DuplicatePolicy) -> Result<(), Error> {
        if policy == DuplicatePolicy::Reject
            && let Some(previous) = self.parts.get(&table.name)
        {
            return Err(Error::DuplicateDeclaration {
                role: ArrayRole::PartArray,
                name: table.name,
                line: table.line,
                previous_line: previous.line,
            });
        }
        self.parts.insert(table.name.clone(), table);

        Ok(())
    }

    fn set_implementers(
        &mut self,
        table: ImplementerTable,
        policy: DuplicatePolicy,
    ) -> Result<(), Error> {
        if policy == DuplicatePolicy::Reject
            && let Some(previous) = &self.implementers
        {
            return Err(Error::DuplicateDeclaration {
                role: ArrayRole::ImplementerArray,
                name: table.name,
                line: table.line,
                previous_line: previous.line,
            });
        }
        self.implementers = Some(table);

        Ok(())
    }
}

///
/// Scanner
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Scanner {
    duplicates: DuplicatePolicy,
    debug: bool,
}

impl Scanner {
    #[must_use]
    pub const fn new(duplicates: DuplicatePolicy, debug: bool) -> Self {
        Self { duplicates, debug }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            eprintln!("[debug] {}", s.as_ref());
        }
    }

    pub fn scan(&self, source: &str) -> Result<Extraction, Error> {
        let lines: Vec<&str> = source.lines().collect();

        self.scan_lines(&lines)
    }

    /// Single forward pass; the position only moves ahead.
    pub fn scan_lines(&self, lines: &[&str]) -> Result<Extraction, Error> {
        let mut extraction = Extraction::default();
        let mut pos = 0;

        while let Some(text) = lines.get(pos) {
            let Some(header) = Header::parse(text, pos + 1) else {
                if text.trim_start().starts_with(HEADER_PREFIX) {
                    self.debug_log(format!("line {}: ignoring near-miss header", pos + 1));
                }
                pos += 1;
                continue;
            };

            pos = match header.role {
                ArrayRole::PartArray => {
                    let list = parse_entries::<PartEntry>(lines, pos + 1, &header)?;
                    self.log_list(&header, &list);
                    let next = list.next;
                    extraction.insert_parts(
                        PartTable {
                            name: header.name.to_string(),
                            line: header.line,
                            entries: list.entries,
                        },
                        self.duplicates,
                    )?;

                    next
                }
                ArrayRole::ImplementerArray => {
                    let list = parse_entries::<ImplementerEntry>(lines, pos + 1, &header)?;
                    self.log_list(&header, &list);
                    let next = list.next;
                    extraction.set_implementers(
                        ImplementerTable {
                            name: header.name.to_string(),
                            line: header.line,
                            entries: list.entries,
                        },
                        self.duplicates,
                    )?;

                    next
                }
                ArrayRole::Unrecognized => {
                    self.debug_log(format!(
                        "line {}: skipping `{}` array `{}`",
                        header.line, header.tag, header.name
                    ));

                    pos + 1
                }
            };
        }

        Ok(extraction)
    }

    fn log_list<E>(&self, header: &Header<'_>, list: &EntryList<E>) {
        self.debug_log(format!(
            "line {}: {} array `{}` has {} entries ({} sentinel rows dropped)",
            header.line,
            header.role,
            header.name,
            list.entries.len(),
            list.sentinels
        ));
    }
}

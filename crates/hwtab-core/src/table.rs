use std::{
    fmt::{self, Display},
    iter::Peekable,
    str::Chars,
};

///
/// Code
/// Numeric code field of an entry, kept as the raw source token so the
/// emitted literal mirrors the source exactly.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Code(String);

impl Code {
    /// Raw text marking an "unknown/default" row in the source tables.
    pub const SENTINEL: &'static str = "-1";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sentinel rows are compared as raw text, never numerically.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::SENTINEL
    }

    /// Interpret the token as an unsigned integer (`0x` hex or decimal).
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        match self.0.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => self.0.parse().ok(),
        }
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

///
/// Label
/// Double-quoted string literal, stored with its quotes.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Label(String);

impl Label {
    pub fn new(literal: impl Into<String>) -> Self {
        Self(literal.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The literal's contents with the quotes removed and C escapes resolved
    /// (simple, `\xHH` and up to three octal digits).
    #[must_use]
    pub fn text(&self) -> String {
        let inner = self
            .0
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&self.0);

        let mut text = String::with_capacity(inner.len());
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                text.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('r') => text.push('\r'),
                Some('x') => match take_digits(&mut chars, 16, 2, 0) {
                    (value, 1..) => text.push(escaped_char(value)),
                    (_, 0) => text.push('x'),
                },
                Some(first @ '0'..='7') => {
                    let first = first.to_digit(8).unwrap_or(0);
                    let (value, _) = take_digits(&mut chars, 8, 2, first);
                    text.push(escaped_char(value));
                }
                Some(other) => text.push(other),
                None => text.push('\\'),
            }
        }

        text
    }
}

// take_digits
// folds up to `max` further digits of `radix` into `value`; returns the value and digit count
fn take_digits(
    chars: &mut Peekable<Chars<'_>>,
    radix: u32,
    max: usize,
    mut value: u32,
) -> (u32, usize) {
    let mut count = 0;
    while count < max {
        let Some(digit) = chars.peek().and_then(|c| c.to_digit(radix)) else {
            break;
        };
        value = value * radix + digit;
        chars.next();
        count += 1;
    }

    (value, count)
}

fn escaped_char(value: u32) -> char {
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

///
/// PartEntry
/// `{ code, "label" },`
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartEntry {
    pub code: Code,
    pub label: Label,
}

///
/// ImplementerEntry
/// `{ code, table, "label" },`
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImplementerEntry {
    pub code: Code,
    pub table: String,
    pub label: Label,
}

///
/// PartTable
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartTable {
    pub name: String,
    pub line: usize,
    pub entries: Vec<PartEntry>,
}

///
/// ImplementerTable
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImplementerTable {
    pub name: String,
    pub line: usize,
    pub entries: Vec<ImplementerEntry>,
}

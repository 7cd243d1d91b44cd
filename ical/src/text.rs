// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Raw text handling: line unfolding and VEVENT block extraction.

use crate::keyword::{KW_BEGIN_VEVENT, KW_END_VEVENT};
use crate::property::{PropertyKey, RawProperty};

/// Unfolds content lines per RFC 5545 §3.1.
///
/// Every line break (`\r\n` or `\n`) that is immediately followed by a single
/// space or horizontal tab is removed together with that whitespace character.
#[must_use]
pub fn unfold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if matches!(lookahead.peek(), Some(' ' | '\t')) {
                    chars.next();
                    chars.next();
                } else {
                    out.push(c);
                }
            }
            '\n' if matches!(chars.peek(), Some(' ' | '\t')) => {
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// The interior text of one `BEGIN:VEVENT ... END:VEVENT` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VEventBlock<'src>(&'src str);

impl<'src> VEventBlock<'src> {
    /// Wraps the interior text of a block.
    #[must_use]
    pub const fn new(text: &'src str) -> Self {
        Self(text)
    }

    /// The interior text.
    #[must_use]
    pub const fn as_str(&self) -> &'src str {
        self.0
    }

    /// Finds the first content line for `key`.
    #[must_use]
    pub fn property(&self, key: PropertyKey) -> Option<RawProperty> {
        self.lines().find_map(|line| RawProperty::from_line(line, key))
    }

    /// Finds every content line for `key`, in order of appearance.
    #[must_use]
    pub fn properties(&self, key: PropertyKey) -> Vec<RawProperty> {
        self.lines()
            .filter_map(|line| RawProperty::from_line(line, key))
            .collect()
    }

    /// Convenience accessor returning just the value of the first match.
    #[must_use]
    pub fn value(&self, key: PropertyKey) -> Option<String> {
        self.property(key).map(|p| p.value)
    }

    fn lines(&self) -> impl Iterator<Item = &'src str> {
        self.0
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

/// Extracts every non-overlapping VEVENT block from already unfolded text,
/// in source order. An unterminated trailing `BEGIN:VEVENT` is ignored.
#[must_use]
pub fn vevent_blocks(text: &str) -> Vec<VEventBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = text;
    while let Some(begin) = rest.find(KW_BEGIN_VEVENT) {
        let after_begin = rest.get(begin + KW_BEGIN_VEVENT.len()..).unwrap_or_default();
        let Some(end) = after_begin.find(KW_END_VEVENT) else {
            break;
        };
        blocks.push(VEventBlock::new(after_begin.get(..end).unwrap_or_default()));
        rest = after_begin
            .get(end + KW_END_VEVENT.len()..)
            .unwrap_or_default();
    }
    blocks
}

/// Unescapes an RFC 5545 TEXT value (`\\`, `\;`, `\,`, `\n`/`\N`).
#[must_use]
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped @ ('\\' | ';' | ',')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

//! Word-list text format.
//!
//! ```text
//! version:3
//! prefix;root;translation;example
//! be;kommen;to receive;Ich bekomme einen Brief.
//! be;finden|sich;to be located;Wo befindest du dich?
//! ```
//!
//! The `version:` line is optional (absent means version 0). The line after it
//! (or the first line) is a header and is skipped. Every data row has exactly
//! four `;`-separated fields.

use drill_core::word::{REFLEXIVE_MARKER, WordEntry};

pub const VERSION_PREFIX: &str = "version:";
const FIELD_SEPARATOR: char = ';';
const ROOT_ALTERNATIVES: char = '|';
const FIELDS_PER_ROW: usize = 4;

/// A row that could not be turned into an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text.
    pub line: usize,
    pub fields: usize,
    pub text: String,
}

/// Parsed contents of a word-list file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    pub version: u32,
    pub entries: Vec<WordEntry>,
    pub skipped: Vec<SkippedRow>,
}

impl WordList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse(text: &str) -> WordList {
    let lines: Vec<&str> = text.lines().collect();

    let (version, header_at) = match lines.first() {
        Some(first) if first.starts_with(VERSION_PREFIX) => {
            let version = first[VERSION_PREFIX.len()..].trim().parse::<u32>().unwrap_or(0);
            (version, 1)
        }
        _ => (0, 0),
    };

    let mut list = WordList {
        version,
        ..WordList::default()
    };

    for (offset, line) in lines.iter().enumerate().skip(header_at + 1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() != FIELDS_PER_ROW {
            list.skipped.push(SkippedRow {
                line: offset + 1,
                fields: fields.len(),
                text: (*line).to_owned(),
            });
            continue;
        }

        let (root, is_reflexive) = parse_root_field(fields[1]);
        list.entries.push(
            WordEntry::new(fields[0], root, fields[2], fields[3]).reflexive(is_reflexive),
        );
    }

    list
}

/// Splits a root field into the bare root and its reflexive flag.
///
/// Alternatives are separated by `|`; the first non-empty one is the root.
/// Any alternative mentioning `sich` marks the verb reflexive, and `(sich)`
/// markers are stripped from the root itself.
pub fn parse_root_field(raw: &str) -> (String, bool) {
    let parts: Vec<&str> = raw
        .split(ROOT_ALTERNATIVES)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let root = parts.first().copied().unwrap_or_default();
    let is_reflexive = parts.iter().any(|part| part.contains("sich"));
    let cleaned = root
        .replace(&format!(" {REFLEXIVE_MARKER}"), "")
        .replace(REFLEXIVE_MARKER, "")
        .trim()
        .to_owned();

    (cleaned, is_reflexive)
}

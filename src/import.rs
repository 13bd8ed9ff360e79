//! Parsing for the registration spreadsheet consumed by the import tool.
//!
//! Layout: the header row is `Date, FSA, FSA, ...`; each following row is a
//! submission timestamp plus `@name#NNNN` tokens under the FSA columns.

use chrono::NaiveDateTime;

use crate::error::BotError;
use crate::fsa::Fsa;
use crate::identity::UsernameToken;

pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Parses the FSA codes from the header row (everything after the first
/// column). Any invalid header cell fails the whole import; a misaligned
/// header would register people under the wrong areas.
pub fn parse_header(fields: &[String]) -> Result<Vec<Fsa>, BotError> {
    fields.iter().skip(1).map(|f| Fsa::parse(f)).collect()
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// One cell successfully parsed into a pending registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub fsa: Fsa,
    pub username: UsernameToken,
}

/// Parses the FSA cells of one data row (everything after the timestamp
/// column). Cells that fail validation become skip reasons for the caller
/// to log; they never fail the row, let alone the import.
pub fn parse_row(fsas: &[Fsa], row: &[String]) -> (Vec<PendingEntry>, Vec<String>) {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for (i, cell) in row.iter().enumerate().skip(1) {
        if cell.is_empty() {
            continue;
        }
        let Some(fsa) = fsas.get(i - 1) else {
            skipped.push(format!("column {i} has no corresponding FSA"));
            continue;
        };
        let Some(stripped) = cell.strip_prefix('@') else {
            skipped.push(format!("column {i} doesn't start with '@'"));
            continue;
        };
        match UsernameToken::parse(stripped) {
            Ok(username) => entries.push(PendingEntry {
                fsa: fsa.clone(),
                username,
            }),
            Err(e) => skipped.push(format!("column {i}: {e}")),
        }
    }
    (entries, skipped)
}

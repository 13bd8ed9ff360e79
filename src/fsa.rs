//! Validation and canonicalization of forward sortation areas (FSAs), the
//! first three characters of a postal code. FSAs are stored lowercase and
//! shown to humans uppercase.

use std::collections::HashSet;
use std::fmt;

use crate::error::BotError;

/// A validated FSA in canonical (lowercase) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fsa(String);

impl Fsa {
    /// Parses a single raw token, case-insensitively.
    ///
    /// The pattern is letter-digit-letter, e.g. `K1P`. Too-short, too-long
    /// and wrong-shape inputs get distinct messages so users can correct
    /// their input without the bot echoing it back.
    pub fn parse(raw: &str) -> Result<Self, BotError> {
        let fsa = raw.to_lowercase();
        let char_count = fsa.chars().count();
        if char_count < 3 {
            return Err(BotError::FsaTooShort);
        }
        if char_count > 3 {
            return Err(BotError::FsaTooLong);
        }
        let bytes = fsa.as_bytes();
        if fsa.len() != 3
            || !bytes[0].is_ascii_lowercase()
            || !bytes[1].is_ascii_digit()
            || !bytes[2].is_ascii_lowercase()
        {
            return Err(BotError::FsaInvalid);
        }
        Ok(Self(fsa))
    }

    /// Canonical lowercase form used as the storage key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_uppercase())
    }
}

/// Parses a batch of raw tokens into a deduplicated set.
///
/// Empty tokens are skipped. Input order is not preserved; callers must not
/// rely on it. Fails with `NoCodesProvided` if nothing is left after
/// filtering, or `TooManyCodes` if the deduplicated set exceeds `ceiling`.
pub fn parse_many<S: AsRef<str>>(raw_tokens: &[S], ceiling: usize) -> Result<HashSet<Fsa>, BotError> {
    let mut fsas = HashSet::new();
    for raw in raw_tokens {
        let raw = raw.as_ref();
        if raw.is_empty() {
            continue;
        }
        fsas.insert(Fsa::parse(raw)?);
    }

    if fsas.is_empty() {
        return Err(BotError::NoCodesProvided);
    }
    if fsas.len() > ceiling {
        return Err(BotError::TooManyCodes);
    }
    Ok(fsas)
}

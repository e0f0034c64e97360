use std::fmt;

use thiserror::Error;


pub const MIN_LEN: usize = 3;
pub const MAX_LEN: usize = 20;

/// Why a raw search term was rejected before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("Please enter a search term")]
    Empty,
    #[error("Search term must be between 3 and 20 characters")]
    Length,
    #[error("Search term contains invalid characters")]
    Charset,
}

/// A validated, trimmed search term. The network layer only accepts these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Rules apply in order and the first failure wins: empty, then length,
    /// then charset. Whitespace-only input is empty, not too short.
    pub fn parse(raw: &str) -> Result<Self, TermError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TermError::Empty);
        }
        let len = trimmed.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(TermError::Length);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TermError::Charset);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

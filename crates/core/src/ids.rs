//! Parsing of entity ids received as text (URL path segments).

use crate::errors::{Result, ValidationError};

/// Parses an entity id.
///
/// Surrounding whitespace, a leading `+` and leading zeros are tolerated, so
/// `"12"`, `" 12 "` and `"+012"` all resolve to `12`. Anything else (empty,
/// trailing garbage, fractions, signs other than `+`, zero, overflow) is an
/// [`ValidationError::InvalidId`].
pub fn parse_id(raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidId(raw.to_string()).into());
    }
    match digits.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId(raw.to_string()).into()),
    }
}

/// How a goal owner is addressed: numeric id or username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerRef {
    Id(i32),
    Username(String),
}

impl OwnerRef {
    /// Segments that satisfy [`parse_id`] are ids, everything else is a username.
    pub fn parse(raw: &str) -> Self {
        match parse_id(raw) {
            Ok(id) => OwnerRef::Id(id),
            Err(_) => OwnerRef::Username(raw.trim().to_string()),
        }
    }
}

//! Lexer for version literals such as `1.2.3-SNAPSHOT-4`

use crate::error::VersionFormatError;
use std::fmt;

/// Literal text separating the dotted part of a version from its snapshot counter
pub const SNAPSHOT_SEPARATOR: &str = "-SNAPSHOT-";

/// A single lexical element of a version literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionToken {
    Numeric(u32),
    Dot,
    SnapshotSeparator,
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionToken::Numeric(n) => write!(f, "{}", n),
            VersionToken::Dot => write!(f, "."),
            VersionToken::SnapshotSeparator => write!(f, "{}", SNAPSHOT_SEPARATOR),
        }
    }
}

/// Splits a version literal into tokens.
///
/// The literal is trimmed first. Two adjacent dots, a `-` that does not open a
/// complete `-SNAPSHOT-` separator, and any run of characters that is neither a
/// digit, a dot nor a dash are rejected here; ordering of the tokens is checked
/// by the parser in [`crate::domain::version`].
pub fn tokenize(literal: &str) -> Result<Vec<VersionToken>, VersionFormatError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(VersionFormatError::Empty);
    }

    let bytes = trimmed.as_bytes();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let rest = &trimmed[offset..];
        let current = bytes[offset];

        if current.is_ascii_digit() {
            let len = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let digits = &rest[..len];
            let value = digits
                .parse::<u32>()
                .map_err(|_| VersionFormatError::InvalidNumericComponent {
                    literal: trimmed.to_string(),
                    component: digits.to_string(),
                })?;
            tokens.push(VersionToken::Numeric(value));
            offset += len;
        } else if current == b'.' {
            if tokens.last() == Some(&VersionToken::Dot) {
                return Err(VersionFormatError::EmptyComponent {
                    literal: trimmed.to_string(),
                    offset,
                });
            }
            tokens.push(VersionToken::Dot);
            offset += 1;
        } else if current == b'-' {
            if !rest.starts_with(SNAPSHOT_SEPARATOR) {
                return Err(VersionFormatError::IncompleteSeparator {
                    literal: trimmed.to_string(),
                    offset,
                });
            }
            tokens.push(VersionToken::SnapshotSeparator);
            offset += SNAPSHOT_SEPARATOR.len();
        } else {
            let len = rest
                .find(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
                .unwrap_or(rest.len());
            return Err(VersionFormatError::InvalidNumericComponent {
                literal: trimmed.to_string(),
                component: rest[..len].to_string(),
            });
        }
    }

    Ok(tokens)
}

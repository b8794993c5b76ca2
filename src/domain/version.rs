use crate::domain::mode::ReleaseMode;
use crate::domain::token::{tokenize, VersionToken, SNAPSHOT_SEPARATOR};
use crate::error::{ReleaseError, Result, VersionFormatError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A release version: `major[.minor[.patch]][-SNAPSHOT-n]`.
///
/// Missing minor and patch components compare and hash as `0`, so `1`, `1.0`
/// and `1.0.0` are the same version, while the literal keeps its original
/// shape. A version without a snapshot counter (a dot release) orders after
/// every snapshot of the same `major.minor.patch`.
#[derive(Debug, Clone)]
pub struct Version {
    major: u32,
    minor: Option<u32>,
    patch: Option<u32>,
    snapshot: Option<u32>,
}

impl Version {
    /// Create a bare major version
    pub fn new(major: u32) -> Self {
        Version {
            major,
            minor: None,
            patch: None,
            snapshot: None,
        }
    }

    /// Create a version from explicit components
    pub fn from_components(
        major: u32,
        minor: Option<u32>,
        patch: Option<u32>,
        snapshot: Option<u32>,
    ) -> Self {
        Version {
            major,
            minor,
            patch,
            snapshot,
        }
    }

    pub fn with_minor(mut self, minor: u32) -> Self {
        self.minor = Some(minor);
        self
    }

    pub fn with_patch(mut self, patch: u32) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn with_snapshot(mut self, snapshot: u32) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Parse a version literal (e.g., "1.2.3-SNAPSHOT-4")
    pub fn parse(literal: &str) -> std::result::Result<Self, VersionFormatError> {
        let tokens = tokenize(literal)?;
        Parser::new(literal.trim(), &tokens).parse()
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> Option<u32> {
        self.minor
    }

    pub fn patch(&self) -> Option<u32> {
        self.patch
    }

    pub fn snapshot(&self) -> Option<u32> {
        self.snapshot
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// A dot release is any version without a snapshot counter
    pub fn is_dot(&self) -> bool {
        !self.is_snapshot()
    }

    /// True for `N`, `N.0` and `N.0.0`
    pub fn is_major(&self) -> bool {
        self.minor.unwrap_or(0) == 0 && self.patch.unwrap_or(0) == 0 && !self.is_snapshot()
    }

    /// The literal form of this version, identical to the parsed input for
    /// well-formed literals
    pub fn literal(&self) -> String {
        self.to_string()
    }

    /// Compute the version that follows this one for the given release mode.
    ///
    /// - Major: a version with neither minor nor patch (such as `3-SNAPSHOT-1`)
    ///   finalizes to `3.0`; anything else jumps to `(major + 1).0`.
    /// - Minor: `major.(minor + 1)`, dropping patch and snapshot.
    /// - Patch: a snapshot finalizes in place; a dot release bumps the patch.
    /// - Snapshot: a snapshot bumps its counter; a dot release opens
    ///   `major.minor.(patch + 1)-SNAPSHOT-1`.
    /// - Custom: the custom version, unless it precedes this one.
    /// - Info: unchanged.
    pub fn next_version(&self, mode: &ReleaseMode) -> Result<Version> {
        let minor = self.minor.unwrap_or(0);
        let patch = self.patch.unwrap_or(0);

        let next = match mode {
            ReleaseMode::Info => self.clone(),
            ReleaseMode::Major => {
                if self.minor.is_none() && self.patch.is_none() {
                    Version::new(self.major).with_minor(0)
                } else {
                    Version::new(self.increment(self.major, "major")?).with_minor(0)
                }
            }
            ReleaseMode::Minor => {
                Version::new(self.major).with_minor(self.increment(minor, "minor")?)
            }
            ReleaseMode::Patch => {
                if self.is_snapshot() {
                    Version::new(self.major).with_minor(minor).with_patch(patch)
                } else {
                    Version::new(self.major)
                        .with_minor(minor)
                        .with_patch(self.increment(patch, "patch")?)
                }
            }
            ReleaseMode::Snapshot => match self.snapshot {
                Some(snapshot) => Version {
                    snapshot: Some(self.increment(snapshot, "snapshot")?),
                    ..self.clone()
                },
                None => Version::new(self.major)
                    .with_minor(minor)
                    .with_patch(self.increment(patch, "patch")?)
                    .with_snapshot(1),
            },
            ReleaseMode::Custom(custom) => {
                if custom < self {
                    return Err(ReleaseError::illegal_argument(format!(
                        "{} cannot be changed to preceding {}",
                        self, custom
                    )));
                }
                custom.clone()
            }
        };

        Ok(next)
    }

    fn increment(&self, value: u32, component: &str) -> Result<u32> {
        value.checked_add(1).ok_or_else(|| {
            ReleaseError::illegal_state(format!(
                "version component overflow: {} of {} cannot be incremented",
                component, self
            ))
        })
    }

    fn snapshot_rank(&self, other: &Self) -> Ordering {
        match (self.snapshot, other.snapshot) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.unwrap_or(0).hash(state);
        self.patch.unwrap_or(0).hash(state);
        self.snapshot.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.unwrap_or(0).cmp(&other.minor.unwrap_or(0)))
            .then(self.patch.unwrap_or(0).cmp(&other.patch.unwrap_or(0)))
            .then_with(|| self.snapshot_rank(other))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        match (self.minor, self.patch) {
            (Some(minor), Some(patch)) => write!(f, ".{}.{}", minor, patch)?,
            (None, Some(patch)) => write!(f, ".0.{}", patch)?,
            (Some(minor), None) => write!(f, ".{}", minor)?,
            (None, None) => {}
        }
        if let Some(snapshot) = self.snapshot {
            write!(f, "{}{}", SNAPSHOT_SEPARATOR, snapshot)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Version::parse(s)
    }
}

/// Recursive-descent reader over the token stream
struct Parser<'a> {
    literal: &'a str,
    tokens: &'a [VersionToken],
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(literal: &'a str, tokens: &'a [VersionToken]) -> Self {
        Parser {
            literal,
            tokens,
            position: 0,
        }
    }

    fn parse(mut self) -> std::result::Result<Version, VersionFormatError> {
        let major = self.numeric()?;
        let mut dotted = Vec::with_capacity(2);
        let mut snapshot = None;

        while let Some(token) = self.next() {
            match token {
                VersionToken::Dot if snapshot.is_none() && dotted.len() < 2 => {
                    dotted.push(self.numeric()?);
                }
                VersionToken::SnapshotSeparator if snapshot.is_none() => {
                    snapshot = Some(self.numeric()?);
                }
                other => return Err(self.unexpected(format!("'{}'", other))),
            }
        }

        Ok(Version {
            major,
            minor: dotted.first().copied(),
            patch: dotted.get(1).copied(),
            snapshot,
        })
    }

    fn next(&mut self) -> Option<VersionToken> {
        let token = self.tokens.get(self.position).copied();
        self.position += 1;
        token
    }

    fn numeric(&mut self) -> std::result::Result<u32, VersionFormatError> {
        match self.next() {
            Some(VersionToken::Numeric(value)) => Ok(value),
            _ => Err(VersionFormatError::EmptyComponent {
                literal: self.literal.to_string(),
                offset: self.position.saturating_sub(1),
            }),
        }
    }

    fn unexpected(&self, found: String) -> VersionFormatError {
        VersionFormatError::Unexpected {
            literal: self.literal.to_string(),
            found,
        }
    }
}

//! Release intent selection

use crate::domain::version::Version;
use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// What kind of release a pipeline run produces.
///
/// `Custom` carries the operator-supplied target version, so a fresh value is
/// built for each invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Report version information only
    Info,
    Major,
    Minor,
    Patch,
    Snapshot,
    Custom(Version),
}

impl ReleaseMode {
    /// Build a mode from its label and the optional custom version literal.
    ///
    /// A custom label without a version is an invalid invocation; a custom
    /// version that does not parse is reported back to the operator.
    pub fn from_label(label: &str, custom: Option<&str>) -> Result<Self> {
        match custom {
            Some(literal) => {
                if !label.eq_ignore_ascii_case("custom") {
                    return Err(ReleaseError::illegal_argument(format!(
                        "A custom version cannot be combined with the '{}' release mode",
                        label
                    )));
                }
                Self::custom(literal)
            }
            None => label.parse(),
        }
    }

    /// Parse an operator-supplied custom version
    pub fn custom(literal: &str) -> Result<Self> {
        Version::parse(literal)
            .map(ReleaseMode::Custom)
            .map_err(|e| ReleaseError::user(format!("Malformed custom release version: {}", e)))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReleaseMode::Info => "info",
            ReleaseMode::Major => "major",
            ReleaseMode::Minor => "minor",
            ReleaseMode::Patch => "patch",
            ReleaseMode::Snapshot => "snapshot",
            ReleaseMode::Custom(_) => "custom",
        }
    }

    /// True for the modes that derive the next version from the current one
    pub fn is_increment(&self) -> bool {
        matches!(
            self,
            ReleaseMode::Major | ReleaseMode::Minor | ReleaseMode::Patch | ReleaseMode::Snapshot
        )
    }

    pub fn is_dot(&self) -> bool {
        match self {
            ReleaseMode::Major | ReleaseMode::Minor | ReleaseMode::Patch => true,
            ReleaseMode::Custom(version) => version.is_dot(),
            _ => false,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        match self {
            ReleaseMode::Snapshot => true,
            ReleaseMode::Custom(version) => version.is_snapshot(),
            _ => false,
        }
    }
}

impl FromStr for ReleaseMode {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "info" => Ok(ReleaseMode::Info),
            "major" => Ok(ReleaseMode::Major),
            "minor" => Ok(ReleaseMode::Minor),
            "patch" => Ok(ReleaseMode::Patch),
            "snapshot" => Ok(ReleaseMode::Snapshot),
            "custom" => Err(ReleaseError::illegal_argument(
                "A custom release requires an explicit version",
            )),
            other => Err(ReleaseError::user(format!(
                "Unknown release mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReleaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseMode::Custom(version) => write!(f, "custom ({})", version),
            other => write!(f, "{}", other.label()),
        }
    }
}

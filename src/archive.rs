//! Archive inspection for binary distributions

use crate::error::{ReleaseError, Result};
use std::fs::File;
use std::path::Path;

/// Reads the structure of a distribution archive
pub trait ArchiveInspector {
    /// Name of the single directory every archive entry lives under.
    ///
    /// This is read from the archive itself; it is not derived from the
    /// archive's file name.
    fn top_level_directory_name(&self, archive: &Path) -> Result<String>;
}

/// Inspects `.zip` distributions
#[derive(Debug, Default)]
pub struct ZipInspector;

impl ArchiveInspector for ZipInspector {
    fn top_level_directory_name(&self, archive: &Path) -> Result<String> {
        let file = File::open(archive)?;
        let zip = zip::ZipArchive::new(file)?;

        let mut top_level: Option<&str> = None;
        for name in zip.file_names() {
            let first = name
                .split('/')
                .find(|part| !part.is_empty() && *part != ".")
                .unwrap_or("");
            let is_directory = name.trim_end_matches('/').contains('/') || name.ends_with('/');

            if first.is_empty() || !is_directory {
                return Err(ReleaseError::user(format!(
                    "Archive {} has an entry outside a top-level directory: '{}'",
                    archive.display(),
                    name
                )));
            }
            match top_level {
                None => top_level = Some(first),
                Some(existing) if existing == first => {}
                Some(existing) => {
                    return Err(ReleaseError::user(format!(
                        "Archive {} has more than one top-level directory: '{}' and '{}'",
                        archive.display(),
                        existing,
                        first
                    )));
                }
            }
        }

        top_level.map(str::to_string).ok_or_else(|| {
            ReleaseError::user(format!("Archive {} is empty", archive.display()))
        })
    }
}

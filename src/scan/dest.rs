use super::ScanError;
use crate::utils::relative_str;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Immutable snapshot of the destination tree, in walk order.
#[derive(Debug, Clone, Default)]
pub struct DestScan {
    /// Every file found below the root.
    pub files: Vec<String>,

    /// Every directory found below the root. A directory with no source
    /// counterpart appears here once; its contents are never visited.
    pub dirs: Vec<String>,
}

/// Walk the destination tree, pruning descent into directories the source
/// tree no longer has. A missing root is not an error: on a first run the
/// destination simply does not exist yet and everything is a fresh encode.
pub fn scan_dest(root: &Path, source_dirs: &HashSet<String>) -> Result<DestScan, ScanError> {
    let mut scan = DestScan::default();
    if !root.is_dir() {
        return Ok(scan);
    }

    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        let rel = relative_str(root, entry.path());

        if entry.file_type().is_dir() {
            // Everything under a doomed directory goes with it, so there is
            // no point enumerating the descendants.
            if !source_dirs.contains(&rel) {
                walker.skip_current_dir();
            }
            scan.dirs.push(rel);
        } else {
            scan.files.push(rel);
        }
    }

    Ok(scan)
}

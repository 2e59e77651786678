use super::ScanError;
use crate::utils::{relative_str, swap_extension};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use walkdir::WalkDir;

/// Immutable snapshot of the source tree.
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    /// Source-relative path -> would-be destination-relative path, for every
    /// regular file carrying the source extension.
    pub encode: HashMap<String, String>,

    /// Every subdirectory of the root, including empty ones.
    pub dirs: HashSet<String>,
}

/// Walk the source tree and index every file ending in `.{source_ext}`.
///
/// Symlinked directories are not followed, so a link cannot pull the walk
/// outside the root or into a cycle. Any unreadable entry aborts the whole
/// scan: a partial snapshot would later produce bogus purge decisions.
pub fn scan_source(
    root: &Path,
    source_ext: &str,
    dest_ext: &str,
) -> Result<SourceScan, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceRootNotFound(root.to_path_buf()));
    }

    let suffix = format!(".{source_ext}");
    let mut scan = SourceScan::default();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        let rel = relative_str(root, entry.path());

        if entry.file_type().is_dir() {
            scan.dirs.insert(rel);
        } else if entry.file_type().is_file() && rel.ends_with(&suffix) {
            // Eligible files always carry an extension, so the swap is total.
            if let Some(dst) = swap_extension(&rel, dest_ext) {
                scan.encode.insert(rel, dst);
            }
        }
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_source_missing_root() {
        let result = scan_source(Path::new("/nonexistent/oggify-src"), "flac", "ogg");
        assert!(matches!(result, Err(ScanError::SourceRootNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_source_does_not_follow_dir_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("real")).unwrap();
        fs::write(tmp.path().join("real/song.flac"), b"x").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();

        let scan = scan_source(tmp.path(), "flac", "ogg").unwrap();

        // The link is neither descended into nor treated as a directory.
        assert_eq!(scan.encode.len(), 1);
        assert!(scan.encode.contains_key("real/song.flac"));
        assert!(!scan.dirs.contains("link"));
    }

    #[test]
    fn test_scan_source_indexes_and_records_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::create_dir_all(tmp.path().join("empty")).unwrap();
        fs::write(tmp.path().join("a/song.flac"), b"x").unwrap();
        fs::write(tmp.path().join("a/cover.jpg"), b"x").unwrap();

        let scan = scan_source(tmp.path(), "flac", "ogg").unwrap();

        assert_eq!(
            scan.encode.get("a/song.flac"),
            Some(&"a/song.ogg".to_string())
        );
        assert_eq!(scan.encode.len(), 1);
        assert!(scan.dirs.contains("a"));
        assert!(scan.dirs.contains("a/b"));
        assert!(scan.dirs.contains("empty"));
    }
}

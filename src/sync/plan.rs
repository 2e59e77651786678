use crate::scan::{scan_dest, scan_source, ScanError};
use crate::utils::swap_extension;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("scan error: {0}")]
    ScanError(#[from] ScanError),
}

/// The action plan for one run: what to encode, what to delete.
///
/// Buckets are disjoint except that a `limited_purge` file's source entry
/// also surfaces in `encode` (delete first, then encode fresh). Ordering
/// within each bucket is walk order and carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    /// Source files with no destination counterpart yet (source -> dest)
    pub encode: HashMap<String, String>,

    /// Source files whose correctly-named destination already exists
    /// (source -> dest); staleness policy is the executor's business
    pub reencode: HashMap<String, String>,

    /// Destination files sitting in a source file's slot under the wrong
    /// extension; removed before that slot is encoded
    pub limited_purge: Vec<String>,

    /// Destination files and directories with no source counterpart
    pub purge: Vec<String>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.encode.is_empty()
            && self.reencode.is_empty()
            && self.limited_purge.is_empty()
            && self.purge.is_empty()
    }
}

/// Diff the source tree against the destination tree.
///
/// Classification looks only at path strings and extension suffixes; no
/// timestamps or content are consulted, so two runs over unchanged trees
/// produce the same plan. Either scan failing aborts with no partial plan.
pub fn build_sync_plan(
    source_root: &Path,
    dest_root: &Path,
    source_ext: &str,
    dest_ext: &str,
) -> Result<SyncPlan, PlanError> {
    let source = scan_source(source_root, source_ext, dest_ext)?;
    let dest = scan_dest(dest_root, &source.dirs)?;

    let mut plan = SyncPlan {
        encode: source.encode,
        ..SyncPlan::default()
    };
    let dest_suffix = format!(".{dest_ext}");

    for dir in dest.dirs {
        if !source.dirs.contains(&dir) {
            plan.purge.push(dir);
        }
    }

    for file in dest.files {
        // A file with no extension at all can never shadow a source entry.
        let candidate = swap_extension(&file, source_ext);
        match candidate.as_deref().filter(|c| plan.encode.contains_key(*c)) {
            Some(_) if !file.ends_with(&dest_suffix) => {
                // Wrong format in the right slot: delete it, and leave the
                // source entry in `encode` so the slot is filled again.
                plan.limited_purge.push(file);
            }
            Some(src) => {
                let src = src.to_string();
                if let Some(dst) = plan.encode.remove(&src) {
                    plan.reencode.insert(src, dst);
                }
            }
            None => plan.purge.push(file),
        }
    }

    debug!(
        encode = plan.encode.len(),
        reencode = plan.reencode.len(),
        limited_purge = plan.limited_purge.len(),
        purge = plan.purge.len(),
        "built sync plan"
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[&str]) -> TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"x").unwrap();
        }
        tmp
    }

    #[test]
    fn test_fresh_destination_is_all_encode() {
        let src = tree(&["a/song.flac", "b/tune.flac"]);
        let dst = tempfile::tempdir().unwrap();

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(plan.encode.len(), 2);
        assert_eq!(plan.encode["a/song.flac"], "a/song.ogg");
        assert!(plan.reencode.is_empty());
        assert!(plan.limited_purge.is_empty());
        assert!(plan.purge.is_empty());
    }

    #[test]
    fn test_existing_counterpart_is_reencode() {
        let src = tree(&["a/song.flac"]);
        let dst = tree(&["a/song.ogg"]);

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert!(plan.encode.is_empty());
        assert_eq!(plan.reencode["a/song.flac"], "a/song.ogg");
    }

    #[test]
    fn test_wrong_extension_is_limited_purge_and_still_encoded() {
        let src = tree(&["a/song.flac"]);
        let dst = tree(&["a/song.mp3"]);

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(plan.limited_purge, vec!["a/song.mp3".to_string()]);
        assert_eq!(plan.encode["a/song.flac"], "a/song.ogg");
        assert!(plan.reencode.is_empty());
    }

    #[test]
    fn test_orphan_file_is_purged() {
        let src = tree(&["a/song.flac"]);
        let dst = tree(&["a/song.ogg", "a/orphan.ogg"]);

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(plan.purge, vec!["a/orphan.ogg".to_string()]);
    }

    #[test]
    fn test_orphan_directory_is_purged_without_descendants() {
        let src = tree(&["a/song.flac"]);
        let dst = tree(&["a/song.ogg", "b/old.ogg"]);

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(plan.purge, vec!["b".to_string()]);
    }

    #[test]
    fn test_extensionless_destination_file_is_purged() {
        let src = tree(&["a/song.flac"]);
        let dst = tree(&["a/song.ogg", "a/song"]);

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(plan.purge, vec!["a/song".to_string()]);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let src = tree(&["a/song.flac", "b/tune.flac"]);
        let dst = tree(&["a/song.ogg", "c/stale.ogg"]);

        let first = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();
        let second = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(first.encode, second.encode);
        assert_eq!(first.reencode, second.reencode);
        let as_set = |v: &[String]| v.iter().cloned().collect::<std::collections::HashSet<_>>();
        assert_eq!(as_set(&first.limited_purge), as_set(&second.limited_purge));
        assert_eq!(as_set(&first.purge), as_set(&second.purge));
    }

    #[test]
    fn test_multi_dot_names_swap_last_extension_only() {
        let src = tree(&["a/x.1.flac"]);
        let dst = tempfile::tempdir().unwrap();

        let plan = build_sync_plan(src.path(), dst.path(), "flac", "ogg").unwrap();

        assert_eq!(plan.encode["a/x.1.flac"], "a/x.1.ogg");
    }
}

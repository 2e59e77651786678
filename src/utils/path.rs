use std::path::Path;

/// Replace the last extension of a slash-separated relative path.
///
/// Only the segment after the final dot is swapped; earlier dots in the
/// filename are kept as-is (`a/x.1.flac` -> `a/x.1.ogg`). Returns `None` when
/// the filename carries no extension at all, since such a path can never map
/// onto a source entry.
pub fn swap_extension(rel: &str, new_ext: &str) -> Option<String> {
    let (dir, name) = match rel.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, rel),
    };
    let (stem, _) = name.rsplit_once('.')?;
    if stem.is_empty() {
        // Dotfiles like ".flac" have no stem to attach an extension to.
        return None;
    }
    Some(match dir {
        Some(dir) => format!("{dir}/{stem}.{new_ext}"),
        None => format!("{stem}.{new_ext}"),
    })
}

/// Path of `path` relative to `root` as a slash-separated string with no
/// trailing slash and no leading `./`.
pub fn relative_str(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_string_lossy());
    }
    parts.join("/")
}

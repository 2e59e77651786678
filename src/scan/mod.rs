mod dest;
mod source;

pub use dest::{scan_dest, DestScan};
pub use source::{scan_source, SourceScan};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("source root {0} does not exist or is not a directory")]
    SourceRootNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("walk error: {0}")]
    WalkError(#[from] walkdir::Error),
}

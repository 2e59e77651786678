use super::plan::SyncPlan;
use crate::codec::Codec;
use crate::utils::{DEFAULT_NICE, DEFAULT_QUALITY};
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("encode of {src} failed (decoder or encoder exited nonzero)")]
    EncodeFailed { src: String },
}

/// Knobs the executor applies on top of the plan.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Encoding quality, 0-10 on the oggenc scale
    pub quality: u8,

    /// Niceness for codec processes
    pub nice: i32,

    /// Re-encode every `reencode` entry regardless of timestamps
    pub force: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            nice: DEFAULT_NICE,
            force: false,
        }
    }
}

/// What one run actually did.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub encoded: Vec<String>,
    pub reencoded: Vec<String>,
    pub purged: Vec<String>,
    pub skipped: Vec<String>,
}

/// Carry out a sync plan: purge first, then fill every open slot.
///
/// Purges run before encodes so a `limited_purge` file is gone by the time
/// its slot comes up in the `encode` pass. `reencode` entries are skipped
/// when the destination is at least as new as the source, unless `force` is
/// set; that staleness call is deliberately made here and not in the plan.
/// The first failed codec invocation aborts the run.
pub async fn execute_sync(
    plan: &SyncPlan,
    source_root: &Path,
    dest_root: &Path,
    decoder: &dyn Codec,
    encoder: &dyn Codec,
    opts: &ExecuteOptions,
) -> Result<SyncReport, ExecuteError> {
    let mut report = SyncReport::default();

    for rel in &plan.purge {
        let full = dest_root.join(rel);
        if full.is_dir() {
            info!("Purging directory {rel}");
            fs::remove_dir_all(&full).await?;
        } else if full.exists() {
            info!("Purging {rel}");
            fs::remove_file(&full).await?;
        }
        report.purged.push(rel.clone());
    }

    for rel in &plan.limited_purge {
        let full = dest_root.join(rel);
        if full.exists() {
            info!("Purging stale format {rel}");
            fs::remove_file(&full).await?;
        }
        report.purged.push(rel.clone());
    }

    for (src_rel, dst_rel) in &plan.encode {
        encode_one(source_root, dest_root, src_rel, dst_rel, decoder, encoder, opts).await?;
        report.encoded.push(src_rel.clone());
    }

    for (src_rel, dst_rel) in &plan.reencode {
        if !opts.force && !is_stale(source_root, dest_root, src_rel, dst_rel).await? {
            report.skipped.push(src_rel.clone());
            continue;
        }
        encode_one(source_root, dest_root, src_rel, dst_rel, decoder, encoder, opts).await?;
        report.reencoded.push(src_rel.clone());
    }

    Ok(report)
}

/// A destination is stale when its source has a strictly newer mtime.
async fn is_stale(
    source_root: &Path,
    dest_root: &Path,
    src_rel: &str,
    dst_rel: &str,
) -> Result<bool, ExecuteError> {
    let src_mtime = fs::metadata(source_root.join(src_rel)).await?.modified()?;
    let dst_mtime = match fs::metadata(dest_root.join(dst_rel)).await {
        Ok(meta) => meta.modified()?,
        Err(_) => return Ok(true),
    };
    Ok(src_mtime > dst_mtime)
}

/// Pipe the decoder into the encoder, writing a `.part` file that is renamed
/// into place only after both processes exit cleanly, so an interrupt never
/// leaves a truncated file at the real destination path.
async fn encode_one(
    source_root: &Path,
    dest_root: &Path,
    src_rel: &str,
    dst_rel: &str,
    decoder: &dyn Codec,
    encoder: &dyn Codec,
    opts: &ExecuteOptions,
) -> Result<(), ExecuteError> {
    let src = source_root.join(src_rel);
    let dst = dest_root.join(dst_rel);
    let tmp = dest_root.join(format!("{dst_rel}.part"));

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).await?;
    }

    info!("Encoding {src_rel} to {dst_rel}");

    let mut decoder_child = decoder.decode(&src, opts.nice)?;
    let stream = decoder_child.stdout.take().ok_or_else(|| {
        std::io::Error::other("decoder spawned without a piped stdout")
    })?;
    let stdin: Stdio = stream.try_into()?;
    let mut encoder_child = encoder.encode(&tmp, opts.quality, opts.nice, stdin)?;

    let encoder_status = encoder_child.wait().await?;
    let decoder_status = decoder_child.wait().await?;

    if !encoder_status.success() || !decoder_status.success() {
        warn!(
            "codec failure on {src_rel}: decoder {decoder_status}, encoder {encoder_status}"
        );
        let _ = fs::remove_file(&tmp).await;
        return Err(ExecuteError::EncodeFailed {
            src: src_rel.to_string(),
        });
    }

    fs::rename(&tmp, &dst).await?;
    Ok(())
}

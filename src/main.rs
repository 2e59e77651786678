mod codec;
mod config;
mod scan;
mod sync;
mod utils;

use anyhow::Context;
use clap::Parser;
use codec::CodecKind;
use std::path::PathBuf;
use sync::{build_sync_plan, execute_sync, ExecuteOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Oggify - mirror a lossless audio tree into a transcoded one
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the source (lossless) tree
    #[arg(required_unless_present = "list_codecs")]
    source: Option<PathBuf>,

    /// Root of the destination (transcoded) tree
    #[arg(required_unless_present = "list_codecs")]
    dest: Option<PathBuf>,

    /// Codec for source files
    #[arg(short = 's', long, env = "OGGIFY_SOURCE_FORMAT")]
    source_format: Option<String>,

    /// Codec for destination files
    #[arg(short = 'o', long, env = "OGGIFY_OUTPUT_FORMAT")]
    output_format: Option<String>,

    /// Encoding quality, 0-10 (see oggenc(1))
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=10))]
    quality: Option<u8>,

    /// Niceness for codec processes
    #[arg(short, long)]
    nice: Option<i32>,

    /// Re-encode even when the destination is newer than the source
    #[arg(long)]
    force: bool,

    /// Print the plan without touching the destination tree
    #[arg(long)]
    dry_run: bool,

    /// List available codecs and exit
    #[arg(long)]
    list_codecs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.list_codecs {
        println!("input:  {}", codec::available(CodecKind::Input).join(", "));
        println!("output: {}", codec::available(CodecKind::Output).join(", "));
        return Ok(());
    }

    // Defaults come from ./oggify.json when present; flags win.
    let defaults = config::read_config(std::path::Path::new("."))
        .await?
        .unwrap_or_default();
    let source_format = args.source_format.unwrap_or(defaults.source_format);
    let output_format = args.output_format.unwrap_or(defaults.output_format);
    let opts = ExecuteOptions {
        quality: args.quality.unwrap_or(defaults.quality),
        nice: args.nice.unwrap_or(defaults.nice),
        force: args.force,
    };

    let decoder = codec::resolve(&source_format, CodecKind::Input)?;
    let encoder = codec::resolve(&output_format, CodecKind::Output)?;

    let source_root = args.source.expect("clap enforces presence");
    let dest_root = args.dest.expect("clap enforces presence");

    let plan = build_sync_plan(
        &source_root,
        &dest_root,
        decoder.extension(),
        encoder.extension(),
    )
    .context("building sync plan")?;

    if plan.is_empty() {
        info!("Nothing to do");
        return Ok(());
    }

    if args.dry_run {
        for (src, dst) in &plan.encode {
            println!("encode   {src} -> {dst}");
        }
        for (src, dst) in &plan.reencode {
            println!("reencode {src} -> {dst}");
        }
        for path in &plan.limited_purge {
            println!("purge    {path} (wrong format)");
        }
        for path in &plan.purge {
            println!("purge    {path}");
        }
        return Ok(());
    }

    let report = execute_sync(&plan, &source_root, &dest_root, decoder, encoder, &opts)
        .await
        .context("executing sync plan")?;

    info!(
        "Done: {} encoded, {} re-encoded, {} purged, {} up to date",
        report.encoded.len(),
        report.reencoded.len(),
        report.purged.len(),
        report.skipped.len()
    );

    Ok(())
}

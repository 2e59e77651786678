use super::{nice_command, Codec, CodecKind};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Child;

/// FLAC source decoder, backed by the `flac` reference tool.
pub struct Flac;

impl Codec for Flac {
    fn extension(&self) -> &'static str {
        "flac"
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Input
    }

    fn decode(&self, src: &Path, nice: i32) -> std::io::Result<Child> {
        nice_command(nice, "flac")
            .arg("--decode")
            .arg("--stdout")
            .arg("--silent")
            .arg(src)
            .stdout(Stdio::piped())
            .spawn()
    }

    fn encode(
        &self,
        _dst: &Path,
        _quality: u8,
        _nice: i32,
        _input: Stdio,
    ) -> std::io::Result<Child> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "flac is an input codec",
        ))
    }
}

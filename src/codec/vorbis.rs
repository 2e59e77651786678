use super::{nice_command, Codec, CodecKind};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Child;

/// Ogg Vorbis output encoder, backed by `oggenc` from vorbis-tools.
pub struct Vorbis;

impl Codec for Vorbis {
    fn extension(&self) -> &'static str {
        "ogg"
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Output
    }

    fn decode(&self, _src: &Path, _nice: i32) -> std::io::Result<Child> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "ogg is an output codec",
        ))
    }

    fn encode(&self, dst: &Path, quality: u8, nice: i32, input: Stdio) -> std::io::Result<Child> {
        nice_command(nice, "oggenc")
            .arg("--quiet")
            .arg("-q")
            .arg(quality.to_string())
            .arg("-o")
            .arg(dst)
            .arg("-")
            .stdin(input)
            .spawn()
    }
}

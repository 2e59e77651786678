use super::{nice_command, Codec, CodecKind};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Child;

/// Maps the 0-10 quality knob onto lame's VBR presets.
const LAME_PRESETS: [&str; 11] = [
    "medium", "medium", "medium", "standard", "standard", "standard", "extreme", "extreme",
    "extreme", "extreme", "insane",
];

/// MP3 VBR output encoder, backed by `lame`.
pub struct Mp3;

impl Codec for Mp3 {
    fn extension(&self) -> &'static str {
        "mp3"
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Output
    }

    fn decode(&self, _src: &Path, _nice: i32) -> std::io::Result<Child> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "mp3 is an output codec",
        ))
    }

    fn encode(&self, dst: &Path, quality: u8, nice: i32, input: Stdio) -> std::io::Result<Child> {
        let preset = LAME_PRESETS[usize::from(quality).min(LAME_PRESETS.len() - 1)];
        nice_command(nice, "lame")
            .arg("--quiet")
            .arg("--preset")
            .arg(preset)
            .arg("-")
            .arg(dst)
            .stdin(input)
            .spawn()
    }
}

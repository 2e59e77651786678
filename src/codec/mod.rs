mod flac;
mod mp3;
mod vorbis;

pub use flac::Flac;
pub use mp3::Mp3;
pub use vorbis::Vorbis;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("no codec named {0}")]
    Unknown(String),

    #[error("{name} is not an {expected} codec")]
    WrongKind { name: String, expected: CodecKind },
}

/// Which direction a codec supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Input,
    Output,
    Both,
}

impl CodecKind {
    fn supports(self, wanted: CodecKind) -> bool {
        self == wanted || self == CodecKind::Both
    }
}

impl std::fmt::Display for CodecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecKind::Input => write!(f, "input"),
            CodecKind::Output => write!(f, "output"),
            CodecKind::Both => write!(f, "input/output"),
        }
    }
}

/// An external codec program.
///
/// Implementations spawn the real encoder/decoder processes; nothing here
/// touches audio itself. Decoders stream to stdout, encoders read stdin and
/// write the destination file, so the executor can connect the two with a
/// pipe the way a shell would.
pub trait Codec: Send + Sync {
    /// File extension this codec produces or consumes, without the dot.
    fn extension(&self) -> &'static str;

    fn kind(&self) -> CodecKind;

    /// Spawn the decoder for `src` with stdout piped.
    fn decode(&self, src: &Path, nice: i32) -> std::io::Result<Child>;

    /// Spawn the encoder writing `dst`, reading audio from `input`.
    fn encode(&self, dst: &Path, quality: u8, nice: i32, input: Stdio)
        -> std::io::Result<Child>;
}

/// Wrap a codec invocation in `nice -n <n>` so a long batch encode stays
/// polite. Shared by the shipped codecs.
fn nice_command(nice: i32, program: &str) -> Command {
    let mut cmd = Command::new("nice");
    cmd.arg("-n").arg(nice.to_string()).arg(program);
    cmd
}

static REGISTRY: Lazy<HashMap<&'static str, Box<dyn Codec>>> = Lazy::new(|| {
    let mut codecs: HashMap<&'static str, Box<dyn Codec>> = HashMap::new();
    codecs.insert("flac", Box::new(Flac));
    codecs.insert("ogg", Box::new(Vorbis));
    codecs.insert("mp3", Box::new(Mp3));
    codecs
});

/// Look up a codec by name, checking it supports the wanted direction.
pub fn resolve(name: &str, wanted: CodecKind) -> Result<&'static dyn Codec, CodecError> {
    let codec = REGISTRY
        .get(name)
        .ok_or_else(|| CodecError::Unknown(name.to_string()))?;
    if !codec.kind().supports(wanted) {
        return Err(CodecError::WrongKind {
            name: name.to_string(),
            expected: wanted,
        });
    }
    Ok(codec.as_ref())
}

/// Names of all registered codecs supporting the given direction, sorted.
pub fn available(wanted: CodecKind) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY
        .iter()
        .filter(|(_, codec)| codec.kind().supports(wanted))
        .map(|(name, _)| *name)
        .collect();
    names.sort_unstable();
    names
}

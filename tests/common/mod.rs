use oggify::{Codec, CodecKind};
use std::fs;
use std::path::Path;
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::{Child, Command};

/// Create a temp tree populated with the given relative files.
pub fn tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = tempfile::tempdir().expect("Should create temp dir");
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    tmp
}

/// Pass-through "codec" so executor tests need no real audio tools: decode
/// is `cat`, encode copies stdin to the destination file.
pub struct CatCodec;

impl Codec for CatCodec {
    fn extension(&self) -> &'static str {
        "ogg"
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Both
    }

    fn decode(&self, src: &Path, _nice: i32) -> std::io::Result<Child> {
        Command::new("cat").arg(src).stdout(Stdio::piped()).spawn()
    }

    fn encode(
        &self,
        dst: &Path,
        _quality: u8,
        _nice: i32,
        input: Stdio,
    ) -> std::io::Result<Child> {
        Command::new("sh")
            .arg("-c")
            .arg("exec cat > \"$0\"")
            .arg(dst)
            .stdin(input)
            .spawn()
    }
}

/// Codec whose encoder always exits nonzero.
pub struct BrokenEncoder;

impl Codec for BrokenEncoder {
    fn extension(&self) -> &'static str {
        "ogg"
    }

    fn kind(&self) -> CodecKind {
        CodecKind::Output
    }

    fn decode(&self, _src: &Path, _nice: i32) -> std::io::Result<Child> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "output only",
        ))
    }

    fn encode(
        &self,
        _dst: &Path,
        _quality: u8,
        _nice: i32,
        input: Stdio,
    ) -> std::io::Result<Child> {
        Command::new("sh")
            .arg("-c")
            .arg("exit 1")
            .stdin(input)
            .spawn()
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::GenError;
use crate::exec::run_tool;
use crate::pipeline::AssetProducer;

const SCRATCH_WAV: &str = "sound.wav";

/// Produces one spoken-word clip per symbol by invoking an espeak-style TTS
/// binary with `-w <scratch.wav> <phrase>`. Arguments are passed as a
/// structured list, never through a shell.
pub struct TtsProducer {
    bin: String,
    scratch: PathBuf,
    timeout: Duration,
}

impl TtsProducer {
    pub fn new(bin: &str, scratch_dir: &Path, timeout: Duration) -> Self {
        Self {
            bin: bin.to_string(),
            scratch: scratch_dir.join(SCRATCH_WAV),
            timeout,
        }
    }
}

impl AssetProducer for TtsProducer {
    async fn produce(&mut self, symbol: char, phrase: &str) -> Result<(), GenError> {
        // A stale clip from the previous iteration must not survive a silent
        // synthesis failure, or it would be recorded for the wrong symbol.
        match fs::remove_file(&self.scratch) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove stale {}: {}", self.scratch.display(), e),
        }

        let mut cmd = Command::new(&self.bin);
        cmd.arg("-w")
            .arg(&self.scratch)
            .arg(phrase)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        run_tool("synthesis", symbol, &mut cmd, self.timeout).await?;

        if !self.scratch.exists() {
            return Err(GenError::MissingAsset {
                symbol,
                path: self.scratch.clone(),
            });
        }

        log_clip_duration(&self.scratch);
        Ok(())
    }

    fn scratch_path(&self) -> &Path {
        &self.scratch
    }
}

/// Duration of the freshly synthesized clip, for the progress log only.
/// An unreadable header is worth a warning but never fails the run.
fn log_clip_duration(path: &Path) {
    match hound::WavReader::open(path) {
        Ok(reader) => {
            let spec = reader.spec();
            let frames = reader.len() as f64 / spec.channels as f64;
            debug!("clip duration: {:.2}s", frames / spec.sample_rate as f64);
        }
        Err(e) => warn!("could not read WAV header from {}: {}", path.display(), e),
    }
}

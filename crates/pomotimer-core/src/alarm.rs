//! Audio cue played when an interval completes.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::AlarmError;

/// Something that can make a completion sound.
pub trait Alarm {
    /// Start playing. Must not block until playback ends.
    fn play(&self) -> Result<(), AlarmError>;
}

/// Plays a fixed sound asset through an external player program.
#[derive(Debug, Clone)]
pub struct CommandAlarm {
    program: String,
    asset: PathBuf,
}

impl CommandAlarm {
    pub fn new(program: impl Into<String>, asset: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            asset: asset.into(),
        }
    }

    /// Spawn the player and wait for it on a detached thread so the exited
    /// process is reaped.
    fn launch(&self) -> Result<JoinHandle<io::Result<ExitStatus>>, AlarmError> {
        if !self.asset.exists() {
            return Err(AlarmError::MissingAsset(self.asset.clone()));
        }
        let mut child = Command::new(&self.program)
            .arg(&self.asset)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AlarmError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        Ok(thread::spawn(move || child.wait()))
    }
}

impl Alarm for CommandAlarm {
    fn play(&self) -> Result<(), AlarmError> {
        self.launch().map(drop)
    }
}

/// Never makes a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlarm;

impl Alarm for SilentAlarm {
    fn play(&self) -> Result<(), AlarmError> {
        Ok(())
    }
}

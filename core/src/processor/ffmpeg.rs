//! Finding and running the ffmpeg executable.
//!
//! Lookup order: an explicit override, `ffmpeg` on `PATH`, a sidecar build
//! next to the current executable, and finally a fresh sidecar download
//! when [`EngineConfig::auto_download`] allows it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::config::EngineConfig;
use crate::error::ConvertError;

/// Environment variable naming an ffmpeg executable to use.
pub const FFMPEG_ENV: &str = "MEDIA_CONVERTER_FFMPEG";

const INSTALL_HINT: &str = "install ffmpeg (brew install ffmpeg on macOS, \
    apt install ffmpeg on Linux) or point --ffmpeg at an executable";

pub fn locate_ffmpeg(config: &EngineConfig) -> Result<PathBuf, ConvertError> {
    if let Some(requested) = &config.ffmpeg_override {
        return which::which(requested).map_err(|e| {
            ConvertError::EngineUnavailable(format!(
                "ffmpeg not found at {}: {}",
                requested.display(),
                e
            ))
        });
    }

    if let Ok(path) = which::which("ffmpeg") {
        log::debug!("Using system ffmpeg at {}", path.display());
        return Ok(path);
    }

    if let Some(path) = installed_sidecar() {
        log::debug!("Using sidecar ffmpeg at {}", path.display());
        return Ok(path);
    }

    if !config.auto_download {
        return Err(ConvertError::EngineUnavailable(format!(
            "ffmpeg not found, {}",
            INSTALL_HINT
        )));
    }

    log::info!("ffmpeg not found, downloading a sidecar build");
    ffmpeg_sidecar::download::auto_download().map_err(|e| {
        ConvertError::EngineUnavailable(format!(
            "failed to download ffmpeg: {}; {}",
            e, INSTALL_HINT
        ))
    })?;

    installed_sidecar().ok_or_else(|| {
        ConvertError::EngineUnavailable(format!(
            "ffmpeg download finished but no executable was found; {}",
            INSTALL_HINT
        ))
    })
}

fn installed_sidecar() -> Option<PathBuf> {
    ffmpeg_sidecar::paths::sidecar_path()
        .ok()
        .filter(|path| path.is_file())
}

/// Exit status and captured streams of a finished process.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Run `program` to completion, capturing its output.
pub fn run_captured<I, S>(program: &Path, args: I) -> Result<ProcessOutput, ConvertError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);

    log::debug!("Executing: {} {:?}", program.display(), cmd.get_args().collect::<Vec<_>>());

    let output = cmd.output().map_err(|e| {
        ConvertError::EngineUnavailable(format!("failed to execute {}: {}", program.display(), e))
    })?;

    Ok(ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

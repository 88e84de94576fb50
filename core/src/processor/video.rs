use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::error::ConvertError;
use crate::format::MediaKind;
use crate::processor::ffmpeg::{locate_ffmpeg, run_captured};
use crate::processor::Converter;
use crate::request::ResolvedRequest;

/// Audio codec used whenever streams are re-encoded.
pub const AUDIO_CODEC: &str = "aac";

/// Transcodes video by running ffmpeg as a blocking subprocess.
pub struct VideoConverter {
    program: PathBuf,
}

impl VideoConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find an ffmpeg executable as configured.
    pub fn locate(config: &EngineConfig) -> Result<Self, ConvertError> {
        locate_ffmpeg(config).map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Translate a user-facing codec name to an ffmpeg encoder identifier.
/// Unknown names are passed through unchanged.
pub fn canonical_video_codec(name: &str) -> String {
    let name = name.trim();
    match name.to_lowercase().as_str() {
        "h264" | "libx264" => "libx264".to_string(),
        "h265" | "hevc" | "libx265" => "libx265".to_string(),
        "vp9" => "libvpx-vp9".to_string(),
        "vp8" => "libvpx".to_string(),
        _ => name.to_string(),
    }
}

/// Encoder used when no codec is requested; `None` leaves the choice to ffmpeg.
pub fn default_video_codec(format: &str) -> Option<&'static str> {
    match format {
        "mp4" | "mkv" => Some("libx264"),
        "webm" => Some("libvpx-vp9"),
        _ => None,
    }
}

/// Arguments for one ffmpeg run, program name excluded.
pub fn build_args(request: &ResolvedRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-i".into()];
    args.push(request.input_path.clone().into_os_string());
    // Overwrite output file
    args.push("-y".into());

    match request.video_quality.rate_control() {
        None => {
            log::debug!("Using ffmpeg copy mode (no re-encoding)");
            args.extend(["-c:v", "copy", "-c:a", "copy"].map(OsString::from));
        }
        Some((crf, preset)) => {
            let codec = request
                .codec
                .as_deref()
                .map(canonical_video_codec)
                .or_else(|| default_video_codec(request.format.name).map(str::to_string));
            if let Some(codec) = codec {
                args.extend([OsString::from("-c:v"), OsString::from(codec)]);
            }
            args.extend([
                OsString::from("-crf"),
                OsString::from(crf.to_string()),
                OsString::from("-preset"),
                OsString::from(preset),
            ]);
            args.extend(["-c:a", AUDIO_CODEC].map(OsString::from));
        }
    }

    args.push(request.output_path.clone().into_os_string());
    args
}

impl Converter for VideoConverter {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn convert(&self, request: &ResolvedRequest) -> Result<PathBuf, ConvertError> {
        log::debug!(
            "Transcoding {} to {} with preset {}",
            request.input_path.display(),
            request.format.display_name(),
            request.video_quality
        );

        let output = run_captured(&self.program, build_args(request))?;

        if !output.success() {
            log::error!("ffmpeg failed: {}", output.stderr);
            let details = match output.stderr.trim() {
                "" => format!("exited with {}", output.status),
                stderr => stderr.to_string(),
            };
            return Err(ConvertError::EngineError(format!(
                "ffmpeg conversion failed: {}",
                details
            )));
        }

        Ok(request.output_path.clone())
    }
}

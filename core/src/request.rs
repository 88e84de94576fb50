use std::path::PathBuf;

use crate::config::{Quality, VideoQuality};
use crate::format::FormatSpec;

/// What the user asked for, before any validation.
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub output_format: Option<String>,
    pub quality: Quality,
    pub video_quality: VideoQuality,
    pub codec: Option<String>,
}

impl ConversionRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn video_quality(mut self, video_quality: VideoQuality) -> Self {
        self.video_quality = video_quality;
        self
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }
}

/// A request whose input exists, whose format is in the registry and whose
/// output path is known.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: &'static FormatSpec,
    pub quality: Quality,
    pub video_quality: VideoQuality,
    pub codec: Option<String>,
}

pub mod ffmpeg;
pub mod raster;
pub mod video;

use std::path::PathBuf;

use crate::error::ConvertError;
use crate::format::{FormatRegistry, MediaKind};
use crate::request::ResolvedRequest;

/// An engine that turns a resolved request into an output file.
pub trait Converter {
    fn kind(&self) -> MediaKind;

    fn registry(&self) -> &'static FormatRegistry {
        self.kind().registry()
    }

    /// Convert and return the path written.
    fn convert(&self, request: &ResolvedRequest) -> Result<PathBuf, ConvertError>;
}

//! Image and video format conversion.
//!
//! A [`ConversionRequest`] is checked and completed by [`resolve::resolve`]
//! against a static [`format::FormatRegistry`], then handed to a
//! [`processor::Converter`]: [`processor::raster::ImageConverter`] encodes in
//! process, [`processor::video::VideoConverter`] runs ffmpeg.

pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod processor;
pub mod request;
pub mod resolve;

pub use config::{EngineConfig, Quality, VideoQuality};
pub use error::ConvertError;
pub use format::{FormatRegistry, FormatSpec, MediaKind, IMAGE_FORMATS, VIDEO_FORMATS};
pub use processor::Converter;
pub use request::{ConversionRequest, ResolvedRequest};

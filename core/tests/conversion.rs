use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use media_converter_core::pipeline;
use media_converter_core::processor::raster::ImageConverter;
use media_converter_core::processor::video::VideoConverter;
use media_converter_core::{ConversionRequest, ConvertError, Quality, VideoQuality};

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let img = RgbImage::from_fn(40, 30, |x, y| Rgb([x as u8 * 6, y as u8 * 8, 90]));
    let path = dir.join(name);
    DynamicImage::ImageRgb8(img).save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

#[test]
fn test_png_to_jpeg_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "photo.png");

    let request = ConversionRequest::new(&input).output_format("jpeg");
    let out = pipeline::run(&ImageConverter, request).unwrap();

    assert_eq!(out, dir.path().join("photo.jpg"));
    let bytes = fs::read(&out).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_output_format_inferred_into_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "photo.png");
    let target = dir.path().join("exports/icons/photo.ico");

    let request = ConversionRequest::new(&input).output_path(&target);
    let out = pipeline::run(&ImageConverter, request).unwrap();

    assert_eq!(out, target);
    let decoded = image::open(&target).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 30));
}

#[test]
fn test_explicit_quality_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "photo.png");

    let low = pipeline::run(
        &ImageConverter,
        ConversionRequest::new(&input)
            .output_path(dir.path().join("low.webp"))
            .quality(Quality::new(5).unwrap()),
    )
    .unwrap();
    let high = pipeline::run(
        &ImageConverter,
        ConversionRequest::new(&input)
            .output_path(dir.path().join("high.webp"))
            .quality(Quality::new(100).unwrap()),
    )
    .unwrap();

    assert!(fs::metadata(low).unwrap().len() < fs::metadata(high).unwrap().len());
}

#[test]
fn test_png_to_pdf_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "scan.png");
    let target = dir.path().join("docs/scan.pdf");

    let request = ConversionRequest::new(&input).output_path(&target);
    let out = pipeline::run(&ImageConverter, request).unwrap();

    assert_eq!(out, target);
    assert!(fs::read(&target).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn test_corrupt_input_is_engine_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    fs::write(&input, b"\x89PNG but not really").unwrap();

    let request = ConversionRequest::new(&input).output_format("gif");
    let err = pipeline::run(&ImageConverter, request).unwrap_err();
    assert!(matches!(err, ConvertError::EngineError(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(!dir.path().join("broken.gif").exists());
}

#[test]
fn test_missing_input_fails_before_directories() {
    let dir = tempfile::tempdir().unwrap();
    let request = ConversionRequest::new(dir.path().join("nope.mov"))
        .output_path(dir.path().join("out/clip.mp4"));

    let err = pipeline::run(&VideoConverter::new("ffmpeg"), request).unwrap_err();
    assert!(matches!(err, ConvertError::InputNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unknown_video_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mov");
    fs::write(&input, b"not inspected").unwrap();

    let request = ConversionRequest::new(&input).output_format("gif");
    let err = pipeline::run(&VideoConverter::new("ffmpeg"), request).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[cfg(unix)]
mod fake_ffmpeg {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-ffmpeg");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_nonzero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mov");
        fs::write(&input, b"movie").unwrap();
        let ffmpeg = script(dir.path(), "echo 'Unknown encoder libfoo' >&2\nexit 1");

        let request = ConversionRequest::new(&input).output_format("mp4").codec("libfoo");
        let err = pipeline::run(&VideoConverter::new(ffmpeg), request).unwrap_err();

        match &err {
            ConvertError::EngineError(msg) => assert!(msg.contains("Unknown encoder libfoo")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_copy_preset_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mov");
        fs::write(&input, b"movie").unwrap();
        let log = dir.path().join("args.txt");
        let ffmpeg = script(
            dir.path(),
            &format!("for a in \"$@\"; do echo \"$a\" >> '{}'; done\nexit 0", log.display()),
        );

        let request = ConversionRequest::new(&input)
            .output_format("mp4")
            .video_quality(VideoQuality::Copy);
        let out = pipeline::run(&VideoConverter::new(ffmpeg), request).unwrap();
        assert_eq!(out, dir.path().join("clip.mp4"));

        let args: Vec<String> = fs::read_to_string(&log)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert!(args.windows(2).any(|w| w == ["-c:v", "copy"]));
        assert!(args.windows(2).any(|w| w == ["-c:a", "copy"]));
        assert!(!args.iter().any(|a| a == "-crf" || a == "-preset"));
        assert_eq!(args.last().unwrap(), &out.display().to_string());
    }
}

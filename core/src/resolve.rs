use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::format::{FormatRegistry, FormatSpec};
use crate::request::{ConversionRequest, ResolvedRequest};

/// Output path used when none is given: the input's stem with the format's
/// default extension, next to the input.
pub fn default_output_path(input: &Path, format: &FormatSpec) -> PathBuf {
    input.with_extension(format.default_extension())
}

/// Validate a request against `registry` and fill in what is missing.
///
/// The input is checked before anything touches the filesystem, so a missing
/// input never leaves directories behind.
pub fn resolve(
    request: ConversionRequest,
    registry: &FormatRegistry,
) -> Result<ResolvedRequest, ConvertError> {
    if !request.input_path.is_file() {
        return Err(ConvertError::InputNotFound {
            path: request.input_path,
        });
    }

    let output_path = request
        .output_path
        .filter(|p| !p.to_string_lossy().trim().is_empty());

    let requested = request
        .output_format
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let format = match requested {
        Some(name) => registry
            .get(name)
            .ok_or_else(|| ConvertError::UnsupportedFormat {
                format: name.to_lowercase(),
                supported: registry.supported_list(),
            })?,
        None => output_path
            .as_deref()
            .and_then(|p| registry.from_path(p))
            .ok_or(ConvertError::FormatUndetermined)?,
    };

    let output_path =
        output_path.unwrap_or_else(|| default_output_path(&request.input_path, format));
    ensure_parent_dir(&output_path)?;

    log::info!(
        "Resolved {} -> {} ({})",
        request.input_path.display(),
        output_path.display(),
        format.name
    );

    Ok(ResolvedRequest {
        input_path: request.input_path,
        output_path,
        format,
        quality: request.quality,
        video_quality: request.video_quality,
        codec: request.codec.filter(|c| !c.trim().is_empty()),
    })
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ConvertError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            log::debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| ConvertError::Io {
                path: parent.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quality;
    use crate::format::{IMAGE_FORMATS, VIDEO_FORMATS};

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"data").unwrap();
        path
    }

    #[test]
    fn test_default_output_uses_stem_and_default_extension() {
        let jpeg = IMAGE_FORMATS.get("jpeg").unwrap();
        assert_eq!(
            default_output_path(Path::new("shots/photo.png"), jpeg),
            PathBuf::from("shots/photo.jpg")
        );
        let mp4 = VIDEO_FORMATS.get("mp4").unwrap();
        assert_eq!(default_output_path(Path::new("clip"), mp4), PathBuf::from("clip.mp4"));
    }

    #[test]
    fn test_resolve_synthesizes_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch(dir.path(), "photo.png");

        let request = ConversionRequest::new(&input).output_format("JPEG");
        let resolved = resolve(request, &IMAGE_FORMATS).unwrap();
        assert_eq!(resolved.output_path, dir.path().join("photo.jpg"));
        assert_eq!(resolved.format.name, "jpeg");
        assert_eq!(resolved.quality, Quality::DEFAULT);
    }

    #[test]
    fn test_blank_output_path_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch(dir.path(), "clip.mov");

        let request = ConversionRequest::new(&input).output_path("   ").output_format("mkv");
        let resolved = resolve(request, &VIDEO_FORMATS).unwrap();
        assert_eq!(resolved.output_path, dir.path().join("clip.mkv"));
    }

    #[test]
    fn test_format_inferred_from_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch(dir.path(), "photo.png");
        let output = dir.path().join("nested/deeper/photo.WEBP");

        let request = ConversionRequest::new(&input).output_path(&output);
        let resolved = resolve(request, &IMAGE_FORMATS).unwrap();
        assert_eq!(resolved.format.name, "webp");
        assert!(dir.path().join("nested/deeper").is_dir());
    }

    #[test]
    fn test_format_undetermined() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch(dir.path(), "photo.png");

        let err = resolve(ConversionRequest::new(&input), &IMAGE_FORMATS).unwrap_err();
        assert!(matches!(err, ConvertError::FormatUndetermined));

        let request = ConversionRequest::new(&input).output_path(dir.path().join("photo.xyz"));
        let err = resolve(request, &IMAGE_FORMATS).unwrap_err();
        assert!(matches!(err, ConvertError::FormatUndetermined));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch(dir.path(), "photo.png");

        let request = ConversionRequest::new(&input).output_format("heic");
        let err = resolve(request, &IMAGE_FORMATS).unwrap_err();
        match err {
            ConvertError::UnsupportedFormat { format, supported } => {
                assert_eq!(format, "heic");
                assert!(supported.starts_with("jpeg, png"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never/created/out.jpg");

        let request = ConversionRequest::new(dir.path().join("missing.png")).output_path(&output);
        let err = resolve(request, &IMAGE_FORMATS).unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!dir.path().join("never").exists());
    }

    #[test]
    fn test_directory_is_not_a_valid_input() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConversionRequest::new(dir.path()).output_format("png");
        let err = resolve(request, &IMAGE_FORMATS).unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound { .. }));
    }

    #[test]
    fn test_ensure_parent_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/out.mp4");
        ensure_parent_dir(&target).unwrap();
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent_dir(Path::new("bare.mp4")).unwrap();
    }

    #[test]
    fn test_blank_codec_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let input = touch(dir.path(), "clip.mov");
        let request = ConversionRequest::new(&input).output_format("mp4").codec(" ");
        let resolved = resolve(request, &VIDEO_FORMATS).unwrap();
        assert!(resolved.codec.is_none());
    }
}

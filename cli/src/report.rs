use std::fs;
use std::path::Path;

use console::style;

use media_converter_core::{ConvertError, MediaKind};

/// Line printed after a successful conversion.
pub fn success_message(output: &Path) -> String {
    let size = fs::metadata(output)
        .map(|m| format!(" ({})", format_size(m.len())))
        .unwrap_or_default();
    format!(
        "{} Successfully converted to: {}{}",
        style("✓").green().bold(),
        output.display(),
        size
    )
}

/// Human-readable explanation of a failure, with likely causes for engine errors.
pub fn failure_messages(err: &ConvertError, kind: MediaKind) -> Vec<String> {
    let mut lines = Vec::new();
    match err {
        ConvertError::EngineError(_) => {
            lines.push(style("Conversion failed. Common causes:").red().bold().to_string());
            lines.extend(likely_causes(kind).iter().map(|c| format!("  - {c}")));
            lines.push(String::new());
            lines.push(format!("Error details: {err}"));
        }
        ConvertError::EngineUnavailable(_) => {
            lines.push(format!("{} {err}", style("Error:").red().bold()));
            lines.push(String::new());
            lines.push("Install ffmpeg and make sure it is on PATH:".to_string());
            lines.push("  brew install ffmpeg      (macOS)".to_string());
            lines.push("  apt install ffmpeg       (Debian/Ubuntu)".to_string());
            lines.push("or pass --ffmpeg <PATH> to use a specific executable.".to_string());
        }
        ConvertError::Io { .. } => {
            lines.push(format!("{} {err}", style("Error:").red().bold()));
            lines.push("  - Check that you can write to the output location".to_string());
        }
        _ => lines.push(format!("{} {err}", style("Error:").red().bold())),
    }
    lines
}

fn likely_causes(kind: MediaKind) -> &'static [&'static str] {
    match kind {
        MediaKind::Image => &[
            "Unsupported or corrupted input image",
            "The target format cannot be written by the image codecs",
            "Insufficient permissions",
        ],
        MediaKind::Video => &[
            "Unsupported input format",
            "Insufficient disk space",
            "Corrupted input file",
            "Codec not supported by the target container (common with Copy)",
        ],
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_engine_error_lists_causes() {
        let err = ConvertError::EngineError("ffmpeg conversion failed: moov atom not found".into());
        let lines = failure_messages(&err, MediaKind::Video);
        assert!(lines.iter().any(|l| l.contains("Corrupted input file")));
        assert!(lines.last().unwrap().contains("moov atom not found"));
    }

    #[test]
    fn test_validation_error_is_single_line() {
        let err = ConvertError::InputNotFound {
            path: PathBuf::from("gone.png"),
        };
        let lines = failure_messages(&err, MediaKind::Image);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("gone.png"));
    }

    #[test]
    fn test_success_message_without_file() {
        let msg = success_message(Path::new("does/not/exist.jpg"));
        assert!(msg.ends_with("does/not/exist.jpg"));
    }
}

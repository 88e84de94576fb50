use std::path::PathBuf;

use clap::Parser;

use media_converter_core::processor::ffmpeg::FFMPEG_ENV;
use media_converter_core::EngineConfig;

/// Interactive image and video converter
#[derive(Debug, Parser)]
#[command(name = "media_converter", version, about)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// ffmpeg executable to use for video (path or name on PATH)
    #[arg(long, value_name = "PATH", env = FFMPEG_ENV)]
    pub ffmpeg: Option<PathBuf>,

    /// Never download a sidecar ffmpeg build
    #[arg(long)]
    pub no_download: bool,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            ffmpeg_override: self.ffmpeg.clone(),
            auto_download: !self.no_download,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["media_converter"]).unwrap();
        assert!(!cli.verbose);
        let config = cli.engine_config();
        assert!(config.auto_download);
    }

    #[test]
    fn test_engine_flags() {
        let args = ["media_converter", "-v", "--ffmpeg", "/opt/ffmpeg", "--no-download"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        let config = cli.engine_config();
        assert_eq!(config.ffmpeg_override, Some(PathBuf::from("/opt/ffmpeg")));
        assert!(!config.auto_download);
    }
}

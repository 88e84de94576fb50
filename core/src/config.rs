use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Compression quality for lossy image formats, 1-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;
    pub const DEFAULT: Quality = Quality(85);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quality {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid quality value: {}", s.trim()))?;
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("quality must be between {} and {}", Self::MIN, Self::MAX))
    }
}

/// Named rate-control trade-off for video transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoQuality {
    Low,
    #[default]
    Medium,
    High,
    Copy,
}

impl VideoQuality {
    pub const ALL: [VideoQuality; 4] = [Self::Low, Self::Medium, Self::High, Self::Copy];

    /// Constant rate factor and encoder speed preset; `None` for stream copy.
    pub fn rate_control(&self) -> Option<(u8, &'static str)> {
        match self {
            Self::Low => Some((28, "fast")),
            Self::Medium => Some((23, "medium")),
            Self::High => Some((18, "slow")),
            Self::Copy => None,
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, Self::Copy)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low (faster, larger file)",
            Self::Medium => "Medium (balanced)",
            Self::High => "High (slower, smaller file)",
            Self::Copy => "Copy (no re-encoding, fastest)",
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

impl FromStr for VideoQuality {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "low" => Ok(Self::Low),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "high" => Ok(Self::High),
            "4" | "copy" => Ok(Self::Copy),
            _ => Err(format!("unknown quality preset: {s}")),
        }
    }
}

/// How the video engine is found.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Explicit ffmpeg executable, by path or by name on PATH
    pub ffmpeg_override: Option<PathBuf>,
    /// Fetch a sidecar ffmpeg build when none is installed
    pub auto_download: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_override: None,
            auto_download: true,
        }
    }
}

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn registry(&self) -> &'static FormatRegistry {
        match self {
            MediaKind::Image => &IMAGE_FORMATS,
            MediaKind::Video => &VIDEO_FORMATS,
        }
    }
}

/// A canonical output format and the file extensions that map to it.
#[derive(Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub name: &'static str,
    /// The first entry is used when synthesizing output paths.
    pub extensions: &'static [&'static str],
    /// Whether a quality setting applies when encoding.
    pub lossy: bool,
}

impl FormatSpec {
    const fn new(name: &'static str, extensions: &'static [&'static str], lossy: bool) -> Self {
        Self {
            name,
            extensions,
            lossy,
        }
    }

    pub fn default_extension(&self) -> &'static str {
        self.extensions[0]
    }

    pub fn display_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }
}

/// Immutable table of the formats one engine can write.
#[derive(Debug)]
pub struct FormatRegistry {
    kind: MediaKind,
    formats: &'static [FormatSpec],
}

pub static IMAGE_FORMATS: FormatRegistry = FormatRegistry {
    kind: MediaKind::Image,
    formats: &[
        FormatSpec::new("jpeg", &["jpg", "jpeg"], true),
        FormatSpec::new("png", &["png"], false),
        FormatSpec::new("gif", &["gif"], false),
        FormatSpec::new("webp", &["webp"], true),
        FormatSpec::new("bmp", &["bmp"], false),
        FormatSpec::new("tiff", &["tiff", "tif"], false),
        FormatSpec::new("pdf", &["pdf"], true),
        FormatSpec::new("ico", &["ico"], false),
        FormatSpec::new("avif", &["avif"], true),
        FormatSpec::new("tga", &["tga"], false),
        FormatSpec::new("qoi", &["qoi"], false),
    ],
};

pub static VIDEO_FORMATS: FormatRegistry = FormatRegistry {
    kind: MediaKind::Video,
    formats: &[
        FormatSpec::new("mp4", &["mp4"], true),
        FormatSpec::new("avi", &["avi"], true),
        FormatSpec::new("mov", &["mov"], true),
        FormatSpec::new("mkv", &["mkv"], true),
        FormatSpec::new("webm", &["webm"], true),
        FormatSpec::new("flv", &["flv"], true),
        FormatSpec::new("wmv", &["wmv"], true),
        FormatSpec::new("m4v", &["m4v"], true),
        FormatSpec::new("3gp", &["3gp"], true),
        FormatSpec::new("ogv", &["ogv"], true),
    ],
};

fn normalize(token: &str) -> String {
    token.trim().trim_start_matches('.').to_ascii_lowercase()
}

impl FormatRegistry {
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn formats(&self) -> &'static [FormatSpec] {
        self.formats
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.formats.iter().map(|f| f.name)
    }

    /// Comma separated list of format names, in registry order.
    pub fn supported_list(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    pub fn resolve_format_from_extension(&self, ext: &str) -> Option<&'static FormatSpec> {
        let ext = normalize(ext);
        self.formats
            .iter()
            .find(|f| f.extensions.contains(&ext.as_str()))
    }

    /// Look up a format by canonical name, falling back to its extensions
    /// so that `jpg` and `tif` are accepted as names.
    pub fn get(&self, name: &str) -> Option<&'static FormatSpec> {
        let name = normalize(name);
        self.formats
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.resolve_format_from_extension(&name))
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn default_extension(&self, name: &str) -> Option<&'static str> {
        self.get(name).map(FormatSpec::default_extension)
    }

    pub fn from_path(&self, path: &Path) -> Option<&'static FormatSpec> {
        let ext = path.extension()?.to_str()?;
        self.resolve_format_from_extension(ext)
    }

    /// 1-based selection, as shown in the numbered format list.
    pub fn by_ordinal(&self, ordinal: usize) -> Option<&'static FormatSpec> {
        ordinal.checked_sub(1).and_then(|i| self.formats.get(i))
    }
}

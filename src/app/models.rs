use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// How files matching neither pattern list are embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultFormat {
    #[default]
    Byte,
    Str,
    Both,
    Skip,
}

impl DefaultFormat {
    pub fn classification(self) -> Classification {
        match self {
            DefaultFormat::Byte => Classification {
                bytes: true,
                string: false,
            },
            DefaultFormat::Str => Classification {
                bytes: false,
                string: true,
            },
            DefaultFormat::Both => Classification {
                bytes: true,
                string: true,
            },
            DefaultFormat::Skip => Classification::default(),
        }
    }
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub package_name: String,
    pub bytes_fn: Option<String>,
    pub str_fn: Option<String>,
    pub prefix: String,
    pub byte_patterns: Vec<String>,
    pub str_patterns: Vec<String>,
    pub default_format: DefaultFormat,
    /// Replacement for the platform path separator, `None` keeps it as is.
    pub path_sep: Option<String>,
    pub silent: bool,
}

impl RunConfig {
    /// True when the generated source is written to stdout.
    pub fn to_console(&self) -> bool {
        self.destination.is_none()
    }
}

/// Which maps a file ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub bytes: bool,
    pub string: bool,
}

impl Classification {
    pub fn is_skipped(&self) -> bool {
        !self.bytes && !self.string
    }

    pub fn describe(&self) -> &'static str {
        match (self.bytes, self.string) {
            (true, true) => "added to bytes and strings",
            (true, false) => "added to bytes",
            (false, true) => "added to strings",
            (false, false) => "skipped (not matching neither byte nor string patterns)",
        }
    }
}

/// Represents a single object discovered during the walk.
#[derive(Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String,
    pub is_dir: bool,
}

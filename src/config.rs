use std::path::Path;

use crate::error::Error;

/// Default extension for documentation source files.
const DEFAULT_EXTENSION: &str = "rst";

/// Project configuration loaded from `.symref.toml`.
/// Include/exclude patterns are path prefixes applied to documentation
/// source files relative to the project root.
pub struct Config {
    exclude: Vec<String>,
    extension: String,
    include: Vec<String>,
}

/// Raw TOML structure for `.symref.toml`.
#[derive(serde::Deserialize)]
struct SymrefTomlConfig {
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    include: Vec<String>,
}

impl Config {
    /// Load config from `.symref.toml` in the given root directory.
    /// Returns a default that scans every `.rst` file if the file doesn't
    /// exist. Returns an error if the file exists but is malformed — never
    /// silently falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".symref.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::scan_everything_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: SymrefTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            exclude: raw.exclude,
            extension: raw.extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            include: raw.include,
        })
    }

    /// Default config that includes everything and excludes nothing.
    fn scan_everything_by_default() -> Self {
        Self {
            exclude: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            include: Vec::new(),
        }
    }

    /// The source file extension to scan for, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check whether a documentation source path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()))
    }
}

use std::path::Path;

use serde::Deserialize;

use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseLimits {
    /// Raw lines longer than this are skipped instead of matched.
    pub max_line_bytes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_line_bytes: 64 * 1024,
        }
    }
}

/// Settings shared by every analyzer result converter.
///
/// All fields are optional in TOML:
///
/// ```toml
/// normalize_paths = false
///
/// [limits]
/// max_line_bytes = 65536
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub limits: ParseLimits,
    /// Lexically clean `.` and `..` out of resolved file paths. Off by
    /// default, so relative paths are joined verbatim.
    pub normalize_paths: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            limits: ParseLimits::default(),
            normalize_paths: false,
        }
    }
}

impl ConvertConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConvertError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

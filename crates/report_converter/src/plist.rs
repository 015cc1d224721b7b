//! Canonical bug-report document handed to report storage.
//!
//! The shape mirrors the plist layout report storage consumes: one
//! [`PlistResult`] per source file, each with the file table, its
//! diagnostics, and the metadata of the producing tool.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::checker::CheckerName;
use crate::error::ConvertError;

pub const GENERATOR_NAME: &str = "report-converter";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Location {
    pub line: u32,
    pub col: u32,
    /// Index into the owning [`PlistResult::files`].
    pub file: usize,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathEventKind {
    #[default]
    Event,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct PathEvent {
    pub kind: PathEventKind,
    pub location: Location,
    pub depth: u32,
    pub message: String,
    pub extended_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub location: Location,
    pub check_name: CheckerName,
    pub description: String,
    pub category: String,
    /// Name of the tool that produced the diagnostic.
    #[serde(rename = "type")]
    pub analyzer_type: String,
    pub issue_hash_content_of_line_in_context: String,
    pub path: Vec<PathEvent>,
    /// Tool-specific additions; never overlaps the fields above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Diagnostic {
    /// Keys a tool-specific extra field may not use.
    pub const RESERVED_KEYS: [&'static str; 7] = [
        "location",
        "check_name",
        "description",
        "category",
        "type",
        "issue_hash_content_of_line_in_context",
        "path",
    ];
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AnalyzerInfo {
    pub name: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Metadata {
    pub analyzer: AnalyzerInfo,
    pub generated_by: GeneratorInfo,
}

impl Metadata {
    pub fn for_tool(tool_name: &str) -> Self {
        Self {
            analyzer: AnalyzerInfo {
                name: tool_name.to_string(),
            },
            generated_by: GeneratorInfo {
                name: GENERATOR_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Diagnostics of a single source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlistResult {
    pub files: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub metadata: Metadata,
}

impl PlistResult {
    pub fn source_file(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }
}

/// Every file's results from one conversion, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlistResults(pub Vec<PlistResult>);

impl PlistResults {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlistResult> {
        self.0.iter()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.0.iter().map(|r| r.diagnostics.len()).sum()
    }

    /// Looks up the result for `file_path`.
    pub fn for_file(&self, file_path: &str) -> Option<&PlistResult> {
        self.0.iter().find(|r| r.source_file() == Some(file_path))
    }

    pub fn to_json_pretty(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a PlistResults {
    type Item = &'a PlistResult;
    type IntoIter = std::slice::Iter<'a, PlistResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

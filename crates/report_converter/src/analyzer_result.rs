use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ConvertError;
use crate::plist::PlistResults;

/// Converts the saved output of one analyzer tool into [`PlistResults`].
///
/// `parse` returns `None` when the tool produced nothing to convert (a
/// missing, unreadable, or empty result). That is an expected outcome, not
/// an error.
pub trait AnalyzerResult: Send + Sync {
    /// Short identifier, also stamped on every diagnostic.
    fn tool_name(&self) -> &'static str;

    /// Human readable tool name.
    fn name(&self) -> &'static str;

    /// Where the tool is documented.
    fn url(&self) -> &'static str;

    fn parse(&self, analyzer_result: &Path) -> Option<PlistResults>;
}

pub(crate) fn read_analyzer_output(path: &Path) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Loads raw output for `tool`, folding every "nothing to convert" case
/// into `None`.
pub(crate) fn load_content(tool: &'static str, analyzer_result: &Path) -> Option<String> {
    match read_analyzer_output(analyzer_result) {
        Ok(content) if content.trim().is_empty() => {
            debug!(tool, path = ?analyzer_result, "analyzer result is empty");
            None
        }
        Ok(content) => Some(content),
        Err(error) => {
            warn!(tool, %error, "analyzer result is not readable");
            None
        }
    }
}

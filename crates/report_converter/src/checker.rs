use std::fmt;

use serde::Serialize;

/// Identifier of the rule that produced a diagnostic.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CheckerName(String);

impl CheckerName {
    pub const MAX_BYTES: usize = 256;

    pub fn new(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.len() > Self::MAX_BYTES {
            return None;
        }
        if raw.chars().any(char::is_control) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

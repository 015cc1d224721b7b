use crate::checker::CheckerName;
use crate::error::MessageError;

/// One normalized diagnostic, independent of the tool that reported it.
///
/// All fields are fixed at construction; there are no setters.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Message {
    file_path: String,
    line: u32,
    column: u32,
    message: String,
    checker_name: CheckerName,
}

impl Message {
    /// Builds a message, trimming the text and validating the location.
    ///
    /// `line` and `column` are 1-based and must be non-zero.
    pub fn new(
        file_path: impl Into<String>,
        line: u32,
        column: u32,
        message: &str,
        checker_name: &str,
    ) -> Result<Self, MessageError> {
        let file_path = file_path.into();
        if file_path.is_empty() {
            return Err(MessageError::EmptyPath);
        }
        if line == 0 {
            return Err(MessageError::ZeroLine);
        }
        if column == 0 {
            return Err(MessageError::ZeroColumn);
        }
        let checker_name = CheckerName::new(checker_name).ok_or(MessageError::EmptyChecker)?;
        Ok(Self {
            file_path,
            line,
            column,
            message: message.trim().to_string(),
            checker_name,
        })
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn checker_name(&self) -> &CheckerName {
        &self.checker_name
    }
}

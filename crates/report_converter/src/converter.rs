use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::hash::report_hash;
use crate::message::Message;
use crate::plist::{Diagnostic, Location, Metadata, PathEvent, PathEventKind, PlistResult, PlistResults};

pub const DEFAULT_CATEGORY: &str = "unknown";

/// Each result lists only its own source file, so locations always point here.
const SOURCE_FILE_INDEX: usize = 0;

/// Hook for tools that need to decorate their diagnostics.
///
/// The required diagnostic fields are always built by [`PlistConverter`];
/// a shape can only pick the category and add fields next to them.
pub trait DiagnosticShape: Send + Sync {
    fn category(&self, _message: &Message) -> String {
        DEFAULT_CATEGORY.to_string()
    }

    fn extra_fields(&self, _message: &Message) -> BTreeMap<String, Value> {
        BTreeMap::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultShape;

impl DiagnosticShape for DefaultShape {}

/// Accumulates messages of one tool and renders them as [`PlistResults`].
#[derive(Debug, Clone)]
pub struct PlistConverter<S = DefaultShape> {
    tool_name: String,
    shape: S,
    messages: Vec<Message>,
}

impl PlistConverter<DefaultShape> {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self::with_shape(tool_name, DefaultShape)
    }
}

impl<S: DiagnosticShape> PlistConverter<S> {
    pub fn with_shape(tool_name: impl Into<String>, shape: S) -> Self {
        Self {
            tool_name: tool_name.into(),
            shape,
            messages: Vec::new(),
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends `messages` in order. Duplicates are kept.
    pub fn add_messages<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        self.messages.extend(messages);
    }

    /// Groups the accumulated messages by file, in order of first
    /// appearance. Calling this repeatedly yields the same document.
    pub fn get_plist_results(&self) -> PlistResults {
        let mut results: Vec<PlistResult> = Vec::new();
        let mut by_file: HashMap<&str, usize> = HashMap::new();

        for message in &self.messages {
            let idx = *by_file.entry(message.file_path()).or_insert_with(|| {
                results.push(PlistResult {
                    files: vec![message.file_path().to_string()],
                    diagnostics: Vec::new(),
                    metadata: Metadata::for_tool(&self.tool_name),
                });
                results.len() - 1
            });

            results[idx]
                .diagnostics
                .push(self.create_diag(message, SOURCE_FILE_INDEX));
        }

        PlistResults(results)
    }

    fn create_diag(&self, message: &Message, file_index: usize) -> Diagnostic {
        let location = Location {
            line: message.line(),
            col: message.column(),
            file: file_index,
        };

        let mut extra = self.shape.extra_fields(message);
        extra.retain(|key, _| !Diagnostic::RESERVED_KEYS.contains(&key.as_str()));

        Diagnostic {
            location,
            check_name: message.checker_name().clone(),
            description: message.message().to_string(),
            category: self.shape.category(message),
            analyzer_type: self.tool_name.clone(),
            issue_hash_content_of_line_in_context: report_hash(message),
            path: vec![PathEvent {
                kind: PathEventKind::Event,
                location,
                depth: 0,
                message: message.message().to_string(),
                extended_message: message.message().to_string(),
            }],
            extra,
        }
    }
}

//! PMD support.
//!
//! PMD writes a structured JSON report (`pmd check -f json`), so no line
//! matching is involved. The document shape is checked against an embedded
//! JSON Schema first; a report that fails it yields no result. Individual
//! violations that cannot be read are dropped like unparsable text lines.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::{Draft, JSONSchema};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

use crate::analyzer_result::{load_content, AnalyzerResult};
use crate::config::ConvertConfig;
use crate::converter::{DiagnosticShape, PlistConverter, DEFAULT_CATEGORY};
use crate::message::Message;
use crate::output_parser::OutputParser;
use crate::paths::resolve_reported_path;
use crate::plist::PlistResults;

pub const TOOL_NAME: &str = "pmd";

fn report_schema() -> Option<&'static JSONSchema> {
    static SCHEMA: OnceLock<Option<JSONSchema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            let schema = json!({
                "type": "object",
                "required": ["files"],
                "properties": {
                    "files": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["filename", "violations"],
                            "properties": {
                                "filename": { "type": "string", "minLength": 1 },
                                "violations": {
                                    "type": "array",
                                    "items": { "type": "object" }
                                }
                            }
                        }
                    },
                    "processingErrors": { "type": "array" }
                }
            });
            match JSONSchema::options()
                .with_draft(Draft::Draft202012)
                .compile(&schema)
            {
                Ok(compiled) => Some(compiled),
                Err(error) => {
                    warn!(%error, "PMD report schema does not compile; skipping validation");
                    None
                }
            }
        })
        .as_ref()
}

#[derive(Debug, Deserialize)]
struct ReportDoc {
    files: Vec<FileEntry>,
    #[serde(default, rename = "processingErrors")]
    processing_errors: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    filename: String,
    violations: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Violation {
    beginline: u32,
    #[serde(default = "first_column")]
    begincolumn: u32,
    description: String,
    rule: String,
    #[serde(default)]
    ruleset: Option<String>,
    #[serde(default)]
    priority: Option<u8>,
    #[serde(default, rename = "externalInfoUrl")]
    external_info_url: Option<String>,
}

fn first_column() -> u32 {
    1
}

/// What the report says about a rule, beyond the violations themselves.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RuleInfo {
    pub ruleset: Option<String>,
    pub priority: Option<u8>,
    pub external_info_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PmdReport {
    pub messages: Vec<Message>,
    /// Keyed by rule name; the first violation of a rule wins.
    pub rules: BTreeMap<String, RuleInfo>,
}

#[derive(Debug, Clone)]
pub struct PmdParser {
    analyzer_result: PathBuf,
    normalize_paths: bool,
}

impl PmdParser {
    pub fn new(analyzer_result: impl Into<PathBuf>) -> Self {
        Self::with_config(analyzer_result, &ConvertConfig::default())
    }

    pub fn with_config(analyzer_result: impl Into<PathBuf>, config: &ConvertConfig) -> Self {
        Self {
            analyzer_result: analyzer_result.into(),
            normalize_paths: config.normalize_paths,
        }
    }

    /// Returns `None` when `content` is not a PMD JSON report.
    pub fn parse_report(&self, content: &str) -> Option<PmdReport> {
        let doc: Value = match serde_json::from_str(content) {
            Ok(doc) => doc,
            Err(error) => {
                warn!(tool = TOOL_NAME, %error, "PMD report is not valid JSON");
                return None;
            }
        };

        if let Some(schema) = report_schema() {
            if let Err(mut errors) = schema.validate(&doc) {
                let first = errors.next().map(|e| e.to_string()).unwrap_or_default();
                warn!(tool = TOOL_NAME, error = %first, "PMD report does not match the expected shape");
                return None;
            }
        }

        let doc: ReportDoc = match serde_json::from_value(doc) {
            Ok(doc) => doc,
            Err(error) => {
                warn!(tool = TOOL_NAME, %error, "PMD report does not match the expected shape");
                return None;
            }
        };
        if !doc.processing_errors.is_empty() {
            debug!(
                tool = TOOL_NAME,
                processing_errors = doc.processing_errors.len(),
                "PMD reported processing errors"
            );
        }

        let mut report = PmdReport::default();
        let mut skipped = 0usize;
        for file in doc.files {
            let file_path =
                resolve_reported_path(&self.analyzer_result, &file.filename, self.normalize_paths);
            for raw in file.violations {
                match self.to_message(&file_path, raw) {
                    Some((message, info)) => {
                        report
                            .rules
                            .entry(message.checker_name().as_str().to_string())
                            .or_insert(info);
                        report.messages.push(message);
                    }
                    None => skipped += 1,
                }
            }
        }

        debug!(
            tool = TOOL_NAME,
            messages = report.messages.len(),
            skipped,
            "parsed analyzer output"
        );
        Some(report)
    }

    fn to_message(&self, file_path: &str, raw: Value) -> Option<(Message, RuleInfo)> {
        let violation: Violation = match serde_json::from_value(raw) {
            Ok(v) => v,
            Err(error) => {
                trace!(tool = TOOL_NAME, file = file_path, %error, "skipping unreadable violation");
                return None;
            }
        };
        let message = match Message::new(
            file_path,
            violation.beginline,
            violation.begincolumn,
            &violation.description,
            &violation.rule,
        ) {
            Ok(message) => message,
            Err(error) => {
                trace!(tool = TOOL_NAME, file = file_path, %error, "skipping invalid violation");
                return None;
            }
        };
        let info = RuleInfo {
            ruleset: violation.ruleset,
            priority: violation.priority,
            external_info_url: violation.external_info_url,
        };
        Some((message, info))
    }
}

impl OutputParser for PmdParser {
    fn parse_messages(&self, content: &str) -> Vec<Message> {
        self.parse_report(content)
            .map(|report| report.messages)
            .unwrap_or_default()
    }
}

/// Uses PMD's ruleset as the diagnostic category and carries the rule's
/// priority and documentation link along.
#[derive(Debug, Clone, Default)]
pub struct PmdShape {
    rules: BTreeMap<String, RuleInfo>,
}

impl PmdShape {
    pub fn new(rules: BTreeMap<String, RuleInfo>) -> Self {
        Self { rules }
    }

    fn rule(&self, message: &Message) -> Option<&RuleInfo> {
        self.rules.get(message.checker_name().as_str())
    }
}

impl DiagnosticShape for PmdShape {
    fn category(&self, message: &Message) -> String {
        self.rule(message)
            .and_then(|info| info.ruleset.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }

    fn extra_fields(&self, message: &Message) -> BTreeMap<String, Value> {
        let mut extra = BTreeMap::new();
        if let Some(info) = self.rule(message) {
            if let Some(priority) = info.priority {
                extra.insert("priority".to_string(), json!(priority));
            }
            if let Some(url) = &info.external_info_url {
                extra.insert("external_info_url".to_string(), json!(url));
            }
        }
        extra
    }
}

#[derive(Debug, Clone, Default)]
pub struct PmdAnalyzerResult {
    config: ConvertConfig,
}

impl PmdAnalyzerResult {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }
}

impl AnalyzerResult for PmdAnalyzerResult {
    fn tool_name(&self) -> &'static str {
        TOOL_NAME
    }

    fn name(&self) -> &'static str {
        "PMD"
    }

    fn url(&self) -> &'static str {
        "https://pmd.github.io"
    }

    fn parse(&self, analyzer_result: &Path) -> Option<PlistResults> {
        let content = load_content(TOOL_NAME, analyzer_result)?;
        let report = PmdParser::with_config(analyzer_result, &self.config).parse_report(&content)?;
        if report.messages.is_empty() {
            debug!(tool = TOOL_NAME, path = ?analyzer_result, "PMD report has no violations");
            return None;
        }

        let mut converter = PlistConverter::with_shape(TOOL_NAME, PmdShape::new(report.rules));
        converter.add_messages(report.messages);
        Some(converter.get_plist_results())
    }
}

//! kernel-doc support.
//!
//! The kernel's documentation-comment checker reports problems as
//! `path:line: warning: text`. It has no column and no rule identifiers,
//! so every message gets column 1 and the checker name `kernel-doc`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::analyzer_result::{load_content, AnalyzerResult};
use crate::config::{ConvertConfig, ParseLimits};
use crate::converter::PlistConverter;
use crate::error::LineSkip;
use crate::message::Message;
use crate::output_parser::{parse_lines, parse_position, LineParser, OutputParser};
use crate::paths::resolve_reported_path;
use crate::plist::PlistResults;

pub const TOOL_NAME: &str = "kernel-doc";
pub const DEFAULT_CHECKER: &str = "kernel-doc";

fn message_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<path>[\S ]+?):",
            r"(?P<line>\d+):",
            r"\s+(?:(?i:warning):\s*)?",
            r"(?P<message>\S.*)$",
        ))
        .expect("kernel-doc record pattern compiles")
    })
}

#[derive(Debug, Clone)]
pub struct KernelDocParser {
    analyzer_result: PathBuf,
    limits: ParseLimits,
    normalize_paths: bool,
}

impl KernelDocParser {
    pub fn new(analyzer_result: impl Into<PathBuf>) -> Self {
        Self::with_config(analyzer_result, &ConvertConfig::default())
    }

    pub fn with_config(analyzer_result: impl Into<PathBuf>, config: &ConvertConfig) -> Self {
        Self {
            analyzer_result: analyzer_result.into(),
            limits: config.limits,
            normalize_paths: config.normalize_paths,
        }
    }
}

impl LineParser for KernelDocParser {
    fn tool_name(&self) -> &'static str {
        TOOL_NAME
    }

    fn parse_line(&self, line: &str) -> Result<Message, LineSkip> {
        let caps = message_line_re().captures(line).ok_or(LineSkip::NoMatch)?;
        let line_no = parse_position("line", &caps["line"])?;
        let file_path =
            resolve_reported_path(&self.analyzer_result, &caps["path"], self.normalize_paths);

        Ok(Message::new(
            file_path,
            line_no,
            1,
            &caps["message"],
            DEFAULT_CHECKER,
        )?)
    }
}

impl OutputParser for KernelDocParser {
    fn parse_messages(&self, content: &str) -> Vec<Message> {
        parse_lines(self, content, &self.limits)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KernelDocAnalyzerResult {
    config: ConvertConfig,
}

impl KernelDocAnalyzerResult {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }
}

impl AnalyzerResult for KernelDocAnalyzerResult {
    fn tool_name(&self) -> &'static str {
        TOOL_NAME
    }

    fn name(&self) -> &'static str {
        "Kernel-Doc"
    }

    fn url(&self) -> &'static str {
        "https://github.com/torvalds/linux/blob/master/scripts/kernel-doc"
    }

    fn parse(&self, analyzer_result: &Path) -> Option<PlistResults> {
        let content = load_content(TOOL_NAME, analyzer_result)?;
        let parser = KernelDocParser::with_config(analyzer_result, &self.config);
        let messages = parser.parse_messages(&content);

        let mut converter = PlistConverter::new(TOOL_NAME);
        converter.add_messages(messages);
        Some(converter.get_plist_results())
    }
}

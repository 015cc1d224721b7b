//! Pylama support.
//!
//! Pylama's parsable format puts one diagnostic per line:
//!
//! ```text
//! src/mod.py:10:4: [E] unused import 'os' [E]
//! ```
//!
//! The bracketed severity letter has no documented meaning across the
//! linters pylama aggregates, so it is kept verbatim as a `[S]` prefix of
//! the message instead of being mapped to a severity level.

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

pub const TOOL_NAME: &str = "pylama";

fn message_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            // File path followed by a ':'.
            r"^(?P<path>[\S ]+?):",
            r"(?P<line>\d+):",
            r"(?P<column>\d+):",
            // Severity: one uppercase letter in brackets.
            r"\s\[(?P<severity>[A-Z])\]\s*",
            r"(?P<message>[\S \t]+?)\s*",
            // Checker: one character in brackets, then only whitespace.
            r"\[(?P<checker>[^\]])\]\s*$",
        ))
        .expect("pylama record pattern compiles")
    })
}

/// Parses pylama output saved at `analyzer_result`.
#[derive(Debug, Clone)]
pub struct PylamaParser {
    analyzer_result: PathBuf,
    limits: ParseLimits,
    normalize_paths: bool,
}

impl PylamaParser {
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

impl LineParser for PylamaParser {
    fn tool_name(&self) -> &'static str {
        TOOL_NAME
    }

    fn parse_line(&self, line: &str) -> Result<Message, LineSkip> {
        let caps = message_line_re().captures(line).ok_or(LineSkip::NoMatch)?;

        let line_no = parse_position("line", &caps["line"])?;
        let column = parse_position("column", &caps["column"])?;
        let file_path =
            resolve_reported_path(&self.analyzer_result, &caps["path"], self.normalize_paths);
        let text = format!("[{}] {}", &caps["severity"], caps["message"].trim());

        Ok(Message::new(
            file_path,
            line_no,
            column,
            &text,
            &caps["checker"],
        )?)
    }
}

impl OutputParser for PylamaParser {
    fn parse_messages(&self, content: &str) -> Vec<Message> {
        parse_lines(self, content, &self.limits)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PylamaAnalyzerResult {
    config: ConvertConfig,
}

impl PylamaAnalyzerResult {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }
}

impl AnalyzerResult for PylamaAnalyzerResult {
    fn tool_name(&self) -> &'static str {
        TOOL_NAME
    }

    fn name(&self) -> &'static str {
        "Pylama"
    }

    fn url(&self) -> &'static str {
        "https://github.com/klen/pylama"
    }

    fn parse(&self, analyzer_result: &Path) -> Option<PlistResults> {
        let content = load_content(TOOL_NAME, analyzer_result)?;
        let parser = PylamaParser::with_config(analyzer_result, &self.config);
        let messages = parser.parse_messages(&content);

        let mut converter = PlistConverter::new(TOOL_NAME);
        converter.add_messages(messages);
        Some(converter.get_plist_results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> PylamaParser {
        PylamaParser::new("/reports/pylama.out")
    }

    #[test]
    fn parses_a_full_record() {
        let msg = parser()
            .parse_line("src/mod.py:10:4: [E] unused import 'os' [E]")
            .unwrap();
        assert_eq!(Path::new(msg.file_path()), Path::new("/reports/src/mod.py"));
        assert_eq!(msg.line(), 10);
        assert_eq!(msg.column(), 4);
        assert_eq!(msg.message(), "[E] unused import 'os'");
        assert_eq!(msg.checker_name().as_str(), "E");
    }

    #[test]
    fn trailing_whitespace_after_checker_is_allowed() {
        let msg = parser()
            .parse_line("a.py:1:2: [W] line too long (90 > 79 characters) [p] \t")
            .unwrap();
        assert_eq!(msg.message(), "[W] line too long (90 > 79 characters)");
        assert_eq!(msg.checker_name().as_str(), "p");
    }

    #[test]
    fn missing_checker_bracket_is_no_match() {
        let err = parser()
            .parse_line("src/mod.py:10:4: [E] unused import 'os'")
            .unwrap_err();
        assert_eq!(err, LineSkip::NoMatch);
    }

    #[test]
    fn lowercase_severity_and_missing_column_do_not_match() {
        assert!(parser().parse_line("a.py:1:2: [e] msg [E]").is_err());
        assert!(parser().parse_line("a.py:1: [E] msg [E]").is_err());
    }

    #[test]
    fn zero_or_overflowing_positions_are_skipped() {
        assert!(matches!(
            parser().parse_line("a.py:0:2: [E] msg [E]"),
            Err(LineSkip::InvalidNumber { field: "line", .. })
        ));
        assert!(matches!(
            parser().parse_line("a.py:1:99999999999: [E] msg [E]"),
            Err(LineSkip::InvalidNumber { field: "column", .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_paths_are_kept() {
        let msg = parser()
            .parse_line("/srv/app/x.py:3:1: [C] missing docstring [D]")
            .unwrap();
        assert_eq!(msg.file_path(), "/srv/app/x.py");
    }

    #[test]
    fn paths_with_spaces_are_supported() {
        let msg = parser()
            .parse_line("my dir/x.py:3:1: [C] missing docstring [D]")
            .unwrap();
        assert_eq!(Path::new(msg.file_path()), Path::new("/reports/my dir/x.py"));
    }

    #[test]
    fn garbage_lines_are_filtered_out_in_order() {
        let content = "\
src/a.py:1:1: [E] first [E]
*** pylama crashed? ***
src/b.py:2:5: [W] second [W]
src/c.py:x:5: [W] bad line number [W]
src/d.py:3:1: [E] no checker
src/e.py:4:2: [C] third [C]";
        let messages = parser().parse_messages(content);
        let texts: Vec<_> = messages.iter().map(|m| m.message()).collect();
        assert_eq!(texts, vec!["[E] first", "[W] second", "[C] third"]);
    }
}

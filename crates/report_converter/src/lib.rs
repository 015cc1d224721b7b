#![forbid(unsafe_code)]
//! Normalizes the output of static-analysis tools into one bug-report shape.
//!
//! Each supported tool has an output parser that turns its raw text (or
//! structured report) into [`Message`] values, and an [`AnalyzerResult`]
//! converter that feeds those messages through a [`PlistConverter`]. The
//! result is a [`PlistResults`] document that report storage consumes the
//! same way no matter which tool produced it.
//!
//! Parsing is tolerant: records that do not match a tool's format are
//! dropped, and a missing or empty result converts to `None` rather than an
//! error.

mod analyzer_result;
mod checker;
mod config;
mod converter;
mod error;
mod hash;
mod message;
mod output_parser;
mod paths;
mod plist;
mod registry;

#[cfg(feature = "kernel_doc")]
pub mod kernel_doc;

#[cfg(feature = "pmd")]
pub mod pmd;

#[cfg(feature = "pylama")]
pub mod pylama;

pub use analyzer_result::AnalyzerResult;
pub use checker::CheckerName;
pub use config::{ConvertConfig, ParseLimits};
pub use converter::{DefaultShape, DiagnosticShape, PlistConverter, DEFAULT_CATEGORY};
pub use error::{ConvertError, LineSkip, MessageError};
pub use hash::report_hash;
pub use message::Message;
pub use output_parser::{parse_lines, LineParser, OutputParser};
pub use paths::{normalize_lexically, resolve_reported_path};
pub use plist::{
    AnalyzerInfo, Diagnostic, GeneratorInfo, Location, Metadata, PathEvent, PathEventKind,
    PlistResult, PlistResults, GENERATOR_NAME,
};
pub use registry::AnalyzerRegistry;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::analyzer_result::AnalyzerResult;
use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::plist::PlistResults;

/// Maps tool names to their [`AnalyzerResult`] converters.
#[derive(Default)]
pub struct AnalyzerRegistry {
    converters: BTreeMap<&'static str, Box<dyn AnalyzerResult>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every converter compiled into this crate.
    #[cfg_attr(
        not(any(feature = "kernel_doc", feature = "pylama", feature = "pmd")),
        allow(unused_variables, unused_mut)
    )]
    pub fn builtin(config: ConvertConfig) -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "kernel_doc")]
        registry.register(crate::kernel_doc::KernelDocAnalyzerResult::new(config));
        #[cfg(feature = "pylama")]
        registry.register(crate::pylama::PylamaAnalyzerResult::new(config));
        #[cfg(feature = "pmd")]
        registry.register(crate::pmd::PmdAnalyzerResult::new(config));

        registry
    }

    /// Adds `converter`, replacing any converter with the same tool name.
    pub fn register<A>(&mut self, converter: A)
    where
        A: AnalyzerResult + 'static,
    {
        self.converters
            .insert(converter.tool_name(), Box::new(converter));
    }

    pub fn get(&self, tool_name: &str) -> Option<&dyn AnalyzerResult> {
        self.converters.get(tool_name).map(|c| c.as_ref())
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.converters.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn AnalyzerResult> + '_ {
        self.converters.values().map(|c| c.as_ref())
    }

    /// Converts `analyzer_result` with the converter registered for
    /// `tool_name`. `Ok(None)` means the tool produced nothing to convert.
    pub fn convert(
        &self,
        tool_name: &str,
        analyzer_result: &Path,
    ) -> Result<Option<PlistResults>, ConvertError> {
        let converter = self
            .get(tool_name)
            .ok_or_else(|| ConvertError::UnknownTool(tool_name.to_string()))?;
        debug!(tool = tool_name, path = ?analyzer_result, "converting analyzer result");
        Ok(converter.parse(analyzer_result))
    }
}

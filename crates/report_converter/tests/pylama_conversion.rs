#![cfg(feature = "pylama")]

use std::path::{Path, PathBuf};

use report_converter::pylama::{PylamaAnalyzerResult, PylamaParser};
use report_converter::{AnalyzerResult, ConvertConfig, OutputParser, PlistConverter};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pylama/pylama.out")
}

fn fixture_dir() -> PathBuf {
    fixture().parent().unwrap().to_path_buf()
}

#[test]
fn converts_matching_lines_and_drops_the_rest() {
    let results = PylamaAnalyzerResult::default().parse(&fixture()).unwrap();

    assert_eq!(results.diagnostic_count(), 4);
    let files: Vec<PathBuf> = results
        .iter()
        .filter_map(|r| r.source_file())
        .map(PathBuf::from)
        .collect();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0], fixture_dir().join("src/mod.py"));
    assert_eq!(files[1], fixture_dir().join("lib/util.py"));

    let module = &results.0[0];
    assert_eq!(module.metadata.analyzer.name, "pylama");
    assert_eq!(module.diagnostics.len(), 2);

    let first = &module.diagnostics[0];
    assert_eq!(first.location.line, 10);
    assert_eq!(first.location.col, 4);
    assert_eq!(first.description, "[E] unused import 'os'");
    assert_eq!(first.check_name.as_str(), "E");
    assert_eq!(first.analyzer_type, "pylama");

    let second = &module.diagnostics[1];
    assert_eq!((second.location.line, second.location.col), (22, 80));
    assert_eq!(second.check_name.as_str(), "p");
}

#[cfg(unix)]
#[test]
fn absolute_paths_survive_conversion() {
    let results = PylamaAnalyzerResult::default().parse(&fixture()).unwrap();
    assert!(results.for_file("/abs/site.py").is_some());
}

#[test]
fn parser_and_converter_round_trip_every_field() {
    let content = std::fs::read_to_string(fixture()).unwrap();
    let messages = PylamaParser::new(fixture()).parse_messages(&content);

    let mut converter = PlistConverter::new("pylama");
    converter.add_messages(messages.clone());
    let results = converter.get_plist_results();

    let diagnostics: Vec<_> = results
        .iter()
        .flat_map(|r| r.diagnostics.iter().map(move |d| (r, d)))
        .collect();
    assert_eq!(diagnostics.len(), messages.len());
    for message in &messages {
        let result = results.for_file(message.file_path()).unwrap();
        assert!(result.diagnostics.iter().any(|d| {
            d.location.line == message.line()
                && d.location.col == message.column()
                && d.description == message.message()
                && &d.check_name == message.checker_name()
                && result.files[d.location.file] == message.file_path()
        }));
    }
}

#[test]
fn empty_and_missing_results_are_absent() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("pylama.out");
    std::fs::write(&empty, "").unwrap();

    let converter = PylamaAnalyzerResult::default();
    assert!(converter.parse(&empty).is_none());
    assert!(converter.parse(&dir.path().join("missing.out")).is_none());
}

#[test]
fn unmatched_content_is_an_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pylama.out");
    std::fs::write(&path, "src/mod.py:10:4: [E] unused import 'os'\n").unwrap();

    let results = PylamaAnalyzerResult::default().parse(&path).unwrap();
    assert!(results.is_empty());
}

#[test]
fn results_serialize_to_the_plist_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("pylama.out");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "../src/a.py:1:2: [W] msg [W]\r\n").unwrap();

    let results = PylamaAnalyzerResult::new(ConvertConfig::default())
        .parse(&path)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&results.to_json_pretty().unwrap()).unwrap();

    let entry = &value[0];
    assert_eq!(
        Path::new(entry["files"][0].as_str().unwrap()),
        dir.path().join("out/../src/a.py")
    );
    let diag = &entry["diagnostics"][0];
    assert_eq!(diag["location"], serde_json::json!({"line": 1, "col": 2, "file": 0}));
    assert_eq!(diag["check_name"], "W");
    assert_eq!(diag["description"], "[W] msg");
    assert_eq!(diag["category"], "unknown");
    assert_eq!(diag["type"], "pylama");
    assert_eq!(diag["issue_hash_content_of_line_in_context"].as_str().unwrap().len(), 32);
    assert_eq!(entry["metadata"]["generated_by"]["name"], "report-converter");
}

#[cfg(unix)]
#[test]
fn relative_paths_are_joined_verbatim_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    let path = out.join("pylama.out");
    std::fs::write(
        &path,
        "./src/mod.py:1:1: [E] one [E]\n../lib/a.py:2:1: [W] two [W]\n",
    )
    .unwrap();

    let results = PylamaAnalyzerResult::default().parse(&path).unwrap();
    let files: Vec<&str> = results.iter().filter_map(|r| r.source_file()).collect();
    let out = out.to_str().unwrap();
    assert_eq!(
        files,
        vec![format!("{out}/./src/mod.py"), format!("{out}/../lib/a.py")]
    );

    let config = ConvertConfig::from_toml_str("normalize_paths = true").unwrap();
    let results = PylamaAnalyzerResult::new(config).parse(&path).unwrap();
    let files: Vec<&str> = results.iter().filter_map(|r| r.source_file()).collect();
    let root = dir.path().to_str().unwrap();
    assert_eq!(
        files,
        vec![format!("{root}/out/src/mod.py"), format!("{root}/lib/a.py")]
    );
}

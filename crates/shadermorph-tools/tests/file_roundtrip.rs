//! Running the pipeline on files on disk.

use std::fs;

use shadermorph_tools::{ToolError, make_in_bounds_file};

const SHADER: &str = "#version 300 es
precision mediump float;
uniform int index;
out vec4 color;
vec4 palette[4];

void main()
{
  color = palette[index] * palette[2];
}
";

#[test]
fn test_rewrites_file_and_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shader.frag");
    let output = dir.path().join("out.frag");
    let report = dir.path().join("report.json");
    fs::write(&input, SHADER).unwrap();

    let rewritten = make_in_bounds_file(&input, Some(&output), Some(&report)).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, rewritten.output);
    assert!(written.starts_with("#version 300 es\n"));
    assert!(written.contains("color = palette[(index) >= 0 && (index) < 4 ? index : 0] * palette[2];"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["guarded"], 1);
    assert_eq!(json["already_safe"], 1);
    assert_eq!(json["sites"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_output_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shader.frag");
    fs::write(&input, SHADER).unwrap();

    let rewritten = make_in_bounds_file(&input, None, None).unwrap();
    assert!(rewritten.output.contains("palette[(index) >= 0"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_missing_input_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.frag");
    let error = make_in_bounds_file(&missing, None, None).unwrap_err();
    assert!(matches!(error, ToolError::Read { .. }));
    assert!(error.to_string().starts_with("failed to read "));
}

#[test]
fn test_rewrite_output_parses_again() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shader.frag");
    let output = dir.path().join("out.frag");
    fs::write(&input, SHADER).unwrap();
    make_in_bounds_file(&input, Some(&output), None).unwrap();

    // Second run over the output: the guards index nothing themselves
    let again = make_in_bounds_file(&output, None, None).unwrap();
    assert_eq!(again.report.already_safe, 1);
    assert_eq!(again.report.guarded, 1);
}

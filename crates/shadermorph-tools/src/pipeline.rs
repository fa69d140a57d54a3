//! Read → parse → type → rewrite → print.

use std::fs;
use std::path::{Path, PathBuf};

use shadermorph_ast::{SourceMap, Span, print_translation_unit};
use shadermorph_transform::{RewriteReport, make_in_bounds};
use shadermorph_typer::Typer;
use thiserror::Error;
use tracing::{debug, info};

/// Failure of one tool run. Diagnostics are already rendered as
/// `path:line:col: message`, one per line.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse failed:\n{0}")]
    Parse(String),

    #[error("type check failed:\n{0}")]
    Type(String),

    #[error("rewrite failed:\n{0}")]
    Transform(String),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

/// A rewritten program and what the pass did to it.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub output: String,
    pub report: RewriteReport,
}

/// Bound all indices in `source`, read from `path`.
///
/// `path` is only used to locate diagnostics.
pub fn make_in_bounds_source(path: &Path, source: String) -> Result<Rewritten, ToolError> {
    let mut sources = SourceMap::new();
    let file_id = sources.add_file(path.to_path_buf(), source);
    let text = &sources.file(&Span::zero(file_id)).source;

    let mut tu = shadermorph_parser::parse_source(text, file_id).map_err(|errors| {
        ToolError::Parse(render(
            &sources,
            errors.iter().map(|e| (e.span, e.message.clone())),
        ))
    })?;
    debug!(decls = tu.decls.len(), exprs = tu.expr_ids.allocated(), "parsed");

    let typer = Typer::new(&tu).map_err(|errors| {
        ToolError::Type(render(
            &sources,
            errors.iter().map(|e| (e.span(), e.to_string())),
        ))
    })?;

    let report = make_in_bounds(&mut tu, &typer).map_err(|error| {
        ToolError::Transform(render(&sources, [(error.span(), error.to_string())]))
    })?;

    Ok(Rewritten {
        output: print_translation_unit(&tu),
        report,
    })
}

/// Rewrite the shader at `input`.
///
/// The program goes to `output`, or is returned when no output path is
/// given. The JSON report goes to `report` if requested.
pub fn make_in_bounds_file(
    input: &Path,
    output: Option<&Path>,
    report: Option<&Path>,
) -> Result<Rewritten, ToolError> {
    let source = fs::read_to_string(input).map_err(|source| ToolError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let rewritten = make_in_bounds_source(input, source)?;

    if let Some(path) = output {
        write(path, &rewritten.output)?;
        info!(path = %path.display(), "wrote shader");
    }
    if let Some(path) = report {
        let json = serde_json::to_string_pretty(&rewritten.report)?;
        write(path, &json)?;
        info!(path = %path.display(), "wrote report");
    }
    Ok(rewritten)
}

fn write(path: &Path, contents: &str) -> Result<(), ToolError> {
    fs::write(path, contents).map_err(|source| ToolError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// One `path:line:col: message` line per diagnostic.
fn render(sources: &SourceMap, diagnostics: impl IntoIterator<Item = (Span, String)>) -> String {
    diagnostics
        .into_iter()
        .map(|(span, message)| {
            let (line, col) = sources.line_col(&span);
            format!("{}:{}:{}: {}", sources.file_path(&span).display(), line, col, message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

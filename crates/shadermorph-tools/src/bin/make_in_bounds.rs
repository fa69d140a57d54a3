//! Bound every array, matrix and vector index in a GLSL shader.
//!
//! Usage: `make-in-bounds <input> [-o FILE] [--report FILE]`

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "make-in-bounds")]
#[command(about = "Rewrite a GLSL shader so that no index can leave its array, matrix or vector")]
struct Args {
    /// Shader source to rewrite
    input: PathBuf,

    /// Where to write the rewritten shader (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report of every indexing site
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() {
    shadermorph_tools::init_logging();

    let args = Args::parse();

    let rewritten = match shadermorph_tools::make_in_bounds_file(
        &args.input,
        args.output.as_deref(),
        args.report.as_deref(),
    ) {
        Ok(rewritten) => rewritten,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    info!(
        "{}: {} guarded, {} already safe, {} skipped",
        args.input.display(),
        rewritten.report.guarded,
        rewritten.report.already_safe,
        rewritten.report.skipped
    );

    if args.output.is_none() {
        if let Err(e) = io::stdout().write_all(rewritten.output.as_bytes()) {
            error!("Failed to write to stdout: {}", e);
            process::exit(1);
        }
    }
}

//! mini-C compiler binary.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use minicc::driver;

/// Compile a mini-C source file to textual IR.
#[derive(Parser)]
#[command(name = "minicc", version)]
struct Args {
    /// Source file to compile.
    input: PathBuf,
}

fn main() -> ExitCode {
    // Usage problems exit 1 like every other failure.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            eprint!("{error}");
            return ExitCode::from(1);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let compilation = driver::compile_file(&args.input)
        .with_context(|| format!("failed to compile `{}`", args.input.display()))?;

    for warning in &compilation.warnings {
        eprintln!("{warning}");
    }
    print!("{}", compilation.ast_text);

    driver::write_output(&compilation, Path::new(driver::OUTPUT_FILENAME))
        .with_context(|| format!("failed to write `{}`", driver::OUTPUT_FILENAME))?;
    Ok(())
}

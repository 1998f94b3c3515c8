//! pietc — command-line driver for the Piet compiler.
//!
//! Parses an input program (image or hex-text grid), builds the program
//! state graph, lowers it to LLVM IR, and writes the result to a `.ll`
//! file (`output.ll` by default).

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use pietc_core::StateGraph;

#[derive(Parser)]
#[command(name = "pietc", version, about = "Piet to LLVM IR compiler")]
struct Cli {
    /// Input program: a .bmp/.png/.gif image, or whitespace-separated hex
    /// color tokens (one grid row per line) for any other extension
    input: PathBuf,

    /// Path for the emitted LLVM IR
    #[arg(short, long, default_value = "output.ll")]
    output: PathBuf,

    /// Also print the state graph as JSON to stdout
    #[arg(long)]
    dump_graph: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let parsed = pietc_parse::parse_path(&cli.input)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    if let Some(size) = parsed.codel_size {
        println!("Determined codel size: {size}");
    }

    let graph = StateGraph::build(&parsed.grid);
    if cli.dump_graph {
        println!("{}", serde_json::to_string_pretty(graph.nodes())?);
    }

    let emitted = pietc_codegen::emit(&graph).context("lowering to LLVM IR")?;
    if let Some(err) = &emitted.verify_error {
        eprintln!("error: IR verification failed (this is a compiler bug): {err}");
    }

    fs::write(&cli.output, &emitted.ir)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!(
        "Compilation successful. LLVM IR written to {}",
        cli.output.display()
    );
    Ok(())
}

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

use ws_runtime::{VMConfig, VM};
use ws_spec::Program;

#[derive(Parser, Debug)]
#[command(name = "wspace")]
#[command(version, about = "Run whitespace programs")]
struct Args {
    /// Program source, or a program image written by --emit-image
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the decoded instruction listing instead of running
    #[arg(short, long)]
    listing: bool,

    /// Write the decoded program as a binary image and exit
    #[arg(long, value_name = "PATH")]
    emit_image: Option<PathBuf>,

    /// Stop after this many executed instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Emit a trace event per instruction (shown with RUST_LOG=trace)
    #[arg(long)]
    trace: bool,
}

/// Interpret file contents as a program image or as whitespace source.
///
/// Source may legitimately begin with the image magic (it is just a comment),
/// so a malformed image falls back to decoding.
fn parse_program(bytes: &[u8]) -> Result<Program> {
    if Program::is_image(bytes) {
        match Program::from_bytes(bytes) {
            Ok(program) => {
                debug!("loaded program image");
                return Ok(program);
            }
            Err(err) => debug!(%err, "not a program image, decoding as source"),
        }
    }

    Ok(ws_decoder::decode_bytes(bytes)?)
}

fn load(path: &Path) -> Result<Program> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    parse_program(&bytes).with_context(|| format!("cannot decode {}", path.display()))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let Some(path) = args.file.as_deref() else {
        println!("usage: wspace <FILE>");
        return Ok(());
    };

    let program = load(path)?;
    info!(instructions = program.len(), "program loaded");

    if let Some(image) = &args.emit_image {
        let bytes = program.to_bytes()?;
        fs::write(image, bytes).with_context(|| format!("cannot write {}", image.display()))?;
        return Ok(());
    }

    if args.listing {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "{}", program)?;
        out.flush()?;
        return Ok(());
    }

    let config = VMConfig {
        max_steps: args.max_steps,
        trace: args.trace,
    };
    let mut vm = VM::new(program, config)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = BufWriter::new(io::stdout().lock());

    let result = vm.run(&mut input, &mut output)?;
    debug!(steps = result.steps, depth = result.stack.len(), "finished");

    Ok(())
}

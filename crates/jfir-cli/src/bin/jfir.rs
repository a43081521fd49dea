use anyhow::Result;
use clap::Parser;
use jfir_cli::{CliArgs, run, tracing_config};
use std::io::Write;

fn main() -> Result<()> {
    tracing_config::init_tracing();
    let args = CliArgs::parse();
    let output = run(&args)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}

//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_xpi_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use xpimport_core::extract_xpi;
use xpimport_core::open_xpi;
use xpimport_core::types::DestDir;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create '{}'", output_dir.display()))?;
    let dest = add_xpi_context(DestDir::new(output_dir), &args.xpi)?;

    let file = File::open(&args.xpi)
        .with_context(|| format!("failed to open package '{}'", args.xpi.display()))?;
    let mut archive = add_xpi_context(open_xpi(BufReader::new(file)), &args.xpi)?;
    let written = add_xpi_context(extract_xpi(&mut archive, &dest), &args.xpi)?;

    formatter.format_extraction(dest.as_path(), &written)?;

    Ok(())
}

//! BOM command - group a KiCad netlist into a BOM file.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::bom::{group_components, resolve_output, write_bom, Resolution};
use crate::fs::{FileSystem, OsFileSystem};
use crate::netlist::{load_netlist, Component};

/// Where the BOM ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(std::path::PathBuf),
    /// Target could not be opened, rows went to stdout
    Stdout,
}

/// Outcome of a BOM run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomSummary {
    pub destination: Destination,
    /// Number of grouped lines written, excluding the header
    pub lines: usize,
    pub components: usize,
}

/// Execute the BOM command.
pub fn execute(netlist_path: &Path, output: &Path) -> Result<()> {
    let netlist = load_netlist(netlist_path)
        .with_context(|| format!("Cannot load netlist {}", netlist_path.display()))?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = generate(
        &OsFileSystem,
        &netlist.components,
        output,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    if let Destination::File(path) = &summary.destination {
        println!(
            "{} Wrote {} lines ({} components) to {}",
            "✓".green().bold(),
            summary.lines,
            summary.components,
            path.display().to_string().cyan()
        );
    }

    Ok(())
}

/// Group `components` and write the BOM for the `requested` output path.
///
/// Status messages go to `out`. If the resolved file cannot be created the
/// rows are written to `out` as well and a diagnostic naming `requested`
/// goes to `err`; the run still succeeds.
pub fn generate<F: FileSystem + ?Sized>(
    fs: &F,
    components: &[Component],
    requested: &Path,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<BomSummary> {
    let target = resolve_output(fs, requested);

    match &target.resolution {
        Resolution::Config { name } => {
            writeln!(out, "Found yml file: {}", name.cyan())?;
        }
        Resolution::ExistingBom { name } => {
            writeln!(out, "Found existing bom file: {}", name.cyan())?;
        }
        Resolution::Requested => {
            writeln!(out)?;
            writeln!(
                out,
                "{} Did not find yml config file, please create a PCB-NNN.yml config file so we know the part number for this PCB.",
                "WARNING:".yellow().bold()
            )?;
            writeln!(out)?;
        }
    }
    writeln!(out, "Outputting bomfile: {}", target.path.display())?;

    let groups = group_components(components);

    let (lines, destination) = match fs.create(&target.path) {
        Ok(file) => {
            let lines = write_bom(file, &groups)
                .with_context(|| format!("Failed to write {}", target.path.display()))?;
            (lines, Destination::File(target.path.clone()))
        }
        Err(e) => {
            log::debug!("Cannot create {}: {:?}", target.path.display(), e);
            writeln!(
                err,
                "{}: Can't open output file for writing: {}: {}",
                env!("CARGO_PKG_NAME"),
                requested.display(),
                e
            )?;
            let lines = write_bom(&mut *out, &groups).context("Failed to write BOM to stdout")?;
            (lines, Destination::Stdout)
        }
    };

    Ok(BomSummary {
        destination,
        lines,
        components: components.len(),
    })
}

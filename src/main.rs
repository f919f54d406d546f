//! kicad-bom - grouped BOM export for KiCad.
//!
//! Meant to be registered as a BOM generator plugin in Eeschema:
//!
//! ```text
//! kicad-bom "%I" "%O.csv"
//! ```
//!
//! Components with the same value and footprint become one line. When the
//! output directory holds a `PCB-NNN.yml` marker the BOM is written as
//! `PCB-NNN.csv` next to it.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use env_logger::Env;

mod bom;
mod commands;
mod fs;
mod netlist;

#[derive(Parser)]
#[command(name = "kicad-bom")]
#[command(author, version, about = "Grouped, sorted BOM export for KiCad generic netlists")]
struct Cli {
    /// KiCad generic netlist (XML) exported by Eeschema
    netlist: PathBuf,

    /// Requested BOM path; may be replaced by a PCB-NNN.csv sibling
    output: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    debug: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    commands::bom::execute(&cli.netlist, &cli.output)
}

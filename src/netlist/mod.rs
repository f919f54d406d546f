//! KiCad generic netlist loading.
//!
//! KiCad hands BOM plugins its intermediate XML netlist (`%I`). Only the
//! design header and the component/libpart sections are read; nets are
//! skipped.

mod parser;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use parser::parse_netlist;

/// Errors raised while loading a netlist. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    #[error("Failed to read netlist {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed netlist XML: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("Component #{index} has no reference designator")]
    MissingReference { index: usize },
}

/// A loaded netlist.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    pub design: Design,
    pub components: Vec<Component>,
}

/// Header of the export, describing where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Design {
    /// Schematic the netlist was exported from
    pub source: String,
    pub date: String,
    /// Exporting tool and version (e.g., "Eeschema 8.0.4")
    pub tool: String,
}

/// A placed component instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    /// Reference designator (e.g., "R1")
    pub reference: String,
    /// Component value (e.g., "10k")
    pub value: String,
    /// Footprint (e.g., "Resistor_SMD:R_0805_2012Metric")
    pub footprint: String,
    /// Symbol name in its library (e.g., "R")
    pub part_name: String,
    pub description: String,
    /// Datasheet URI, empty if none
    pub datasheet: String,
    /// User fields, e.g. "Vendor" or "IPN"
    pub fields: BTreeMap<String, String>,
}

impl Component {
    /// Look up a user field by name, empty if the component does not carry it.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Load a netlist from disk.
pub fn load_netlist(path: &Path) -> Result<Netlist, NetlistError> {
    let content = fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let netlist = parse_netlist(&content)?;

    log::debug!(
        "Loaded {} components from {} (source: {:?}, date: {:?}, tool: {:?})",
        netlist.components.len(),
        path.display(),
        netlist.design.source,
        netlist.design.date,
        netlist.design.tool
    );

    Ok(netlist)
}

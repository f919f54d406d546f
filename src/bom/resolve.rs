//! Output file selection.
//!
//! A board directory is tagged with its part number by a `PCB-NNN.yml`
//! file. When exactly one such file sits next to the requested output, the
//! BOM is written as `PCB-NNN.csv` instead. Failing that, a single existing
//! `PCB-*.csv` is overwritten. Otherwise the requested path is used as is.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::fs::FileSystem;

/// Extension of the written BOM.
pub const BOM_EXTENSION: &str = "csv";

/// How the output path was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Named after the single `PCB-*.yml` in the directory
    Config { name: String },
    /// Overwrites the single existing `PCB-*.csv`
    ExistingBom { name: String },
    /// No unambiguous marker, the requested path is kept
    Requested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub resolution: Resolution,
}

/// Decide where the BOM for `requested` is written.
///
/// The `.yml` lookup takes priority over the `.csv` one; zero or several
/// matches at a stage fall through to the next. An unreadable directory
/// counts as empty.
pub fn resolve_output<F: FileSystem + ?Sized>(fs: &F, requested: &Path) -> OutputTarget {
    let bom_dir = requested.parent().unwrap_or(Path::new(""));

    let mut names = match fs.list_files(bom_dir) {
        Ok(names) => names,
        Err(e) => {
            log::debug!("Cannot list {}: {}", bom_dir.display(), e);
            Vec::new()
        }
    };
    names.sort();

    let config_re = Regex::new(r"^PCB-.*\.yml$").unwrap();
    let bom_re = Regex::new(r"^PCB-.*\.csv$").unwrap();

    if let [name] = matching(&names, &config_re)[..] {
        let path = bom_dir.join(Path::new(name).with_extension(BOM_EXTENSION));
        return OutputTarget {
            path,
            resolution: Resolution::Config {
                name: name.to_string(),
            },
        };
    }

    if let [name] = matching(&names, &bom_re)[..] {
        return OutputTarget {
            path: bom_dir.join(name),
            resolution: Resolution::ExistingBom {
                name: name.to_string(),
            },
        };
    }

    OutputTarget {
        path: requested.to_path_buf(),
        resolution: Resolution::Requested,
    }
}

fn matching<'a>(names: &'a [String], re: &Regex) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| re.is_match(name))
        .collect()
}

//! Filesystem access used by the BOM writer.
//!
//! Output resolution only needs a directory listing and the writer only
//! needs to create a file, so both go through this trait and tests can run
//! against an in-memory implementation.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub trait FileSystem {
    /// Names of the files directly inside `dir`, symlinks to files included.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Create or truncate `path` for writing.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        // A bare file name has an empty parent
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            // Follows symlinks, so a linked marker file counts
            match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            }
            // Non UTF-8 names can never match the PCB-* patterns
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let file = fs::File::create(path)?;
        Ok(Box::new(io::BufWriter::new(file)))
    }
}

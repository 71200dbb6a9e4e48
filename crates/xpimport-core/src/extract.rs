//! Path-safety-checked XPI extraction.
//!
//! XPI packages are plain ZIP containers. Extraction happens in two passes:
//! every stored entry name is checked before any filesystem interaction, so
//! a single malicious entry aborts the import with no side effects, and only
//! then are entries written to their normalized destination paths.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::PathBuf;

use zip::ZipArchive;

use crate::ImportError;
use crate::Result;
use crate::types::DestDir;
use crate::types::EntryName;

/// Opens an XPI container from any seekable byte source.
///
/// # Errors
///
/// Returns `ImportError::InvalidArchive` if the ZIP central directory
/// cannot be read.
pub fn open_xpi<R: Read + Seek>(reader: R) -> Result<ZipArchive<R>> {
    ZipArchive::new(reader)
        .map_err(|e| ImportError::InvalidArchive(format!("failed to open ZIP container: {e}")))
}

/// Extracts every entry of an XPI into the destination directory.
///
/// Returns the written paths in archive order. Directory entries are
/// created, file entries are streamed to disk with missing ancestor
/// directories created as needed; existing files are overwritten.
///
/// The entire archive is name-checked up front: if any entry contains a
/// `..` segment or begins with a path separator, extraction fails before
/// anything is written.
///
/// # Errors
///
/// - `ImportError::UnsafePath` if any entry name attempts traversal
/// - `ImportError::InvalidArchive` if an entry cannot be read
/// - `ImportError::Io` on filesystem failure; already-written entries are
///   left behind for the caller to clean up
///
/// # Examples
///
/// ```no_run
/// use std::io::Cursor;
/// use xpimport_core::test_utils::create_test_xpi;
/// use xpimport_core::types::DestDir;
/// use xpimport_core::{extract_xpi, open_xpi};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let xpi = create_test_xpi(vec![("install.rdf", b"<RDF/>".as_slice())]);
/// let scratch = std::env::temp_dir();
/// let dest = DestDir::new(scratch)?;
///
/// let mut archive = open_xpi(Cursor::new(xpi))?;
/// let written = extract_xpi(&mut archive, &dest)?;
/// assert_eq!(written.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn extract_xpi<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dest: &DestDir,
) -> Result<Vec<PathBuf>> {
    // Pre-check across the whole archive, before any filesystem interaction.
    let names: Vec<String> = archive.file_names().map(str::to_owned).collect();
    for name in &names {
        EntryName::check(name)?;
    }

    let mut written = Vec::with_capacity(names.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| {
            ImportError::InvalidArchive(format!("failed to read entry {index}: {e}"))
        })?;

        let name = EntryName::sanitize(entry.name())?;
        let output_path = dest.join(&name);

        if entry.is_dir() {
            create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                create_dir_all(parent)?;
            }
            let output_file = File::create(&output_path)?;
            let mut writer = BufWriter::with_capacity(64 * 1024, output_file);
            std::io::copy(&mut entry, &mut writer)?;
            writer.flush()?;
        }

        written.push(output_path);
    }

    Ok(written)
}

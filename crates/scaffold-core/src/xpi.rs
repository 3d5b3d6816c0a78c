//! XPI packaging
//!
//! An XPI is an ordinary zip archive; Mozilla products load it directly.
//! Files are added in resolved order, so archives built from the same
//! inputs are byte-identical.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, ScaffoldError};
use crate::template::generator::ResolvedFile;

/// Write a resolved scaffold into a deflate-compressed XPI at `xpi_path`
pub fn write_xpi(files: &[ResolvedFile], xpi_path: &Path) -> Result<()> {
    let out = File::create(xpi_path).map_err(|e| ScaffoldError::io(xpi_path, e))?;
    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let zip_err = |e: zip::result::ZipError| ScaffoldError::Xpi {
        path: xpi_path.to_path_buf(),
        source: e,
    };

    for file in files {
        // Zip entry names always use forward slashes
        let name = file
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        zip.start_file(name, options).map_err(zip_err)?;
        zip.write_all(&file.contents)
            .map_err(|e| ScaffoldError::io(xpi_path, e))?;
    }

    zip.finish().map_err(zip_err)?;
    Ok(())
}

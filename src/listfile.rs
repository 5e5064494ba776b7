//! Line-delimited address files
//!
//! Input is read once before probing starts; output is written once after
//! the run completes.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::{Result, SiteVerifyError};
use crate::core::types::AddressList;
use crate::verify::ResultSet;

/// Read one address per line from a UTF-8 file
pub fn read_addresses<P: AsRef<Path>>(path: P) -> Result<AddressList> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SiteVerifyError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(AddressList::parse(&text))
}

/// Write the verified addresses, one per line, replacing any existing file.
///
/// Lines are sorted so that repeated runs with the same result produce the
/// same file.
pub fn write_results<P: AsRef<Path>>(path: P, results: &ResultSet) -> Result<()> {
    let path = path.as_ref();
    let to_output_error = |source| SiteVerifyError::OutputFile {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(to_output_error)?;
    let mut writer = BufWriter::new(file);

    for line in results.sorted() {
        writeln!(writer, "{line}").map_err(to_output_error)?;
    }
    writer.flush().map_err(to_output_error)?;
    Ok(())
}

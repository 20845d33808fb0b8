//! In-memory ZIP archives for upload-style deploys

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::DeployError;
use crate::models::project::{validate_manifest_path, ProjectFiles};

/// Build a ZIP archive holding every file under its manifest path.
///
/// File bytes are stored exactly as decoded from the manifest.
pub fn build_zip(files: &ProjectFiles) -> Result<Vec<u8>, DeployError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files.iter() {
        validate_manifest_path(&file.path)?;
        let bytes = file.bytes()?;

        zip.start_file(file.path.as_str(), options)?;
        zip.write_all(&bytes)?;
    }

    let archive = zip.finish()?.into_inner();
    debug!("Built archive: {} files, {} bytes", files.len(), archive.len());

    Ok(archive)
}

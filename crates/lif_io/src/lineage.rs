use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use lif_core::LineageRegistry;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Writes the registry as gzip-compressed JSON.
pub fn save_registry<P: AsRef<Path>>(registry: &LineageRegistry, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let json = serde_json::to_vec(registry)?;
    encoder.write_all(&json)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Reads a registry written by [`save_registry`].
///
/// A missing file yields an empty registry. Uncompressed JSON is accepted as
/// well.
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<LineageRegistry> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(LineageRegistry::new());
    }
    let mut raw = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut raw)?;

    let mut decoded = Vec::new();
    let json = if GzDecoder::new(raw.as_slice())
        .read_to_end(&mut decoded)
        .is_ok()
    {
        decoded
    } else {
        raw
    };
    serde_json::from_slice(&json).map_err(|e| {
        IoError::serialization(e.to_string()).with_context(format!("loading {}", path.display()))
    })
}

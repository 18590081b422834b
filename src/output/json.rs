use crate::extractor::FeatureRecord;
use crate::OutputError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes feature records as a pretty-printed JSON array
///
/// Missing parent directories are created. An existing file is replaced.
pub fn write_records(path: &Path, records: &[FeatureRecord]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a JSON array of feature records
pub fn read_records(path: &Path) -> Result<Vec<FeatureRecord>, OutputError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

//! Binary primitive table store.
//!
//! One file per model/resolution pair. Format (little-endian):
//! - magic `b"MPRM"`, version `u16`
//! - model name: `u16` length + UTF-8 bytes
//! - heading count `u16`, resolution `f32`, record count `u32`
//! - records: `u32` length + postcard-encoded [`MotionPrimitive`]
//!
//! Load is all-or-nothing. A bad header, a truncated or undecodable
//! record, trailing bytes, or content that fails table validation is a
//! [`ConfigError`] — the planner must not start on a damaged table.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::discretize::Discretizer;
use crate::error::ConfigError;

use super::{MotionPrimitive, PrimitiveTable};

/// Magic bytes at the start of a primitive table file.
pub const TABLE_MAGIC: [u8; 4] = *b"MPRM";

/// Current table file format version.
pub const TABLE_VERSION: u16 = 1;

/// Canonical file name for a model/discretization pair.
pub fn table_file_name(model: &str, disc: &Discretizer) -> String {
    let millis = (disc.resolution() * 1000.0).round() as u32;
    format!("{}_{}h_{}mm.mprm", model, disc.heading_count(), millis)
}

/// Write a table to a store file.
pub fn save<P: AsRef<Path>>(table: &PrimitiveTable, path: P) -> Result<(), ConfigError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&TABLE_MAGIC)?;
    writer.write_all(&TABLE_VERSION.to_le_bytes())?;

    let name = table.model().as_bytes();
    writer.write_all(&(name.len() as u16).to_le_bytes())?;
    writer.write_all(name)?;

    writer.write_all(&table.heading_count().to_le_bytes())?;
    writer.write_all(&table.resolution().to_le_bytes())?;
    writer.write_all(&(table.len() as u32).to_le_bytes())?;

    for prim in table.iter() {
        let bytes = postcard::to_stdvec(prim)
            .map_err(|e| ConfigError::CorruptRecord(format!("encode: {}", e)))?;
        writer.write_all(&(bytes.len() as u32).to_le_bytes())?;
        writer.write_all(&bytes)?;
    }

    writer.flush()?;
    info!(
        "[store] wrote {} primitives for model={} to {}",
        table.len(),
        table.model(),
        path.as_ref().display()
    );
    Ok(())
}

/// Load a table from a store file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PrimitiveTable, ConfigError> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != TABLE_MAGIC {
        return Err(ConfigError::BadMagic);
    }

    let version = read_u16(&mut reader)?;
    if version != TABLE_VERSION {
        return Err(ConfigError::BadVersion(version));
    }

    let name_len = read_u16(&mut reader)? as usize;
    let mut name_bytes = vec![0u8; name_len];
    reader.read_exact(&mut name_bytes)?;
    let model = String::from_utf8(name_bytes)
        .map_err(|_| ConfigError::CorruptRecord("model name is not UTF-8".into()))?;

    let heading_count = read_u16(&mut reader)?;
    if heading_count == 0 {
        return Err(ConfigError::CorruptRecord("zero heading count".into()));
    }
    let resolution = read_f32(&mut reader)?;
    if !(resolution > 0.0) {
        return Err(ConfigError::CorruptRecord(format!(
            "non-positive resolution {}",
            resolution
        )));
    }
    let count = read_u32(&mut reader)? as usize;

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let len = read_u32(&mut reader).map_err(|_| truncated(i, count))? as usize;
        let mut bytes = vec![0u8; len];
        reader.read_exact(&mut bytes).map_err(|_| truncated(i, count))?;
        let prim: MotionPrimitive = postcard::from_bytes(&bytes)
            .map_err(|e| ConfigError::CorruptRecord(format!("record {}: {}", i, e)))?;
        records.push(prim);
    }

    // All-or-nothing: trailing bytes mean the file does not match its header
    let mut probe = [0u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(ConfigError::CorruptRecord(
            "trailing bytes after last record".into(),
        ));
    }

    info!(
        "[store] loaded {} primitives for model={} from {}",
        records.len(),
        model,
        path.as_ref().display()
    );

    PrimitiveTable::from_parts(model, heading_count, resolution, records)
}

fn truncated(index: usize, count: usize) -> ConfigError {
    ConfigError::CorruptRecord(format!("truncated at record {} of {}", index, count))
}

fn read_u16<R: Read>(reader: &mut R) -> std::io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f32<R: Read>(reader: &mut R) -> std::io::Result<f32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

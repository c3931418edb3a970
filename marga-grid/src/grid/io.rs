//! Binary map file I/O.
//!
//! Format (little-endian):
//! - magic `b"MGRD"`, version `u16`
//! - width `u32`, height `u32`, resolution `f32`, origin x/y `f32`
//! - `width * height` cell state bytes, row-major
//!
//! Load is all-or-nothing: any header mismatch or truncation is an error
//! and no grid is produced.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::core::WorldPoint;

use super::OccupancyGrid;

/// Magic bytes at the start of a map file.
pub const MAP_MAGIC: [u8; 4] = *b"MGRD";

/// Current map file format version.
pub const MAP_VERSION: u16 = 1;

/// Error type for map file operations.
#[derive(Debug, Error)]
pub enum MapFormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid map file magic")]
    BadMagic,

    #[error("unsupported map file version {0}")]
    BadVersion(u16),

    #[error("map dimensions {width}x{height} do not match payload")]
    BadDimensions { width: usize, height: usize },
}

/// Save a grid to a binary map file.
pub fn save<P: AsRef<Path>>(grid: &OccupancyGrid, path: P) -> Result<(), MapFormatError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&MAP_MAGIC)?;
    writer.write_all(&MAP_VERSION.to_le_bytes())?;
    writer.write_all(&(grid.width() as u32).to_le_bytes())?;
    writer.write_all(&(grid.height() as u32).to_le_bytes())?;
    writer.write_all(&grid.resolution().to_le_bytes())?;
    writer.write_all(&grid.origin().x.to_le_bytes())?;
    writer.write_all(&grid.origin().y.to_le_bytes())?;
    writer.write_all(grid.states_raw())?;
    writer.flush()?;
    Ok(())
}

/// Load a grid from a binary map file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<OccupancyGrid, MapFormatError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAP_MAGIC {
        return Err(MapFormatError::BadMagic);
    }

    let version = read_u16(&mut reader)?;
    if version != MAP_VERSION {
        return Err(MapFormatError::BadVersion(version));
    }

    let width = read_u32(&mut reader)? as usize;
    let height = read_u32(&mut reader)? as usize;
    let resolution = read_f32(&mut reader)?;
    let origin_x = read_f32(&mut reader)?;
    let origin_y = read_f32(&mut reader)?;

    let mut states = vec![0u8; width * height];
    reader.read_exact(&mut states)?;

    OccupancyGrid::from_raw(states, width, height, resolution, WorldPoint::new(origin_x, origin_y))
        .ok_or(MapFormatError::BadDimensions { width, height })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellState, GridCoord};

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.mgrd");

        let mut grid = OccupancyGrid::centered_free(20, 10, 0.5);
        grid.fill_rect(GridCoord::new(3, 2), GridCoord::new(5, 7), CellState::Occupied);
        grid.set_state(GridCoord::new(0, 0), CellState::Unknown);

        save(&grid, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.width(), grid.width());
        assert_eq!(loaded.height(), grid.height());
        assert_eq!(loaded.resolution(), grid.resolution());
        assert_eq!(loaded.origin(), grid.origin());
        assert_eq!(loaded.states_raw(), grid.states_raw());
    }

    #[test]
    fn test_load_rejects_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.mgrd");
        std::fs::write(&path, b"NOPE rest of the file").unwrap();

        match load(&path) {
            Err(MapFormatError::BadMagic) => {}
            other => panic!("expected BadMagic, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_rejects_truncated_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.mgrd");

        let grid = OccupancyGrid::centered_free(8, 8, 1.0);
        save(&grid, &path).unwrap();

        // Chop off the tail of the cell data
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

        assert!(matches!(load(&path), Err(MapFormatError::Io(_))));
    }
}

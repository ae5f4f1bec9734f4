//! On-disk cache: a bincode header followed by the collated storage.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convert::EdgeMode;
use crate::storage::CollatedStorage;

pub const CACHE_MAGIC: [u8; 8] = *b"MOLGRAPH";
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("not a molgraph cache file")]
    BadMagic,

    #[error("cache format version {found} is not supported (expected {})", CACHE_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("header announces {header} records but the body holds {body}")]
    LengthMismatch { header: u64, body: u64 },

    #[error("slice tables do not match the stored arrays")]
    Inconsistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHeader {
    pub magic: [u8; 8],
    pub version: u32,
    pub edge_mode: EdgeMode,
    pub len: u64,
}

impl CacheHeader {
    pub fn new(edge_mode: EdgeMode, len: usize) -> Self {
        Self {
            magic: CACHE_MAGIC,
            version: CACHE_VERSION,
            edge_mode,
            len: len as u64,
        }
    }

    /// Reads field by field so a foreign file fails on the magic bytes
    /// rather than somewhere inside the encoding.
    fn read_from(reader: &mut impl Read) -> Result<Self, CacheError> {
        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic)?;
        if magic != CACHE_MAGIC {
            return Err(CacheError::BadMagic);
        }
        let version: u32 = bincode::deserialize_from(&mut *reader)?;
        if version != CACHE_VERSION {
            return Err(CacheError::UnsupportedVersion { found: version });
        }
        Ok(Self {
            magic,
            version,
            edge_mode: bincode::deserialize_from(&mut *reader)?,
            len: bincode::deserialize_from(&mut *reader)?,
        })
    }
}

/// Sibling path the cache is staged at before the rename.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes the cache all-or-nothing: stage to a sibling file, sync, rename.
/// On failure the staging file is removed and `path` is left untouched.
pub fn write_cache(
    path: &Path,
    edge_mode: EdgeMode,
    storage: &CollatedStorage,
) -> Result<(), CacheError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let result = stage(&staging, edge_mode, storage).and_then(|()| {
        fs::rename(&staging, path)?;
        Ok(())
    });
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn stage(
    staging: &Path,
    edge_mode: EdgeMode,
    storage: &CollatedStorage,
) -> Result<(), CacheError> {
    let file = File::create(staging)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &CacheHeader::new(edge_mode, storage.len()))?;
    bincode::serialize_into(&mut writer, storage)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Reads a cache file. Only the header and slice tables are checked.
pub fn read_cache(path: &Path) -> Result<(CacheHeader, CollatedStorage), CacheError> {
    let mut reader = BufReader::new(File::open(path)?);
    let header = CacheHeader::read_from(&mut reader)?;

    let storage: CollatedStorage = bincode::deserialize_from(&mut reader)?;
    if storage.len() as u64 != header.len {
        return Err(CacheError::LengthMismatch {
            header: header.len,
            body: storage.len() as u64,
        });
    }
    if !storage.is_consistent() {
        return Err(CacheError::Inconsistent);
    }
    Ok((header, storage))
}

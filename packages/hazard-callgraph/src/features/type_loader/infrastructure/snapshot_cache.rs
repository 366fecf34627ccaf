//! Registry snapshot cache
//!
//! File layout:
//!
//! ```text
//! [magic "HZCG": 4 bytes]
//! [u32_le version]
//! [blake3 digest of body: 32 bytes]
//! [u64_le body length]
//! [msgpack HierarchyTables: body length bytes]
//! ```
//!
//! Anything that does not match exactly is reported as an error; the caller
//! treats every error as a miss.

use std::fs::{self, OpenOptions};
use std::io::{Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::error::{CacheError, CacheResult};
use crate::features::class_hierarchy::HierarchyTables;

pub const MAGIC: &[u8; 4] = b"HZCG";
pub const VERSION: u32 = 1;

const HEADER_LEN: usize = 4 + 4 + 32 + 8;

/// Frame tables into the snapshot byte format
pub fn encode_snapshot(tables: &HierarchyTables) -> CacheResult<Vec<u8>> {
    let body = rmp_serde::to_vec_named(tables)?;
    let digest = blake3::hash(&body);

    let mut buffer = Vec::with_capacity(HEADER_LEN + body.len());
    buffer.write_all(MAGIC)?;
    buffer.write_u32::<LittleEndian>(VERSION)?;
    buffer.write_all(digest.as_bytes())?;
    buffer.write_u64::<LittleEndian>(body.len() as u64)?;
    buffer.write_all(&body)?;

    Ok(buffer)
}

/// Parse and verify the snapshot byte format
pub fn decode_snapshot(bytes: &[u8]) -> CacheResult<HierarchyTables> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::Corrupted(format!(
            "{} bytes is shorter than the header",
            bytes.len()
        )));
    }

    let mut cursor = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(CacheError::Corrupted("bad magic".to_string()));
    }

    let version = cursor.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(CacheError::VersionMismatch {
            found: version,
            expected: VERSION,
        });
    }

    let mut digest = [0u8; 32];
    cursor.read_exact(&mut digest)?;

    let len = cursor.read_u64::<LittleEndian>()?;
    let body = &bytes[HEADER_LEN..];
    if body.len() as u64 != len {
        return Err(CacheError::Corrupted(format!(
            "body is {} bytes, header says {}",
            body.len(),
            len
        )));
    }

    if blake3::hash(body) != blake3::Hash::from(digest) {
        return Err(CacheError::DigestMismatch);
    }

    Ok(rmp_serde::from_slice(body)?)
}

/// Read a snapshot file
pub fn read_snapshot(path: &Path) -> CacheResult<HierarchyTables> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CacheError::NotFound),
        Err(e) => return Err(e.into()),
    };
    decode_snapshot(&bytes)
}

/// Write a snapshot file (tmp file + rename)
pub fn write_snapshot(path: &Path, tables: &HierarchyTables) -> CacheResult<()> {
    let bytes = encode_snapshot(tables)?;

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::class_hierarchy::RegistryBuilder;
    use crate::shared::CsuDescription;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_tables() -> HierarchyTables {
        let desc: Vec<CsuDescription> = serde_json::from_str(
            r#"[{
                "Name": "Derived",
                "CSUBaseClass": [{"Base": "Base"}],
                "FunctionField": [{
                    "Field": [{"Name": ["foo"], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}},
                               "Annotation": [{"Name": ["annotate", "Suppress GC"]}]}],
                    "Variable": {"Kind": "Func", "Name": ["_ZN7Derived3fooEv$void Derived::foo()"]}
                }]
            }]"#,
        )
        .unwrap();
        let mut builder = RegistryBuilder::new();
        builder.ingest_csu("Derived", &desc[0]).unwrap();
        builder.tables().clone()
    }

    #[test]
    fn test_file_roundtrip_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("types.hzcg");
        let tables = sample_tables();

        write_snapshot(&path, &tables).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), tables);
        assert!(!dir.path().join("types.tmp").exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_snapshot(&dir.path().join("absent.hzcg"));
        assert!(matches!(result, Err(CacheError::NotFound)));
    }

    #[test]
    fn test_flipped_body_byte_fails_digest() {
        let mut bytes = encode_snapshot(&sample_tables()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        assert!(matches!(
            decode_snapshot(&bytes),
            Err(CacheError::DigestMismatch)
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let mut bytes = encode_snapshot(&sample_tables()).unwrap();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            decode_snapshot(&bytes),
            Err(CacheError::VersionMismatch { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_truncated() {
        let bytes = encode_snapshot(&sample_tables()).unwrap();
        assert!(matches!(
            decode_snapshot(&bytes[..bytes.len() - 3]),
            Err(CacheError::Corrupted(_))
        ));
        assert!(matches!(
            decode_snapshot(&bytes[..10]),
            Err(CacheError::Corrupted(_))
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode_snapshot(&sample_tables()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode_snapshot(&bytes), Err(CacheError::Corrupted(_))));
    }
}

//! Type database loading
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = load_types_with_cache("src_comp.db", "types.hzcg")?;
//! let decls = registry.virtual_declarations("nsINode");
//! ```

use std::path::Path;
use std::time::Instant;

use hazard_storage::{KeyedDatabase, SqliteKeyedDatabase};
use tracing::{debug, info, warn};

use crate::errors::{CallgraphError, Result};
use crate::features::class_hierarchy::{Registry, RegistryBuilder};
use crate::features::type_loader::infrastructure::{read_snapshot, write_snapshot};
use crate::shared::CsuDescription;

/// Every `(key, record text)` pair of a keyed database, in index order
pub fn read_records(
    db: &dyn KeyedDatabase,
) -> impl Iterator<Item = Result<(String, String)>> + '_ {
    db.key_range().map(move |index| {
        let key = db.read_key(index)?;
        let record = db.read_record(&key)?;
        Ok((key, record))
    })
}

/// Decode one CSU record: a JSON array holding exactly one description
pub fn decode_csu_record(key: &str, text: &str) -> Result<CsuDescription> {
    let mut records: Vec<CsuDescription> =
        serde_json::from_str(text).map_err(|e| CallgraphError::decode(key, e))?;
    if records.len() != 1 {
        return Err(CallgraphError::malformed(
            key,
            format!("expected one CSU description, found {}", records.len()),
        ));
    }
    Ok(records.remove(0))
}

/// Ingest every record of a keyed database
pub fn ingest_types(db: &dyn KeyedDatabase, builder: &mut RegistryBuilder) -> Result<usize> {
    let mut count = 0;
    for record in read_records(db) {
        let (key, text) = record?;
        let description = decode_csu_record(&key, &text)?;
        let name = description.name.as_deref().unwrap_or(&key);
        debug!(
            csu = name,
            bases = description.base_classes.len(),
            fields = description.function_fields.len(),
            "Ingesting CSU"
        );
        builder.ingest_csu(name, &description)?;
        count += 1;
    }
    Ok(count)
}

/// Build a registry from a keyed database
pub fn load_types(db: &dyn KeyedDatabase) -> Result<Registry> {
    let start = Instant::now();
    let mut builder = RegistryBuilder::new();
    let count = ingest_types(db, &mut builder)?;
    let registry = builder.build();

    info!(
        records = count,
        csus = registry.tables().csu_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded type database"
    );
    Ok(registry)
}

/// Build a registry from a SQLite keyed database file
///
/// Errors name the file.
pub fn load_types_from_path(path: impl AsRef<Path>) -> Result<Registry> {
    let path = path.as_ref();
    let db = SqliteKeyedDatabase::open(path).map_err(|e| CallgraphError::from(e).in_file(path))?;
    load_types(&db).map_err(|e| e.in_file(path))
}

/// Restore the registry from a snapshot, or cold-load and write one
///
/// Snapshot problems never fail the load.
pub fn load_types_with_cache(
    path: impl AsRef<Path>,
    cache_path: impl AsRef<Path>,
) -> Result<Registry> {
    let cache_path = cache_path.as_ref();

    match read_snapshot(cache_path) {
        Ok(tables) => {
            info!(
                cache = %cache_path.display(),
                csus = tables.csu_count(),
                "Restored type registry from cache"
            );
            return Ok(Registry::from_tables(tables));
        }
        Err(e) => {
            debug!(cache = %cache_path.display(), error = %e, "Type cache miss");
        }
    }

    let registry = load_types_from_path(path)?;

    if let Err(e) = write_snapshot(cache_path, registry.tables()) {
        warn!(cache = %cache_path.display(), error = %e, "Failed to write type cache");
    }

    Ok(registry)
}

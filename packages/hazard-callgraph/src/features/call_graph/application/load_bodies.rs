//! Function body loading and call graph output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use hazard_storage::{KeyedDatabase, SqliteKeyedDatabase};
use tracing::info;

use crate::errors::{CallgraphError, Result};
use crate::features::call_graph::domain::CallGraph;
use crate::features::type_loader::read_records;
use crate::shared::FunctionBody;

/// Every body in a keyed database
///
/// Each record holds a JSON array of bodies: the function body first, then
/// any loop bodies split out of it.
pub fn load_bodies(db: &dyn KeyedDatabase) -> Result<Vec<FunctionBody>> {
    let start = Instant::now();
    let mut bodies = Vec::new();
    let mut functions = 0usize;

    for record in read_records(db) {
        let (key, text) = record?;
        let decoded: Vec<FunctionBody> =
            serde_json::from_str(&text).map_err(|e| CallgraphError::decode(&key, e))?;
        if decoded.is_empty() {
            return Err(CallgraphError::malformed(key, "record holds no bodies"));
        }
        functions += 1;
        bodies.extend(decoded);
    }

    info!(
        functions,
        bodies = bodies.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded body database"
    );
    Ok(bodies)
}

pub fn load_bodies_from_path(path: impl AsRef<Path>) -> Result<Vec<FunctionBody>> {
    let path = path.as_ref();
    let db = SqliteKeyedDatabase::open(path).map_err(|e| CallgraphError::from(e).in_file(path))?;
    load_bodies(&db).map_err(|e| e.in_file(path))
}

/// Write one JSON object per line for every graph record
pub fn write_json_lines<W: Write>(graph: &CallGraph, mut out: W) -> Result<()> {
    for record in graph.records() {
        serde_json::to_writer(&mut out, &record).map_err(std::io::Error::from)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// `write_json_lines` into a newly created file
pub fn write_json_lines_to_path(graph: &CallGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let named = |source: std::io::Error| CallgraphError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(named)?;
    write_json_lines(graph, BufWriter::new(file)).map_err(|e| match e {
        CallgraphError::Io(source) => named(source),
        other => other,
    })
}

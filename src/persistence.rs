// File: src/persistence.rs
use crate::core::mapping::MappingTable;
use crate::error::{Error, LoadError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Loads and builds a mapping table from a JSON mapping document.
pub fn load_mapping(path: &Path) -> Result<MappingTable> {
    let table = MappingTable::load(path)?;
    info!(path = %path.display(), synonyms = table.len(), "loaded mapping document");
    Ok(table)
}

/// The mapping document a snapshot was compiled from, as it was at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSource {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SnapshotSource {
    pub fn of(mapping: &Path) -> io::Result<Self> {
        let path = fs::canonicalize(mapping)?;
        let metadata = fs::metadata(&path)?;
        Ok(Self {
            path,
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    source: Option<&'a SnapshotSource>,
    table: &'a MappingTable,
}

#[derive(Deserialize)]
struct Snapshot {
    source: Option<SnapshotSource>,
    table: MappingTable,
}

/// Saves a built table as a bincode snapshot, replacing `path` atomically.
/// The snapshot records no source, so `load_mapping_cached` never reuses it.
pub fn save_snapshot(table: &MappingTable, path: &Path) -> Result<()> {
    write_snapshot(table, None, path)
}

/// Saves a snapshot stamped with the mapping document it was built from.
pub fn save_snapshot_from(table: &MappingTable, source: &SnapshotSource, path: &Path) -> Result<()> {
    write_snapshot(table, Some(source), path)
}

fn write_snapshot(table: &MappingTable, source: Option<&SnapshotSource>, path: &Path) -> Result<()> {
    let snapshot = SnapshotRef { source, table };
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, &snapshot).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })
    })?;
    debug!(path = %path.display(), "mapping snapshot saved");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<MappingTable> {
    read_snapshot(path).map(|snapshot| snapshot.table)
}

/// The source a snapshot was stamped with, if any.
pub fn snapshot_source(path: &Path) -> Result<Option<SnapshotSource>> {
    read_snapshot(path).map(|snapshot| snapshot.source)
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Read {
        origin: origin.clone(),
        source,
    })?;
    let snapshot = bincode::deserialize_from(BufReader::new(file))
        .map_err(|source| LoadError::Snapshot { origin, source })?;
    Ok(snapshot)
}

/// Reuses the snapshot at `snapshot` only when it was built from this very
/// mapping document (same canonical path, length and mtime). Otherwise loads
/// the document and rewrites the snapshot.
pub fn load_mapping_cached(mapping: &Path, snapshot: &Path) -> Result<MappingTable> {
    let source = SnapshotSource::of(mapping).map_err(|source| LoadError::Read {
        origin: mapping.display().to_string(),
        source,
    })?;

    match read_snapshot(snapshot) {
        Ok(Snapshot {
            source: Some(built_from),
            table,
        }) if built_from == source => {
            debug!(path = %snapshot.display(), "using mapping snapshot");
            return Ok(table);
        }
        Ok(_) => debug!(path = %snapshot.display(), "snapshot built from another document, rebuilding"),
        Err(e) => debug!(error = %e, "snapshot unusable, rebuilding"),
    }

    let table = load_mapping(mapping)?;
    save_snapshot_from(&table, &source, snapshot)?;
    Ok(table)
}

/// Writes through a temporary file in the destination directory and renames
/// it over `path` only once `fill` and the flush have succeeded.
///
/// The destination directory must exist. An existing destination keeps its
/// permissions; a new one gets the mode `File::create` would give it.
pub fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|m| m.permissions());

    let temp_file = temp_file_in(parent_dir).map_err(|e| Error::write(path, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        fill(&mut writer)?;
        writer.flush().map_err(|e| Error::write(path, e))?;
    }
    if let Some(permissions) = existing {
        temp_file
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::write(path, e))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| Error::write(path, e.error))?;
    Ok(())
}

fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // 0666 is narrowed by the process umask at creation.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

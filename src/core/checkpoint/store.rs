//! Checkpoint store
//!
//! Persists extracted records as JSON Lines files whose names carry the
//! extraction history (see [`CheckpointName`]). The directory is append-only:
//! files are created, never rewritten or removed.

use super::name::CheckpointName;
use crate::config::CheckpointConfig;
use crate::domain::{ItemId, PipelineError, Record, Result};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Filesystem-backed checkpoint directory
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    directory: PathBuf,
    suffix: String,
}

impl CheckpointStore {
    /// Create a store over the configured directory
    ///
    /// The directory is created lazily on the first [`persist`](Self::persist).
    pub fn new(config: &CheckpointConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            suffix: config.file_suffix.clone(),
        }
    }

    /// Directory this store reads and writes
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of a checkpoint
    pub fn path_of(&self, name: &CheckpointName) -> PathBuf {
        self.directory.join(name.file_name())
    }

    /// All valid checkpoints, sorted by filename (oldest first)
    ///
    /// A missing directory is an empty history. Entries that don't follow the
    /// checkpoint grammar are skipped.
    pub async fn history(&self) -> Result<Vec<CheckpointName>> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PipelineError::Storage(format!(
                    "Failed to list checkpoint directory {}: {e}",
                    self.directory.display()
                )))
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            PipelineError::Storage(format!(
                "Failed to read checkpoint directory {}: {e}",
                self.directory.display()
            ))
        })? {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            match CheckpointName::parse(file_name, &self.suffix) {
                Some(name) => names.push(name),
                None if file_name.starts_with('.') => {}
                None => {
                    tracing::debug!(file = %file_name, "Ignoring non-checkpoint file");
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Most recent checkpoint, if any
    pub async fn latest(&self) -> Result<Option<CheckpointName>> {
        Ok(self.history().await?.pop())
    }

    /// Write `records` as a new checkpoint covering `min_id..=max_id`
    ///
    /// The file is written to a hidden temp file, synced, then renamed into
    /// place, so a checkpoint name is only ever visible with complete content.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Storage`] if `records` is empty or doesn't
    /// cover exactly `min_id..=max_id` in order, or if the directory can't be
    /// created or written.
    pub async fn persist(
        &self,
        records: &[Record],
        min_id: ItemId,
        max_id: ItemId,
    ) -> Result<PathBuf> {
        check_contiguous(records, min_id, max_id)?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                PipelineError::Storage(format!(
                    "Failed to create checkpoint directory {}: {e}",
                    self.directory.display()
                ))
            })?;

        let name = self.next_name(min_id, max_id).await?;
        let path = self.path_of(&name);

        ensure_absent(&path).await?;

        let mut buffer = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buffer, record.payload())?;
            buffer.push(b'\n');
        }

        let temp_path = self
            .directory
            .join(format!(".{}.tmp", uuid::Uuid::new_v4()));

        if let Err(e) = write_synced(&temp_path, &buffer).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(PipelineError::Storage(format!(
                "Failed to write checkpoint {}: {e}",
                path.display()
            )));
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(PipelineError::Storage(format!(
                "Failed to move checkpoint into place {}: {e}",
                path.display()
            )));
        }

        if let Err(e) = sync_dir(&self.directory).await {
            tracing::warn!(
                directory = %self.directory.display(),
                error = %e,
                "Failed to sync checkpoint directory after rename"
            );
        }

        tracing::info!(
            path = %path.display(),
            min_id = %min_id,
            max_id = %max_id,
            records = records.len(),
            bytes = buffer.len(),
            "Checkpoint written"
        );

        Ok(path)
    }

    /// Read a checkpoint back, one record per line in file order
    ///
    /// Ids are reassigned from the name's `min_id`; a line count that
    /// disagrees with the declared range is an error.
    pub async fn load(&self, name: &CheckpointName) -> Result<Vec<Record>> {
        let path = self.path_of(name);
        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            PipelineError::Storage(format!("Failed to read checkpoint {}: {e}", path.display()))
        })?;

        let mut records = Vec::new();
        let mut id = name.min_id();
        for (line_no, line) in contents.lines().enumerate() {
            let payload: Value = serde_json::from_str(line).map_err(|e| {
                PipelineError::Serialization(format!(
                    "{} line {}: {e}",
                    path.display(),
                    line_no + 1
                ))
            })?;
            records.push(Record::new(id, payload));
            id = id.next();
        }

        if records.len() as u64 != name.record_count() {
            return Err(PipelineError::Storage(format!(
                "Checkpoint {} declares {} records but contains {}",
                path.display(),
                name.record_count(),
                records.len()
            )));
        }

        Ok(records)
    }

    /// Name for a new checkpoint that sorts after every existing one, even if
    /// the wall clock went backwards since the last write
    async fn next_name(&self, min_id: ItemId, max_id: ItemId) -> Result<CheckpointName> {
        let mut name = CheckpointName::new(Utc::now(), min_id, max_id, self.suffix.clone());

        if let Some(latest) = self.latest().await? {
            if name.timestamp() <= latest.timestamp() {
                let bumped = latest.timestamp() + Duration::microseconds(1);
                tracing::warn!(
                    latest = %latest,
                    now = %name.timestamp(),
                    "Clock is behind the latest checkpoint; bumping timestamp to keep history ordered"
                );
                name = CheckpointName::new(bumped, min_id, max_id, self.suffix.clone());
            }
        }

        Ok(name)
    }
}

async fn ensure_absent(path: &Path) -> Result<()> {
    match tokio::fs::try_exists(path).await {
        Ok(false) => Ok(()),
        Ok(true) => Err(PipelineError::Storage(format!(
            "Checkpoint already exists: {}",
            path.display()
        ))),
        Err(e) => Err(PipelineError::Storage(format!(
            "Failed to check for existing checkpoint {}: {e}",
            path.display()
        ))),
    }
}

/// Makes a rename inside `dir` durable
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}

fn check_contiguous(records: &[Record], min_id: ItemId, max_id: ItemId) -> Result<()> {
    if records.is_empty() {
        return Err(PipelineError::Storage(
            "Refusing to write an empty checkpoint".to_string(),
        ));
    }

    let mut expected = min_id;
    for record in records {
        if record.id() != expected {
            return Err(PipelineError::Storage(format!(
                "Records are not contiguous: expected id {expected}, found {}",
                record.id()
            )));
        }
        expected = expected.next();
    }

    if expected.prev() != max_id {
        return Err(PipelineError::Storage(format!(
            "Records end at {} but checkpoint declares max id {max_id}",
            expected.prev()
        )));
    }

    Ok(())
}

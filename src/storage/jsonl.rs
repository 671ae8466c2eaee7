//! JSONL (JSON Lines) storage.
//!
//! The history tables are JSONL files, one entity per line. Append-only
//! tables (matches, performances, reviews) grow with each recorded match;
//! cumulative tables (players, teams, maps) are rewritten whole.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// History tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Match,
    Performance,
    Review,
    Player,
    Team,
    Map,
}

impl EntityType {
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Match => "matches.jsonl",
            EntityType::Performance => "match_performances.jsonl",
            EntityType::Review => "review_items.jsonl",
            EntityType::Player => "players.jsonl",
            EntityType::Team => "teams.jsonl",
            EntityType::Map => "maps.jsonl",
        }
    }
}

/// Path of a history table.
pub fn entity_path(config: &StorageConfig, entity: EntityType) -> PathBuf {
    config.history_dir().join(entity.filename())
}

fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    fn write_lines<'a>(
        &self,
        file: File,
        entities: impl IntoIterator<Item = &'a T>,
    ) -> Result<usize, StorageError>
    where
        T: 'a,
    {
        let mut writer = BufWriter::new(file);
        let mut count = 0;
        for entity in entities {
            writeln!(writer, "{}", serde_json::to_string(entity)?)?;
            count += 1;
        }
        writer.flush()?;
        Ok(count)
    }

    /// Append one entity.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.append_batch(std::slice::from_ref(entity)).map(|_| ())
    }

    /// Append entities; an empty batch leaves the file untouched.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }
        ensure_parent(&self.path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let count = self.write_lines(file, entities)?;

        debug!("Appended {} entities to {:?}", count, self.path);
        Ok(count)
    }

    /// Replace the file's contents.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        ensure_parent(&self.path)?;
        let count = self.write_lines(File::create(&self.path)?, entities)?;
        debug!("Wrote {} entities to {:?}", count, self.path);
        Ok(count)
    }
}

/// JSONL file reader. A missing file reads as empty.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every entity, skipping (and logging) lines that fail to parse.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => warn!("Failed to parse line {} in {:?}: {}", index + 1, self.path, e),
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read_all()?.into_iter().filter(predicate).collect())
    }
}

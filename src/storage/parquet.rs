//! Parquet export for analytics.
//!
//! Parquet files are derived from the JSONL history and rebuilt whole on
//! every export.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::calculate::kdr_ratio;
use crate::models::{MatchPerformance, PlayerHistory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    Performances,
    Players,
}

impl TableType {
    pub fn filename(&self) -> &'static str {
        match self {
            TableType::Performances => "match_performances.parquet",
            TableType::Players => "players.parquet",
        }
    }
}

/// Schema definitions for Parquet tables.
pub mod schemas {
    use super::*;

    pub fn performances_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("match_id", DataType::Utf8, false),
            Field::new("player_id", DataType::Utf8, false),
            Field::new("team_name", DataType::Utf8, true),
            Field::new("side", DataType::Utf8, false),
            Field::new("group", DataType::Utf8, false),
            Field::new("kills", DataType::UInt32, false),
            Field::new("deaths", DataType::UInt32, false),
            Field::new("combat_effectiveness", DataType::UInt32, false),
            Field::new("offensive_points", DataType::UInt32, false),
            Field::new("defensive_points", DataType::UInt32, false),
            Field::new("support_points", DataType::UInt32, false),
        ])
    }

    pub fn players_schema() -> Schema {
        Schema::new(vec![
            Field::new("player_id", DataType::Utf8, false),
            Field::new("player_name", DataType::Utf8, false),
            Field::new("total_matches", DataType::UInt32, false),
            Field::new("total_kills", DataType::UInt64, false),
            Field::new("total_deaths", DataType::UInt64, false),
            Field::new("total_combat_effectiveness", DataType::UInt64, false),
            Field::new("total_offensive_points", DataType::UInt64, false),
            Field::new("total_defensive_points", DataType::UInt64, false),
            Field::new("total_support_points", DataType::UInt64, false),
            Field::new("kdr", DataType::Float64, false),
        ])
    }
}

fn u32_column<T>(rows: &[T], f: impl Fn(&T) -> u32) -> ArrayRef {
    Arc::new(UInt32Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn u64_column<T>(rows: &[T], f: impl Fn(&T) -> u64) -> ArrayRef {
    Arc::new(UInt64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

/// Parquet file writer.
pub struct ParquetWriter {
    config: StorageConfig,
}

impl ParquetWriter {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn table_path(&self, table: TableType) -> PathBuf {
        self.config.parquet_dir().join(table.filename())
    }

    pub fn write_performances(
        &self,
        performances: &[MatchPerformance],
    ) -> Result<PathBuf, StorageError> {
        let path = self.table_path(TableType::Performances);
        let schema = Arc::new(schemas::performances_schema());

        let sides: Vec<String> = performances.iter().map(|p| p.side.to_string()).collect();
        let groups: Vec<String> = performances.iter().map(|p| p.group.to_string()).collect();

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(
                    performances.iter().map(|p| p.id.as_str()),
                )) as ArrayRef,
                Arc::new(StringArray::from_iter_values(
                    performances.iter().map(|p| p.match_id.as_str()),
                )) as ArrayRef,
                Arc::new(StringArray::from_iter_values(
                    performances.iter().map(|p| p.player_id.as_str()),
                )) as ArrayRef,
                Arc::new(StringArray::from(
                    performances
                        .iter()
                        .map(|p| p.team_name.as_deref())
                        .collect::<Vec<_>>(),
                )) as ArrayRef,
                Arc::new(StringArray::from_iter_values(sides.iter())) as ArrayRef,
                Arc::new(StringArray::from_iter_values(groups.iter())) as ArrayRef,
                u32_column(performances, |p| p.kills),
                u32_column(performances, |p| p.deaths),
                u32_column(performances, |p| p.combat_effectiveness),
                u32_column(performances, |p| p.offensive_points),
                u32_column(performances, |p| p.defensive_points),
                u32_column(performances, |p| p.support_points),
            ],
        )?;

        self.write_batch(&path, &schema, &batch)?;
        info!("Wrote {} performances to {:?}", performances.len(), path);
        Ok(path)
    }

    pub fn write_players(&self, players: &[PlayerHistory]) -> Result<PathBuf, StorageError> {
        let path = self.table_path(TableType::Players);
        let schema = Arc::new(schemas::players_schema());

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(
                    players.iter().map(|p| p.player_id.as_str()),
                )) as ArrayRef,
                Arc::new(StringArray::from_iter_values(
                    players.iter().map(|p| p.player_name.as_str()),
                )) as ArrayRef,
                u32_column(players, |p| p.total_matches),
                u64_column(players, |p| p.total_kills),
                u64_column(players, |p| p.total_deaths),
                u64_column(players, |p| p.total_combat_effectiveness),
                u64_column(players, |p| p.total_offensive_points),
                u64_column(players, |p| p.total_defensive_points),
                u64_column(players, |p| p.total_support_points),
                Arc::new(Float64Array::from(
                    players
                        .iter()
                        .map(|p| kdr_ratio(p.total_kills, p.total_deaths))
                        .collect::<Vec<_>>(),
                )) as ArrayRef,
            ],
        )?;

        self.write_batch(&path, &schema, &batch)?;
        info!("Wrote {} players to {:?}", players.len(), path);
        Ok(path)
    }

    fn write_batch(
        &self,
        path: &Path,
        schema: &Arc<Schema>,
        batch: &RecordBatch,
    ) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(File::create(path)?, schema.clone(), Some(props))?;
        writer.write(batch)?;
        writer.close()?;
        Ok(())
    }
}

/// Parquet file reader.
pub struct ParquetReader {
    config: StorageConfig,
}

impl ParquetReader {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn table_path(&self, table: TableType) -> PathBuf {
        self.config.parquet_dir().join(table.filename())
    }

    pub fn exists(&self, table: TableType) -> bool {
        self.table_path(table).exists()
    }

    pub fn read_batches(&self, table: TableType) -> Result<Vec<RecordBatch>, StorageError> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?.build()?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;

        debug!("Read {} batches from {:?}", batches.len(), path);
        Ok(batches)
    }

    pub fn count(&self, table: TableType) -> Result<usize, StorageError> {
        Ok(self
            .read_batches(table)?
            .iter()
            .map(|b| b.num_rows())
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Allegiance, MatchId, ParticipantRecord, PlayerId, Role, StatLine, WeaponCounts,
    };
    use arrow::array::Array;
    use tempfile::TempDir;

    fn performance(player: &str, team: Option<&str>, kills: u32) -> MatchPerformance {
        let mut record = ParticipantRecord::new(
            PlayerId::from(player),
            player.to_string(),
            StatLine {
                kills,
                deaths: 2,
                ..Default::default()
            },
            WeaponCounts::new(),
            WeaponCounts::new(),
        );
        record.side = if team.is_some() {
            Allegiance::Axis
        } else {
            Allegiance::Spectators
        };
        record.role = Role::Infantry;
        MatchPerformance::new(
            &MatchId::from("m1"),
            team.map(str::to_string),
            &record,
        )
    }

    #[test]
    fn test_schemas() {
        let schema = schemas::performances_schema();
        assert_eq!(schema.fields().len(), 12);
        assert!(schema.field_with_name("team_name").unwrap().is_nullable());
        assert_eq!(schemas::players_schema().fields().len(), 10);
    }

    #[test]
    fn test_write_and_read_performances() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let writer = ParquetWriter::new(config.clone());
        let reader = ParquetReader::new(config.clone());
        assert!(!reader.exists(TableType::Performances));

        let path = writer
            .write_performances(&[
                performance("1", Some("Axis Team"), 12),
                performance("2", None, 0),
            ])
            .unwrap();

        assert_eq!(
            path,
            config.parquet_dir().join("match_performances.parquet")
        );
        assert_eq!(reader.count(TableType::Performances).unwrap(), 2);

        let batches = reader.read_batches(TableType::Performances).unwrap();
        let teams = batches[0]
            .column_by_name("team_name")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(teams.value(0), "Axis Team");
        assert!(teams.is_null(1));

        let sides = batches[0]
            .column_by_name("side")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(sides.value(1), "Spectators");
    }

    #[test]
    fn test_write_players() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let mut history = PlayerHistory::new(PlayerId::from("1"), "Grekker".to_string());
        history.add(&performance("1", Some("Axis Team"), 12));

        ParquetWriter::new(config.clone())
            .write_players(&[history])
            .unwrap();

        let batches = ParquetReader::new(config)
            .read_batches(TableType::Players)
            .unwrap();
        let kdr = batches[0]
            .column_by_name("kdr")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(kdr.value(0), 6.0);
    }

    #[test]
    fn test_empty_export() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        ParquetWriter::new(config.clone())
            .write_performances(&[])
            .unwrap();
        assert_eq!(
            ParquetReader::new(config)
                .count(TableType::Performances)
                .unwrap(),
            0
        );
    }
}

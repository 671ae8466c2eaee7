//! Cumulative match history on top of the JSONL tables.
//!
//! Recording a match is idempotent per results file name. Two files that
//! describe the same teams, map and date are distinct matches, so the stored
//! id mixes the file name into the report id. Every participant is recorded, including the `Unknown` bucket and
//! spectators (who have no team).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use super::jsonl::{EntityType, JsonlReader, JsonlWriter};
use super::{read_results_file, StorageConfig, StorageError};
use crate::models::{
    MapStats, MatchId, MatchPerformance, MatchRecord, MatchResult, ParticipantRecord,
    PlayerHistory, PlayerId, ReviewItem, Side, TeamRecord,
};

/// What happened when a match was offered to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded {
        match_id: MatchId,
        performances: usize,
    },
    AlreadyRecorded {
        match_id: MatchId,
    },
}

impl RecordOutcome {
    pub fn match_id(&self) -> &MatchId {
        match self {
            RecordOutcome::Recorded { match_id, .. } | RecordOutcome::AlreadyRecorded { match_id } => {
                match_id
            }
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, RecordOutcome::Recorded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    config: StorageConfig,
}

impl HistoryStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn result_path(&self, match_id: &MatchId) -> PathBuf {
        self.config
            .results_dir()
            .join(format!("{}.json", match_id.as_str()))
    }

    /// Id a match is stored under: the report id qualified by its file name.
    pub fn recorded_id(file_name: &str, result: &MatchResult) -> MatchId {
        MatchId::generate(&[result.id().as_str(), file_name])
    }

    /// Record a finalized match under the results file it came from.
    /// Reviews are re-keyed to the stored match id.
    pub fn record_match(
        &self,
        file_name: &str,
        result: &MatchResult,
        reviews: &[ReviewItem],
    ) -> Result<RecordOutcome, StorageError> {
        if let Some(existing) = self
            .matches()?
            .into_iter()
            .find(|m| m.file_name == file_name)
        {
            info!("{} has already been recorded, skipping", file_name);
            return Ok(RecordOutcome::AlreadyRecorded {
                match_id: existing.id,
            });
        }

        let match_id = Self::recorded_id(file_name, result);
        let reviews: Vec<ReviewItem> = reviews.iter().map(|r| r.for_match(&match_id)).collect();

        fs::create_dir_all(self.config.results_dir())?;
        fs::write(
            self.result_path(&match_id),
            serde_json::to_string_pretty(result)?,
        )?;

        let participants = participants_with_team(result);
        let performances: Vec<MatchPerformance> = participants
            .iter()
            .map(|(team, record)| MatchPerformance::new(&match_id, team.clone(), record))
            .collect();

        JsonlWriter::for_entity(&self.config, EntityType::Match).append(&MatchRecord {
            id: match_id.clone(),
            file_name: file_name.to_string(),
            recorded_at: Utc::now(),
            map_name: result.map_name.clone(),
            match_date: result.match_date.clone(),
            axis_team: result.axis.team_name.clone(),
            allies_team: result.allies.team_name.clone(),
            participant_count: performances.len() as u32,
        })?;
        JsonlWriter::for_entity(&self.config, EntityType::Performance)
            .append_batch(&performances)?;
        JsonlWriter::for_entity(&self.config, EntityType::Review).append_batch(&reviews)?;

        self.update_players(&participants, &performances)?;
        self.update_teams(result)?;
        self.update_map(&result.map_name)?;

        info!(
            "Recorded {} ({} performances) from {}",
            match_id,
            performances.len(),
            file_name
        );
        Ok(RecordOutcome::Recorded {
            match_id,
            performances: performances.len(),
        })
    }

    /// Record every `*.json` results file in `dir` not recorded yet.
    /// Files that are not match results are skipped with a warning.
    pub fn record_directory(
        &self,
        dir: &Path,
    ) -> Result<Vec<(String, RecordOutcome)>, StorageError> {
        let pattern = dir.join("*.json");
        let mut outcomes = Vec::new();

        for entry in glob::glob(&pattern.to_string_lossy())? {
            let path = entry.map_err(|e| StorageError::Io(e.into_error()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let result = match read_results_file(&path) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let outcome = self.record_match(&file_name, &result, &[])?;
            outcomes.push((file_name, outcome));
        }

        Ok(outcomes)
    }

    fn update_players(
        &self,
        participants: &[(Option<String>, &ParticipantRecord)],
        performances: &[MatchPerformance],
    ) -> Result<(), StorageError> {
        let mut players: BTreeMap<PlayerId, PlayerHistory> = self
            .players()?
            .into_iter()
            .map(|p| (p.player_id.clone(), p))
            .collect();

        for ((_, record), performance) in participants.iter().zip(performances) {
            let entry = players
                .entry(record.player_id.clone())
                .or_insert_with(|| PlayerHistory::new(record.player_id.clone(), record.name.clone()));
            entry.player_name = record.name.clone();
            entry.add(performance);
        }

        let players: Vec<PlayerHistory> = players.into_values().collect();
        JsonlWriter::for_entity(&self.config, EntityType::Player).write_all(&players)?;
        Ok(())
    }

    fn update_teams(&self, result: &MatchResult) -> Result<(), StorageError> {
        let mut teams = self.teams()?;
        for side in Side::ALL {
            let name = &result.team(side).team_name;
            match teams.iter_mut().find(|t| &t.name == name) {
                Some(team) => team.matches_played += 1,
                None => teams.push(TeamRecord {
                    name: name.clone(),
                    matches_played: 1,
                }),
            }
        }
        JsonlWriter::for_entity(&self.config, EntityType::Team).write_all(&teams)?;
        Ok(())
    }

    fn update_map(&self, map_name: &str) -> Result<(), StorageError> {
        let mut maps = self.maps()?;
        match maps.iter_mut().find(|m| m.name == map_name) {
            Some(map) => map.times_played += 1,
            None => maps.push(MapStats {
                name: map_name.to_string(),
                times_played: 1,
            }),
        }
        JsonlWriter::for_entity(&self.config, EntityType::Map).write_all(&maps)?;
        Ok(())
    }

    pub fn matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Match).read_all()
    }

    pub fn match_record(&self, match_id: &str) -> Result<Option<MatchRecord>, StorageError> {
        Ok(self
            .matches()?
            .into_iter()
            .find(|m| m.id.as_str() == match_id))
    }

    /// The full report stored when the match was recorded.
    pub fn load_result(&self, match_id: &str) -> Result<Option<MatchResult>, StorageError> {
        let path = self.result_path(&MatchId::from(match_id));
        if !path.exists() {
            return Ok(None);
        }
        read_results_file(&path).map(Some)
    }

    pub fn performances(&self) -> Result<Vec<MatchPerformance>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Performance).read_all()
    }

    pub fn performances_for_match(
        &self,
        match_id: &str,
    ) -> Result<Vec<MatchPerformance>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Performance)
            .read_where(|p: &MatchPerformance| p.match_id.as_str() == match_id)
    }

    pub fn performances_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<MatchPerformance>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Performance)
            .read_where(|p: &MatchPerformance| p.player_id.as_str() == player_id)
    }

    pub fn reviews_for_match(&self, match_id: &str) -> Result<Vec<ReviewItem>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Review)
            .read_where(|r: &ReviewItem| r.match_id.as_str() == match_id)
    }

    pub fn players(&self) -> Result<Vec<PlayerHistory>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Player).read_all()
    }

    pub fn player(&self, player_id: &str) -> Result<Option<PlayerHistory>, StorageError> {
        Ok(self
            .players()?
            .into_iter()
            .find(|p| p.player_id.as_str() == player_id))
    }

    pub fn teams(&self) -> Result<Vec<TeamRecord>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Team).read_all()
    }

    pub fn maps(&self) -> Result<Vec<MapStats>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Map).read_all()
    }
}

/// Every participant with the team they played for, spectators last.
fn participants_with_team(result: &MatchResult) -> Vec<(Option<String>, &ParticipantRecord)> {
    let mut participants = Vec::with_capacity(result.participant_count());
    for side in Side::ALL {
        let team = result.team(side);
        participants.extend(team.players().map(|p| (Some(team.team_name.clone()), p)));
    }
    participants.extend(result.spectators.iter().map(|p| (None, p)));
    participants
}

//! Roster ingestion and the per-match analysis pipeline.
//!
//! Rows come in as field-name to value mappings. The identity column of the
//! export (`Player ID` or the older `Steam ID`) is normalized to
//! [`STABLE_ID_FIELD`] before a row reaches [`parse_participant`].

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::MatchAggregator;
use crate::catalog::WeaponCatalog;
use crate::classify::{ArmorDecider, Classifier, DisambiguationPolicy};
use crate::config::ClassifierConfig;
use crate::models::{
    MatchId, MatchResult, ParticipantRecord, PlayerId, ReviewItem, ReviewReason, Role, StatLine,
    WeaponCounts,
};

/// Normalized name of the identity field.
pub const STABLE_ID_FIELD: &str = "stable-id";

/// Identity columns accepted in a CSV header, most preferred first.
pub const IDENTITY_COLUMNS: [&str; 2] = ["Player ID", "Steam ID"];

/// Fields every row must carry.
pub const REQUIRED_FIELDS: [&str; 10] = [
    STABLE_ID_FIELD,
    "Name",
    "Kills",
    "Deaths",
    "Combat Effectiveness",
    "Offensive Points",
    "Defensive Points",
    "Support Points",
    "Weapons",
    "Death by Weapons",
];

/// One roster row: field name to raw value.
pub type RawRow = BTreeMap<String, String>;

/// A field is present but its value is unusable.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("field '{field}' is not a non-negative integer: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("field '{field}' is not a JSON object of weapon counts: {source}")]
    MalformedWeapons {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("weapon '{weapon}' in field '{field}' has invalid count {value}")]
    InvalidWeaponCount {
        field: String,
        weapon: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("required field '{field}' missing (available: {})", available.join(", "))]
    MissingField {
        field: String,
        available: Vec<String>,
    },

    #[error("row {row} ({name}): {source}")]
    Row {
        row: usize,
        name: String,
        #[source]
        source: DataError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_count(row: &RawRow, field: &str) -> Result<u32, DataError> {
    let value = row.get(field).map(String::as_str).unwrap_or_default();
    value.trim().parse().map_err(|_| DataError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse a JSON object of weapon name to count. A blank field is an empty map.
pub fn parse_weapon_counts(field: &str, raw: &str) -> Result<WeaponCounts, DataError> {
    if raw.trim().is_empty() {
        return Ok(WeaponCounts::new());
    }

    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(raw).map_err(|source| DataError::MalformedWeapons {
            field: field.to_string(),
            source,
        })?;

    object
        .into_iter()
        .map(|(weapon, value)| {
            let count = value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| DataError::InvalidWeaponCount {
                    field: field.to_string(),
                    weapon: weapon.clone(),
                    value: value.to_string(),
                })?;
            Ok((weapon, count))
        })
        .collect()
}

/// Build an unclassified record from one row. `row` is 1-based and only used
/// for error context.
pub fn parse_participant(row: usize, fields: &RawRow) -> Result<ParticipantRecord, IngestError> {
    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
        return Err(IngestError::MissingField {
            field: missing.to_string(),
            available: fields.keys().cloned().collect(),
        });
    }

    let name = fields["Name"].clone();
    let with_context = |source: DataError| IngestError::Row {
        row,
        name: name.clone(),
        source,
    };

    let stats = (|| {
        Ok::<_, DataError>(StatLine {
            kills: parse_count(fields, "Kills")?,
            deaths: parse_count(fields, "Deaths")?,
            combat_effectiveness: parse_count(fields, "Combat Effectiveness")?,
            offensive_points: parse_count(fields, "Offensive Points")?,
            defensive_points: parse_count(fields, "Defensive Points")?,
            support_points: parse_count(fields, "Support Points")?,
        })
    })()
    .map_err(with_context)?;

    let weapons = parse_weapon_counts("Weapons", &fields["Weapons"]).map_err(with_context)?;
    let death_by_weapons =
        parse_weapon_counts("Death by Weapons", &fields["Death by Weapons"]).map_err(with_context)?;

    Ok(ParticipantRecord::new(
        PlayerId::new(fields[STABLE_ID_FIELD].trim().to_string()),
        name,
        stats,
        weapons,
        death_by_weapons,
    ))
}

/// Read every row of a roster export, normalizing the identity column.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    // Strict lengths: a short row is reported by csv with its line number.
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let identity = IDENTITY_COLUMNS
        .into_iter()
        .find(|c| headers.iter().any(|h| h == c))
        .ok_or_else(|| IngestError::MissingField {
            field: IDENTITY_COLUMNS.join(" or "),
            available: headers.clone(),
        })?;

    for field in REQUIRED_FIELDS.iter().skip(1) {
        if !headers.iter().any(|h| h == field) {
            return Err(IngestError::MissingField {
                field: field.to_string(),
                available: headers.clone(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| {
                // Only the preferred identity column survives normalization.
                !IDENTITY_COLUMNS.contains(&header.as_str()) || header.as_str() == identity
            })
            .map(|(header, value)| {
                let key = if header == identity {
                    STABLE_ID_FIELD.to_string()
                } else {
                    header.clone()
                };
                (key, value.to_string())
            })
            .collect();
        rows.push(row);
    }

    debug!("Read {} roster rows using '{}' as identity", rows.len(), identity);
    Ok(rows)
}

pub fn read_roster_csv(path: &Path) -> Result<Vec<RawRow>, IngestError> {
    let file = File::open(path)?;
    read_roster(file)
}

/// Team, map and date of a match; not present in the export itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInfo {
    pub axis_team: String,
    pub allies_team: String,
    pub map_name: String,
    pub match_date: String,
}

impl MatchInfo {
    pub fn new(
        axis_team: impl Into<String>,
        allies_team: impl Into<String>,
        map_name: impl Into<String>,
        match_date: impl Into<String>,
    ) -> Self {
        Self {
            axis_team: axis_team.into(),
            allies_team: allies_team.into(),
            map_name: map_name.into(),
            match_date: match_date.into(),
        }
    }
}

/// Output of analyzing one match.
#[derive(Debug, Clone)]
pub struct MatchAnalysis {
    /// Finalized report
    pub result: MatchResult,
    /// Weapon names the catalog did not recognise
    pub unknown_weapons: BTreeSet<String>,
    /// Every disambiguation outcome, in row order
    pub reviews: Vec<ReviewItem>,
}

/// Runs rows through classification, disambiguation and aggregation.
pub struct MatchAnalyzer<'a> {
    classifier: Classifier<'a>,
    policy: &'a DisambiguationPolicy,
}

impl<'a> MatchAnalyzer<'a> {
    pub fn new(
        catalog: &'a WeaponCatalog,
        policy: &'a DisambiguationPolicy,
        config: &ClassifierConfig,
    ) -> Self {
        Self {
            classifier: Classifier::new(catalog, config),
            policy,
        }
    }

    /// Analyze one match. The first bad row aborts the match.
    pub fn analyze_rows<I>(
        &self,
        rows: I,
        info: &MatchInfo,
        decider: &mut dyn ArmorDecider,
    ) -> Result<MatchAnalysis, IngestError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut aggregator = MatchAggregator::new(
            info.axis_team.as_str(),
            info.allies_team.as_str(),
            info.map_name.as_str(),
            info.match_date.as_str(),
        );
        let match_id = aggregator.result().id();
        let mut unknown_weapons = BTreeSet::new();
        let mut reviews = Vec::new();

        for (index, fields) in rows.into_iter().enumerate() {
            let mut record = parse_participant(index + 1, &fields)?;

            let outcome = self.classifier.classify(&mut record);
            unknown_weapons.extend(outcome.unknown_weapons);

            if outcome.spotting_armor {
                reviews.push(review(
                    &match_id,
                    &record,
                    ReviewReason::SpottingArmor,
                    Role::Unknown,
                ));
            }

            if let Some(decision) = self.policy.apply(&mut record, decider) {
                let item = review(&match_id, &record, decision.reason(), decision.original());
                let asked = decision.reason() == ReviewReason::LowConfidenceInfantry;
                reviews.push(item.with_asked(asked));
            }

            aggregator.fold(record);
        }

        if !unknown_weapons.is_empty() {
            let names: Vec<&str> = unknown_weapons.iter().map(String::as_str).collect();
            warn!("Unknown weapons: {}", names.join(", "));
        }

        let result = aggregator.finish();
        info!(
            "Analyzed {} participants for {} vs {} on {}",
            result.participant_count(),
            result.axis.team_name,
            result.allies.team_name,
            result.map_name
        );

        Ok(MatchAnalysis {
            result,
            unknown_weapons,
            reviews,
        })
    }

    pub fn analyze_csv(
        &self,
        path: &Path,
        info: &MatchInfo,
        decider: &mut dyn ArmorDecider,
    ) -> Result<MatchAnalysis, IngestError> {
        info!("Parsing file: {}", path.display());
        let rows = read_roster_csv(path)?;
        self.analyze_rows(rows, info, decider)
    }
}

fn review(
    match_id: &MatchId,
    record: &ParticipantRecord,
    reason: ReviewReason,
    original: Role,
) -> ReviewItem {
    ReviewItem::new(
        match_id.clone(),
        record.player_id.clone(),
        record.name.clone(),
        reason,
        original,
        record.role,
    )
}

//! Cumulative history records built from finalized matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Allegiance, EntityId, MatchId, ParticipantRecord, PerformanceId, PlayerId, Role};
use crate::calculate::format_kdr;

/// A recorded match (one results file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    /// Results file the match was recorded from; unique
    pub file_name: String,
    pub recorded_at: DateTime<Utc>,
    pub map_name: String,
    pub match_date: String,
    pub axis_team: String,
    pub allies_team: String,
    pub participant_count: u32,
}

/// One participant's line in one recorded match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPerformance {
    pub id: PerformanceId,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    /// None for spectators
    pub team_name: Option<String>,
    pub side: Allegiance,
    pub group: Role,
    pub kills: u32,
    pub deaths: u32,
    pub combat_effectiveness: u32,
    pub offensive_points: u32,
    pub defensive_points: u32,
    pub support_points: u32,
}

impl MatchPerformance {
    pub fn new(match_id: &MatchId, team_name: Option<String>, record: &ParticipantRecord) -> Self {
        let id = EntityId::generate(&[match_id.as_str(), record.player_id.as_str()]);
        let s = &record.stats;
        Self {
            id,
            match_id: match_id.clone(),
            player_id: record.player_id.clone(),
            team_name,
            side: record.side,
            group: record.role,
            kills: s.kills,
            deaths: s.deaths,
            combat_effectiveness: s.combat_effectiveness,
            offensive_points: s.offensive_points,
            defensive_points: s.defensive_points,
            support_points: s.support_points,
        }
    }
}

/// Lifetime totals for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub player_id: PlayerId,
    /// Most recently recorded name
    pub player_name: String,
    pub total_matches: u32,
    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_combat_effectiveness: u64,
    pub total_offensive_points: u64,
    pub total_defensive_points: u64,
    pub total_support_points: u64,
}

impl PlayerHistory {
    pub fn new(player_id: PlayerId, player_name: String) -> Self {
        Self {
            player_id,
            player_name,
            total_matches: 0,
            total_kills: 0,
            total_deaths: 0,
            total_combat_effectiveness: 0,
            total_offensive_points: 0,
            total_defensive_points: 0,
            total_support_points: 0,
        }
    }

    /// Add one match worth of numbers.
    pub fn add(&mut self, performance: &MatchPerformance) {
        self.total_matches += 1;
        self.total_kills += u64::from(performance.kills);
        self.total_deaths += u64::from(performance.deaths);
        self.total_combat_effectiveness += u64::from(performance.combat_effectiveness);
        self.total_offensive_points += u64::from(performance.offensive_points);
        self.total_defensive_points += u64::from(performance.defensive_points);
        self.total_support_points += u64::from(performance.support_points);
    }

    pub fn kdr(&self) -> String {
        format_kdr(self.total_kills, self.total_deaths)
    }
}

/// Matches played per team name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub matches_played: u32,
}

/// Times played per map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStats {
    pub name: String,
    pub times_played: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StatLine, WeaponCounts};

    fn record() -> ParticipantRecord {
        let mut r = ParticipantRecord::new(
            PlayerId::from("7656"),
            "Grekker".to_string(),
            StatLine {
                kills: 12,
                deaths: 4,
                combat_effectiveness: 80,
                offensive_points: 100,
                defensive_points: 60,
                support_points: 20,
            },
            WeaponCounts::new(),
            WeaponCounts::new(),
        );
        r.side = Allegiance::Axis;
        r.role = Role::Infantry;
        r
    }

    #[test]
    fn test_performance_from_record() {
        let p = MatchPerformance::new(&MatchId::from("m1"), Some("TL".to_string()), &record());
        assert_eq!(p.player_id.as_str(), "7656");
        assert_eq!(p.side, Allegiance::Axis);
        assert_eq!(p.group, Role::Infantry);
        assert_eq!(p.kills, 12);
        assert_eq!(p.team_name.as_deref(), Some("TL"));
    }

    #[test]
    fn test_performance_id_per_match() {
        let a = MatchPerformance::new(&MatchId::from("m1"), None, &record());
        let b = MatchPerformance::new(&MatchId::from("m2"), None, &record());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_player_history_accumulates() {
        let p = MatchPerformance::new(&MatchId::from("m1"), None, &record());
        let mut h = PlayerHistory::new(PlayerId::from("7656"), "Grekker".to_string());
        h.add(&p);
        h.add(&p);
        assert_eq!(h.total_matches, 2);
        assert_eq!(h.total_kills, 24);
        assert_eq!(h.total_deaths, 8);
        assert_eq!(h.kdr(), "3.00");
    }
}

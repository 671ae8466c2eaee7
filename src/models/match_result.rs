//! Hierarchical team/role statistics for one match.

use serde::{Deserialize, Serialize};

use super::{MatchId, ParticipantRecord, Role, Side};
use crate::calculate::format_kdr;

/// Running totals shared by team and role buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    #[serde(rename = "PlayerCount")]
    pub player_count: u32,
    #[serde(rename = "Kills")]
    pub kills: u64,
    #[serde(rename = "Deaths")]
    pub deaths: u64,
    #[serde(rename = "KDR")]
    pub kdr: String,
    #[serde(rename = "CombatEffectiveness")]
    pub combat_effectiveness: u64,
    #[serde(rename = "OffensivePoints")]
    pub offensive_points: u64,
    #[serde(rename = "DefensivePoints")]
    pub defensive_points: u64,
    #[serde(rename = "SupportPoints")]
    pub support_points: u64,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            player_count: 0,
            kills: 0,
            deaths: 0,
            kdr: format_kdr(0, 0),
            combat_effectiveness: 0,
            offensive_points: 0,
            defensive_points: 0,
            support_points: 0,
        }
    }
}

impl Tally {
    /// Add one participant's scoreboard numbers. Does not touch the KDR.
    pub fn add(&mut self, record: &ParticipantRecord) {
        let s = &record.stats;
        self.player_count += 1;
        self.kills += u64::from(s.kills);
        self.deaths += u64::from(s.deaths);
        self.combat_effectiveness += u64::from(s.combat_effectiveness);
        self.offensive_points += u64::from(s.offensive_points);
        self.defensive_points += u64::from(s.defensive_points);
        self.support_points += u64::from(s.support_points);
    }

    /// Recompute the KDR from the current kills and deaths.
    pub fn refresh_kdr(&mut self) {
        self.kdr = format_kdr(self.kills, self.deaths);
    }
}

/// A team's `Total` bucket: no player list, carries machine-gun kills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalBucket {
    #[serde(flatten)]
    pub tally: Tally,
    #[serde(rename = "MachineGunKills")]
    pub machine_gun_kills: u64,
}

/// A per-role bucket: carries the participants folded into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleBucket {
    #[serde(flatten)]
    pub tally: Tally,
    #[serde(rename = "Players")]
    pub players: Vec<ParticipantRecord>,
}

/// Statistics for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    #[serde(rename = "Team Name")]
    pub team_name: String,
    #[serde(rename = "Total")]
    pub total: TotalBucket,
    #[serde(rename = "Infantry")]
    pub infantry: RoleBucket,
    #[serde(rename = "Artillery")]
    pub artillery: RoleBucket,
    #[serde(rename = "Armor")]
    pub armor: RoleBucket,
    #[serde(rename = "Unknown")]
    pub unknown: RoleBucket,
}

impl TeamStats {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            total: TotalBucket::default(),
            infantry: RoleBucket::default(),
            artillery: RoleBucket::default(),
            armor: RoleBucket::default(),
            unknown: RoleBucket::default(),
        }
    }

    pub fn role(&self, role: Role) -> &RoleBucket {
        match role {
            Role::Infantry => &self.infantry,
            Role::Artillery => &self.artillery,
            Role::Armor => &self.armor,
            Role::Unknown => &self.unknown,
        }
    }

    pub fn role_mut(&mut self, role: Role) -> &mut RoleBucket {
        match role {
            Role::Infantry => &mut self.infantry,
            Role::Artillery => &mut self.artillery,
            Role::Armor => &mut self.armor,
            Role::Unknown => &mut self.unknown,
        }
    }

    /// Every tally of this team, `Total` first.
    pub fn tallies_mut(&mut self) -> [&mut Tally; 5] {
        [
            &mut self.total.tally,
            &mut self.infantry.tally,
            &mut self.artillery.tally,
            &mut self.armor.tally,
            &mut self.unknown.tally,
        ]
    }

    /// Participants of every role bucket, in role order.
    pub fn players(&self) -> impl Iterator<Item = &ParticipantRecord> {
        Role::ALL
            .into_iter()
            .flat_map(move |role| self.role(role).players.iter())
    }
}

/// The full per-match report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "Axis")]
    pub axis: TeamStats,
    #[serde(rename = "Allies")]
    pub allies: TeamStats,
    #[serde(rename = "Spectators")]
    pub spectators: Vec<ParticipantRecord>,
    #[serde(rename = "Map")]
    pub map_name: String,
    #[serde(rename = "Match Date")]
    pub match_date: String,
}

impl MatchResult {
    /// An empty report with zeroed buckets.
    pub fn new(
        axis_team: impl Into<String>,
        allies_team: impl Into<String>,
        map_name: impl Into<String>,
        match_date: impl Into<String>,
    ) -> Self {
        Self {
            axis: TeamStats::new(axis_team),
            allies: TeamStats::new(allies_team),
            spectators: Vec::new(),
            map_name: map_name.into(),
            match_date: match_date.into(),
        }
    }

    /// Deterministic ID from team names, map and date.
    pub fn id(&self) -> MatchId {
        MatchId::generate(&[
            &self.axis.team_name,
            &self.allies.team_name,
            &self.map_name,
            &self.match_date,
        ])
    }

    pub fn team(&self, side: Side) -> &TeamStats {
        match side {
            Side::Axis => &self.axis,
            Side::Allies => &self.allies,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut TeamStats {
        match side {
            Side::Axis => &mut self.axis,
            Side::Allies => &mut self.allies,
        }
    }

    /// Number of participants across both teams and the spectators.
    pub fn participant_count(&self) -> usize {
        Side::ALL
            .iter()
            .map(|s| self.team(*s).total.tally.player_count as usize)
            .sum::<usize>()
            + self.spectators.len()
    }

    /// Plain nested JSON mapping for serialization layers.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, StatLine, WeaponCounts};

    #[test]
    fn test_new_match_is_zeroed() {
        let m = MatchResult::new("Axis Team", "Allies Team", "Foy", "2024-09-14");
        for side in Side::ALL {
            let team = m.team(side);
            assert_eq!(team.total.tally, Tally::default());
            assert_eq!(team.total.machine_gun_kills, 0);
            for role in Role::ALL {
                assert_eq!(team.role(role).tally.player_count, 0);
                assert!(team.role(role).players.is_empty());
            }
        }
        assert_eq!(m.participant_count(), 0);
        assert_eq!(m.axis.team_name, "Axis Team");
        assert_eq!(m.allies.team_name, "Allies Team");
    }

    #[test]
    fn test_match_id_deterministic() {
        let a = MatchResult::new("A", "B", "Foy", "2024-09-14");
        let b = MatchResult::new("A", "B", "Foy", "2024-09-14");
        let c = MatchResult::new("B", "A", "Foy", "2024-09-14");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_tally_add() {
        let record = ParticipantRecord::new(
            PlayerId::from("1"),
            "p".to_string(),
            StatLine {
                kills: 4,
                deaths: 2,
                combat_effectiveness: 30,
                offensive_points: 10,
                defensive_points: 20,
                support_points: 5,
            },
            WeaponCounts::new(),
            WeaponCounts::new(),
        );
        let mut t = Tally::default();
        t.add(&record);
        t.add(&record);
        assert_eq!(t.player_count, 2);
        assert_eq!(t.kills, 8);
        assert_eq!(t.deaths, 4);
        assert_eq!(t.support_points, 10);
        assert_eq!(t.kdr, "0.00");
        t.refresh_kdr();
        assert_eq!(t.kdr, "2.00");
    }

    #[test]
    fn test_bucket_shapes_in_json() {
        let m = MatchResult::new("Axis Team", "Allies Team", "Foy", "2024-09-14");
        let v = m.to_value().unwrap();

        assert_eq!(v["Map"], "Foy");
        assert_eq!(v["Match Date"], "2024-09-14");
        assert_eq!(v["Axis"]["Team Name"], "Axis Team");
        assert!(v["Axis"]["Total"].get("MachineGunKills").is_some());
        assert!(v["Axis"]["Total"].get("Players").is_none());
        assert!(v["Allies"]["Armor"].get("Players").is_some());
        assert!(v["Allies"]["Armor"].get("MachineGunKills").is_none());
        assert!(v["Spectators"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_match_result_json_roundtrip() {
        let m = MatchResult::new("Axis Team", "Allies Team", "Foy", "2024-09-14");
        let json = serde_json::to_string(&m).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}

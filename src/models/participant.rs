//! One participant of a match, as exported by the server and classified by us.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Allegiance, PlayerId, Role, RoleLikelihood, SideLikelihood};
use crate::calculate::format_kdr;

/// Weapon name to count (kills with it, or deaths by it).
pub type WeaponCounts = BTreeMap<String, u32>;

/// Scoreboard numbers for one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(rename = "Kills")]
    pub kills: u32,
    #[serde(rename = "Deaths")]
    pub deaths: u32,
    #[serde(rename = "CombatEffectiveness")]
    pub combat_effectiveness: u32,
    #[serde(rename = "OffensivePoints")]
    pub offensive_points: u32,
    #[serde(rename = "DefensivePoints")]
    pub defensive_points: u32,
    #[serde(rename = "SupportPoints")]
    pub support_points: u32,
}

/// A participant row with its derived classification.
///
/// Built from a roster row, scored and resolved by the classifier, possibly
/// adjusted by the disambiguation policy, then moved into the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(rename = "PlayerID")]
    pub player_id: PlayerId,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(flatten)]
    pub stats: StatLine,

    /// Kills / max(deaths, 1), two decimals
    #[serde(rename = "KDR")]
    pub kdr: String,

    #[serde(rename = "Weapons")]
    pub weapons: WeaponCounts,

    #[serde(rename = "DeathByWeapons")]
    pub death_by_weapons: WeaponCounts,

    #[serde(rename = "MachineGunKills", default)]
    pub machine_gun_kills: u32,

    #[serde(rename = "sideLikelihood", default)]
    pub side_likelihood: SideLikelihood,

    #[serde(rename = "groupLikelihood", default)]
    pub role_likelihood: RoleLikelihood,

    #[serde(rename = "Side", default)]
    pub side: Allegiance,

    #[serde(rename = "Group", default)]
    pub role: Role,
}

impl ParticipantRecord {
    /// Create an unclassified record. The stored death count is kept as-is;
    /// only the ratio treats zero deaths as one.
    pub fn new(
        player_id: PlayerId,
        name: String,
        stats: StatLine,
        weapons: WeaponCounts,
        death_by_weapons: WeaponCounts,
    ) -> Self {
        let kdr = format_kdr(u64::from(stats.kills), u64::from(stats.deaths));
        Self {
            player_id,
            name,
            stats,
            kdr,
            weapons,
            death_by_weapons,
            machine_gun_kills: 0,
            side_likelihood: SideLikelihood::default(),
            role_likelihood: RoleLikelihood::default(),
            side: Allegiance::Spectators,
            role: Role::Unknown,
        }
    }

    /// Weapons sorted by kill count (descending), then name, truncated to `limit`.
    pub fn top_weapons(&self, limit: usize) -> Vec<(String, u32)> {
        let mut weapons: Vec<(String, u32)> = self
            .weapons
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        weapons.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        weapons.truncate(limit);
        weapons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kills: u32, deaths: u32) -> ParticipantRecord {
        ParticipantRecord::new(
            PlayerId::from("7656"),
            "Grekker".to_string(),
            StatLine {
                kills,
                deaths,
                ..Default::default()
            },
            WeaponCounts::new(),
            WeaponCounts::new(),
        )
    }

    #[test]
    fn test_new_record_is_unclassified() {
        let r = record(3, 1);
        assert_eq!(r.side, Allegiance::Spectators);
        assert_eq!(r.role, Role::Unknown);
        assert_eq!(r.machine_gun_kills, 0);
    }

    #[test]
    fn test_kdr_zero_deaths_keeps_stored_deaths() {
        let r = record(10, 0);
        assert_eq!(r.kdr, "10.00");
        assert_eq!(r.stats.deaths, 0);
    }

    #[test]
    fn test_kdr_two_decimals() {
        assert_eq!(record(7, 2).kdr, "3.50");
        assert_eq!(record(1, 3).kdr, "0.33");
        assert_eq!(record(0, 0).kdr, "0.00");
    }

    #[test]
    fn test_top_weapons_ordering() {
        let mut r = record(0, 0);
        r.weapons.insert("MP40".to_string(), 4);
        r.weapons.insert("KARABINER 98K".to_string(), 9);
        r.weapons.insert("LUGER P08".to_string(), 4);

        let top = r.top_weapons(2);
        assert_eq!(
            top,
            vec![
                ("KARABINER 98K".to_string(), 9),
                ("LUGER P08".to_string(), 4)
            ]
        );
    }

    #[test]
    fn test_serialization_uses_report_keys() {
        let json = serde_json::to_value(record(5, 2)).unwrap();
        assert_eq!(json["PlayerID"], "7656");
        assert_eq!(json["Kills"], 5);
        assert_eq!(json["KDR"], "2.50");
        assert_eq!(json["Side"], "Spectators");
        assert_eq!(json["Group"], "Unknown");
        assert!(json.get("sideLikelihood").is_some());
        assert!(json.get("groupLikelihood").is_some());
    }

    #[test]
    fn test_deserialization_roundtrip() {
        let r = record(5, 2);
        let json = serde_json::to_string(&r).unwrap();
        let back: ParticipantRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}

//! Disambiguation policy: forced armor overrides and the low-confidence
//! infantry check.
//!
//! The policy itself holds no mutable state. The only outside interaction is
//! the [`ArmorDecider`] call, which blocks until an answer is supplied.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::config::ClassifierConfig;
use crate::models::{ParticipantRecord, PlayerId, ReviewReason, Role};

/// Evidence shown when asking whether a participant is really armor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub kills: u32,
    pub deaths: u32,
    pub kdr: String,
    pub combat_effectiveness: u32,
    pub infantry_evidence: u32,
    /// Highest kill counts first
    pub top_weapons: Vec<(String, u32)>,
}

impl ParticipantSummary {
    pub fn from_record(record: &ParticipantRecord, top_weapons: usize) -> Self {
        Self {
            player_id: record.player_id.clone(),
            name: record.name.clone(),
            kills: record.stats.kills,
            deaths: record.stats.deaths,
            kdr: record.kdr.clone(),
            combat_effectiveness: record.stats.combat_effectiveness,
            infantry_evidence: record.role_likelihood.infantry,
            top_weapons: record.top_weapons(top_weapons),
        }
    }
}

impl fmt::Display for ParticipantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} kills / {} deaths (KDR {}), combat effectiveness {}",
            self.name, self.player_id, self.kills, self.deaths, self.kdr, self.combat_effectiveness
        )?;
        if !self.top_weapons.is_empty() {
            let weapons: Vec<String> = self
                .top_weapons
                .iter()
                .map(|(w, c)| format!("{w} x{c}"))
                .collect();
            write!(f, "; top weapons: {}", weapons.join(", "))?;
        }
        Ok(())
    }
}

/// Answers "is this participant actually armor?".
pub trait ArmorDecider {
    fn ask_is_armor(&mut self, summary: &ParticipantSummary) -> bool;
}

impl<F> ArmorDecider for F
where
    F: FnMut(&ParticipantSummary) -> bool,
{
    fn ask_is_armor(&mut self, summary: &ParticipantSummary) -> bool {
        self(summary)
    }
}

/// Never reclassifies.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNo;

impl ArmorDecider for AlwaysNo {
    fn ask_is_armor(&mut self, _summary: &ParticipantSummary) -> bool {
        false
    }
}

/// Always reclassifies.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysYes;

impl ArmorDecider for AlwaysYes {
    fn ask_is_armor(&mut self, _summary: &ParticipantSummary) -> bool {
        true
    }
}

/// Canned answers per player, with a fallback. Records who was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecider {
    answers: HashMap<PlayerId, bool>,
    default: bool,
    asked: Vec<PlayerId>,
}

impl ScriptedDecider {
    pub fn new(default: bool) -> Self {
        Self {
            answers: HashMap::new(),
            default,
            asked: Vec::new(),
        }
    }

    /// Builder method to set the answer for one player.
    pub fn with_answer(mut self, player_id: impl Into<PlayerId>, is_armor: bool) -> Self {
        self.answers.insert(player_id.into(), is_armor);
        self
    }

    /// Players asked so far, in order.
    pub fn asked(&self) -> &[PlayerId] {
        &self.asked
    }
}

impl ArmorDecider for ScriptedDecider {
    fn ask_is_armor(&mut self, summary: &ParticipantSummary) -> bool {
        self.asked.push(summary.player_id.clone());
        self.answers
            .get(&summary.player_id)
            .copied()
            .unwrap_or(self.default)
    }
}

/// What the policy did to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Player was on the override list
    Override { original: Role },
    /// Decider was asked; `is_armor` is its answer
    Asked { original: Role, is_armor: bool },
}

impl PolicyDecision {
    pub fn reason(&self) -> ReviewReason {
        match self {
            PolicyDecision::Override { .. } => ReviewReason::ForcedOverride,
            PolicyDecision::Asked { .. } => ReviewReason::LowConfidenceInfantry,
        }
    }

    pub fn original(&self) -> Role {
        match self {
            PolicyDecision::Override { original } | PolicyDecision::Asked { original, .. } => {
                *original
            }
        }
    }
}

/// Rules applied after classification, in order:
/// 1. overridden player IDs become Armor (and nothing else is checked)
/// 2. Infantry with high effectiveness and little infantry evidence is
///    put to the decider
#[derive(Debug, Clone)]
pub struct DisambiguationPolicy {
    overrides: HashSet<PlayerId>,
    low_confidence_effectiveness: u32,
    low_confidence_infantry_max: u32,
    summary_top_weapons: usize,
}

impl DisambiguationPolicy {
    pub fn new(overrides: impl IntoIterator<Item = PlayerId>, config: &ClassifierConfig) -> Self {
        Self {
            overrides: overrides.into_iter().collect(),
            low_confidence_effectiveness: config.low_confidence_effectiveness,
            low_confidence_infantry_max: config.low_confidence_infantry_max,
            summary_top_weapons: config.summary_top_weapons,
        }
    }

    pub fn overrides(&self) -> &HashSet<PlayerId> {
        &self.overrides
    }

    /// Infantry whose effectiveness is too high for the infantry evidence.
    pub fn is_low_confidence(&self, record: &ParticipantRecord) -> bool {
        record.role == Role::Infantry
            && record.stats.combat_effectiveness > self.low_confidence_effectiveness
            && record.role_likelihood.infantry < self.low_confidence_infantry_max
    }

    /// Apply the rules to a classified record.
    pub fn apply(
        &self,
        record: &mut ParticipantRecord,
        decider: &mut dyn ArmorDecider,
    ) -> Option<PolicyDecision> {
        let original = record.role;

        if self.overrides.contains(&record.player_id) {
            record.role = Role::Armor;
            info!("Setting {} to Armor because of override", record.name);
            return Some(PolicyDecision::Override { original });
        }

        if !self.is_low_confidence(record) {
            return None;
        }

        let summary = ParticipantSummary::from_record(record, self.summary_top_weapons);
        let is_armor = decider.ask_is_armor(&summary);
        if is_armor {
            record.role = Role::Armor;
            info!("Setting {} to Armor after review", record.name);
        } else {
            info!("Keeping {} as Infantry after review", record.name);
        }

        Some(PolicyDecision::Asked { original, is_armor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WeaponCatalog;
    use crate::classify::Classifier;
    use crate::models::{StatLine, WeaponCounts};

    fn record(id: &str, ce: u32, weapons: &[(&str, u32)]) -> ParticipantRecord {
        let mut r = ParticipantRecord::new(
            PlayerId::from(id),
            format!("player-{id}"),
            StatLine {
                kills: weapons.iter().map(|(_, c)| c).sum(),
                deaths: 0,
                combat_effectiveness: ce,
                ..Default::default()
            },
            weapons.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            WeaponCounts::new(),
        );
        let catalog = WeaponCatalog::builtin();
        Classifier::new(&catalog, &ClassifierConfig::default()).classify(&mut r);
        r
    }

    fn policy(overrides: &[&str]) -> DisambiguationPolicy {
        DisambiguationPolicy::new(
            overrides.iter().map(|s| PlayerId::from(*s)),
            &ClassifierConfig::default(),
        )
    }

    #[test]
    fn test_override_wins_without_asking() {
        let mut r = record("tank", 1000, &[("MP40", 1)]);
        assert_eq!(r.role, Role::Infantry);

        let mut decider = ScriptedDecider::new(false);
        let decision = policy(&["tank"]).apply(&mut r, &mut decider);

        assert_eq!(r.role, Role::Armor);
        assert_eq!(
            decision,
            Some(PolicyDecision::Override {
                original: Role::Infantry
            })
        );
        assert!(decider.asked().is_empty());
    }

    #[test]
    fn test_override_applies_to_any_role() {
        let mut r = record("arty", 50, &[("150MM HOWITZER [sFH 18]", 9)]);
        let decision = policy(&["arty"]).apply(&mut r, &mut AlwaysNo);
        assert_eq!(r.role, Role::Armor);
        assert_eq!(decision.unwrap().reason(), ReviewReason::ForcedOverride);
    }

    #[test]
    fn test_low_confidence_asks_and_flips_on_yes() {
        // 18 kills with an uncatalogued tank gun, 2 with a pistol
        let mut r = record("p1", 350, &[("unrecognized_tank_gun", 18), ("LUGER P08", 2)]);
        assert_eq!(r.role, Role::Infantry);
        assert_eq!(r.role_likelihood.infantry, 2);

        let mut decider = ScriptedDecider::new(false).with_answer("p1", true);
        let decision = policy(&[]).apply(&mut r, &mut decider);

        assert_eq!(r.role, Role::Armor);
        assert_eq!(decider.asked(), &[PlayerId::from("p1")]);
        assert_eq!(
            decision,
            Some(PolicyDecision::Asked {
                original: Role::Infantry,
                is_armor: true
            })
        );
    }

    #[test]
    fn test_low_confidence_no_keeps_infantry() {
        let mut r = record("p1", 350, &[("LUGER P08", 2)]);
        let decision = policy(&[]).apply(&mut r, &mut AlwaysNo);

        assert_eq!(r.role, Role::Infantry);
        assert_eq!(
            decision,
            Some(PolicyDecision::Asked {
                original: Role::Infantry,
                is_armor: false
            })
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let p = policy(&[]);
        let mut asked = 0;
        let mut counter = |_: &ParticipantSummary| {
            asked += 1;
            true
        };

        // effectiveness exactly 300
        let mut r = record("a", 300, &[("MP40", 1)]);
        assert!(p.apply(&mut r, &mut counter).is_none());

        // infantry evidence exactly 15
        let mut r = record("b", 900, &[("MP40", 15)]);
        assert!(p.apply(&mut r, &mut counter).is_none());

        // 14 is below the limit
        let mut r = record("c", 900, &[("MP40", 14)]);
        assert!(p.apply(&mut r, &mut counter).is_some());

        assert_eq!(asked, 1);
    }

    #[test]
    fn test_non_infantry_is_never_asked() {
        let mut r = record("armor", 900, &[("Sd.Kfz.161 Panzer IV", 1)]);
        let mut decider = ScriptedDecider::new(true);
        assert!(policy(&[]).apply(&mut r, &mut decider).is_none());
        assert!(decider.asked().is_empty());
        assert_eq!(r.role, Role::Armor);
    }

    #[test]
    fn test_summary_contents() {
        let r = record("p1", 350, &[("unrecognized_tank_gun", 18), ("LUGER P08", 2)]);
        let summary = ParticipantSummary::from_record(&r, 5);

        assert_eq!(summary.kills, 20);
        assert_eq!(summary.deaths, 0);
        assert_eq!(summary.kdr, "20.00");
        assert_eq!(summary.infantry_evidence, 2);
        assert_eq!(summary.top_weapons[0], ("unrecognized_tank_gun".to_string(), 18));

        let text = summary.to_string();
        assert!(text.contains("player-p1"));
        assert!(text.contains("unrecognized_tank_gun x18"));
    }
}

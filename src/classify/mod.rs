//! Participant classification.
//!
//! Infers side and role from weapon evidence:
//! - kills with a catalogued weapon count toward that weapon's side and role
//! - deaths by a catalogued weapon count toward the *opposite* side only
//! - machine-gun kills are tallied separately, catalogued or not
//!
//! The [`policy`] module then applies overrides and asks about
//! low-confidence infantry.

pub mod policy;

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::WeaponCatalog;
use crate::config::ClassifierConfig;
use crate::models::{ParticipantRecord, Role, RoleLikelihood, SideLikelihood};

pub use policy::{
    AlwaysNo, AlwaysYes, ArmorDecider, DisambiguationPolicy, ParticipantSummary, PolicyDecision,
    ScriptedDecider,
};

/// What classification learned besides the record's own fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOutcome {
    /// Weapon names the catalog does not know
    pub unknown_weapons: BTreeSet<String>,
    /// Role was Unknown and was moved to Armor on effectiveness alone
    pub spotting_armor: bool,
}

/// Scores and resolves participants against a weapon catalog.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    catalog: &'a WeaponCatalog,
    spotting_armor_effectiveness: u32,
}

impl<'a> Classifier<'a> {
    pub fn new(catalog: &'a WeaponCatalog, config: &ClassifierConfig) -> Self {
        Self {
            catalog,
            spotting_armor_effectiveness: config.spotting_armor_effectiveness,
        }
    }

    /// Recompute machine-gun kills and both likelihoods from the weapon maps.
    /// Returns the weapon names the catalog did not recognise.
    pub fn score(&self, record: &mut ParticipantRecord) -> BTreeSet<String> {
        let mut unknown = BTreeSet::new();
        let mut side_likelihood = SideLikelihood::default();
        let mut role_likelihood = RoleLikelihood::default();
        let mut machine_gun_kills: u32 = 0;

        for (weapon, &count) in &record.weapons {
            match self.catalog.lookup(weapon) {
                Some(entry) => {
                    side_likelihood.add(entry.side, count);
                    role_likelihood.add(entry.role, count);
                }
                None => {
                    unknown.insert(weapon.clone());
                }
            }
            if self.catalog.is_machine_gun(weapon) {
                machine_gun_kills = machine_gun_kills.saturating_add(count);
            }
        }

        for (weapon, &count) in &record.death_by_weapons {
            match self.catalog.lookup(weapon) {
                Some(entry) => side_likelihood.add(entry.side.opposite(), count),
                None => {
                    unknown.insert(weapon.clone());
                }
            }
        }

        record.side_likelihood = side_likelihood;
        record.role_likelihood = role_likelihood;
        record.machine_gun_kills = machine_gun_kills;
        unknown
    }

    /// Score, resolve side and role, and apply the spotting-armor correction.
    pub fn classify(&self, record: &mut ParticipantRecord) -> ClassifyOutcome {
        let unknown_weapons = self.score(record);

        record.side = record.side_likelihood.resolve();
        record.role = record.role_likelihood.resolve();

        // Armor spotters rarely get kills but do earn effectiveness.
        let spotting_armor = record.role == Role::Unknown
            && record.stats.combat_effectiveness > self.spotting_armor_effectiveness;
        if spotting_armor {
            record.role = Role::Armor;
        }

        debug!(
            "Classified {} as {} {} (side {:?}, role {:?})",
            record.name, record.side, record.role, record.side_likelihood, record.role_likelihood
        );

        ClassifyOutcome {
            unknown_weapons,
            spotting_armor,
        }
    }
}

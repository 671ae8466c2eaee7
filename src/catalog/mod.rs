//! Weapon catalog.
//!
//! Read-only lookup from a kill-feed weapon name to the side, faction and
//! role it belongs to, plus the set of machine guns. Built once at startup
//! from the built-in table, optionally extended from a TOML file.

mod data;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Role, Side};

/// Errors loading catalog extensions.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog extension: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog extension: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Weapon '{0}' cannot be catalogued with role Unknown")]
    UnknownRole(String),
}

/// Reference facts about one weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponEntry {
    pub id: String,
    pub side: Side,
    pub faction: String,
    pub role: Role,
}

/// Shape of a catalog extension file.
#[derive(Debug, Default, Deserialize)]
struct CatalogExtension {
    #[serde(default, rename = "weapon")]
    weapons: Vec<WeaponEntry>,

    #[serde(default)]
    machine_guns: Vec<String>,
}

/// Immutable weapon catalog.
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    weapons: HashMap<String, WeaponEntry>,
    machine_guns: HashSet<String>,
}

impl WeaponCatalog {
    /// Catalog with the built-in weapon table.
    pub fn builtin() -> Self {
        let weapons = data::WEAPONS
            .iter()
            .map(|(id, side, faction, role)| {
                (
                    id.to_string(),
                    WeaponEntry {
                        id: id.to_string(),
                        side: *side,
                        faction: faction.to_string(),
                        role: *role,
                    },
                )
            })
            .collect();
        let machine_guns = data::MACHINE_GUNS.iter().map(|s| s.to_string()).collect();

        Self {
            weapons,
            machine_guns,
        }
    }

    /// Built-in catalog extended with the entries of a TOML file.
    pub fn builtin_with_extensions(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::builtin().extend_from_toml(&contents)?;
        info!(
            "Loaded weapon catalog extensions from {:?} ({} weapons total)",
            path,
            catalog.len()
        );
        Ok(catalog)
    }

    /// Add entries from TOML text. Entries replace built-ins with the same id.
    pub fn extend_from_toml(mut self, contents: &str) -> Result<Self, CatalogError> {
        let ext: CatalogExtension = toml::from_str(contents)?;

        for entry in ext.weapons {
            if entry.role == Role::Unknown {
                return Err(CatalogError::UnknownRole(entry.id));
            }
            debug!("Catalog extension: {} -> {} {}", entry.id, entry.side, entry.role);
            self.weapons.insert(entry.id.clone(), entry);
        }
        self.machine_guns.extend(ext.machine_guns);

        Ok(self)
    }

    /// Look up a weapon. Unknown names (including "") return None.
    pub fn lookup(&self, weapon_id: &str) -> Option<&WeaponEntry> {
        self.weapons.get(weapon_id)
    }

    pub fn is_machine_gun(&self, weapon_id: &str) -> bool {
        self.machine_guns.contains(weapon_id)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// All entries sorted by id.
    pub fn entries(&self) -> Vec<&WeaponEntry> {
        let mut entries: Vec<_> = self.weapons.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }
}

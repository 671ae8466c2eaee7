//! Sides, roles and the likelihood scores used to infer them.

use serde::{Deserialize, Serialize};

/// One of the two opposing teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Axis,
    Allies,
}

impl Side {
    /// Both teams in report order.
    pub const ALL: [Side; 2] = [Side::Axis, Side::Allies];

    /// The opposing team.
    pub fn opposite(self) -> Self {
        match self {
            Side::Axis => Side::Allies,
            Side::Allies => Side::Axis,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Axis => write!(f, "Axis"),
            Side::Allies => write!(f, "Allies"),
        }
    }
}

/// Resolved side of a participant: a team, or a spectator when no weapon
/// evidence points either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Allegiance {
    Axis,
    Allies,
    #[default]
    Spectators,
}

impl Allegiance {
    /// The team, if this is not a spectator.
    pub fn side(self) -> Option<Side> {
        match self {
            Allegiance::Axis => Some(Side::Axis),
            Allegiance::Allies => Some(Side::Allies),
            Allegiance::Spectators => None,
        }
    }
}

impl From<Side> for Allegiance {
    fn from(side: Side) -> Self {
        match side {
            Side::Axis => Allegiance::Axis,
            Side::Allies => Allegiance::Allies,
        }
    }
}

impl std::fmt::Display for Allegiance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Allegiance::Axis => write!(f, "Axis"),
            Allegiance::Allies => write!(f, "Allies"),
            Allegiance::Spectators => write!(f, "Spectators"),
        }
    }
}

/// Combat role ("group" in the exported reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Role {
    Infantry,
    Artillery,
    Armor,
    #[default]
    Unknown,
}

impl Role {
    /// Roles that weapons can be evidence for, in canonical tie-break order.
    pub const SCORED: [Role; 3] = [Role::Infantry, Role::Artillery, Role::Armor];

    /// Every role bucket of a team.
    pub const ALL: [Role; 4] = [Role::Infantry, Role::Artillery, Role::Armor, Role::Unknown];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Infantry => write!(f, "Infantry"),
            Role::Artillery => write!(f, "Artillery"),
            Role::Armor => write!(f, "Armor"),
            Role::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Accumulated evidence for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideLikelihood {
    #[serde(rename = "Axis")]
    pub axis: u32,
    #[serde(rename = "Allies")]
    pub allies: u32,
}

impl SideLikelihood {
    pub fn add(&mut self, side: Side, count: u32) {
        let slot = match side {
            Side::Axis => &mut self.axis,
            Side::Allies => &mut self.allies,
        };
        *slot = slot.saturating_add(count);
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Axis => self.axis,
            Side::Allies => self.allies,
        }
    }

    /// Spectators when there is no evidence at all; otherwise the side with
    /// strictly more evidence. Equal evidence resolves to Axis.
    pub fn resolve(&self) -> Allegiance {
        if self.axis == 0 && self.allies == 0 {
            Allegiance::Spectators
        } else if self.allies > self.axis {
            Allegiance::Allies
        } else {
            Allegiance::Axis
        }
    }
}

/// Accumulated evidence for each scored role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleLikelihood {
    #[serde(rename = "Infantry")]
    pub infantry: u32,
    #[serde(rename = "Artillery")]
    pub artillery: u32,
    #[serde(rename = "Armor")]
    pub armor: u32,
}

impl RoleLikelihood {
    /// Add evidence for a role. `Role::Unknown` carries no evidence and is ignored.
    pub fn add(&mut self, role: Role, count: u32) {
        let slot = match role {
            Role::Infantry => &mut self.infantry,
            Role::Artillery => &mut self.artillery,
            Role::Armor => &mut self.armor,
            Role::Unknown => return,
        };
        *slot = slot.saturating_add(count);
    }

    pub fn get(&self, role: Role) -> u32 {
        match role {
            Role::Infantry => self.infantry,
            Role::Artillery => self.artillery,
            Role::Armor => self.armor,
            Role::Unknown => 0,
        }
    }

    /// The role with the greatest evidence, first in `Role::SCORED` order on
    /// ties. `Unknown` when there is no evidence.
    pub fn resolve(&self) -> Role {
        let mut best = Role::Unknown;
        let mut best_count = 0;
        for role in Role::SCORED {
            let count = self.get(role);
            if count > best_count {
                best = role;
                best_count = count;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Axis.opposite(), Side::Allies);
        assert_eq!(Side::Allies.opposite(), Side::Axis);
    }

    #[test]
    fn test_side_likelihood_no_evidence_is_spectator() {
        assert_eq!(SideLikelihood::default().resolve(), Allegiance::Spectators);
    }

    #[test]
    fn test_side_likelihood_strict_majority() {
        let mut l = SideLikelihood::default();
        l.add(Side::Allies, 3);
        l.add(Side::Axis, 2);
        assert_eq!(l.resolve(), Allegiance::Allies);

        l.add(Side::Axis, 5);
        assert_eq!(l.resolve(), Allegiance::Axis);
    }

    // Equal evidence goes to Axis. Kept as observed in the reference exports.
    #[test]
    fn test_side_likelihood_tie_resolves_to_axis() {
        let l = SideLikelihood { axis: 4, allies: 4 };
        assert_eq!(l.resolve(), Allegiance::Axis);
    }

    #[test]
    fn test_role_likelihood_no_evidence_is_unknown() {
        assert_eq!(RoleLikelihood::default().resolve(), Role::Unknown);
    }

    #[test]
    fn test_role_likelihood_max_wins() {
        let l = RoleLikelihood {
            infantry: 2,
            artillery: 9,
            armor: 3,
        };
        assert_eq!(l.resolve(), Role::Artillery);
    }

    // Ties take the first role in Infantry, Artillery, Armor order.
    #[test]
    fn test_role_likelihood_tie_takes_canonical_first() {
        let l = RoleLikelihood {
            infantry: 0,
            artillery: 5,
            armor: 5,
        };
        assert_eq!(l.resolve(), Role::Artillery);

        let l = RoleLikelihood {
            infantry: 5,
            artillery: 0,
            armor: 5,
        };
        assert_eq!(l.resolve(), Role::Infantry);
    }

    #[test]
    fn test_role_likelihood_ignores_unknown() {
        let mut l = RoleLikelihood::default();
        l.add(Role::Unknown, 10);
        assert_eq!(l, RoleLikelihood::default());
    }

    #[test]
    fn test_likelihood_serialization_keys() {
        let json = serde_json::to_value(SideLikelihood { axis: 1, allies: 2 }).unwrap();
        assert_eq!(json["Axis"], 1);
        assert_eq!(json["Allies"], 2);

        let json = serde_json::to_value(RoleLikelihood {
            infantry: 1,
            artillery: 0,
            armor: 3,
        })
        .unwrap();
        assert_eq!(json["Infantry"], 1);
        assert_eq!(json["Armor"], 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Allegiance::Spectators), "Spectators");
        assert_eq!(format!("{}", Role::Armor), "Armor");
        assert_eq!(serde_json::to_string(&Role::Unknown).unwrap(), "\"Unknown\"");
    }
}

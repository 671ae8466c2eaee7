//! Folds classified participants into a match report.

use tracing::debug;

use crate::models::{Allegiance, MatchResult, ParticipantRecord};

/// Lifecycle of an aggregated match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Constructed, nothing folded
    Empty,
    /// At least one fold since construction or the last finalize; KDRs are stale
    Accumulating,
    /// KDRs match the current totals
    Finalized,
}

/// Owns a [`MatchResult`] while it is being built.
///
/// Each participant must be folded exactly once; there is no dedup.
#[derive(Debug, Clone)]
pub struct MatchAggregator {
    result: MatchResult,
    state: AggregatorState,
}

impl MatchAggregator {
    pub fn new(
        axis_team: impl Into<String>,
        allies_team: impl Into<String>,
        map_name: impl Into<String>,
        match_date: impl Into<String>,
    ) -> Self {
        Self {
            result: MatchResult::new(axis_team, allies_team, map_name, match_date),
            state: AggregatorState::Empty,
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Whether the KDRs are out of date with the totals.
    pub fn is_stale(&self) -> bool {
        self.state == AggregatorState::Accumulating
    }

    /// Read access to the report. KDRs are only current when not stale.
    pub fn result(&self) -> &MatchResult {
        &self.result
    }

    /// Add one classified participant.
    pub fn fold(&mut self, record: ParticipantRecord) {
        if self.state == AggregatorState::Finalized {
            debug!("Fold after finalize; KDRs need recomputing");
        }
        self.state = AggregatorState::Accumulating;

        let Some(side) = record.side.side() else {
            debug_assert_eq!(record.side, Allegiance::Spectators);
            self.result.spectators.push(record);
            return;
        };

        let team = self.result.team_mut(side);
        team.total.tally.add(&record);
        team.total.machine_gun_kills += u64::from(record.machine_gun_kills);

        let bucket = team.role_mut(record.role);
        bucket.tally.add(&record);
        bucket.players.push(record);
    }

    /// Recompute every bucket's KDR. Idempotent.
    pub fn finalize(&mut self) {
        for team in [&mut self.result.axis, &mut self.result.allies] {
            for tally in team.tallies_mut() {
                tally.refresh_kdr();
            }
        }
        self.state = AggregatorState::Finalized;
    }

    /// Finalize if needed and hand off the report.
    pub fn finish(mut self) -> MatchResult {
        if self.state != AggregatorState::Finalized {
            self.finalize();
        }
        self.result
    }
}

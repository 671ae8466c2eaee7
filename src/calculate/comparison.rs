//! Axis vs Allies comparison series, the feed for comparison charts.

use serde::Serialize;

use crate::models::{MatchResult, Role, Side, Tally};

/// Categories compared, in chart order.
pub const COMPARISON_CATEGORIES: [&str; 4] = ["Total", "Infantry", "Armor", "Artillery"];

/// Metrics compared per category, in chart order.
pub const COMPARISON_METRICS: [&str; 6] = [
    "Kills",
    "Deaths",
    "CombatEffectiveness",
    "OffensivePoints",
    "DefensivePoints",
    "SupportPoints",
];

/// One metric for both teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricPair {
    pub metric: String,
    pub axis: u64,
    pub allies: u64,
}

/// All metrics for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryComparison {
    pub category: String,
    pub metrics: Vec<MetricPair>,
}

/// Side-by-side comparison of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideComparison {
    pub title: String,
    pub axis_team: String,
    pub allies_team: String,
    pub categories: Vec<CategoryComparison>,
}

fn metric_value(tally: &Tally, metric: &str) -> u64 {
    match metric {
        "Kills" => tally.kills,
        "Deaths" => tally.deaths,
        "CombatEffectiveness" => tally.combat_effectiveness,
        "OffensivePoints" => tally.offensive_points,
        "DefensivePoints" => tally.defensive_points,
        "SupportPoints" => tally.support_points,
        _ => 0,
    }
}

fn category_tally<'a>(result: &'a MatchResult, side: Side, category: &str) -> &'a Tally {
    let team = result.team(side);
    match category {
        "Infantry" => &team.role(Role::Infantry).tally,
        "Armor" => &team.role(Role::Armor).tally,
        "Artillery" => &team.role(Role::Artillery).tally,
        _ => &team.total.tally,
    }
}

/// Build the comparison series for a finalized match.
pub fn side_comparison(result: &MatchResult) -> SideComparison {
    let categories = COMPARISON_CATEGORIES
        .iter()
        .map(|category| {
            let axis = category_tally(result, Side::Axis, category);
            let allies = category_tally(result, Side::Allies, category);
            CategoryComparison {
                category: category.to_string(),
                metrics: COMPARISON_METRICS
                    .iter()
                    .map(|metric| MetricPair {
                        metric: metric.to_string(),
                        axis: metric_value(axis, metric),
                        allies: metric_value(allies, metric),
                    })
                    .collect(),
            }
        })
        .collect();

    SideComparison {
        title: format!(
            "{} vs {} Comprehensive Comparison",
            result.axis.team_name, result.allies.team_name
        ),
        axis_team: result.axis.team_name.clone(),
        allies_team: result.allies.team_name.clone(),
        categories,
    }
}

//! Builders mapping aggregate rows onto chart specifications.

use crate::config::DisplayConfig;
use crate::engine::aggregate::{self, AggregateRow};
use crate::engine::partition::{FlaggedSplit, ReinstatementComparison};
use crate::engine::regions::StateAggregate;

use super::fmt;
use super::spec::{
    ChoroplethSpec, GroupedBarSpec, GroupedDatum, MapTile, Mark, RankedDatum, RankedSpec,
};

/// Fixed intensity domain for the map's color scale, in grants. Counts at
/// or above this saturate the hottest bucket.
pub const MAP_DOMAIN_MAX: f64 = 500.0;

/// The significance annotation comes from an external statistical test;
/// it is carried as static text, never recomputed here.
const CRUZ_ANNOTATION: &str = "Cruz grants 4x less likely to be reinstated (p<0.001)";

/// Square-root intensity scale bucketed for terminal colors: 0 for zero
/// grants, otherwise 1..=4.
pub fn intensity_bucket(count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let t = (count as f64 / MAP_DOMAIN_MAX).min(1.0).sqrt();
    (t * 4.0).ceil().clamp(1.0, 4.0) as u8
}

/// Shorten an institution name to `max` characters for axis labels.
/// Display only: ranking and tooltips always use the full name.
pub fn shorten_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = name.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Choropleth: one tile per mapped state, intensity from the sqrt scale.
pub fn state_map(states: &[StateAggregate]) -> ChoroplethSpec {
    let tiles = states
        .iter()
        .map(|s| MapTile {
            code: s.code.clone(),
            count: s.count,
            budget_cents: s.budget_cents,
            intensity: intensity_bucket(s.count),
        })
        .collect();
    ChoroplethSpec {
        title: "Map View".to_string(),
        legend: "grants per state (sqrt scale)".to_string(),
        tiles,
    }
}

/// Ranked bars: top states by grant count, over mapped states only (the bar
/// chart shares the map's joined data).
pub fn top_states_chart(states: &[StateAggregate], n: usize) -> RankedSpec {
    let rows: Vec<AggregateRow> = states
        .iter()
        .map(|s| AggregateRow {
            key: s.code.clone(),
            count: s.count,
            budget_cents: s.budget_cents,
        })
        .collect();
    let top = aggregate::top_n_by_count(&rows, n);
    let max_value = top.first().map_or(0.0, |r| r.count as f64);
    RankedSpec {
        title: format!("Top {} States", n),
        value_axis: "Number of Grants".to_string(),
        mark: Mark::Bar,
        data: top
            .into_iter()
            .map(|r| RankedDatum {
                label: r.key.clone(),
                formatted: fmt::thousands(r.count as u64),
                value: r.count as f64,
                key: r.key,
            })
            .collect(),
        max_value,
    }
}

/// Top institutions by grant count, lollipop.
pub fn institutions_by_count(institutions: &[AggregateRow], display: &DisplayConfig) -> RankedSpec {
    let top = aggregate::top_n_by_count(institutions, display.top_institutions);
    let max_value = top.first().map_or(0.0, |r| r.count as f64);
    RankedSpec {
        title: "By Number of Grants".to_string(),
        value_axis: "Number of Grants".to_string(),
        mark: Mark::Lollipop,
        data: top
            .into_iter()
            .map(|r| RankedDatum {
                label: shorten_label(&r.key, display.label_max_chars),
                formatted: fmt::thousands(r.count as u64),
                value: r.count as f64,
                key: r.key,
            })
            .collect(),
        max_value,
    }
}

/// Top institutions by budget lost, lollipop, axis in millions.
pub fn institutions_by_budget(institutions: &[AggregateRow], display: &DisplayConfig) -> RankedSpec {
    let top = aggregate::top_n_by_budget(institutions, display.top_institutions);
    let max_value = top.first().map_or(0.0, |r| r.budget_cents as f64 / 100.0 / 1e6);
    RankedSpec {
        title: "By Budget Lost".to_string(),
        value_axis: "Budget Lost (M$)".to_string(),
        mark: Mark::Lollipop,
        data: top
            .into_iter()
            .map(|r| RankedDatum {
                label: shorten_label(&r.key, display.label_max_chars),
                formatted: fmt::dollars_millions(r.budget_cents),
                value: r.budget_cents as f64 / 100.0 / 1e6,
                key: r.key,
            })
            .collect(),
        max_value,
    }
}

/// Flagged-words comparison, one chart by count and one by budget.
pub fn flagged_comparison(split: &FlaggedSplit) -> (GroupedBarSpec, GroupedBarSpec) {
    let with = &split.with_flagged;
    let without = &split.without_flagged;

    let subtitle = format!(
        "{} grants ({}) contain flagged words",
        fmt::thousands(with.count as u64),
        fmt::percent(split.flagged_pct()),
    );

    let by_count = GroupedBarSpec {
        title: "Flagged Words Correlation".to_string(),
        subtitle: Some(subtitle),
        value_axis: "Number of Grants".to_string(),
        max_value: with.count.max(without.count) as f64,
        data: vec![
            GroupedDatum {
                category: "With Flagged Words".to_string(),
                value: with.count as f64,
                formatted: fmt::thousands(with.count as u64),
                n: None,
            },
            GroupedDatum {
                category: "Without Flagged Words".to_string(),
                value: without.count as f64,
                formatted: fmt::thousands(without.count as u64),
                n: None,
            },
        ],
    };

    let by_budget = GroupedBarSpec {
        title: "Budget Lost".to_string(),
        subtitle: None,
        value_axis: "Budget Lost ($)".to_string(),
        max_value: with.budget_cents.max(without.budget_cents) as f64,
        data: vec![
            GroupedDatum {
                category: "With Flagged Words".to_string(),
                value: with.budget_cents as f64,
                formatted: fmt::dollars_compact(with.budget_cents),
                n: None,
            },
            GroupedDatum {
                category: "Without Flagged Words".to_string(),
                value: without.budget_cents as f64,
                formatted: fmt::dollars_compact(without.budget_cents),
                n: None,
            },
        ],
    };

    (by_count, by_budget)
}

/// Reinstatement-rate comparison. The rate axis has a fixed domain so
/// the two bars stay comparable across datasets.
pub fn reinstatement_rates(cmp: &ReinstatementComparison) -> GroupedBarSpec {
    GroupedBarSpec {
        title: "Cruz List & Reinstatements".to_string(),
        subtitle: Some(CRUZ_ANNOTATION.to_string()),
        value_axis: "Reinstatement Rate (%)".to_string(),
        max_value: 40.0_f64.max(cmp.cruz.rate()).max(cmp.non_cruz.rate()),
        data: vec![
            GroupedDatum {
                category: "On Cruz List".to_string(),
                value: cmp.cruz.rate(),
                formatted: fmt::percent(cmp.cruz.rate()),
                n: Some(cmp.cruz.total),
            },
            GroupedDatum {
                category: "Not on Cruz List".to_string(),
                value: cmp.non_cruz.rate(),
                formatted: fmt::percent(cmp.non_cruz.rate()),
                n: Some(cmp.non_cruz.total),
            },
        ],
    }
}

use crate::charts::build;
use crate::charts::spec::{ChoroplethSpec, GroupedBarSpec, RankedSpec};
use crate::config::Config;
use crate::data::Dataset;
use crate::engine::summary::{self, HeadlineMetrics};
use crate::engine::{aggregate, partition, regions};

/// Which tab is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Geography,
    Institutions,
    Correlations,
    About,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Geography,
        View::Institutions,
        View::Correlations,
        View::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Geography => "Geography",
            View::Institutions => "Institutions",
            View::Correlations => "Correlations",
            View::About => "About",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&v| v == self).unwrap_or(0)
    }

    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Everything the renderer needs, computed once after load. The event
/// loop only ever touches `view` and `scroll_offset`; charts and metrics
/// are immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppState {
    pub metrics: HeadlineMetrics,
    pub source: String,
    pub loaded_at: String,
    pub map: ChoroplethSpec,
    pub top_states: RankedSpec,
    pub institutions_by_count: RankedSpec,
    pub institutions_by_budget: RankedSpec,
    pub flagged_by_count: GroupedBarSpec,
    pub flagged_by_budget: GroupedBarSpec,
    pub reinstatement: GroupedBarSpec,
    pub about: Vec<String>,
    pub view: View,
    pub scroll_offset: usize,
}

impl AppState {
    /// Run the aggregation pipeline once and freeze the results into a
    /// renderable snapshot.
    pub fn from_dataset(dataset: &Dataset, config: &Config) -> Self {
        let records = &dataset.records;

        let metrics = summary::headline(records);
        let state_rows = aggregate::by_state(records);
        let mapped_states = regions::join_ids(&state_rows);
        let institution_rows = aggregate::by_institution(records);
        let flagged = partition::flagged_split(records);
        let reinstatement = partition::reinstatement_comparison(records);

        let (flagged_by_count, flagged_by_budget) = build::flagged_comparison(&flagged);

        Self {
            metrics,
            source: dataset.source.display().to_string(),
            loaded_at: dataset.loaded_at.format("%H:%M:%S").to_string(),
            map: build::state_map(&mapped_states),
            top_states: build::top_states_chart(&mapped_states, config.display.top_states),
            institutions_by_count: build::institutions_by_count(&institution_rows, &config.display),
            institutions_by_budget: build::institutions_by_budget(&institution_rows, &config.display),
            flagged_by_count,
            flagged_by_budget,
            reinstatement: build::reinstatement_rates(&reinstatement),
            about: about_lines(&metrics, &flagged),
            view: View::Geography,
            scroll_offset: 0,
        }
    }

    pub fn set_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.scroll_offset = 0;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

/// Static narrative text for the About view, with the dataset's own
/// numbers substituted in.
fn about_lines(
    metrics: &HeadlineMetrics,
    flagged: &crate::engine::partition::FlaggedSplit,
) -> Vec<String> {
    use crate::charts::fmt;

    vec![
        "Analysis of research grants terminated by the federal government.".to_string(),
        String::new(),
        "Dataset summary".to_string(),
        format!("  Total grants cancelled: {}", fmt::thousands(metrics.total_grants as u64)),
        format!("  Total budget lost: {}", fmt::dollars_compact(metrics.total_budget_cents)),
        format!("  States affected: {}", metrics.states_affected),
        format!("  Institutions affected: {}", metrics.institutions_affected),
        format!(
            "  Grants reinstated: {} ({})",
            fmt::thousands(metrics.reinstated_count as u64),
            fmt::percent(metrics.reinstated_pct()),
        ),
        String::new(),
        "Key findings".to_string(),
        "  1. Geographic concentration in a handful of research-heavy states.".to_string(),
        format!(
            "  2. Thematic targeting: {} of grants contain diversity/equity/climate keywords.",
            fmt::percent(flagged.flagged_pct()),
        ),
        "  3. Reinstatement disparity: Cruz-listed grants are far less likely to be reinstated.".to_string(),
        String::new(),
        "Methodology".to_string(),
        "  Data cleaning with word-boundary matching for flagged words.".to_string(),
        "  Statistical testing (Chi-square, Fisher's exact) performed upstream;".to_string(),
        "  significance annotations are carried through as-is, not recomputed.".to_string(),
        "  Geographic view joins state codes against the census region table;".to_string(),
        "  unrecognized codes appear in totals but not on the map.".to_string(),
    ]
}

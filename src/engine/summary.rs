use std::collections::HashSet;

use crate::data::GrantRecord;

/// The four headline metrics shown in the dashboard header (plus the
/// reinstated count backing the fourth).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlineMetrics {
    pub total_grants: usize,
    pub total_budget_cents: u64,
    pub states_affected: usize,
    pub institutions_affected: usize,
    pub reinstated_count: usize,
}

impl HeadlineMetrics {
    /// Share of grants later reinstated, in percent. 0 for an empty set.
    pub fn reinstated_pct(&self) -> f64 {
        if self.total_grants == 0 {
            return 0.0;
        }
        self.reinstated_count as f64 / self.total_grants as f64 * 100.0
    }
}

/// Headline roll-up over the full record set. Distinct-state counting
/// includes codes missing from the region table: only the geographic join
/// filters those.
pub fn headline(records: &[GrantRecord]) -> HeadlineMetrics {
    let mut states: HashSet<&str> = HashSet::new();
    let mut institutions: HashSet<&str> = HashSet::new();
    let mut metrics = HeadlineMetrics::default();

    for record in records {
        metrics.total_grants += 1;
        metrics.total_budget_cents += record.budget_cents;
        if let Some(state) = record.org_state.as_deref() {
            states.insert(state);
        }
        institutions.insert(record.org_name.as_str());
        if record.reinstated {
            metrics.reinstated_count += 1;
        }
    }

    metrics.states_affected = states.len();
    metrics.institutions_affected = institutions.len();
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, org: &str, state: Option<&str>, budget_cents: u64, reinstated: bool) -> GrantRecord {
        GrantRecord {
            grant_id: format!("g{id}"),
            org_name: org.to_string(),
            org_state: state.map(|s| s.to_string()),
            budget_cents,
            terminated: true,
            reinstated,
            has_flagged_words: false,
            in_cruz_list: false,
        }
    }

    #[test]
    fn test_headline_totals() {
        let records = vec![
            record(0, "UCLA", Some("CA"), 10_000, false),
            record(1, "UCLA", Some("CA"), 5_000, true),
            record(2, "MIT", Some("MA"), 2_500, false),
        ];
        let metrics = headline(&records);
        assert_eq!(metrics.total_grants, 3);
        assert_eq!(metrics.total_budget_cents, 17_500);
        assert_eq!(metrics.states_affected, 2);
        assert_eq!(metrics.institutions_affected, 2);
        assert_eq!(metrics.reinstated_count, 1);
        assert!((metrics.reinstated_pct() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmapped_state_still_counts_in_headline() {
        // "ZZ" is not in the region table but the grant exists
        let records = vec![
            record(0, "Atlantis Institute", Some("ZZ"), 1_000, false),
            record(1, "MIT", Some("MA"), 2_000, false),
        ];
        let metrics = headline(&records);
        assert_eq!(metrics.total_grants, 2);
        assert_eq!(metrics.states_affected, 2);
    }

    #[test]
    fn test_missing_state_not_counted_as_state() {
        let records = vec![record(0, "Remote College", None, 1_000, false)];
        let metrics = headline(&records);
        assert_eq!(metrics.total_grants, 1);
        assert_eq!(metrics.states_affected, 0);
    }

    #[test]
    fn test_empty_set_is_all_zeros() {
        let metrics = headline(&[]);
        assert_eq!(metrics.total_grants, 0);
        assert_eq!(metrics.reinstated_pct(), 0.0);
    }
}

use crate::data::GrantRecord;

/// Count and budget totals for one side of a boolean split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupTotals {
    pub count: usize,
    pub budget_cents: u64,
}

/// Mutually exclusive split of the full record set on `has_flagged_words`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlaggedSplit {
    pub with_flagged: GroupTotals,
    pub without_flagged: GroupTotals,
}

impl FlaggedSplit {
    pub fn total(&self) -> usize {
        self.with_flagged.count + self.without_flagged.count
    }

    /// Share of grants carrying flagged words, in percent. Full precision;
    /// rounding happens at render time only. 0 for an empty set.
    pub fn flagged_pct(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.with_flagged.count as f64 / self.total() as f64 * 100.0
    }
}

pub fn flagged_split(records: &[GrantRecord]) -> FlaggedSplit {
    let mut split = FlaggedSplit::default();
    for record in records {
        let group = if record.has_flagged_words {
            &mut split.with_flagged
        } else {
            &mut split.without_flagged
        };
        group.count += 1;
        group.budget_cents += record.budget_cents;
    }
    split
}

/// One side of the reinstatement comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateGroup {
    pub total: usize,
    pub reinstated: usize,
}

impl RateGroup {
    /// Reinstatement rate in percent. Defined as 0 for an empty group.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.reinstated as f64 / self.total as f64 * 100.0
    }
}

/// Reinstatement comparison over terminated grants, split by Cruz-list
/// membership. Non-terminated records are outside both groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReinstatementComparison {
    pub cruz: RateGroup,
    pub non_cruz: RateGroup,
}

pub fn reinstatement_comparison(records: &[GrantRecord]) -> ReinstatementComparison {
    let mut cmp = ReinstatementComparison::default();
    for record in records.iter().filter(|r| r.terminated) {
        let group = if record.in_cruz_list {
            &mut cmp.cruz
        } else {
            &mut cmp.non_cruz
        };
        group.total += 1;
        if record.reinstated {
            group.reinstated += 1;
        }
    }
    cmp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, terminated: bool, reinstated: bool, flagged: bool, cruz: bool) -> GrantRecord {
        GrantRecord {
            grant_id: format!("g{id}"),
            org_name: "Test University".to_string(),
            org_state: Some("CA".to_string()),
            budget_cents: 100,
            terminated,
            reinstated,
            has_flagged_words: flagged,
            in_cruz_list: cruz,
        }
    }

    #[test]
    fn test_flagged_split_partitions_exactly() {
        // 7 flagged / 3 unflagged out of 10
        let records: Vec<GrantRecord> = (0..10)
            .map(|i| record(i, true, false, i < 7, false))
            .collect();
        let split = flagged_split(&records);
        assert_eq!(split.with_flagged.count, 7);
        assert_eq!(split.without_flagged.count, 3);
        assert_eq!(split.total(), 10);
        assert_eq!(split.with_flagged.budget_cents, 700);
        assert_eq!(split.without_flagged.budget_cents, 300);
        assert!((split.flagged_pct() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_flagged_pct_empty_set_is_zero() {
        let split = flagged_split(&[]);
        assert_eq!(split.flagged_pct(), 0.0);
    }

    #[test]
    fn test_reinstatement_rates() {
        let mut records = Vec::new();
        // 4 cruz grants, 1 reinstated -> 25%
        records.push(record(0, true, true, false, true));
        records.push(record(1, true, false, false, true));
        records.push(record(2, true, false, false, true));
        records.push(record(3, true, false, false, true));
        // 2 non-cruz grants, 2 reinstated -> 100%
        records.push(record(4, true, true, false, false));
        records.push(record(5, true, true, false, false));
        let cmp = reinstatement_comparison(&records);
        assert_eq!(cmp.cruz.total, 4);
        assert_eq!(cmp.cruz.reinstated, 1);
        assert!((cmp.cruz.rate() - 25.0).abs() < 1e-9);
        assert!((cmp.non_cruz.rate() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_terminated_records_are_excluded() {
        let records = vec![
            record(0, false, false, false, true),
            record(1, true, false, false, false),
        ];
        let cmp = reinstatement_comparison(&records);
        assert_eq!(cmp.cruz.total, 0);
        assert_eq!(cmp.non_cruz.total, 1);
    }

    #[test]
    fn test_empty_partition_rate_is_zero_not_nan() {
        let cmp = reinstatement_comparison(&[]);
        assert_eq!(cmp.cruz.rate(), 0.0);
        assert_eq!(cmp.non_cruz.rate(), 0.0);
        assert!(!cmp.cruz.rate().is_nan());
    }
}

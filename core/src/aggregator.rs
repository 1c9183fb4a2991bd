use crate::model::impact::ImpactResult;
use crate::model::pool::ResourcePool;
use crate::model::scenario::Scenario;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Instantaneous demand on one critical date.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandPoint {
    pub date: NaiveDate,
    pub demand: i64,
}

/// Computes peak simultaneous demand over a set of date-ranged scenarios and
/// the capacity impact on a pool.
///
/// Holds no state: every call works only on the arguments it is given, so the
/// result has to be recomputed whenever the scenarios or the pool change.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalDemandAggregator;

impl IntervalDemandAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Every scenario start and end, sorted and de-duplicated. Demand can only
    /// change on these dates, so the peak is always attained on one of them.
    pub fn critical_dates(&self, scenarios: &[Scenario]) -> Vec<NaiveDate> {
        scenarios
            .iter()
            .flat_map(|s| [s.start, s.end])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Summed quantity of the scenarios active on `date`, clamped to the
    /// `i64` range.
    pub fn demand_at(&self, scenarios: &[Scenario], date: NaiveDate) -> i64 {
        saturate(self.wide_demand_at(scenarios, date))
    }

    fn wide_demand_at(&self, scenarios: &[Scenario], date: NaiveDate) -> i128 {
        scenarios
            .iter()
            .filter(|s| s.is_active_on(date))
            .map(|s| i128::from(s.quantity))
            .sum()
    }

    /// Peak simultaneous demand, checking each critical date against every
    /// scenario. O(C x S), fine for hand-entered scenario counts.
    ///
    /// Empty input yields 0, and so does input whose demand is negative on
    /// every critical date.
    pub fn compute_peak_demand(&self, scenarios: &[Scenario]) -> i64 {
        let peak = self
            .critical_dates(scenarios)
            .into_iter()
            .map(|d| self.wide_demand_at(scenarios, d))
            .fold(0, i128::max);
        saturate(peak)
    }

    /// Same contract as [`compute_peak_demand`](Self::compute_peak_demand) in
    /// O(S log S): boundary events are sorted once and the running total is
    /// sampled at each critical date.
    pub fn compute_peak_demand_sweep(&self, scenarios: &[Scenario]) -> i64 {
        let mut events: Vec<(NaiveDate, i128)> = Vec::with_capacity(scenarios.len() * 2);
        for s in scenarios.iter().filter(|s| !s.is_inverted()) {
            let quantity = i128::from(s.quantity);
            events.push((s.start, quantity));
            // No day after NaiveDate::MAX, and nothing left to sample there.
            if let Some(after) = s.end.succ_opt() {
                events.push((after, -quantity));
            }
        }
        events.sort_unstable_by_key(|(date, _)| *date);

        // i64 quantities summed in i128 cannot overflow for any realistic
        // number of scenarios.
        let mut running = 0i128;
        let mut peak = 0i128;
        let mut pending = events.into_iter().peekable();
        for date in self.critical_dates(scenarios) {
            while let Some((_, delta)) = pending.next_if(|(at, _)| *at <= date) {
                running += delta;
            }
            peak = peak.max(running);
        }
        saturate(peak)
    }

    /// Demand on every critical date, in date order.
    pub fn demand_profile(&self, scenarios: &[Scenario]) -> Vec<DemandPoint> {
        self.critical_dates(scenarios)
            .into_iter()
            .map(|date| DemandPoint {
                date,
                demand: self.demand_at(scenarios, date),
            })
            .collect()
    }

    /// Earliest critical date on which the peak is reached.
    pub fn peak_date(&self, scenarios: &[Scenario]) -> Option<NaiveDate> {
        let peak = self.compute_peak_demand(scenarios);
        self.demand_profile(scenarios)
            .into_iter()
            .find(|p| p.demand == peak)
            .map(|p| p.date)
    }

    pub fn compute_impact(&self, scenarios: &[Scenario], pool: &ResourcePool) -> ImpactResult {
        let peak_demand = self.compute_peak_demand(scenarios);
        let remaining_capacity = pool.remaining_after(peak_demand);
        let utilization_delta = if pool.total_capacity > 0 {
            peak_demand as f64 * 100.0 / pool.total_capacity as f64
        } else {
            0.0
        };

        ImpactResult {
            peak_demand,
            remaining_capacity,
            utilization_delta,
        }
    }
}

fn saturate(value: i128) -> i64 {
    value.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario(quantity: i64, start: NaiveDate, end: NaiveDate) -> Scenario {
        Scenario::new(quantity, start, end)
    }

    fn assert_both_peaks(scenarios: &[Scenario], expected: i64) {
        let agg = IntervalDemandAggregator::new();
        assert_eq!(agg.compute_peak_demand(scenarios), expected);
        assert_eq!(agg.compute_peak_demand_sweep(scenarios), expected);
    }

    #[test]
    fn test_overlapping_scenarios() {
        let agg = IntervalDemandAggregator::new();
        let pool = ResourcePool::new(100, 40);
        let scenarios = vec![
            scenario(10, date(2024, 1, 1), date(2024, 1, 5)),
            scenario(15, date(2024, 1, 3), date(2024, 1, 10)),
        ];

        assert_eq!(
            agg.critical_dates(&scenarios),
            vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 5), date(2024, 1, 10)]
        );
        assert_eq!(agg.demand_at(&scenarios, date(2024, 1, 1)), 10);
        assert_eq!(agg.demand_at(&scenarios, date(2024, 1, 3)), 25);
        assert_eq!(agg.demand_at(&scenarios, date(2024, 1, 5)), 25);
        assert_eq!(agg.demand_at(&scenarios, date(2024, 1, 10)), 15);
        assert_both_peaks(&scenarios, 25);

        let impact = agg.compute_impact(&scenarios, &pool);
        assert_eq!(impact.peak_demand, 25);
        assert_eq!(impact.remaining_capacity, 15);
        assert_eq!(impact.utilization_delta, 25.0);
        assert!(!impact.is_oversubscribed());
    }

    #[test]
    fn test_oversubscription() {
        let agg = IntervalDemandAggregator::new();
        let pool = ResourcePool::new(50, 20);
        let scenarios = vec![scenario(30, date(2024, 2, 1), date(2024, 2, 2))];

        let impact = agg.compute_impact(&scenarios, &pool);
        assert_eq!(impact.peak_demand, 30);
        assert_eq!(impact.remaining_capacity, -10);
        assert_eq!(impact.utilization_delta, 60.0);
        assert!(impact.is_oversubscribed());
    }

    #[test]
    fn test_empty_set() {
        let agg = IntervalDemandAggregator::new();
        let pool = ResourcePool::new(10, 10);

        let impact = agg.compute_impact(&[], &pool);
        assert_eq!(impact.peak_demand, 0);
        assert_eq!(impact.remaining_capacity, 10);
        assert_eq!(impact.utilization_delta, 0.0);
        assert_both_peaks(&[], 0);
        assert_eq!(agg.peak_date(&[]), None);
        assert!(agg.demand_profile(&[]).is_empty());
    }

    #[test]
    fn test_disjoint_scenarios_do_not_add_up() {
        let scenarios = vec![
            scenario(5, date(2024, 1, 1), date(2024, 1, 2)),
            scenario(7, date(2024, 1, 5), date(2024, 1, 6)),
        ];
        assert_both_peaks(&scenarios, 7);
    }

    #[test]
    fn test_touching_ranges_overlap_on_shared_day() {
        let scenarios = vec![
            scenario(5, date(2024, 1, 1), date(2024, 1, 3)),
            scenario(7, date(2024, 1, 3), date(2024, 1, 6)),
        ];
        assert_both_peaks(&scenarios, 12);

        let adjacent = vec![
            scenario(5, date(2024, 1, 1), date(2024, 1, 3)),
            scenario(7, date(2024, 1, 4), date(2024, 1, 6)),
        ];
        assert_both_peaks(&adjacent, 7);
    }

    #[test]
    fn test_zero_total_capacity() {
        let agg = IntervalDemandAggregator::new();
        let pool = ResourcePool::new(0, 0);
        let scenarios = vec![scenario(3, date(2024, 1, 1), date(2024, 1, 1))];

        let impact = agg.compute_impact(&scenarios, &pool);
        assert_eq!(impact.peak_demand, 3);
        assert_eq!(impact.remaining_capacity, -3);
        assert_eq!(impact.utilization_delta, 0.0);
    }

    #[test]
    fn test_inverted_range_contributes_nothing() {
        let agg = IntervalDemandAggregator::new();
        let inverted = scenario(50, date(2024, 1, 9), date(2024, 1, 2));
        let normal = scenario(4, date(2024, 1, 1), date(2024, 1, 10));
        let scenarios = vec![inverted, normal];

        // Its dates still count as critical.
        assert_eq!(agg.critical_dates(&scenarios).len(), 4);
        assert_both_peaks(&scenarios, 4);
        assert_both_peaks(&scenarios[..1], 0);
    }

    #[test]
    fn test_negative_quantity_reduces_overlap() {
        let scenarios = vec![
            scenario(10, date(2024, 1, 1), date(2024, 1, 10)),
            scenario(-4, date(2024, 1, 5), date(2024, 1, 10)),
        ];
        // 01-01 -> 10, 01-05 -> 6, 01-10 -> 6
        assert_both_peaks(&scenarios, 10);

        let only_negative = vec![scenario(-4, date(2024, 1, 5), date(2024, 1, 10))];
        assert_both_peaks(&only_negative, 0);
    }

    #[test]
    fn test_sweep_samples_only_critical_dates() {
        // Between 01-04 and 01-05 the running total is 3, but no critical date
        // falls there.
        let scenarios = vec![
            scenario(-5, date(2024, 1, 1), date(2024, 1, 3)),
            scenario(3, date(2024, 1, 1), date(2024, 1, 10)),
            scenario(-10, date(2024, 1, 6), date(2024, 1, 10)),
        ];
        assert_both_peaks(&scenarios, 0);
    }

    #[test]
    fn test_peak_date_and_profile() {
        let agg = IntervalDemandAggregator::new();
        let scenarios = vec![
            scenario(10, date(2024, 1, 1), date(2024, 1, 5)),
            scenario(15, date(2024, 1, 3), date(2024, 1, 10)),
        ];

        assert_eq!(agg.peak_date(&scenarios), Some(date(2024, 1, 3)));
        let profile = agg.demand_profile(&scenarios);
        let demands: Vec<i64> = profile.iter().map(|p| p.demand).collect();
        assert_eq!(demands, vec![10, 25, 25, 15]);
    }

    #[test]
    fn test_compute_impact_is_idempotent() {
        let agg = IntervalDemandAggregator::new();
        let pool = ResourcePool::new(100, 40);
        let scenarios = vec![
            scenario(10, date(2024, 1, 1), date(2024, 1, 5)),
            scenario(15, date(2024, 1, 3), date(2024, 1, 10)),
        ];
        assert_eq!(agg.compute_impact(&scenarios, &pool), agg.compute_impact(&scenarios, &pool));
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let agg = IntervalDemandAggregator::new();
        let d = date(2024, 1, 1);
        let scenarios = vec![scenario(i64::MAX, d, d), scenario(1, d, d), scenario(i64::MAX, d, date(2024, 1, 2))];
        assert_both_peaks(&scenarios, i64::MAX);
        assert_eq!(agg.demand_at(&scenarios, d), i64::MAX);
        assert_eq!(agg.peak_date(&scenarios), Some(d));

        let impact = agg.compute_impact(&scenarios[..2], &ResourcePool::new(10, 10));
        assert_eq!(impact.peak_demand, i64::MAX);
        assert_eq!(impact.remaining_capacity, 10 - i64::MAX);
        assert!(impact.is_oversubscribed());

        let impact = agg.compute_impact(&scenarios, &ResourcePool::new(u64::MAX, u64::MAX));
        assert_eq!(impact.remaining_capacity, i64::MAX);
        assert!(!impact.is_oversubscribed());

        // A large positive and a large negative cancel instead of wrapping.
        let cancelling = vec![scenario(i64::MAX, d, d), scenario(i64::MIN, d, d), scenario(3, d, d)];
        assert_both_peaks(&cancelling, 2);
        let sunk = vec![scenario(i64::MIN, d, d), scenario(i64::MIN, d, d)];
        assert_eq!(agg.demand_at(&sunk, d), i64::MIN);
        assert_both_peaks(&sunk, 0);
    }

    #[test]
    fn test_range_ending_on_last_representable_day() {
        let agg = IntervalDemandAggregator::new();
        let last = NaiveDate::MAX;
        let before = last.pred_opt().unwrap();
        let scenarios = vec![
            scenario(4, before, last),
            scenario(6, last, last),
            scenario(-20, date(2024, 1, 1), date(2024, 1, 2)),
        ];
        assert_both_peaks(&scenarios, 10);
        assert_eq!(agg.peak_date(&scenarios), Some(last));

        let negative_tail = vec![scenario(5, before, before), scenario(-3, before, last)];
        assert_both_peaks(&negative_tail, 2);
        assert_eq!(agg.demand_at(&negative_tail, last), -3);
    }

    fn arb_scenario(allow_negative: bool) -> impl Strategy<Value = Scenario> {
        let quantity = if allow_negative { -20i64..50 } else { 0i64..50 };
        (quantity, 0i64..60, -5i64..20).prop_map(|(q, offset, len)| {
            let start = date(2024, 1, 1) + chrono::Duration::days(offset);
            Scenario::new(q, start, start + chrono::Duration::days(len))
        })
    }

    proptest! {
        #[test]
        fn prop_sweep_matches_critical_dates(scenarios in prop::collection::vec(arb_scenario(true), 0..12)) {
            let agg = IntervalDemandAggregator::new();
            prop_assert_eq!(agg.compute_peak_demand(&scenarios), agg.compute_peak_demand_sweep(&scenarios));
        }

        #[test]
        fn prop_order_independent(scenarios in prop::collection::vec(arb_scenario(true), 0..12)) {
            let agg = IntervalDemandAggregator::new();
            let mut reversed = scenarios.clone();
            reversed.reverse();
            let mut rotated = scenarios.clone();
            if !rotated.is_empty() {
                rotated.rotate_left(1);
            }
            let peak = agg.compute_peak_demand(&scenarios);
            prop_assert_eq!(peak, agg.compute_peak_demand(&reversed));
            prop_assert_eq!(peak, agg.compute_peak_demand(&rotated));
        }

        #[test]
        fn prop_single_scenario_is_attainable(scenarios in prop::collection::vec(arb_scenario(false), 1..12)) {
            let agg = IntervalDemandAggregator::new();
            let peak = agg.compute_peak_demand(&scenarios);
            prop_assert!(peak >= 0);
            for s in scenarios.iter().filter(|s| !s.is_inverted()) {
                prop_assert!(peak >= s.quantity);
            }
        }

        #[test]
        fn prop_adding_positive_scenario_never_lowers_peak(
            scenarios in prop::collection::vec(arb_scenario(false), 0..12),
            extra in arb_scenario(false),
        ) {
            let agg = IntervalDemandAggregator::new();
            let before = agg.compute_peak_demand(&scenarios);
            let mut grown = scenarios.clone();
            grown.push(extra);
            prop_assert!(agg.compute_peak_demand(&grown) >= before);
        }
    }
}

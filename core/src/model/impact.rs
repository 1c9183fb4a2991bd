use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ImpactResult {
    pub peak_demand: i64,
    /// `available_capacity - peak_demand`. Negative means oversubscribed.
    pub remaining_capacity: i64,
    /// Peak demand as a percentage of total capacity, full precision.
    pub utilization_delta: f64,
}

impl ImpactResult {
    pub fn is_oversubscribed(&self) -> bool {
        self.remaining_capacity < 0
    }

    /// Utilization rounded to one decimal place for display.
    pub fn utilization_display(&self) -> f64 {
        (self.utilization_delta * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_display_rounds_to_one_decimal() {
        let result = ImpactResult {
            peak_demand: 1,
            remaining_capacity: 2,
            utilization_delta: 100.0 / 3.0,
        };
        assert_eq!(result.utilization_display(), 33.3);
        assert!((result.utilization_delta - 33.333_333).abs() < 1e-5);
    }

    #[test]
    fn test_oversubscribed() {
        let result = ImpactResult {
            peak_demand: 30,
            remaining_capacity: -10,
            utilization_delta: 60.0,
        };
        assert!(result.is_oversubscribed());
    }
}

use serde::{Deserialize, Serialize};

/// Snapshot of one catalog item's inventory, as reported by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ResourcePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    pub total_capacity: u64,
    pub available_capacity: u64,
}

impl ResourcePool {
    pub fn new(total_capacity: u64, available_capacity: u64) -> Self {
        Self {
            item: None,
            total_capacity,
            available_capacity,
        }
    }

    /// Units that exist but are reserved, deployed or in maintenance.
    pub fn committed_capacity(&self) -> u64 {
        self.total_capacity.saturating_sub(self.available_capacity)
    }

    /// Available units left once `demand` is placed, negative when short.
    /// Clamped to the `i64` range instead of wrapping.
    pub fn remaining_after(&self, demand: i64) -> i64 {
        let wide = i128::from(self.available_capacity) - i128::from(demand);
        wide.clamp(i64::MIN.into(), i64::MAX.into()) as i64
    }
}

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::PlannerError;

/// A hypothetical demand event: `quantity` units needed from `start` through
/// `end`, both days inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: Uuid,
    pub quantity: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Scenario {
    /// Builds a scenario as given. Zero or negative quantities and inverted
    /// ranges are kept; the aggregator knows how to treat them.
    pub fn new(quantity: i64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            quantity,
            start,
            end,
            label: None,
        }
    }

    /// Builds a scenario only if it makes business sense.
    pub fn validated(quantity: i64, start: NaiveDate, end: NaiveDate) -> Result<Self, PlannerError> {
        if quantity <= 0 {
            return Err(PlannerError::InvalidQuantity(quantity));
        }
        if end < start {
            return Err(PlannerError::InvertedRange { start, end });
        }
        Ok(Self::new(quantity, start, end))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.trim().is_empty() { None } else { Some(label) };
        self
    }

    /// True when `date` falls within `[start, end]`. Never true when the
    /// range is inverted.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Number of calendar days covered, 0 for an inverted range.
    pub fn days(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

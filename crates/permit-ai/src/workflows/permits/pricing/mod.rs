mod rules;
mod table;

pub use table::{IncludedDays, MatchKind, RateEntry, RateMatch, ADDITIONAL_DAY_FEE};
pub use table::{resolve_rate, DEFAULT_CATEGORY, RATE_TABLE};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::EventRecord;

/// Named slices of an estimate. Serialized as snake_case strings so the
/// breakdown travels as a plain JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeComponent {
    BaseFee,
    UrgentFee,
    AmendmentFee,
    AdditionalDaysFee,
}

impl FeeComponent {
    pub const fn label(self) -> &'static str {
        match self {
            FeeComponent::BaseFee => "base_fee",
            FeeComponent::UrgentFee => "urgent_fee",
            FeeComponent::AmendmentFee => "amendment_fee",
            FeeComponent::AdditionalDaysFee => "additional_days_fee",
        }
    }
}

/// Itemized estimate returned to the presentation layer. The breakdown always
/// sums to `total_cost`; a malformed submission is reported as a zero total
/// with an explanatory note rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub total_cost: u32,
    pub breakdown: BTreeMap<FeeComponent, u32>,
    pub notes: Vec<String>,
}

impl FeeQuote {
    fn rejected(note: String) -> Self {
        Self {
            total_cost: 0,
            breakdown: BTreeMap::new(),
            notes: vec![note],
        }
    }

    pub fn component(&self, component: FeeComponent) -> u32 {
        self.breakdown.get(&component).copied().unwrap_or(0)
    }

    pub fn reconciles(&self) -> bool {
        let sum = self
            .breakdown
            .values()
            .fold(0u32, |acc, amount| acc.saturating_add(*amount));
        sum == self.total_cost
    }
}

/// Stateless calculator mapping a complete [`EventRecord`] to an itemized
/// quote. Same input, same output; no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeCalculator;

impl FeeCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn quote(&self, record: &EventRecord) -> FeeQuote {
        let matched = resolve_rate(record.primary_event_type().unwrap_or_default());
        let (lines, total, notes) = rules::build_components(record, matched);

        let breakdown = lines
            .into_iter()
            .map(|line| (line.component, line.amount))
            .collect();

        FeeQuote {
            total_cost: total,
            breakdown,
            notes,
        }
    }

    /// Quote an untyped submission from the presentation boundary. Anything
    /// that does not describe a valid record yields the zero-total sentinel
    /// with a note; this entry point never fails.
    pub fn quote_raw(&self, value: &serde_json::Value) -> FeeQuote {
        if !value.is_object() {
            return FeeQuote::rejected(
                "Event data is not a record; no estimate produced".to_string(),
            );
        }

        match serde_json::from_value::<EventRecord>(value.clone()) {
            Ok(record) => self.quote(&record),
            Err(err) => FeeQuote::rejected(format!(
                "Event data is incomplete or malformed ({err}); no estimate produced"
            )),
        }
    }
}

use super::super::domain::EventRecord;
use super::table::{IncludedDays, MatchKind, RateMatch, ADDITIONAL_DAY_FEE, DEFAULT_CATEGORY};
use super::FeeComponent;

pub(crate) struct FeeLine {
    pub component: FeeComponent,
    pub amount: u32,
}

/// Expand a matched rate into itemized components plus operator-facing notes.
/// Every component appears in the output, zero or not, so the breakdown always
/// reconciles against the total by simple summation.
pub(crate) fn build_components(
    record: &EventRecord,
    matched: RateMatch,
) -> (Vec<FeeLine>, u32, Vec<String>) {
    let entry = matched.entry;
    let mut notes = Vec::new();

    if matched.kind == MatchKind::Fallback {
        let raw = record.primary_event_type().unwrap_or_default();
        notes.push(format!(
            "No pricing entry matches '{raw}'; estimated using the {DEFAULT_CATEGORY} rate"
        ));
    }

    let urgent_fee = if record.is_urgent { entry.urgent_fee } else { 0 };
    if urgent_fee > 0 {
        notes.push(format!("Added {urgent_fee} AED urgent processing fee"));
    }

    let amendment_fee = match (record.is_amendment, entry.amendment_fee) {
        (true, Some(fee)) => fee,
        _ => 0,
    };
    if amendment_fee > 0 {
        notes.push(format!("Added {amendment_fee} AED amendment fee"));
    }
    if record.is_amendment && entry.amendment_fee.is_none() {
        notes.push(format!(
            "Amendment fees do not apply to {} events",
            entry.category
        ));
    }

    let additional_days_fee = match (record.is_ticketed(), entry.included_days) {
        (true, IncludedDays::Fixed(included)) => {
            // Widen before multiplying; a record straight off the wire can
            // carry an arbitrary day count and must never panic the quote.
            let extra = u64::from(record.no_of_days.saturating_sub(included));
            u32::try_from(u64::from(ADDITIONAL_DAY_FEE) * extra).unwrap_or(u32::MAX)
        }
        _ => 0,
    };
    if additional_days_fee > 0 {
        let extra = additional_days_fee / ADDITIONAL_DAY_FEE;
        notes.push(format!(
            "Added {additional_days_fee} AED for {extra} additional day(s)"
        ));
    }

    let lines = vec![
        FeeLine {
            component: FeeComponent::BaseFee,
            amount: entry.base_fee,
        },
        FeeLine {
            component: FeeComponent::UrgentFee,
            amount: urgent_fee,
        },
        FeeLine {
            component: FeeComponent::AmendmentFee,
            amount: amendment_fee,
        },
        FeeLine {
            component: FeeComponent::AdditionalDaysFee,
            amount: additional_days_fee,
        },
    ];

    let total = lines
        .iter()
        .fold(0u32, |acc, line| acc.saturating_add(line.amount));

    (lines, total, notes)
}

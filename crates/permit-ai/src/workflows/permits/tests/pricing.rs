use super::common::*;
use serde_json::json;

use crate::workflows::permits::domain::TicketingType;
use crate::workflows::permits::pricing::{FeeCalculator, FeeComponent, ADDITIONAL_DAY_FEE};

#[test]
fn ticketed_conference_single_day_costs_1270() {
    let quote = FeeCalculator::new().quote(&record("Conference", TicketingType::PaidTicketed, 1));
    assert_eq!(quote.total_cost, 1270);
    assert_eq!(quote.component(FeeComponent::BaseFee), 1270);
    assert_eq!(quote.component(FeeComponent::UrgentFee), 0);
    assert_eq!(quote.component(FeeComponent::AmendmentFee), 0);
    assert_eq!(quote.component(FeeComponent::AdditionalDaysFee), 0);
    assert!(quote.reconciles());
}

#[test]
fn urgent_award_ceremony_over_three_days_costs_3620() {
    let mut record = record("Award Ceremony", TicketingType::PaidTicketed, 3);
    record.is_urgent = true;

    let quote = FeeCalculator::new().quote(&record);
    assert_eq!(quote.component(FeeComponent::BaseFee), 1520);
    assert_eq!(quote.component(FeeComponent::UrgentFee), 500);
    assert_eq!(quote.component(FeeComponent::AdditionalDaysFee), 1600);
    assert_eq!(quote.total_cost, 3620);
    assert!(quote.reconciles());
}

#[test]
fn non_ticketed_dj_event_never_pays_day_surcharge() {
    let quote = FeeCalculator::new().quote(&record("DJ Event", TicketingType::NonTicketed, 5));
    assert_eq!(quote.component(FeeComponent::AdditionalDaysFee), 0);
    assert_eq!(quote.total_cost, 1520);
}

#[test]
fn breakdown_always_reconciles_with_total() {
    let calculator = FeeCalculator::new();
    let mut samples = vec![
        record("Conference", TicketingType::PaidTicketed, 4),
        record("Exhibition", TicketingType::FreeTicketed, 9),
        record("Musical Event", TicketingType::NonTicketed, 2),
        record("Award Ceremony + Conference", TicketingType::PaidTicketed, 1),
    ];
    samples[0].is_urgent = true;
    samples[3].is_amendment = true;

    for sample in &samples {
        let quote = calculator.quote(sample);
        assert!(quote.reconciles(), "breakdown diverged for {sample:?}");
    }
}

#[test]
fn urgent_and_amendment_fees_are_zero_when_not_requested() {
    let calculator = FeeCalculator::new();
    let base = record("Conference", TicketingType::PaidTicketed, 2);

    let quote = calculator.quote(&base);
    assert_eq!(quote.component(FeeComponent::UrgentFee), 0);
    assert_eq!(quote.component(FeeComponent::AmendmentFee), 0);

    let mut flagged = base.clone();
    flagged.is_urgent = true;
    flagged.is_amendment = true;
    let quote = calculator.quote(&flagged);
    assert_eq!(quote.component(FeeComponent::UrgentFee), 500);
    assert_eq!(quote.component(FeeComponent::AmendmentFee), 800);
}

#[test]
fn any_day_category_total_ignores_duration() {
    let calculator = FeeCalculator::new();
    let short = calculator.quote(&record("Exhibition", TicketingType::PaidTicketed, 1));
    let long = calculator.quote(&record("Exhibition", TicketingType::PaidTicketed, 14));
    assert_eq!(short.total_cost, long.total_cost);
    assert_eq!(long.component(FeeComponent::AdditionalDaysFee), 0);
}

#[test]
fn fixed_day_category_charges_800_per_extra_day() {
    let calculator = FeeCalculator::new();
    for days in 1..=5 {
        let quote = calculator.quote(&record("Award Ceremony", TicketingType::PaidTicketed, days));
        assert_eq!(
            quote.component(FeeComponent::AdditionalDaysFee),
            ADDITIONAL_DAY_FEE * (days - 1)
        );
    }
}

#[test]
fn amendment_is_not_applicable_for_entertainment_categories() {
    let mut record = record("Comedy Show", TicketingType::PaidTicketed, 1);
    record.is_amendment = true;

    let quote = FeeCalculator::new().quote(&record);
    assert_eq!(quote.component(FeeComponent::AmendmentFee), 0);
    assert!(quote
        .notes
        .iter()
        .any(|note| note.contains("do not apply")));
}

#[test]
fn unmatched_event_type_falls_back_to_conference_rates() {
    let calculator = FeeCalculator::new();
    let unknown = calculator.quote(&record(
        "Hot Air Balloon Festival",
        TicketingType::PaidTicketed,
        2,
    ));
    let conference = calculator.quote(&record("Conference", TicketingType::PaidTicketed, 2));

    assert_eq!(unknown.total_cost, conference.total_cost);
    assert!(unknown.notes.iter().any(|note| note.contains("Conference")));
}

#[test]
fn oversized_day_counts_cap_the_surcharge_without_panicking() {
    // Records arriving through the raw quote path are not validated, so the
    // day surcharge must stay finite for any duration.
    let quote = FeeCalculator::new().quote(&record(
        "Award Ceremony",
        TicketingType::PaidTicketed,
        6_000_000,
    ));
    assert_eq!(quote.component(FeeComponent::AdditionalDaysFee), u32::MAX);
    assert!(quote.reconciles());
}

#[test]
fn quote_is_deterministic() {
    let calculator = FeeCalculator::new();
    let mut sample = record("Conference + Exhibition", TicketingType::FreeTicketed, 3);
    sample.is_urgent = true;

    assert_eq!(calculator.quote(&sample), calculator.quote(&sample));
}

#[test]
fn non_record_payload_yields_zero_sentinel() {
    let quote = FeeCalculator::new().quote_raw(&json!(["not", "a", "record"]));
    assert_eq!(quote.total_cost, 0);
    assert!(quote.breakdown.is_empty());
    assert!(!quote.notes.is_empty());
}

#[test]
fn non_numeric_counts_yield_zero_sentinel() {
    let payload = json!({
        "classification": "external",
        "ticketing": "paid_ticketed",
        "event_name": "Gulf Tech Summit",
        "event_types": ["Conference"],
        "venue": "Dubai Convention Center",
        "industry": "IT & Technology",
        "no_of_days": "three",
        "no_of_participants": 120,
        "start_date": "2026-11-05",
        "end_date": "2026-11-07"
    });

    let quote = FeeCalculator::new().quote_raw(&payload);
    assert_eq!(quote.total_cost, 0);
    assert!(quote.notes.iter().any(|note| note.contains("malformed")));
}

#[test]
fn well_formed_raw_payload_is_priced_normally() {
    let payload = serde_json::to_value(record("Conference", TicketingType::PaidTicketed, 1))
        .expect("record serializes");
    let quote = FeeCalculator::new().quote_raw(&payload);
    assert_eq!(quote.total_cost, 1270);
}

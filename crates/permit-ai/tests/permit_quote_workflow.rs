//! Pricing-table properties checked through the public calculator API.

use chrono::NaiveDate;
use serde_json::json;

use permit_ai::workflows::permits::{
    resolve_rate, EventClassification, EventRecord, FeeCalculator, FeeComponent, MatchKind,
    TicketingType, ADDITIONAL_DAY_FEE, DEFAULT_CATEGORY, RATE_TABLE,
};

fn record(event_type: &str, ticketing: TicketingType, days: u32) -> EventRecord {
    let start = NaiveDate::from_ymd_opt(2026, 11, 5).expect("valid date");
    EventRecord {
        classification: EventClassification::External,
        ticketing,
        event_name: "Harbour Lights Festival".to_string(),
        event_types: vec![event_type.to_string()],
        venue: "Atlantis The Palm".to_string(),
        industry: "Entertainment".to_string(),
        no_of_days: days,
        no_of_participants: 400,
        no_of_performers: 12,
        no_of_speakers: 0,
        start_date: start,
        end_date: start + chrono::Duration::days(days.saturating_sub(1) as i64),
        description: None,
        is_urgent: false,
        is_amendment: false,
    }
}

#[test]
fn every_catalog_category_reconciles_across_flag_combinations() {
    let calculator = FeeCalculator::new();

    for entry in RATE_TABLE {
        for (urgent, amendment) in [(false, false), (true, false), (false, true), (true, true)] {
            let mut sample = record(entry.category, TicketingType::PaidTicketed, 3);
            sample.is_urgent = urgent;
            sample.is_amendment = amendment;

            let quote = calculator.quote(&sample);
            assert!(
                quote.reconciles(),
                "breakdown diverged for {} (urgent={urgent}, amendment={amendment})",
                entry.category
            );
        }
    }
}

#[test]
fn ticketing_controls_the_day_surcharge() {
    let calculator = FeeCalculator::new();

    let ticketed = calculator.quote(&record("Award Ceremony", TicketingType::PaidTicketed, 4));
    assert_eq!(
        ticketed.component(FeeComponent::AdditionalDaysFee),
        3 * ADDITIONAL_DAY_FEE
    );

    let registered = calculator.quote(&record("Award Ceremony", TicketingType::FreeTicketed, 4));
    assert_eq!(
        registered.component(FeeComponent::AdditionalDaysFee),
        3 * ADDITIONAL_DAY_FEE
    );

    let open = calculator.quote(&record("Award Ceremony", TicketingType::NonTicketed, 4));
    assert_eq!(open.component(FeeComponent::AdditionalDaysFee), 0);
}

#[test]
fn fuzzy_category_matching_prefers_the_most_specific_entry() {
    let matched = resolve_rate("award ceremony + conference");
    assert_eq!(matched.entry.category, "Award Ceremony + Conference");

    let matched = resolve_rate("Annual Comedy Show Night");
    assert_eq!(matched.kind, MatchKind::Partial);
    assert_eq!(matched.entry.category, "Comedy Show");
}

#[test]
fn unknown_categories_price_like_the_default_and_say_so() {
    let calculator = FeeCalculator::new();
    let quote = calculator.quote(&record("Quidditch Trials", TicketingType::PaidTicketed, 1));
    let baseline = calculator.quote(&record(DEFAULT_CATEGORY, TicketingType::PaidTicketed, 1));

    assert_eq!(quote.total_cost, baseline.total_cost);
    assert!(quote
        .notes
        .iter()
        .any(|note| note.contains("No pricing entry")));
}

#[test]
fn malformed_submissions_never_panic() {
    let calculator = FeeCalculator::new();

    for payload in [
        json!(null),
        json!("Conference"),
        json!(17),
        json!([]),
        json!({}),
        json!({ "no_of_days": -3 }),
    ] {
        let quote = calculator.quote_raw(&payload);
        assert_eq!(quote.total_cost, 0);
        assert!(!quote.notes.is_empty());
    }
}

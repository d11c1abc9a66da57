use crate::infra::{parse_date, InMemoryPermitStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;

use permit_ai::error::AppError;
use permit_ai::workflows::permits::{
    Conversation, ConversationEvent, ConversationReply, EventClassification, EventDetailsForm,
    EventRecord, FeeCalculator, PermitDeskService, TicketingType,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Event type, e.g. "Conference" or "Award Ceremony + Exhibition"
    #[arg(long)]
    pub(crate) event_type: String,
    /// Ticketing structure: paid, registered, or open
    #[arg(long, default_value = "paid", value_parser = parse_ticketing)]
    pub(crate) ticketing: TicketingType,
    /// Internal company event (priced as non-ticketed)
    #[arg(long)]
    pub(crate) internal: bool,
    /// Number of event days
    #[arg(long, default_value_t = 1)]
    pub(crate) days: u32,
    /// Expected number of participants
    #[arg(long, default_value_t = 50)]
    pub(crate) participants: u32,
    /// Event start date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Urgent processing requested
    #[arg(long)]
    pub(crate) urgent: bool,
    /// This is an amendment to an existing application
    #[arg(long)]
    pub(crate) amendment: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Event type used by the scripted conversation
    #[arg(long, default_value = "Conference")]
    pub(crate) event_type: String,
    /// Number of event days
    #[arg(long, default_value_t = 1)]
    pub(crate) days: i64,
    /// Skip the save step at the end of the conversation
    #[arg(long)]
    pub(crate) skip_save: bool,
}

pub(crate) fn parse_ticketing(raw: &str) -> Result<TicketingType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "paid" | "paid_ticketed" => Ok(TicketingType::PaidTicketed),
        "registered" | "free" | "free_ticketed" => Ok(TicketingType::FreeTicketed),
        "open" | "non_ticketed" | "none" => Ok(TicketingType::NonTicketed),
        other => Err(format!(
            "unknown ticketing '{other}' (expected paid, registered, or open)"
        )),
    }
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let start = args
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let days = args.days.max(1);

    let record = EventRecord {
        classification: if args.internal {
            EventClassification::Internal
        } else {
            EventClassification::External
        },
        ticketing: if args.internal {
            TicketingType::NonTicketed
        } else {
            args.ticketing
        },
        event_name: "CLI estimate".to_string(),
        event_types: vec![args.event_type.clone()],
        venue: "Dubai Convention Center".to_string(),
        industry: "Other".to_string(),
        no_of_days: days,
        no_of_participants: args.participants.max(1),
        no_of_performers: 0,
        no_of_speakers: 0,
        start_date: start,
        end_date: start + chrono::Duration::days((days - 1) as i64),
        description: None,
        is_urgent: args.urgent,
        is_amendment: args.amendment,
    };

    let quote = FeeCalculator::new().quote(&record);

    println!("Estimate for '{}' ({} day(s)):", args.event_type, days);
    for (component, amount) in &quote.breakdown {
        println!("  {:<20} AED {amount}", component.label());
    }
    println!("  {:<20} AED {}", "total", quote.total_cost);
    for note in &quote.notes {
        println!("  note: {note}");
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryPermitStore::default());
    let service = PermitDeskService::new(store);
    let mut conversation = Conversation::new();

    let start = Local::now().date_naive();
    let days = args.days.max(1);
    let form = EventDetailsForm {
        event_name: "Scripted Demo Event".to_string(),
        event_types: vec![args.event_type.clone()],
        venue: "Dubai Convention Center".to_string(),
        industry: "IT & Technology".to_string(),
        no_of_days: days,
        no_of_participants: 150,
        no_of_performers: 0,
        no_of_speakers: 3,
        start_date: start,
        end_date: start + chrono::Duration::days(days - 1),
        description: Some("Demo run from the CLI".to_string()),
        is_urgent: false,
        is_amendment: false,
    };

    let mut events = vec![
        ConversationEvent::StartFeeCalculator,
        ConversationEvent::Classify(EventClassification::External),
        ConversationEvent::ChooseTicketing(TicketingType::PaidTicketed),
        ConversationEvent::SubmitDetails(form),
        ConversationEvent::ViewBreakdown,
    ];
    if !args.skip_save {
        events.push(ConversationEvent::SaveApplication);
    }

    for event in events {
        let reply = service.handle(&mut conversation, event);
        render_reply(&reply);
    }

    Ok(())
}

fn render_reply(reply: &ConversationReply) {
    println!("== step: {}", reply.step);
    for message in &reply.messages {
        println!("assistant> {message}");
    }
    for error in &reply.errors {
        println!("problem>   {error}");
    }
    if let Some(saved) = &reply.saved {
        println!(
            "saved>     {} (AED {}, schema v{})",
            saved.application_id.0, saved.total_cost, saved.schema_version
        );
    }
    println!();
}

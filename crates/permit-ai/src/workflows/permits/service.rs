use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, warn};

use super::conversation::{
    Conversation, ConversationError, ConversationEvent, ConversationStep,
};
use super::domain::{
    ApplicationId, ApplicationStatusView, EventClassification, EventRecord, PermitApplication,
    TicketingType, SCHEMA_VERSION,
};
use super::pricing::{FeeCalculator, FeeComponent, FeeQuote};
use super::repository::{PermitRepository, PersistError};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("permit-{id:06}"))
}

const GREETING: &str = "Welcome to the event permit assistant. I can walk you through \
classifying your event and estimating the government fees. Start the fee calculator \
whenever you are ready.";

/// What the presentation layer renders after each turn: assistant messages,
/// verbatim validation errors, and the quote once one exists. `handle` always
/// produces a reply; faults never escape to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationReply {
    pub step: ConversationStep,
    pub messages: Vec<String>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<FeeQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<ApplicationStatusView>,
}

impl ConversationReply {
    fn at(step: ConversationStep) -> Self {
        Self {
            step,
            messages: Vec::new(),
            errors: Vec::new(),
            quote: None,
            saved: None,
        }
    }
}

/// Facade composing the state machine, the fee calculator, and the
/// persistence sink. This is the single error boundary of the workflow:
/// every fault is converted into user-facing reply content.
pub struct PermitDeskService<R> {
    repository: Arc<R>,
    calculator: FeeCalculator,
}

impl<R> PermitDeskService<R>
where
    R: PermitRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            calculator: FeeCalculator::new(),
        }
    }

    pub fn quote(&self, record: &EventRecord) -> FeeQuote {
        self.calculator.quote(record)
    }

    pub fn quote_raw(&self, value: &serde_json::Value) -> FeeQuote {
        self.calculator.quote_raw(value)
    }

    pub fn fetch(&self, id: &ApplicationId) -> Result<Option<PermitApplication>, PersistError> {
        self.repository.fetch(id)
    }

    /// Finalize a record into an application and hand it to the sink. The
    /// quote is computed here so persisted totals always reconcile with the
    /// persisted breakdown.
    pub fn submit(&self, record: EventRecord) -> Result<PermitApplication, PersistError> {
        let quote = self.calculator.quote(&record);
        let mut application = PermitApplication {
            application_id: next_application_id(),
            record,
            quote,
            schema_version: SCHEMA_VERSION,
            created_at: Utc::now(),
        };

        let stored_id = self.repository.save(application.clone())?;
        application.application_id = stored_id;
        Ok(application)
    }

    /// Process one operator event against a conversation. Never fails: state
    /// machine rejections, validation failures, and persistence faults all
    /// come back as reply messages and the conversation stays usable.
    pub fn handle(
        &self,
        conversation: &mut Conversation,
        event: ConversationEvent,
    ) -> ConversationReply {
        if conversation.step() == ConversationStep::Greeting && conversation.transcript().is_empty()
        {
            conversation.push_assistant(GREETING);
        }

        match conversation.apply(&event) {
            Ok(()) => self.reply_for(conversation, &event),
            Err(ConversationError::InvalidDetails(errors)) => {
                let mut reply = ConversationReply::at(conversation.step());
                reply
                    .messages
                    .push("Some of the event details need attention before I can estimate the fees.".to_string());
                reply.errors = errors.iter().map(|error| error.to_string()).collect();
                for line in &reply.errors {
                    conversation.push_assistant(line.clone());
                }
                reply
            }
            Err(err @ ConversationError::OutOfTurn { .. }) => {
                let mut reply = ConversationReply::at(conversation.step());
                reply.errors.push(err.to_string());
                reply
            }
            Err(err @ ConversationError::MissingSelection(_)) => {
                // State can only get here through a corrupted snapshot from
                // the presentation layer. Log it and keep the session alive.
                error!(%err, "conversation state was inconsistent");
                let mut reply = ConversationReply::at(conversation.step());
                reply.errors.push(
                    "Something went wrong on our side; the conversation was left where it was."
                        .to_string(),
                );
                reply
            }
        }
    }

    fn reply_for(
        &self,
        conversation: &mut Conversation,
        event: &ConversationEvent,
    ) -> ConversationReply {
        let mut reply = ConversationReply::at(conversation.step());

        match event {
            ConversationEvent::StartFeeCalculator => {
                conversation.push_operator("I'd like to calculate government fees for my event.");
                reply.messages.push(
                    "Step 1, event classification: is this an internal event for employees \
only, or an external event with outside guests or public attendance?"
                        .to_string(),
                );
            }
            ConversationEvent::Classify(EventClassification::Internal) => {
                conversation.push_operator("Internal event, employees only.");
                reply.messages.push(
                    "For internal company events your venue files the permit application and \
lower fees typically apply. I can still estimate the fees for budgeting; let me know \
when you are ready for the details form."
                        .to_string(),
                );
            }
            ConversationEvent::Classify(EventClassification::External) => {
                conversation.push_operator("External event with outside attendance.");
                reply.messages.push(
                    "How is admission handled? Paid tickets, free with registration, or free \
open access? This changes which permits and fees apply."
                        .to_string(),
                );
            }
            ConversationEvent::AcknowledgeInternalBriefing => {
                conversation.push_operator("Understood, let's estimate the fees.");
                reply.messages.push(details_prompt());
            }
            ConversationEvent::ChooseTicketing(choice) => {
                conversation.push_operator(match choice {
                    TicketingType::PaidTicketed => "Paid event with admission fees.",
                    TicketingType::FreeTicketed => "Free event with controlled registration.",
                    TicketingType::NonTicketed => "Free open access, no registration.",
                });
                reply.messages.push(details_prompt());
            }
            ConversationEvent::SubmitDetails(_) => {
                if let Some(record) = conversation.record().cloned() {
                    let quote = self.calculator.quote(&record);
                    let summary = format!(
                        "Fee calculation complete for '{}' ({}, {} participant(s), {} day(s) \
at {}). Estimated government fees: AED {}. You can save the application, view the \
detailed breakdown, or start over.",
                        record.event_name,
                        record.classification.label(),
                        record.no_of_participants,
                        record.no_of_days,
                        record.venue,
                        quote.total_cost,
                    );
                    conversation.push_operator(format!(
                        "Event details submitted: {}",
                        record.event_name
                    ));
                    reply.messages.push(summary);
                    reply.messages.extend(quote.notes.iter().cloned());
                    reply.quote = Some(quote);
                }
            }
            ConversationEvent::SaveApplication => {
                conversation.push_operator("Please save this application.");
                match conversation.record().cloned() {
                    Some(record) => match self.submit(record) {
                        Ok(application) => {
                            reply.messages.push(format!(
                                "Application saved. Reference: {}",
                                application.application_id.0
                            ));
                            reply.quote = Some(application.quote.clone());
                            reply.saved = Some(application.status_view());
                        }
                        Err(err) => {
                            warn!(%err, "failed to persist permit application");
                            reply.errors.push(format!(
                                "Could not save the application ({err}). Your estimate is \
still shown and you can try saving again."
                            ));
                        }
                    },
                    None => {
                        error!("show_results step reached without a validated record");
                        reply
                            .errors
                            .push("There is no completed event to save yet.".to_string());
                    }
                }
            }
            ConversationEvent::StartOver => {
                conversation.push_assistant(GREETING);
                reply
                    .messages
                    .push("Let's calculate fees for another event.".to_string());
            }
            ConversationEvent::ViewBreakdown => {
                if let Some(record) = conversation.record() {
                    let quote = self.calculator.quote(record);
                    reply.messages.push(breakdown_message(&quote));
                    reply.quote = Some(quote);
                }
            }
        }

        for line in &reply.messages {
            conversation.push_assistant(line.clone());
        }

        reply
    }
}

fn details_prompt() -> String {
    "Now I need the event details: name, event type(s), venue, industry, number of days \
and participants, and the start and end dates. Performers and speakers are optional."
        .to_string()
}

fn breakdown_message(quote: &FeeQuote) -> String {
    let mut lines = vec!["Detailed fee breakdown:".to_string()];
    for component in [
        FeeComponent::BaseFee,
        FeeComponent::UrgentFee,
        FeeComponent::AmendmentFee,
        FeeComponent::AdditionalDaysFee,
    ] {
        lines.push(format!(
            "  {}: AED {}",
            component.label(),
            quote.component(component)
        ));
    }
    lines.push(format!("  total: AED {}", quote.total_cost));
    lines.join("\n")
}

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::catalog;
use super::domain::{EventClassification, EventRecord, TicketingType};

/// Steps of the guided fee-calculation conversation, in the order an operator
/// walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    Greeting,
    EventClassification,
    InternalEventInfo,
    ExternalTicketing,
    CollectEventDetails,
    ShowResults,
}

impl ConversationStep {
    pub const fn label(self) -> &'static str {
        match self {
            ConversationStep::Greeting => "greeting",
            ConversationStep::EventClassification => "event_classification",
            ConversationStep::InternalEventInfo => "internal_event_info",
            ConversationStep::ExternalTicketing => "external_ticketing",
            ConversationStep::CollectEventDetails => "collect_event_details",
            ConversationStep::ShowResults => "show_results",
        }
    }
}

impl fmt::Display for ConversationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete operator actions consumed by the state machine. Each accepted
/// event writes at most one field into the draft and advances at most one
/// step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ConversationEvent {
    StartFeeCalculator,
    Classify(EventClassification),
    AcknowledgeInternalBriefing,
    ChooseTicketing(TicketingType),
    SubmitDetails(EventDetailsForm),
    SaveApplication,
    StartOver,
    ViewBreakdown,
}

impl ConversationEvent {
    pub const fn describe(&self) -> &'static str {
        match self {
            ConversationEvent::StartFeeCalculator => "start fee calculator",
            ConversationEvent::Classify(_) => "classify event",
            ConversationEvent::AcknowledgeInternalBriefing => "acknowledge internal briefing",
            ConversationEvent::ChooseTicketing(_) => "choose ticketing",
            ConversationEvent::SubmitDetails(_) => "submit event details",
            ConversationEvent::SaveApplication => "save application",
            ConversationEvent::StartOver => "start over",
            ConversationEvent::ViewBreakdown => "view breakdown",
        }
    }
}

/// Upper bound on event duration accepted by the details form.
pub const MAX_EVENT_DAYS: i64 = 30;
/// Upper bound on expected participants accepted by the details form.
pub const MAX_PARTICIPANTS: i64 = 10_000;
/// Upper bound on performers and speakers accepted by the details form.
pub const MAX_PERFORMERS: i64 = 100;

/// Raw details form as supplied by the presentation boundary. Counts arrive
/// signed so out-of-range submissions are reported by validation instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetailsForm {
    pub event_name: String,
    pub event_types: Vec<String>,
    pub venue: String,
    pub industry: String,
    pub no_of_days: i64,
    pub no_of_participants: i64,
    #[serde(default)]
    pub no_of_performers: i64,
    #[serde(default)]
    pub no_of_speakers: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_amendment: bool,
}

impl EventDetailsForm {
    /// Validate every field, returning the full list of problems so the
    /// presentation layer can render them verbatim in one pass.
    pub fn validate(
        &self,
        classification: EventClassification,
        ticketing: TicketingType,
    ) -> Result<EventRecord, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.event_name.trim().is_empty() {
            errors.push(ValidationError::EmptyEventName);
        }

        if self.event_types.is_empty() {
            errors.push(ValidationError::NoEventTypes);
        }
        let catalog = catalog::event_types_for(ticketing);
        for event_type in &self.event_types {
            if !catalog.iter().any(|known| known == event_type) {
                errors.push(ValidationError::UnknownEventType(event_type.clone()));
            }
        }

        if !catalog::is_known_venue(&self.venue) {
            errors.push(ValidationError::UnknownVenue(self.venue.clone()));
        }
        if !catalog::is_known_industry(&self.industry) {
            errors.push(ValidationError::UnknownIndustry(self.industry.clone()));
        }

        if self.no_of_days < 1 {
            errors.push(ValidationError::DaysBelowMinimum(self.no_of_days));
        } else if self.no_of_days > MAX_EVENT_DAYS {
            errors.push(ValidationError::DaysAboveMaximum(self.no_of_days));
        }
        if self.no_of_participants < 1 {
            errors.push(ValidationError::ParticipantsBelowMinimum(
                self.no_of_participants,
            ));
        } else if self.no_of_participants > MAX_PARTICIPANTS {
            errors.push(ValidationError::ParticipantsAboveMaximum(
                self.no_of_participants,
            ));
        }
        if self.no_of_performers < 0 {
            errors.push(ValidationError::NegativePerformers(self.no_of_performers));
        } else if self.no_of_performers > MAX_PERFORMERS {
            errors.push(ValidationError::PerformersAboveMaximum(
                self.no_of_performers,
            ));
        }
        if self.no_of_speakers < 0 {
            errors.push(ValidationError::NegativeSpeakers(self.no_of_speakers));
        } else if self.no_of_speakers > MAX_PERFORMERS {
            errors.push(ValidationError::SpeakersAboveMaximum(self.no_of_speakers));
        }

        if self.start_date > self.end_date {
            errors.push(ValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(EventRecord {
            classification,
            ticketing,
            event_name: self.event_name.trim().to_string(),
            event_types: self.event_types.clone(),
            venue: self.venue.clone(),
            industry: self.industry.clone(),
            no_of_days: self.no_of_days as u32,
            no_of_participants: self.no_of_participants as u32,
            no_of_performers: self.no_of_performers as u32,
            no_of_speakers: self.no_of_speakers as u32,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self
                .description
                .as_ref()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            is_urgent: self.is_urgent,
            is_amendment: self.is_amendment,
        })
    }
}

/// User-facing validation failures for the details form.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("event name must not be empty")]
    EmptyEventName,
    #[error("select at least one event type")]
    NoEventTypes,
    #[error("'{0}' is not an event type offered for this ticketing option")]
    UnknownEventType(String),
    #[error("'{0}' is not a listed venue")]
    UnknownVenue(String),
    #[error("'{0}' is not a listed industry")]
    UnknownIndustry(String),
    #[error("number of days must be at least 1 (got {0})")]
    DaysBelowMinimum(i64),
    #[error("number of days must be at most 30 (got {0})")]
    DaysAboveMaximum(i64),
    #[error("number of participants must be at least 1 (got {0})")]
    ParticipantsBelowMinimum(i64),
    #[error("number of participants must be at most 10000 (got {0})")]
    ParticipantsAboveMaximum(i64),
    #[error("number of performers cannot be negative (got {0})")]
    NegativePerformers(i64),
    #[error("number of performers must be at most 100 (got {0})")]
    PerformersAboveMaximum(i64),
    #[error("number of speakers cannot be negative (got {0})")]
    NegativeSpeakers(i64),
    #[error("number of speakers must be at most 100 (got {0})")]
    SpeakersAboveMaximum(i64),
    #[error("start date {start} is after end date {end}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Faults raised by the state machine itself. Validation failures carry the
/// itemized list; the conversation never partially advances on either
/// variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversationError {
    #[error("'{action}' is not available during the {step} step")]
    OutOfTurn {
        step: ConversationStep,
        action: &'static str,
    },
    #[error("event details failed validation")]
    InvalidDetails(Vec<ValidationError>),
    #[error("conversation state is missing the {0} selection")]
    MissingSelection(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Operator,
    Assistant,
}

/// One chat line. The transcript is carried with the conversation so a
/// stateless presentation layer can re-render the full history each turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// The in-progress conversation: current step, partially filled draft, and
/// transcript. One instance per operator session; nothing is shared across
/// sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    step: ConversationStep,
    classification: Option<EventClassification>,
    ticketing: Option<TicketingType>,
    record: Option<EventRecord>,
    transcript: Vec<TranscriptEntry>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            step: ConversationStep::Greeting,
            classification: None,
            ticketing: None,
            record: None,
            transcript: Vec::new(),
        }
    }

    pub fn step(&self) -> ConversationStep {
        self.step
    }

    pub fn classification(&self) -> Option<EventClassification> {
        self.classification
    }

    pub fn ticketing(&self) -> Option<TicketingType> {
        self.ticketing
    }

    /// The validated record, present once the details form has been accepted.
    pub fn record(&self) -> Option<&EventRecord> {
        self.record.as_ref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn push_operator(&mut self, message: impl Into<String>) {
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::Operator,
            message: message.into(),
            at: Utc::now(),
        });
    }

    pub fn push_assistant(&mut self, message: impl Into<String>) {
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::Assistant,
            message: message.into(),
            at: Utc::now(),
        });
    }

    /// Apply one operator event. On error the conversation is unchanged.
    pub fn apply(&mut self, event: &ConversationEvent) -> Result<(), ConversationError> {
        match (self.step, event) {
            (_, ConversationEvent::StartOver) => {
                *self = Self::new();
                Ok(())
            }
            (ConversationStep::Greeting, ConversationEvent::StartFeeCalculator) => {
                self.step = ConversationStep::EventClassification;
                Ok(())
            }
            (ConversationStep::EventClassification, ConversationEvent::Classify(choice)) => {
                self.classification = Some(*choice);
                self.step = match choice {
                    EventClassification::Internal => ConversationStep::InternalEventInfo,
                    EventClassification::External => ConversationStep::ExternalTicketing,
                };
                Ok(())
            }
            (
                ConversationStep::InternalEventInfo,
                ConversationEvent::AcknowledgeInternalBriefing,
            ) => {
                // Internal events skip the ticketing question and are priced
                // as non-ticketed.
                self.ticketing = Some(TicketingType::NonTicketed);
                self.step = ConversationStep::CollectEventDetails;
                Ok(())
            }
            (ConversationStep::ExternalTicketing, ConversationEvent::ChooseTicketing(choice)) => {
                self.ticketing = Some(*choice);
                self.step = ConversationStep::CollectEventDetails;
                Ok(())
            }
            (ConversationStep::CollectEventDetails, ConversationEvent::SubmitDetails(form)) => {
                let classification = self
                    .classification
                    .ok_or(ConversationError::MissingSelection("classification"))?;
                let ticketing = self
                    .ticketing
                    .ok_or(ConversationError::MissingSelection("ticketing"))?;

                let record = form
                    .validate(classification, ticketing)
                    .map_err(ConversationError::InvalidDetails)?;
                self.record = Some(record);
                self.step = ConversationStep::ShowResults;
                Ok(())
            }
            // Result-screen actions are idempotent and leave the step alone;
            // the service performs the actual save/re-quote.
            (ConversationStep::ShowResults, ConversationEvent::SaveApplication)
            | (ConversationStep::ShowResults, ConversationEvent::ViewBreakdown) => Ok(()),
            (step, event) => Err(ConversationError::OutOfTurn {
                step,
                action: event.describe(),
            }),
        }
    }
}

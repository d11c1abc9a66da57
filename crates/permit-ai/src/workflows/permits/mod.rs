//! Event permit intake: a linear conversational form that classifies an
//! event, collects its details, prices it against the government rate table,
//! and persists the finalized application.

pub mod catalog;
pub mod conversation;
pub mod domain;
pub mod pricing;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use conversation::{
    Conversation, ConversationError, ConversationEvent, ConversationStep, EventDetailsForm,
    Speaker, TranscriptEntry, ValidationError, MAX_EVENT_DAYS, MAX_PARTICIPANTS, MAX_PERFORMERS,
};
pub use domain::{
    ApplicationId, ApplicationStatusView, EventClassification, EventRecord, PermitApplication,
    TicketingType, SCHEMA_VERSION,
};
pub use pricing::{
    resolve_rate, FeeCalculator, FeeComponent, FeeQuote, IncludedDays, MatchKind, RateEntry,
    RateMatch, ADDITIONAL_DAY_FEE, DEFAULT_CATEGORY, RATE_TABLE,
};
pub use repository::{PermitRepository, PersistError};
pub use router::{permit_router, ConversationTurnRequest, ConversationTurnResponse};
pub use service::{ConversationReply, PermitDeskService};

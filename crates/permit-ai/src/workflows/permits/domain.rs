use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::pricing::FeeQuote;

/// Version tag stamped onto persisted applications so the sink can migrate
/// older submissions.
pub const SCHEMA_VERSION: u16 = 2;

/// Identifier wrapper for persisted permit applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Whether the event is held for employees only or open to outside guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventClassification {
    Internal,
    External,
}

impl EventClassification {
    pub const fn label(self) -> &'static str {
        match self {
            EventClassification::Internal => "internal",
            EventClassification::External => "external",
        }
    }
}

/// Admission structure for external events. Internal events are priced as
/// non-ticketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketingType {
    PaidTicketed,
    FreeTicketed,
    NonTicketed,
}

impl TicketingType {
    pub const fn label(self) -> &'static str {
        match self {
            TicketingType::PaidTicketed => "paid_ticketed",
            TicketingType::FreeTicketed => "free_ticketed",
            TicketingType::NonTicketed => "non_ticketed",
        }
    }

    /// Paid and free-with-registration events both count as ticketed for
    /// surcharge purposes; open-access events do not.
    pub const fn is_ticketed(self) -> bool {
        matches!(
            self,
            TicketingType::PaidTicketed | TicketingType::FreeTicketed
        )
    }
}

/// The validated event description the calculator and persistence sink
/// consume. Built by the conversation once the details form passes
/// validation; treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub classification: EventClassification,
    pub ticketing: TicketingType,
    pub event_name: String,
    pub event_types: Vec<String>,
    pub venue: String,
    pub industry: String,
    pub no_of_days: u32,
    pub no_of_participants: u32,
    #[serde(default)]
    pub no_of_performers: u32,
    #[serde(default)]
    pub no_of_speakers: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_amendment: bool,
}

impl EventRecord {
    /// The first selected event type drives the rate-table lookup.
    pub fn primary_event_type(&self) -> Option<&str> {
        self.event_types.first().map(String::as_str)
    }

    pub fn is_ticketed(&self) -> bool {
        self.ticketing.is_ticketed()
    }
}

/// Finalized submission handed to the persistence sink: the record plus the
/// quote computed at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitApplication {
    pub application_id: ApplicationId,
    pub record: EventRecord,
    pub quote: FeeQuote,
    pub schema_version: u16,
    pub created_at: DateTime<Utc>,
}

impl PermitApplication {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            event_name: self.record.event_name.clone(),
            total_cost: self.quote.total_cost,
            schema_version: self.schema_version,
        }
    }
}

/// Sanitized representation exposed through the API after a save.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub event_name: String,
    pub total_cost: u32,
    pub schema_version: u16,
}

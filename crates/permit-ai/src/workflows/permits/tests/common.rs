use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::permits::conversation::{
    Conversation, ConversationEvent, ConversationStep, EventDetailsForm,
};
use crate::workflows::permits::domain::{
    ApplicationId, EventClassification, EventRecord, PermitApplication, TicketingType,
};
use crate::workflows::permits::repository::{PermitRepository, PersistError};
use crate::workflows::permits::service::PermitDeskService;

pub(super) fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 5).expect("valid date")
}

/// A fully valid ticketed record; tests override the fields they exercise.
pub(super) fn record(event_type: &str, ticketing: TicketingType, days: u32) -> EventRecord {
    let start = start_date();
    EventRecord {
        classification: EventClassification::External,
        ticketing,
        event_name: "Gulf Tech Summit".to_string(),
        event_types: vec![event_type.to_string()],
        venue: "Dubai Convention Center".to_string(),
        industry: "IT & Technology".to_string(),
        no_of_days: days,
        no_of_participants: 120,
        no_of_performers: 0,
        no_of_speakers: 4,
        start_date: start,
        end_date: start + chrono::Duration::days(days.saturating_sub(1) as i64),
        description: None,
        is_urgent: false,
        is_amendment: false,
    }
}

pub(super) fn details_form(event_type: &str, days: i64) -> EventDetailsForm {
    let start = start_date();
    EventDetailsForm {
        event_name: "Gulf Tech Summit".to_string(),
        event_types: vec![event_type.to_string()],
        venue: "Dubai Convention Center".to_string(),
        industry: "IT & Technology".to_string(),
        no_of_days: days,
        no_of_participants: 120,
        no_of_performers: 0,
        no_of_speakers: 4,
        start_date: start,
        end_date: start + chrono::Duration::days(days.max(1) - 1),
        description: Some("Annual developer summit".to_string()),
        is_urgent: false,
        is_amendment: false,
    }
}

/// Drive a fresh conversation to the details form along the external path.
pub(super) fn conversation_at_details(ticketing: TicketingType) -> Conversation {
    let mut conversation = Conversation::new();
    conversation
        .apply(&ConversationEvent::StartFeeCalculator)
        .expect("greeting accepts start");
    conversation
        .apply(&ConversationEvent::Classify(EventClassification::External))
        .expect("classification accepts external");
    conversation
        .apply(&ConversationEvent::ChooseTicketing(ticketing))
        .expect("ticketing step accepts selection");
    assert_eq!(conversation.step(), ConversationStep::CollectEventDetails);
    conversation
}

pub(super) fn build_service() -> (PermitDeskService<MemoryStore>, Arc<MemoryStore>) {
    let repository = Arc::new(MemoryStore::default());
    let service = PermitDeskService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, PermitApplication>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl PermitRepository for MemoryStore {
    fn save(&self, application: PermitApplication) -> Result<ApplicationId, PersistError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let id = application.application_id.clone();
        guard.insert(id.clone(), application);
        Ok(id)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<PermitApplication>, PersistError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Sink that is never reachable, for exercising the non-fatal save path.
pub(super) struct OfflineStore;

impl PermitRepository for OfflineStore {
    fn save(&self, _application: PermitApplication) -> Result<ApplicationId, PersistError> {
        Err(PersistError::Connection("store offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<PermitApplication>, PersistError> {
        Err(PersistError::Connection("store offline".to_string()))
    }
}

/// Sink whose writes always time out.
pub(super) struct SlowStore;

impl PermitRepository for SlowStore {
    fn save(&self, _application: PermitApplication) -> Result<ApplicationId, PersistError> {
        Err(PersistError::Timeout(2000))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<PermitApplication>, PersistError> {
        Err(PersistError::Timeout(2000))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

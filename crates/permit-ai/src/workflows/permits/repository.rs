use super::domain::{ApplicationId, PermitApplication};

/// Persistence sink for finalized applications. Save is not idempotent:
/// submitting the same event twice creates two entries, each under its own
/// id. Implementations live with the service binary so the core can be
/// exercised in isolation.
pub trait PermitRepository: Send + Sync {
    fn save(&self, application: PermitApplication) -> Result<ApplicationId, PersistError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<PermitApplication>, PersistError>;
}

/// Typed failures from the persistence sink. None of these are fatal to the
/// conversation; the quote is still shown when a save fails.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("persistence sink timed out after {0} ms")]
    Timeout(u64),
    #[error("could not reach persistence sink: {0}")]
    Connection(String),
    #[error("persistence sink rejected the application: {0}")]
    Validation(String),
    #[error("write failed: {0}")]
    Write(String),
}

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use permit_ai::config::{ConfigError, PersistenceConfig};
use permit_ai::workflows::permits::{
    ApplicationId, PermitApplication, PermitRepository, PersistError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process persistence sink. This is the only backend the service ships
/// with today; the store URL exists so a real sink can be swapped in without
/// touching the core.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryPermitStore {
    records: Arc<Mutex<HashMap<ApplicationId, PermitApplication>>>,
}

impl PermitRepository for InMemoryPermitStore {
    fn save(&self, application: PermitApplication) -> Result<ApplicationId, PersistError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let id = application.application_id.clone();
        // Duplicate submissions intentionally create duplicate entries; the
        // sequence generator keeps ids unique.
        guard.insert(id.clone(), application);
        Ok(id)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<PermitApplication>, PersistError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn store_from_config(
    config: &PersistenceConfig,
) -> Result<Arc<InMemoryPermitStore>, ConfigError> {
    if config.store_url == "memory://" || config.store_url == "memory" {
        Ok(Arc::new(InMemoryPermitStore::default()))
    } else {
        Err(ConfigError::UnsupportedStore {
            url: config.store_url.clone(),
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn memory_scheme_builds_a_store() {
        let config = PersistenceConfig {
            store_url: "memory://".to_string(),
            save_timeout: Duration::from_millis(2000),
        };
        assert!(store_from_config(&config).is_ok());
    }

    #[test]
    fn unknown_scheme_is_rejected_at_startup() {
        let config = PersistenceConfig {
            store_url: "mongodb://localhost:27017".to_string(),
            save_timeout: Duration::from_millis(2000),
        };
        let err = store_from_config(&config).expect_err("unsupported scheme");
        assert!(matches!(err, ConfigError::UnsupportedStore { .. }));
    }
}

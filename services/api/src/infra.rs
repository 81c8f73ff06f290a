use hireflow::config::StoreConfig;
use hireflow::workflows::candidates::InMemoryCandidateRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn candidate_repository(config: &StoreConfig) -> InMemoryCandidateRepository {
    if config.seed_demo {
        InMemoryCandidateRepository::seeded()
    } else {
        InMemoryCandidateRepository::new()
    }
}

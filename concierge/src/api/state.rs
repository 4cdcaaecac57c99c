use std::sync::Arc;

use crate::config::Config;
use crate::db::StorageBackend;
use crate::intelligence::SpecialistRegistry;
use crate::llm::{LlmProvider, TextGeneration};
use crate::services::ConciergeService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<dyn StorageBackend>,
    pub registry: Arc<SpecialistRegistry>,
    /// Reported by the health check.
    pub llm: LlmProvider,
    pub concierge: Arc<ConciergeService>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn StorageBackend>,
        registry: Arc<SpecialistRegistry>,
        llm: LlmProvider,
    ) -> Self {
        let generator: Arc<dyn TextGeneration> = Arc::new(llm.clone());
        Self::with_generator(config, storage, registry, llm, generator)
    }

    /// Like [`AppState::new`] but with a separate text generator, so the
    /// health report and the chat pipeline can differ in tests.
    pub fn with_generator(
        config: Config,
        storage: Arc<dyn StorageBackend>,
        registry: Arc<SpecialistRegistry>,
        llm: LlmProvider,
        generator: Arc<dyn TextGeneration>,
    ) -> Self {
        let concierge = Arc::new(ConciergeService::new(
            storage.clone(),
            generator,
            registry.clone(),
            config.clone(),
        ));

        Self {
            config: Arc::new(config),
            storage,
            registry,
            llm,
            concierge,
        }
    }
}

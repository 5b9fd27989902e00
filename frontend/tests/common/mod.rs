//! Shared wiring for the integration tests.

#![allow(dead_code)]

use comixed_frontend::components::Collaborators;
use comixed_frontend::mocks::{
    InMemoryComicService, InMemoryUserService, MapTranslator, RecordingNotifier, RecordingRouter,
    ScriptedConfirmation,
};
use comixed_frontend::{build_store, AppEnvironment, AppStore, FrontendConfig};
use std::sync::Arc;

/// A store plus handles on every collaborator it was built with.
pub struct Harness {
    pub store: AppStore,
    pub comics: InMemoryComicService,
    pub users: InMemoryUserService,
    pub confirmation: ScriptedConfirmation,
    pub notifier: RecordingNotifier,
    pub router: RecordingRouter,
    pub collaborators: Collaborators,
    pub config: FrontendConfig,
}

impl Harness {
    pub fn new(
        comics: InMemoryComicService,
        users: InMemoryUserService,
        confirmation: ScriptedConfirmation,
    ) -> Self {
        comixed_testing::init_test_tracing();

        let notifier = RecordingNotifier::new();
        let router = RecordingRouter::new();
        let config = FrontendConfig::default();
        let environment = AppEnvironment::new(
            Arc::new(comics.clone()),
            Arc::new(users.clone()),
            Arc::new(notifier.clone()),
            Arc::new(comixed_testing::test_clock()),
        );
        let collaborators = Collaborators {
            comics: Arc::new(comics.clone()),
            users: Arc::new(users.clone()),
            confirmation: Arc::new(confirmation.clone()),
            translate: Arc::new(MapTranslator::new()),
            notifier: Arc::new(notifier.clone()),
            router: Arc::new(router.clone()),
        };

        Self {
            store: build_store(environment, &config),
            comics,
            users,
            confirmation,
            notifier,
            router,
            collaborators,
            config,
        }
    }

    /// Empty back end with an accepting confirmation dialog.
    pub fn accepting() -> Self {
        Self::new(
            InMemoryComicService::new(),
            InMemoryUserService::new(),
            ScriptedConfirmation::accepting(),
        )
    }
}

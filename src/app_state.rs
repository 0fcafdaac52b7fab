use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    repositories::{InMemorySessionRepository, SessionRepository},
    services::{
        model_service::{generator_from_config, TextGenerator},
        SessionService, TutorService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub tutor_service: Arc<TutorService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let generator = generator_from_config(&config).map_err(|e| {
            AppError::InternalError(format!("Failed to build model client: {}", e))
        })?;
        Ok(Self::with_generator(config, Arc::from(generator)))
    }

    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        let config = Arc::new(config);
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());

        let session_service = Arc::new(SessionService::new(sessions.clone(), config.clone()));
        let tutor_service = Arc::new(TutorService::new(sessions, generator, config.clone()));

        Self {
            session_service,
            tutor_service,
            config,
        }
    }
}

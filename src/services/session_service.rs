use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{Role, SessionState},
        dto::{AddTopicRequest, SessionDto, SyllabusDto, UpdateSettingsRequest},
    },
    repositories::{SessionHandle, SessionRepository},
};

pub(crate) async fn find_session(
    sessions: &dyn SessionRepository,
    id: &Uuid,
) -> AppResult<SessionHandle> {
    sessions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))
}

fn require_role(session: &SessionState, role: Role, action: &str) -> AppResult<()> {
    if session.settings.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Only the {:?} view can {}",
            role, action
        )))
    }
}

/// Session lifecycle, sidebar settings and the syllabus checklist.
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    config: Arc<Config>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionRepository>, config: Arc<Config>) -> Self {
        Self { sessions, config }
    }

    fn render(&self, session: &SessionState) -> SessionDto {
        SessionDto::from_state(session, self.config.has_api_key())
    }

    pub async fn create_session(&self) -> AppResult<SessionDto> {
        let cutoff = Duration::try_minutes(self.config.session_idle_timeout_minutes)
            .and_then(|idle| Utc::now().checked_sub_signed(idle));
        match cutoff {
            Some(cutoff) => {
                let purged = self.sessions.purge_idle(cutoff).await?;
                if purged > 0 {
                    log::info!("Discarded {} idle session(s)", purged);
                }
            }
            None => log::warn!(
                "Idle timeout of {} minutes is out of range; skipping purge",
                self.config.session_idle_timeout_minutes
            ),
        }

        let handle = self.sessions.create(SessionState::new()).await?;
        let session = handle.lock().await;
        log::info!("Started session {}", session.id);
        Ok(self.render(&session))
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionDto> {
        let handle = find_session(self.sessions.as_ref(), id).await?;
        let session = handle.lock().await;
        Ok(self.render(&session))
    }

    pub async fn end_session(&self, id: &Uuid) -> AppResult<()> {
        if !self.sessions.delete(id).await? {
            return Err(AppError::NotFound(format!("Session '{}' not found", id)));
        }
        log::info!("Ended session {}", id);
        Ok(())
    }

    pub async fn update_settings(
        &self,
        id: &Uuid,
        request: UpdateSettingsRequest,
    ) -> AppResult<SessionDto> {
        request.validate()?;
        let theme = match request.analogy_theme.as_deref().map(str::trim) {
            Some("") => {
                return Err(AppError::ValidationError(
                    "Analogy theme cannot be blank".to_string(),
                ))
            }
            other => other.map(str::to_string),
        };

        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;

        if let Some(exam) = request.exam_context {
            if session.select_exam(exam) {
                log::info!("Session {} switched to {} syllabus", session.id, exam);
            }
        }
        if let Some(theme) = theme {
            session.settings.analogy_theme = theme;
        }
        if let Some(complexity) = request.complexity {
            session.settings.complexity = complexity;
        }
        if let Some(length) = request.length {
            session.settings.length = length;
        }
        if let Some(role) = request.role {
            session.settings.role = role;
        }
        session.touch();

        Ok(self.render(&session))
    }

    pub async fn add_topic(&self, id: &Uuid, request: AddTopicRequest) -> AppResult<SyllabusDto> {
        request.validate()?;
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError("Topic cannot be blank".to_string()));
        }

        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;
        require_role(&session, Role::Professor, "add syllabus topics")?;

        session.syllabus.add(topic);
        session.touch();
        Ok(SyllabusDto::from(&session.syllabus))
    }

    pub async fn remove_topic(&self, id: &Uuid, index: usize) -> AppResult<SyllabusDto> {
        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;
        require_role(&session, Role::Professor, "remove syllabus topics")?;

        session
            .syllabus
            .remove(index)
            .ok_or_else(|| AppError::NotFound(format!("Syllabus item {} not found", index)))?;
        session.touch();
        Ok(SyllabusDto::from(&session.syllabus))
    }

    pub async fn toggle_topic(&self, id: &Uuid, index: usize) -> AppResult<SyllabusDto> {
        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;
        require_role(&session, Role::Student, "mark syllabus progress")?;

        session
            .syllabus
            .toggle(index)
            .ok_or_else(|| AppError::NotFound(format!("Syllabus item {} not found", index)))?;
        session.touch();
        Ok(SyllabusDto::from(&session.syllabus))
    }
}

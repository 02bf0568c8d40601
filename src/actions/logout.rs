use std::time::Duration;

use chrono::Utc;

use crate::events::{BlogEvent, dispatch};
use crate::session::SessionManager;
use crate::timeout::{DEFAULT_STORE_TIMEOUT, within};
use crate::{BlogError, SessionRepository};

/// Ends the caller's session. Callers without a session succeed too.
pub struct LogoutAction<S: SessionRepository> {
    sessions: SessionManager<S>,
    timeout: Duration,
}

impl<S: SessionRepository> LogoutAction<S> {
    pub fn new(sessions: SessionManager<S>) -> Self {
        LogoutAction {
            sessions,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self, token: Option<&str>) -> Result<(), BlogError> {
        let user_id = match token {
            Some(token) => {
                within(self.timeout, "logout", self.sessions.destroy_session(token)).await?
            }
            None => None,
        };

        dispatch(BlogEvent::LogoutSuccess {
            user_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "quill",
            "msg=\"logout success\", had_session={}",
            user_id.is_some()
        );

        Ok(())
    }
}

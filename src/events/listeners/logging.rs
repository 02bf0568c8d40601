use async_trait::async_trait;

use crate::events::{BlogEvent, Listener, Topic};

/// Writes one logfmt line per event to the `quill::events` log target.
///
/// Post bodies and titles are not logged, only their ids and authors.
pub struct LoggingListener {
    level: log::Level,
    topics: Vec<Topic>,
}

impl LoggingListener {
    /// Every topic at `Info`.
    pub fn new() -> Self {
        Self::with_level(log::Level::Info)
    }

    pub fn with_level(level: log::Level) -> Self {
        Self {
            level,
            topics: Topic::ALL.to_vec(),
        }
    }

    /// Restricts the listener to `topics`.
    #[must_use]
    pub fn only(mut self, topics: &[Topic]) -> Self {
        self.topics = topics.to_vec();
        self
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

fn logfmt(event: &BlogEvent) -> String {
    let fields = match event {
        BlogEvent::UserRegistered { user, .. } => {
            format!("msg=\"user registered\", user_id={}, name=\"{}\"", user.id, user.name)
        }
        BlogEvent::LoginSuccess { user, .. } => {
            format!("msg=\"login succeeded\", user_id={}", user.id)
        }
        BlogEvent::LoginFailed { name, .. } => {
            format!("msg=\"login failed\", name=\"{name}\"")
        }
        BlogEvent::LogoutSuccess { user_id, .. } => match user_id {
            Some(id) => format!("msg=\"logged out\", user_id={id}"),
            None => "msg=\"logged out\", user_id=none".to_owned(),
        },
        BlogEvent::SessionExpired {
            user_id,
            expired_at,
            at,
        } => format!(
            "msg=\"session expired\", user_id={user_id}, stale_secs={}",
            (*at - *expired_at).num_seconds()
        ),
        BlogEvent::PostCreated { post, .. } => format!(
            "msg=\"post created\", post_id={}, author_id={}, author=\"{}\"",
            post.id, post.author.id, post.author.name
        ),
    };

    format!(
        "{fields}, event=\"{}\", at=\"{}\"",
        event.name(),
        event.timestamp().to_rfc3339()
    )
}

#[async_trait]
impl Listener for LoggingListener {
    fn topics(&self) -> &[Topic] {
        &self.topics
    }

    async fn handle(&self, event: &BlogEvent) {
        log::log!(target: "quill::events", self.level, "{}", logfmt(event));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{Author, PostView};

    #[test]
    fn test_post_line_leaves_out_the_body() {
        let line = logfmt(&BlogEvent::PostCreated {
            post: PostView {
                id: 7,
                title: "Secret plans".to_owned(),
                content: "do not log me".to_owned(),
                author: Author {
                    id: 2,
                    name: "alice".to_owned(),
                },
            },
            at: Utc::now(),
        });

        assert!(line.starts_with("msg=\"post created\", post_id=7, author_id=2, author=\"alice\""));
        assert!(line.contains("event=\"post.created\""));
        assert!(!line.contains("Secret plans"));
        assert!(!line.contains("do not log me"));
    }

    #[test]
    fn test_session_line_reports_staleness() {
        let at = Utc::now();
        let line = logfmt(&BlogEvent::SessionExpired {
            user_id: 3,
            expired_at: at - Duration::seconds(90),
            at,
        });

        assert!(line.contains("user_id=3, stale_secs=90"));
    }

    #[test]
    fn test_anonymous_logout() {
        let line = logfmt(&BlogEvent::LogoutSuccess {
            user_id: None,
            at: Utc::now(),
        });
        assert!(line.starts_with("msg=\"logged out\", user_id=none"));
    }

    #[test]
    fn test_topic_filter() {
        assert_eq!(LoggingListener::new().topics(), Topic::ALL);

        let listener = LoggingListener::with_level(log::Level::Warn).only(&[Topic::Session]);
        assert_eq!(listener.level, log::Level::Warn);
        assert_eq!(listener.topics(), &[Topic::Session]);
    }
}

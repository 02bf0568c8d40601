use chrono::{DateTime, Utc};

use crate::{Author, PostView};

/// What part of the blog an event concerns. Listeners subscribe by topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Registration, login and logout.
    Account,
    /// Session lifetime, currently only lazy expiry.
    Session,
    /// Posts.
    Content,
}

impl Topic {
    pub const ALL: &'static [Topic] = &[Topic::Account, Topic::Session, Topic::Content];
}

/// Something that happened to an account, a session or a post.
///
/// Dispatched after the underlying write has been stored, so a listener
/// never sees an event for work that was rolled back.
#[derive(Debug, Clone)]
pub enum BlogEvent {
    UserRegistered {
        user: Author,
        at: DateTime<Utc>,
    },
    LoginSuccess {
        user: Author,
        at: DateTime<Utc>,
    },
    /// Unknown name or wrong password; the two are not told apart.
    LoginFailed {
        name: String,
        at: DateTime<Utc>,
    },
    /// `user_id` is `None` when the request carried no live session.
    LogoutSuccess {
        user_id: Option<i64>,
        at: DateTime<Utc>,
    },
    /// A read found the session past its expiry and deleted it.
    SessionExpired {
        user_id: i64,
        expired_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    PostCreated {
        post: PostView,
        at: DateTime<Utc>,
    },
}

impl BlogEvent {
    /// Dot-separated name, stable across releases.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::LoginSuccess { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LogoutSuccess { .. } => "auth.logout.success",
            Self::SessionExpired { .. } => "session.expired",
            Self::PostCreated { .. } => "post.created",
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            Self::UserRegistered { .. }
            | Self::LoginSuccess { .. }
            | Self::LoginFailed { .. }
            | Self::LogoutSuccess { .. } => Topic::Account,
            Self::SessionExpired { .. } => Topic::Session,
            Self::PostCreated { .. } => Topic::Content,
        }
    }

    /// The user the event is about, when one is known.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::UserRegistered { user, .. } | Self::LoginSuccess { user, .. } => Some(user.id),
            Self::LoginFailed { .. } => None,
            Self::LogoutSuccess { user_id, .. } => *user_id,
            Self::SessionExpired { user_id, .. } => Some(*user_id),
            Self::PostCreated { post, .. } => Some(post.author.id),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered { at, .. }
            | Self::LoginSuccess { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LogoutSuccess { at, .. }
            | Self::SessionExpired { at, .. }
            | Self::PostCreated { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Author {
        Author {
            id: 2,
            name: "alice".to_owned(),
        }
    }

    fn post_by_alice() -> PostView {
        PostView {
            id: 9,
            title: "Hello".to_owned(),
            content: "World".to_owned(),
            author: alice(),
        }
    }

    #[test]
    fn test_topics_and_subjects() {
        let now = Utc::now();

        let cases = [
            (
                BlogEvent::UserRegistered { user: alice(), at: now },
                Topic::Account,
                Some(2),
            ),
            (
                BlogEvent::LoginFailed {
                    name: "mallory".to_owned(),
                    at: now,
                },
                Topic::Account,
                None,
            ),
            (
                BlogEvent::LogoutSuccess { user_id: None, at: now },
                Topic::Account,
                None,
            ),
            (
                BlogEvent::SessionExpired {
                    user_id: 4,
                    expired_at: now,
                    at: now,
                },
                Topic::Session,
                Some(4),
            ),
            (
                BlogEvent::PostCreated {
                    post: post_by_alice(),
                    at: now,
                },
                Topic::Content,
                Some(2),
            ),
        ];

        for (event, topic, user_id) in cases {
            assert_eq!(event.topic(), topic, "{}", event.name());
            assert_eq!(event.user_id(), user_id, "{}", event.name());
            assert_eq!(event.timestamp(), now);
        }
    }

    #[test]
    fn test_every_topic_is_listed() {
        for topic in [Topic::Account, Topic::Session, Topic::Content] {
            assert!(Topic::ALL.contains(&topic));
        }
    }

    #[test]
    fn test_post_created_carries_the_post() {
        let event = BlogEvent::PostCreated {
            post: post_by_alice(),
            at: Utc::now(),
        };

        assert_eq!(event.name(), "post.created");
        let BlogEvent::PostCreated { post, .. } = event else {
            unreachable!()
        };
        assert_eq!(post.author.name, "alice");
    }
}

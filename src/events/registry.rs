use std::sync::OnceLock;

use async_trait::async_trait;

use super::{BlogEvent, Topic};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Receives blog events.
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use quill::events::{BlogEvent, Listener, Topic};
///
/// /// Pings a search indexer whenever a post is published.
/// struct Reindex;
///
/// #[async_trait]
/// impl Listener for Reindex {
///     fn topics(&self) -> &[Topic] {
///         &[Topic::Content]
///     }
///
///     async fn handle(&self, event: &BlogEvent) {
///         if let BlogEvent::PostCreated { post, .. } = event {
///             // enqueue post.id
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Topics this listener is handed. Every topic unless overridden.
    fn topics(&self) -> &[Topic] {
        Topic::ALL
    }

    async fn handle(&self, event: &BlogEvent);
}

/// The process-wide listener list, built once by
/// [`register_event_listeners`].
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener. Listeners run in registration order.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    async fn dispatch(&self, event: &BlogEvent) {
        let topic = event.topic();
        for listener in &self.listeners {
            if listener.topics().contains(&topic) {
                listener.handle(event).await;
            }
        }
    }
}

/// Installs the listeners. Only the first call takes effect; later calls
/// log a warning and return `false`. Without a call, events are dropped.
pub fn register_event_listeners<F>(f: F) -> bool
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);

    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "quill::events",
            "msg=\"listeners already registered, ignoring\""
        );
        return false;
    }
    true
}

/// Hands `event` to every listener subscribed to its topic.
pub async fn dispatch(event: BlogEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use super::*;
    use crate::{Author, PostView};

    /// Records the names of events about one marker user.
    #[derive(Clone)]
    struct Recorder {
        topics: &'static [Topic],
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Recorder {
        fn new(topics: &'static [Topic]) -> Self {
            Self {
                topics,
                seen: Arc::default(),
            }
        }
    }

    const MARKER_USER: i64 = 424_242;

    #[async_trait]
    impl Listener for Recorder {
        fn topics(&self) -> &[Topic] {
            self.topics
        }

        async fn handle(&self, event: &BlogEvent) {
            if event.user_id() == Some(MARKER_USER) {
                self.seen.lock().unwrap().push(event.name());
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_respects_topics() {
        let everything = Recorder::new(Topic::ALL);
        let content_only = Recorder::new(&[Topic::Content]);
        let (all_seen, content_seen) = (everything.seen.clone(), content_only.seen.clone());

        assert!(register_event_listeners(|registry| {
            registry.listen(everything).listen(content_only);
        }));
        assert!(!register_event_listeners(|_| {}));

        let now = Utc::now();
        dispatch(BlogEvent::SessionExpired {
            user_id: MARKER_USER,
            expired_at: now,
            at: now,
        })
        .await;
        dispatch(BlogEvent::PostCreated {
            post: PostView {
                id: 1,
                title: "t".to_owned(),
                content: "c".to_owned(),
                author: Author {
                    id: MARKER_USER,
                    name: "marker".to_owned(),
                },
            },
            at: now,
        })
        .await;

        assert_eq!(
            *all_seen.lock().unwrap(),
            vec!["session.expired", "post.created"]
        );
        assert_eq!(*content_seen.lock().unwrap(), vec!["post.created"]);
    }
}

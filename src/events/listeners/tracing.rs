use async_trait::async_trait;

use crate::events::{BlogEvent, Listener};

/// Records each event as a `tracing` event with typed fields, so
/// subscribers can filter on `post_id` or `user_id` directly.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &BlogEvent) {
        let name = event.name();
        match event {
            BlogEvent::PostCreated { post, .. } => tracing::info!(
                target: "quill::events",
                event = name,
                post_id = post.id,
                author_id = post.author.id,
                "post created"
            ),
            BlogEvent::SessionExpired {
                user_id,
                expired_at,
                ..
            } => tracing::info!(
                target: "quill::events",
                event = name,
                user_id,
                expired_at = %expired_at,
                "session expired"
            ),
            BlogEvent::LoginFailed { .. } => {
                tracing::warn!(target: "quill::events", event = name, "login failed");
            }
            _ => tracing::info!(
                target: "quill::events",
                event = name,
                user_id = ?event.user_id(),
                "account event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn test_handles_without_subscriber() {
        let now = Utc::now();
        TracingListener
            .handle(&BlogEvent::SessionExpired {
                user_id: 1,
                expired_at: now,
                at: now,
            })
            .await;
    }
}

use std::future::Future;
use std::time::Duration;

use crate::BlogError;

pub(crate) const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs `fut` under `limit`, reporting an elapsed deadline as infrastructure.
pub(crate) async fn within<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, BlogError>
where
    F: Future<Output = Result<T, BlogError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            log::error!(
                target: "quill",
                "msg=\"store call timed out\", operation=\"{operation}\", limit_ms={}",
                limit.as_millis()
            );
            Err(BlogError::Infrastructure(format!(
                "{operation} timed out after {}ms",
                limit.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_through_result() {
        let ok = within(Duration::from_secs(1), "noop", async { Ok::<_, BlogError>(7) }).await;
        assert_eq!(ok, Ok(7));

        let err = within(Duration::from_secs(1), "noop", async {
            Err::<i32, _>(BlogError::NotFound("Post"))
        })
        .await;
        assert_eq!(err, Err(BlogError::NotFound("Post")));
    }

    #[tokio::test]
    async fn test_elapsed_maps_to_infrastructure() {
        let result = within(Duration::from_millis(10), "slow_query", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, BlogError>(())
        })
        .await;

        match result {
            Err(BlogError::Infrastructure(message)) => assert!(message.contains("slow_query")),
            other => panic!("expected infrastructure error, got {other:?}"),
        }
    }
}

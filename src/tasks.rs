use std::fmt::Display;
use std::future::Future;

/// Fire-and-forget helper for best-effort side calls such as cart
/// mirroring. Failures are logged and swallowed; the local mutation has
/// already committed and stays authoritative.
pub fn spawn_best_effort<F, E>(task: &'static str, fut: F)
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display,
{
    tokio::spawn(async move {
        if let Err(err) = fut.await {
            tracing::warn!(task, error = %err, "best-effort task failed");
        }
    });
}

use std::time::Instant;

/// Runs `f` on a scoped worker thread and waits for it. Only for short local
/// work such as file export; network calls go through [`run_in_background`].
pub fn run_blocking<F, T>(label: &str, f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let started = Instant::now();
    let result = std::thread::scope(|scope| match scope.spawn(f).join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    });
    tracing::debug!(
        task = label,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "blocking task finished"
    );
    result
}

/// Moves `f` to the runtime's blocking pool and awaits it, leaving the UI
/// free to render while it runs. Returns `None` only when the runtime is
/// shutting down and the task was cancelled.
pub async fn run_in_background<F, T>(label: &'static str, f: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let started = Instant::now();
    let joined = tokio::task::spawn_blocking(f).await;
    tracing::debug!(
        task = label,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "background task finished"
    );
    match joined {
        Ok(value) => Some(value),
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => {
            tracing::warn!(task = label, error = %err, "background task cancelled");
            None
        }
    }
}

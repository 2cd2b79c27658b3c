use anyhow::Result;

/// The application only ever drives one timer and a handful of file reads, so a current-thread
/// runtime is enough.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

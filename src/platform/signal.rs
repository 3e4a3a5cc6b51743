// nativecli - platform/signal.rs
//
// Ctrl+C delivery for long-running commands.
//
// The follow loop is synchronous, so the signal is awaited on a helper
// thread running a single-threaded tokio runtime. When Ctrl+C arrives the
// handler runs once on that thread.

/// Run `handler` when the process receives Ctrl+C.
///
/// Returns an error only if the helper thread cannot be spawned. Failure to
/// build the runtime or install the handler is logged; the command then runs
/// until killed.
pub fn on_ctrl_c<F>(handler: F) -> std::io::Result<()>
where
    F: FnOnce() + Send + 'static,
{
    std::thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not start signal runtime");
                    return;
                }
            };

            match runtime.block_on(tokio::signal::ctrl_c()) {
                Ok(()) => {
                    tracing::debug!("Ctrl+C received");
                    handler();
                }
                Err(e) => tracing::warn!(error = %e, "Could not listen for Ctrl+C"),
            }
        })?;
    Ok(())
}

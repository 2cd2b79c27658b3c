use anyhow::Result;
use baraka::{cli::run_cli, utils::runtime::single_thread_runtime};
use tracing::error;

fn main() -> Result<()> {
    let runtime = single_thread_runtime()?;
    let result = runtime.block_on(run_cli()).inspect_err(|e| {
        error!("Error running cli {e:?}");
    });
    // Stdin reads of the timer may still be blocking, don't wait for them.
    runtime.shutdown_background();
    result
}

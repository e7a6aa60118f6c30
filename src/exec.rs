use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::errors::GenError;

/// Run an external tool to completion with a bounded timeout.
///
/// Spawn failure, abnormal exit and timeout all map to a fatal
/// `ToolInvocation` error naming the symbol being processed. On timeout the
/// child is killed so a hung tool cannot stall the whole run.
pub(crate) async fn run_tool(
    action: &str,
    symbol: char,
    cmd: &mut Command,
    limit: Duration,
) -> Result<(), GenError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    debug!("{}: running {} for '{}'", action, program, symbol);

    let mut child = cmd
        .spawn()
        .map_err(|e| GenError::tool(symbol, format!("{action}: failed to start {program}: {e}")))?;

    let status = match timeout(limit, child.wait()).await {
        Ok(waited) => waited
            .map_err(|e| GenError::tool(symbol, format!("{action}: waiting on {program} failed: {e}")))?,
        Err(_) => {
            // Reap the child so it is not left dying in the background.
            if let Err(e) = child.kill().await {
                warn!("{}: could not kill timed-out {}: {}", action, program, e);
            }
            return Err(GenError::tool(
                symbol,
                format!("{action}: {program} did not finish within {}s", limit.as_secs()),
            ));
        }
    };

    if !status.success() {
        return Err(GenError::tool(
            symbol,
            format!("{action}: {program} exited with {status}"),
        ));
    }
    Ok(())
}

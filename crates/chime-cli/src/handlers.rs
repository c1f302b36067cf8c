//! Command execution.
//!
//! Handlers build the request, hand it to the service and render the
//! result. Printing and exit codes are left to `main`.

use chime_core::{PlaybackService, ToolResult};
use tracing::debug;

use crate::commands::Commands;
use crate::error::CliError;

/// Rendered output of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Printed on stdout, exit status 0.
    Success(String),
    /// JSON result of a failed `call`: printed on stdout, non-zero exit.
    FailedJson(String),
}

/// Run a command against the service.
///
/// Failed requests of plain commands are returned as [`CliError::Playback`].
pub async fn execute(service: &PlaybackService, command: &Commands) -> Result<Output, CliError> {
    let request = command.to_request()?;
    debug!(operation = %request.operation, "Dispatching request");
    let result = service.handle(&request).await;
    render(command, result)
}

/// Render a result for display.
pub fn render(command: &Commands, result: ToolResult) -> Result<Output, CliError> {
    if command.prints_json() {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::Arguments(format!("failed to encode result: {e}")))?;
        return Ok(if result.is_error {
            Output::FailedJson(json)
        } else {
            Output::Success(json)
        });
    }

    if result.is_error {
        Err(CliError::Playback(result.message))
    } else {
        Ok(Output::Success(result.message))
    }
}

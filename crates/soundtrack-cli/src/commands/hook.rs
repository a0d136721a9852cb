use std::path::Path;

use soundtrack_core::annotate_message_file;
use tracing::debug;

use super::{config_or_default, coordinator, CommandResult};

/// Runs inside `git commit`: never fails because of detection, only when
/// the message file itself cannot be read or written.
pub async fn run(message_file: &Path) -> CommandResult {
    let config = config_or_default();
    let coordinator = coordinator(&config);
    let outcome = annotate_message_file(message_file, &coordinator, &config).await?;
    debug!(?outcome, "Hook finished");
    Ok(())
}

use std::path::Path;

use soundtrack_detect::{Coordinator, MediaRecord};
use tracing::{debug, info};

use crate::commit::{already_tagged, append_line, has_real_content};
use crate::config::AppConfig;
use crate::error::SoundtrackError;
use crate::format::Formatter;

/// What the hook did to the commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Disabled,
    NoContent,
    /// The message is not UTF-8 (e.g. `i18n.commitEncoding = latin1`).
    UnsupportedEncoding,
    AlreadyTagged,
    NothingPlaying,
    Annotated(MediaRecord),
}

/// Append the currently playing track to the commit message at `path`.
///
/// The file is only rewritten for [`HookOutcome::Annotated`]. Detection
/// trouble is never an error here; only reading or writing the message file
/// can fail.
pub async fn annotate_message_file(
    path: &Path,
    coordinator: &Coordinator,
    config: &AppConfig,
) -> Result<HookOutcome, SoundtrackError> {
    if !config.general.enabled {
        return Ok(HookOutcome::Disabled);
    }

    let bytes = tokio::fs::read(path).await?;
    let Ok(message) = String::from_utf8(bytes) else {
        debug!(path = %path.display(), "Commit message is not UTF-8, leaving it alone");
        return Ok(HookOutcome::UnsupportedEncoding);
    };
    if !has_real_content(&message) {
        return Ok(HookOutcome::NoContent);
    }
    if already_tagged(&message) {
        return Ok(HookOutcome::AlreadyTagged);
    }

    let Some(record) = coordinator.detect(config.timeout()).await else {
        debug!("Nothing playing, leaving commit message alone");
        return Ok(HookOutcome::NothingPlaying);
    };

    let line = Formatter::from_config(&config.format).commit_line(&record);
    let Some(updated) = append_line(&message, &line) else {
        return Ok(HookOutcome::NoContent);
    };
    tokio::fs::write(path, updated).await?;

    info!(title = record.title(), source = record.source(), "Annotated commit message");
    Ok(HookOutcome::Annotated(record))
}

use async_trait::async_trait;
use soundtrack_parse::{classify, clean_title, display_name, MediaRecord};
use tokio::time::Instant;
use tracing::debug;

use super::has_program;
use crate::command;
use crate::error::DetectError;
use crate::probe::Probe;

const PLAYERCTL: &str = "playerctl";

/// One line, tab-separated, for the player playerctl considers active.
const METADATA_FORMAT: &str = "{{status}}\t{{playerName}}\t{{title}}\t{{artist}}\t{{album}}";

/// Reads the active MPRIS session through the `playerctl` tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerctlProbe;

#[async_trait]
impl Probe for PlayerctlProbe {
    fn id(&self) -> &'static str {
        "playerctl"
    }

    fn name(&self) -> &'static str {
        "MPRIS/playerctl"
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "linux") && has_program(PLAYERCTL)
    }

    async fn detect(&self, deadline: Instant) -> Result<Option<MediaRecord>, DetectError> {
        let args = ["metadata", "--format", METADATA_FORMAT];
        match command::run(PLAYERCTL, args, deadline).await {
            Ok(out) => Ok(parse_metadata(&out)),
            Err(DetectError::Exit { stderr, .. }) if stderr.contains("No players found") => {
                debug!("No MPRIS players running");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Parse one line of [`METADATA_FORMAT`] output.
fn parse_metadata(output: &str) -> Option<MediaRecord> {
    let line = output.lines().find(|l| !l.trim().is_empty())?;
    let mut fields = line.splitn(5, '\t');
    let status = fields.next()?.trim();
    let player = fields.next().unwrap_or_default();
    let title = fields.next().unwrap_or_default();
    let artist = fields.next().unwrap_or_default();
    let album = fields.next().unwrap_or_default();

    if status.eq_ignore_ascii_case("stopped") {
        return None;
    }

    let source = display_name(player);
    let title = clean_title(title);
    let kind = classify(&title, &source);
    debug!(player, title = %title, "Detected MPRIS session");

    Some(
        MediaRecord::new(title, source)?
            .with_artist(artist)
            .with_album(album)
            .with_kind(kind),
    )
}

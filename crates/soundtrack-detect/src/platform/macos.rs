use std::path::Path;

use async_trait::async_trait;
use soundtrack_parse::{
    classify, clean_title, has_playing_marker, mentions_media_site, parse_window_title,
    MediaRecord, PlayerDatabase,
};
use tokio::time::Instant;
use tracing::debug;

use super::has_program;
use crate::command;
use crate::error::DetectError;
use crate::probe::Probe;

const OSASCRIPT: &str = "osascript";
const OSASCRIPT_PATH: &str = "/usr/bin/osascript";

/// Asks scriptable players over AppleScript, then falls back to browser
/// window titles through System Events.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppleScriptProbe;

#[async_trait]
impl Probe for AppleScriptProbe {
    fn id(&self) -> &'static str {
        "applescript"
    }

    fn name(&self) -> &'static str {
        "macOS/AppleScript"
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "macos") && (Path::new(OSASCRIPT_PATH).exists() || has_program(OSASCRIPT))
    }

    async fn detect(&self, deadline: Instant) -> Result<Option<MediaRecord>, DetectError> {
        if let Some(record) = playing_app(deadline).await? {
            return Ok(Some(record));
        }
        let windows = browser_windows(deadline).await?;
        Ok(pick_browser_media(&windows))
    }
}

async fn osascript(script: &str, deadline: Instant) -> Result<String, DetectError> {
    let out = command::run(OSASCRIPT, ["-e", script], deadline).await?;
    Ok(out.trim().to_string())
}

/// Phase one: the first scriptable player that reports `playing`.
async fn playing_app(deadline: Instant) -> Result<Option<MediaRecord>, DetectError> {
    for player in PlayerDatabase::embedded().scriptable_players() {
        let Some(app) = player.applescript.as_deref() else {
            continue;
        };
        match now_playing(app, deadline).await {
            Ok(Some(track)) => {
                let title = clean_title(&track.title);
                let kind = classify(&title, &player.name);
                if let Some(record) = MediaRecord::new(title, player.name.as_str()) {
                    return Ok(Some(
                        record
                            .with_artist(track.artist)
                            .with_album(track.album)
                            .with_kind(kind),
                    ));
                }
            }
            Ok(None) => {}
            Err(e) if e.is_timeout() => return Err(e),
            Err(e) => debug!(app, "AppleScript query failed: {e}"),
        }
    }
    Ok(None)
}

struct Track {
    title: String,
    artist: String,
    album: String,
}

async fn now_playing(app: &str, deadline: Instant) -> Result<Option<Track>, DetectError> {
    // `tell` would launch the app, so check it is running first.
    let running = osascript(&format!("application \"{app}\" is running"), deadline).await?;
    if running != "true" {
        return Ok(None);
    }

    let state = osascript(
        &format!("tell application \"{app}\" to player state as string"),
        deadline,
    )
    .await?;
    if state != "playing" {
        return Ok(None);
    }

    // One call per field: a player missing one property should not lose the
    // others.
    Ok(Some(Track {
        title: track_field(app, "name", deadline).await,
        artist: track_field(app, "artist", deadline).await,
        album: track_field(app, "album", deadline).await,
    }))
}

async fn track_field(app: &str, field: &str, deadline: Instant) -> String {
    let script = format!("tell application \"{app}\" to {field} of current track as string");
    match osascript(&script, deadline).await {
        Ok(value) if value != "missing value" => value,
        Ok(_) => String::new(),
        Err(e) => {
            debug!(app, field, "Track field unavailable: {e}");
            String::new()
        }
    }
}

/// Phase two input: `(browser display name, window title)` pairs.
async fn browser_windows(deadline: Instant) -> Result<Vec<(String, String)>, DetectError> {
    let mut windows = Vec::new();
    for browser in PlayerDatabase::embedded().browsers() {
        let Some(process) = browser.applescript.as_deref() else {
            continue;
        };
        let script = format!(
            "tell application \"System Events\"\n\
             if not (exists application process \"{process}\") then return \"\"\n\
             set AppleScript's text item delimiters to linefeed\n\
             return (name of every window of application process \"{process}\") as text\n\
             end tell"
        );
        match osascript(&script, deadline).await {
            Ok(out) => windows.extend(
                out.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| (browser.name.clone(), line.to_string())),
            ),
            Err(e) if e.is_timeout() => return Err(e),
            Err(e) => debug!(process, "Could not list browser windows: {e}"),
        }
    }
    Ok(windows)
}

/// Prefer windows with an explicit playing marker over windows that only
/// mention a media site.
fn pick_browser_media(windows: &[(String, String)]) -> Option<MediaRecord> {
    let marked = windows.iter().filter(|(_, title)| has_playing_marker(title));
    let sites = windows
        .iter()
        .filter(|(_, title)| !has_playing_marker(title) && mentions_media_site(title));

    marked
        .chain(sites)
        .find_map(|(browser, title)| parse_window_title(title, browser))
}

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use soundtrack_parse::{classify, clean_title, display_name, MediaRecord};
use tokio::time::Instant;
use tracing::debug;

use super::{has_program, is_wsl};
use crate::command;
use crate::error::DetectError;
use crate::probe::Probe;

const POWERSHELL: &str = "powershell.exe";

/// Script evaluated on the Windows host. It applies the title rules there and
/// prints at most one JSON object.
const HOST_SCRIPT: &str = include_str!("../../data/wsl_media.ps1");

/// Reads Windows window titles from inside WSL by shelling out to the host's
/// PowerShell.
#[derive(Debug, Default, Clone, Copy)]
pub struct WslBridgeProbe;

#[async_trait]
impl Probe for WslBridgeProbe {
    fn id(&self) -> &'static str {
        "wsl"
    }

    fn name(&self) -> &'static str {
        "WSL2/Windows host"
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "linux") && is_wsl() && has_program(POWERSHELL)
    }

    async fn detect(&self, deadline: Instant) -> Result<Option<MediaRecord>, DetectError> {
        let encoded = encoded_script();
        let args = [
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-EncodedCommand",
            encoded.as_str(),
        ];
        let out = command::run(POWERSHELL, args, deadline).await?;
        parse_host_output(&out)
    }
}

/// PowerShell's `-EncodedCommand` takes base64 of UTF-16LE, which sidesteps
/// quoting the script through the Windows command line.
fn encoded_script() -> String {
    let utf16: Vec<u8> = HOST_SCRIPT
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    STANDARD.encode(utf16)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HostMedia {
    #[serde(default)]
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    #[serde(default)]
    source: String,
}

/// Skip banner and copyright lines the host shell may print, returning the
/// JSON line.
fn extract_payload(output: &str) -> Option<&str> {
    output
        .lines()
        .map(|line| line.trim().trim_start_matches('\u{feff}'))
        .find(|line| line.starts_with('{'))
}

fn parse_host_output(output: &str) -> Result<Option<MediaRecord>, DetectError> {
    let Some(payload) = extract_payload(output) else {
        debug!("Windows host reported no media window");
        return Ok(None);
    };
    let host: HostMedia =
        serde_json::from_str(payload).map_err(|e| DetectError::Payload(e.to_string()))?;

    let source = display_name(&host.source);
    let title = clean_title(&host.title);
    let kind = classify(&title, &source);

    Ok(MediaRecord::new(title, source).map(|record| {
        record
            .with_artist(host.artist)
            .with_album(host.album)
            .with_kind(kind)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundtrack_parse::MediaKind;

    #[test]
    fn test_payload_after_banner() {
        let out = "Windows PowerShell\r\n\
                   Copyright (C) Microsoft Corporation. All rights reserved.\r\n\
                   \r\n\
                   Try the new cross-platform PowerShell https://aka.ms/pscore6\r\n\
                   \r\n\
                   {\"Title\":\"Hamnitishi\",\"Artist\":\"E-Sir\",\"Album\":\"\",\"Source\":\"Spotify\"}\r\n";
        let record = parse_host_output(out).unwrap().unwrap();
        assert_eq!(record.title(), "Hamnitishi");
        assert_eq!(record.artist(), "E-Sir");
        assert_eq!(record.source(), "Spotify");
        assert_eq!(record.kind(), MediaKind::Song);
    }

    #[test]
    fn test_youtube_source_is_video() {
        let out = r#"{"Title":"Rust in 100 Seconds","Artist":"","Album":"","Source":"YouTube"}"#;
        let record = parse_host_output(out).unwrap().unwrap();
        assert_eq!(record.source(), "YouTube");
        assert_eq!(record.kind(), MediaKind::Video);
    }

    #[test]
    fn test_browser_exe_source_resolved() {
        let out = r#"{"Title":"Suzanna","Artist":"Sauti Sol","Source":"msedge.exe"}"#;
        let record = parse_host_output(out).unwrap().unwrap();
        assert_eq!(record.source(), "Microsoft Edge");
        assert_eq!(record.album(), "");
    }

    #[test]
    fn test_empty_output_is_none() {
        assert!(parse_host_output("").unwrap().is_none());
        assert!(parse_host_output("Windows PowerShell\r\n\r\n").unwrap().is_none());
    }

    #[test]
    fn test_empty_title_is_none() {
        let out = r#"{"Title":"","Artist":"x","Album":"","Source":"Spotify"}"#;
        assert!(parse_host_output(out).unwrap().is_none());
    }

    #[test]
    fn test_garbage_payload_is_error() {
        let err = parse_host_output("{not json").unwrap_err();
        assert!(matches!(err, DetectError::Payload(_)));
    }

    #[test]
    fn test_encoded_script_fits_command_line() {
        let encoded = encoded_script();
        assert!(!encoded.is_empty());
        // Windows caps a command line at 32767 UTF-16 units.
        assert!(encoded.len() < 30_000, "encoded script is {} bytes", encoded.len());
    }
}

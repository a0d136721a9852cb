//! Turning raw player identifiers into display names, and guessing the
//! kind of media from where it plays.

use crate::players::PlayerDatabase;
use crate::record::MediaKind;

/// Source name used when a player cannot be identified at all.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Resolve a raw player identifier into a human-readable source name.
///
/// Known players resolve through the embedded database. Anything else has
/// path components, `.exe`, app-model `!Entry` suffixes, package hashes and
/// bus qualifiers (`.instance1234`) stripped, and its leading letter
/// capitalized.
pub fn display_name(identifier: &str) -> String {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return UNKNOWN_SOURCE.to_string();
    }
    if let Some(player) = PlayerDatabase::embedded().find_by_identity(identifier) {
        return player.name.clone();
    }

    let mut name = identifier;

    if let Some(pos) = name.rfind(['\\', '/']) {
        name = &name[pos + 1..];
    }
    if let Some((head, _)) = name.split_once('!') {
        name = head;
    }
    if let Some(stem) = strip_suffix_ignore_case(name, ".exe") {
        name = stem;
    }

    // UWP package hash suffix (e.g. "App_1a2b3c4d5e6f7").
    if let Some(pos) = name.rfind('_') {
        let suffix = &name[pos + 1..];
        if suffix.len() >= 8 && suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            name = &name[..pos];
        }
    }

    // Bus qualifiers ("vendor.instance42") and reverse-DNS tails.
    if let Some((head, _)) = name.split_once('.') {
        if !head.is_empty() {
            name = head;
        }
    }

    if name.is_empty() {
        return UNKNOWN_SOURCE.to_string();
    }
    capitalize_first(name)
}

/// `suffix` must be ASCII; the cut is then always on a char boundary.
fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = s.len().checked_sub(suffix.len())?;
    let tail = s.get(cut..)?;
    if cut > 0 && tail.eq_ignore_ascii_case(suffix) {
        s.get(..cut)
    } else {
        None
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Best guess at the kind of media given its title and source name.
pub fn classify(title: &str, source: &str) -> MediaKind {
    let source_lower = source.to_lowercase();
    let title_lower = title.to_lowercase();

    if source_lower.contains("podcast")
        || title_lower.contains("podcast")
        || title_lower.contains("episode")
    {
        return MediaKind::Podcast;
    }
    if source_lower.contains("youtube music") || source_lower.contains("soundcloud") {
        return MediaKind::Song;
    }
    if source_lower.contains("youtube") || source_lower.contains("twitch") {
        return MediaKind::Video;
    }
    if source.is_empty() || source == UNKNOWN_SOURCE {
        return MediaKind::Unknown;
    }

    match PlayerDatabase::embedded().find_by_identity(source) {
        Some(player) if player.kind != MediaKind::Unknown => player.kind,
        Some(_) => MediaKind::Unknown,
        None => MediaKind::Song,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_known_players() {
        assert_eq!(display_name("spotify"), "Spotify");
        assert_eq!(display_name("Spotify.exe"), "Spotify");
        assert_eq!(display_name("chromium.instance1234"), "Chromium");
        assert_eq!(display_name("chrome.exe"), "Google Chrome");
        assert_eq!(display_name("YouTubeMusic"), "YouTube Music");
    }

    #[test]
    fn test_display_name_capitalizes_unknown() {
        assert_eq!(display_name("quodlibet"), "Quodlibet");
        assert_eq!(display_name("kasts.instance77"), "Kasts");
    }

    #[test]
    fn test_display_name_strips_exe_and_path() {
        assert_eq!(display_name("C:\\Program Files\\Foobar\\foobar2000.exe"), "Foobar2000");
    }

    #[test]
    fn test_display_name_non_ascii_identifiers() {
        assert_eq!(display_name("名前ab"), "名前ab");
        assert_eq!(display_name("a€xy"), "A€xy");
        assert_eq!(display_name("プレーヤー.EXE"), "プレーヤー");
    }

    #[test]
    fn test_display_name_strips_package_hash_and_entry() {
        assert_eq!(
            display_name("Contoso.Radio_1a2b3c4d5e6f7!App"),
            "Contoso"
        );
    }

    #[test]
    fn test_display_name_empty() {
        assert_eq!(display_name("   "), UNKNOWN_SOURCE);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Lo-Fi Hip Hop", "YouTube Music"), MediaKind::Song);
        assert_eq!(classify("Some Video", "YouTube"), MediaKind::Video);
        assert_eq!(classify("Episode 42: Rust", "Spotify"), MediaKind::Podcast);
        assert_eq!(classify("Hamnitishi", "Spotify"), MediaKind::Song);
        assert_eq!(classify("Anything", "Firefox"), MediaKind::Video);
        assert_eq!(classify("Anything", "Podcasts"), MediaKind::Podcast);
        assert_eq!(classify("Anything", UNKNOWN_SOURCE), MediaKind::Unknown);
        assert_eq!(classify("Anything", "Quodlibet"), MediaKind::Song);
    }
}

use regex::Regex;
use std::sync::LazyLock;

use crate::record::MediaKind;
use crate::source::classify;

/// A decorated-stripped window title plus the display name of the
/// application that produced it.
#[derive(Debug, Clone, Copy)]
pub struct TitleInput<'a> {
    pub text: &'a str,
    pub source: &'a str,
}

/// Fields pulled out of a title by a rule, before cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub artist: String,
    pub source: String,
    pub kind: MediaKind,
}

/// One entry of the ordered rule table.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&TitleInput<'_>) -> bool,
    pub extract: fn(&TitleInput<'_>) -> Option<Extracted>,
}

// ── Regex patterns (compiled once) ──────────────────────────────

static RE_YT_MUSIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) - (.+) - YouTube Music$").unwrap());

static RE_YT_MUSIC_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) - YouTube Music$").unwrap());

static RE_YT_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) - (.+) - YouTube$").unwrap());

static RE_YT_SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+) - YouTube$").unwrap());

static RE_YT_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\s*YouTube.*$").unwrap());

static RE_SOUNDCLOUD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Stream )?(.+) by (.+?) \| [^|]*SoundCloud$").unwrap()
});

/// Spotify's web player titles its tab `<title> • <artist>`, sometimes
/// with a ` | Spotify` tail.
static RE_SPOTIFY_WEB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) • (.+?)( \| Spotify)?$").unwrap());

/// First ` - ` splits: artist is the first segment.
static RE_FIRST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) - (.+)$").unwrap());

/// Last ` - ` splits: title is the trailing segment.
static RE_LAST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) - (.+)$").unwrap());

/// Rules in priority order. More specific site rules come first because a
/// "YouTube Music" title also matches the plain YouTube rules, and every
/// site title matches the generic separator.
pub static RULES: &[Rule] = &[
    Rule {
        name: "youtube-music",
        matches: is_youtube_music,
        extract: extract_youtube_music,
    },
    Rule {
        name: "youtube-music-single",
        matches: is_youtube_music_single,
        extract: extract_youtube_music_single,
    },
    Rule {
        name: "youtube-artist-title",
        matches: is_youtube_pair,
        extract: extract_youtube_pair,
    },
    Rule {
        name: "youtube-single",
        matches: is_youtube_single,
        extract: extract_youtube_single,
    },
    Rule {
        name: "youtube-generic",
        matches: is_youtube_generic,
        extract: extract_youtube_generic,
    },
    Rule {
        name: "soundcloud",
        matches: is_soundcloud,
        extract: extract_soundcloud,
    },
    Rule {
        name: "spotify-app",
        matches: is_spotify_app,
        extract: extract_spotify_app,
    },
    Rule {
        name: "spotify-web",
        matches: is_spotify_web,
        extract: extract_spotify_web,
    },
    Rule {
        name: "generic-separator",
        matches: is_separated,
        extract: extract_separated,
    },
];

/// Run the rule table, returning the first rule that matched and extracted
/// something.
pub fn first_match(input: &TitleInput<'_>) -> Option<(&'static Rule, Extracted)> {
    RULES
        .iter()
        .filter(|rule| (rule.matches)(input))
        .find_map(|rule| (rule.extract)(input).map(|extracted| (rule, extracted)))
}

/// Run the rule table, falling back to the whole text as an unattributed
/// title.
pub fn apply(input: &TitleInput<'_>) -> Extracted {
    match first_match(input) {
        Some((rule, extracted)) => {
            tracing::trace!(rule = rule.name, text = input.text, "Title rule matched");
            extracted
        }
        None => Extracted {
            title: input.text.trim().to_string(),
            artist: String::new(),
            source: input.source.to_string(),
            kind: classify(input.text, input.source),
        },
    }
}

/// Media sites whose name in a tab title hints that the tab plays something.
pub const MEDIA_SITES: &[&str] = &[
    "YouTube",
    "SoundCloud",
    "Spotify",
    "Bandcamp",
    "Apple Music",
    "Deezer",
    "Tidal",
    "Twitch",
];

/// Whether a tab title mentions one of [`MEDIA_SITES`].
pub fn mentions_media_site(title: &str) -> bool {
    MEDIA_SITES.iter().any(|site| title.contains(site))
}

fn pair(
    caps: &regex::Captures<'_>,
    title_group: usize,
    artist_group: usize,
) -> (String, String) {
    (
        caps[title_group].trim().to_string(),
        caps[artist_group].trim().to_string(),
    )
}

fn is_youtube_music(input: &TitleInput<'_>) -> bool {
    RE_YT_MUSIC.is_match(input.text)
}

fn extract_youtube_music(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_YT_MUSIC.captures(input.text)?;
    let (title, artist) = pair(&caps, 1, 2);
    Some(Extracted {
        title,
        artist,
        source: "YouTube Music".into(),
        kind: MediaKind::Song,
    })
}

fn is_youtube_music_single(input: &TitleInput<'_>) -> bool {
    RE_YT_MUSIC_SINGLE.is_match(input.text)
}

fn extract_youtube_music_single(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_YT_MUSIC_SINGLE.captures(input.text)?;
    Some(Extracted {
        title: caps[1].trim().to_string(),
        artist: String::new(),
        source: "YouTube Music".into(),
        kind: MediaKind::Song,
    })
}

fn is_youtube_pair(input: &TitleInput<'_>) -> bool {
    RE_YT_PAIR.is_match(input.text)
}

fn extract_youtube_pair(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_YT_PAIR.captures(input.text)?;
    let (title, artist) = pair(&caps, 2, 1);
    Some(Extracted {
        title,
        artist,
        source: "YouTube".into(),
        kind: MediaKind::Video,
    })
}

fn is_youtube_single(input: &TitleInput<'_>) -> bool {
    RE_YT_SINGLE.is_match(input.text)
}

fn extract_youtube_single(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_YT_SINGLE.captures(input.text)?;
    Some(Extracted {
        title: caps[1].trim().to_string(),
        artist: String::new(),
        source: "YouTube".into(),
        kind: MediaKind::Video,
    })
}

fn is_youtube_generic(input: &TitleInput<'_>) -> bool {
    input.text.contains("YouTube") && RE_FIRST_SEPARATOR.is_match(input.text)
}

fn extract_youtube_generic(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_FIRST_SEPARATOR.captures(input.text)?;
    let artist = caps[1].trim().to_string();
    let title = RE_YT_TAIL.replace(&caps[2], "").trim().to_string();
    if title.is_empty() || artist.contains("YouTube") {
        return None;
    }
    Some(Extracted {
        title,
        artist,
        source: "YouTube".into(),
        kind: MediaKind::Video,
    })
}

fn is_soundcloud(input: &TitleInput<'_>) -> bool {
    RE_SOUNDCLOUD.is_match(input.text)
}

fn extract_soundcloud(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_SOUNDCLOUD.captures(input.text)?;
    let (title, artist) = pair(&caps, 1, 2);
    Some(Extracted {
        title,
        artist,
        source: "SoundCloud".into(),
        kind: MediaKind::Song,
    })
}

fn is_spotify_app(input: &TitleInput<'_>) -> bool {
    input.source == "Spotify" && RE_FIRST_SEPARATOR.is_match(input.text)
}

fn extract_spotify_app(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_FIRST_SEPARATOR.captures(input.text)?;
    let (title, artist) = pair(&caps, 2, 1);
    Some(Extracted {
        title,
        artist,
        source: "Spotify".into(),
        kind: MediaKind::Song,
    })
}

/// A bullet alone is too common to claim the source: it needs the tail or
/// a Spotify hint.
fn is_spotify_web(input: &TitleInput<'_>) -> bool {
    RE_SPOTIFY_WEB
        .captures(input.text)
        .is_some_and(|caps| caps.get(3).is_some() || input.source == "Spotify")
}

fn extract_spotify_web(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_SPOTIFY_WEB.captures(input.text)?;
    let (title, artist) = pair(&caps, 1, 2);
    Some(Extracted {
        title,
        artist,
        source: "Spotify".into(),
        kind: MediaKind::Song,
    })
}

fn is_separated(input: &TitleInput<'_>) -> bool {
    RE_LAST_SEPARATOR.is_match(input.text)
}

fn extract_separated(input: &TitleInput<'_>) -> Option<Extracted> {
    let caps = RE_LAST_SEPARATOR.captures(input.text)?;
    let (title, artist) = pair(&caps, 2, 1);
    let kind = classify(&title, input.source);
    Some(Extracted {
        title,
        artist,
        source: input.source.to_string(),
        kind,
    })
}

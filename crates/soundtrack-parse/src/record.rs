use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of media a record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Song,
    Podcast,
    Video,
    #[default]
    Unknown,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Song => "song",
            MediaKind::Podcast => "podcast",
            MediaKind::Video => "video",
            MediaKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that is currently playing.
///
/// A record always carries a non-empty title: "nothing playing" is
/// represented by the absence of a record, never by a blank one. Fields are
/// read-only once the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    title: String,
    artist: String,
    album: String,
    source: String,
    kind: MediaKind,
}

impl MediaRecord {
    /// Build a record, or `None` if the title is blank.
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Option<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title,
            artist: String::new(),
            album: String::new(),
            source: source.into().trim().to_string(),
            kind: MediaKind::Unknown,
        })
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into().trim().to_string();
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into().trim().to_string();
        self
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Empty when unknown.
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Empty when unknown.
    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn has_artist(&self) -> bool {
        !self.artist.is_empty()
    }
}

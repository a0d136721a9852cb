use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::record::MediaKind;

/// Embedded player database.
const EMBEDDED_DB: &str = include_str!("../data/players.toml");

static EMBEDDED: LazyLock<PlayerDatabase> = LazyLock::new(|| {
    PlayerDatabase::from_toml(EMBEDDED_DB).expect("embedded players.toml should be valid")
});

/// Definition of a media player or browser and how to recognize it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    /// Display name (e.g., "Spotify", "Google Chrome").
    pub name: String,
    /// Lowercase substrings of bus names, executable names or app ids.
    #[serde(default)]
    pub identities: Vec<String>,
    /// Window titles shown when the player has nothing loaded.
    #[serde(default)]
    pub bare_titles: Vec<String>,
    /// Whether this entry is a web browser.
    #[serde(default)]
    pub is_browser: bool,
    /// macOS application name (players) or process name (browsers).
    #[serde(default)]
    pub applescript: Option<String>,
    /// Kind of media this player usually plays.
    #[serde(default)]
    pub kind: MediaKind,
}

impl PlayerDef {
    /// Whether `title` is one of the titles this player shows while idle.
    pub fn is_bare_title(&self, title: &str) -> bool {
        self.name.eq_ignore_ascii_case(title)
            || self.bare_titles.iter().any(|t| t.eq_ignore_ascii_case(title))
    }
}

/// Wrapper for TOML deserialization.
#[derive(Debug, Deserialize)]
struct PlayerDbFile {
    #[serde(rename = "player")]
    players: Vec<PlayerDef>,
}

/// Database of known players and browsers, in priority order.
#[derive(Debug, Clone, Default)]
pub struct PlayerDatabase {
    pub players: Vec<PlayerDef>,
}

impl PlayerDatabase {
    /// The database compiled into the binary.
    pub fn embedded() -> &'static PlayerDatabase {
        &EMBEDDED
    }

    /// Load a player database from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let db: PlayerDbFile = toml::from_str(toml_str)?;
        Ok(Self {
            players: db.players,
        })
    }

    /// Find a player by display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&PlayerDef> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Find a player by display name, falling back to a case-insensitive
    /// substring match on its identities.
    pub fn find_by_identity(&self, identifier: &str) -> Option<&PlayerDef> {
        if let Some(player) = self.find_by_name(identifier) {
            return Some(player);
        }
        let lower = identifier.to_lowercase();
        self.players
            .iter()
            .find(|p| p.identities.iter().any(|id| lower.contains(id.as_str())))
    }

    /// Whether `title` is just the name of an idle player or browser.
    pub fn is_bare_title(&self, title: &str) -> bool {
        let title = title.trim();
        self.players.iter().any(|p| p.is_bare_title(title))
    }

    /// Browsers, in priority order.
    pub fn browsers(&self) -> impl Iterator<Item = &PlayerDef> {
        self.players.iter().filter(|p| p.is_browser)
    }

    /// Non-browser players that can be queried through AppleScript.
    pub fn scriptable_players(&self) -> impl Iterator<Item = &PlayerDef> {
        self.players
            .iter()
            .filter(|p| !p.is_browser && p.applescript.is_some())
    }
}

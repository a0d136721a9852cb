use soundtrack_parse::MediaRecord;

use crate::config::FormatConfig;

pub const DEFAULT_ICON: &str = "🎵";

/// Marker shared by every commit line, used to spot already-annotated
/// messages.
pub const COMMIT_MARKER: &str = "Currently playing:";

/// Render the commit-message line for a record with the default icon.
pub fn format_record(record: &MediaRecord) -> String {
    Formatter::default().commit_line(record)
}

/// Renders records as text. Holds only presentation settings.
#[derive(Debug, Clone)]
pub struct Formatter {
    icon: String,
    status_max_width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            status_max_width: 48,
        }
    }
}

impl Formatter {
    pub fn from_config(config: &FormatConfig) -> Self {
        Self {
            icon: config.icon.clone(),
            status_max_width: config.status_max_width,
        }
    }

    /// `🎵 Currently playing: "<title>" by <artist> (<source>)`, without the
    /// `by` clause when the artist is unknown.
    pub fn commit_line(&self, record: &MediaRecord) -> String {
        let icon = &self.icon;
        if record.has_artist() {
            format!(
                "{icon} {COMMIT_MARKER} \"{}\" by {} ({})",
                record.title(),
                record.artist(),
                record.source()
            )
        } else {
            format!(
                "{icon} {COMMIT_MARKER} \"{}\" ({})",
                record.title(),
                record.source()
            )
        }
    }

    /// Compact one-liner for status bars, cut to the configured width.
    pub fn status_line(&self, record: &MediaRecord) -> String {
        let text = if record.has_artist() {
            format!("{} {} — {}", self.icon, record.title(), record.artist())
        } else {
            format!("{} {}", self.icon, record.title())
        };
        truncate(&text, self.status_max_width)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, artist: &str, source: &str) -> MediaRecord {
        MediaRecord::new(title, source).unwrap().with_artist(artist)
    }

    #[test]
    fn test_commit_line_with_artist() {
        assert_eq!(
            format_record(&record("Hamnitishi", "E-Sir", "Spotify")),
            "🎵 Currently playing: \"Hamnitishi\" by E-Sir (Spotify)"
        );
    }

    #[test]
    fn test_commit_line_without_artist() {
        assert_eq!(
            format_record(&record("Rust in 100 Seconds", "", "YouTube")),
            "🎵 Currently playing: \"Rust in 100 Seconds\" (YouTube)"
        );
    }

    #[test]
    fn test_commit_line_is_stable() {
        let r = record("Hamnitishi", "E-Sir", "Spotify");
        let formatter = Formatter::default();
        assert_eq!(formatter.commit_line(&r), formatter.commit_line(&r));
    }

    #[test]
    fn test_custom_icon() {
        let formatter = Formatter::from_config(&FormatConfig {
            icon: "♪".into(),
            status_max_width: 10,
        });
        assert_eq!(
            formatter.commit_line(&record("Suzanna", "", "Firefox")),
            "♪ Currently playing: \"Suzanna\" (Firefox)"
        );
    }

    #[test]
    fn test_status_line_truncates() {
        let formatter = Formatter::from_config(&FormatConfig {
            icon: "🎵".into(),
            status_max_width: 12,
        });
        let line = formatter.status_line(&record("Bohemian Rhapsody", "Queen", "YouTube"));
        assert_eq!(line, "🎵 Bohemian…");
        assert_eq!(line.chars().count(), 11);
    }

    #[test]
    fn test_status_line_short() {
        let line = Formatter::default().status_line(&record("Suzanna", "Sauti Sol", "Spotify"));
        assert_eq!(line, "🎵 Suzanna — Sauti Sol");
    }
}

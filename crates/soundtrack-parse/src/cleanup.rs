use regex::Regex;
use std::sync::LazyLock;

// ── Regex patterns (compiled once) ──────────────────────────────

static RE_NOTIFICATION_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d+\)\s+").unwrap());

static RE_PLAYING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[▶►🔊🔉🔈♪♫]\x{FE0F}?\s*)+").unwrap());

static RE_BROWSER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\s+and \d+ more pages?)?(?:\s+[-–—]\s+(?:Personal|Work|Profile \d+))?\s+[-–—]\s+(?:Google Chrome|Chromium|Mozilla Firefox|Firefox|Microsoft\x{200B}?\s*Edge|Brave|Opera|Vivaldi|Safari|Arc)$",
    )
    .unwrap()
});

static RE_MEMORY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[-–—|]?\s*memory usage\s*[-–—:]\s*[\d.,]+\s*[kmg]i?b\s*$").unwrap()
});

static RE_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:\([^()]*\)|\[[^\[\]]*\]|【[^【】]*】)\s*").unwrap());

static RE_FEATURING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:feat\.|ft\.|featuring)\s+.*$").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const DANGLING: &[char] = &['-', '–', '—', '|', '•', '·'];

/// Whether a window title carries an explicit "now playing" marker.
pub fn has_playing_marker(raw: &str) -> bool {
    let trimmed = RE_NOTIFICATION_COUNT.replace(raw.trim(), "");
    RE_PLAYING_MARKER.is_match(&trimmed)
        || raw.contains('🔊')
        || raw.to_lowercase().contains("now playing")
}

/// Strip the decorations a window manager or browser adds around a page
/// title: notification counters, playing markers, the trailing browser name
/// and memory-usage hints.
pub fn strip_decorations(raw: &str) -> String {
    let text = raw.trim();
    let text = RE_NOTIFICATION_COUNT.replace(text, "");
    let text = RE_PLAYING_MARKER.replace(&text, "");
    let text = RE_MEMORY_SUFFIX.replace(&text, "");
    let text = RE_BROWSER_SUFFIX.replace(&text, "");
    let text = RE_MEMORY_SUFFIX.replace(&text, "");
    text.trim().to_string()
}

/// Remove qualifiers that are not part of the track name: bracketed notes
/// such as "(Official Video)", trailing featuring clauses and memory-usage
/// suffixes.
///
/// Runs to a fixpoint, so `clean_title(clean_title(x)) == clean_title(x)`.
/// If nothing is left the trimmed input is returned instead.
pub fn clean_title(title: &str) -> String {
    let original = title.trim();
    let mut current = original.to_string();
    loop {
        let next = clean_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    if current.is_empty() {
        original.to_string()
    } else {
        current
    }
}

fn clean_once(text: &str) -> String {
    let text = RE_MEMORY_SUFFIX.replace(text, "");
    let text = RE_BRACKETED.replace_all(&text, " ");
    let text = RE_FEATURING.replace(&text, "");
    let text = RE_WHITESPACE.replace_all(&text, " ");
    text.trim()
        .trim_matches(DANGLING)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_official_video() {
        assert_eq!(clean_title("Bohemian Rhapsody (Official Video)"), "Bohemian Rhapsody");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in [
            "Bohemian Rhapsody (Official Video)",
            "Song [Official Audio] (Lyrics)",
            "Song ft. A & B (Remix)",
            "Outer (inner (nested) tail) Title",
            "(Official Video)",
            "Track - Memory usage - 512 MB",
            "Plain",
        ] {
            let once = clean_title(input);
            assert_eq!(clean_title(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_clean_featuring() {
        assert_eq!(clean_title("Hamnitishi feat. Nonini"), "Hamnitishi");
        assert_eq!(clean_title("Hamnitishi featuring Nonini"), "Hamnitishi");
        assert_eq!(clean_title("Great feat of Strength"), "Great feat of Strength");
        assert_eq!(clean_title("Soft tissue"), "Soft tissue");
        assert_eq!(clean_title("Song ft. A & B (Remix)"), "Song");
    }

    #[test]
    fn test_clean_nested_brackets() {
        assert_eq!(clean_title("Outer (inner (nested) tail) Title"), "Outer Title");
    }

    #[test]
    fn test_clean_dangling_separator() {
        assert_eq!(clean_title("Song - [Official]"), "Song");
    }

    #[test]
    fn test_clean_keeps_original_when_emptied() {
        assert_eq!(clean_title("  (Official Video) "), "(Official Video)");
    }

    #[test]
    fn test_clean_memory_suffix() {
        assert_eq!(clean_title("Track - Memory usage - 512 MB"), "Track");
    }

    #[test]
    fn test_strip_browser_suffix() {
        assert_eq!(
            strip_decorations("Artist - Song - YouTube - Google Chrome"),
            "Artist - Song - YouTube"
        );
        assert_eq!(
            strip_decorations("Artist - Song — Mozilla Firefox"),
            "Artist - Song"
        );
        assert_eq!(
            strip_decorations("Song - YouTube and 3 more pages - Personal - Microsoft\u{200B} Edge"),
            "Song - YouTube"
        );
    }

    #[test]
    fn test_strip_markers_and_counters() {
        assert_eq!(strip_decorations("(3) ▶ Song - YouTube"), "Song - YouTube");
        assert_eq!(strip_decorations("🔊 Song - YouTube"), "Song - YouTube");
    }

    #[test]
    fn test_has_playing_marker() {
        assert!(has_playing_marker("▶ Song - YouTube"));
        assert!(has_playing_marker("(2) ► Song - YouTube"));
        assert!(has_playing_marker("Song - YouTube 🔊"));
        assert!(!has_playing_marker("Song - YouTube"));
    }
}

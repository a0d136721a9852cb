//! Best-effort parsing of window and tab titles into media records.
//!
//! Everything in this crate is pure: no processes, no files. Probes in
//! `soundtrack-detect` feed it raw strings.

pub mod cleanup;
pub mod players;
pub mod record;
pub mod rules;
pub mod source;

pub use cleanup::{clean_title, has_playing_marker, strip_decorations};
pub use players::{PlayerDatabase, PlayerDef};
pub use record::{MediaKind, MediaRecord};
pub use rules::{mentions_media_site, Rule, TitleInput, RULES};
pub use source::{classify, display_name, UNKNOWN_SOURCE};

/// Titles that only ever mean "a media site is open, nothing is playing".
static PLACEHOLDER_TITLES: phf::Set<&'static str> = phf::phf_set! {
    "new tab",
    "new private tab",
    "start page",
    "untitled",
    "about:blank",
    "youtube",
    "youtube music",
    "soundcloud",
    "spotify - web player",
    "spotify - web player: music for everyone",
};

/// Parse a window or tab title into a media record.
///
/// `hint` names the application that owns the window (a bus name,
/// executable or display name); it becomes the source when no site rule
/// claims the title. Returns `None` for blank titles and for titles that are
/// only the name of an idle application.
pub fn parse_window_title(raw: &str, hint: &str) -> Option<MediaRecord> {
    let text = strip_decorations(raw);
    let source = display_name(hint);

    if is_placeholder(&text, &source) {
        tracing::trace!(title = raw, "Ignoring idle window title");
        return None;
    }

    let extracted = rules::apply(&TitleInput {
        text: &text,
        source: &source,
    });
    let title = clean_title(&extracted.title);

    Some(
        MediaRecord::new(title, extracted.source)?
            .with_artist(extracted.artist)
            .with_kind(extracted.kind),
    )
}

fn is_placeholder(text: &str, source: &str) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case(source)
        || PLACEHOLDER_TITLES.contains(text.to_lowercase().as_str())
        || PlayerDatabase::embedded().is_bare_title(text)
}

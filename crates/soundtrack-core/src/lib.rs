pub mod commit;
pub mod config;
pub mod error;
pub mod format;
pub mod hook;
pub mod install;

pub use config::AppConfig;
pub use error::SoundtrackError;
pub use format::{format_record, Formatter};
pub use hook::{annotate_message_file, HookOutcome};

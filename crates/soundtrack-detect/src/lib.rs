pub mod command;
pub mod coordinator;
pub mod error;
pub mod platform;
pub mod probe;

pub use coordinator::{Coordinator, DetectionReport, ProbeAttempt, ProbeOutcome};
pub use error::DetectError;
pub use probe::Probe;
pub use soundtrack_parse::{MediaKind, MediaRecord};

use async_trait::async_trait;
use tokio::time::Instant;

use soundtrack_parse::MediaRecord;

use crate::error::DetectError;

/// One strategy for finding out what is playing in one kind of environment.
///
/// Probes are stateless. `is_available` is a cheap static check and never
/// attempts detection; `detect` may spawn external programs, all of which
/// must be finished or killed by `deadline`.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Stable identifier used in configuration (e.g. "playerctl").
    fn id(&self) -> &'static str;

    /// Human-readable name for diagnostics.
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    /// `Ok(None)` means the probe ran and found nothing playing.
    async fn detect(&self, deadline: Instant) -> Result<Option<MediaRecord>, DetectError>;
}

use std::time::Duration;

use soundtrack_parse::MediaRecord;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

use crate::platform::{AppleScriptProbe, PlayerctlProbe, WslBridgeProbe};
use crate::probe::Probe;

/// What happened when the coordinator reached one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Unavailable,
    Found(MediaRecord),
    Nothing,
    Failed(String),
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct ProbeAttempt {
    pub probe: &'static str,
    pub outcome: ProbeOutcome,
}

/// Per-probe trace of one detection pass. Probes after the first hit are not
/// listed since they never ran.
#[derive(Debug, Clone, Default)]
pub struct DetectionReport {
    pub attempts: Vec<ProbeAttempt>,
}

impl DetectionReport {
    pub fn record(&self) -> Option<&MediaRecord> {
        self.attempts.iter().find_map(|a| match &a.outcome {
            ProbeOutcome::Found(record) => Some(record),
            _ => None,
        })
    }

    pub fn into_record(self) -> Option<MediaRecord> {
        self.attempts.into_iter().find_map(|a| match a.outcome {
            ProbeOutcome::Found(record) => Some(record),
            _ => None,
        })
    }

    /// No probe produced a result, for whatever reason.
    pub fn nothing_detected(&self) -> bool {
        self.record().is_none()
    }
}

/// Tries probes in a fixed order and returns the first record found.
pub struct Coordinator {
    probes: Vec<Box<dyn Probe>>,
}

impl Coordinator {
    pub fn new(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// Probes that make sense on this operating system, most reliable first.
    pub fn for_current_platform() -> Self {
        let mut probes: Vec<Box<dyn Probe>> = Vec::new();
        if cfg!(target_os = "linux") {
            probes.push(Box::new(PlayerctlProbe));
            probes.push(Box::new(WslBridgeProbe));
        }
        if cfg!(target_os = "macos") {
            probes.push(Box::new(AppleScriptProbe));
        }
        Self::new(probes)
    }

    /// Keep only probes whose id is listed, preserving the built-in order.
    pub fn with_sources<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        self.probes
            .retain(|probe| ids.iter().any(|id| id.as_ref() == probe.id()));
        self
    }

    /// Names of all configured probes, available or not.
    pub fn probe_names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Names of probes that could run in this environment.
    pub fn list_available(&self) -> Vec<&'static str> {
        self.probes
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }

    /// First record any available probe finds, or `None`. Each probe gets
    /// `timeout` of its own; failures and timeouts move on to the next probe.
    pub async fn detect(&self, timeout: Duration) -> Option<MediaRecord> {
        self.diagnose(timeout).await.into_record()
    }

    /// Same pass as [`Coordinator::detect`], keeping what happened at each
    /// probe.
    pub async fn diagnose(&self, timeout: Duration) -> DetectionReport {
        let mut report = DetectionReport::default();
        for probe in &self.probes {
            let outcome = attempt(probe.as_ref(), timeout).await;
            let found = matches!(outcome, ProbeOutcome::Found(_));
            report.attempts.push(ProbeAttempt {
                probe: probe.name(),
                outcome,
            });
            if found {
                break;
            }
        }
        report
    }
}

async fn attempt(probe: &dyn Probe, timeout: Duration) -> ProbeOutcome {
    if !probe.is_available() {
        debug!(probe = probe.name(), "Probe unavailable");
        return ProbeOutcome::Unavailable;
    }

    let deadline = Instant::now() + timeout;
    match timeout_at(deadline, probe.detect(deadline)).await {
        Ok(Ok(Some(record))) => {
            debug!(probe = probe.name(), title = record.title(), "Probe found media");
            ProbeOutcome::Found(record)
        }
        Ok(Ok(None)) => ProbeOutcome::Nothing,
        Ok(Err(e)) if e.is_timeout() => {
            debug!(probe = probe.name(), "Probe timed out: {e}");
            ProbeOutcome::TimedOut
        }
        Ok(Err(e)) => {
            debug!(probe = probe.name(), "Probe failed: {e}");
            ProbeOutcome::Failed(e.to_string())
        }
        Err(_) => {
            debug!(probe = probe.name(), "Probe timed out");
            ProbeOutcome::TimedOut
        }
    }
}

//! One-shot switch from the preferred rendering backend to the fallback one.
//!
//! The controller never touches backend resources. It only decides *when* to switch and tells
//! observers, which tear down the old backend and initialize the new one.

use crate::Error;

/// Grace window used by the demo page.
pub const DEFAULT_GRACE_MS: f64 = 600.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    #[default]
    Primary,
    Fallback,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnhealthyReason {
    /// The watchdog saw no visible content for longer than the grace window.
    SustainedInvisibility,
    /// Asset load or parse failed on the primary backend.
    LoadFailure,
    /// Reported directly by the caller.
    External,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModeSwitch {
    pub from: RenderMode,
    pub to: RenderMode,
    pub reason: UnhealthyReason,
    /// Frame timestamp of the switch, when it was triggered by a frame.
    pub at_ms: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct FallbackPolicy {
    pub grace_ms: f64,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            grace_ms: DEFAULT_GRACE_MS,
        }
    }
}

impl FallbackPolicy {
    pub fn new(grace_ms: f64) -> Result<Self, Error> {
        let policy = Self { grace_ms };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.grace_ms.is_finite() && self.grace_ms >= 0.0) {
            return Err(Error::InvalidGraceWindow {
                grace_ms: self.grace_ms,
            });
        }
        Ok(())
    }
}

/// Debounced "content stayed invisible" detector fed with caller-supplied frame timestamps.
#[derive(Clone, Debug)]
pub struct VisibilityWatchdog {
    grace_ms: f64,
    invisible_since: Option<f64>,
    last_ts: Option<f64>,
}

impl VisibilityWatchdog {
    pub fn new(grace_ms: f64) -> Self {
        Self {
            grace_ms,
            invisible_since: None,
            last_ts: None,
        }
    }

    pub fn grace_ms(&self) -> f64 {
        self.grace_ms
    }

    /// Returns `true` once the invisible run has lasted strictly longer than the grace window.
    pub fn observe(&mut self, visible: bool, ts_ms: f64) -> bool {
        let went_backwards = self.last_ts.is_some_and(|prev| ts_ms < prev);
        self.last_ts = Some(ts_ms);

        if visible {
            self.invisible_since = None;
            return false;
        }

        match self.invisible_since {
            Some(start) if !went_backwards => ts_ms - start > self.grace_ms,
            _ => {
                self.invisible_since = Some(ts_ms);
                false
            }
        }
    }

    /// Milliseconds of the current invisible run, if one is in progress.
    pub fn invisible_for(&self) -> Option<f64> {
        let start = self.invisible_since?;
        let now = self.last_ts?;
        Some(now - start)
    }

    pub fn reset(&mut self) {
        self.invisible_since = None;
        self.last_ts = None;
    }
}

type Observer = Box<dyn FnMut(&ModeSwitch)>;

/// Starts in [`RenderMode::Primary`] and moves to [`RenderMode::Fallback`] at most once per
/// lifecycle.
pub struct RenderFallbackController {
    mode: RenderMode,
    watchdog: VisibilityWatchdog,
    observers: Vec<Observer>,
    switches: u32,
}

impl Default for RenderFallbackController {
    fn default() -> Self {
        Self::new(FallbackPolicy::default())
    }
}

impl std::fmt::Debug for RenderFallbackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderFallbackController")
            .field("mode", &self.mode)
            .field("watchdog", &self.watchdog)
            .field("observers", &self.observers.len())
            .field("switches", &self.switches)
            .finish()
    }
}

impl RenderFallbackController {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            mode: RenderMode::Primary,
            watchdog: VisibilityWatchdog::new(policy.grace_ms),
            observers: Vec::new(),
            switches: 0,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn is_fallback(&self) -> bool {
        self.mode == RenderMode::Fallback
    }

    /// Total switches across all lifecycles.
    pub fn switch_count(&self) -> u32 {
        self.switches
    }

    pub fn watchdog(&self) -> &VisibilityWatchdog {
        &self.watchdog
    }

    /// Registers an observer called once per transition.
    pub fn subscribe(&mut self, observer: impl FnMut(&ModeSwitch) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns whether this call moved the controller to the fallback mode.
    pub fn report_unhealthy(&mut self) -> bool {
        self.transition(UnhealthyReason::External, None).is_some()
    }

    pub fn report_load_failure(&mut self) -> bool {
        self.report(UnhealthyReason::LoadFailure).is_some()
    }

    pub fn report(&mut self, reason: UnhealthyReason) -> Option<ModeSwitch> {
        self.transition(reason, None)
    }

    /// Feeds one frame's visibility to the watchdog. Returns the switch if this frame caused one.
    pub fn observe_frame(&mut self, visible: bool, ts_ms: f64) -> Option<ModeSwitch> {
        if self.mode == RenderMode::Fallback {
            return None;
        }
        if !self.watchdog.observe(visible, ts_ms) {
            return None;
        }
        self.transition(UnhealthyReason::SustainedInvisibility, Some(ts_ms))
    }

    /// Starts a new lifecycle: back to primary, watchdog cleared, switch re-armed.
    pub fn reset(&mut self) {
        self.mode = RenderMode::Primary;
        self.watchdog.reset();
    }

    fn transition(&mut self, reason: UnhealthyReason, at_ms: Option<f64>) -> Option<ModeSwitch> {
        if self.mode == RenderMode::Fallback {
            return None;
        }
        let switch = ModeSwitch {
            from: self.mode,
            to: RenderMode::Fallback,
            reason,
            at_ms,
        };
        self.mode = RenderMode::Fallback;
        self.switches = self.switches.saturating_add(1);
        log::warn!("switching render backend to fallback ({reason:?})");
        for observer in &mut self.observers {
            observer(&switch);
        }
        Some(switch)
    }
}

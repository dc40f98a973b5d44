//! Lifecycle events

/// Events emitted by the controller sequencer as bring-up progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    /// Hardware reset pulse started
    ResetStarted,
    /// Reset pulse finished, controller accepting commands
    ResetReleased,
    /// Vendor script, sleep-out and display-on all issued
    InitScriptDone,
}

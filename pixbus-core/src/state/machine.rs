//! Lifecycle state machine

use super::events::LifecycleEvent;

/// Controller bring-up states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Pins configured, controller state unknown
    #[default]
    Uninitialized,
    /// Hardware reset pulse in progress
    Resetting,
    /// Issuing the vendor initialization script
    RunningInitScript,
    /// Awake, display on, accepting address windows
    AwakeReady,
}

impl Lifecycle {
    /// Check if window addressing and drawing are allowed
    pub fn is_ready(&self) -> bool {
        matches!(self, Lifecycle::AwakeReady)
    }

    /// Process an event and return the next state
    ///
    /// Out-of-order events leave the state unchanged.
    pub fn transition(self, event: LifecycleEvent) -> Self {
        use Lifecycle::*;
        use LifecycleEvent::*;

        match (self, event) {
            // A reset may start from anywhere
            (_, ResetStarted) => Resetting,

            (Resetting, ResetReleased) => RunningInitScript,
            (RunningInitScript, InitScriptDone) => AwakeReady,

            _ => self,
        }
    }
}

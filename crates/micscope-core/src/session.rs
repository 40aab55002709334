//! Startup sequence: nothing runs until the user clicks, and nothing past
//! the click runs until microphone access is granted.

use crate::error::{Result, ScopeError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartupState {
    #[default]
    Idle,
    AwaitingPermission,
    Running,
    Failed,
}

#[derive(Debug, Default)]
pub struct Startup {
    state: StartupState,
}

impl Startup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    /// Handle a start click. Returns `true` only for the click that starts
    /// the session; later clicks are ignored.
    pub fn begin(&mut self) -> bool {
        if self.state != StartupState::Idle {
            log::debug!("start click ignored while {:?}", self.state);
            return false;
        }
        self.state = StartupState::AwaitingPermission;
        true
    }

    pub fn permission_granted(&mut self) -> Result<()> {
        self.expect(StartupState::AwaitingPermission, "start rendering")?;
        self.state = StartupState::Running;
        Ok(())
    }

    /// Record a fatal startup failure (permission denial or any setup
    /// error). There is no way back to `Idle`.
    pub fn fail(&mut self, reason: &dyn std::fmt::Display) {
        log::error!("startup failed in {:?}: {}", self.state, reason);
        self.state = StartupState::Failed;
    }

    fn expect(&self, state: StartupState, action: &'static str) -> Result<()> {
        if self.state != state {
            return Err(ScopeError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }
}

use std::time::Duration;

use super::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPhase {
    Idle,
    Attempting,
    Waiting,
    Succeeded,
    Exhausted,
}

/// What the driver does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Wait(Duration),
    GiveUp,
}

/// Attempt bookkeeping for a single submission. Performs no I/O; the async
/// driver feeds it results and acts on the returned `Step`.
#[derive(Debug)]
pub struct RetryAttempt {
    attempt: u32,
    max_total_attempts: u32,
    delay: Duration,
    last_error: Option<anyhow::Error>,
    phase: RetryPhase,
}

impl RetryAttempt {
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            max_total_attempts: policy.max_total_attempts(),
            delay: policy.delay,
            last_error: None,
            phase: RetryPhase::Idle,
        }
    }

    /// Enter `Attempting`. Returns the 0-based index of the attempt being made.
    pub fn start(&mut self) -> u32 {
        debug_assert!(matches!(self.phase, RetryPhase::Idle | RetryPhase::Waiting));
        self.phase = RetryPhase::Attempting;
        self.attempt
    }

    pub fn succeed(&mut self) {
        debug_assert_eq!(self.phase, RetryPhase::Attempting);
        self.attempt += 1;
        self.phase = RetryPhase::Succeeded;
    }

    pub fn fail(&mut self, error: anyhow::Error) -> Step {
        debug_assert_eq!(self.phase, RetryPhase::Attempting);
        self.attempt += 1;
        self.last_error = Some(error);

        if self.attempt < self.max_total_attempts {
            self.phase = RetryPhase::Waiting;
            Step::Wait(self.delay)
        } else {
            self.phase = RetryPhase::Exhausted;
            Step::GiveUp
        }
    }

    /// Attempts made so far.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    pub fn remaining(&self) -> u32 {
        self.max_total_attempts.saturating_sub(self.attempt)
    }

    pub fn phase(&self) -> RetryPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&anyhow::Error> {
        self.last_error.as_ref()
    }

    pub fn take_last_error(&mut self) -> Option<anyhow::Error> {
        self.last_error.take()
    }
}

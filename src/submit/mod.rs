//! Bounded retry around a remote create-and-verify operation.
//!
//! A [`Submitter`] runs an operation until it succeeds or the policy's attempt
//! budget is spent, sleeping a fixed delay between tries. Exhaustion is reported
//! as [`SubmissionOutcome::ExhaustedRetries`] rather than as an error so the
//! caller decides whether a larger batch continues. Only cancellation surfaces as
//! an `Err`.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

mod attempt;
pub mod errors;

pub use attempt::{RetryAttempt, RetryPhase, Step};
pub use errors::SubmitError;

use crate::constants::{DEFAULT_ATTEMPT_TIMEOUT_MS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first failure.
    pub max_retries: u32,
    pub delay: Duration,
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            attempt_timeout: Some(Duration::from_millis(DEFAULT_ATTEMPT_TIMEOUT_MS)),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            ..Default::default()
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub fn without_attempt_timeout(mut self) -> Self {
        self.attempt_timeout = None;
        self
    }

    /// The first try plus `max_retries` retries.
    pub fn max_total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

#[derive(Debug)]
pub enum SubmissionOutcome<T> {
    Success(T),
    ExhaustedRetries(anyhow::Error),
}

impl<T> SubmissionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            SubmissionOutcome::Success(value) => Some(value),
            SubmissionOutcome::ExhaustedRetries(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            SubmissionOutcome::Success(value) => Ok(value),
            SubmissionOutcome::ExhaustedRetries(err) => Err(err.context("retry budget exhausted")),
        }
    }
}

pub struct Submitter {
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl Submitter {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_cancellation(policy, CancellationToken::new())
    }

    pub fn with_cancellation(policy: RetryPolicy, cancel: CancellationToken) -> Self {
        Self { policy, cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run `operation` until it succeeds or `max_total_attempts` tries have failed.
    ///
    /// The operation must be safe to invoke more than once; no deduplication is
    /// done here.
    pub async fn submit<T, F, Fut>(
        &self,
        label: &str,
        mut operation: F,
    ) -> Result<SubmissionOutcome<T>, SubmitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut state = RetryAttempt::new(&self.policy);

        loop {
            if self.cancel.is_cancelled() {
                return Err(SubmitError::Cancelled {
                    attempts: state.attempts(),
                });
            }

            let index = state.start();

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(SubmitError::Cancelled { attempts: index + 1 });
                }
                result = self.run_attempt(operation()) => result,
            };

            let err = match result {
                Ok(value) => {
                    state.succeed();
                    if state.attempts() > 1 {
                        debug!("{} succeeded on attempt {}", label, state.attempts());
                    }
                    return Ok(SubmissionOutcome::Success(value));
                }
                Err(err) => err,
            };

            match state.fail(err) {
                Step::Wait(delay) => {
                    if let Some(err) = state.last_error() {
                        warn!(
                            "{} failed with error {:#} (attempt {}/{}). Trying {} more time(s) in {:?}",
                            label,
                            err,
                            state.attempts(),
                            self.policy.max_total_attempts(),
                            state.remaining(),
                            delay
                        );
                    }

                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => {
                            return Err(SubmitError::Cancelled { attempts: state.attempts() });
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Step::GiveUp => {
                    let err = state
                        .take_last_error()
                        .unwrap_or_else(|| anyhow!("{} failed", label));
                    warn!(
                        "{} failed with error {:#}. Giving up after {} attempt(s)",
                        label,
                        err,
                        state.attempts()
                    );
                    return Ok(SubmissionOutcome::ExhaustedRetries(err));
                }
            }
        }
    }

    async fn run_attempt<T, Fut>(&self, attempt: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        match self.policy.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, attempt)
                .await
                .map_err(|_| anyhow!("attempt timed out after {:?}", limit))?,
            None => attempt.await,
        }
    }
}

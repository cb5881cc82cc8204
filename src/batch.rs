use std::future::Future;

use anyhow::{anyhow, Result};
use tracing::{debug, error};

use crate::submit::{SubmissionOutcome, SubmitError, Submitter};

/// Where a batch stopped and why.
#[derive(Debug)]
pub struct BatchAbort {
    pub index: usize,
    pub error: anyhow::Error,
}

#[derive(Debug)]
pub struct BatchReport<T> {
    pub completed: Vec<T>,
    pub aborted: Option<BatchAbort>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            aborted: None,
        }
    }
}

impl<T> BatchReport<T> {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }

    pub fn into_result(self) -> Result<Vec<T>> {
        match self.aborted {
            None => Ok(self.completed),
            Some(BatchAbort { index, error }) => Err(anyhow!(
                "batch aborted at item {} after {} completed: {:#}",
                index + 1,
                self.completed.len(),
                error
            )),
        }
    }
}

/// Submit `items` one after another. The first item whose submission exhausts
/// its retries stops the batch; later items are never started and completed
/// ones are left as they are.
pub async fn run_batch<I, T, F, Fut>(
    submitter: &Submitter,
    items: I,
    mut submit_item: F,
) -> Result<BatchReport<T>, SubmitError>
where
    I: IntoIterator,
    F: FnMut(usize, I::Item) -> Fut,
    Fut: Future<Output = Result<SubmissionOutcome<T>, SubmitError>>,
{
    let mut report = BatchReport::default();

    for (index, item) in items.into_iter().enumerate() {
        if submitter.is_cancelled() {
            return Err(SubmitError::BatchCancelled { index, attempts: 0 });
        }

        let outcome = submit_item(index, item).await.map_err(|err| match err {
            SubmitError::Cancelled { attempts } => SubmitError::BatchCancelled { index, attempts },
            other => other,
        })?;

        match outcome {
            SubmissionOutcome::Success(artifact) => {
                debug!("batch item {} completed", index + 1);
                report.completed.push(artifact);
            }
            SubmissionOutcome::ExhaustedRetries(error) => {
                error!(
                    "batch item {} exhausted its retries, aborting: {:#}",
                    index + 1,
                    error
                );
                report.aborted = Some(BatchAbort { index, error });
                break;
            }
        }
    }

    Ok(report)
}

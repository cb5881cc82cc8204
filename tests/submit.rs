pub mod utils;

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use seven_seas_lib::submit::{RetryPolicy, SubmissionOutcome, SubmitError, Submitter};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use utils::assert_slept;

const DELAY: Duration = Duration::from_millis(5_000);

fn submitter(max_retries: u32) -> Submitter {
    Submitter::new(RetryPolicy::new(max_retries, DELAY).without_attempt_timeout())
}

#[tokio::test(start_paused = true)]
async fn first_try_success_makes_one_call_and_never_sleeps() {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let start = Instant::now();

    let outcome = submitter(5)
        .submit("mint", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, anyhow::Error>("mint-1")
        })
        .await
        .unwrap();

    assert!(matches!(outcome, SubmissionOutcome::Success("mint-1")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_slept(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn k_failures_then_success_sleeps_k_times() {
    for k in 0..=5u32 {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let start = Instant::now();

        let outcome = submitter(5)
            .submit("mint", move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= k {
                    Err(anyhow!("attempt {} failed", n))
                } else {
                    Ok(n)
                }
            })
            .await
            .unwrap();

        assert_eq!(outcome.success(), Some(k + 1), "k = {}", k);
        assert_eq!(calls.load(Ordering::SeqCst), k + 1);
        assert_slept(start.elapsed(), DELAY * k);
    }
}

#[tokio::test(start_paused = true)]
async fn three_failures_then_success_on_the_fourth_call() {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let start = Instant::now();

    let outcome = submitter(5)
        .submit("mint", move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 4 {
                Err(anyhow!("blockhash expired"))
            } else {
                Ok("Fearless Corsair")
            }
        })
        .await
        .unwrap();

    assert_eq!(outcome.success(), Some("Fearless Corsair"));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_slept(start.elapsed(), Duration::from_millis(15_000));
}

#[tokio::test(start_paused = true)]
async fn always_failing_operation_gets_retries_plus_one_calls() {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let start = Instant::now();

    let outcome = submitter(5)
        .submit("mint", move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err::<(), _>(anyhow!("attempt {} failed", n))
        })
        .await
        .unwrap();

    match outcome {
        SubmissionOutcome::ExhaustedRetries(err) => assert_eq!(err.to_string(), "attempt 6 failed"),
        SubmissionOutcome::Success(_) => panic!("expected exhaustion"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    // No sleep after the final failure.
    assert_slept(start.elapsed(), Duration::from_millis(25_000));
}

#[tokio::test(start_paused = true)]
async fn zero_retries_is_a_single_attempt() {
    let calls = AtomicU32::new(0);
    let calls = &calls;

    let outcome = submitter(0)
        .submit("mint", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(anyhow!("nope"))
        })
        .await
        .unwrap();

    assert!(!outcome.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn idempotent_operation_yields_the_same_artifact_twice() {
    let ledger: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
    let ledger = &ledger;
    let flaky = AtomicU32::new(0);
    let flaky = &flaky;

    let op = move || async move {
        // Fails once per submission before writing anything.
        if flaky.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            return Err(anyhow!("node is behind"));
        }
        let id = "7SEAS-ship-0".to_string();
        ledger.lock().unwrap().insert(id.clone());
        Ok(id)
    };

    let submitter = submitter(5);
    let first = submitter.submit("mint", op).await.unwrap().success();
    let second = submitter.submit("mint", op).await.unwrap().success();

    assert_eq!(first.as_deref(), Some("7SEAS-ship-0"));
    assert_eq!(first, second);
    assert_eq!(ledger.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn hung_attempt_times_out_and_is_retried() {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let policy = RetryPolicy::new(2, Duration::from_secs(1))
        .with_attempt_timeout(Duration::from_secs(10));
    let start = Instant::now();

    let outcome = Submitter::new(policy)
        .submit("mint", move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 1 {
                    std::future::pending::<()>().await;
                }
                Ok::<_, anyhow::Error>(n)
            }
        })
        .await
        .unwrap();

    assert_eq!(outcome.success(), Some(2));
    assert_slept(start.elapsed(), Duration::from_secs(11));
}

#[tokio::test(start_paused = true)]
async fn timed_out_attempts_count_towards_exhaustion() {
    let policy = RetryPolicy::new(1, Duration::from_secs(1))
        .with_attempt_timeout(Duration::from_secs(2));

    let outcome = Submitter::new(policy)
        .submit("mint", || async {
            std::future::pending::<()>().await;
            Ok::<(), anyhow::Error>(())
        })
        .await
        .unwrap();

    match outcome {
        SubmissionOutcome::ExhaustedRetries(err) => {
            assert!(err.to_string().contains("timed out"), "{}", err)
        }
        SubmissionOutcome::Success(_) => panic!("expected exhaustion"),
    }
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_the_wait_stops_without_another_attempt() {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let token = CancellationToken::new();
    let submitter = Submitter::with_cancellation(
        RetryPolicy::new(5, DELAY).without_attempt_timeout(),
        token.clone(),
    );

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
    });

    let start = Instant::now();
    let result = submitter
        .submit("mint", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(anyhow!("still failing"))
        })
        .await;

    assert!(matches!(result, Err(SubmitError::Cancelled { attempts: 1 })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_slept(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn cancelled_token_prevents_the_first_attempt() {
    let token = CancellationToken::new();
    token.cancel();
    let submitter = Submitter::with_cancellation(RetryPolicy::default(), token);

    let result = submitter
        .submit("mint", || async { Ok::<_, anyhow::Error>(1) })
        .await;

    assert!(matches!(result, Err(SubmitError::Cancelled { attempts: 0 })));
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_an_attempt_counts_that_attempt() {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let token = CancellationToken::new();
    let submitter = Submitter::with_cancellation(
        RetryPolicy::new(5, DELAY).without_attempt_timeout(),
        token.clone(),
    );

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
    });

    let start = Instant::now();
    let result = submitter
        .submit("mint", move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<anyhow::Result<()>>()
        })
        .await;

    assert!(matches!(result, Err(SubmitError::Cancelled { attempts: 1 })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_slept(start.elapsed(), Duration::from_secs(1));
}

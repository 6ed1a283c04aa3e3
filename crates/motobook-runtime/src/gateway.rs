//! Timeout and retry policy for gateway calls.
//!
//! Transport-class failures (timeouts, network errors) get exactly one
//! retry. Soft outcomes like an OTP mismatch or a payment decline are
//! ordinary return values and never pass through here as errors.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;

pub(crate) async fn call_gateway<T, F, Fut>(
    timeout: Duration,
    what: &str,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = motobook_providers::Result<T>>,
{
    match attempt(timeout, what, op()).await {
        Ok(value) => Ok(value),
        Err(err) if is_transport(&err) => attempt(timeout, what, op()).await,
        Err(err) => Err(err),
    }
}

async fn attempt<T>(
    timeout: Duration,
    what: &str,
    future: impl Future<Output = motobook_providers::Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, future).await {
        Err(_) => Err(Error::Timeout(format!("{} call exceeded {:?}", what, timeout))),
        Ok(Err(err)) => Err(Error::Provider(err)),
        Ok(Ok(value)) => Ok(value),
    }
}

fn is_transport(err: &Error) -> bool {
    use motobook_providers::Error as Provider;
    match err {
        Error::Timeout(_) => true,
        Error::Provider(Provider::Gateway(_) | Provider::Fetch(_) | Provider::Io(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_transport_error_gets_one_retry() {
        let attempts = AtomicUsize::new(0);
        let result = call_gateway(Duration::from_secs(1), "test", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(motobook_providers::Error::Gateway("connection reset".to_string()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_persistent_failure_stops_after_retry() {
        let attempts = AtomicUsize::new(0);
        let result: Result<i32> = call_gateway(Duration::from_secs(1), "test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(motobook_providers::Error::Gateway("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_call_gets_one_retry() {
        let attempts = AtomicUsize::new(0);
        let result: Result<i32> = call_gateway(Duration::from_secs(1), "test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<motobook_providers::Result<i32>>()
        })
        .await;

        assert!(matches!(result, Err(Error::Timeout(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_transport_error_is_not_retried() {
        let attempts = AtomicUsize::new(0);
        let result: Result<i32> = call_gateway(Duration::from_secs(1), "test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(motobook_providers::Error::Document("bad shape".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}

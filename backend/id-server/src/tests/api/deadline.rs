use crate::{ApiError, ApiResult, with_deadline};

use std::time::Duration;

#[tokio::test]
async fn given_fast_future_when_run_with_deadline_then_result_passed_through() {
    let result = with_deadline(Duration::from_secs(1), async { Ok::<_, ApiError>(7) }).await;

    assert_eq!(result.unwrap(), 7);
}

#[tokio::test]
async fn given_future_error_when_run_with_deadline_then_error_passed_through() {
    let result: ApiResult<()> = with_deadline(Duration::from_secs(1), async {
        Err(ApiError::unauthenticated())
    })
    .await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn given_slow_future_when_deadline_passes_then_timeout_and_future_dropped() {
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let result: ApiResult<()> = with_deadline(Duration::from_millis(20), async move {
        let _held = tx;
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    })
    .await;

    assert!(matches!(result, Err(ApiError::Timeout { millis: 20, .. })));
    // Sender dropped with the cancelled future
    assert!(rx.await.is_err());
}

#[tokio::test]
async fn given_deadline_passes_when_timed_out_then_error_located_at_call_site() {
    let result = with_deadline(
        Duration::from_millis(1),
        std::future::pending::<ApiResult<()>>(),
    )
    .await;

    match result {
        Err(ApiError::Timeout { location, .. }) => {
            assert!(location.file.contains("tests"), "{}", location.file);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

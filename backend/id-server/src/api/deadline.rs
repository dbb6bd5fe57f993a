use crate::{ApiError, ApiResult};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;

/// Run `future` under `deadline`.
///
/// On expiry the future is dropped, which cancels whatever it was awaiting,
/// and the request fails with `ApiError::Timeout` located at the caller.
#[track_caller]
pub fn with_deadline<T, F>(deadline: Duration, future: F) -> impl Future<Output = ApiResult<T>>
where
    F: Future<Output = ApiResult<T>>,
{
    let location = ErrorLocation::from(Location::caller());

    async move {
        match tokio::time::timeout(deadline, future).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                millis: deadline.as_millis(),
                location,
            }),
        }
    }
}

//! Async timeout wrappers.
//!
//! Every network operation the client performs is bounded by the configured
//! per-call timeout so a wedged upstream cannot pin a request indefinitely.

use std::future::Future;
use std::time::Duration;

use crate::error::{RconError, Result};

/// Default per-call network timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `fut` under `limit`, mapping an elapsed deadline to
/// [`RconError::Timeout`].
pub async fn with_timeout_error<F, T>(fut: F, limit: Duration) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(RconError::Timeout),
    }
}

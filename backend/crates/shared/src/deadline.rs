//! Bounded Execution
//!
//! Every call into a storage adapter goes through [`within`], so a stalled
//! backend surfaces as a distinguishable timeout instead of a hung request.
//! Dropping the returned future (client disconnect) drops the inner call
//! with it; nothing is resumed afterwards.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The wrapped operation did not finish in time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} did not complete within {limit:?}")]
pub struct DeadlineExceeded {
    /// Short name of the operation, for logs
    pub operation: &'static str,
    /// The limit that was exceeded
    pub limit: Duration,
}

/// Run a fallible storage operation with an upper bound on its duration
///
/// ## Arguments
/// * `limit` - Maximum time the operation may take
/// * `operation` - Name used in the timeout error
/// * `fut` - The operation itself
///
/// ## Examples
/// ```rust
/// use std::time::Duration;
/// use kernel::deadline::{within, DeadlineExceeded};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let result: Result<u32, DeadlineExceeded> = rt.block_on(within(
///     Duration::from_secs(1),
///     "answer",
///     async { Ok(42) },
/// ));
/// assert_eq!(result, Ok(42));
/// ```
pub async fn within<F, T, E>(limit: Duration, operation: &'static str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(DeadlineExceeded { operation, limit }.into()),
    }
}

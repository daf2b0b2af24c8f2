use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

/// Extension trait to add timeout functionality to futures
///
/// Expiry drops the wrapped future, which cancels any in-flight fetch and
/// releases the resources it holds.
pub trait TimeoutExt<T> {
    /// Add timeout to a future with custom duration
    async fn with_timeout_duration(self, duration: Duration) -> Result<T>;
}

impl<F, T> TimeoutExt<T> for F
where
    F: Future<Output = T>,
{
    async fn with_timeout_duration(self, duration: Duration) -> Result<T> {
        match timeout(duration, self).await {
            Ok(result) => Ok(result),
            Err(_) => Err(Error::Timeout { timeout: duration }),
        }
    }
}

/// Named time budget for fallible operations, with logging
#[derive(Debug, Clone)]
pub struct TimeoutWrapper {
    budget: Duration,
    operation_name: String,
}

impl TimeoutWrapper {
    /// Create a new timeout wrapper
    pub fn new(operation_name: impl Into<String>, budget: Duration) -> Self {
        Self {
            budget,
            operation_name: operation_name.into(),
        }
    }

    /// Execute an operation within the budget
    pub async fn execute<Fut, T>(&self, operation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let start_time = Instant::now();

        debug!(
            "Starting operation '{}' with timeout {:?}",
            self.operation_name, self.budget
        );

        match timeout(self.budget, operation).await {
            Ok(Ok(value)) => {
                debug!(
                    "Operation '{}' completed successfully in {:?}",
                    self.operation_name,
                    start_time.elapsed()
                );
                Ok(value)
            }
            Ok(Err(error)) => {
                debug!(
                    "Operation '{}' failed after {:?}: {}",
                    self.operation_name,
                    start_time.elapsed(),
                    error
                );
                Err(error)
            }
            Err(_) => {
                warn!(
                    "Operation '{}' timed out after {:?}",
                    self.operation_name, self.budget
                );
                Err(Error::Timeout {
                    timeout: self.budget,
                })
            }
        }
    }
}

//! Notification hooks around public operations.
//!
//! Hooks observe; they never change what an operation does or returns.

use crate::{FileOperation, OpsError};

/// Receives a notification before and after each operation run through
/// [`PathOperations`](crate::PathOperations).
///
/// Nested work done by a recursive operation is not reported separately;
/// a directory copy produces one `before` and one `after`.
pub trait OperationHooks {
    /// Called before the operation touches the filesystem.
    fn before(&self, _operation: &FileOperation) {}

    /// Called once the operation has finished.
    fn after(&self, _operation: &FileOperation, _outcome: Result<(), &OpsError>) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl OperationHooks for NoHooks {}

/// Hooks that report every operation through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl OperationHooks for LoggingHooks {
    fn before(&self, operation: &FileOperation) {
        tracing::info!(target: "pathops", "{operation}");
    }

    fn after(&self, operation: &FileOperation, outcome: Result<(), &OpsError>) {
        match outcome {
            Ok(()) => tracing::info!(target: "pathops", "{} succeeded", operation.operation_type()),
            Err(e) => {
                tracing::warn!(target: "pathops", "{} failed: {e}", operation.operation_type())
            }
        }
    }
}

impl<H: OperationHooks + ?Sized> OperationHooks for &H {
    fn before(&self, operation: &FileOperation) {
        (**self).before(operation);
    }

    fn after(&self, operation: &FileOperation, outcome: Result<(), &OpsError>) {
        (**self).after(operation, outcome);
    }
}

impl<H: OperationHooks + ?Sized> OperationHooks for Box<H> {
    fn before(&self, operation: &FileOperation) {
        (**self).before(operation);
    }

    fn after(&self, operation: &FileOperation, outcome: Result<(), &OpsError>) {
        (**self).after(operation, outcome);
    }
}

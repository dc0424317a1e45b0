//! Callback delivery contract.

/// Where callback results are delivered back to caller code.
///
/// Absence of an executor (the `Standard` runtime case) means the thread that
/// completed the call delivers the callback itself. A thread-affine
/// implementation posts the task onto a designated logical thread's queue
/// instead.
pub trait CallbackExecutor: Send + Sync {
    /// Enqueue `task` for execution and return immediately.
    ///
    /// Must not block the caller. No result or completion signal is provided,
    /// and a submitted task cannot be cancelled.
    fn execute(&self, task: Box<dyn FnOnce() + Send>);
}

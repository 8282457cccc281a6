use std::thread::{self, JoinHandle};

/// A unit of work running on its own worker thread.
///
/// `Task` is the bridge between the synchronous and the asynchronous result
/// modes: callers that want a handle keep the task and settle it later,
/// callers that want a plain value call [`Task::wait`] immediately.
///
/// [`Task::wait`] blocks the calling thread until the worker settles. The
/// worker makes progress on its own thread, so waiting on it from the
/// spawning thread cannot deadlock the work being awaited. There is no
/// timeout and no cancellation; an abandoned task still runs to completion.
#[derive(Debug)]
pub struct Task<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> Task<T> {
    pub fn spawn(work: impl FnOnce() -> T + Send + 'static) -> Self {
        Self {
            handle: thread::spawn(work),
        }
    }

    /// Blocks until the worker settles and returns its result.
    ///
    /// A panic on the worker thread resumes on the caller.
    pub fn wait(self) -> T {
        tracing::trace!("Waiting for worker thread to settle");
        match self.handle.join() {
            Ok(value) => value,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    /// Whether the worker has already settled. `wait` will not block once
    /// this returns `true`.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

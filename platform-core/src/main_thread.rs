//! Main-thread task marshalling.
//!
//! Hosts with a single-threaded UI model (Android being the one this client
//! ships a strategy for) require callbacks to land on the main thread. A
//! [`MainLoop`] is a message queue bound to the thread that prepared it; the
//! [`MainThreadExecutor`] posts tasks into that queue and returns without
//! waiting.
//!
//! Delivery is best-effort by contract: a task posted after the loop has quit
//! is dropped silently. Tasks posted by one thread run in submission order;
//! no ordering is guaranteed across different submitting threads beyond what
//! the underlying queue provides.

use std::sync::mpsc;
use std::sync::OnceLock;
use std::thread::{self, ThreadId};

use tracing::debug;

use platform_traits::CallbackExecutor;

type Task = Box<dyn FnOnce() + Send>;

enum Message {
    Run(Task),
    Quit,
}

static MAIN_LOOP: OnceLock<MainLoopHandle> = OnceLock::new();

/// Handle to the process-wide main loop, if a host installed one.
pub fn main_handle() -> Option<MainLoopHandle> {
    MAIN_LOOP.get().cloned()
}

/// A task queue bound to the thread that prepared it.
pub struct MainLoop {
    rx: mpsc::Receiver<Message>,
    handle: MainLoopHandle,
}

impl MainLoop {
    /// Bind a fresh loop to the calling thread.
    pub fn prepare() -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = MainLoopHandle {
            tx,
            thread: thread::current().id(),
        };
        Self { rx, handle }
    }

    /// Handle for posting tasks into this loop from any thread.
    pub fn handle(&self) -> MainLoopHandle {
        self.handle.clone()
    }

    /// Publish this loop as the process-wide main loop.
    ///
    /// Returns `false` if another loop was installed first; installation is
    /// permanent for the process lifetime.
    pub fn install(&self) -> bool {
        MAIN_LOOP.set(self.handle.clone()).is_ok()
    }

    /// Drain tasks on the bound thread until [`MainLoopHandle::quit`] is
    /// observed or every handle is gone.
    pub fn run(self) {
        while let Ok(message) = self.rx.recv() {
            match message {
                Message::Run(task) => task(),
                Message::Quit => break,
            }
        }
        debug!("Main loop exited");
    }
}

/// Cloneable posting endpoint of a [`MainLoop`].
#[derive(Clone)]
pub struct MainLoopHandle {
    tx: mpsc::Sender<Message>,
    thread: ThreadId,
}

impl MainLoopHandle {
    /// Enqueue `task` and return immediately.
    ///
    /// If the loop has already been torn down the task is dropped without
    /// signalling an error.
    pub fn post(&self, task: Task) {
        if self.tx.send(Message::Run(task)).is_err() {
            debug!("Main loop is gone; dropping posted task");
        }
    }

    /// Ask the loop to exit once the tasks queued ahead of this call have
    /// run. Tasks posted afterwards are dropped.
    pub fn quit(&self) {
        let _ = self.tx.send(Message::Quit);
    }

    /// Identity of the thread the loop is bound to.
    pub fn thread_id(&self) -> ThreadId {
        self.thread
    }
}

/// [`CallbackExecutor`] that marshals every task onto the main loop.
pub struct MainThreadExecutor {
    handle: Option<MainLoopHandle>,
}

impl MainThreadExecutor {
    /// Executor that resolves the process-wide main loop at execute time.
    ///
    /// Resolution is deferred so the strategy can be constructed before the
    /// host has installed its loop.
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Executor bound to an explicit loop handle.
    pub fn bound_to(handle: MainLoopHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    fn resolve(&self) -> Option<MainLoopHandle> {
        self.handle.clone().or_else(main_handle)
    }
}

impl Default for MainThreadExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackExecutor for MainThreadExecutor {
    fn execute(&self, task: Box<dyn FnOnce() + Send>) {
        match self.resolve() {
            Some(handle) => handle.post(task),
            None => debug!("No main loop installed; dropping task"),
        }
    }
}

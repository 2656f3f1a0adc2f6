//! Input debouncing.
//!
//! Live search runs only once input has been quiet for the debounce window. Each new input
//! restarts the timer; nothing is queued.

use std::{future, pin::Pin, time::Duration};

use tokio::time::{self, Instant, Sleep};

/// Collapses bursts of input into their last value.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    /// Quiet period required before a value is released.
    window: Duration,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// The quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Starts an empty input slot timed by this debouncer.
    pub fn pending<T>(&self) -> Pending<T> {
        Pending {
            window: self.window,
            latest: None,
            deadline: Box::pin(time::sleep(self.window)),
        }
    }
}

/// The latest unreleased input and its deadline.
///
/// The value lives here rather than inside a future, so [`Pending::ready`] can lose a
/// `select!` race any number of times without dropping input.
#[derive(Debug)]
pub struct Pending<T> {
    /// Quiet period.
    window: Duration,
    /// Value waiting for the deadline.
    latest: Option<T>,
    /// Reset on every push.
    deadline: Pin<Box<Sleep>>,
}

impl<T> Pending<T> {
    /// Replaces the waiting value and restarts the quiet window.
    pub fn push(&mut self, value: T) {
        self.latest = Some(value);
        self.deadline.as_mut().reset(Instant::now() + self.window);
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Resolves with the waiting value once the window has passed without a push.
    ///
    /// Never resolves while nothing is waiting. Cancel safe: the value is only taken after the
    /// deadline fires.
    pub async fn ready(&mut self) -> T {
        if self.latest.is_some() {
            self.deadline.as_mut().await;
        }
        match self.latest.take() {
            Some(value) => value,
            None => future::pending().await,
        }
    }
}

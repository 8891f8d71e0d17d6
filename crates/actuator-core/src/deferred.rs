//! Single-resolution deferred values.
//!
//! A [`Deferred`] is resolved at most once through its [`Resolver`]. Dropping
//! the resolver without resolving turns the deferred into
//! [`Outcome::Abandoned`] instead of leaving the awaiting side hanging.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Result of awaiting a [`Deferred`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Resolved(T),
    Abandoned,
}

impl<T> Outcome<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved(_))
    }

    /// Converts into the resolved value, discarding the abandoned case.
    pub fn resolved(self) -> Option<T> {
        match self {
            Outcome::Resolved(value) => Some(value),
            Outcome::Abandoned => None,
        }
    }
}

/// Sending half of a [`Deferred`]. Consumed on resolution.
#[derive(Debug)]
pub struct Resolver<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Resolver<T> {
    /// Resolve the deferred value.
    ///
    /// Returns `false` if nobody is waiting any more.
    pub fn resolve(self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }

    /// Give up without a value; the waiting side observes `Abandoned`.
    pub fn abandon(self) {}
}

/// A value that becomes available later, exactly once.
#[derive(Debug)]
pub struct Deferred<T> {
    state: DeferredState<T>,
}

#[derive(Debug)]
enum DeferredState<T> {
    Pending(oneshot::Receiver<T>),
    Ready(Option<Outcome<T>>),
}

/// Create a connected resolver/deferred pair.
pub fn deferred<T>() -> (Resolver<T>, Deferred<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Resolver { tx },
        Deferred {
            state: DeferredState::Pending(rx),
        },
    )
}

impl<T> Deferred<T> {
    /// A deferred that is already resolved.
    pub fn resolved(value: T) -> Self {
        Self {
            state: DeferredState::Ready(Some(Outcome::Resolved(value))),
        }
    }

    /// A deferred that will never produce a value.
    pub fn abandoned() -> Self {
        Self {
            state: DeferredState::Ready(Some(Outcome::Abandoned)),
        }
    }
}

// The payload is never pinned in place.
impl<T> Unpin for Deferred<T> {}

impl<T> Future for Deferred<T> {
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            DeferredState::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(value)) => {
                    this.state = DeferredState::Ready(None);
                    Poll::Ready(Outcome::Resolved(value))
                }
                Poll::Ready(Err(_)) => {
                    this.state = DeferredState::Ready(None);
                    Poll::Ready(Outcome::Abandoned)
                }
                Poll::Pending => Poll::Pending,
            },
            DeferredState::Ready(outcome) => {
                Poll::Ready(outcome.take().unwrap_or(Outcome::Abandoned))
            }
        }
    }
}

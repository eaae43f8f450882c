//! Publish/subscribe abstraction (mechanics only).
//!
//! Every subscriber gets its own copy of every message published after it
//! subscribed. Nothing is persisted: a message published with no subscribers
//! is dropped.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Receiving end of a bus subscription.
///
/// Meant to be owned by a single consumer. Messages arrive in publish order.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything queued right now, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out channel.
///
/// `publish()` may fail (e.g. a poisoned lock); callers decide whether that is
/// worth more than a log line.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

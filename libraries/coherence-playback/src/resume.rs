//! Single-resolution resume gate
//!
//! Restoring a session has to wait until the engine can seek. Two sources may
//! release the wait: the engine's readiness event and a fallback timer. Both
//! hold a [`ResumeResolver`]; whichever calls `resolve` first decides the
//! trigger, every later call is discarded.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// What released the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeTrigger {
    /// Engine reported enough data to seek
    Ready,

    /// Fallback timer fired first
    TimedOut,
}

/// Resolving half, cloned into each competing callback
#[derive(Debug, Clone)]
pub struct ResumeResolver {
    sender: Rc<RefCell<Option<oneshot::Sender<ResumeTrigger>>>>,
}

impl ResumeResolver {
    /// Release the gate
    ///
    /// Returns `true` if this call won; `false` if the gate was already
    /// resolved.
    pub fn resolve(&self, trigger: ResumeTrigger) -> bool {
        let Some(sender) = self.sender.borrow_mut().take() else {
            tracing::trace!("Resume gate already resolved, dropping {:?}", trigger);
            return false;
        };

        // A dropped receiver still counts as resolved
        let _ = sender.send(trigger);
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.sender.borrow().is_none()
    }
}

/// Waiting half
///
/// Completes with the winning trigger. If every resolver is dropped without
/// resolving, it completes as `TimedOut` so the restore sequence always ends.
#[derive(Debug)]
pub struct ResumeSignal {
    receiver: oneshot::Receiver<ResumeTrigger>,
}

impl Future for ResumeSignal {
    type Output = ResumeTrigger;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or(ResumeTrigger::TimedOut))
    }
}

/// Create a connected resolver/signal pair
pub fn resume_gate() -> (ResumeResolver, ResumeSignal) {
    let (sender, receiver) = oneshot::channel();
    let resolver = ResumeResolver {
        sender: Rc::new(RefCell::new(Some(sender))),
    };
    (resolver, ResumeSignal { receiver })
}

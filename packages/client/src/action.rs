//! # Async action state
//!
//! Every screen that talks to the backend tracks its call with an
//! [`AsyncAction<T>`]: `Idle → Pending → Success | Failure`.
//!
//! [`start`](AsyncAction::start) hands out a [`Ticket`] and refuses while a call
//! is already pending, so a second tap cannot fire a duplicate request. The
//! terminal outcome is only accepted with the ticket of the *current* call:
//! [`reset`](AsyncAction::reset) or [`cancel`](AsyncAction::cancel) invalidate
//! outstanding tickets, and a ticket bound to a [`ScreenLifetime`] with
//! [`Ticket::within`] goes stale once the screen is torn down. Late completions
//! are dropped instead of mutating state that nobody displays anymore.
//!
//! UI code keeps the state in a signal, so it uses the split
//! `start` / `resolve_*` form and no borrow spans the network call.

use std::fmt::Display;
#[cfg(test)]
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsyncStatus {
    Idle,
    Pending,
    Success,
    Failure,
}

/// Liveness flag shared between a screen and the calls it started.
#[derive(Clone, Debug)]
pub struct ScreenLifetime {
    active: Arc<AtomicBool>,
}

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the screen as gone. Irreversible.
    pub fn end(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Proof that the holder started the current call.
#[derive(Clone, Debug)]
pub struct Ticket {
    generation: u64,
    lifetime: Option<ScreenLifetime>,
}

impl Ticket {
    /// Tie the ticket to a screen. Completions after the screen ends are dropped.
    pub fn within(self, lifetime: &ScreenLifetime) -> Ticket {
        Ticket {
            lifetime: Some(lifetime.clone()),
            ..self
        }
    }

    /// False once the owning screen has ended.
    pub fn is_live(&self) -> bool {
        self.lifetime.as_ref().map_or(true, ScreenLifetime::is_active)
    }
}

/// Lifecycle of one remote operation.
#[derive(Clone, Debug, PartialEq)]
pub struct AsyncAction<T> {
    status: AsyncStatus,
    result: Option<T>,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for AsyncAction<T> {
    fn default() -> Self {
        Self {
            status: AsyncStatus::Idle,
            result: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T> AsyncAction<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AsyncStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == AsyncStatus::Pending
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `Idle|Success|Failure → Pending`. `None` while a call is in flight.
    pub fn start(&mut self) -> Option<Ticket> {
        if self.is_pending() {
            tracing::debug!("action already pending, ignoring start");
            return None;
        }
        self.generation += 1;
        self.status = AsyncStatus::Pending;
        self.result = None;
        self.error = None;
        Some(Ticket {
            generation: self.generation,
            lifetime: None,
        })
    }

    fn accepts(&self, ticket: &Ticket) -> bool {
        self.is_pending() && ticket.generation == self.generation && ticket.is_live()
    }

    /// `Pending → Success`. Returns false when the ticket is stale.
    pub fn resolve_success(&mut self, ticket: &Ticket, result: T) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!("dropping late success");
            return false;
        }
        self.status = AsyncStatus::Success;
        self.result = Some(result);
        true
    }

    /// `Pending → Failure`. Returns false when the ticket is stale.
    pub fn resolve_failure(&mut self, ticket: &Ticket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!("dropping late failure");
            return false;
        }
        self.status = AsyncStatus::Failure;
        self.error = Some(message.into());
        true
    }

    pub fn resolve<E: Display>(&mut self, ticket: &Ticket, outcome: Result<T, E>) -> bool {
        match outcome {
            Ok(value) => self.resolve_success(ticket, value),
            Err(e) => self.resolve_failure(ticket, e.to_string()),
        }
    }

    /// Back to `Idle`, invalidating any ticket in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.status = AsyncStatus::Idle;
        self.result = None;
        self.error = None;
    }

    /// Abandon the in-flight call, if any. Completed results are kept.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.reset();
        }
    }

    /// Start, await `call`, resolve. `call` is not invoked while another call is
    /// pending; returns whether it ran.
    #[cfg(test)]
    pub async fn run<F, Fut, E>(&mut self, call: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let Some(ticket) = self.start() else {
            return false;
        };
        let outcome = call().await;
        self.resolve(&ticket, outcome);
        true
    }
}

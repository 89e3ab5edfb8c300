//! Manages the timer state owned by a showcase controller.
//!
//! A `TimerSlot` is a cancelable deadline: arming replaces any previous
//! deadline, so a slot holds at most one pending expiry. The controller task
//! awaits `expired()` inside its select loop and re-reads its own state when a
//! slot fires, so nothing scheduled can act on stale state or outlive the task.

use std::future::Future;
use std::time::Duration;

use log::{debug, trace};
use tokio::time::Instant;

/// One cancelable deadline.
#[derive(Debug)]
pub struct TimerSlot {
    name: &'static str,
    deadline: Option<Instant>,
}

impl TimerSlot {
    pub fn new(name: &'static str) -> Self {
        Self { name, deadline: None }
    }

    /// Arms the slot to fire `after` from now, replacing any pending deadline.
    pub fn arm(&mut self, after: Duration) {
        let deadline = Instant::now() + after;
        if self.deadline.replace(deadline).is_some() {
            trace!("Timer '{}' rescheduled.", self.name);
        }
        trace!("Timer '{}' armed for {:?}.", self.name, deadline);
    }

    /// Clears the slot. Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.deadline.take().is_some();
        if was_armed {
            trace!("Timer '{}' cancelled.", self.name);
        }
        was_armed
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves when the current deadline passes; never resolves if disarmed.
    ///
    /// The future copies the deadline, so it does not borrow the slot.
    pub fn expired(&self) -> impl Future<Output = ()> + Send + 'static {
        let deadline = self.deadline;
        async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        }
    }
}

/// The lockout and autoplay slots of one controller.
#[derive(Debug)]
pub struct ControllerTimers {
    pub lockout: TimerSlot,
    pub autoplay: TimerSlot,
}

impl ControllerTimers {
    pub fn new() -> Self {
        debug!("Initializing controller timers.");
        Self {
            lockout: TimerSlot::new("lockout"),
            autoplay: TimerSlot::new("autoplay"),
        }
    }

    /// Starts a lockout window: takes the lockout slot and drops any pending
    /// autoplay deadline.
    pub fn begin_transition(&mut self, lockout: Duration) {
        self.autoplay.cancel();
        self.lockout.arm(lockout);
    }

    /// Clears every slot. Returns how many deadlines were pending.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = [self.lockout.cancel(), self.autoplay.cancel()]
            .into_iter()
            .filter(|was_armed| *was_armed)
            .count();
        if cancelled > 0 {
            debug!("Cancelled {} pending timer(s).", cancelled);
        }
        cancelled
    }
}

impl Default for ControllerTimers {
    fn default() -> Self {
        Self::new()
    }
}

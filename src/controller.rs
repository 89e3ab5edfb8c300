//! Drives a `Showcase` from a tokio task.
//!
//! `ShowcaseController` owns the state machine and its two timer slots and is
//! the only writer of showcase state. The presentation layer talks to it
//! through a cloneable `ShowcaseHandle`: every user intent is a message, every
//! state change is published on a `watch` channel. Lockout expiry and autoplay
//! ticks are deadlines awaited in the same select loop as the messages, so they
//! always act on the state as it is when they fire.
//!
//! The task ends on `ShowcaseHandle::shutdown` or when every handle is dropped.
//! Both paths cancel the pending timers before the task returns, and nothing
//! touches the state afterwards.

use std::sync::Arc;

use log::{debug, info, trace, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::ShowcaseConfig;
use crate::model::ShowcaseSnapshot;
use crate::showcase::{Showcase, SlideSequence};
use crate::state_manager::ControllerTimers;

/// User intents forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    GoTo(usize),
    ToggleAutoPlay,
    /// Pointer entered the showcase.
    Pause,
    /// Pointer left the showcase.
    Resume,
}

#[derive(Debug)]
enum Command {
    Intent {
        intent: Intent,
        reply: oneshot::Sender<ShowcaseSnapshot>,
    },
    Shutdown {
        done: oneshot::Sender<()>,
    },
}

/// Single owner of the showcase state.
#[derive(Debug)]
pub struct ShowcaseController {
    showcase: Showcase,
    timers: ControllerTimers,
    config: ShowcaseConfig,
    commands: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<ShowcaseSnapshot>,
}

impl ShowcaseController {
    /// Spawns the controller task for `sequence` and returns a handle to it.
    ///
    /// Autoplay is on from the start, so the first advance is scheduled one
    /// `autoplay_interval` after this call. After every transition the next
    /// advance waits a full interval from the moment the lock is released.
    /// Must be called within a tokio runtime.
    pub fn spawn<T>(sequence: Arc<SlideSequence<T>>, config: ShowcaseConfig) -> ShowcaseHandle<T>
    where
        T: Send + Sync + 'static,
    {
        let showcase = Showcase::new(&*sequence);
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(showcase.snapshot());

        let mut controller = Self {
            showcase,
            timers: ControllerTimers::new(),
            config,
            commands,
            state_tx,
        };
        controller.arm_autoplay();

        info!(
            "Starting showcase controller: {} slide(s), autoplay every {}ms, lockout {}ms.",
            sequence.len(),
            controller.config.autoplay_interval.as_millis(),
            controller.config.transition_lockout.as_millis()
        );
        let task = tokio::spawn(controller.run());

        ShowcaseHandle {
            sequence,
            command_tx,
            state_rx,
            task: Arc::new(std::sync::Mutex::new(Some(task))),
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                _ = self.timers.lockout.expired(), if self.timers.lockout.is_armed() => {
                    self.on_lockout_expired();
                }
                _ = self.timers.autoplay.expired(), if self.timers.autoplay.is_armed() => {
                    self.on_autoplay_fired();
                }
                command = self.commands.recv() => match command {
                    Some(Command::Intent { intent, reply }) => {
                        self.handle_intent(intent);
                        // The caller may have given up waiting; the state is published either way.
                        let _ = reply.send(self.showcase.snapshot());
                    }
                    Some(Command::Shutdown { done }) => {
                        self.teardown();
                        let _ = done.send(());
                        break;
                    }
                    None => {
                        debug!("All showcase handles dropped.");
                        self.teardown();
                        break;
                    }
                },
            }
        }
        info!("Showcase controller stopped.");
    }

    fn handle_intent(&mut self, intent: Intent) {
        trace!("Handling intent {:?}.", intent);
        match intent {
            Intent::Next => {
                if self.showcase.advance() {
                    self.begin_transition();
                }
            }
            Intent::Previous => {
                if self.showcase.retreat() {
                    self.begin_transition();
                }
            }
            Intent::GoTo(index) => {
                if self.showcase.go_to_slide(index, None) {
                    self.begin_transition();
                }
            }
            Intent::ToggleAutoPlay => {
                if self.showcase.toggle_auto_play() {
                    self.arm_autoplay();
                } else {
                    self.timers.autoplay.cancel();
                }
                self.publish();
            }
            Intent::Pause => {
                self.showcase.set_paused(true);
                if self.timers.autoplay.cancel() {
                    debug!("Autoplay suspended while hovered.");
                }
                self.publish();
            }
            Intent::Resume => {
                self.showcase.set_paused(false);
                self.arm_autoplay();
                self.publish();
            }
        }
    }

    fn begin_transition(&mut self) {
        self.timers.begin_transition(self.config.transition_lockout);
        self.publish();
    }

    fn on_lockout_expired(&mut self) {
        self.timers.lockout.cancel();
        if self.showcase.finish_transition() {
            trace!("Lockout expired at slide {}.", self.showcase.current_index());
        }
        // A full interval on the unlocked slide before the next advance.
        self.arm_autoplay();
        self.publish();
    }

    fn on_autoplay_fired(&mut self) {
        self.timers.autoplay.cancel();
        if self.showcase.on_auto_play_tick() {
            debug!("Autoplay advanced to slide {}.", self.showcase.current_index());
            self.begin_transition();
        } else {
            debug!("Autoplay tick had nowhere to go; autoplay idle until the next interaction.");
        }
    }

    /// Arms autoplay one interval from now, only when the showcase can
    /// auto-advance.
    fn arm_autoplay(&mut self) {
        if self.showcase.autoplay_eligible() {
            self.timers.autoplay.arm(self.config.autoplay_interval);
        } else {
            self.timers.autoplay.cancel();
        }
    }

    fn publish(&self) {
        // send_replace keeps the value current even with no subscribers.
        self.state_tx.send_replace(self.showcase.snapshot());
    }

    fn teardown(&mut self) {
        let cancelled = self.timers.cancel_all();
        info!("Tearing down showcase controller ({} pending timer(s) cancelled).", cancelled);
    }
}

/// Front-end handle to a running `ShowcaseController`.
#[derive(Debug)]
pub struct ShowcaseHandle<T> {
    sequence: Arc<SlideSequence<T>>,
    command_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<ShowcaseSnapshot>,
    task: Arc<std::sync::Mutex<Option<JoinHandle<()>>>>,
}

impl<T> Clone for ShowcaseHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sequence: self.sequence.clone(),
            command_tx: self.command_tx.clone(),
            state_rx: self.state_rx.clone(),
            task: self.task.clone(),
        }
    }
}

impl<T> ShowcaseHandle<T> {
    /// Latest published state.
    pub fn snapshot(&self) -> ShowcaseSnapshot {
        *self.state_rx.borrow()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ShowcaseSnapshot> {
        self.state_rx.clone()
    }

    pub fn sequence(&self) -> &SlideSequence<T> {
        &self.sequence
    }

    /// The slide currently shown.
    pub fn current_slide(&self) -> &T {
        &self.sequence[self.snapshot().current_index]
    }

    pub async fn next(&self) -> ShowcaseSnapshot {
        self.send(Intent::Next).await
    }

    pub async fn previous(&self) -> ShowcaseSnapshot {
        self.send(Intent::Previous).await
    }

    pub async fn go_to(&self, index: usize) -> ShowcaseSnapshot {
        self.send(Intent::GoTo(index)).await
    }

    pub async fn toggle_auto_play(&self) -> ShowcaseSnapshot {
        self.send(Intent::ToggleAutoPlay).await
    }

    /// Hover-enter.
    pub async fn pause(&self) -> ShowcaseSnapshot {
        self.send(Intent::Pause).await
    }

    /// Hover-leave.
    pub async fn resume(&self) -> ShowcaseSnapshot {
        self.send(Intent::Resume).await
    }

    /// Forwards an intent and waits until the controller has applied it.
    ///
    /// After teardown the intent is dropped and the last published state is
    /// returned unchanged.
    pub async fn send(&self, intent: Intent) -> ShowcaseSnapshot {
        let (reply, response) = oneshot::channel();
        if self.command_tx.send(Command::Intent { intent, reply }).is_err() {
            trace!("Showcase controller is gone, dropping {:?}.", intent);
            return self.snapshot();
        }
        response.await.unwrap_or_else(|_| self.snapshot())
    }

    /// Stops the controller, cancelling its pending timers, and waits for the
    /// task to finish. Safe to call more than once.
    pub async fn shutdown(&self) {
        let (done, finished) = oneshot::channel();
        if self.command_tx.send(Command::Shutdown { done }).is_ok() {
            let _ = finished.await;
        }

        let task = match self.task.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("Showcase controller task ended abnormally: {}", e);
            }
        }
    }
}

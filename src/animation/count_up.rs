//! Animated counter from 0 to a target value.

use crate::animation::clock::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Time from first visibility to the final value.
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(2000);

/// Roughly one display frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Displayed value `elapsed` into a count-up of `duration`.
///
/// `floor(target * elapsed / duration)`, and exactly `target` once
/// `elapsed >= duration`.
///
/// ```
/// use elaira_inquiry::animation::count_up_value;
/// use std::time::Duration;
///
/// let total = Duration::from_millis(2000);
/// assert_eq!(count_up_value(290, Duration::from_millis(1000), total), 145);
/// assert_eq!(count_up_value(290, Duration::from_millis(2500), total), 290);
/// ```
pub fn count_up_value(target: u64, elapsed: Duration, duration: Duration) -> u64 {
    if elapsed >= duration {
        return target;
    }
    let scaled = u128::from(target) * elapsed.as_nanos() / duration.as_nanos();
    scaled as u64
}

/// Counter state driven by frame ticks.
///
/// Starts once on [`trigger`](Self::trigger); later triggers are ignored
/// until [`rearm`](Self::rearm), so a flickering visibility signal cannot
/// restart it.
#[derive(Debug, Clone)]
pub struct CountUpAnimator {
    target: u64,
    duration: Duration,
    started_at: Option<Instant>,
    value: u64,
    finished: bool,
}

impl CountUpAnimator {
    pub fn new(target: u64) -> Self {
        Self::with_duration(target, COUNT_UP_DURATION)
    }

    pub fn with_duration(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: None,
            value: 0,
            finished: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Start counting from `now`. Returns `false` if already started.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Advance to `now` and return the value to display.
    pub fn tick(&mut self, now: Instant) -> u64 {
        let Some(started_at) = self.started_at else {
            return self.value;
        };
        let elapsed = now.saturating_duration_since(started_at);
        self.value = count_up_value(self.target, elapsed, self.duration);
        self.finished = elapsed >= self.duration;
        self.value
    }

    /// Back to zero, ready for a fresh trigger.
    pub fn rearm(&mut self) {
        self.started_at = None;
        self.value = 0;
        self.finished = false;
    }
}

/// A running count-up. Dropping it stops the frame loop.
pub struct CountUpHandle {
    value: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl CountUpHandle {
    pub fn value(&self) -> u64 {
        *self.value.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.value.clone()
    }

    /// Whether the frame loop has ended (finished or stopped).
    pub fn is_done(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountUpHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `animator` once `visible` turns `true`, publishing a value per frame.
///
/// The loop ends when the animator reaches its target, when the visibility
/// sender goes away without ever turning `true`, or when the handle drops.
///
/// # Panics
///
/// Must be called from within a tokio runtime.
pub fn spawn_count_up(
    mut animator: CountUpAnimator,
    mut visible: watch::Receiver<bool>,
    clock: Arc<dyn Clock>,
    frame: Duration,
) -> CountUpHandle {
    let (tx, rx) = watch::channel(animator.value());

    let task = tokio::spawn(async move {
        if visible.wait_for(|seen| *seen).await.is_err() {
            return;
        }

        animator.trigger(clock.now());
        let mut frames = tokio::time::interval(frame);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            frames.tick().await;
            tx.send_replace(animator.tick(clock.now()));
            if animator.is_finished() {
                tracing::trace!("Count-up reached {}", animator.target());
                break;
            }
        }
    });

    CountUpHandle { value: rx, task }
}

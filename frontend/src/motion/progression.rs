use log::{debug, warn};

use super::easing::Easing;
use super::gate::Ticket;

/// Something that can call back on the next display frame with a timestamp in milliseconds.
pub trait FrameScheduler {
    /// Returns false when the frame could not be requested; the callback is dropped.
    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: f64,
    pub progress: f64,
    pub done: bool,
}

/// Drives a value from `start` to `target` over `duration_ms`.
/// The clock starts at the first sampled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    start: f64,
    target: f64,
    duration_ms: f64,
    begin: Option<f64>,
    easing: Easing,
}

impl Progression {
    pub fn new(start: f64, target: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            start,
            target,
            duration_ms,
            begin: None,
            easing,
        }
    }

    pub fn sample(&mut self, now: f64) -> Frame {
        let begin = *self.begin.get_or_insert(now);

        let progress = if self.duration_ms <= 0.0 || !self.duration_ms.is_finite() {
            1.0
        } else {
            let raw = (now - begin) / self.duration_ms;
            if raw.is_finite() {
                raw.clamp(0.0, 1.0)
            } else {
                1.0
            }
        };

        let done = progress >= 1.0;
        let value = if done {
            self.target
        } else {
            self.start + (self.target - self.start) * self.easing.apply(progress)
        };

        Frame {
            value,
            progress,
            done,
        }
    }
}

struct Running<S> {
    scheduler: S,
    progression: Progression,
    apply: Box<dyn FnMut(f64)>,
    on_done: Option<Box<dyn FnOnce()>>,
    ticket: Option<Ticket>,
}

/// Runs a progression to completion, one frame at a time.
/// Each frame is requested only after the previous one has been applied.
pub fn run<S>(
    scheduler: S,
    progression: Progression,
    apply: impl FnMut(f64) + 'static,
    on_done: Option<Box<dyn FnOnce()>>,
) where
    S: FrameScheduler + Clone + 'static,
{
    schedule(Running {
        scheduler,
        progression,
        apply: Box::new(apply),
        on_done,
        ticket: None,
    });
}

/// Like [`run`], but the task stops at its next frame once `ticket` has been
/// superseded. A stopped task writes nothing more and never calls `on_done`.
pub fn run_exclusive<S>(
    scheduler: S,
    progression: Progression,
    ticket: Ticket,
    apply: impl FnMut(f64) + 'static,
    on_done: Option<Box<dyn FnOnce()>>,
) where
    S: FrameScheduler + Clone + 'static,
{
    schedule(Running {
        scheduler,
        progression,
        apply: Box::new(apply),
        on_done,
        ticket: Some(ticket),
    });
}

fn schedule<S>(mut running: Running<S>)
where
    S: FrameScheduler + Clone + 'static,
{
    let scheduler = running.scheduler.clone();
    let queued = scheduler.request(Box::new(move |now: f64| {
        if running.ticket.as_ref().is_some_and(|ticket| !ticket.is_current()) {
            debug!("Progression superseded, stopping");
            return;
        }
        let frame = running.progression.sample(now);
        (running.apply)(frame.value);
        if frame.done {
            if let Some(on_done) = running.on_done.take() {
                on_done();
            }
        } else {
            schedule(running);
        }
    }));
    if !queued {
        warn!("Progression abandoned: no frame available");
    }
}

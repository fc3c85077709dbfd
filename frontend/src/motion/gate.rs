use std::cell::Cell;
use std::rc::Rc;

use super::progression::FrameScheduler;

/// Collapses bursts of scroll or pointer events into one update per frame.
#[derive(Clone, Default)]
pub struct FrameGate {
    pending: Rc<Cell<bool>>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Returns false when an update is already queued for the coming frame.
    pub fn schedule<S>(&self, scheduler: &S, update: impl FnOnce(f64) + 'static) -> bool
    where
        S: FrameScheduler + ?Sized,
    {
        if self.pending.replace(true) {
            return false;
        }
        let pending = self.pending.clone();
        let queued = scheduler.request(Box::new(move |now: f64| {
            pending.set(false);
            update(now);
        }));
        if !queued {
            // The frame will never come to clear the flag.
            self.pending.set(false);
        }
        queued
    }
}

/// Hands out tickets where only the most recent one is current, so a newer
/// task can retire an older one that is still running.
#[derive(Debug, Clone, Default)]
pub struct Latest {
    generation: Rc<Cell<u64>>,
}

impl Latest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&self) -> Ticket {
        let id = self.generation.get().wrapping_add(1);
        self.generation.set(id);
        Ticket {
            id,
            generation: self.generation.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    generation: Rc<Cell<u64>>,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.id
    }
}

/// Remembers which keys already fired; each key passes exactly once.
#[derive(Debug, Clone)]
pub struct OnceSet<T> {
    fired: Vec<T>,
}

impl<T> Default for OnceSet<T> {
    fn default() -> Self {
        Self { fired: Vec::new() }
    }
}

impl<T: PartialEq> OnceSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(&mut self, key: &T) -> bool
    where
        T: Clone,
    {
        if self.fired.contains(key) {
            return false;
        }
        self.fired.push(key.clone());
        true
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

//! Teardown bookkeeping and cancellable timers.
//!
//! Every listener, observer, or timer an optional feature creates is recorded
//! here as a teardown closure. An apply pass drains the registry before it
//! builds anything new, so a feature can never outlive the pass that created it.

use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

/// Zero-argument callback that undoes exactly one registered effect.
pub type Teardown = Box<dyn FnOnce()>;

struct Registration {
    label: &'static str,
    teardown: Teardown,
}

/// Ordered arena of teardown closures.
///
/// Cloning shares the same arena, so timer callbacks can register late
/// effects into the pass that scheduled them.
#[derive(Clone, Default)]
pub struct TeardownRegistry {
    entries: Rc<RefCell<Vec<Registration>>>,
}

impl TeardownRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, label: &'static str, teardown: Teardown) {
        self.entries.borrow_mut().push(Registration { label, teardown });
    }

    /// Run every teardown in registration order and empty the arena.
    ///
    /// A panicking teardown is logged and skipped; the rest still run.
    /// Returns how many teardowns were invoked.
    pub fn teardown_all(&self) -> usize {
        // Drain before running so a teardown may touch the registry.
        let drained = std::mem::take(&mut *self.entries.borrow_mut());
        let count = drained.len();
        for Registration { label, teardown } in drained {
            if catch_unwind(AssertUnwindSafe(teardown)).is_err() {
                log::warn!("teardown `{label}` panicked; continuing");
            }
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.borrow().iter().map(|r| r.label).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// One-shot timers (`setTimeout` in the browser).
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;
    /// Cancelling a fired or unknown timer is a no-op.
    fn cancel(&self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        (**self).schedule(delay_ms, callback)
    }

    fn cancel(&self, id: TimerId) {
        (**self).cancel(id);
    }
}

/// Holds at most one pending timer. Arming cancels whatever was pending.
#[derive(Clone)]
pub struct TimerSlot<S: Scheduler> {
    scheduler: S,
    pending: Rc<Cell<Option<TimerId>>>,
    generation: Rc<Cell<u64>>,
}

impl<S: Scheduler> TimerSlot<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn arm(&self, delay_ms: u32, callback: impl FnOnce() + 'static) {
        self.cancel();
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let pending = Rc::clone(&self.pending);
        let current = Rc::clone(&self.generation);
        let id = self.scheduler.schedule(
            delay_ms,
            Box::new(move || {
                if current.get() == generation {
                    pending.set(None);
                }
                callback();
            }),
        );
        self.pending.set(Some(id));
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::ManualScheduler;

    #[test]
    fn teardown_runs_in_registration_order_exactly_once() {
        let registry = TeardownRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for label in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            registry.register(label, Box::new(move || log.borrow_mut().push(label)));
        }
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.teardown_all(), 3);
        assert_eq!(registry.teardown_all(), 0);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn panicking_teardown_does_not_stop_the_rest() {
        let registry = TeardownRegistry::new();
        let ran = Rc::new(Cell::new(false));
        registry.register("boom", Box::new(|| panic!("node already removed")));
        let flag = Rc::clone(&ran);
        registry.register("after", Box::new(move || flag.set(true)));
        registry.teardown_all();
        assert!(ran.get());
        assert!(registry.is_empty());
    }

    #[test]
    fn teardown_may_register_into_the_next_cycle() {
        let registry = TeardownRegistry::new();
        let inner = registry.clone();
        registry.register(
            "reentrant",
            Box::new(move || inner.register("late", Box::new(|| {}))),
        );
        registry.teardown_all();
        assert_eq!(registry.labels(), vec!["late"]);
    }

    #[test]
    fn timer_slot_rearm_cancels_previous() {
        let scheduler = ManualScheduler::default();
        let slot = TimerSlot::new(scheduler.clone());
        let fired = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&fired);
        slot.arm(100, move || log.borrow_mut().push("first"));
        scheduler.advance(50);
        let log = Rc::clone(&fired);
        slot.arm(100, move || log.borrow_mut().push("second"));
        scheduler.advance(60);
        assert!(fired.borrow().is_empty());
        assert!(slot.is_pending());
        scheduler.advance(40);
        assert_eq!(*fired.borrow(), vec!["second"]);
        assert!(!slot.is_pending());
    }

    #[test]
    fn cancelled_slot_never_fires() {
        let scheduler = ManualScheduler::default();
        let slot = TimerSlot::new(scheduler.clone());
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        slot.arm(10, move || flag.set(true));
        slot.cancel();
        scheduler.advance(100);
        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 0);
    }
}

//! Navigation detection for client-side route changes.
//!
//! The router swaps large parts of the DOM without a page load. Once the DOM
//! has been quiet for a moment the speech feature is re-initialized.

use crate::constants::ROUTE_REINIT_DEBOUNCE_MS;
use crate::lifecycle::{Scheduler, TimerSlot};
use std::rc::Rc;

/// Tags whose insertion never counts as navigation.
const IGNORED_TAGS: [&str; 2] = ["SCRIPT", "STYLE"];

/// The part of a `MutationRecord` the detector cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationSummary {
    pub child_list: bool,
    /// Upper-case tag names of added element nodes; text nodes are omitted.
    pub added_elements: Vec<String>,
}

impl MutationSummary {
    #[must_use]
    pub fn child_list<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            child_list: true,
            added_elements: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// True when any record adds an element other than `<script>`/`<style>`.
#[must_use]
pub fn is_navigation_change(records: &[MutationSummary]) -> bool {
    records.iter().any(|record| {
        record.child_list
            && record.added_elements.iter().any(|tag| {
                !IGNORED_TAGS
                    .iter()
                    .any(|ignored| tag.eq_ignore_ascii_case(ignored))
            })
    })
}

/// Debounces navigation signals into a single re-initialization callback.
#[derive(Clone)]
pub struct RouteSignals<S: Scheduler> {
    slot: TimerSlot<S>,
    on_settled: Rc<dyn Fn()>,
    delay_ms: u32,
}

impl<S: Scheduler + Clone + 'static> RouteSignals<S> {
    pub fn new(scheduler: S, on_settled: Rc<dyn Fn()>) -> Self {
        Self {
            slot: TimerSlot::new(scheduler),
            on_settled,
            delay_ms: ROUTE_REINIT_DEBOUNCE_MS,
        }
    }

    /// Feed a batch of mutation records from the body observer.
    pub fn mutations(&self, records: &[MutationSummary]) {
        if is_navigation_change(records) {
            self.restart();
        }
    }

    /// History navigation (`popstate`).
    pub fn popstate(&self) {
        self.restart();
    }

    pub fn cancel(&self) {
        self.slot.cancel();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    fn restart(&self) {
        let callback = Rc::clone(&self.on_settled);
        self.slot.arm(self.delay_ms, move || callback());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::ManualScheduler;
    use std::cell::Cell;

    #[test]
    fn script_and_style_insertions_are_ignored() {
        assert!(!is_navigation_change(&[MutationSummary::child_list([
            "SCRIPT", "style"
        ])]));
        assert!(!is_navigation_change(&[MutationSummary::child_list(
            Vec::<String>::new()
        )]));
        assert!(is_navigation_change(&[
            MutationSummary::child_list(["SCRIPT"]),
            MutationSummary::child_list(["MAIN"]),
        ]));
    }

    #[test]
    fn attribute_records_do_not_count() {
        let record = MutationSummary {
            child_list: false,
            added_elements: vec!["DIV".into()],
        };
        assert!(!is_navigation_change(&[record]));
    }

    #[test]
    fn bursts_collapse_into_one_reinit() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let signals = RouteSignals::new(
            scheduler.clone(),
            Rc::new(move || counter.set(counter.get() + 1)),
        );

        signals.mutations(&[MutationSummary::child_list(["SECTION"])]);
        scheduler.advance(400);
        signals.popstate();
        scheduler.advance(400);
        signals.mutations(&[MutationSummary::child_list(["DIV"])]);
        scheduler.advance(999);
        assert_eq!(count.get(), 0);
        scheduler.advance(1);
        assert_eq!(count.get(), 1);
        assert!(!signals.is_pending());
    }

    #[test]
    fn cancel_drops_pending_reinit() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let signals = RouteSignals::new(
            scheduler.clone(),
            Rc::new(move || counter.set(counter.get() + 1)),
        );
        signals.popstate();
        signals.cancel();
        scheduler.advance(5_000);
        assert_eq!(count.get(), 0);
    }
}

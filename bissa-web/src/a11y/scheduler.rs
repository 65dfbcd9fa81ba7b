use crate::dom;
use bissa_core::lifecycle::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

struct PendingTimeout {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct TimeoutTable {
    next_id: Cell<u64>,
    pending: RefCell<HashMap<u64, PendingTimeout>>,
    /// Closures that already fired; a closure cannot be dropped while it runs.
    retired: RefCell<Vec<PendingTimeout>>,
    firing: Cell<u32>,
}

impl TimeoutTable {
    fn retire(&self, id: u64) {
        if let Some(done) = self.pending.borrow_mut().remove(&id) {
            self.retired.borrow_mut().push(done);
        }
    }
}

/// `setTimeout` / `clearTimeout` on the global window.
#[derive(Clone, Default)]
pub struct TimeoutScheduler {
    table: Rc<TimeoutTable>,
}

impl TimeoutScheduler {
    #[must_use]
    pub fn pending(&self) -> usize {
        self.table.pending.borrow().len()
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let table = &self.table;
        if table.firing.get() == 0 {
            table.retired.borrow_mut().clear();
        }
        let id = table.next_id.get() + 1;
        table.next_id.set(id);

        let weak: Weak<TimeoutTable> = Rc::downgrade(table);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            let table = weak.upgrade();
            if let Some(table) = &table {
                table.firing.set(table.firing.get() + 1);
                table.retire(id);
            }
            if let Some(callback) = callback.take() {
                callback();
            }
            if let Some(table) = &table {
                table.firing.set(table.firing.get().saturating_sub(1));
            }
        }) as Box<dyn FnMut()>);

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let scheduled = dom::window()
            .ok_or_else(|| JsValue::from_str("window unavailable"))
            .and_then(|win| {
                win.set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    delay,
                )
            });
        match scheduled {
            Ok(handle) => {
                table.pending.borrow_mut().insert(
                    id,
                    PendingTimeout {
                        handle,
                        _closure: closure,
                    },
                );
            }
            Err(err) => log::warn!("setTimeout failed: {}", dom::js_error_message(&err)),
        }
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        let removed = self.table.pending.borrow_mut().remove(&id.0);
        if let Some(timeout) = removed
            && let Some(win) = dom::window()
        {
            win.clear_timeout_with_handle(timeout.handle);
        }
    }
}

//! Conversion event listeners.
//!
//! Listeners observe object/array boundaries, property assignment and
//! diagnostics. Dispatch is synchronous and isolated: a panicking
//! listener is logged and never aborts the conversion or blocks the
//! remaining listeners.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use log::warn;

#[cfg(test)]
use mockall::automock;

use crate::error::JsonError;

/// Observer notified while a conversion walks the graph. All methods
/// default to no-ops so implementors override only what they need.
#[cfg_attr(test, automock)]
pub trait JsonEventListener {
    fn on_object_start(&self) {}

    fn on_object_end(&self) {}

    fn on_array_start(&self) {}

    fn on_array_end(&self) {}

    /// A property was assigned into the result under `key`.
    fn on_property_set(&self, _key: &str) {}

    /// A non-fatal diagnostic, e.g. a skipped unreadable property.
    fn on_warning(&self, _message: &str) {}

    /// A fatal error is about to be raised.
    fn on_error(&self, _error: &JsonError) {}
}

/// Invokes `event` on every listener, swallowing panics.
pub(crate) fn dispatch<F>(listeners: &[Rc<dyn JsonEventListener>], event: F)
where
    F: Fn(&dyn JsonEventListener),
{
    for listener in listeners {
        if catch_unwind(AssertUnwindSafe(|| event(listener.as_ref()))).is_err() {
            warn!("json event listener panicked; continuing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Panicking;

    impl JsonEventListener for Panicking {
        fn on_warning(&self, _message: &str) {
            panic!("listener failure");
        }
    }

    struct Counting(Rc<Cell<usize>>);

    impl JsonEventListener for Counting {
        fn on_warning(&self, _message: &str) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn mocked_listener_sees_each_event_once() {
        let mut mock = MockJsonEventListener::new();
        mock.expect_on_property_set()
            .withf(|key| key == "name")
            .times(1)
            .return_const(());
        let listeners: Vec<Rc<dyn JsonEventListener>> = vec![Rc::new(mock)];
        dispatch(&listeners, |l| l.on_property_set("name"));
    }

    #[test]
    fn a_panicking_listener_does_not_block_the_others() {
        let count = Rc::new(Cell::new(0));
        let listeners: Vec<Rc<dyn JsonEventListener>> = vec![
            Rc::new(Panicking),
            Rc::new(Counting(count.clone())),
        ];
        dispatch(&listeners, |l| l.on_warning("boom"));
        assert_eq!(count.get(), 1);
    }
}

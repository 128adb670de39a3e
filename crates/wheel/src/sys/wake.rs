use glib::SourceId;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// A single pending main-loop timeout. Arming replaces whatever was pending.
#[derive(Debug, Default, Clone)]
pub struct WakeTimer {
    slot: Rc<RefCell<Option<SourceId>>>,
}

impl WakeTimer {
    pub fn arm(&self, delay: Duration, f: impl FnOnce() + 'static) {
        self.cancel();
        let slot = Rc::clone(&self.slot);
        let id = glib::timeout_add_local_once(delay, move || {
            // the source is gone once this runs; removing it again would panic
            slot.borrow_mut().take();
            f();
        });
        *self.slot.borrow_mut() = Some(id);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.slot.borrow_mut().take() {
            id.remove();
        }
    }
}
